//! Sends an agreement built from the first personal, group, or account library document of the
//! first group the user can send from.

// crates.io
use color_eyre::{Result, eyre::WrapErr};
// self
use esign_samples::{
	api::{AgreementCreated, AgreementTemplate},
	config::OAuthCredentials,
	error::Error,
	samples::{self, RequestFiles},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
	samples::install_reporting()?;

	let files = RequestFiles::default();
	let credentials = files.credentials()?;
	let template = files.agreement_template()?;
	let created = send(credentials, template)
		.await
		.wrap_err("Failure in sending the agreement using a library document.")?;

	println!("Agreement sent. Agreement ID = {}.", created.id);

	Ok(())
}

async fn send(
	credentials: OAuthCredentials,
	template: AgreementTemplate,
) -> Result<AgreementCreated, Error> {
	let api = samples::connect(credentials).await?;

	samples::send_agreement_using_library_document(&api, template).await
}
