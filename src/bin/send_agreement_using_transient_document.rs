//! Uploads `SampleDocument.txt` as a transient document and sends an agreement built from it.

// crates.io
use color_eyre::{Result, eyre::WrapErr};
// self
use esign_samples::{
	api::{AgreementCreated, AgreementTemplate},
	config::OAuthCredentials,
	error::Error,
	samples::{self, RequestFiles, UploadFile},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
	samples::install_reporting()?;

	let files = RequestFiles::default();
	let credentials = files.credentials()?;
	let template = files.agreement_template()?;
	let document = files.sample_document()?;
	let created = send(credentials, template, &document)
		.await
		.wrap_err("Failure in sending the agreement using a transient document.")?;

	println!("Agreement sent. Agreement ID = {}.", created.id);

	Ok(())
}

async fn send(
	credentials: OAuthCredentials,
	template: AgreementTemplate,
	document: &UploadFile,
) -> Result<AgreementCreated, Error> {
	let api = samples::connect(credentials).await?;

	samples::send_agreement_using_transient_document(&api, template, document).await
}
