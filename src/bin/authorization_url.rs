//! Prints the consent-page URL that yields an authorization code for `OAuthCredentials.json`.

// crates.io
use color_eyre::{Result, eyre::WrapErr};
// self
use esign_samples::{flows::TokenManager, samples::{self, RequestFiles}};

fn main() -> Result<()> {
	samples::install_reporting()?;

	let files = RequestFiles::default();
	let credentials = files.credentials().wrap_err("Failed to load the OAuth credentials.")?;
	let request = TokenManager::new(credentials)?.authorization_request();

	println!("Open this URL, approve access, then paste the `code` query parameter into the");
	println!("credentials file:");
	println!("{}", request.url);
	println!("The redirect must carry back state `{}`.", request.state);

	Ok(())
}
