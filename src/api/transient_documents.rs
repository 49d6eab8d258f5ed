//! `POST /transientDocuments`: short-lived uploads referenced by a single agreement.

// crates.io
use reqwest::multipart::{Form, Part};
// self
use crate::{_prelude::*, api::SignApi, error::ConfigError};

/// Upload receipt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransientDocument {
	/// Identifier accepted by [`DocumentRef::TransientDocument`](crate::api::DocumentRef).
	pub transient_document_id: String,
}

impl SignApi {
	/// Uploads `bytes` as a transient document named `file_name`.
	pub async fn upload_transient_document(
		&self,
		file_name: &str,
		mime_type: &str,
		bytes: impl Into<Vec<u8>>,
	) -> Result<TransientDocument> {
		let form = upload_form(file_name, mime_type, bytes.into())?;
		let request = self
			.request(Method::POST, "transientDocuments", "transient_documents")?
			.multipart(form);

		self.http.invoke_as(request).await
	}
}

fn upload_form(file_name: &str, mime_type: &str, bytes: Vec<u8>) -> Result<Form, ConfigError> {
	let file = Part::bytes(bytes)
		.file_name(file_name.to_owned())
		.mime_str(mime_type)
		.map_err(|_| ConfigError::InvalidHeader { name: "Mime-Type".into() })?;

	Ok(Form::new()
		.text("File-Name", file_name.to_owned())
		.text("Mime-Type", mime_type.to_owned())
		.part("File", file))
}
