//! End-to-end scenarios behind the sample binaries.
//!
//! Each driver is a fixed sequence: token, discovery, group lookup, selection, then the send.
//! Selection always takes the first match in provider order.

// std
use std::fs;
// self
use crate::{
	_prelude::*,
	api::{
		AgreementCreated, AgreementTemplate, DocumentRef, GroupInfo, LibraryDocument,
		LibraryDocuments, SignApi, UserGroups,
	},
	config::{self, AGREEMENT_TEMPLATE_FILE, CREDENTIALS_FILE, OAuthCredentials},
	error::{ConfigError, NotFoundError},
	flows::TokenManager,
	http::ReqwestHttpClient,
	obs,
};

/// File name of the document uploaded by the transient-document sample.
pub const SAMPLE_DOCUMENT_FILE: &str = "SampleDocument.txt";

/// Directory holding the JSON request files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestFiles {
	/// Root directory.
	pub dir: PathBuf,
}
impl RequestFiles {
	/// Uses `dir` as the request file root.
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	/// Loads `OAuthCredentials.json`.
	pub fn credentials(&self) -> Result<OAuthCredentials, ConfigError> {
		OAuthCredentials::load(self.dir.join(CREDENTIALS_FILE))
	}

	/// Loads `SendAgreement.json`.
	pub fn agreement_template(&self) -> Result<AgreementTemplate, ConfigError> {
		config::load_json(self.dir.join(AGREEMENT_TEMPLATE_FILE))
	}

	/// Loads `SampleDocument.txt`.
	pub fn sample_document(&self) -> Result<UploadFile, ConfigError> {
		UploadFile::load(self.dir.join(SAMPLE_DOCUMENT_FILE))
	}
}
impl Default for RequestFiles {
	fn default() -> Self {
		Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/requests"))
	}
}

/// File content queued for a transient upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
	/// Name reported in `File-Name`.
	pub file_name: String,
	/// Type reported in `Mime-Type`.
	pub mime_type: String,
	/// Raw content.
	pub bytes: Vec<u8>,
}
impl UploadFile {
	/// Reads `path`; the MIME type follows the extension.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let bytes =
			fs::read(path).map_err(|source| ConfigError::Read { path: path.to_owned(), source })?;
		let file_name = path
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_else(|| SAMPLE_DOCUMENT_FILE.into());
		let mime_type = mime_type_for(path).into();

		Ok(Self { file_name, mime_type, bytes })
	}
}

/// Acquires the run's access token and binds a [`SignApi`] to the discovered base URL.
///
/// Nothing past token acquisition runs if no token can be obtained.
pub async fn connect(credentials: OAuthCredentials) -> Result<SignApi> {
	let http = ReqwestHttpClient::new()?;
	let manager = TokenManager::<ReqwestHttpClient>::with_http_client(credentials, http.clone());
	let token = manager.access_token().await?;

	obs::debug_event(&format!("Obtained access token from {}.", token.source));

	SignApi::discover(http, &manager.credentials.endpoints, token).await
}

/// First active group the user can send from.
pub fn select_sendable_group(groups: &UserGroups) -> Result<&GroupInfo, NotFoundError> {
	groups.group_info_list.iter().find(|group| group.can_send()).ok_or(NotFoundError::SendableGroup)
}

/// First personal, group, or account library document with a non-empty id.
pub fn select_library_document<'a>(
	documents: &'a LibraryDocuments,
	group_id: &str,
) -> Result<&'a LibraryDocument, NotFoundError> {
	documents
		.library_document_list
		.iter()
		.find(|document| document.is_shared_with_user() && !document.id.is_empty())
		.ok_or_else(|| NotFoundError::LibraryDocument { group_id: group_id.into() })
}

/// Sends `template` using the first usable library document of the first sendable group.
pub async fn send_agreement_using_library_document(
	api: &SignApi,
	template: AgreementTemplate,
) -> Result<AgreementCreated> {
	let groups = api.user_groups().await?;
	let group_id = select_sendable_group(&groups)?.id.clone();
	let documents = api.library_documents(&group_id).await?;
	let document_id = select_library_document(&documents, &group_id)?.id.clone();

	obs::debug_event(&format!("Sending library document {document_id} from group {group_id}."));

	let request = template.into_request(DocumentRef::LibraryDocument(document_id), group_id);

	api.send_agreement(&request).await
}

/// Uploads `file` and sends `template` with it from the first sendable group.
pub async fn send_agreement_using_transient_document(
	api: &SignApi,
	template: AgreementTemplate,
	file: &UploadFile,
) -> Result<AgreementCreated> {
	let groups = api.user_groups().await?;
	let group_id = select_sendable_group(&groups)?.id.clone();
	let upload = api
		.upload_transient_document(&file.file_name, &file.mime_type, file.bytes.clone())
		.await?;

	obs::debug_event(&format!(
		"Sending transient document {} from group {group_id}.",
		upload.transient_document_id
	));

	let request =
		template.into_request(DocumentRef::TransientDocument(upload.transient_document_id), group_id);

	api.send_agreement(&request).await
}

/// Installs `color-eyre` reports and a `RUST_LOG`-driven `tracing` subscriber writing to stderr.
#[cfg(feature = "cli")]
pub fn install_reporting() -> color_eyre::Result<()> {
	// crates.io
	use tracing_subscriber::EnvFilter;

	color_eyre::install()?;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init().map_err(
		|err| color_eyre::eyre::eyre!("Failed to install the tracing subscriber: {err}."),
	)
}

fn mime_type_for(path: &Path) -> &'static str {
	match path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase).as_deref() {
		Some("txt") => "text/plain",
		Some("pdf") => "application/pdf",
		Some("html" | "htm") => "text/html",
		Some("doc") => "application/msword",
		Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
		_ => "application/octet-stream",
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn groups(json: &str) -> UserGroups {
		serde_json::from_str(json).expect("Groups fixture should parse.")
	}

	#[test]
	fn first_sendable_group_wins() {
		let groups = groups(
			"{\"groupInfoList\":[\
			 {\"id\":\"g0\",\"status\":\"INACTIVE\",\"settings\":{\"userCanSend\":{\"value\":true}}},\
			 {\"id\":\"g1\",\"status\":\"ACTIVE\",\"settings\":{\"userCanSend\":{\"value\":true}}},\
			 {\"id\":\"g2\",\"status\":\"ACTIVE\",\"settings\":{\"userCanSend\":{\"value\":true}}}]}",
		);

		assert_eq!(select_sendable_group(&groups).map(|group| group.id.as_str()), Ok("g1"));
	}

	#[test]
	fn no_sendable_group_is_not_found() {
		let groups = groups(
			"{\"groupInfoList\":[\
			 {\"id\":\"g1\",\"status\":\"ACTIVE\",\"settings\":{\"userCanSend\":{\"value\":false}}}]}",
		);

		assert_eq!(select_sendable_group(&groups).map(|group| group.id.as_str()), Err(NotFoundError::SendableGroup));
	}

	#[test]
	fn global_documents_are_skipped() {
		let documents: LibraryDocuments = serde_json::from_str(
			"{\"libraryDocumentList\":[\
			 {\"id\":\"global\",\"sharingMode\":\"GLOBAL\"},\
			 {\"id\":\"mine\",\"sharingMode\":\"USER\"}]}",
		)
		.expect("Documents fixture should parse.");

		assert_eq!(select_library_document(&documents, "g1").map(|doc| doc.id.as_str()), Ok("mine"));
	}

	#[test]
	fn documents_without_an_id_are_skipped() {
		let documents: LibraryDocuments = serde_json::from_str(
			"{\"libraryDocumentList\":[\
			 {\"id\":\"\",\"sharingMode\":\"ACCOUNT\"},\
			 {\"id\":\"doc123\",\"sharingMode\":\"GROUP\"}]}",
		)
		.expect("Documents fixture should parse.");

		assert_eq!(select_library_document(&documents, "g1").map(|doc| doc.id.as_str()), Ok("doc123"));
	}

	#[test]
	fn empty_document_list_names_the_group() {
		let err = select_library_document(&LibraryDocuments::default(), "g1")
			.expect_err("Empty lists must fail.");

		assert_eq!(err, NotFoundError::LibraryDocument { group_id: "g1".into() });
	}

	#[test]
	fn shipped_request_files_load() {
		let files = RequestFiles::default();

		assert!(files.credentials().is_ok());
		assert!(files.agreement_template().is_ok());

		let document = files.sample_document().expect("Sample document should load.");

		assert_eq!(document.file_name, SAMPLE_DOCUMENT_FILE);
		assert_eq!(document.mime_type, "text/plain");
		assert!(!document.bytes.is_empty());
	}
}
