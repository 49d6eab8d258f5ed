//! `GET /libraryDocuments`: reusable documents and templates visible to a group.

// self
use crate::{_prelude::*, api::SignApi};

/// One page of library documents.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryDocuments {
	/// Documents in provider order.
	#[serde(default)]
	pub library_document_list: Vec<LibraryDocument>,
	/// Paging cursor, when more pages exist.
	#[serde(default)]
	pub page: Option<PageCursor>,
}

/// Paging information returned with list responses.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCursor {
	/// Cursor of the next page.
	#[serde(default)]
	pub next_cursor: Option<String>,
}

/// Library document summary.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryDocument {
	/// Library document identifier.
	pub id: String,
	/// Display name.
	#[serde(default)]
	pub name: Option<String>,
	/// Who the document is shared with.
	#[serde(default)]
	pub sharing_mode: SharingMode,
	/// Template kinds, e.g. `DOCUMENT` or `FORM_FIELD_LAYER`.
	#[serde(default)]
	pub template_types: Vec<String>,
	/// Lifecycle status, e.g. `ACTIVE`.
	#[serde(default)]
	pub status: Option<String>,
}
impl LibraryDocument {
	/// `true` for personal, group, or account documents.
	pub fn is_shared_with_user(&self) -> bool {
		matches!(self.sharing_mode, SharingMode::User | SharingMode::Group | SharingMode::Account)
	}
}

/// Sharing scope of a [`LibraryDocument`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SharingMode {
	/// Owned by the user.
	User,
	/// Shared with a group.
	Group,
	/// Shared with the whole account.
	Account,
	/// Shared across accounts.
	Global,
	/// Absent or unrecognized mode.
	#[default]
	#[serde(other)]
	Other,
}

impl SignApi {
	/// Lists the first page of library documents visible to `group_id`.
	pub async fn library_documents(&self, group_id: &str) -> Result<LibraryDocuments> {
		let mut request = self.request(Method::GET, "libraryDocuments", "library_documents")?;

		request.url.query_pairs_mut().append_pair("groupId", group_id);

		self.http.invoke_as(request).await
	}
}
