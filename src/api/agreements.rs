//! `POST /agreements`: send a document out for signature.
//!
//! The outgoing body is built from an [`AgreementTemplate`] read from disk plus the document and
//! group chosen at run time. [`DocumentRef`] decides which `fileInfos` field is populated.

// self
use crate::{_prelude::*, api::SignApi, error::ConfigError};

type JsonMap = serde_json::Map<String, Value>;

/// Document an agreement is built from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentRef {
	/// Stored library document; serialized as `{"libraryDocumentId": id}`.
	#[serde(rename = "libraryDocumentId")]
	LibraryDocument(String),
	/// Upload from `/transientDocuments`; serialized as `{"transientDocumentId": id}`.
	#[serde(rename = "transientDocumentId")]
	TransientDocument(String),
}

/// Agreement fields loaded from `SendAgreement.json`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgreementTemplate {
	/// Agreement name shown to participants.
	pub name: String,
	/// Signers and approvers.
	pub participant_sets_info: Vec<ParticipantSet>,
	/// `ESIGN` or `WRITTEN`.
	#[serde(default = "default_signature_type")]
	pub signature_type: String,
	/// Initial state, normally `IN_PROCESS`.
	#[serde(default = "default_state")]
	pub state: String,
	/// Other fields, passed through unchanged.
	#[serde(flatten)]
	pub extra: JsonMap,
}
impl AgreementTemplate {
	/// Builds the request body, replacing any `fileInfos` or `groupId` from the file.
	pub fn into_request(self, document: DocumentRef, group_id: impl Into<String>) -> AgreementRequest {
		let AgreementTemplate { name, participant_sets_info, signature_type, state, mut extra } =
			self;

		extra.remove("fileInfos");
		extra.remove("groupId");

		AgreementRequest {
			file_infos: vec![document],
			group_id: group_id.into(),
			name,
			participant_sets_info,
			signature_type,
			state,
			extra,
		}
	}
}

/// One step of the signing flow.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSet {
	/// Members acting in this step.
	pub member_infos: Vec<MemberInfo>,
	/// 1-based position in the flow.
	pub order: u32,
	/// e.g. `SIGNER` or `APPROVER`.
	pub role: String,
}

/// Participant identity.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInfo {
	/// Participant email address.
	pub email: String,
}

/// Body of `POST /agreements`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgreementRequest {
	/// Exactly one document reference.
	pub file_infos: Vec<DocumentRef>,
	/// Group the agreement is sent from.
	pub group_id: String,
	/// Agreement name.
	pub name: String,
	/// Signing flow.
	pub participant_sets_info: Vec<ParticipantSet>,
	/// Signature type.
	pub signature_type: String,
	/// Initial state.
	pub state: String,
	/// Pass-through fields from the template.
	#[serde(flatten)]
	pub extra: JsonMap,
}

/// Response of `POST /agreements`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementCreated {
	/// New agreement identifier.
	pub id: String,
}

impl SignApi {
	/// Creates and sends an agreement.
	pub async fn send_agreement(&self, agreement: &AgreementRequest) -> Result<AgreementCreated> {
		let body = serde_json::to_value(agreement).map_err(ConfigError::Encode)?;
		let request = self.request(Method::POST, "agreements", "send_agreement")?.json(body);

		self.http.invoke_as(request).await
	}
}

fn default_signature_type() -> String {
	"ESIGN".into()
}

fn default_state() -> String {
	"IN_PROCESS".into()
}
