//! `GET /users/me/groups`: groups the current user belongs to.

// self
use crate::{_prelude::*, api::SignApi};

/// Group membership list for the current user.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroups {
	/// Groups in provider order.
	#[serde(default)]
	pub group_info_list: Vec<GroupInfo>,
}

/// One group membership.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupInfo {
	/// Group identifier.
	pub id: String,
	/// Display name.
	#[serde(default)]
	pub name: Option<String>,
	/// Membership status.
	#[serde(default)]
	pub status: MembershipStatus,
	/// Whether this is the user's primary group.
	#[serde(default)]
	pub is_primary_group: bool,
	/// Per-group user settings.
	#[serde(default)]
	pub settings: GroupSettings,
}
impl GroupInfo {
	/// `true` when the membership is active and the user may send from this group.
	pub fn can_send(&self) -> bool {
		self.status == MembershipStatus::Active
			&& self.settings.user_can_send.as_ref().is_some_and(|setting| setting.value)
	}
}

/// Membership status of a [`GroupInfo`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipStatus {
	/// Active membership.
	Active,
	/// Suspended or removed membership.
	Inactive,
	/// Absent or unrecognized status.
	#[default]
	#[serde(other)]
	Unknown,
}

/// Settings attached to a group membership.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSettings {
	/// Whether the user can send agreements from the group.
	#[serde(default)]
	pub user_can_send: Option<SettingValue<bool>>,
}

/// Setting value plus whether it was inherited from the account.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SettingValue<T> {
	/// Effective value.
	pub value: T,
	/// Whether the value comes from a higher level.
	#[serde(default)]
	pub inherited: bool,
}

impl SignApi {
	/// Lists the current user's groups.
	pub async fn user_groups(&self) -> Result<UserGroups> {
		let request = self.request(Method::GET, "users/me/groups", "user_groups")?;

		self.http.invoke_as(request).await
	}
}
