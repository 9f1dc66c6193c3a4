//! Entity records, creation drafts and partial updates.
//!
//! Records are flat documents. Optional members are omitted from the
//! serialized form when absent so the store never receives an explicit
//! "no value" marker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Category, Role};
use crate::ids::{AccountId, FollowId, LikeId, PostId, SaveId};

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// A school or user account as persisted in the `users` collection.
///
/// `followers_count` and `posts_count` are denormalized counters maintained
/// by the data access layer, never by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Account {
    /// Account identifier.
    pub id: AccountId,
    /// Display name.
    pub name: String,
    /// Login email. Compared case-sensitively.
    pub email: String,
    /// Login password, stored and compared as plain text.
    pub password: String,
    /// School or user.
    pub role: Role,
    /// Profile photo URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub profile_photo_url: Option<String>,
    /// Free-text city.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub city: Option<String>,
    /// Free-text state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub state: Option<String>,
    /// School name (schools only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub school_name: Option<String>,
    /// Street address (schools only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub address: Option<String>,
    /// Contact phone (schools only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub phone: Option<String>,
    /// Website URL (schools only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub website: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// Number of follow relationships targeting this account.
    #[serde(default)]
    pub followers_count: u64,
    /// Number of posts owned by this account.
    #[serde(default)]
    pub posts_count: u64,
}

impl Account {
    /// The name shown on posts: the school name when set, else the display name.
    pub fn publisher_name(&self) -> &str {
        self.school_name.as_deref().unwrap_or(&self.name)
    }
}

/// The client-facing view of an [`Account`], without the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct AccountProfile {
    /// Account identifier.
    pub id: AccountId,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// School or user.
    pub role: Role,
    /// Profile photo URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub profile_photo_url: Option<String>,
    /// Free-text city.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub city: Option<String>,
    /// Free-text state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub state: Option<String>,
    /// School name (schools only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub school_name: Option<String>,
    /// Street address (schools only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub address: Option<String>,
    /// Contact phone (schools only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub phone: Option<String>,
    /// Website URL (schools only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub website: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// Follower count.
    pub followers_count: u64,
    /// Post count.
    pub posts_count: u64,
}

impl From<&Account> for AccountProfile {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            role: account.role,
            profile_photo_url: account.profile_photo_url.clone(),
            city: account.city.clone(),
            state: account.state.clone(),
            school_name: account.school_name.clone(),
            address: account.address.clone(),
            phone: account.phone.clone(),
            website: account.website.clone(),
            created_at: account.created_at,
            followers_count: account.followers_count,
            posts_count: account.posts_count,
        }
    }
}

/// Everything needed to create an [`Account`] except the generated fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct AccountDraft {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Login password.
    pub password: String,
    /// School or user.
    #[serde(default)]
    pub role: Role,
    /// Profile photo URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub profile_photo_url: Option<String>,
    /// Free-text city.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub city: Option<String>,
    /// Free-text state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub state: Option<String>,
    /// School name (schools only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub school_name: Option<String>,
    /// Street address (schools only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub address: Option<String>,
    /// Contact phone (schools only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub phone: Option<String>,
    /// Website URL (schools only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub website: Option<String>,
}

impl AccountDraft {
    /// Stamp the draft with an identifier and creation time, zeroing counters.
    pub fn into_account(self, id: AccountId, created_at: DateTime<Utc>) -> Account {
        Account {
            id,
            name: self.name,
            email: self.email,
            password: self.password,
            role: self.role,
            profile_photo_url: self.profile_photo_url,
            city: self.city,
            state: self.state,
            school_name: self.school_name,
            address: self.address,
            phone: self.phone,
            website: self.website,
            created_at,
            followers_count: 0,
            posts_count: 0,
        }
    }
}

/// A partial update to an account's profile fields.
///
/// Only the fields that are `Some` are merged into the stored record. A field
/// cannot be cleared through a patch. Counters are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct AccountPatch {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub name: Option<String>,
    /// New profile photo URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub profile_photo_url: Option<String>,
    /// New city.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub city: Option<String>,
    /// New state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub state: Option<String>,
    /// New school name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub school_name: Option<String>,
    /// New street address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub address: Option<String>,
    /// New contact phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub phone: Option<String>,
    /// New website URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub website: Option<String>,
}

impl AccountPatch {
    /// Whether the patch carries no fields at all.
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.profile_photo_url.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.school_name.is_none()
            && self.address.is_none()
            && self.phone.is_none()
            && self.website.is_none()
    }
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

/// A school announcement as persisted in the `posts` collection.
///
/// The school name and photo are a snapshot taken at creation time and are
/// not updated when the school edits its profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Post {
    /// Post identifier.
    pub id: PostId,
    /// The owning school.
    pub school_id: AccountId,
    /// School name at creation time.
    pub school_name: String,
    /// School photo at creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub school_photo_url: Option<String>,
    /// Body text.
    pub content: String,
    /// Announcement category.
    pub category: Category,
    /// Attached image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image_url: Option<String>,
    /// Attached link URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub link_url: Option<String>,
    /// Title shown for the attached link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub link_title: Option<String>,
    /// When the post was created.
    pub created_at: DateTime<Utc>,
    /// Number of like relationships targeting this post.
    #[serde(default)]
    pub likes: u64,
}

/// Everything needed to create a [`Post`] except the generated fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PostDraft {
    /// The owning school.
    pub school_id: AccountId,
    /// School name snapshot.
    pub school_name: String,
    /// School photo snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub school_photo_url: Option<String>,
    /// Body text.
    pub content: String,
    /// Announcement category.
    pub category: Category,
    /// Attached image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image_url: Option<String>,
    /// Attached link URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub link_url: Option<String>,
    /// Title shown for the attached link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub link_title: Option<String>,
}

impl PostDraft {
    /// Start a draft for `school` with its current name and photo as the snapshot.
    pub fn for_school(school: &Account, content: impl Into<String>, category: Category) -> Self {
        Self {
            school_id: school.id,
            school_name: school.publisher_name().to_owned(),
            school_photo_url: school.profile_photo_url.clone(),
            content: content.into(),
            category,
            image_url: None,
            link_url: None,
            link_title: None,
        }
    }

    /// Stamp the draft with an identifier and creation time, zeroing likes.
    pub fn into_post(self, id: PostId, created_at: DateTime<Utc>) -> Post {
        Post {
            id,
            school_id: self.school_id,
            school_name: self.school_name,
            school_photo_url: self.school_photo_url,
            content: self.content,
            category: self.category,
            image_url: self.image_url,
            link_url: self.link_url,
            link_title: self.link_title,
            created_at,
            likes: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Relationships
// ---------------------------------------------------------------------------

/// An account following a school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Follow {
    /// Relationship identifier.
    pub id: FollowId,
    /// The follower.
    pub account_id: AccountId,
    /// The followed school.
    pub school_id: AccountId,
    /// When the follow was created.
    pub created_at: DateTime<Utc>,
}

/// An account liking a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Like {
    /// Relationship identifier.
    pub id: LikeId,
    /// The account that liked the post.
    pub account_id: AccountId,
    /// The liked post.
    pub post_id: PostId,
    /// When the like was created.
    pub created_at: DateTime<Utc>,
}

/// An account saving (bookmarking) a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Save {
    /// Relationship identifier.
    pub id: SaveId,
    /// The account that saved the post.
    pub account_id: AccountId,
    /// The saved post.
    pub post_id: PostId,
    /// When the save was created.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn school_draft() -> AccountDraft {
        AccountDraft {
            name: String::from("Principal Rao"),
            email: String::from("office@greenwood.edu"),
            password: String::from("pw"),
            role: Role::School,
            school_name: Some(String::from("Greenwood High")),
            city: Some(String::from("Pune")),
            ..AccountDraft::default()
        }
    }

    #[test]
    fn absent_optionals_are_omitted_from_json() {
        let account = school_draft().into_account(AccountId::new(), Utc::now());
        let json = serde_json::to_value(&account).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("schoolName"));
        assert!(!obj.contains_key("website"));
        assert!(!obj.contains_key("profilePhotoUrl"));
        assert_eq!(obj.get("followersCount"), Some(&serde_json::json!(0)));
    }

    #[test]
    fn missing_counters_default_to_zero() {
        let account = school_draft().into_account(AccountId::new(), Utc::now());
        let mut json = serde_json::to_value(&account).unwrap();
        let obj = json.as_object_mut().unwrap();
        obj.remove("followersCount");
        obj.remove("postsCount");
        let restored: Account = serde_json::from_value(json).unwrap();
        assert_eq!(restored.followers_count, 0);
        assert_eq!(restored.posts_count, 0);
    }

    #[test]
    fn profile_hides_password() {
        let account = school_draft().into_account(AccountId::new(), Utc::now());
        let profile = AccountProfile::from(&account);
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(profile.email, account.email);
    }

    #[test]
    fn post_draft_snapshots_school_name() {
        let school = school_draft().into_account(AccountId::new(), Utc::now());
        let draft = PostDraft::for_school(&school, "Closed today", Category::Emergency);
        assert_eq!(draft.school_name, "Greenwood High");
        assert_eq!(draft.school_id, school.id);

        let post = draft.into_post(PostId::new(), Utc::now());
        assert_eq!(post.likes, 0);
    }

    #[test]
    fn empty_patch_serializes_to_empty_object() {
        let patch = AccountPatch::default();
        assert!(patch.is_empty());
        assert_eq!(serde_json::to_value(&patch).unwrap(), serde_json::json!({}));

        let patch = AccountPatch {
            city: Some(String::from("Nagpur")),
            ..AccountPatch::default()
        };
        assert!(!patch.is_empty());
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({ "city": "Nagpur" })
        );
    }
}
