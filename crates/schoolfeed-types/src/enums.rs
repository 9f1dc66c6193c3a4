//! Enumeration types for accounts and posts.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The kind of account.
///
/// Schools publish posts and collect followers. Users (parents and
/// students) follow schools and like or save their posts.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Role {
    /// A publishing school.
    School,
    /// A parent or student subscriber.
    #[default]
    User,
}

impl Role {
    /// Whether this role may publish posts.
    pub const fn is_school(self) -> bool {
        matches!(self, Self::School)
    }
}

/// The category of a school announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Category {
    /// General notice.
    Notice,
    /// Exam schedules and results.
    Exam,
    /// School events.
    Event,
    /// Holiday announcements.
    Holiday,
    /// Emergency announcements. These always lead a feed.
    Emergency,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 5] = [
        Self::Notice,
        Self::Exam,
        Self::Event,
        Self::Holiday,
        Self::Emergency,
    ];

    /// Whether posts of this category jump ahead of all others in a feed.
    pub const fn is_emergency(self) -> bool {
        matches!(self, Self::Emergency)
    }

    /// The lowercase wire name of the category.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Notice => "notice",
            Self::Exam => "exam",
            Self::Event => "event",
            Self::Holiday => "holiday",
            Self::Emergency => "emergency",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_lowercase() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).ok();
            assert_eq!(json, Some(format!("\"{}\"", category.as_str())));
        }
        assert_eq!(
            serde_json::to_string(&Role::School).ok().as_deref(),
            Some("\"school\"")
        );
    }

    #[test]
    fn only_emergency_is_emergency() {
        let emergencies: Vec<_> = Category::ALL
            .into_iter()
            .filter(|c| c.is_emergency())
            .collect();
        assert_eq!(emergencies, vec![Category::Emergency]);
    }

    #[test]
    fn default_role_is_user() {
        assert_eq!(Role::default(), Role::User);
        assert!(!Role::User.is_school());
        assert!(Role::School.is_school());
    }
}
