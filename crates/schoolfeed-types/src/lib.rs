//! Shared type definitions for the school announcement feed.
//!
//! This crate is the single source of truth for the records stored by the
//! data access layer and served by the API. Types flow downstream to
//! `TypeScript` via `ts-rs` for the web client.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for all record identifiers
//! - [`enums`] -- Account roles and post categories
//! - [`structs`] -- Accounts, posts, relationship records, drafts and patches
//! - [`locations`] -- State and city catalogue offered by profile forms

pub mod enums;
pub mod ids;
pub mod locations;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Category, Role};
pub use ids::{AccountId, FollowId, LikeId, PostId, SaveId};
pub use locations::StateCities;
pub use structs::{
    Account, AccountDraft, AccountPatch, AccountProfile, Follow, Like, Post, PostDraft, Save,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs writes the files to the `bindings/` directory relative to
        // the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::AccountId::export_all();
        let _ = crate::ids::PostId::export_all();
        let _ = crate::ids::FollowId::export_all();
        let _ = crate::ids::LikeId::export_all();
        let _ = crate::ids::SaveId::export_all();

        // Enums
        let _ = crate::enums::Role::export_all();
        let _ = crate::enums::Category::export_all();

        // Structs
        let _ = crate::structs::Account::export_all();
        let _ = crate::structs::AccountProfile::export_all();
        let _ = crate::structs::AccountDraft::export_all();
        let _ = crate::structs::AccountPatch::export_all();
        let _ = crate::structs::Post::export_all();
        let _ = crate::structs::PostDraft::export_all();
        let _ = crate::structs::Follow::export_all();
        let _ = crate::structs::Like::export_all();
        let _ = crate::structs::Save::export_all();
        let _ = crate::locations::StateCities::export_all();
    }
}
