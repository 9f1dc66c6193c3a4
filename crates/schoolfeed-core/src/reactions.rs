//! Likes and saves on posts.
//!
//! A like moves the post's `likes` counter with it. Saves carry no counter.

use chrono::Utc;
use schoolfeed_db::DocumentStore;
use schoolfeed_types::{AccountId, Like, LikeId, PostId, Save, SaveId};
use tracing::{debug, info};

use crate::dal::{Counter, Dal};
use crate::error::DalError;

impl<S: DocumentStore> Dal<S> {
    /// Record a like and bump the post's like counter in the same batch.
    ///
    /// Duplicate likes are not rejected.
    pub async fn like_post(&self, account: AccountId, post: PostId) -> Result<(), DalError> {
        let like = Like {
            id: LikeId::new(),
            account_id: account,
            post_id: post,
            created_at: Utc::now(),
        };
        self.add_relation(&like, Some(Counter::likes(post))).await?;
        info!(account_id = %account, post_id = %post, "Post liked");
        Ok(())
    }

    /// Remove the first like from `account` on `post` and drop the counter,
    /// floored at zero. A no-op when there is none.
    pub async fn unlike_post(&self, account: AccountId, post: PostId) -> Result<(), DalError> {
        let removed = self
            .remove_relation::<Like>(account, post, Some(Counter::likes(post)))
            .await?;
        if removed {
            info!(account_id = %account, post_id = %post, "Post unliked");
        } else {
            debug!(account_id = %account, post_id = %post, "Unlike skipped: not liked");
        }
        Ok(())
    }

    /// Whether `account` has liked `post`.
    pub async fn has_liked(&self, account: AccountId, post: PostId) -> Result<bool, DalError> {
        Ok(self.find_relation::<Like>(account, post).await?.is_some())
    }

    /// Bookmark `post` for `account`.
    pub async fn save_post(&self, account: AccountId, post: PostId) -> Result<(), DalError> {
        let save = Save {
            id: SaveId::new(),
            account_id: account,
            post_id: post,
            created_at: Utc::now(),
        };
        self.add_relation(&save, None).await?;
        info!(account_id = %account, post_id = %post, "Post saved");
        Ok(())
    }

    /// Remove the first save of `post` by `account`. A no-op when there is
    /// none.
    pub async fn unsave_post(&self, account: AccountId, post: PostId) -> Result<(), DalError> {
        if self.remove_relation::<Save>(account, post, None).await? {
            info!(account_id = %account, post_id = %post, "Post unsaved");
        }
        Ok(())
    }

    /// Whether `account` has saved `post`.
    pub async fn has_saved(&self, account: AccountId, post: PostId) -> Result<bool, DalError> {
        Ok(self.find_relation::<Save>(account, post).await?.is_some())
    }
}
