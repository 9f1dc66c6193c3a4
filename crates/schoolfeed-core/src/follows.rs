//! Follow relationships between accounts and schools.

use chrono::Utc;
use futures::future::try_join_all;
use schoolfeed_db::DocumentStore;
use schoolfeed_types::{Account, AccountId, Follow, FollowId};
use tracing::{debug, info};

use crate::dal::{Counter, Dal};
use crate::error::DalError;

impl<S: DocumentStore> Dal<S> {
    /// Record that `account` follows `school` and bump the school's follower
    /// counter in the same batch.
    ///
    /// Does not check for an existing follow, so calling this twice leaves
    /// two records and a counter of two.
    pub async fn follow_school(&self, account: AccountId, school: AccountId) -> Result<(), DalError> {
        let follow = Follow {
            id: FollowId::new(),
            account_id: account,
            school_id: school,
            created_at: Utc::now(),
        };
        self.add_relation(&follow, Some(Counter::followers(school)))
            .await?;
        info!(account_id = %account, school_id = %school, "School followed");
        Ok(())
    }

    /// Remove the first follow from `account` to `school` and drop the
    /// follower counter, floored at zero. A no-op when there is none.
    pub async fn unfollow_school(
        &self,
        account: AccountId,
        school: AccountId,
    ) -> Result<(), DalError> {
        let removed = self
            .remove_relation::<Follow>(account, school, Some(Counter::followers(school)))
            .await?;
        if removed {
            info!(account_id = %account, school_id = %school, "School unfollowed");
        } else {
            debug!(account_id = %account, school_id = %school, "Unfollow skipped: not following");
        }
        Ok(())
    }

    /// Whether `account` follows `school`.
    pub async fn is_following(&self, account: AccountId, school: AccountId) -> Result<bool, DalError> {
        Ok(self.find_relation::<Follow>(account, school).await?.is_some())
    }

    /// The schools `account` follows, in follow order.
    ///
    /// Schools that no longer resolve are left out.
    pub async fn list_followed_schools(&self, account: AccountId) -> Result<Vec<Account>, DalError> {
        let follows: Vec<Follow> = self.relations_of(account).await?;
        let lookups = follows
            .iter()
            .map(|follow| self.find_account_by_id(follow.school_id));
        let resolved = try_join_all(lookups).await?;
        Ok(resolved.into_iter().flatten().collect())
    }

    /// Number of follow records targeting `school`, counted from the records
    /// rather than the stored counter.
    pub async fn count_followers(&self, school: AccountId) -> Result<usize, DalError> {
        Ok(self.relations_to::<Follow>(school).await?.len())
    }
}
