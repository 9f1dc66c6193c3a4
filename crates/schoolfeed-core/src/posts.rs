//! Post operations and feed listings.
//!
//! Every listing reads the whole post collection and returns it in feed
//! order (see [`crate::ordering`]).

use std::collections::HashSet;

use chrono::Utc;
use schoolfeed_db::{Collection, DocumentStore};
use schoolfeed_types::{Account, AccountId, Category, Post, PostDraft, PostId, Save};
use serde::Serialize;
use tracing::{debug, info};

use crate::dal::{Counter, Dal};
use crate::error::DalError;
use crate::ordering::{filter_category, sort_for_feed};

/// A post as seen by one account: the record plus that account's like and
/// save state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    /// The post.
    #[serde(flatten)]
    pub post: Post,
    /// Whether the viewer has liked the post.
    pub liked: bool,
    /// Whether the viewer has saved the post.
    pub saved: bool,
}

impl<S: DocumentStore> Dal<S> {
    /// Persist a new post and bump its school's post counter in one batch.
    ///
    /// The counter bump is skipped when the school record is missing.
    pub async fn create_post(&self, draft: PostDraft) -> Result<Post, DalError> {
        let post = draft.into_post(PostId::new(), Utc::now());
        let batch = vec![
            Self::put(Collection::Posts, post.id.to_string(), &post)?,
            Counter::posts(post.school_id).adjust(1),
        ];
        self.store().commit(batch).await?;
        info!(
            post_id = %post.id,
            school_id = %post.school_id,
            category = %post.category,
            "Post created"
        );
        Ok(post)
    }

    /// Direct keyed lookup.
    pub async fn find_post_by_id(&self, id: PostId) -> Result<Option<Post>, DalError> {
        self.fetch(Collection::Posts, &id.to_string()).await
    }

    /// Every post, emergency-first then newest-first.
    pub async fn list_all_posts(&self) -> Result<Vec<Post>, DalError> {
        let mut posts: Vec<Post> = self.fetch_all(Collection::Posts).await?;
        sort_for_feed(&mut posts);
        debug!(count = posts.len(), "Listed posts");
        Ok(posts)
    }

    /// Posts owned by `school`, in feed order.
    pub async fn list_posts_by_school(&self, school: AccountId) -> Result<Vec<Post>, DalError> {
        let posts = self.list_all_posts().await?;
        Ok(posts.into_iter().filter(|p| p.school_id == school).collect())
    }

    /// Posts from the schools `account` follows, in feed order.
    ///
    /// Follows are resolved to school accounts first; a followed id with no
    /// account contributes nothing. Empty when no followed school resolves.
    pub async fn list_feed_for_account(&self, account: AccountId) -> Result<Vec<Post>, DalError> {
        let followed = self.list_followed_schools(account).await?;
        let schools: HashSet<AccountId> = followed.iter().map(|school| school.id).collect();
        if schools.is_empty() {
            return Ok(Vec::new());
        }
        let posts = self.list_all_posts().await?;
        Ok(posts
            .into_iter()
            .filter(|p| schools.contains(&p.school_id))
            .collect())
    }

    /// Posts `account` has saved, in feed order.
    pub async fn list_saved_posts(&self, account: AccountId) -> Result<Vec<Post>, DalError> {
        let saves: Vec<Save> = self.relations_of(account).await?;
        let saved: HashSet<PostId> = saves.iter().map(|s| s.post_id).collect();
        if saved.is_empty() {
            return Ok(Vec::new());
        }
        let posts = self.list_all_posts().await?;
        Ok(posts
            .into_iter()
            .filter(|p| saved.contains(&p.id))
            .collect())
    }

    /// The home feed for `viewer`, optionally narrowed to one category.
    ///
    /// Users see posts from the schools they follow. Schools and anonymous
    /// visitors see every post.
    pub async fn home_feed(
        &self,
        viewer: Option<&Account>,
        category: Option<Category>,
    ) -> Result<Vec<Post>, DalError> {
        let posts = match viewer {
            Some(account) if !account.role.is_school() => {
                self.list_feed_for_account(account.id).await?
            }
            _ => self.list_all_posts().await?,
        };
        Ok(filter_category(posts, category))
    }

    /// A post together with `viewer`'s like and save state.
    pub async fn post_view(
        &self,
        viewer: AccountId,
        id: PostId,
    ) -> Result<Option<PostView>, DalError> {
        let Some(post) = self.find_post_by_id(id).await? else {
            return Ok(None);
        };
        let (liked, saved) =
            futures::try_join!(self.has_liked(viewer, id), self.has_saved(viewer, id))?;
        Ok(Some(PostView { post, liked, saved }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::{FailingStore, dal, publish, school_draft, user_draft};

    #[tokio::test]
    async fn create_post_bumps_school_counter() {
        let dal = dal();
        let school = dal
            .create_account(school_draft("Greenwood", "Pune"))
            .await
            .unwrap();

        let post = publish(&dal, &school, "Sports day", Category::Event)
            .await
            .unwrap();
        assert_eq!(post.likes, 0);
        assert_eq!(post.school_name, "Greenwood High School");
        assert_eq!(dal.find_post_by_id(post.id).await.unwrap(), Some(post));

        publish(&dal, &school, "Exam timetable", Category::Exam)
            .await
            .unwrap();
        let school = dal.find_account_by_id(school.id).await.unwrap().unwrap();
        assert_eq!(school.posts_count, 2);
    }

    #[tokio::test]
    async fn post_for_missing_school_skips_counter() {
        let dal = dal();
        let ghost = school_draft("Ghost", "Pune").into_account(AccountId::new(), Utc::now());
        let post = publish(&dal, &ghost, "Hello", Category::Notice)
            .await
            .unwrap();

        assert!(dal.find_post_by_id(post.id).await.unwrap().is_some());
        assert!(dal.find_account_by_id(ghost.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn emergency_post_leads_all_posts() {
        let dal = dal();
        let greenwood = dal
            .create_account(school_draft("Greenwood", "Pune"))
            .await
            .unwrap();
        let lakeside = dal
            .create_account(school_draft("Lakeside", "Nagpur"))
            .await
            .unwrap();

        let closed = publish(&dal, &greenwood, "Closed today", Category::Emergency)
            .await
            .unwrap();
        publish(&dal, &lakeside, "Holiday on Friday", Category::Holiday)
            .await
            .unwrap();
        publish(&dal, &greenwood, "Results out", Category::Exam)
            .await
            .unwrap();

        let all = dal.list_all_posts().await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all.first().map(|p| p.id), Some(closed.id));

        let by_greenwood = dal.list_posts_by_school(greenwood.id).await.unwrap();
        assert_eq!(by_greenwood.len(), 2);
        assert!(by_greenwood.iter().all(|p| p.school_id == greenwood.id));
        assert_eq!(by_greenwood.first().map(|p| p.id), Some(closed.id));
    }

    #[tokio::test]
    async fn feed_is_empty_without_follows() {
        let dal = dal();
        let school = dal
            .create_account(school_draft("Greenwood", "Pune"))
            .await
            .unwrap();
        publish(&dal, &school, "Closed today", Category::Emergency)
            .await
            .unwrap();
        let alice = dal.create_account(user_draft("Alice")).await.unwrap();

        assert!(dal.list_feed_for_account(alice.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn feed_skips_followed_school_without_account() {
        let dal = dal();
        let ghost = school_draft("Ghost", "Pune").into_account(AccountId::new(), Utc::now());
        publish(&dal, &ghost, "Orphaned notice", Category::Notice)
            .await
            .unwrap();
        let alice = dal.create_account(user_draft("Alice")).await.unwrap();
        dal.follow_school(alice.id, ghost.id).await.unwrap();

        assert!(dal.list_followed_schools(alice.id).await.unwrap().is_empty());
        assert!(dal.list_feed_for_account(alice.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn feed_is_followed_subset_of_all_posts() {
        let dal = dal();
        let greenwood = dal
            .create_account(school_draft("Greenwood", "Pune"))
            .await
            .unwrap();
        let lakeside = dal
            .create_account(school_draft("Lakeside", "Nagpur"))
            .await
            .unwrap();
        let alice = dal.create_account(user_draft("Alice")).await.unwrap();

        publish(&dal, &greenwood, "Closed today", Category::Emergency)
            .await
            .unwrap();
        publish(&dal, &lakeside, "Fees due", Category::Notice)
            .await
            .unwrap();
        publish(&dal, &greenwood, "Annual day", Category::Event)
            .await
            .unwrap();
        dal.follow_school(alice.id, greenwood.id).await.unwrap();

        let all = dal.list_all_posts().await.unwrap();
        let expected: Vec<PostId> = all
            .iter()
            .filter(|p| p.school_id == greenwood.id)
            .map(|p| p.id)
            .collect();
        let feed: Vec<PostId> = dal
            .list_feed_for_account(alice.id)
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(feed, expected);
        assert_eq!(feed.len(), 2);
    }

    #[tokio::test]
    async fn greenwood_closure_reaches_alice() {
        let dal = dal();
        let greenwood = dal
            .create_account(school_draft("Greenwood", "Pune"))
            .await
            .unwrap();
        publish(&dal, &greenwood, "Closed today", Category::Emergency)
            .await
            .unwrap();
        let alice = dal.create_account(user_draft("Alice")).await.unwrap();
        dal.follow_school(alice.id, greenwood.id).await.unwrap();

        let other = dal
            .create_account(school_draft("Lakeside", "Nagpur"))
            .await
            .unwrap();
        publish(&dal, &other, "Picnic", Category::Event)
            .await
            .unwrap();

        let feed = dal.list_feed_for_account(alice.id).await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.first().map(|p| p.content.as_str()), Some("Closed today"));

        let all = dal.list_all_posts().await.unwrap();
        assert_eq!(all.first().map(|p| p.content.as_str()), Some("Closed today"));
    }

    #[tokio::test]
    async fn home_feed_depends_on_viewer_role() {
        let dal = dal();
        let greenwood = dal
            .create_account(school_draft("Greenwood", "Pune"))
            .await
            .unwrap();
        let lakeside = dal
            .create_account(school_draft("Lakeside", "Nagpur"))
            .await
            .unwrap();
        let alice = dal.create_account(user_draft("Alice")).await.unwrap();
        publish(&dal, &greenwood, "Maths exam", Category::Exam)
            .await
            .unwrap();
        publish(&dal, &lakeside, "Science exam", Category::Exam)
            .await
            .unwrap();
        publish(&dal, &greenwood, "Diwali break", Category::Holiday)
            .await
            .unwrap();
        dal.follow_school(alice.id, greenwood.id).await.unwrap();

        assert_eq!(dal.home_feed(None, None).await.unwrap().len(), 3);
        assert_eq!(dal.home_feed(Some(&lakeside), None).await.unwrap().len(), 3);
        assert_eq!(dal.home_feed(Some(&alice), None).await.unwrap().len(), 2);

        let exams = dal
            .home_feed(Some(&alice), Some(Category::Exam))
            .await
            .unwrap();
        assert_eq!(exams.len(), 1);
        assert_eq!(exams.first().map(|p| p.content.as_str()), Some("Maths exam"));
    }

    #[tokio::test]
    async fn saved_posts_follow_feed_order() {
        let dal = dal();
        let school = dal
            .create_account(school_draft("Greenwood", "Pune"))
            .await
            .unwrap();
        let alice = dal.create_account(user_draft("Alice")).await.unwrap();
        let notice = publish(&dal, &school, "Uniform notice", Category::Notice)
            .await
            .unwrap();
        publish(&dal, &school, "Unsaved", Category::Notice)
            .await
            .unwrap();
        let alert = publish(&dal, &school, "Flood alert", Category::Emergency)
            .await
            .unwrap();

        assert!(dal.list_saved_posts(alice.id).await.unwrap().is_empty());

        dal.save_post(alice.id, notice.id).await.unwrap();
        dal.save_post(alice.id, alert.id).await.unwrap();
        let saved: Vec<PostId> = dal
            .list_saved_posts(alice.id)
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(saved, vec![alert.id, notice.id]);
    }

    #[tokio::test]
    async fn post_view_reports_viewer_state() {
        let dal = dal();
        let school = dal
            .create_account(school_draft("Greenwood", "Pune"))
            .await
            .unwrap();
        let alice = dal.create_account(user_draft("Alice")).await.unwrap();
        let post = publish(&dal, &school, "PTA meeting", Category::Event)
            .await
            .unwrap();

        dal.like_post(alice.id, post.id).await.unwrap();
        let view = dal.post_view(alice.id, post.id).await.unwrap().unwrap();
        assert!(view.liked);
        assert!(!view.saved);
        assert_eq!(view.post.likes, 1);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json.get("content"), Some(&serde_json::json!("PTA meeting")));
        assert_eq!(json.get("liked"), Some(&serde_json::json!(true)));

        assert!(dal.post_view(alice.id, PostId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let failing = Dal::new(FailingStore);
        let result = failing.list_all_posts().await;
        assert!(matches!(result, Err(DalError::Store { .. })));

        let school = school_draft("Greenwood", "Pune").into_account(AccountId::new(), Utc::now());
        let created = failing
            .create_post(PostDraft::for_school(&school, "x", Category::Notice))
            .await;
        assert!(matches!(created, Err(DalError::Store { .. })));
    }
}
