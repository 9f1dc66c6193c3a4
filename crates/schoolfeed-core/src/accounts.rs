//! Account operations: signup, lookup, authentication, profile edits and
//! school discovery.

use chrono::Utc;
use schoolfeed_db::{Collection, DocumentStore, to_document};
use schoolfeed_types::{Account, AccountDraft, AccountId, AccountPatch, Follow, Post, Role};
use tracing::{debug, info, warn};

use crate::dal::{Dal, FOLLOWERS_COUNT, POSTS_COUNT};
use crate::error::DalError;

impl<S: DocumentStore> Dal<S> {
    /// Persist a new account built from `draft`.
    ///
    /// Generates the identifier, stamps the creation time and zeroes both
    /// counters. Does not check email uniqueness; see [`Dal::register`].
    pub async fn create_account(&self, draft: AccountDraft) -> Result<Account, DalError> {
        let account = draft.into_account(AccountId::new(), Utc::now());
        self.insert(Collection::Users, account.id.to_string(), &account)
            .await?;
        info!(account_id = %account.id, role = ?account.role, "Account created");
        Ok(account)
    }

    /// Signup: create an account unless the email is already registered.
    ///
    /// The check and the insert are separate store calls, so two racing
    /// signups with one email can both succeed.
    pub async fn register(&self, draft: AccountDraft) -> Result<Account, DalError> {
        if self.find_account_by_email(&draft.email).await?.is_some() {
            return Err(DalError::EmailTaken(draft.email));
        }
        self.create_account(draft).await
    }

    /// The first account, in creation order, whose email equals `email`
    /// exactly (case-sensitive).
    pub async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, DalError> {
        let accounts: Vec<Account> = self.fetch_all(Collection::Users).await?;
        Ok(accounts.into_iter().find(|a| a.email == email))
    }

    /// Direct keyed lookup.
    pub async fn find_account_by_id(&self, id: AccountId) -> Result<Option<Account>, DalError> {
        self.fetch(Collection::Users, &id.to_string()).await
    }

    /// Check an email/password pair.
    ///
    /// Passwords are compared as plain text. An unknown email and a wrong
    /// password both yield [`DalError::InvalidCredentials`].
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Account, DalError> {
        match self.find_account_by_email(email).await? {
            Some(account) if account.password == password => {
                debug!(account_id = %account.id, "Authenticated");
                Ok(account)
            }
            _ => {
                debug!("Authentication rejected");
                Err(DalError::InvalidCredentials)
            }
        }
    }

    /// Merge the fields present in `patch` into the stored account.
    ///
    /// Values are not validated. A missing account is skipped with a warning
    /// rather than reported.
    pub async fn update_account_fields(
        &self,
        id: AccountId,
        patch: &AccountPatch,
    ) -> Result<(), DalError> {
        if patch.is_empty() {
            return Ok(());
        }
        let fields = to_document(patch)?;
        let field_count = fields.len();
        let merged = self
            .store()
            .merge(Collection::Users, &id.to_string(), fields)
            .await?;
        if merged {
            info!(account_id = %id, field_count, "Account updated");
        } else {
            warn!(account_id = %id, "Account update skipped: no such account");
        }
        Ok(())
    }

    /// Every school account, in creation order.
    pub async fn list_school_accounts(&self) -> Result<Vec<Account>, DalError> {
        let accounts: Vec<Account> = self.fetch_all(Collection::Users).await?;
        Ok(accounts
            .into_iter()
            .filter(|a| a.role == Role::School)
            .collect())
    }

    /// Schools whose city contains `substring`, ignoring case.
    ///
    /// Schools without a city never match.
    pub async fn list_schools_by_city_contains(
        &self,
        substring: &str,
    ) -> Result<Vec<Account>, DalError> {
        let needle = substring.to_lowercase();
        let schools = self.list_school_accounts().await?;
        Ok(schools
            .into_iter()
            .filter(|s| contains_ignore_case(s.city.as_deref(), &needle))
            .collect())
    }

    /// Schools whose display name, school name or city contains `query`,
    /// ignoring case.
    pub async fn search_schools(&self, query: &str) -> Result<Vec<Account>, DalError> {
        let needle = query.to_lowercase();
        let schools = self.list_school_accounts().await?;
        Ok(schools
            .into_iter()
            .filter(|s| {
                contains_ignore_case(Some(&s.name), &needle)
                    || contains_ignore_case(s.city.as_deref(), &needle)
                    || contains_ignore_case(s.school_name.as_deref(), &needle)
            })
            .collect())
    }

    /// Recompute a school's follower and post counters from the records they
    /// summarize and store the result.
    ///
    /// Returns the refreshed account, or `None` if it does not exist.
    pub async fn reconcile_school_counters(
        &self,
        school: AccountId,
    ) -> Result<Option<Account>, DalError> {
        if self.find_account_by_id(school).await?.is_none() {
            return Ok(None);
        }

        let followers = u64::try_from(self.relations_to::<Follow>(school).await?.len())
            .unwrap_or(u64::MAX);
        let posts: Vec<Post> = self.fetch_all(Collection::Posts).await?;
        let owned = u64::try_from(posts.iter().filter(|p| p.school_id == school).count())
            .unwrap_or(u64::MAX);

        let mut fields = schoolfeed_db::Document::new();
        fields.insert(FOLLOWERS_COUNT.to_owned(), followers.into());
        fields.insert(POSTS_COUNT.to_owned(), owned.into());
        self.store()
            .merge(Collection::Users, &school.to_string(), fields)
            .await?;
        info!(school_id = %school, followers, posts = owned, "Counters reconciled");

        self.find_account_by_id(school).await
    }
}

fn contains_ignore_case(haystack: Option<&str>, lowercase_needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(lowercase_needle))
}
