//! REST API endpoint handlers for the feed.
//!
//! Every handler goes through the [`Dal`](schoolfeed_core::Dal) on the
//! shared [`AppState`]. Accounts leave the server as
//! [`AccountProfile`]s, never with their password.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/health` | Liveness and active store backend |
//! | `POST` | `/api/auth/signup` | Create an account and sign in |
//! | `POST` | `/api/auth/login` | Sign in |
//! | `POST` | `/api/auth/logout` | Sign out |
//! | `GET` | `/api/me` | Current account |
//! | `PATCH` | `/api/me` | Edit profile fields |
//! | `GET` | `/api/schools` | List, filter by city or search schools |
//! | `GET` | `/api/schools/{id}` | Single school |
//! | `GET` | `/api/schools/{id}/posts` | A school's posts |
//! | `GET` `POST` `DELETE` | `/api/schools/{id}/follow` | Follow state, follow, unfollow |
//! | `GET` | `/api/following` | Schools the caller follows |
//! | `GET` | `/api/posts` | Every post |
//! | `POST` | `/api/posts` | Publish a post (schools only) |
//! | `GET` | `/api/posts/{id}` | Single post with the caller's like/save state |
//! | `POST` `DELETE` | `/api/posts/{id}/like` | Like, unlike |
//! | `POST` `DELETE` | `/api/posts/{id}/save` | Save, unsave |
//! | `GET` | `/api/feed` | Home feed |
//! | `GET` | `/api/saved` | The caller's saved posts |
//! | `GET` | `/api/locations` | State and city catalogue |
//! | `GET` | `/api/locations/{state}` | Cities of one state |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use schoolfeed_core::{PostView, Session};
use schoolfeed_types::{
    Account, AccountDraft, AccountId, AccountPatch, AccountProfile, Category, Post, PostDraft,
    PostId, locations,
};
use uuid::Uuid;

use crate::auth::{CurrentSession, MaybeSession};
use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/auth/login`.
#[derive(Debug, serde::Deserialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Login password.
    pub password: String,
}

/// Request body for `POST /api/posts`.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    /// Body text.
    pub content: String,
    /// Announcement category.
    pub category: Category,
    /// Attached image URL.
    pub image_url: Option<String>,
    /// Attached link URL.
    pub link_url: Option<String>,
    /// Title shown for the attached link.
    pub link_title: Option<String>,
}

/// Query parameters for `GET /api/schools`.
#[derive(Debug, serde::Deserialize)]
pub struct SchoolsQuery {
    /// Free-text search over name, school name and city. Wins over `city`.
    pub q: Option<String>,
    /// Case-insensitive city substring.
    pub city: Option<String>,
}

/// Query parameters for post listings.
#[derive(Debug, serde::Deserialize)]
pub struct PostsQuery {
    /// Keep only posts in this category.
    pub category: Option<Category>,
}

/// Response body for signup and login.
#[derive(Debug, serde::Serialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests.
    pub token: Uuid,
    /// The signed-in account.
    pub account: AccountProfile,
}

impl From<&Session> for AuthResponse {
    fn from(session: &Session) -> Self {
        Self {
            token: session.token,
            account: AccountProfile::from(&session.account),
        }
    }
}

fn profiles(accounts: &[Account]) -> serde_json::Value {
    let schools: Vec<AccountProfile> = accounts.iter().map(AccountProfile::from).collect();
    serde_json::json!({
        "count": schools.len(),
        "schools": schools,
    })
}

fn post_list(posts: &[Post]) -> serde_json::Value {
    serde_json::json!({
        "count": posts.len(),
        "posts": posts,
    })
}

fn parse_uuid(s: &str) -> Result<Uuid, ApiError> {
    s.parse::<Uuid>()
        .map_err(|e| ApiError::InvalidUuid(format!("{s}: {e}")))
}

/// Resolve `id` to a school account, or 404.
async fn school_by_id(state: &AppState, id: AccountId) -> Result<Account, ApiError> {
    state
        .dal
        .find_account_by_id(id)
        .await?
        .filter(|account| account.role.is_school())
        .ok_or_else(|| ApiError::NotFound(format!("school {id}")))
}

/// Resolve `id` to a post, or 404.
async fn post_by_id(state: &AppState, id: PostId) -> Result<Post, ApiError> {
    state
        .dal
        .find_post_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("post {id}")))
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Liveness probe.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "store": state.backend_name(),
    }))
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Create an account and open a session for it.
///
/// Fails with 409 when the email is already registered.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<AccountDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let account = state.dal.register(draft).await?;
    let session = state.sessions.open(account).await;
    Ok((StatusCode::CREATED, Json(AuthResponse::from(&session))))
}

/// Check credentials and open a session.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let account = state
        .dal
        .authenticate(&request.email, &request.password)
        .await?;
    let session = state.sessions.open(account).await;
    Ok(Json(AuthResponse::from(&session)))
}

/// Close the caller's session.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
) -> impl IntoResponse {
    state.sessions.close(session.token).await;
    StatusCode::NO_CONTENT
}

// ---------------------------------------------------------------------------
// /api/me
// ---------------------------------------------------------------------------

/// The signed-in account as of sign-in or its last profile edit.
pub async fn get_me(CurrentSession(session): CurrentSession) -> impl IntoResponse {
    Json(AccountProfile::from(&session.account))
}

/// Merge profile fields into the signed-in account and refresh the session.
pub async fn update_me(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Json(patch): Json<AccountPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let id = session.account_id();
    state.dal.update_account_fields(id, &patch).await?;
    let account = state
        .dal
        .find_account_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("account {id}")))?;
    let profile = AccountProfile::from(&account);
    state.sessions.refresh(session.token, account).await;
    Ok(Json(profile))
}

// ---------------------------------------------------------------------------
// Schools
// ---------------------------------------------------------------------------

/// List schools, optionally searched (`q`) or filtered by city (`city`).
pub async fn list_schools(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SchoolsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let schools = match (params.q.as_deref(), params.city.as_deref()) {
        (Some(query), _) => state.dal.search_schools(query).await?,
        (None, Some(city)) => state.dal.list_schools_by_city_contains(city).await?,
        (None, None) => state.dal.list_school_accounts().await?,
    };
    Ok(Json(profiles(&schools)))
}

/// A single school.
pub async fn get_school(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = AccountId::from(parse_uuid(&id_str)?);
    let school = school_by_id(&state, id).await?;
    Ok(Json(AccountProfile::from(&school)))
}

/// A school's posts in feed order.
pub async fn list_school_posts(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
    Query(params): Query<PostsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let id = AccountId::from(parse_uuid(&id_str)?);
    let school = school_by_id(&state, id).await?;
    let posts = state.dal.list_posts_by_school(school.id).await?;
    let posts = schoolfeed_core::ordering::filter_category(posts, params.category);
    Ok(Json(post_list(&posts)))
}

async fn follow_state(
    state: &AppState,
    account: AccountId,
    school: AccountId,
) -> Result<serde_json::Value, ApiError> {
    let following = state.dal.is_following(account, school).await?;
    let followers_count = state
        .dal
        .find_account_by_id(school)
        .await?
        .map_or(0, |s| s.followers_count);
    Ok(serde_json::json!({
        "following": following,
        "followersCount": followers_count,
    }))
}

/// Whether the caller follows the school.
pub async fn get_follow(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = AccountId::from(parse_uuid(&id_str)?);
    let school = school_by_id(&state, id).await?;
    Ok(Json(follow_state(&state, session.account_id(), school.id).await?))
}

/// Follow the school. Already following is not an error and adds nothing.
pub async fn follow(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = AccountId::from(parse_uuid(&id_str)?);
    let school = school_by_id(&state, id).await?;
    let account = session.account_id();
    if !state.dal.is_following(account, school.id).await? {
        state.dal.follow_school(account, school.id).await?;
    }
    Ok(Json(follow_state(&state, account, school.id).await?))
}

/// Unfollow the school. Not following is not an error.
pub async fn unfollow(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = AccountId::from(parse_uuid(&id_str)?);
    let account = session.account_id();
    state.dal.unfollow_school(account, id).await?;
    Ok(Json(follow_state(&state, account, id).await?))
}

/// Schools the caller follows.
pub async fn list_following(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
) -> Result<impl IntoResponse, ApiError> {
    let schools = state.dal.list_followed_schools(session.account_id()).await?;
    Ok(Json(profiles(&schools)))
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

/// Every post in feed order.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PostsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let posts = state.dal.list_all_posts().await?;
    let posts = schoolfeed_core::ordering::filter_category(posts, params.category);
    Ok(Json(post_list(&posts)))
}

/// Publish a post as the signed-in school.
///
/// The school name and photo are taken from the session snapshot.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Json(request): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !session.account.role.is_school() {
        return Err(ApiError::Forbidden(String::from("only schools can publish posts")));
    }
    let draft = PostDraft {
        image_url: request.image_url,
        link_url: request.link_url,
        link_title: request.link_title,
        ..PostDraft::for_school(&session.account, request.content, request.category)
    };
    let post = state.dal.create_post(draft).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// A single post with the caller's like and save state.
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    MaybeSession(session): MaybeSession,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = PostId::from(parse_uuid(&id_str)?);
    let view = match session {
        Some(session) => state.dal.post_view(session.account_id(), id).await?,
        None => state.dal.find_post_by_id(id).await?.map(|post| PostView {
            post,
            liked: false,
            saved: false,
        }),
    };
    view.map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("post {id}")))
}

async fn view_for(state: &AppState, account: AccountId, id: PostId) -> Result<PostView, ApiError> {
    state
        .dal
        .post_view(account, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("post {id}")))
}

/// Like the post. Already liked is not an error and adds nothing.
pub async fn like(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = PostId::from(parse_uuid(&id_str)?);
    post_by_id(&state, id).await?;
    let account = session.account_id();
    if !state.dal.has_liked(account, id).await? {
        state.dal.like_post(account, id).await?;
    }
    Ok(Json(view_for(&state, account, id).await?))
}

/// Remove the caller's like.
pub async fn unlike(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = PostId::from(parse_uuid(&id_str)?);
    let account = session.account_id();
    state.dal.unlike_post(account, id).await?;
    Ok(Json(view_for(&state, account, id).await?))
}

/// Save the post. Already saved is not an error and adds nothing.
pub async fn save(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = PostId::from(parse_uuid(&id_str)?);
    post_by_id(&state, id).await?;
    let account = session.account_id();
    if !state.dal.has_saved(account, id).await? {
        state.dal.save_post(account, id).await?;
    }
    Ok(Json(view_for(&state, account, id).await?))
}

/// Remove the post from the caller's saved list.
pub async fn unsave(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = PostId::from(parse_uuid(&id_str)?);
    let account = session.account_id();
    state.dal.unsave_post(account, id).await?;
    Ok(Json(view_for(&state, account, id).await?))
}

/// The home feed: followed schools for users, everything for schools and
/// anonymous visitors.
pub async fn feed(
    State(state): State<Arc<AppState>>,
    MaybeSession(session): MaybeSession,
    Query(params): Query<PostsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let viewer = session.as_ref().map(|s| &s.account);
    let posts = state.dal.home_feed(viewer, params.category).await?;
    Ok(Json(post_list(&posts)))
}

/// The caller's saved posts in feed order.
pub async fn list_saved(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
) -> Result<impl IntoResponse, ApiError> {
    let posts = state.dal.list_saved_posts(session.account_id()).await?;
    Ok(Json(post_list(&posts)))
}

// ---------------------------------------------------------------------------
// GET /api/locations
// ---------------------------------------------------------------------------

/// The state and city catalogue offered by profile forms.
pub async fn list_locations() -> impl IntoResponse {
    let states = locations::catalogue();
    Json(serde_json::json!({
        "count": states.len(),
        "states": states,
    }))
}

/// Cities of one state, matched case-insensitively.
pub async fn list_cities(Path(state): Path<String>) -> Result<impl IntoResponse, ApiError> {
    let cities = locations::cities_in(&state)
        .ok_or_else(|| ApiError::NotFound(format!("state {state}")))?;
    Ok(Json(serde_json::json!({
        "state": state,
        "count": cities.len(),
        "cities": cities,
    })))
}
