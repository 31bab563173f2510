//! Post, comment and like handlers.
//!
//! The unauthenticated reads return the bare domain shape. Everything that
//! knows its viewer returns the extended shape, annotated relative to them.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use ripple_core::projection::project;
use ripple_shared::ApiResponse;
use ripple_shared::dto::{
    CommentResponse, CreateCommentRequest, CreatePostRequest, ExtendedPostResponse, PostResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/posts - public, no viewer-relative fields.
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_posts().await?;
    let posts: Vec<PostResponse> = posts.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/posts/extended - annotated for the authenticated viewer.
pub async fn list_posts_extended(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list_posts_extended(identity.user_id).await?;
    let posts: Vec<ExtendedPostResponse> = posts.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// GET /api/posts/{post_id} - public, no viewer-relative fields.
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_post_by_id(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostResponse::from(post))))
}

/// GET /api/posts/{post_id}/extended - annotated for the authenticated viewer.
pub async fn get_post_extended(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .get_post_extended(path.into_inner(), identity.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ExtendedPostResponse::from(post))))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.body.trim().is_empty() {
        return Err(AppError::BadRequest("Post body must not be empty".to_string()));
    }

    let post = state.posts.create_post(identity.owner(), req.body).await?;
    let projected = project(post, identity.user_id);

    Ok(HttpResponse::Created().json(ApiResponse::ok(ExtendedPostResponse::from(projected))))
}

/// DELETE /api/posts/{post_id} - owner only.
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .posts
        .delete_post(path.into_inner(), identity.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Post deleted")))
}

/// POST /api/posts/{post_id}/comments
pub async fn create_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.body.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Comment body must not be empty".to_string(),
        ));
    }

    let post = state
        .posts
        .create_post_comment(path.into_inner(), req.body, identity.owner())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(ExtendedPostResponse::from(post))))
}

/// GET /api/posts/{post_id}/comments/{comment_id}
pub async fn get_comment(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();

    let comment = state
        .posts
        .get_post_comment(post_id, comment_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Comment {} not found in post {}", comment_id, post_id))
        })?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(CommentResponse::from(comment))))
}

/// DELETE /api/posts/{post_id}/comments/{comment_id} - comment owner only.
pub async fn delete_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(Uuid, Uuid)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();

    let post = state
        .posts
        .delete_post_comment(post_id, comment_id, identity.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ExtendedPostResponse::from(post))))
}

/// POST /api/posts/{post_id}/likes
///
/// `like_post` appends unconditionally, so the one-like-per-user rule is
/// enforced here: look the like up first and refuse a duplicate.
pub async fn like_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let existing = state
        .posts
        .get_post_like_by_owner(post_id, identity.user_id)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("Post already liked".to_string()));
    }

    let post = state.posts.like_post(post_id, identity.owner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ExtendedPostResponse::from(post))))
}

/// DELETE /api/posts/{post_id}/likes
pub async fn dislike_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .posts
        .dislike_post(path.into_inner(), identity.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Like removed")))
}
