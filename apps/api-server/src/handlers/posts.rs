//! Post handlers.

use actix_web::{HttpResponse, web};

use postboard_core::DomainError;
use postboard_core::domain::{PostChanges, PostWithComments};
use postboard_shared::dto::{
    PaginationQuery, PostCreate, PostPartialUpdate, PostPublicResponse, PostResponse,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Ids outside the stored key range can never exist.
fn post_id(raw: i64) -> AppResult<i32> {
    i32::try_from(raw).map_err(|_| AppError::NotFound(format!("Post {raw} not found")))
}

/// Load a post with its comments, or fail with 404.
pub(crate) async fn post_or_404(state: &AppState, id: i32) -> AppResult<PostWithComments> {
    state
        .posts
        .find_with_comments(id)
        .await?
        .ok_or_else(|| {
            DomainError::NotFound {
                entity_type: "Post",
                id,
            }
            .into()
        })
}

/// GET /posts
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<PaginationQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all(query.into_inner().into()).await?;

    let body: Vec<PostResponse> = posts.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let found = post_or_404(&state, post_id(path.into_inner())?).await?;

    Ok(HttpResponse::Ok().json(PostPublicResponse::from(found)))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<PostCreate>,
) -> AppResult<HttpResponse> {
    let post = state.posts.insert(body.into_inner().into()).await?;

    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

/// PATCH /posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<PostPartialUpdate>,
) -> AppResult<HttpResponse> {
    let id = post_id(path.into_inner())?;
    post_or_404(&state, id).await?;

    let changes = PostChanges::from(body.into_inner());
    if !changes.is_empty() {
        state.posts.update(id, changes).await?;
    }

    let found = post_or_404(&state, id).await?;
    Ok(HttpResponse::Ok().json(PostPublicResponse::from(found)))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = post_id(path.into_inner())?;
    post_or_404(&state, id).await?;

    state.posts.delete(id).await?;

    Ok(HttpResponse::NoContent().finish())
}
