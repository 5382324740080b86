//! Comment handlers.

use actix_web::{HttpResponse, web};

use postboard_core::DomainError;
use postboard_shared::dto::{CommentCreate, CommentResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /comments
pub async fn create_comment(
    state: web::Data<AppState>,
    body: web::Json<CommentCreate>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if !state.posts.exists_by_id(req.post_id).await? {
        return Err(DomainError::MissingReference {
            entity_type: "Post",
            id: req.post_id,
        }
        .into());
    }

    let comment = state.comments.insert(req.into()).await?;

    Ok(HttpResponse::Created().json(CommentResponse::from(comment)))
}
