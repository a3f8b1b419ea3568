//! Post resource handlers.
//!
//! Each handler parses the request, runs the matching `PostService`
//! operation and renders the result through the projection context and
//! success status the descriptor declares for that operation.

use std::collections::HashMap;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, HttpResponseBuilder, web};
use postdesk_core::domain::PostId;
use postdesk_core::domain::projection::{PostWrite, ProjectionContext, project};
use postdesk_core::domain::resource::{Body, Operation};
use postdesk_shared::dto::CountQuery;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.list(&query).await?;
    let context = output_context(&state, Operation::List);
    let body: Vec<_> = posts.iter().map(|post| project(post, context)).collect();

    Ok(success(&state, Operation::List).json(body))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<PostWrite>,
) -> AppResult<HttpResponse> {
    let post = state.posts.create(body.into_inner()).await?;
    tracing::info!(post_id = post.id, "Post created");

    let context = output_context(&state, Operation::Create);
    Ok(success(&state, Operation::Create).json(project(&post, context)))
}

/// GET /api/posts/count
pub async fn count(
    state: web::Data<AppState>,
    query: web::Query<CountQuery>,
) -> AppResult<HttpResponse> {
    let count = state.posts.count(query.online.as_deref()).await?;
    Ok(success(&state, Operation::Count).json(count))
}

/// GET /api/posts/{id}
pub async fn get(state: web::Data<AppState>, id: web::Path<PostId>) -> AppResult<HttpResponse> {
    let post = state.posts.get(id.into_inner()).await?;
    let context = output_context(&state, Operation::Get);
    Ok(success(&state, Operation::Get).json(project(&post, context)))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    id: web::Path<PostId>,
    body: web::Json<PostWrite>,
) -> AppResult<HttpResponse> {
    let post = state.posts.update(id.into_inner(), body.into_inner()).await?;
    tracing::info!(post_id = post.id, "Post updated");

    let context = output_context(&state, Operation::Update);
    Ok(success(&state, Operation::Update).json(project(&post, context)))
}

/// DELETE /api/posts/{id}
pub async fn delete(state: web::Data<AppState>, id: web::Path<PostId>) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    state.posts.delete(id).await?;
    tracing::info!(post_id = id, "Post deleted");

    Ok(success(&state, Operation::Delete).finish())
}

/// POST /api/posts/{id}/publish
///
/// Takes no body; responds with the id of the published post.
pub async fn publish(state: web::Data<AppState>, id: web::Path<PostId>) -> AppResult<HttpResponse> {
    let id = state.posts.publish(id.into_inner()).await?;
    tracing::info!(post_id = id, "Post published");

    Ok(success(&state, Operation::Publish).json(id))
}

fn success(state: &AppState, operation: Operation) -> HttpResponseBuilder {
    let status = state
        .descriptor
        .operation(operation)
        .and_then(|spec| StatusCode::from_u16(spec.success_status).ok())
        .unwrap_or(StatusCode::OK);
    HttpResponse::build(status)
}

fn output_context(state: &AppState, operation: Operation) -> ProjectionContext {
    match state.descriptor.operation(operation).map(|spec| spec.output) {
        Some(Body::Projection(context)) => context,
        _ => ProjectionContext::ItemRead,
    }
}
