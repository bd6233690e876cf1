use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::post::{PublishPostRequest, UpdatePostRequest},
    errors::AppError,
    use_cases::extractors::Publisher,
    AppState,
};

#[instrument(skip(state))]
pub async fn list_posts(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let posts = state.post_handler.list_posts().await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[instrument(skip(slug, state), fields(slug = %slug))]
pub async fn get_post(
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let post = state.post_handler.get_post(&slug).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[instrument(skip(_publisher, state, data))]
pub async fn publish_post(
    _publisher: Publisher,
    state: web::Data<AppState>,
    data: web::Json<PublishPostRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.post_handler.publish_post(data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(_publisher, slug, state, data), fields(slug = %slug))]
pub async fn update_post(
    _publisher: Publisher,
    slug: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdatePostRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.post_handler.update_post(&slug, &data).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(_publisher, slug, state), fields(slug = %slug))]
pub async fn delete_post(
    _publisher: Publisher,
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let response = state.post_handler.delete_post(&slug).await?;
    Ok(HttpResponse::Ok().json(response))
}
