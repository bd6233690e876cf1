use actix_web::{http::header::ContentType, web, HttpRequest, HttpResponse};
use std::io::ErrorKind;
use tracing::instrument;

use crate::{errors::AppError, AppState};

/// Catch-all for every path the API does not own. Always answers with the
/// frontend entry page so client-side routes like `/post/{slug}` resolve.
#[instrument(skip(req, state), fields(path = %req.path()))]
pub async fn index(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    match tokio::fs::read(&state.index_path).await {
        Ok(page) => Ok(HttpResponse::Ok()
            .insert_header(ContentType::html())
            .body(page)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(index = %state.index_path.display(), "Frontend entry file is missing");
            Err(AppError::NotFound("404 page not found".into()))
        }
        Err(e) => Err(e.into()),
    }
}
