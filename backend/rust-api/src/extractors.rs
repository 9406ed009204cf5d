use axum::{
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
    Json,
};

use crate::handlers::ApiError;

/// JSON extractor whose rejections use the API's JSON error shape.
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: serde::de::DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => {
                let message = format!("Failed to parse JSON request body: {}", rejection);
                tracing::warn!("{}", message);
                Err(ApiError::BadRequest(message).into_response())
            }
        }
    }
}
