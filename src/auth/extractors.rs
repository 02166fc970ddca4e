use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use crate::error::ApiError;

/// `axum::Json` with its rejection rewritten into `ApiError`, so malformed
/// bodies and wrong content types get the same `{"success": false, "error"}`
/// envelope as every other failure instead of axum's plain-text 415/422.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::dto::LoginRequest;
    use axum::{body::Body, http::header, http::Request as HttpRequest, http::StatusCode};

    #[tokio::test]
    async fn malformed_json_becomes_a_400_validation_error() {
        let req = HttpRequest::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let err = ApiJson::<LoginRequest>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_content_type_becomes_a_400_validation_error() {
        let req = HttpRequest::builder()
            .method("POST")
            .body(Body::from(r#"{"email":"a@b.com","password":"x"}"#))
            .unwrap();
        let err = ApiJson::<LoginRequest>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn valid_body_passes_through() {
        let req = HttpRequest::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"email":"a@b.com","password":"secret"}"#))
            .unwrap();
        let ApiJson(login) = ApiJson::<LoginRequest>::from_request(req, &())
            .await
            .expect("valid body");
        assert_eq!(login.email, "a@b.com");
    }
}
