//! Request extractors whose rejections answer with the JSON error body.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::errors::ServiceError;

/// JSON body in, JSON body out. Malformed bodies become 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ServiceError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ServiceError))]
pub struct Path<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ServiceError))]
pub struct Query<T>(pub T);

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ServiceError {
    fn from(rejection: PathRejection) -> Self {
        ServiceError::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ServiceError {
    fn from(rejection: QueryRejection) -> Self {
        ServiceError::bad_request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde::Deserialize;
    use serde_json::Value;

    #[derive(Debug, Deserialize)]
    struct Tenant {
        #[allow(dead_code)]
        name: String,
    }

    async fn reject(body: &'static str) -> (StatusCode, Value) {
        let req = Request::builder()
            .method("POST")
            .uri("/tenants")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        let err = Json::<Tenant>::from_request(req, &()).await.unwrap_err();
        let res = err.into_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn missing_fields_answer_400_with_the_error_body() {
        let (status, body) = reject(r#"{"email":"dana@example.com"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status_code"], 400);
        assert!(body["message"].as_str().unwrap().contains("name"));
    }

    #[tokio::test]
    async fn broken_json_is_a_bad_request_too() {
        let (status, body) = reject("{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Bad Request");
    }

    #[tokio::test]
    async fn malformed_path_ids_are_bad_requests() {
        // `MissingPathParams` is #[non_exhaustive]; obtain it via the public extractor.
        let (mut parts, _) = Request::new(Body::empty()).into_parts();
        let rejection: PathRejection =
            axum::extract::Path::<String>::from_request_parts(&mut parts, &())
                .await
                .unwrap_err();
        let res = ServiceError::from(rejection).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
