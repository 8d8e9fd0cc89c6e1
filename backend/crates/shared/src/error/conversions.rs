//! HTTP rendering of [`AppError`](super::app_error::AppError) (`axum` feature)
//!
//! The body is an RFC 7807 problem document. The cause is left out.

#[cfg(feature = "axum")]
mod problem {
    use axum::Json;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use serde_json::json;

    use crate::error::app_error::AppError;

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let code = self.status_code();
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

            let mut body = json!({
                "type": "about:blank",
                "title": self.kind().reason(),
                "status": code,
                "detail": self.message(),
            });
            if let Some(action) = self.action() {
                body["action"] = action.into();
            }

            (
                status,
                [(axum::http::header::CONTENT_TYPE, "application/problem+json")],
                Json(body),
            )
                .into_response()
        }
    }

}
