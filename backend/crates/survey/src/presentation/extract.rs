//! Request extractors

use axum::Json;
use axum::extract::{ConnectInfo, FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use platform::client::extract_client_ip;
use serde_json::Value;
use std::convert::Infallible;
use std::net::SocketAddr;

use crate::error::SurveyError;

/// Any JSON body except `null`, sent with a JSON content type
///
/// Every rejection (wrong content type, syntax error, empty body) becomes
/// [`SurveyError::InvalidJson`]; shape checks are left to validation.
#[derive(Debug, Clone)]
pub struct JsonPayload(pub Value);

impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = SurveyError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(Value::Null)) => Err(SurveyError::InvalidJson),
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "JSON body rejected");
                Err(SurveyError::InvalidJson)
            }
        }
    }
}

/// Client address recorded with a submission
///
/// `X-Forwarded-For` as sent, else the socket peer, else empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let direct_ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());

        Ok(Self(extract_client_ip(&parts.headers, direct_ip)))
    }
}
