//! Shared Kernel
//!
//! The error vocabulary every crate agrees on:
//! - [`error::kind::ErrorKind`], mapped one-to-one onto HTTP statuses
//! - [`error::app_error::AppError`], kind plus message, action hint and cause
//! - behind the `axum` feature, an RFC 7807 `IntoResponse` for `AppError`

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
