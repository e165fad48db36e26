//! Device42 REST API access.
//!
//! - [`client`] - requests, error classification and the typed endpoints
//! - [`pagination`] - offset/limit paging for the v2 collections

mod client;
mod pagination;

pub use client::{created_id, D42Client};
pub use pagination::OffsetPages;

use crate::http::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Device42Error {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Device42 returned HTTP {status} for {path}: {message}")]
    Http {
        path: String,
        status: u16,
        message: String,
    },
    #[error("Device42 license expired: {0}")]
    LicenseExpired(String),
    #[error("Device42 license is not valid for this request: {0}")]
    LicenseInsufficient(String),
    #[error("Device42 rejected {path}: {message}")]
    ReturnCode { path: String, message: String },
    #[error("Error parsing Device42 {what}: path={path} error={message}")]
    Decode {
        what: String,
        path: String,
        message: String,
    },
    #[error("No id in Device42 response for {path}: {msg}")]
    MissingId { path: String, msg: String },
}

impl Device42Error {
    pub fn is_license_error(&self) -> bool {
        matches!(
            self,
            Device42Error::LicenseExpired(_) | Device42Error::LicenseInsufficient(_)
        )
    }
}
