//! Infoblox WAPI access.
//!
//! - [`paginator`] - cursor-based paging over any WAPI object type
//! - [`client`] - the network and address queries the sync needs

mod client;
mod paginator;

pub use client::InfobloxClient;
pub use paginator::{paginate, PageResult, Paginator};

use crate::http::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InfobloxError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Infoblox returned HTTP {status} for {endpoint}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    #[error("Error parsing {endpoint} page {page}: path={path} error={message}")]
    Decode {
        endpoint: String,
        page: usize,
        path: String,
        message: String,
    },
    #[error("Page cursor repeated for {endpoint} - possible infinite loop")]
    RepeatedCursor { endpoint: String },
}
