//! Scripted [`Transport`] for unit tests.

use super::{ApiRequest, ApiResponse, Transport, TransportError};
use std::collections::VecDeque;

/// Replays canned responses in order and records every request sent.
#[derive(Default)]
pub struct FakeTransport {
    pub responses: VecDeque<ApiResponse>,
    pub requests: Vec<ApiRequest>,
}

impl FakeTransport {
    pub fn new() -> FakeTransport {
        FakeTransport::default()
    }

    pub fn reply(mut self, status: u16, body: &str) -> FakeTransport {
        self.responses.push_back(ApiResponse {
            status,
            body: body.to_string(),
        });
        self
    }

    pub fn reply_json(self, body: serde_json::Value) -> FakeTransport {
        self.reply(200, &body.to_string())
    }
}

impl Transport for FakeTransport {
    fn send(&mut self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.push(request.clone());
        Ok(self.responses.pop_front().unwrap_or_else(|| {
            panic!(
                "FakeTransport has no response left for {} {}",
                request.method, request.path
            )
        }))
    }
}
