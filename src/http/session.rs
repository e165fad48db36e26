//! reqwest-backed [`Transport`].

use super::{ApiRequest, ApiResponse, Transport, TransportError};
use crate::config::ClientConfig;
use colored::Colorize;
use reqwest::blocking::Client;
use std::error::Error;
use std::io;
use std::time::Duration;

/// Authenticated session against one remote system.
///
/// The underlying reqwest client is built on first use. A connection reset
/// rebuilds it and retries the same request once; whatever the retry
/// returns goes back to the caller.
pub struct RestClient {
    config: ClientConfig,
    session: Option<Client>,
}

impl RestClient {
    pub fn new(config: ClientConfig) -> RestClient {
        RestClient {
            config,
            session: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn prepare_session(&self) -> Result<Client, TransportError> {
        log::debug!(
            "New session for {host} insecure={insecure}",
            host = self.config.host,
            insecure = self.config.insecure
        );
        if self.config.insecure {
            log::warn!(
                "TLS verification {} for {}",
                "disabled".on_red(),
                self.config.host
            );
        }
        Client::builder()
            .danger_accept_invalid_certs(self.config.insecure)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build()
            .map_err(TransportError::Session)
    }

    fn session(&mut self) -> Result<&Client, TransportError> {
        let session = match self.session.take() {
            Some(session) => session,
            None => self.prepare_session()?,
        };
        Ok(&*self.session.insert(session))
    }

    fn execute(&mut self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.config.url_for(&request.path);
        let user = self.config.user.clone();
        let pass = self.config.pass.clone();
        log::debug!("{method} {url}", method = request.method, url = url.on_blue());

        let mut builder = self
            .session()?
            .request(request.method.into(), &url)
            .basic_auth(user, Some(pass));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if !request.form.is_empty() {
            builder = builder.form(&request.form);
        }

        let response = builder.send().map_err(|source| TransportError::Request {
            url: url.clone(),
            source,
        })?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|source| TransportError::Request { url, source })?;
        log::trace!("status={status} body.len()={}", body.len());

        Ok(ApiResponse { status, body })
    }
}

impl Transport for RestClient {
    fn send(&mut self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        match self.execute(request) {
            Err(err) if err.is_connection_reset() => {
                log::warn!(
                    "{reset} on {path}, rebuilding session and retrying once",
                    reset = "connection reset".on_red(),
                    path = request.path
                );
                self.session = Some(self.prepare_session()?);
                self.execute(request)
            }
            other => other,
        }
    }
}

/// True when any error in the `source()` chain is an io connection reset.
pub fn is_connection_reset(err: &(dyn Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(io_err) = e.downcast_ref::<io::Error>() {
            if io_err.kind() == io::ErrorKind::ConnectionReset {
                return true;
            }
        }
        current = e.source();
    }
    false
}
