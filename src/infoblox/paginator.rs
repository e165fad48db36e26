//! Cursor-based paging over Infoblox WAPI results.

use super::InfobloxError;
use crate::config::MAX_RESULTS;
use crate::http::{ApiRequest, Transport};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::marker::PhantomData;

/// The `result` field of one page.
///
/// Some endpoints answer with a single object instead of a list; callers
/// normalize with [`PageResult::into_vec`].
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum PageResult<R> {
    Many(Vec<R>),
    One(R),
}

impl<R> PageResult<R> {
    pub fn into_vec(self) -> Vec<R> {
        match self {
            PageResult::Many(records) => records,
            PageResult::One(record) => vec![record],
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PageResult::Many(records) => records.len(),
            PageResult::One(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Deserialize)]
struct PageEnvelope<R> {
    result: PageResult<R>,
    next_page_id: Option<String>,
}

enum PageState {
    First(Vec<(String, String)>),
    Next(String),
    Done,
}

/// Lazy sequence of result pages for one WAPI query.
///
/// The first request carries the caller's filters plus the paging
/// directives; every later request carries only the cursor returned by the
/// previous page. Iteration ends on the first page without a cursor, or
/// after the first error.
pub struct Paginator<'t, T: Transport, R> {
    transport: &'t mut T,
    endpoint: String,
    state: PageState,
    previous_cursor: Option<String>,
    pages: usize,
    records: usize,
    _record: PhantomData<R>,
}

/// Start paging through `endpoint` with the given filter parameters.
pub fn paginate<'t, T: Transport, R: DeserializeOwned>(
    transport: &'t mut T,
    endpoint: &str,
    params: Vec<(String, String)>,
) -> Paginator<'t, T, R> {
    Paginator {
        transport,
        endpoint: endpoint.to_string(),
        state: PageState::First(params),
        previous_cursor: None,
        pages: 0,
        records: 0,
        _record: PhantomData,
    }
}

fn with_paging(mut params: Vec<(String, String)>) -> Vec<(String, String)> {
    params.push(("_paging".to_string(), "1".to_string()));
    params.push(("_return_as_object".to_string(), "1".to_string()));
    params.push(("_max_results".to_string(), MAX_RESULTS.to_string()));
    params
}

impl<'t, T: Transport, R: DeserializeOwned> Paginator<'t, T, R> {
    fn fetch(&mut self, query: Vec<(String, String)>) -> Result<PageEnvelope<R>, InfobloxError> {
        let request = ApiRequest::get(&self.endpoint, query);
        let response = self.transport.send(&request)?;
        if !response.is_success() {
            return Err(InfobloxError::Status {
                endpoint: self.endpoint.clone(),
                status: response.status,
                body: response.body,
            });
        }

        let mut deserializer = serde_json::Deserializer::from_str(&response.body);
        serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
            log::error!("OUTPUT START:\n\n{}\n\nOUTPUT END\n", response.body);
            InfobloxError::Decode {
                endpoint: self.endpoint.clone(),
                page: self.pages,
                path: e.path().to_string(),
                message: e.inner().to_string(),
            }
        })
    }
}

impl<'t, T: Transport, R: DeserializeOwned> Iterator for Paginator<'t, T, R> {
    type Item = Result<PageResult<R>, InfobloxError>;

    fn next(&mut self) -> Option<Self::Item> {
        let query = match std::mem::replace(&mut self.state, PageState::Done) {
            PageState::First(params) => with_paging(params),
            PageState::Next(cursor) => vec![("_page_id".to_string(), cursor)],
            PageState::Done => return None,
        };

        let page = match self.fetch(query) {
            Ok(page) => page,
            Err(e) => return Some(Err(e)),
        };

        if let Some(cursor) = page.next_page_id {
            if self.previous_cursor.as_deref() == Some(cursor.as_str()) {
                return Some(Err(InfobloxError::RepeatedCursor {
                    endpoint: self.endpoint.clone(),
                }));
            }
            self.previous_cursor = Some(cursor.clone());
            self.state = PageState::Next(cursor);
        }

        self.records += page.result.len();
        log::info!(
            "got {endpoint} page#{page:2} record_count=+{count:3} => {total:4} more={more}",
            endpoint = self.endpoint,
            page = self.pages,
            count = page.result.len(),
            total = self.records,
            more = matches!(self.state, PageState::Next(_)),
        );
        self.pages += 1;

        Some(Ok(page.result))
    }
}
