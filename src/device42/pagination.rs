//! Offset/limit paging for Device42 v2 collections.

use super::client::decode;
use super::{D42Client, Device42Error};
use crate::http::{ApiRequest, Transport};
use crate::models::de::value_to_id;
use serde_json::Value;

/// Lazy sequence of pages from a collection answering
/// `{<list_key>: [...], total_count, offset, limit}`.
///
/// Stops once `offset` reaches `total_count`, or on an empty page.
pub struct OffsetPages<'c, T: Transport> {
    client: &'c mut D42Client<T>,
    path: String,
    list_key: String,
    limit: u32,
    offset: u64,
    total: Option<u64>,
    done: bool,
}

impl<'c, T: Transport> OffsetPages<'c, T> {
    pub fn new(
        client: &'c mut D42Client<T>,
        path: &str,
        list_key: &str,
        limit: u32,
    ) -> OffsetPages<'c, T> {
        OffsetPages {
            client,
            path: path.to_string(),
            list_key: list_key.to_string(),
            limit,
            offset: 0,
            total: None,
            done: false,
        }
    }
}

impl<'c, T: Transport> Iterator for OffsetPages<'c, T> {
    type Item = Result<Vec<Value>, Device42Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.total.is_some_and(|total| self.offset >= total) {
            return None;
        }

        let query = vec![
            ("limit".to_string(), self.limit.to_string()),
            ("offset".to_string(), self.offset.to_string()),
        ];
        let mut body = match self.client.request(&ApiRequest::get(&self.path, query)) {
            Ok(body) => body,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        let total = body.get("total_count").and_then(value_to_id).unwrap_or(0);
        let items = body.get_mut(&self.list_key).map(Value::take).unwrap_or(Value::Null);
        let items: Vec<Value> = match decode(items, &self.list_key) {
            Ok(items) => items,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        log::debug!(
            "{path} offset={offset} limit={limit} got={got} total_count={total}",
            path = self.path,
            offset = self.offset,
            limit = self.limit,
            got = items.len(),
        );
        self.total = Some(total);
        self.offset += u64::from(self.limit);
        if items.is_empty() {
            self.done = true;
        }
        Some(Ok(items))
    }
}
