//! Infoblox queries used by the fetch phase.

use super::{paginate, InfobloxError};
use crate::http::Transport;
use crate::models::{Ipv4AddressRecord, NetworkRecord};
use itertools::Itertools;
use serde::de::DeserializeOwned;

const NETWORK_FIELDS: [&str; 3] = ["network", "extattrs", "network_view"];

pub struct InfobloxClient<T: Transport> {
    transport: T,
    /// Restrict network queries to one view when set.
    network_view: Option<String>,
}

impl<T: Transport> InfobloxClient<T> {
    pub fn new(transport: T, network_view: Option<String>) -> InfobloxClient<T> {
        InfobloxClient {
            transport,
            network_view,
        }
    }

    /// Every record of `endpoint` matching `params`, across all pages.
    pub fn fetch_all<R: DeserializeOwned>(
        &mut self,
        endpoint: &str,
        params: Vec<(String, String)>,
    ) -> Result<Vec<R>, InfobloxError> {
        let mut records = Vec::new();
        for page in paginate::<T, R>(&mut self.transport, endpoint, params) {
            records.extend(page?.into_vec());
        }
        Ok(records)
    }

    pub fn networks(&mut self) -> Result<Vec<NetworkRecord>, InfobloxError> {
        let mut params = vec![("_return_fields+".to_string(), NETWORK_FIELDS.iter().join(","))];
        if let Some(view) = &self.network_view {
            params.push(("network_view".to_string(), view.clone()));
        }
        log::info!("Searching all available networks view={:?}", self.network_view);
        self.fetch_all("network", params)
    }

    /// Addresses in `network` with status USED.
    pub fn used_addresses(
        &mut self,
        network: &NetworkRecord,
    ) -> Result<Vec<Ipv4AddressRecord>, InfobloxError> {
        self.fetch_all("ipv4address", address_params(network, false))
    }

    /// Used addresses in `network` that carry a MAC address.
    pub fn devices(
        &mut self,
        network: &NetworkRecord,
    ) -> Result<Vec<Ipv4AddressRecord>, InfobloxError> {
        self.fetch_all("ipv4address", address_params(network, true))
    }
}

fn address_params(network: &NetworkRecord, with_mac: bool) -> Vec<(String, String)> {
    let mut params = vec![
        ("network".to_string(), network.network.to_string()),
        ("network_view".to_string(), network.network_view.clone()),
        ("status".to_string(), "USED".to_string()),
        ("_return_fields+".to_string(), "discovered_data".to_string()),
    ];
    if with_mac {
        params.push(("mac_address~".to_string(), ".+".to_string()));
    }
    params
}
