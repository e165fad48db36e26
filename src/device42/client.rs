//! Device42 client.

use super::{Device42Error, OffsetPages};
use crate::config::D42_PAGE_LIMIT;
use crate::http::{ApiRequest, ApiResponse, Method, Transport};
use crate::models::de::{value_to_id, value_to_text};
use crate::models::{CustomField, ServiceInstanceCustomField, SubnetRecord, VlanRecord};
use crate::processing::VlanStore;
use itertools::Itertools;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

const VLANS_PATH: &str = "/api/1.0/vlans/";
const SUBNETS_PATH: &str = "/api/1.0/subnets/";
const DOQL_PATH: &str = "/services/data/v1.0/query/";
const CUSTOM_FIELDS_PATH: &str = "/api/1.0/custom_fields/serviceinstance/";
const DEVICES_PATH: &str = "/api/1.0/devices/all/";
const SERVICE_INSTANCES_PATH: &str = "/api/2.0/service_instances/";

/// DOQL saved query returning service instance custom fields.
pub const SERVICE_INSTANCE_CUSTOM_FIELDS_QUERY: &str = "get_service_instance_custom_fields";

#[derive(Deserialize)]
struct VlansEnvelope {
    #[serde(default)]
    vlans: Vec<VlanRecord>,
}

pub struct D42Client<T: Transport> {
    transport: T,
}

impl<T: Transport> D42Client<T> {
    pub fn new(transport: T) -> D42Client<T> {
        D42Client { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `request` and return its JSON body.
    ///
    /// POST and PUT answers are checked for `code == 0` and reduced to
    /// their `msg` payload.
    pub fn request(&mut self, request: &ApiRequest) -> Result<Value, Device42Error> {
        let response = self.transport.send(request)?;
        if !response.is_success() {
            let err = classify_error(&request.path, response);
            log::warn!("{} {} failed: {err}", request.method, request.path);
            return Err(err);
        }

        let body: Value = decode_str(&response.body, &request.path)?;
        match request.method {
            Method::Get => Ok(body),
            Method::Post | Method::Put => check_return_code(&request.path, body),
        }
    }

    pub fn vlans_by_number(&mut self, number: u32) -> Result<Vec<VlanRecord>, Device42Error> {
        let request = ApiRequest::get(VLANS_PATH, vec![("number".to_string(), number.to_string())]);
        let envelope: VlansEnvelope = decode(self.request(&request)?, "vlans")?;
        log::debug!("vlan number={number} existing={}", envelope.vlans.len());
        Ok(envelope.vlans)
    }

    /// Create `vlan` and return the id Device42 assigned to it.
    pub fn create_vlan(&mut self, vlan: &VlanRecord) -> Result<u64, Device42Error> {
        let msg = self.request(&ApiRequest::post_form(VLANS_PATH, vlan.to_form()))?;
        let id = created_id(VLANS_PATH, &msg)?;
        log::info!("Created vlan number={} id={id} name='{}'", vlan.number, vlan.name);
        Ok(id)
    }

    pub fn create_subnet(&mut self, subnet: &SubnetRecord) -> Result<u64, Device42Error> {
        let msg = self.request(&ApiRequest::post_form(SUBNETS_PATH, subnet.to_form()))?;
        let id = created_id(SUBNETS_PATH, &msg)?;
        log::info!(
            "Created subnet {}/{} id={id} name='{}'",
            subnet.network,
            subnet.mask_bits,
            subnet.name
        );
        Ok(id)
    }

    /// Run a saved DOQL query. The query itself has to exist in Device42.
    pub fn doql_query(&mut self, query_name: &str) -> Result<Value, Device42Error> {
        let params = vec![
            ("saved_query_name".to_string(), query_name.to_string()),
            ("delimiter".to_string(), String::new()),
            ("header".to_string(), "yes".to_string()),
            ("output_type".to_string(), "json".to_string()),
        ];
        self.request(&ApiRequest::get(DOQL_PATH, params))
    }

    pub fn service_instance_custom_fields(
        &mut self,
    ) -> Result<Vec<ServiceInstanceCustomField>, Device42Error> {
        let rows = self.doql_query(SERVICE_INSTANCE_CUSTOM_FIELDS_QUERY)?;
        decode(rows, SERVICE_INSTANCE_CUSTOM_FIELDS_QUERY)
    }

    pub fn update_service_instance_custom_field(
        &mut self,
        field: &CustomField,
    ) -> Result<Value, Device42Error> {
        self.request(&ApiRequest::put_form(CUSTOM_FIELDS_PATH, field.to_form()))
    }

    pub fn all_devices(&mut self) -> Result<Vec<Value>, Device42Error> {
        let mut body = self.request(&ApiRequest::get(DEVICES_PATH, vec![]))?;
        let devices = body.get_mut("Devices").map(Value::take).unwrap_or(Value::Null);
        decode(devices, "Devices")
    }

    pub fn service_instance_pages(&mut self) -> OffsetPages<'_, T> {
        OffsetPages::new(self, SERVICE_INSTANCES_PATH, "service_instances", D42_PAGE_LIMIT)
    }

    pub fn all_service_instances(&mut self) -> Result<Vec<Value>, Device42Error> {
        let mut instances = Vec::new();
        for page in self.service_instance_pages() {
            instances.extend(page?);
        }
        Ok(instances)
    }
}

impl<T: Transport> VlanStore for D42Client<T> {
    fn vlans_by_number(&mut self, number: u32) -> Result<Vec<VlanRecord>, Device42Error> {
        D42Client::vlans_by_number(self, number)
    }

    fn create_vlan(&mut self, vlan: &VlanRecord) -> Result<u64, Device42Error> {
        D42Client::create_vlan(self, vlan)
    }
}

/// Map a non-2xx response to an error, recognizing license failures.
fn classify_error(path: &str, response: ApiResponse) -> Device42Error {
    // 500 bodies are not always JSON
    let message = serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|body| body.get("msg").map(msg_text));

    if response.status == 500 {
        if let Some(msg) = &message {
            if msg.starts_with("License expired") {
                return Device42Error::LicenseExpired(msg.clone());
            }
            if msg.starts_with("License is not valid for") {
                return Device42Error::LicenseInsufficient(msg.clone());
            }
        }
    }

    Device42Error::Http {
        path: path.to_string(),
        status: response.status,
        message: message.unwrap_or(response.body),
    }
}

fn check_return_code(path: &str, mut body: Value) -> Result<Value, Device42Error> {
    let code = body
        .get("code")
        .and_then(|code| value_to_text(code).trim().parse::<i64>().ok())
        .ok_or_else(|| Device42Error::Decode {
            what: "return code".to_string(),
            path: path.to_string(),
            message: format!("no numeric code in {body}"),
        })?;
    let msg = body.get_mut("msg").map(Value::take).unwrap_or(Value::Array(vec![]));
    if code != 0 {
        return Err(Device42Error::ReturnCode {
            path: path.to_string(),
            message: msg_text(&msg),
        });
    }
    Ok(msg)
}

fn msg_text(msg: &Value) -> String {
    match msg {
        Value::Array(items) => items.iter().map(value_to_text).join(" "),
        other => value_to_text(other),
    }
}

/// Id of a created object: the first integer in the `msg` payload.
pub fn created_id(path: &str, msg: &Value) -> Result<u64, Device42Error> {
    let id = match msg {
        Value::Array(items) => items.iter().find_map(value_to_id),
        other => value_to_id(other),
    };
    id.ok_or_else(|| Device42Error::MissingId {
        path: path.to_string(),
        msg: msg.to_string(),
    })
}

fn decode_str<R: DeserializeOwned>(body: &str, what: &str) -> Result<R, Device42Error> {
    let mut deserializer = serde_json::Deserializer::from_str(body);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| Device42Error::Decode {
        what: what.to_string(),
        path: e.path().to_string(),
        message: e.inner().to_string(),
    })
}

pub(super) fn decode<R: DeserializeOwned>(value: Value, what: &str) -> Result<R, Device42Error> {
    serde_path_to_error::deserialize(value).map_err(|e| Device42Error::Decode {
        what: what.to_string(),
        path: e.path().to_string(),
        message: e.inner().to_string(),
    })
}
