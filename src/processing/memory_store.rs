//! In-memory [`VlanStore`] for unit tests.

use super::VlanStore;
use crate::device42::Device42Error;
use crate::models::VlanRecord;

#[derive(Default)]
pub struct MemoryVlanStore {
    pub vlans: Vec<VlanRecord>,
    pub created: Vec<VlanRecord>,
    pub looked_up: Vec<u32>,
    pub lookups: usize,
    /// Reject lookups of this number with a return-code error.
    pub fail_on: Option<u32>,
    /// Reject every call with an expired-license error.
    pub license_expired: bool,
}

impl MemoryVlanStore {
    pub fn insert(&mut self, vlan: VlanRecord) {
        self.vlans.push(vlan);
    }

    fn next_id(&self) -> u64 {
        self.vlans.iter().filter_map(|v| v.vlan_id).max().unwrap_or(0) + 1
    }
}

impl VlanStore for MemoryVlanStore {
    fn vlans_by_number(&mut self, number: u32) -> Result<Vec<VlanRecord>, Device42Error> {
        self.lookups += 1;
        self.looked_up.push(number);
        if self.license_expired {
            return Err(Device42Error::LicenseExpired("License expired".to_string()));
        }
        if self.fail_on == Some(number) {
            return Err(Device42Error::ReturnCode {
                path: "/api/1.0/vlans/".to_string(),
                message: format!("lookup of {number} refused"),
            });
        }
        let number = number.to_string();
        Ok(self
            .vlans
            .iter()
            .filter(|v| v.number == number)
            .cloned()
            .collect())
    }

    fn create_vlan(&mut self, vlan: &VlanRecord) -> Result<u64, Device42Error> {
        let id = self.next_id();
        let mut stored = vlan.clone();
        stored.vlan_id = Some(id);
        self.vlans.push(stored);
        self.created.push(vlan.clone());
        Ok(id)
    }
}
