//! `epoch.EpochStep` layer-2 topology schema.
//!
//! The schema carries more than the two [`TopologyStep`] shapes need
//! (broadcast summaries, address and ARP associations). Those fields are
//! left empty when encoding and must be empty when decoding.

use crate::domain::{CommEntry, DeviceId, TopologyStep};
use crate::error::PublisherError;

/// Per-destination packet counts sent by one device.
#[derive(Clone, PartialEq, prost::Message)]
pub struct L2Summary {
    /// Destination MAC (EUI-48 in the low 48 bits).
    #[prost(uint64, tag = "1")]
    pub mac_dst: u64,
    /// IPv4 count / address value.
    #[prost(uint32, tag = "2")]
    pub ipv4: u32,
    /// IPv6 packet count.
    #[prost(uint32, tag = "3")]
    pub ipv6: u32,
    /// ARP packet count.
    #[prost(uint32, tag = "4")]
    pub arp: u32,
    /// Unclassified packet count.
    #[prost(uint32, tag = "5")]
    pub unknown: u32,
}

/// Everything one device transmitted during an epoch.
#[derive(Clone, PartialEq, prost::Message)]
pub struct DeviceComm {
    /// Sending MAC.
    #[prost(uint64, tag = "1")]
    pub mac_src: u64,
    /// Unicast summaries, one per destination.
    #[prost(message, repeated, tag = "2")]
    pub tx_summary: Vec<L2Summary>,
    /// Traffic to `33:33:*` multicast.
    #[prost(message, optional, tag = "3")]
    pub bcast_33: Option<L2Summary>,
    /// Traffic to `ff:ff:ff:ff:ff:ff`.
    #[prost(message, optional, tag = "4")]
    pub bcast_ff: Option<L2Summary>,
    /// Traffic to `01:*` multicast.
    #[prost(message, optional, tag = "5")]
    pub bcast_01: Option<L2Summary>,
    /// Traffic to other group addresses.
    #[prost(message, optional, tag = "6")]
    pub bcast_xx: Option<L2Summary>,
}

/// MAC to IPv4 association.
#[derive(Clone, PartialEq, prost::Message)]
pub struct AddrAssoc {
    /// Device MAC.
    #[prost(uint64, tag = "1")]
    pub mac_src: u64,
    /// IPv4 address as a big-endian integer.
    #[prost(uint32, tag = "2")]
    pub ipv4: u32,
}

/// ARP table observed from one device.
#[derive(Clone, PartialEq, prost::Message)]
pub struct ArpAssoc {
    /// Device owning the table.
    #[prost(uint64, tag = "1")]
    pub mac_src: u64,
    /// Table rows.
    #[prost(message, repeated, tag = "2")]
    pub table_row: Vec<AddrAssoc>,
}

/// One epoch of layer-2 activity.
#[derive(Clone, PartialEq, prost::Message)]
pub struct EpochStep {
    /// Devices entering the membership set.
    #[prost(uint64, repeated, tag = "1")]
    pub enter_l2devices: Vec<u64>,
    /// Per-device transmit summaries.
    #[prost(message, repeated, tag = "2")]
    pub l2_dev_comm: Vec<DeviceComm>,
    /// Newly seen IPv4 source addresses.
    #[prost(message, repeated, tag = "3")]
    pub enter_l2_ipv4_addr_src: Vec<AddrAssoc>,
    /// Newly seen ARP tables.
    #[prost(message, repeated, tag = "4")]
    pub enter_arp_table: Vec<ArpAssoc>,
}

impl From<&TopologyStep> for EpochStep {
    fn from(step: &TopologyStep) -> Self {
        match step {
            TopologyStep::DeviceJoin { devices } => Self {
                enter_l2devices: devices.iter().map(DeviceId::as_u64).collect(),
                ..Self::default()
            },
            TopologyStep::CommSummary { sender, entries } => Self {
                l2_dev_comm: vec![DeviceComm {
                    mac_src: sender.as_u64(),
                    tx_summary: entries
                        .iter()
                        .map(|e| L2Summary {
                            mac_dst: e.destination.as_u64(),
                            ipv4: e.address,
                            ..L2Summary::default()
                        })
                        .collect(),
                    ..DeviceComm::default()
                }],
                ..Self::default()
            },
        }
    }
}

impl TryFrom<EpochStep> for TopologyStep {
    type Error = PublisherError;

    fn try_from(step: EpochStep) -> Result<Self, Self::Error> {
        if !step.enter_l2_ipv4_addr_src.is_empty() || !step.enter_arp_table.is_empty() {
            return Err(PublisherError::UnsupportedStep);
        }

        let EpochStep {
            enter_l2devices,
            mut l2_dev_comm,
            ..
        } = step;

        match (enter_l2devices.is_empty(), l2_dev_comm.len()) {
            (_, 0) => Ok(Self::DeviceJoin {
                devices: enter_l2devices.into_iter().map(DeviceId::new).collect(),
            }),
            (true, 1) => {
                let comm = l2_dev_comm.pop().ok_or(PublisherError::UnsupportedStep)?;
                Ok(Self::CommSummary {
                    sender: DeviceId::new(comm.mac_src),
                    entries: comm
                        .tx_summary
                        .into_iter()
                        .map(|s| CommEntry {
                            destination: DeviceId::new(s.mac_dst),
                            address: s.ipv4,
                        })
                        .collect(),
                })
            }
            _ => Err(PublisherError::UnsupportedStep),
        }
    }
}
