//! Layer-2 topology steps.
//!
//! A [`TopologyStep`] is one "epoch" event: either a set of devices joining
//! the layer-2 membership set, or a summary of what one device sent to
//! others during the epoch.

use super::DeviceId;

/// One (destination, address) pair of a communication summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommEntry {
    /// Receiving device.
    pub destination: DeviceId,
    /// IPv4 address value carried for this pair.
    pub address: u32,
}

/// One topology event.
///
/// Fields may repeat or be empty; nothing is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyStep {
    /// Devices entering the layer-2 membership set, in order.
    DeviceJoin {
        /// Joining devices.
        devices: Vec<DeviceId>,
    },

    /// Traffic sent by one device during the epoch.
    CommSummary {
        /// Sending device.
        sender: DeviceId,
        /// Destinations reached by the sender, in order.
        entries: Vec<CommEntry>,
    },
}

impl TopologyStep {
    /// Builds a device-join step for the devices `0..count`.
    #[must_use]
    pub fn join_range(count: u64) -> Self {
        Self::DeviceJoin {
            devices: (0..count).map(DeviceId::new).collect(),
        }
    }

    /// Returns the step type as a static string slice.
    #[must_use]
    pub const fn step_type_str(&self) -> &'static str {
        match self {
            Self::DeviceJoin { .. } => "device_join",
            Self::CommSummary { .. } => "comm_summary",
        }
    }
}
