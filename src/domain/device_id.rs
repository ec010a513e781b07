//! Type-safe layer-2 device identifier.
//!
//! [`DeviceId`] wraps a `u64` whose low 48 bits hold an EUI-48 MAC address,
//! the same representation the epoch wire schema uses for `mac_src` and
//! `mac_dst` fields.

use std::fmt;
use std::str::FromStr;

use crate::error::PublisherError;

/// Mask selecting the 48 address bits of an EUI-48 identifier.
const EUI48_MASK: u64 = 0xffff_ffff_ffff;

/// Identifier of a device in the layer-2 membership set.
///
/// Displays as colon-separated lower-case hex octets
/// (`00:00:00:00:00:01`). Values above 48 bits are truncated on
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceId(u64);

impl DeviceId {
    /// Creates a `DeviceId` from a raw integer, keeping the low 48 bits.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw & EUI48_MASK)
    }

    /// Returns the raw integer form used on the wire.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Returns the six address octets, most significant first.
    #[must_use]
    pub const fn octets(&self) -> [u8; 6] {
        let b = self.0.to_be_bytes();
        [b[2], b[3], b[4], b[5], b[6], b[7]]
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.octets();
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl FromStr for DeviceId {
    type Err = PublisherError;

    /// Parses `aa:bb:cc:dd:ee:ff` (or `-` separated) into a `DeviceId`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PublisherError::InvalidDeviceId(s.to_string());

        let mut raw = 0u64;
        let mut count = 0usize;
        for octet in s.split([':', '-']) {
            if octet.len() != 2 || !octet.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            let value = u8::from_str_radix(octet, 16).map_err(|_| invalid())?;
            raw = (raw << 8) | u64::from(value);
            count += 1;
        }

        if count != 6 {
            return Err(invalid());
        }
        Ok(Self(raw))
    }
}

impl From<u64> for DeviceId {
    fn from(raw: u64) -> Self {
        Self::new(raw)
    }
}

impl From<DeviceId> for u64 {
    fn from(id: DeviceId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn display_is_eui48_format() {
        assert_eq!(DeviceId::new(1).to_string(), "00:00:00:00:00:01");
        assert_eq!(
            DeviceId::new(0x0a1b_2c3d_4e5f).to_string(),
            "0a:1b:2c:3d:4e:5f"
        );
    }

    #[test]
    fn new_truncates_to_48_bits() {
        let id = DeviceId::new(0xdead_0000_0000_0007);
        assert_eq!(id.as_u64(), 7);
    }

    #[test]
    fn parses_colon_and_dash_forms() {
        let Ok(a) = "0a:1b:2c:3d:4e:5f".parse::<DeviceId>() else {
            panic!("colon form should parse");
        };
        let Ok(b) = "0A-1B-2C-3D-4E-5F".parse::<DeviceId>() else {
            panic!("dash form should parse");
        };
        assert_eq!(a, b);
        assert_eq!(a.as_u64(), 0x0a1b_2c3d_4e5f);
    }

    #[test]
    fn display_parse_round_trip() {
        let id = DeviceId::new(0x00_00_5e_00_53_01);
        let parsed: Result<DeviceId, _> = id.to_string().parse();
        assert!(matches!(parsed, Ok(p) if p == id));
    }

    #[test]
    fn rejects_malformed_strings() {
        for bad in [
            "",
            "00:00:00:00:00",
            "00:00:00:00:00:00:00",
            "0:00:00:00:00:00",
            "zz:00:00:00:00:00",
            "+f:00:00:00:00:00",
        ] {
            let result = bad.parse::<DeviceId>();
            assert!(
                matches!(result, Err(PublisherError::InvalidDeviceId(ref s)) if s == bad),
                "expected rejection of {bad:?}"
            );
        }
    }

    #[test]
    fn orders_by_raw_value() {
        let mut ids: Vec<DeviceId> = [3u64, 1, 2].into_iter().map(DeviceId::from).collect();
        ids.sort();
        assert_eq!(ids, vec![DeviceId::new(1), DeviceId::new(2), DeviceId::new(3)]);
    }
}
