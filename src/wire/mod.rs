//! Wire layer: protobuf message definitions and frame codecs.
//!
//! Messages are declared with `prost` derives so no `.proto` compilation
//! step is needed. Field tags follow the `tutorial.Person` and
//! `epoch.EpochStep` schemas the browser client decodes.

pub mod addressbook;
pub mod codec;
pub mod epoch;

pub use addressbook::{Person, PhoneNumber, PhoneType};
pub use codec::{
    FrameEncoding, decode_contact, decode_topology, encode_contact, encode_event, encode_topology,
};
pub use epoch::{AddrAssoc, ArpAssoc, DeviceComm, EpochStep, L2Summary};
