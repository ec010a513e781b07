//! Domain layer: typed event records, device identity, and the event
//! sequences each stream variant produces.
//!
//! Nothing here knows about the wire format; see [`crate::wire`] for the
//! protobuf mapping.

pub mod contact;
pub mod device_id;
pub mod event_stream;
pub mod topology;
pub mod variant;

pub use contact::{ContactRecord, PhoneEntry};
pub use device_id::DeviceId;
pub use event_stream::{EventStream, PublishedEvent};
pub use topology::{CommEntry, TopologyStep};
pub use variant::StreamVariant;
