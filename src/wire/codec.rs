//! Frame encode/decode for each record type.
//!
//! One fixed encode function per record type, plus the matching decoders
//! used by clients and tests. Encoding cannot fail for in-memory values.

use std::fmt;
use std::str::FromStr;

use prost::Message;
use serde::Serialize;

use super::{EpochStep, Person};
use crate::domain::{ContactRecord, PublishedEvent, TopologyStep};
use crate::error::PublisherError;

/// How a message is laid out inside one WebSocket frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameEncoding {
    /// The bare message; the WebSocket frame is the delimiter.
    #[default]
    Raw,
    /// The message prefixed with its varint-encoded length.
    LengthDelimited,
}

impl FrameEncoding {
    /// Returns the canonical name of the encoding.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::LengthDelimited => "length_delimited",
        }
    }

    fn encode<M: Message>(self, message: &M) -> Vec<u8> {
        match self {
            Self::Raw => message.encode_to_vec(),
            Self::LengthDelimited => message.encode_length_delimited_to_vec(),
        }
    }

    fn decode<M: Message + Default>(self, frame: &[u8]) -> Result<M, PublisherError> {
        let message = match self {
            Self::Raw => M::decode(frame)?,
            Self::LengthDelimited => M::decode_length_delimited(frame)?,
        };
        Ok(message)
    }
}

impl fmt::Display for FrameEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameEncoding {
    type Err = PublisherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "raw" => Ok(Self::Raw),
            "length_delimited" => Ok(Self::LengthDelimited),
            _ => Err(PublisherError::InvalidEncoding(s.to_string())),
        }
    }
}

/// Encodes a contact record as a `tutorial.Person` frame.
#[must_use]
pub fn encode_contact(record: &ContactRecord, encoding: FrameEncoding) -> Vec<u8> {
    encoding.encode(&Person::from(record))
}

/// Encodes a topology step as an `epoch.EpochStep` frame.
#[must_use]
pub fn encode_topology(step: &TopologyStep, encoding: FrameEncoding) -> Vec<u8> {
    encoding.encode(&EpochStep::from(step))
}

/// Encodes any published event with the encoder for its record type.
#[must_use]
pub fn encode_event(event: &PublishedEvent, encoding: FrameEncoding) -> Vec<u8> {
    match event {
        PublishedEvent::Contact(record) => encode_contact(record, encoding),
        PublishedEvent::Topology(step) => encode_topology(step, encoding),
    }
}

/// Decodes a `tutorial.Person` frame.
///
/// # Errors
///
/// Returns [`PublisherError::Decode`] if the bytes are not a valid message.
pub fn decode_contact(
    frame: &[u8],
    encoding: FrameEncoding,
) -> Result<ContactRecord, PublisherError> {
    let person: Person = encoding.decode(frame)?;
    Ok(person.into())
}

/// Decodes an `epoch.EpochStep` frame into a topology step.
///
/// # Errors
///
/// Returns [`PublisherError::Decode`] if the bytes are not a valid message,
/// or [`PublisherError::UnsupportedStep`] if the step is neither a device
/// join nor a single-sender summary.
pub fn decode_topology(
    frame: &[u8],
    encoding: FrameEncoding,
) -> Result<TopologyStep, PublisherError> {
    let step: EpochStep = encoding.decode(frame)?;
    TopologyStep::try_from(step)
}
