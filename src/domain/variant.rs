//! Stream variant selection.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::PublisherError;

/// Which sequence of events a connection receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamVariant {
    /// Wait for one handshake message, then stream the fixed contact record.
    Contact,
    /// Device join, then communication summaries with a cycling sender.
    #[default]
    EpochCycle,
    /// Device join, then communication summaries with a constant sender.
    EpochFixed,
}

impl StreamVariant {
    /// All variants, in declaration order.
    pub const ALL: [Self; 3] = [Self::Contact, Self::EpochCycle, Self::EpochFixed];

    /// Returns the canonical name of the variant.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::EpochCycle => "epoch_cycle",
            Self::EpochFixed => "epoch_fixed",
        }
    }

    /// Whether the connection reads one inbound message before streaming.
    #[must_use]
    pub const fn awaits_handshake(&self) -> bool {
        matches!(self, Self::Contact)
    }
}

impl fmt::Display for StreamVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StreamVariant {
    type Err = PublisherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == normalized)
            .ok_or_else(|| PublisherError::InvalidVariant(s.to_string()))
    }
}
