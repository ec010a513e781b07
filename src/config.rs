//! Publisher configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). Unset or unparsable numeric values fall back to defaults;
//! an unparsable address, variant, or encoding is a startup error.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use crate::domain::StreamVariant;
use crate::error::PublisherError;
use crate::wire::FrameEncoding;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8088;

/// Default delay between frames, in milliseconds.
pub const DEFAULT_INTERVAL_MS: u64 = 50;

/// Per-connection publishing settings.
///
/// Copied into every connection task at upgrade time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishSettings {
    /// Event sequence to stream.
    pub variant: StreamVariant,
    /// Delay between consecutive frames.
    pub interval: Duration,
    /// Frame layout.
    pub encoding: FrameEncoding,
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            variant: StreamVariant::default(),
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            encoding: FrameEncoding::default(),
        }
    }
}

/// Top-level publisher configuration.
///
/// Loaded once at startup via [`PublisherConfig::from_env`].
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// Socket address to bind to (loopback `8088` by default).
    pub listen_addr: SocketAddr,

    /// Defaults applied to every connection.
    pub publish: PublishSettings,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            publish: PublishSettings::default(),
        }
    }
}

impl PublisherConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// See [`PublisherConfig::from_lookup`].
    pub fn from_env() -> Result<Self, PublisherError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from a key lookup, applying defaults for
    /// missing keys.
    ///
    /// # Errors
    ///
    /// Returns [`PublisherError::Config`] if `LISTEN_ADDR` is not a valid
    /// [`SocketAddr`], and the parse error of `STREAM_VARIANT` or
    /// `FRAME_ENCODING` when those are set to unknown names.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, PublisherError> {
        let defaults = Self::default();

        let listen_addr = match get("LISTEN_ADDR") {
            Some(raw) => raw
                .parse()
                .map_err(|e| PublisherError::Config(format!("LISTEN_ADDR {raw:?}: {e}")))?,
            None => defaults.listen_addr,
        };

        let variant = match get("STREAM_VARIANT") {
            Some(raw) => raw.parse()?,
            None => defaults.publish.variant,
        };

        let encoding = match get("FRAME_ENCODING") {
            Some(raw) => raw.parse()?,
            None => defaults.publish.encoding,
        };

        let interval_ms = parse_or(get("PUBLISH_INTERVAL_MS"), DEFAULT_INTERVAL_MS);

        Ok(Self {
            listen_addr,
            publish: PublishSettings {
                variant,
                interval: Duration::from_millis(interval_ms),
                encoding,
            },
        })
    }
}

/// Parses `raw` as `T`, returning `default` on missing or invalid values.
fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
