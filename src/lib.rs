//! # epoch-publisher
//!
//! WebSocket publisher that streams protobuf-encoded events to every
//! connecting client at a fixed interval: an address-book contact record,
//! or synthetic layer-2 "epoch" topology steps for a network visualizer.
//!
//! ## Architecture
//!
//! ```text
//! Client (WebSocket, any path)
//!     │
//!     ├── Upgrade Handler (ws/handler)      spawns one task per connection
//!     ├── Publish Loop (ws/connection)      handshake → encode → send → sleep
//!     │
//!     ├── EventStream (domain/)             typed records per stream variant
//!     └── Frame Codec (wire/)               prost messages, raw or length-delimited
//! ```
//!
//! Each connection task holds a child of the server's
//! [`tokio_util::sync::CancellationToken`], so shutdown stops every loop
//! deterministically.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod wire;
pub mod ws;
