//! WebSocket layer: upgrade handling and the per-connection publish loop.
//!
//! Every path except `/health` upgrades to a WebSocket that streams binary
//! protobuf frames until the client disconnects or the server shuts down.

pub mod connection;
pub mod handler;
