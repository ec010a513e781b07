//! WebSocket connection state machine.
//!
//! Runs the handshake and publish loop for a single WebSocket connection.
//! The loop only ends on cancellation or a failed send.

use std::fmt;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use tokio_util::sync::CancellationToken;

use crate::config::PublishSettings;
use crate::domain::EventStream;
use crate::error::PublisherError;
use crate::wire::encode_event;

/// Frames between two progress log lines.
pub const PROGRESS_LOG_EVERY: u64 = 100;

/// Lifecycle of one connection. `Streaming` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Accepted, waiting for the handshake (if the variant needs one).
    Idle,
    /// Publishing frames.
    Streaming,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Streaming => f.write_str("streaming"),
        }
    }
}

/// Runs one connection to completion.
///
/// Returns the number of frames sent once `token` is cancelled.
///
/// # Errors
///
/// Returns a connection-level [`PublisherError`] if the peer goes away
/// before the handshake or a frame cannot be sent.
pub async fn run_connection(
    socket: WebSocket,
    settings: PublishSettings,
    token: CancellationToken,
) -> Result<u64, PublisherError> {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut state = ConnectionState::Idle;
    tracing::debug!(%state, variant = %settings.variant, "ws connection accepted");

    if settings.variant.awaits_handshake() {
        tokio::select! {
            biased;
            () = token.cancelled() => return Ok(0),
            handshake = read_handshake(&mut ws_rx) => {
                let name = handshake?;
                tracing::info!(greeting = %format!("Hello {name}!"), "handshake received");
            }
        }
    }
    // Inbound traffic is ignored once streaming; a closed peer shows up as a send error.
    drop(ws_rx);

    state = ConnectionState::Streaming;
    tracing::debug!(%state, "ws connection streaming");

    publish_loop(&mut ws_tx, EventStream::new(settings.variant), &settings, &token).await
}

/// Waits for the first data message and returns its content as text.
///
/// Control frames are skipped. Binary payloads are decoded lossily; the
/// content is never validated.
///
/// # Errors
///
/// Returns [`PublisherError::ConnectionClosed`] if the stream ends or a
/// close frame arrives first, and [`PublisherError::Receive`] on a
/// transport error.
pub async fn read_handshake<S>(rx: &mut S) -> Result<String, PublisherError>
where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
{
    loop {
        match rx.next().await {
            Some(Ok(Message::Text(text))) => return Ok(text.as_str().to_owned()),
            Some(Ok(Message::Binary(data))) => {
                return Ok(String::from_utf8_lossy(&data).into_owned());
            }
            Some(Ok(Message::Close(_))) | None => return Err(PublisherError::ConnectionClosed),
            Some(Ok(_)) => {}
            Some(Err(e)) => return Err(PublisherError::Receive(e.to_string())),
        }
    }
}

/// Encodes and sends every event of `events`, sleeping `settings.interval`
/// after each frame.
///
/// Returns the number of frames sent when `token` is cancelled. A frame is
/// counted as soon as the sink has queued it (`feed`), before the flush;
/// a frame queued just before cancellation may still be in flight when the
/// loop returns, but is never left uncounted.
///
/// # Errors
///
/// Returns [`PublisherError::Send`] as soon as the sink rejects a frame.
pub async fn publish_loop<S>(
    sink: &mut S,
    events: EventStream,
    settings: &PublishSettings,
    token: &CancellationToken,
) -> Result<u64, PublisherError>
where
    S: Sink<Message> + Unpin,
    S::Error: fmt::Display,
{
    let mut sent = 0u64;

    for event in events {
        let frame = encode_event(&event, settings.encoding);

        tokio::select! {
            biased;
            () = token.cancelled() => break,
            res = sink.feed(Message::Binary(frame.into())) => {
                res.map_err(|e| PublisherError::Send(e.to_string()))?;
            }
        }

        sent += 1;
        tracing::trace!(kind = event.kind_str(), sent, "frame queued");
        if sent % PROGRESS_LOG_EVERY == 0 {
            tracing::debug!(sent, "publish progress");
        }

        tokio::select! {
            biased;
            () = token.cancelled() => break,
            res = sink.flush() => {
                res.map_err(|e| PublisherError::Send(e.to_string()))?;
            }
        }

        tokio::select! {
            biased;
            () = token.cancelled() => break,
            () = tokio::time::sleep(settings.interval) => {}
        }
    }

    Ok(sent)
}
