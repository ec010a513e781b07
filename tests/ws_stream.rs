//! End-to-end tests: real listener, real WebSocket client.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tokio_util::sync::CancellationToken;

use epoch_publisher::api;
use epoch_publisher::app_state::AppState;
use epoch_publisher::config::PublishSettings;
use epoch_publisher::domain::{ContactRecord, DeviceId, StreamVariant, TopologyStep};
use epoch_publisher::wire::{FrameEncoding, decode_contact, decode_topology};

type Client = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

const FRAME_TIMEOUT: Duration = Duration::from_secs(5);

fn settings(variant: StreamVariant, encoding: FrameEncoding) -> PublishSettings {
    PublishSettings {
        variant,
        interval: Duration::from_millis(2),
        encoding,
    }
}

async fn spawn_server(settings: PublishSettings) -> (SocketAddr, CancellationToken) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = AppState::new(settings);
    let token = state.shutdown.clone();
    let app = api::build_router().with_state(state);
    let serve_token = token.clone();
    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(serve_token.cancelled_owned())
            .await
            .unwrap();
    });
    (addr, token)
}

async fn connect(addr: SocketAddr, path: &str) -> Client {
    let (ws, _) = connect_async(format!("ws://{addr}{path}")).await.unwrap();
    ws
}

async fn next_binary(ws: &mut Client) -> Vec<u8> {
    loop {
        let msg = timeout(FRAME_TIMEOUT, ws.next())
            .await
            .expect("frame within timeout")
            .expect("stream still open")
            .expect("valid websocket message");
        if let Message::Binary(data) = msg {
            return data.to_vec();
        }
    }
}

#[tokio::test]
async fn epoch_cycle_streams_join_then_cycling_summaries() {
    let (addr, token) = spawn_server(settings(StreamVariant::EpochCycle, FrameEncoding::Raw)).await;
    let mut ws = connect(addr, "/ignored/path").await;

    let first = next_binary(&mut ws).await;
    let TopologyStep::DeviceJoin { devices } = decode_topology(&first, FrameEncoding::Raw).unwrap()
    else {
        panic!("first frame should be a device join");
    };
    assert_eq!(devices, (0..=19).map(DeviceId::new).collect::<Vec<_>>());

    for i in 0..40u64 {
        let frame = next_binary(&mut ws).await;
        let TopologyStep::CommSummary { sender, entries } =
            decode_topology(&frame, FrameEncoding::Raw).unwrap()
        else {
            panic!("frame {i} should be a comm summary");
        };
        assert_eq!(sender.as_u64(), i % 19);
        assert_eq!(entries.len(), 1);
        let entry = entries.first().unwrap();
        assert_eq!(entry.destination, DeviceId::new(1));
        assert_eq!(entry.address, 1);
    }

    token.cancel();
}

#[tokio::test]
async fn contact_variant_waits_for_handshake() {
    let (addr, token) = spawn_server(settings(StreamVariant::EpochCycle, FrameEncoding::Raw)).await;
    let mut ws = connect(addr, "/?variant=contact").await;

    let early = timeout(Duration::from_millis(150), ws.next()).await;
    assert!(early.is_err(), "no frame may arrive before the handshake");

    ws.send(Message::text("Alice")).await.unwrap();

    for _ in 0..3 {
        let frame = next_binary(&mut ws).await;
        let record = decode_contact(&frame, FrameEncoding::Raw).unwrap();
        assert_eq!(record, ContactRecord::sample());
        assert_eq!(record.id, 9999);
        assert_eq!(record.phones.len(), 1);
    }

    token.cancel();
}

#[tokio::test]
async fn epoch_fixed_with_length_delimited_frames() {
    let (addr, token) =
        spawn_server(settings(StreamVariant::EpochFixed, FrameEncoding::LengthDelimited)).await;
    let mut ws = connect(addr, "/").await;

    let first = next_binary(&mut ws).await;
    assert!(matches!(
        decode_topology(&first, FrameEncoding::LengthDelimited),
        Ok(TopologyStep::DeviceJoin { .. })
    ));

    for _ in 0..5 {
        let frame = next_binary(&mut ws).await;
        let step = decode_topology(&frame, FrameEncoding::LengthDelimited).unwrap();
        assert!(matches!(step, TopologyStep::CommSummary { sender, .. } if sender.as_u64() == 0));
    }

    token.cancel();
}

#[tokio::test]
async fn unknown_variant_is_rejected_before_upgrade() {
    let (addr, token) = spawn_server(settings(StreamVariant::EpochCycle, FrameEncoding::Raw)).await;

    let result = connect_async(format!("ws://{addr}/?variant=broadcast")).await;
    let Err(tungstenite::Error::Http(response)) = result else {
        panic!("upgrade should be refused");
    };
    assert_eq!(response.status().as_u16(), 400);

    token.cancel();
}

#[tokio::test]
async fn shutdown_ends_open_streams() {
    let (addr, token) = spawn_server(settings(StreamVariant::EpochCycle, FrameEncoding::Raw)).await;
    let mut ws = connect(addr, "/").await;
    let _ = next_binary(&mut ws).await;

    token.cancel();

    let ended = timeout(FRAME_TIMEOUT, async {
        loop {
            match ws.next().await {
                Some(Ok(Message::Binary(_))) => {}
                _ => break,
            }
        }
    })
    .await;
    assert!(ended.is_ok(), "stream should end after shutdown");
}

#[tokio::test]
async fn health_reports_defaults() {
    let (addr, token) = spawn_server(settings(StreamVariant::Contact, FrameEncoding::Raw)).await;

    let body: serde_json::Value = reqwest::get(format!("http://{addr}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["variant"], "contact");
    assert_eq!(body["encoding"], "raw");
    assert_eq!(body["interval_ms"], 2);

    token.cancel();
}
