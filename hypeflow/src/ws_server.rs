// WebSocket market feed: ping/pong, market subscriptions, and periodic
// market_update broadcasts to subscribed clients.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures_util::stream::Stream;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{broadcast, mpsc};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use crate::config::FeedConfig;
use crate::market::MarketView;
use crate::protocol::{ClientMessage, MarketUpdate, ServerMessage};

pub const MARKET_CHANNEL: &str = "market";

/// Trend reported while listings are available.
pub const PRICE_TREND: &str = "+15.3% this month";

/// Builds the broadcast payload from the current market view.
pub fn market_update(view: &MarketView) -> MarketUpdate {
    let analysis = &view.analysis;
    MarketUpdate {
        total_listings: analysis.total_listings,
        average_price: analysis.average_price,
        price_trend: if analysis.total_listings > 0 {
            PRICE_TREND.to_string()
        } else {
            "N/A".to_string()
        },
        timestamp: Utc::now().to_rfc3339(),
    }
}

/// Reacts to one text frame from a client. Returns the direct reply, if any.
///
/// Malformed or unknown messages are logged and ignored; they never close the
/// connection.
pub fn handle_client_text(text: &str, subscribed: &mut bool) -> Option<ServerMessage> {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::Ping) => Some(ServerMessage::Pong {
            timestamp: Utc::now().to_rfc3339(),
        }),
        Ok(ClientMessage::SubscribeMarket) => {
            *subscribed = true;
            Some(ServerMessage::Subscribed {
                channel: MARKET_CHANNEL.to_string(),
            })
        }
        Err(e) => {
            debug!("Ignoring feed message {text:?}: {e}");
            None
        }
    }
}

/// Runs the market feed on `config.port`.
///
/// Accepts connections concurrently (one task each) and ticks the broadcast
/// every `broadcast_interval_secs`. Runs until the task is aborted or the
/// listener fails.
pub async fn run(config: FeedConfig, market: Arc<MarketView>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(format!("127.0.0.1:{}", config.port)).await?;
    let local_addr = listener.local_addr()?;
    info!("Market feed listening on ws://{local_addr}");

    let (updates_tx, _) = broadcast::channel::<MarketUpdate>(16);
    let mut ticker = tokio::time::interval(Duration::from_secs(config.broadcast_interval_secs));
    // The first tick fires immediately; nobody is connected yet.
    ticker.tick().await;

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, addr) = accepted?;
                let updates = updates_tx.subscribe();
                tokio::spawn(handle_connection(stream, addr.to_string(), updates));
            }
            _ = ticker.tick() => {
                let receivers = updates_tx.receiver_count();
                if receivers > 0 {
                    debug!("Broadcasting market update to {receivers} connection(s)");
                    // Only fails when every receiver has gone away.
                    let _ = updates_tx.send(market_update(&market));
                }
            }
        }
    }
}

async fn handle_connection(
    stream: TcpStream,
    addr: String,
    updates: broadcast::Receiver<MarketUpdate>,
) {
    let ws_stream = match tokio_tungstenite::accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!("WebSocket handshake failed for {addr}: {e}");
            return;
        }
    };
    info!("Feed client connected: {addr}");

    let (mut write, read) = ws_stream.split();
    let (out_tx, mut out_rx) = mpsc::channel::<ServerMessage>(32);

    let writer = async {
        while let Some(msg) = out_rx.recv().await {
            let text = match serde_json::to_string(&msg) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Failed to encode feed message: {e}");
                    continue;
                }
            };
            if let Err(e) = write.send(Message::Text(text.into())).await {
                warn!("Failed to write to {addr}: {e}");
                break;
            }
        }
    };

    let (_, _) = tokio::join!(process_message_stream(read, updates, out_tx, &addr), writer);
    info!("Feed client disconnected: {addr}");
}

/// Drives one client: answers its messages and, once it has subscribed,
/// forwards market updates. Outgoing messages go through `out`.
///
/// Returns `Err(())` if `out` is closed, signalling the caller to stop.
/// Generic over the stream type so it can be tested without opening ports.
pub async fn process_message_stream<St>(
    mut stream: St,
    mut updates: broadcast::Receiver<MarketUpdate>,
    out: mpsc::Sender<ServerMessage>,
    addr: &str,
) -> Result<(), ()>
where
    St: Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    let mut subscribed = false;
    let mut feed_open = true;

    loop {
        tokio::select! {
            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(reply) = handle_client_text(text.as_str(), &mut subscribed) {
                            out.send(reply).await.map_err(|_| ())?;
                        }
                    }
                    Some(Ok(Message::Close(_))) => {
                        info!("Client {addr} sent close frame");
                        break;
                    }
                    Some(Err(e)) => {
                        warn!("WebSocket error from {addr}: {e}");
                        break;
                    }
                    Some(Ok(_)) => {
                        // Ignore Binary, Ping, Pong, Frame variants.
                    }
                    None => break,
                }
            }

            update = updates.recv(), if feed_open => {
                match update {
                    Ok(data) if subscribed => {
                        out.send(ServerMessage::MarketUpdate { data }).await.map_err(|_| ())?;
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!("Client {addr} missed {n} market updates");
                    }
                    Err(broadcast::error::RecvError::Closed) => feed_open = false,
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;
    use tokio_tungstenite::tungstenite::Error as WsError;

    fn sample_update() -> MarketUpdate {
        MarketUpdate {
            total_listings: 8,
            average_price: 6124.38,
            price_trend: PRICE_TREND.into(),
            timestamp: "2025-01-01T00:00:00Z".into(),
        }
    }

    /// A client that sends `messages` and then stays connected.
    fn open_client(
        messages: Vec<Result<Message, WsError>>,
    ) -> impl Stream<Item = Result<Message, WsError>> + Unpin {
        stream::iter(messages).chain(stream::pending())
    }

    #[test]
    fn ping_gets_pong() {
        let mut subscribed = false;
        let reply = handle_client_text(r#"{"type":"ping"}"#, &mut subscribed);
        assert!(matches!(reply, Some(ServerMessage::Pong { .. })));
        assert!(!subscribed);
    }

    #[test]
    fn subscribe_marks_client() {
        let mut subscribed = false;
        let reply = handle_client_text(r#"{"type":"subscribe_market"}"#, &mut subscribed);
        assert_eq!(
            reply,
            Some(ServerMessage::Subscribed {
                channel: "market".into()
            })
        );
        assert!(subscribed);
    }

    #[test]
    fn garbage_is_ignored() {
        let mut subscribed = false;
        assert_eq!(handle_client_text("not json", &mut subscribed), None);
        assert_eq!(handle_client_text(r#"{"type":"dance"}"#, &mut subscribed), None);
    }

    #[test]
    fn update_reflects_market_view() {
        let update = market_update(&MarketView::fallback());
        assert_eq!(update.total_listings, 8);
        assert_eq!(update.average_price, 6124.38);
        assert_eq!(update.price_trend, PRICE_TREND);

        let mut empty = MarketView::fallback();
        empty.analysis.total_listings = 0;
        assert_eq!(market_update(&empty).price_trend, "N/A");
    }

    #[tokio::test]
    async fn ping_answered_over_stream() {
        let (_updates_tx, updates_rx) = broadcast::channel(4);
        let (out_tx, mut out_rx) = mpsc::channel(8);
        let messages = vec![Ok(Message::Text(r#"{"type":"ping"}"#.into()))];

        process_message_stream(stream::iter(messages), updates_rx, out_tx, "test")
            .await
            .unwrap();

        assert!(matches!(out_rx.recv().await, Some(ServerMessage::Pong { .. })));
        assert!(out_rx.recv().await.is_none(), "sender dropped after stream ends");
    }

    #[tokio::test]
    async fn subscribed_client_receives_updates() {
        let (updates_tx, updates_rx) = broadcast::channel(4);
        let (out_tx, mut out_rx) = mpsc::channel(8);
        let client = open_client(vec![Ok(Message::Text(
            r#"{"type":"subscribe_market"}"#.into(),
        ))]);
        let task = tokio::spawn(async move {
            process_message_stream(client, updates_rx, out_tx, "test").await
        });

        assert!(matches!(
            out_rx.recv().await,
            Some(ServerMessage::Subscribed { .. })
        ));
        updates_tx.send(sample_update()).unwrap();
        assert_eq!(
            out_rx.recv().await,
            Some(ServerMessage::MarketUpdate {
                data: sample_update()
            })
        );
        task.abort();
    }

    #[tokio::test]
    async fn unsubscribed_client_gets_no_updates() {
        let (updates_tx, updates_rx) = broadcast::channel(4);
        let (out_tx, mut out_rx) = mpsc::channel(8);
        let client = open_client(vec![Ok(Message::Text(r#"{"type":"ping"}"#.into()))]);
        let task = tokio::spawn(async move {
            process_message_stream(client, updates_rx, out_tx, "test").await
        });

        assert!(matches!(out_rx.recv().await, Some(ServerMessage::Pong { .. })));
        updates_tx.send(sample_update()).unwrap();
        let next = tokio::time::timeout(Duration::from_millis(50), out_rx.recv()).await;
        assert!(next.is_err(), "no update expected, got {next:?}");
        task.abort();
    }

    #[tokio::test]
    async fn close_frame_stops_processing() {
        let (_updates_tx, updates_rx) = broadcast::channel(4);
        let (out_tx, mut out_rx) = mpsc::channel(8);
        let messages = vec![
            Ok(Message::Close(None)),
            Ok(Message::Text(r#"{"type":"ping"}"#.into())),
        ];

        process_message_stream(stream::iter(messages), updates_rx, out_tx, "test")
            .await
            .unwrap();
        assert!(out_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn error_stops_processing() {
        let (_updates_tx, updates_rx) = broadcast::channel(4);
        let (out_tx, mut out_rx) = mpsc::channel(8);
        let messages = vec![
            Err(WsError::ConnectionClosed),
            Ok(Message::Text(r#"{"type":"ping"}"#.into())),
        ];

        process_message_stream(stream::iter(messages), updates_rx, out_tx, "test")
            .await
            .unwrap();
        assert!(out_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn returns_err_when_output_closed() {
        let (_updates_tx, updates_rx) = broadcast::channel(4);
        let (out_tx, out_rx) = mpsc::channel(8);
        drop(out_rx);
        let messages = vec![Ok(Message::Text(r#"{"type":"ping"}"#.into()))];

        let result =
            process_message_stream(stream::iter(messages), updates_rx, out_tx, "test").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn closed_feed_keeps_serving_requests() {
        let (updates_tx, updates_rx) = broadcast::channel::<MarketUpdate>(4);
        drop(updates_tx);
        let (out_tx, mut out_rx) = mpsc::channel(8);
        let messages = vec![
            Ok(Message::Binary(vec![1, 2, 3].into())),
            Ok(Message::Text(r#"{"type":"ping"}"#.into())),
        ];

        process_message_stream(stream::iter(messages), updates_rx, out_tx, "test")
            .await
            .unwrap();
        assert!(matches!(out_rx.recv().await, Some(ServerMessage::Pong { .. })));
    }
}
