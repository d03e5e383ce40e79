// Message types passed between the TUI, the app loop, and market feed
// clients.

use crate::cards::Portfolio;
use crate::market::MarketView;
use crate::session::SessionState;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TabId {
    #[default]
    Grader,
    Market,
    Oracle,
    Portfolio,
}

impl TabId {
    pub const ALL: [TabId; 4] = [TabId::Grader, TabId::Market, TabId::Oracle, TabId::Portfolio];

    pub fn label(self) -> &'static str {
        match self {
            TabId::Grader => "AI Grader",
            TabId::Market => "Market",
            TabId::Oracle => "Oracle",
            TabId::Portfolio => "Portfolio",
        }
    }

    /// Tab bound to a number key, `'1'..='4'`.
    pub fn from_digit(c: char) -> Option<TabId> {
        let idx = c.to_digit(10)?.checked_sub(1)? as usize;
        TabId::ALL.get(idx).copied()
    }

    pub fn next(self) -> TabId {
        let idx = TabId::ALL.iter().position(|t| *t == self).unwrap_or(0);
        TabId::ALL[(idx + 1) % TabId::ALL.len()]
    }
}

// ---------------------------------------------------------------------------
// TUI <-> app loop
// ---------------------------------------------------------------------------

/// Commands sent from the TUI to the app loop.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    SwitchTab(TabId),
    StartGrading,
    StartScan,
    SendMessage(String),
    ToggleFavorite(String),
    Quit,
}

/// Updates pushed from the app loop to the TUI.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    Session(Box<SessionState>),
    Market(Box<MarketView>),
    Portfolio(Box<Portfolio>),
}

// ---------------------------------------------------------------------------
// Market feed wire messages
// ---------------------------------------------------------------------------

/// Messages a feed client may send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Ping,
    SubscribeMarket,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketUpdate {
    pub total_listings: u32,
    pub average_price: f64,
    pub price_trend: String,
    pub timestamp: String,
}

/// Messages the feed sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Pong { timestamp: String },
    Subscribed { channel: String },
    MarketUpdate { data: MarketUpdate },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_map_to_tabs() {
        assert_eq!(TabId::from_digit('1'), Some(TabId::Grader));
        assert_eq!(TabId::from_digit('4'), Some(TabId::Portfolio));
        assert_eq!(TabId::from_digit('0'), None);
        assert_eq!(TabId::from_digit('5'), None);
        assert_eq!(TabId::from_digit('x'), None);
    }

    #[test]
    fn next_wraps_around() {
        assert_eq!(TabId::Portfolio.next(), TabId::Grader);
        assert_eq!(TabId::Grader.next(), TabId::Market);
    }

    #[test]
    fn client_messages_parse_from_type_tag() {
        let ping: ClientMessage = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();
        assert_eq!(ping, ClientMessage::Ping);
        let sub: ClientMessage = serde_json::from_str(r#"{"type":"subscribe_market"}"#).unwrap();
        assert_eq!(sub, ClientMessage::SubscribeMarket);
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"dance"}"#).is_err());
    }

    #[test]
    fn server_messages_serialize_flat() {
        let json = serde_json::to_value(ServerMessage::Subscribed {
            channel: "market".into(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"type": "subscribed", "channel": "market"}));

        let update = ServerMessage::MarketUpdate {
            data: MarketUpdate {
                total_listings: 8,
                average_price: 6124.38,
                price_trend: "+2.3%".into(),
                timestamp: "t".into(),
            },
        };
        let json = serde_json::to_value(update).unwrap();
        assert_eq!(json["type"], "market_update");
        assert_eq!(json["data"]["total_listings"], 8);
    }
}
