// Session state for the four views, changed only through `SessionState::reduce`.
//
// Everything here is plain data (serializable, no handles or channels) so the
// app loop can snapshot it to the TUI and tests can assert on it directly.

use crate::cards::{ChatMessage, Listing, Sender};
use crate::protocol::TabId;
use crate::simulate::GradeResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScanStatus {
    #[default]
    Idle,
    Scanning,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScanState {
    pub status: ScanStatus,
    pub progress: u8,
    pub results: Vec<Listing>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GradingStatus {
    #[default]
    Idle,
    Analyzing,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GradingState {
    pub status: GradingStatus,
    pub result: Option<GradeResult>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub active_tab: TabId,
    /// Insertion-ordered chat log.
    pub chat: Vec<ChatMessage>,
    pub next_message_id: u64,
    pub oracle_typing: bool,
    /// Ids of favorited portfolio cards.
    pub favorites: BTreeSet<String>,
    pub scan: ScanState,
    pub grading: GradingState,
}

/// Everything that can change the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SwitchTab(TabId),
    UserMessage { text: String, at: DateTime<Utc> },
    OracleReply { text: String, at: DateTime<Utc> },
    ToggleFavorite(String),
    ScanStarted,
    ScanProgress(u8),
    ScanCompleted(Vec<Listing>),
    GradingStarted,
    GradingCompleted(GradeResult),
}

impl SessionState {
    pub fn is_scanning(&self) -> bool {
        self.scan.status == ScanStatus::Scanning
    }

    pub fn is_grading(&self) -> bool {
        self.grading.status == GradingStatus::Analyzing
    }

    pub fn is_favorite(&self, card_id: &str) -> bool {
        self.favorites.contains(card_id)
    }

    /// Applies `action`. Returns whether anything changed.
    ///
    /// Events that arrive out of turn (progress with no scan running, a
    /// reply nobody is waiting for) are dropped.
    pub fn reduce(&mut self, action: Action) -> bool {
        match action {
            Action::SwitchTab(tab) => {
                let changed = self.active_tab != tab;
                self.active_tab = tab;
                changed
            }
            Action::UserMessage { text, at } => {
                self.push_message(text, Sender::User, at);
                self.oracle_typing = true;
                true
            }
            Action::OracleReply { text, at } => {
                if !self.oracle_typing {
                    return false;
                }
                self.push_message(text, Sender::Oracle, at);
                self.oracle_typing = false;
                true
            }
            Action::ToggleFavorite(id) => {
                if !self.favorites.remove(&id) {
                    self.favorites.insert(id);
                }
                true
            }
            Action::ScanStarted => {
                if self.is_scanning() {
                    return false;
                }
                self.scan = ScanState {
                    status: ScanStatus::Scanning,
                    progress: 0,
                    results: Vec::new(),
                };
                true
            }
            Action::ScanProgress(p) => {
                if !self.is_scanning() || p < self.scan.progress {
                    return false;
                }
                self.scan.progress = p.min(100);
                true
            }
            Action::ScanCompleted(results) => {
                if !self.is_scanning() {
                    return false;
                }
                self.scan.status = ScanStatus::Complete;
                self.scan.progress = 100;
                self.scan.results = results;
                true
            }
            Action::GradingStarted => {
                if self.is_grading() {
                    return false;
                }
                self.grading = GradingState {
                    status: GradingStatus::Analyzing,
                    result: None,
                };
                true
            }
            Action::GradingCompleted(result) => {
                if !self.is_grading() {
                    return false;
                }
                self.grading = GradingState {
                    status: GradingStatus::Complete,
                    result: Some(result),
                };
                true
            }
        }
    }

    fn push_message(&mut self, text: String, sender: Sender, at: DateTime<Utc>) {
        self.chat.push(ChatMessage {
            id: self.next_message_id,
            text,
            sender,
            timestamp: at,
        });
        self.next_message_id += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulate::grader::showcase_result;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn chat_is_ordered_with_monotonic_ids() {
        let mut s = SessionState::default();
        s.reduce(Action::UserMessage { text: "hi".into(), at: now() });
        assert!(s.oracle_typing);
        s.reduce(Action::OracleReply { text: "hello".into(), at: now() });
        assert!(!s.oracle_typing);
        s.reduce(Action::UserMessage { text: "again".into(), at: now() });

        let ids: Vec<u64> = s.chat.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(s.chat[1].sender, Sender::Oracle);
        assert_eq!(s.chat[2].text, "again");
    }

    #[test]
    fn unexpected_reply_is_dropped() {
        let mut s = SessionState::default();
        assert!(!s.reduce(Action::OracleReply { text: "stray".into(), at: now() }));
        assert!(s.chat.is_empty());
    }

    #[test]
    fn favorites_toggle() {
        let mut s = SessionState::default();
        s.reduce(Action::ToggleFavorite("1".into()));
        assert!(s.is_favorite("1"));
        s.reduce(Action::ToggleFavorite("2".into()));
        s.reduce(Action::ToggleFavorite("1".into()));
        assert!(!s.is_favorite("1"));
        assert!(s.is_favorite("2"));
    }

    #[test]
    fn scan_lifecycle() {
        let mut s = SessionState::default();
        assert!(!s.reduce(Action::ScanProgress(10)), "no scan running");

        assert!(s.reduce(Action::ScanStarted));
        assert!(!s.reduce(Action::ScanStarted), "one scan at a time");
        assert!(s.reduce(Action::ScanProgress(40)));
        assert!(!s.reduce(Action::ScanProgress(30)), "progress never goes back");
        assert_eq!(s.scan.progress, 40);

        assert!(s.reduce(Action::ScanCompleted(Vec::new())));
        assert_eq!(s.scan.status, ScanStatus::Complete);
        assert_eq!(s.scan.progress, 100);

        // A new scan resets progress.
        assert!(s.reduce(Action::ScanStarted));
        assert_eq!(s.scan.progress, 0);
    }

    #[test]
    fn grading_lifecycle() {
        let mut s = SessionState::default();
        assert!(!s.reduce(Action::GradingCompleted(showcase_result())));
        assert!(s.reduce(Action::GradingStarted));
        assert!(s.is_grading());
        assert!(s.reduce(Action::GradingCompleted(showcase_result())));
        assert_eq!(s.grading.status, GradingStatus::Complete);
        assert_eq!(s.grading.result, Some(showcase_result()));
    }

    #[test]
    fn state_round_trips_through_json() {
        let mut s = SessionState::default();
        s.reduce(Action::SwitchTab(TabId::Oracle));
        s.reduce(Action::ToggleFavorite("2".into()));
        s.reduce(Action::UserMessage { text: "🃏 jordan?".into(), at: now() });
        let json = serde_json::to_string(&s).unwrap();
        let back: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
