// Library root: exposes every module so the binary and the integration
// tests share one implementation.

pub mod app;
pub mod cards;
pub mod config;
pub mod http_server;
pub mod market;
pub mod oracle;
pub mod protocol;
pub mod session;
pub mod simulate;
pub mod tui;
pub mod ws_server;
