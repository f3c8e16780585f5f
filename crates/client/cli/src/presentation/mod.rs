//! Terminal presentation components used by the CLI client.
pub mod messages;
pub mod terminal;
pub mod theme;
pub mod ui;
pub mod widgets;

pub use messages::MessageLog;
