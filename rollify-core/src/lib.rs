//! Core logic for the Rollify dice-roller page glue.
//!
//! Everything here is pure and target-independent: the browser document
//! is reached only through the [`View`] port, so the behaviors can be
//! exercised in plain tests with an in-memory fake.

use serde::{Deserialize, Serialize};

mod event;
mod timefmt;
mod view;

pub use event::PushEvent;
pub use timefmt::{format_absolute, format_relative, parse_unix_ts};
pub use view::{
    apply_push_event, apply_swap_completed, next_badge_count, render_timestamps,
    reset_dice_selectors, View, BADGE_VISIBLE_DISPLAY,
};

/// Markers tying the behaviors to the server-rendered markup, plus the
/// refresh period for relative-time labels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GlueConfig {
    /// Class carried by every dice-selector control.
    pub dice_selector_class: String,
    /// Id of the singleton notification badge.
    pub badge_id: String,
    /// Class carried by every relative-time element.
    pub timestamp_class: String,
    /// Attribute holding the Unix timestamp (integer seconds).
    pub timestamp_attr: String,
    /// Attribute receiving the formatted absolute time.
    pub tooltip_attr: String,
    /// Id of the dice-roll history rows swapped in by partial updates.
    pub history_row_id: String,
    /// Period of the relative-time refresh timer.
    pub refresh_interval_ms: u32,
}

impl Default for GlueConfig {
    fn default() -> Self {
        Self {
            dice_selector_class: "diceRollerSelector".to_string(),
            badge_id: "notification-badge".to_string(),
            timestamp_class: "timestamp-ago".to_string(),
            timestamp_attr: "unix-ts".to_string(),
            tooltip_attr: "title".to_string(),
            history_row_id: "history-dice-roll-row".to_string(),
            refresh_interval_ms: 60_000,
        }
    }
}

/// Errors surfaced by the fallible edges of the glue.
#[derive(Debug, thiserror::Error)]
pub enum GlueError {
    #[error("invalid unix timestamp: {0:?}")]
    InvalidTimestamp(String),
    #[error("timestamp out of range: {0}")]
    TimestampOutOfRange(i64),
}
