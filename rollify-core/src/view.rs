//! The view port and the three page behaviors written against it.

use chrono::{DateTime, Utc};

use crate::timefmt::{format_absolute, format_relative, parse_unix_ts};
use crate::{GlueConfig, PushEvent};

/// `display` value that makes the notification badge visible.
pub const BADGE_VISIBLE_DISPLAY: &str = "flex";

/// Access to the page this glue mutates.
///
/// The browser document is one implementation; tests use an in-memory
/// fake. Lookups reflect the page as it is *now* — partial updates may
/// add or remove nodes between calls, which is why behaviors re-query
/// on every invocation instead of caching handles.
pub trait View {
    type Node;

    fn find_by_class(&self, class: &str) -> Vec<Self::Node>;
    fn find_by_id(&self, id: &str) -> Option<Self::Node>;

    /// Set the current value of a form control.
    fn set_value(&self, node: &Self::Node, value: &str);
    fn text(&self, node: &Self::Node) -> String;
    fn set_text(&self, node: &Self::Node, text: &str);
    fn attr(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attr(&self, node: &Self::Node, name: &str, value: &str);
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
}

/// Clear every dice-selector control back to its empty default option.
///
/// An empty match set is a no-op; the trigger (a successful roll
/// submission) lives in the server-rendered markup.
pub fn reset_dice_selectors<V: View>(view: &V, config: &GlueConfig) {
    for node in view.find_by_class(&config.dice_selector_class) {
        view.set_value(&node, "");
    }
}

/// Count shown after one more roll lands on a badge displaying `text`.
///
/// Badge text that fails to parse counts as zero, so a corrupted badge
/// restarts at 1 instead of propagating a non-numeric value.
pub fn next_badge_count(text: &str) -> u64 {
    text.trim().parse::<u64>().unwrap_or(0) + 1
}

/// React to a decoded server-push event.
///
/// Only `NewDiceRoll` touches the page: the badge counter goes up by
/// one and the badge becomes visible. A missing badge is expected
/// absence (the current page may not show one), not an error.
pub fn apply_push_event<V: View>(view: &V, config: &GlueConfig, event: &PushEvent) {
    if *event != PushEvent::NewDiceRoll {
        return;
    }

    let Some(badge) = view.find_by_id(&config.badge_id) else {
        return;
    };

    let next = next_badge_count(&view.text(&badge));
    view.set_text(&badge, &next.to_string());
    view.set_style(&badge, "display", BADGE_VISIBLE_DISPLAY);
}

/// Render every timestamp element: relative phrase as text, absolute
/// time in the tooltip attribute. Returns how many elements rendered.
///
/// Elements with a missing or unparsable timestamp attribute keep
/// their current text. Re-running with the same `now` converges.
pub fn render_timestamps<V: View>(view: &V, config: &GlueConfig, now: DateTime<Utc>) -> usize {
    let mut rendered = 0;

    for node in view.find_by_class(&config.timestamp_class) {
        let Some(raw) = view.attr(&node, &config.timestamp_attr) else {
            continue;
        };
        let Ok(ts) = parse_unix_ts(&raw) else {
            continue;
        };

        view.set_text(&node, &format_relative(ts, now));
        view.set_attr(&node, &config.tooltip_attr, &format_absolute(ts));
        rendered += 1;
    }

    rendered
}

/// React to a completed partial update.
///
/// Swapped-in history rows carry fresh timestamp elements that have
/// never been rendered; anything else swapped on the page is none of
/// our business. Returns how many timestamp elements rendered.
pub fn apply_swap_completed<V: View>(
    view: &V,
    config: &GlueConfig,
    swapped_id: Option<&str>,
    now: DateTime<Utc>,
) -> usize {
    if swapped_id != Some(config.history_row_id.as_str()) {
        return 0;
    }

    render_timestamps(view, config, now)
}
