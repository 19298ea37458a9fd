//! Typed server-push events.

/// Tag the server sends for a freshly rolled set of dice.
pub const NEW_DICE_ROLL_TAG: &str = "new_dice_roll";

/// A message from the server-push channel, decoded once at the
/// boundary so handlers match on a variant instead of a raw string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushEvent {
    NewDiceRoll,
    /// Any tag this page does not react to.
    Other(String),
}

impl PushEvent {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            NEW_DICE_ROLL_TAG => Self::NewDiceRoll,
            other => Self::Other(other.to_string()),
        }
    }
}
