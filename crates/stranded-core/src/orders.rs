//! Typed controller orders and per-turn outcome reporting.
//!
//! Orders are the engine's input boundary. The action set is a closed
//! union; an unknown action type or a malformed parameter bag cannot reach
//! the engine, it fails at the caller's deserialization boundary.

use serde::{Deserialize, Serialize};

use crate::components::{Card, ControllerId};
use crate::error::OrderError;

/// One controller order within a turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub controller_id: ControllerId,
    #[serde(flatten)]
    pub action: OrderAction,
}

impl Order {
    pub fn new(controller_id: ControllerId, action: OrderAction) -> Self {
        Self {
            controller_id,
            action,
        }
    }
}

/// What an order asks for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    tag = "action_type",
    content = "parameters",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
pub enum OrderAction {
    /// Spend `energy_points` hours and energy letting bots act; each point
    /// executes one uniformly chosen bot's head card.
    TakeBotActions { energy_points: u32 },
    /// Edit one bot's deck for a fixed biomass price.
    ModifyDeck { bot_id: usize, edit: DeckEdit },
    /// Build a bot with an empty deck at the controller's starting position.
    CreateBot,
}

impl OrderAction {
    pub fn kind(&self) -> OrderKind {
        match self {
            OrderAction::TakeBotActions { .. } => OrderKind::TakeBotActions,
            OrderAction::ModifyDeck { .. } => OrderKind::ModifyDeck,
            OrderAction::CreateBot => OrderKind::CreateBot,
        }
    }
}

/// A deck edit: remove positions or append cards, never both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeckEdit {
    /// Deck positions to delete. Validated up front, applied in descending
    /// order so earlier removals do not shift later ones.
    Remove { removed_ids: Vec<usize> },
    /// Cards appended at the tail, in the given order.
    Append { cards: Vec<Card> },
}

/// Discriminant of an order action, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderKind {
    TakeBotActions,
    ModifyDeck,
    CreateBot,
}

impl OrderKind {
    pub fn name(self) -> &'static str {
        match self {
            OrderKind::TakeBotActions => "TAKE_BOT_ACTIONS",
            OrderKind::ModifyDeck => "MODIFY_DECK",
            OrderKind::CreateBot => "CREATE_BOT",
        }
    }
}

/// Result row for one order in a processed turn.
#[derive(Debug, Clone)]
pub struct OrderOutcome {
    pub controller_id: ControllerId,
    pub action: OrderKind,
    pub result: Result<(), OrderError>,
}

/// Everything `process_turn` reports about one invocation. Failed orders
/// abort only themselves; their rows carry the rejection.
#[derive(Debug, Clone, Default)]
pub struct TurnReport {
    pub outcomes: Vec<OrderOutcome>,
}

impl TurnReport {
    pub fn all_ok(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &OrderOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_wire_form() {
        let order: Order = serde_json::from_str(
            r#"{"controller_id":0,"action_type":"TAKE_BOT_ACTIONS","parameters":{"energy_points":2}}"#,
        )
        .expect("order");
        assert_eq!(order.controller_id, 0);
        assert_eq!(order.action.kind(), OrderKind::TakeBotActions);
    }

    #[test]
    fn test_create_bot_needs_no_parameters() {
        let order: Order =
            serde_json::from_str(r#"{"controller_id":1,"action_type":"CREATE_BOT"}"#)
                .expect("order");
        assert_eq!(order.action.kind(), OrderKind::CreateBot);
    }

    #[test]
    fn test_unknown_action_type_is_rejected() {
        let result: Result<Order, _> =
            serde_json::from_str(r#"{"controller_id":0,"action_type":"SELF_DESTRUCT"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_deck_edit_forms() {
        let edit: DeckEdit = serde_json::from_str(r#"{"removed_ids":[2,0]}"#).expect("remove");
        assert!(matches!(edit, DeckEdit::Remove { .. }));

        let edit: DeckEdit =
            serde_json::from_str(r#"{"cards":[{"action_type":"MOVE","parameter":"RANDOM"}]}"#)
                .expect("append");
        assert!(matches!(edit, DeckEdit::Append { .. }));
    }
}
