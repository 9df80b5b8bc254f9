//! Bots, their card decks, and the controllers that own them.

use hecs::Entity;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::common::{Direction, Position};
use super::economy::{AssetKind, ResourceLedger};

/// Stable identifier of a controller, assigned at setup. Ids survive
/// eliminations; the controller list does not, so lookups go by id.
pub type ControllerId = usize;

/// The three verbs a card can encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Move,
    Harvest,
    Plant,
}

impl ActionKind {
    pub fn name(self) -> &'static str {
        match self {
            ActionKind::Move => "MOVE",
            ActionKind::Harvest => "HARVEST",
            ActionKind::Plant => "PLANT",
        }
    }
}

/// One step of a bot's program. Compared and hashed by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CardSpec", into = "CardSpec")]
pub enum Card {
    Move(Direction),
    Harvest(AssetKind),
    Plant(AssetKind),
}

impl Card {
    pub fn action(&self) -> ActionKind {
        match self {
            Card::Move(_) => ActionKind::Move,
            Card::Harvest(_) => ActionKind::Harvest,
            Card::Plant(_) => ActionKind::Plant,
        }
    }
}

/// Wire shape of a card: `{ action_type, parameter }`. `type` is accepted
/// as an alias for `action_type` on input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CardSpec {
    #[serde(alias = "type")]
    pub action_type: ActionKind,
    pub parameter: CardParam,
}

/// Card parameter: a direction for MOVE, an asset kind for HARVEST/PLANT.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardParam {
    Direction(Direction),
    Asset(AssetKind),
}

impl From<Card> for CardSpec {
    fn from(card: Card) -> Self {
        match card {
            Card::Move(dir) => CardSpec {
                action_type: ActionKind::Move,
                parameter: CardParam::Direction(dir),
            },
            Card::Harvest(kind) => CardSpec {
                action_type: ActionKind::Harvest,
                parameter: CardParam::Asset(kind),
            },
            Card::Plant(kind) => CardSpec {
                action_type: ActionKind::Plant,
                parameter: CardParam::Asset(kind),
            },
        }
    }
}

impl TryFrom<CardSpec> for Card {
    type Error = String;

    fn try_from(spec: CardSpec) -> Result<Self, Self::Error> {
        match (spec.action_type, spec.parameter) {
            (ActionKind::Move, CardParam::Direction(dir)) => Ok(Card::Move(dir)),
            (ActionKind::Harvest, CardParam::Asset(kind)) => Ok(Card::Harvest(kind)),
            (ActionKind::Plant, CardParam::Asset(kind)) => Ok(Card::Plant(kind)),
            (action, _) => Err(format!(
                "{} card carries the wrong parameter kind",
                action.name()
            )),
        }
    }
}

/// A bot's program: an ordered, cyclic queue of cards.
///
/// Execution always reads the head; afterwards the head moves to the tail,
/// whether or not the action succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    pub fn new(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card that will run on the next execution.
    pub fn head(&self) -> Option<Card> {
        self.cards.front().copied()
    }

    /// Move the head card to the tail: one rotation per executed action.
    pub fn rotate(&mut self) {
        if let Some(card) = self.cards.pop_front() {
            self.cards.push_back(card);
        }
    }

    pub fn append(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Remove the card at `index`. Callers remove in descending index order
    /// when deleting several, so earlier removals do not shift later ones.
    pub fn remove(&mut self, index: usize) -> Option<Card> {
        self.cards.remove(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied()
    }
}

/// Component carried by every bot entity, alongside its `Position`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bot {
    pub controller_id: ControllerId,
    pub deck: Deck,
}

/// A player: owns bots, banks resources, and is the unit of victory and
/// elimination.
#[derive(Debug, Clone)]
pub struct Controller {
    pub id: ControllerId,
    /// Arena handles of owned bots, in creation order.
    pub bots: Vec<Entity>,
    pub resources: ResourceLedger,
    /// Where CREATE_BOT places new bots.
    pub starting_position: Position,
}

impl Controller {
    pub fn new(id: ControllerId, starting_position: Position) -> Self {
        Self {
            id,
            bots: Vec::new(),
            resources: ResourceLedger::default(),
            starting_position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_rotation_is_cyclic() {
        let cards = vec![
            Card::Move(Direction::North),
            Card::Harvest(AssetKind::Ore),
            Card::Plant(AssetKind::Plant),
        ];
        let mut deck = Deck::new(cards.clone());

        for i in 0..cards.len() {
            assert_eq!(deck.head(), Some(cards[i]));
            deck.rotate();
        }
        // Full cycle restores the original order.
        let after: Vec<Card> = deck.iter().collect();
        assert_eq!(after, cards);
    }

    #[test]
    fn test_empty_deck_rotation_is_noop() {
        let mut deck = Deck::default();
        deck.rotate();
        assert!(deck.is_empty());
        assert_eq!(deck.head(), None);
    }

    #[test]
    fn test_deck_remove_descending() {
        let mut deck = Deck::new(vec![
            Card::Move(Direction::North),
            Card::Move(Direction::South),
            Card::Move(Direction::East),
            Card::Move(Direction::West),
        ]);
        for &index in &[3usize, 1] {
            deck.remove(index);
        }
        let remaining: Vec<Card> = deck.iter().collect();
        assert_eq!(
            remaining,
            vec![Card::Move(Direction::North), Card::Move(Direction::East)]
        );
    }

    #[test]
    fn test_card_wire_form() {
        let card: Card = serde_json::from_str(r#"{"action_type":"MOVE","parameter":"NORTH"}"#)
            .expect("move card");
        assert_eq!(card, Card::Move(Direction::North));

        // Scenario files use the short "type" alias.
        let card: Card =
            serde_json::from_str(r#"{"type":"HARVEST","parameter":"ORE"}"#).expect("harvest card");
        assert_eq!(card, Card::Harvest(AssetKind::Ore));

        let json = serde_json::to_value(Card::Plant(AssetKind::Coal)).expect("serialize");
        assert_eq!(json["action_type"], "PLANT");
        assert_eq!(json["parameter"], "COAL");
    }

    #[test]
    fn test_card_rejects_mismatched_parameter() {
        // A MOVE card cannot carry an asset kind.
        let result: Result<Card, _> =
            serde_json::from_str(r#"{"action_type":"MOVE","parameter":"ORE"}"#);
        assert!(result.is_err());
        // Seedling types are not plantable parameters.
        let result: Result<Card, _> =
            serde_json::from_str(r#"{"action_type":"PLANT","parameter":"ORE_SEEDLING"}"#);
        assert!(result.is_err());
    }
}
