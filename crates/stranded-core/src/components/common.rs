//! Common spatial types shared across the simulation.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Integer grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add<(i32, i32)> for Position {
    type Output = Self;
    fn add(self, (dx, dy): (i32, i32)) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A compass direction a MOVE card can name.
///
/// `Random` resolves to one of the four cardinals when the card is
/// executed, not when it is written into a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Random,
}

impl Direction {
    pub const CARDINALS: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Resolve `Random` to a uniformly chosen cardinal; cardinals pass
    /// through unchanged.
    pub fn resolve(self, rng: &mut impl Rng) -> Direction {
        match self {
            Direction::Random => Self::CARDINALS[rng.gen_range(0..4)],
            d => d,
        }
    }

    /// Grid offset of a cardinal. North decreases `y`.
    /// `Random` must be resolved before asking for an offset.
    pub fn vector(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Random => (0, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_position_add_vector() {
        let pos = Position::new(2, 2);
        assert_eq!(pos + Direction::North.vector(), Position::new(2, 1));
        assert_eq!(pos + Direction::South.vector(), Position::new(2, 3));
        assert_eq!(pos + Direction::East.vector(), Position::new(3, 2));
        assert_eq!(pos + Direction::West.vector(), Position::new(1, 2));
    }

    #[test]
    fn test_cardinal_resolves_to_itself() {
        let mut rng = StdRng::seed_from_u64(1);
        for dir in Direction::CARDINALS {
            assert_eq!(dir.resolve(&mut rng), dir);
        }
    }

    #[test]
    fn test_random_resolves_to_a_cardinal() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let dir = Direction::Random.resolve(&mut rng);
            assert!(Direction::CARDINALS.contains(&dir));
        }
    }
}
