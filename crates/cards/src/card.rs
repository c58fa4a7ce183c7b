use super::face::Face;
use melee_core::CardId;
use serde::Deserialize;
use serde::Serialize;

/// An identified card instance within a room.
///
/// The id is allocated by the room's monotonic counter and is never
/// reused for the lifetime of the room, which rules out aliasing between
/// logically distinct cards that happen to share a [`Face`]. Equality
/// and ordering are by id alone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    #[serde(flatten)]
    pub face: Face,
}

impl Card {
    pub fn new(id: CardId, face: Face) -> Self {
        Self { id, face }
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for Card {}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}#{}", self.face, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::Rank;
    use crate::suit::Suit;

    #[test]
    fn identity_is_the_id() {
        let face = Face::from((Rank::King, Suit::S));
        let a = Card::new(1, face);
        let b = Card::new(2, face);
        assert_ne!(a, b);
        assert_eq!(a, Card::new(1, face));
    }
}
