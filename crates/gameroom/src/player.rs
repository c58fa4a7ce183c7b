use melee_cards::Card;
use melee_core::CardId;
use melee_core::Pid;
use serde::Deserialize;
use serde::Serialize;

/// A player's record within one room.
///
/// Created on first join and never deleted; only the session binding
/// (a hosting concern) comes and goes. The hand is an unordered set of
/// identified cards kept sorted by face for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pid: Pid,
    pub name: String,
    pub hand: Vec<Card>,
    pub archive: Vec<ArchiveEntry>,
}

/// Append-only record of a combination this player committed to a
/// resolved round. Informational only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveEntry {
    pub round_no: u64,
    pub label: String,
    pub cards: Vec<Card>,
    pub won: bool,
}

impl Player {
    pub fn new(pid: Pid, name: String) -> Self {
        Self {
            pid,
            name,
            hand: Vec::new(),
            archive: Vec::new(),
        }
    }
    /// Cards matching the given ids, in the order requested.
    /// `None` if any id is not held.
    pub fn select(&self, ids: &[CardId]) -> Option<Vec<Card>> {
        ids.iter()
            .map(|id| self.hand.iter().find(|c| c.id == *id).copied())
            .collect()
    }
    /// Removes the given ids from the hand, returning how many left.
    pub fn discard(&mut self, ids: &std::collections::BTreeSet<CardId>) -> usize {
        let before = self.hand.len();
        self.hand.retain(|c| !ids.contains(&c.id));
        before - self.hand.len()
    }
    /// Appends cards and re-sorts the hand by face for stable display.
    pub fn receive(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.hand.extend(cards);
        self.hand
            .sort_unstable_by_key(|c| (c.face.rank, c.face.suit, c.id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use melee_cards::Face;

    fn card(id: u64, s: &str) -> Card {
        Card::new(id, Face::try_from(s).unwrap())
    }

    #[test]
    fn select_preserves_request_order() {
        let mut player = Player::new("p".into(), "P".into());
        player.receive([card(1, "A♠"), card(2, "2♥"), card(3, "K♦")]);
        let picked = player.select(&[3, 1]).unwrap();
        assert_eq!(picked[0].id, 3);
        assert_eq!(picked[1].id, 1);
        assert!(player.select(&[4]).is_none());
    }

    #[test]
    fn discard_counts_removals() {
        let mut player = Player::new("p".into(), "P".into());
        player.receive([card(1, "A♠"), card(2, "2♥")]);
        let ids = std::collections::BTreeSet::from([1, 9]);
        assert_eq!(player.discard(&ids), 1);
        assert_eq!(player.hand.len(), 1);
    }

    #[test]
    fn hand_sorts_by_face() {
        let mut player = Player::new("p".into(), "P".into());
        player.receive([card(1, "A♠"), card(2, "2♥")]);
        assert_eq!(player.hand[0].id, 2);
    }
}
