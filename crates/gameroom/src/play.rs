use super::table::Table;
use melee_cards::Card;
use melee_cards::Strength;
use melee_core::CardId;
use melee_core::Millis;
use melee_core::Pid;
use melee_core::Seq;
use serde::Deserialize;
use serde::Serialize;

/// An immutable, strength-ranked submission by one player onto one table.
///
/// The strength is computed once at submission time and never
/// recomputed; `placed_seq` is the room-global monotonic counter value
/// and the deterministic tie-break key. `placed_ms` is a wall-clock hint
/// only, never used for correctness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Play {
    pub pid: Pid,
    pub table: Table,
    pub cards: Vec<Card>,
    pub strength: Strength,
    pub placed_seq: Seq,
    pub placed_ms: Millis,
}

impl Play {
    /// Card ids committed by this play.
    pub fn card_ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().map(|c| c.id)
    }
}

impl std::fmt::Display for Play {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}@{} #{} {}",
            self.pid, self.table, self.placed_seq, self.strength
        )
    }
}
