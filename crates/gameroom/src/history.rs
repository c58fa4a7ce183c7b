use super::play::Play;
use super::table::Table;
use melee_core::Millis;
use serde::Deserialize;
use serde::Serialize;

/// Outcome of one table in one resolved round.
///
/// Tables with no pending plays produce no outcome at all; a table with
/// plays always crowns exactly one winner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableOutcome {
    pub table: Table,
    pub winner: Play,
    pub losers: Vec<Play>,
}

/// Summary of one resolved round, appended to the battle history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round_no: u64,
    pub tables: Vec<TableOutcome>,
    pub ts_ms: Millis,
}

impl RoundSummary {
    /// Number of plays across all contested tables.
    pub fn n_plays(&self) -> usize {
        self.tables.iter().map(|t| 1 + t.losers.len()).sum()
    }
}
