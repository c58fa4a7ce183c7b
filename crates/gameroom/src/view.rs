use super::history::RoundSummary;
use super::play::Play;
use super::player::ArchiveEntry;
use super::room::RoomState;
use super::table::Table;
use melee_cards::Card;
use melee_core::HISTORY_WINDOW;
use melee_core::Millis;
use melee_core::Pid;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Per-viewer projection of a room, broadcast after every committed
/// mutation.
///
/// Hand visibility is the open-hand trust variant: every viewer sees
/// every player's full hand. Only `my_pending` is viewer-filtered, to
/// the viewer's own uncommitted plays.
#[derive(Debug, Clone, Serialize)]
pub struct RoomView {
    pub room: String,
    pub tables: Vec<Table>,
    pub round_no: u64,
    pub players: Vec<PlayerView>,
    pub my_pending: BTreeMap<Table, Vec<Play>>,
    pub last_round: Option<RoundSummary>,
    pub battle_history: Vec<RoundSummary>,
    pub active_count: usize,
    pub ready_count: usize,
    pub you_ready: bool,
    pub last_saved_ms: Millis,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pid: Pid,
    pub name: String,
    pub hand: Vec<Card>,
    pub archive: Vec<ArchiveEntry>,
}

impl RoomView {
    /// Projects the room for one viewer, given the currently connected
    /// pids. Must be taken inside the room's exclusive scope so the
    /// view is a consistent snapshot.
    pub fn project(room: &RoomState, viewer: &str, connected: &BTreeSet<Pid>) -> Self {
        let players = room
            .players()
            .map(|p| PlayerView {
                pid: p.pid.clone(),
                name: p.name.clone(),
                hand: p.hand.clone(),
                archive: p.archive.clone(),
            })
            .collect();
        let my_pending = Table::all()
            .map(|t| {
                (
                    t,
                    room.pending(t)
                        .iter()
                        .filter(|p| p.pid == viewer)
                        .cloned()
                        .collect::<Vec<_>>(),
                )
            })
            .collect();
        let history = room.history();
        Self {
            room: room.id().to_string(),
            tables: Table::all().collect(),
            round_no: room.round_no(),
            players,
            my_pending,
            last_round: history.last().cloned(),
            battle_history: history
                .iter()
                .rev()
                .take(HISTORY_WINDOW)
                .rev()
                .cloned()
                .collect(),
            active_count: connected.len(),
            ready_count: connected.iter().filter(|p| room.ready().contains(*p)).count(),
            you_ready: room.ready().contains(viewer),
            last_saved_ms: room.last_saved_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_is_viewer_filtered_but_hands_are_open() {
        let mut room = RoomState::new("r");
        room.join("p", "P").unwrap();
        room.join("q", "Q").unwrap();
        for text in ["K♠", "K♥"] {
            room.add_manual("p", text).unwrap();
        }
        let ids = room
            .player("p")
            .unwrap()
            .hand
            .iter()
            .map(|c| c.id)
            .collect::<Vec<_>>();
        let t1 = Table::try_from("T1").unwrap();
        room.play_selected("p", t1, &ids, 0).unwrap();
        let connected = BTreeSet::from(["p".to_string(), "q".to_string()]);
        let for_q = RoomView::project(&room, "q", &connected);
        assert!(for_q.my_pending.get(&t1).unwrap().is_empty());
        // open-hand policy: q sees p's full hand
        let p_hand = &for_q.players.iter().find(|p| p.pid == "p").unwrap().hand;
        assert_eq!(p_hand.len(), 2);
        let for_p = RoomView::project(&room, "p", &connected);
        assert_eq!(for_p.my_pending.get(&t1).unwrap().len(), 1);
    }

    #[test]
    fn ready_counts_track_connected_only() {
        let mut room = RoomState::new("r");
        room.join("p", "P").unwrap();
        room.join("q", "Q").unwrap();
        room.set_ready("p").unwrap();
        room.set_ready("q").unwrap();
        let connected = BTreeSet::from(["p".to_string()]);
        let view = RoomView::project(&room, "p", &connected);
        assert_eq!(view.active_count, 1);
        assert_eq!(view.ready_count, 1);
        assert!(view.you_ready);
    }
}
