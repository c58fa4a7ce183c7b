use melee_core::CardId;
use melee_core::Millis;
use melee_core::Pid;
use melee_core::Seq;
use melee_gameroom::Play;
use melee_gameroom::Player;
use melee_gameroom::RoomState;
use melee_gameroom::RoundSummary;
use melee_gameroom::Table;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Complete serializable state of one room at a point in time.
///
/// The codec is lossless both ways: everything a room needs to resume —
/// counters included, so card ids and sequences keep their never-reused
/// guarantee across restarts — round-trips through here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub room_id: String,
    pub round_no: u64,
    pub play_seq: Seq,
    pub next_card_id: CardId,
    pub ready_pids: Vec<Pid>,
    pub players: Vec<Player>,
    pub pending: BTreeMap<Table, Vec<Play>>,
    pub battle_history: Vec<RoundSummary>,
    pub last_saved_ms: Millis,
}

impl From<&RoomState> for Snapshot {
    fn from(room: &RoomState) -> Self {
        Self {
            room_id: room.id().to_string(),
            round_no: room.round_no(),
            play_seq: room.play_seq(),
            next_card_id: room.next_card_id(),
            ready_pids: room.ready().iter().cloned().collect(),
            players: room.players().cloned().collect(),
            pending: Table::all()
                .map(|t| (t, room.pending(t).to_vec()))
                .filter(|(_, plays)| !plays.is_empty())
                .collect(),
            battle_history: room.history().to_vec(),
            last_saved_ms: room.last_saved_ms(),
        }
    }
}

impl From<Snapshot> for RoomState {
    fn from(snap: Snapshot) -> Self {
        RoomState::restore(
            snap.room_id,
            snap.players,
            snap.pending,
            snap.ready_pids.into_iter().collect::<BTreeSet<_>>(),
            snap.round_no,
            snap.play_seq,
            snap.next_card_id,
            snap.battle_history,
            snap.last_saved_ms,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_preserves_counters_and_plays() {
        let mut room = RoomState::new("demo");
        room.join("p", "P").unwrap();
        for text in ["A♠", "A♥", "7♦"] {
            room.add_manual("p", text).unwrap();
        }
        let ids = room
            .player("p")
            .unwrap()
            .hand
            .iter()
            .map(|c| c.id)
            .collect::<Vec<_>>();
        let t2 = Table::try_from("T2").unwrap();
        room.play_selected("p", t2, &ids[0..2], 123).unwrap();
        room.set_ready("p").unwrap();

        let json = serde_json::to_string(&Snapshot::from(&room)).unwrap();
        let decoded: Snapshot = serde_json::from_str(&json).unwrap();
        let restored = RoomState::from(decoded);

        assert_eq!(restored.id(), "demo");
        assert_eq!(restored.play_seq(), room.play_seq());
        assert_eq!(restored.next_card_id(), room.next_card_id());
        assert_eq!(restored.pending(t2).len(), 1);
        assert_eq!(restored.pending(t2)[0].strength, room.pending(t2)[0].strength);
        assert!(restored.ready().contains("p"));
        assert_eq!(restored.player("p").unwrap().hand.len(), 3);
    }

    #[test]
    fn fresh_room_after_resolution_roundtrips_history() {
        let mut room = RoomState::new("demo");
        room.join("p", "P").unwrap();
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
        room.resolve_round(456);

        let snap = Snapshot::from(&room);
        assert!(snap.pending.is_empty()); // empty tables are elided
        let restored = RoomState::from(snap);
        assert_eq!(restored.round_no(), 1);
        assert_eq!(restored.history().len(), 1);
        assert_eq!(restored.history()[0].tables[0].winner.pid, "p");
    }
}
