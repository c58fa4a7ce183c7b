use super::error::RoomError;
use super::history::RoundSummary;
use super::history::TableOutcome;
use super::play::Play;
use super::player::ArchiveEntry;
use super::player::Player;
use super::resolve::contest;
use super::table::Table;
use melee_cards::Card;
use melee_cards::Deck;
use melee_cards::Face;
use melee_cards::Strength;
use melee_core::CardId;
use melee_core::MAX_PLAYERS;
use melee_core::Millis;
use melee_core::Pid;
use melee_core::Seq;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// The room aggregate: players and hands, per-table pending plays,
/// readiness votes, monotonic counters, and the battle history.
///
/// Every mutating operation validates fully before touching state, so a
/// returned error guarantees the room is unchanged. The hosting layer
/// serializes all access through one exclusive scope per room; nothing
/// here is aware of sessions or persistence.
#[derive(Debug, Clone)]
pub struct RoomState {
    id: String,
    players: BTreeMap<Pid, Player>,
    pending: BTreeMap<Table, Vec<Play>>,
    ready: BTreeSet<Pid>,
    round_no: u64,
    play_seq: Seq,
    next_card_id: CardId,
    history: Vec<RoundSummary>,
    last_saved_ms: Millis,
}

impl RoomState {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            players: BTreeMap::new(),
            pending: Table::all().map(|t| (t, Vec::new())).collect(),
            ready: BTreeSet::new(),
            round_no: 0,
            play_seq: 0,
            next_card_id: 1,
            history: Vec::new(),
            last_saved_ms: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn round_no(&self) -> u64 {
        self.round_no
    }
    pub fn play_seq(&self) -> Seq {
        self.play_seq
    }
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }
    pub fn player(&self, pid: &str) -> Option<&Player> {
        self.players.get(pid)
    }
    pub fn pending(&self, table: Table) -> &[Play] {
        self.pending.get(&table).map(Vec::as_slice).unwrap_or(&[])
    }
    pub fn ready(&self) -> &BTreeSet<Pid> {
        &self.ready
    }
    pub fn history(&self) -> &[RoundSummary] {
        &self.history
    }
    pub fn last_saved_ms(&self) -> Millis {
        self.last_saved_ms
    }
    /// Recorded by the hosting layer after a successful save.
    pub fn mark_saved(&mut self, ms: Millis) {
        self.last_saved_ms = ms;
    }

    /// Idempotent join: creates the player on first sight (capacity 6),
    /// refreshes the display name afterwards.
    pub fn join(&mut self, pid: &str, name: &str) -> Result<&mut Player, RoomError> {
        if !self.players.contains_key(pid) && self.players.len() >= MAX_PLAYERS {
            return Err(RoomError::RoomFull);
        }
        let player = self
            .players
            .entry(pid.to_string())
            .or_insert_with(|| Player::new(pid.to_string(), name.to_string()));
        player.name = name.to_string();
        Ok(player)
    }

    /// Deals `n` cards from a fresh shuffled issuance into one hand.
    pub fn deal(&mut self, pid: &str, n: usize) -> Result<(), RoomError> {
        self.require(pid)?;
        let faces = Deck::shuffled()
            .draw(n)
            .ok_or(RoomError::InvalidDealSize(n))?;
        let cards = self.mint(faces);
        self.players
            .get_mut(pid)
            .expect("player presence checked above")
            .receive(cards);
        Ok(())
    }

    /// Deals `n` cards to every player, one fresh issuance each.
    pub fn deal_all(&mut self, n: usize) -> Result<(), RoomError> {
        if n > Deck::SIZE {
            return Err(RoomError::InvalidDealSize(n));
        }
        let pids = self.players.keys().cloned().collect::<Vec<_>>();
        for pid in pids {
            self.deal(&pid, n)?;
        }
        Ok(())
    }

    /// Parses one card from free-text notation and appends it.
    pub fn add_manual(&mut self, pid: &str, text: &str) -> Result<(), RoomError> {
        self.require(pid)?;
        let face =
            Face::try_from(text).map_err(|_| RoomError::InvalidCardText(text.to_string()))?;
        let card = self.mint(vec![face]);
        self.players
            .get_mut(pid)
            .expect("player presence checked above")
            .receive(card);
        Ok(())
    }

    /// Removes every card from the hand unconditionally. Pending plays
    /// own their card-id references independent of hand membership.
    pub fn clear_hand(&mut self, pid: &str) -> Result<(), RoomError> {
        self.require(pid)?;
        self.players
            .get_mut(pid)
            .expect("player presence checked above")
            .hand
            .clear();
        Ok(())
    }

    /// Removes the held subset of `ids` from the hand, refusing to touch
    /// cards committed to a pending play this round.
    pub fn remove_selected(&mut self, pid: &str, ids: &[CardId]) -> Result<(), RoomError> {
        let player = self.require(pid)?;
        let held = ids
            .iter()
            .copied()
            .filter(|id| player.hand.iter().any(|c| c.id == *id))
            .collect::<BTreeSet<_>>();
        if held.is_empty() {
            return Err(RoomError::NoSuchCards);
        }
        let used = self.used_ids();
        if held.iter().any(|id| used.contains(id)) {
            return Err(RoomError::CardsInUse);
        }
        self.players
            .get_mut(pid)
            .expect("player presence checked above")
            .discard(&held);
        Ok(())
    }

    /// Read-only evaluation of held cards; no state change at all.
    pub fn evaluate_selected(
        &self,
        pid: &str,
        ids: &[CardId],
    ) -> Result<(Strength, Vec<Card>), RoomError> {
        let player = self.require(pid)?;
        let cards = player.select(ids).ok_or(RoomError::NoSuchCards)?;
        let faces = cards.iter().map(|c| c.face).collect::<Vec<_>>();
        let strength = Strength::try_from(faces.as_slice())?;
        Ok((strength, cards))
    }

    /// Commits a combination onto a table as an immutable play.
    ///
    /// Validates hand membership, no-reuse within the round, and
    /// combination size before mutating; allocates the next `play_seq`
    /// and revokes the submitter's readiness vote.
    pub fn play_selected(
        &mut self,
        pid: &str,
        table: Table,
        ids: &[CardId],
        now_ms: Millis,
    ) -> Result<&Play, RoomError> {
        let player = self.require(pid)?;
        let cards = player.select(ids).ok_or(RoomError::NoSuchCards)?;
        let used = self.used_ids();
        if cards.iter().any(|c| used.contains(&c.id)) {
            return Err(RoomError::CardsAlreadyUsed);
        }
        let faces = cards.iter().map(|c| c.face).collect::<Vec<_>>();
        let strength = Strength::try_from(faces.as_slice())?;
        self.play_seq += 1;
        let play = Play {
            pid: pid.to_string(),
            table,
            cards,
            strength,
            placed_seq: self.play_seq,
            placed_ms: now_ms,
        };
        self.ready.remove(pid);
        let plays = self
            .pending
            .get_mut(&table)
            .expect("pending is pre-populated for every table");
        plays.push(play);
        Ok(plays.last().expect("just pushed"))
    }

    /// Deletes the matching pending play owned by `pid`, revoking their
    /// readiness iff something was removed. Idempotent on a missing seq.
    pub fn remove_play(&mut self, pid: &str, table: Table, placed_seq: Seq) -> bool {
        let plays = self
            .pending
            .get_mut(&table)
            .expect("pending is pre-populated for every table");
        let before = plays.len();
        plays.retain(|p| !(p.pid == pid && p.placed_seq == placed_seq));
        let removed = plays.len() < before;
        if removed {
            self.ready.remove(pid);
        }
        removed
    }

    /// Records a readiness vote. The caller decides whether the round
    /// now resolves by consulting [`RoomState::round_complete`].
    pub fn set_ready(&mut self, pid: &str) -> Result<(), RoomError> {
        self.require(pid)?;
        self.ready.insert(pid.to_string());
        Ok(())
    }

    /// Readiness policy: ready-vs-all-connected. True iff the connected
    /// set is non-empty and every connected pid has voted ready. A lone
    /// connected player who placed nothing therefore blocks the round
    /// until `resolve_round` is forced.
    pub fn round_complete(&self, connected: &BTreeSet<Pid>) -> bool {
        !connected.is_empty() && connected.iter().all(|pid| self.ready.contains(pid))
    }

    /// Resolves the round atomically: crowns each contested table's
    /// winner, spends every committed card (losers pay too), archives
    /// the plays, clears pending and readiness, and appends the summary.
    ///
    /// Compute-then-commit: outcomes and the full removal set are built
    /// before any hand is touched, so no partially-resolved state is
    /// ever observable.
    pub fn resolve_round(&mut self, now_ms: Millis) -> RoundSummary {
        let mut outcomes = Vec::new();
        let mut spent: BTreeMap<Pid, BTreeSet<CardId>> = BTreeMap::new();
        for table in Table::all() {
            let plays = self.pending.get(&table).map(Vec::as_slice).unwrap_or(&[]);
            let Some(w) = contest(plays) else { continue };
            for play in plays {
                spent
                    .entry(play.pid.clone())
                    .or_default()
                    .extend(play.card_ids());
            }
            outcomes.push(TableOutcome {
                table,
                winner: plays[w].clone(),
                losers: plays
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != w)
                    .map(|(_, p)| p.clone())
                    .collect(),
            });
        }
        let summary = RoundSummary {
            round_no: self.round_no,
            tables: outcomes,
            ts_ms: now_ms,
        };
        for outcome in &summary.tables {
            self.archive(&outcome.winner, true);
            for loser in &outcome.losers {
                self.archive(loser, false);
            }
        }
        for (pid, ids) in &spent {
            if let Some(player) = self.players.get_mut(pid) {
                player.discard(ids);
            }
        }
        for plays in self.pending.values_mut() {
            plays.clear();
        }
        self.ready.clear();
        self.round_no += 1;
        self.history.push(summary.clone());
        log::info!(
            "[room {}] round {} resolved: {} tables, {} plays",
            self.id,
            summary.round_no,
            summary.tables.len(),
            summary.n_plays()
        );
        summary
    }

    /// Every card id referenced by any pending play this round.
    pub fn used_ids(&self) -> BTreeSet<CardId> {
        self.pending
            .values()
            .flatten()
            .flat_map(Play::card_ids)
            .collect()
    }

    fn require(&self, pid: &str) -> Result<&Player, RoomError> {
        self.players
            .get(pid)
            .ok_or_else(|| RoomError::NoSuchPlayer(pid.to_string()))
    }

    fn archive(&mut self, play: &Play, won: bool) {
        if let Some(player) = self.players.get_mut(&play.pid) {
            player.archive.push(ArchiveEntry {
                round_no: self.round_no,
                label: play.strength.label(),
                cards: play.cards.clone(),
                won,
            });
        }
    }

    /// Mints fresh identified cards from faces, consuming ids from the
    /// monotonic allocator. Ids are never reused for the room's lifetime.
    fn mint(&mut self, faces: Vec<Face>) -> Vec<Card> {
        faces
            .into_iter()
            .map(|face| {
                let id = self.next_card_id;
                self.next_card_id += 1;
                Card::new(id, face)
            })
            .collect()
    }
}

// Snapshot restoration: the database crate rebuilds rooms through these.
impl RoomState {
    /// Rebuilds a room from persisted parts. Counters must be at least
    /// as large as anything they have ever issued.
    pub fn restore(
        id: String,
        players: Vec<Player>,
        pending: BTreeMap<Table, Vec<Play>>,
        ready: BTreeSet<Pid>,
        round_no: u64,
        play_seq: Seq,
        next_card_id: CardId,
        history: Vec<RoundSummary>,
        last_saved_ms: Millis,
    ) -> Self {
        let mut slots: BTreeMap<Table, Vec<Play>> =
            Table::all().map(|t| (t, Vec::new())).collect();
        for (table, plays) in pending {
            slots.insert(table, plays);
        }
        Self {
            id,
            players: players.into_iter().map(|p| (p.pid.clone(), p)).collect(),
            pending: slots,
            ready,
            round_no,
            play_seq,
            next_card_id,
            history,
            last_saved_ms,
        }
    }
    pub fn next_card_id(&self) -> CardId {
        self.next_card_id
    }
}
