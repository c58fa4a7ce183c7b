use super::hub::SessionHub;
use melee_core::INITIAL_HAND;
use melee_core::now_ms;
use melee_database::Snapshot;
use melee_database::Store;
use melee_gameroom::ClientAction;
use melee_gameroom::ErrorKind;
use melee_gameroom::RoomError;
use melee_gameroom::RoomState;
use melee_gameroom::RoomView;
use melee_gameroom::ServerMessage;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::mpsc::UnboundedSender;

/// One live room: game state and session bindings under a single lock.
///
/// Every inbound action takes the lock, mutates, and projects the
/// broadcast views before releasing it, so clients observe a serial
/// history of committed states. The snapshot to persist is also taken
/// in-lock; the store write itself happens after release.
pub struct HostedRoom {
    id: String,
    inner: Mutex<Live>,
}

struct Live {
    state: RoomState,
    hub: SessionHub,
}

impl HostedRoom {
    pub fn new(state: RoomState) -> Arc<Self> {
        Arc::new(Self {
            id: state.id().to_string(),
            inner: Mutex::new(Live {
                state,
                hub: SessionHub::default(),
            }),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Joins a player and binds their session, dealing the opening hand
    /// on first sight. Returns the session token for later detach.
    pub async fn attach(
        &self,
        store: &Arc<dyn Store>,
        pid: &str,
        name: &str,
        tx: UnboundedSender<String>,
    ) -> Result<u64, RoomError> {
        let (token, snapshot) = {
            let mut live = self.inner.lock().await;
            let fresh = live.state.player(pid).is_none();
            live.state.join(pid, name)?;
            if fresh {
                live.state.deal(pid, INITIAL_HAND)?;
            }
            let token = live.hub.bind(pid, tx);
            log::info!("[room {}] {} connected", self.id, pid);
            live.broadcast();
            (token, live.snapshot())
        };
        self.persist(store, snapshot).await;
        Ok(token)
    }

    /// Unbinds a session, refreshes everyone's active counts, and
    /// flushes a snapshot. A detach from a replaced session is a no-op.
    pub async fn detach(&self, store: &Arc<dyn Store>, pid: &str, token: u64) {
        let snapshot = {
            let mut live = self.inner.lock().await;
            if !live.hub.unbind(pid, token) {
                return;
            }
            log::info!("[room {}] {} disconnected", self.id, pid);
            live.broadcast();
            live.snapshot()
        };
        self.persist(store, snapshot).await;
    }

    /// Applies one raw inbound message from a bound session.
    ///
    /// Failures are unicast back to the sender and leave the room
    /// untouched; committed mutations broadcast fresh projections and
    /// queue a snapshot for the store.
    pub async fn apply(&self, store: &Arc<dyn Store>, pid: &str, raw: &str) {
        let snapshot = {
            let mut live = self.inner.lock().await;
            match ClientAction::decode(raw) {
                Ok(action) => live.dispatch(pid, action),
                Err(e) => {
                    live.refuse(pid, &e);
                    None
                }
            }
        };
        if let Some(snapshot) = snapshot {
            self.persist(store, snapshot).await;
        }
    }

    /// Snapshot for the autosave sweep and shutdown flush.
    pub async fn snapshot(&self) -> Snapshot {
        self.inner.lock().await.snapshot()
    }

    async fn persist(&self, store: &Arc<dyn Store>, snapshot: Snapshot) {
        if let Err(e) = store.save(&snapshot).await {
            log::error!("[room {}] save failed: {:#}", self.id, e);
        }
    }
}

impl Live {
    /// Runs one decoded action against the room, returning the snapshot
    /// to persist iff state changed.
    fn dispatch(&mut self, pid: &str, action: ClientAction) -> Option<Snapshot> {
        let result = match action {
            ClientAction::State => {
                self.unicast_state(pid);
                return None;
            }
            ClientAction::Evaluate { cards } => {
                match self.state.evaluate_selected(pid, &cards) {
                    Ok((strength, cards)) => self.hub.unicast(
                        pid,
                        ServerMessage::Evaluated {
                            label: strength.label(),
                            category: strength.category(),
                            tiebreak: strength.kicks().values(),
                            cards,
                        }
                        .to_json(),
                    ),
                    Err(e) => self.refuse(pid, &e),
                }
                return None;
            }
            ClientAction::Place { table, cards } => self
                .state
                .play_selected(pid, table, &cards, now_ms())
                .map(|_| ()),
            ClientAction::Remove { table, placed_seq } => {
                // idempotent: a missing seq still refreshes the viewer
                self.state.remove_play(pid, table, placed_seq);
                Ok(())
            }
            ClientAction::Ready => self.state.set_ready(pid).map(|_| {
                if self.state.round_complete(&self.hub.connected()) {
                    self.state.resolve_round(now_ms());
                }
            }),
            ClientAction::ForceEnd => {
                self.state.resolve_round(now_ms());
                Ok(())
            }
            ClientAction::Deal { n } => self.state.deal(pid, n),
            ClientAction::AddCard { text } => self.state.add_manual(pid, &text),
            ClientAction::ClearHand => self.state.clear_hand(pid),
            ClientAction::Discard { cards } => self.state.remove_selected(pid, &cards),
        };
        match result {
            Ok(()) => {
                self.broadcast();
                Some(self.snapshot())
            }
            Err(e) => {
                self.refuse(pid, &e);
                None
            }
        }
    }

    /// Sends every bound session its own projection of the room.
    fn broadcast(&mut self) {
        let connected = self.hub.connected();
        let state = &self.state;
        self.hub
            .fan_out(|viewer| ServerMessage::state(RoomView::project(state, viewer, &connected)).to_json());
    }

    fn unicast_state(&self, pid: &str) {
        let connected = self.hub.connected();
        let view = RoomView::project(&self.state, pid, &connected);
        self.hub.unicast(pid, ServerMessage::state(view).to_json());
    }

    fn refuse(&self, pid: &str, e: &RoomError) {
        match e.kind() {
            ErrorKind::Validation => log::debug!("[room {}] {} rejected: {}", self.state.id(), pid, e),
            ErrorKind::Conflict => log::info!("[room {}] {} conflicted: {}", self.state.id(), pid, e),
        }
        self.hub.unicast(pid, ServerMessage::error(e).to_json());
    }

    fn snapshot(&mut self) -> Snapshot {
        self.state.mark_saved(now_ms());
        Snapshot::from(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use melee_database::Memory;
    use serde_json::Value;
    use tokio::sync::mpsc::UnboundedReceiver;
    use tokio::sync::mpsc::unbounded_channel;

    async fn memory() -> Arc<dyn Store> {
        Arc::new(Memory::default())
    }

    fn drain(rx: &mut UnboundedReceiver<String>) -> Vec<Value> {
        let mut out = Vec::new();
        while let Ok(msg) = rx.try_recv() {
            out.push(serde_json::from_str(&msg).unwrap());
        }
        out
    }

    #[tokio::test]
    async fn attach_deals_opening_hand_once() {
        let store = memory().await;
        let room = HostedRoom::new(RoomState::new("r"));
        let (tx, mut rx) = unbounded_channel();
        let token = room.attach(&store, "p", "P", tx).await.unwrap();
        let first = drain(&mut rx);
        let hand = first.last().unwrap()["state"]["players"][0]["hand"]
            .as_array()
            .unwrap()
            .len();
        assert_eq!(hand, INITIAL_HAND);
        room.detach(&store, "p", token).await;
        // reconnect keeps the same hand rather than dealing again
        let (tx, mut rx) = unbounded_channel();
        room.attach(&store, "p", "P", tx).await.unwrap();
        let again = drain(&mut rx);
        let hand = again.last().unwrap()["state"]["players"][0]["hand"]
            .as_array()
            .unwrap()
            .len();
        assert_eq!(hand, INITIAL_HAND);
    }

    #[tokio::test]
    async fn invalid_action_is_unicast_error_only() {
        let store = memory().await;
        let room = HostedRoom::new(RoomState::new("r"));
        let (tx_p, mut rx_p) = unbounded_channel();
        let (tx_q, mut rx_q) = unbounded_channel();
        room.attach(&store, "p", "P", tx_p).await.unwrap();
        room.attach(&store, "q", "Q", tx_q).await.unwrap();
        drain(&mut rx_p);
        drain(&mut rx_q);
        room.apply(&store, "p", r#"{"type":"teleport"}"#).await;
        let errs = drain(&mut rx_p);
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0]["type"], "error");
        assert!(drain(&mut rx_q).is_empty());
    }

    #[tokio::test]
    async fn ready_all_connected_resolves_round() {
        let store = memory().await;
        let room = HostedRoom::new(RoomState::new("r"));
        let (tx, mut rx) = unbounded_channel();
        room.attach(&store, "p", "P", tx).await.unwrap();
        drain(&mut rx);
        room.apply(&store, "p", r#"{"type":"ready"}"#).await;
        let msgs = drain(&mut rx);
        let round_no = msgs.last().unwrap()["state"]["round_no"].as_u64().unwrap();
        assert_eq!(round_no, 1);
        // the snapshot made it to the store
        let snap = store.load("r").await.unwrap().unwrap();
        assert_eq!(snap.round_no, 1);
    }

    #[tokio::test]
    async fn force_end_bypasses_readiness() {
        let store = memory().await;
        let room = HostedRoom::new(RoomState::new("r"));
        let (tx, mut rx) = unbounded_channel();
        room.attach(&store, "p", "P", tx).await.unwrap();
        drain(&mut rx);
        room.apply(&store, "p", r#"{"type":"force_end"}"#).await;
        let msgs = drain(&mut rx);
        assert_eq!(msgs.last().unwrap()["state"]["round_no"], 1);
    }

    #[tokio::test]
    async fn state_request_is_unicast() {
        let store = memory().await;
        let room = HostedRoom::new(RoomState::new("r"));
        let (tx_p, mut rx_p) = unbounded_channel();
        let (tx_q, mut rx_q) = unbounded_channel();
        room.attach(&store, "p", "P", tx_p).await.unwrap();
        room.attach(&store, "q", "Q", tx_q).await.unwrap();
        drain(&mut rx_p);
        drain(&mut rx_q);
        room.apply(&store, "p", r#"{"type":"state"}"#).await;
        assert_eq!(drain(&mut rx_p).len(), 1);
        assert!(drain(&mut rx_q).is_empty());
    }
}
