use super::room::HostedRoom;
use melee_database::Store;
use melee_gameroom::RoomState;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Central registry of live rooms.
///
/// Rooms are created lazily on first lookup, restored from the store
/// when a snapshot exists, and stay resident for the process lifetime.
/// The registry lock is held only for lookup and insertion; a store
/// read for a cold room happens outside it.
pub struct Arena {
    store: Arc<dyn Store>,
    rooms: RwLock<HashMap<String, Arc<HostedRoom>>>,
}

impl Arena {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            rooms: RwLock::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// Finds or revives the room with this id.
    pub async fn room(&self, id: &str) -> Arc<HostedRoom> {
        if let Some(room) = self.rooms.read().await.get(id) {
            return room.clone();
        }
        let state = match self.store.load(id).await {
            Ok(Some(snapshot)) => {
                log::info!("[room {}] restored from store", id);
                RoomState::from(snapshot)
            }
            Ok(None) => {
                log::info!("[room {}] created", id);
                RoomState::new(id)
            }
            Err(e) => {
                log::error!("[room {}] load failed, starting fresh: {:#}", id, e);
                RoomState::new(id)
            }
        };
        let mut rooms = self.rooms.write().await;
        // a racing lookup may have revived it first
        rooms
            .entry(id.to_string())
            .or_insert_with(|| HostedRoom::new(state))
            .clone()
    }

    /// Flushes every live room to the store. Used by the autosave sweep
    /// and the shutdown path.
    pub async fn save_all(&self) {
        let rooms = self
            .rooms
            .read()
            .await
            .values()
            .cloned()
            .collect::<Vec<_>>();
        for room in rooms {
            let snapshot = room.snapshot().await;
            if let Err(e) = self.store.save(&snapshot).await {
                log::error!("[room {}] save failed: {:#}", room.id(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use melee_database::Memory;

    #[tokio::test]
    async fn lookup_is_idempotent() {
        let arena = Arena::new(Arc::new(Memory::default()));
        let a = arena.room("alpha").await;
        let b = arena.room("alpha").await;
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn cold_room_revives_from_snapshot() {
        let store: Arc<dyn Store> = Arc::new(Memory::default());
        {
            let arena = Arena::new(store.clone());
            let room = arena.room("alpha").await;
            let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
            room.attach(&store, "p", "P", tx).await.unwrap();
            arena.save_all().await;
        }
        let arena = Arena::new(store.clone());
        let snap = arena.room("alpha").await.snapshot().await;
        assert_eq!(snap.players.len(), 1);
        assert_eq!(snap.players[0].hand.len(), melee_core::INITIAL_HAND);
    }
}
