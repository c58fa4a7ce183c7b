use super::arena::Arena;
use std::sync::Arc;

/// Spawns the periodic snapshot sweep over every live room.
///
/// Saves are best-effort; a failed write is logged and retried on the
/// next tick. The interval comes from `AUTOSAVE_SECONDS`.
pub fn autosave(arena: Arc<Arena>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let period = melee_core::autosave_interval();
        log::info!("autosave every {:?}", period);
        let mut ticker = tokio::time::interval(period);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            arena.save_all().await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use melee_database::Memory;
    use melee_database::Store;

    #[tokio::test(start_paused = true)]
    async fn sweep_flushes_live_rooms() {
        let store: Arc<dyn Store> = Arc::new(Memory::default());
        let arena = Arc::new(Arena::new(store.clone()));
        arena.room("alpha").await;
        let handle = autosave(arena.clone());
        // let the spawned task register its interval before moving the clock
        tokio::task::yield_now().await;
        tokio::time::advance(melee_core::autosave_interval()).await;
        tokio::task::yield_now().await;
        assert!(store.load("alpha").await.unwrap().is_some());
        handle.abort();
    }
}
