//! Core type aliases, constants, and runtime utilities for melee.
//!
//! This crate provides the foundational types and configuration parameters
//! used throughout the melee workspace.

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Stable external player identity within a room.
pub type Pid = String;
/// Monotonic per-room card identifier, never reused.
pub type CardId = u64;
/// Monotonic per-room play submission counter, the deterministic tie-break key.
pub type Seq = u64;
/// Wall-clock milliseconds since the unix epoch.
pub type Millis = u64;

// ============================================================================
// GAME PARAMETERS
// ============================================================================
/// Maximum distinct players per room.
pub const MAX_PLAYERS: usize = 6;
/// Number of contested table slots per room.
pub const N_TABLES: usize = 30;
/// Smallest playable combination.
pub const MIN_COMBO: usize = 2;
/// Largest playable combination.
pub const MAX_COMBO: usize = 5;
/// Cards dealt to a player joining with an empty hand.
pub const INITIAL_HAND: usize = 8;
/// Trailing round-history window projected to viewers.
pub const HISTORY_WINDOW: usize = 20;
/// Default seconds between autosave sweeps (`AUTOSAVE_SECONDS` overrides).
pub const AUTOSAVE_SECONDS: u64 = 15;

/// Current wall-clock time in milliseconds.
///
/// Informational only: ordering guarantees come from lock acquisition
/// order and `Seq`, never from wall-clock time.
pub fn now_ms() -> Millis {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as Millis)
        .unwrap_or(0)
}

/// Seconds between autosave sweeps, from `AUTOSAVE_SECONDS` if set.
pub fn autosave_interval() -> std::time::Duration {
    let secs = std::env::var("AUTOSAVE_SECONDS")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(AUTOSAVE_SECONDS);
    std::time::Duration::from_secs(secs)
}

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register Ctrl+C handler that awaits a final task before exiting.
/// Used by the server to flush all rooms on shutdown.
pub fn on_interrupt<F>(f: F)
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("interrupt received, shutting down");
            f.await;
            std::process::exit(0);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn now_is_monotonic_enough() {
        let a = now_ms();
        let b = now_ms();
        assert!(b >= a);
    }
    #[test]
    fn combo_bounds() {
        assert!(MIN_COMBO <= MAX_COMBO);
        assert!(MAX_COMBO <= INITIAL_HAND);
    }
}
