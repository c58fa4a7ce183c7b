//! Melee server binary.
//!
//! Serves rooms on BIND_ADDR (e.g. 0.0.0.0:8888); persists to DB_URL
//! when set, in-memory otherwise.

#[tokio::main]
async fn main() {
    melee_core::log();
    melee_server::run().await.expect("server terminated");
}
