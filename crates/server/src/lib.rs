//! HTTP surface for melee rooms.
//!
//! Two routes: a liveness probe that pings the store, and the WebSocket
//! entry point that upgrades a client into a room bridge. Everything
//! else travels over the socket.

mod handlers;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpServer;
use actix_web::middleware::Logger;
use actix_web::web;
use melee_hosting::Arena;
use std::sync::Arc;

/// Builds the shared state, spawns the autosave sweep, and serves on
/// `BIND_ADDR` until interrupted.
pub async fn run() -> Result<(), std::io::Error> {
    let store = melee_database::store().await;
    let arena = Arc::new(Arena::new(store.clone()));
    melee_hosting::autosave(arena.clone());
    {
        let arena = arena.clone();
        melee_core::on_interrupt(async move { arena.save_all().await });
    }
    let arena = web::Data::from(arena);
    let store = web::Data::from(store);
    log::info!("starting server");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(arena.clone())
            .app_data(store.clone())
            .route("/health", web::get().to(handlers::health))
            .route("/ws/{room_id}", web::get().to(handlers::enter))
    })
    .bind(std::env::var("BIND_ADDR").expect("BIND_ADDR must be set"))?
    .run()
    .await
}
