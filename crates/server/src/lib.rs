//! Gridghost backend server.
//!
//! Hosts live rooms over HTTP and WebSocket: room creation and leave
//! are plain HTTP, gameplay flows through one WebSocket session per
//! player bridged into the room by the [`Arena`].
//!
//! ## Routes
//!
//! - `POST /room/start` — open a two-human room
//! - `POST /room/practice` — open a human-versus-ghost room
//! - `GET  /room/enter/{room_id}` — WebSocket upgrade into a room
//! - `POST /room/leave/{room_id}` — leave (forfeiting if active)
//! - `GET  /health` — liveness probe

mod arena;
pub mod handlers;

pub use arena::Arena;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use gg_gameroom::NullScoreboard;
use gg_records::NullArchive;
use std::sync::Arc;

async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

#[rustfmt::skip]
pub async fn run() -> Result<(), std::io::Error> {
    let arena = web::Data::new(Arena::new(
        Arc::new(NullArchive),
        Arc::new(NullScoreboard),
    ));
    log::info!("starting gridghost server");
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
            .route("/health", web::get().to(health))
            .service(
                web::scope("/room")
                    .route("/start", web::post().to(handlers::start))
                    .route("/practice", web::post().to(handlers::practice))
                    .route("/enter/{room_id}", web::get().to(handlers::enter))
                    .route("/leave/{room_id}", web::post().to(handlers::leave)),
            )
    })
    .workers(2)
    .bind(std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8888".to_string()))?
    .run()
    .await
}
