use crate::Arena;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use gg_core::ID;
use gg_core::Member;
use gg_gameroom::RoomError;
use gg_ghost::Difficulty;
use gg_records::Room as RoomId;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct PracticeRequest {
    #[serde(default)]
    pub difficulty: Difficulty,
}

#[derive(Debug, Deserialize)]
pub struct LeaveRequest {
    pub member: uuid::Uuid,
}

pub async fn start(arena: web::Data<Arena>) -> impl Responder {
    let id = arena.into_inner().open().await;
    HttpResponse::Ok().json(serde_json::json!({ "room_id": id.to_string() }))
}

pub async fn practice(
    arena: web::Data<Arena>,
    body: Option<web::Json<PracticeRequest>>,
) -> impl Responder {
    let difficulty = body.map(|b| b.difficulty).unwrap_or_default();
    let id = arena.into_inner().practice(difficulty).await;
    HttpResponse::Ok().json(serde_json::json!({
        "room_id": id.to_string(),
        "difficulty": difficulty.to_string(),
    }))
}

pub async fn leave(
    arena: web::Data<Arena>,
    path: web::Path<uuid::Uuid>,
    body: web::Json<LeaveRequest>,
) -> impl Responder {
    let arena = arena.into_inner();
    let id: ID<RoomId> = ID::from(path.into_inner());
    let member: ID<Member> = ID::from(body.member);
    let room = match arena.get(id).await {
        Ok(room) => room,
        Err(e) => return HttpResponse::NotFound().body(e.to_string()),
    };
    match room.leave(member).await {
        Ok(departure) => {
            arena.retire(&room, departure).await;
            HttpResponse::Ok().json(serde_json::json!({ "status": "left" }))
        }
        Err(RoomError::NotAParticipant) => {
            HttpResponse::Forbidden().body(RoomError::NotAParticipant.to_string())
        }
        Err(e) => HttpResponse::Conflict().body(e.to_string()),
    }
}

/// WebSocket entry. `member` and `name` arrive as query parameters; an
/// unknown member gets a fresh identity, a seated one is rebound to
/// this session.
pub async fn enter(
    arena: web::Data<Arena>,
    path: web::Path<uuid::Uuid>,
    query: web::Query<HashMap<String, String>>,
    body: web::Payload,
    req: HttpRequest,
) -> impl Responder {
    let id: ID<RoomId> = ID::from(path.into_inner());
    let member: ID<Member> = query
        .get("member")
        .and_then(|m| uuid::Uuid::parse_str(m).ok())
        .map(ID::from)
        .unwrap_or_default();
    let name = query
        .get("name")
        .cloned()
        .unwrap_or_else(|| "anonymous".to_string());
    match actix_ws::handle(&req, body) {
        Ok((response, session, stream)) => {
            match arena
                .into_inner()
                .bridge(id, member, name, session, stream)
                .await
            {
                Ok(()) => response.map_into_left_body(),
                Err(e) => HttpResponse::NotFound()
                    .body(e.to_string())
                    .map_into_right_body(),
            }
        }
        Err(e) => HttpResponse::InternalServerError()
            .body(e.to_string())
            .map_into_right_body(),
    }
}
