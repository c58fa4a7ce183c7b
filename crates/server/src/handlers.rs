use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use melee_database::Store;
use melee_hosting::Arena;
use std::collections::HashMap;

pub async fn health(store: web::Data<dyn Store>) -> impl Responder {
    match store
        .ping()
        .await
        .inspect_err(|e| log::error!("health check failed: {:#}", e))
    {
        Ok(_) => HttpResponse::Ok().body("ok"),
        Err(_) => HttpResponse::ServiceUnavailable().body("store unavailable"),
    }
}

fn valid_slug(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= 64
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Upgrades the request into a room session. Identity is declared via
/// `?pid=<id>&name=<display>`; the name defaults to the pid.
pub async fn enter(
    arena: web::Data<Arena>,
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
    body: web::Payload,
    req: HttpRequest,
) -> impl Responder {
    let room_id = path.into_inner();
    let pid = query.get("pid").cloned().unwrap_or_default();
    if !valid_slug(&room_id) || !valid_slug(&pid) {
        return HttpResponse::BadRequest()
            .body("room and pid must be short slugs")
            .map_into_right_body();
    }
    let name = query
        .get("name")
        .filter(|n| !n.is_empty())
        .cloned()
        .unwrap_or_else(|| pid.clone());
    match actix_ws::handle(&req, body) {
        Ok((response, session, stream)) => {
            match melee_hosting::bridge(arena.into_inner(), room_id, pid, name, session, stream)
                .await
            {
                Ok(()) => response.map_into_left_body(),
                Err(e) => HttpResponse::Conflict()
                    .body(e.to_string())
                    .map_into_right_body(),
            }
        }
        Err(e) => HttpResponse::InternalServerError()
            .body(e.to_string())
            .map_into_right_body(),
    }
}
