//! Single binary web server: JSON API over in-memory tournaments.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), RUST_LOG (e.g. debug).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use bracket_tournament_web::{
    advance_round, canonical_sport_type, generate_bracket, import_roster, matches_by_round,
    parse_roster_csv, report_result, round_name, tournament_progress, validate_roster, GameMatch,
    MatchId, Player, PlayerId, RngShuffler, Tournament, TournamentError, TournamentId,
    SPORT_TYPES,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory store standing in for the database: every tournament by id.
type AppState = Data<RwLock<HashMap<TournamentId, Tournament>>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    /// One of `SPORT_TYPES` (case-insensitive).
    sport_type: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    team_name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
}

#[derive(Deserialize)]
struct ReportResultBody {
    winner_id: PlayerId,
    #[serde(default)]
    notes: Option<String>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and player id
#[derive(Deserialize)]
struct TournamentPlayerPath {
    id: TournamentId,
    player_id: PlayerId,
}

/// Path segments: tournament id and match id
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

/// One bracket column for display.
#[derive(Serialize)]
struct RoundView<'a> {
    round_number: u32,
    name: String,
    matches: Vec<&'a GameMatch>,
}

#[derive(Serialize)]
struct ImportResponse<'a> {
    imported: usize,
    warnings: Vec<String>,
    tournament: &'a Tournament,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

fn bad_request(e: TournamentError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Run a mutation on one tournament under the write lock and reply with the updated record.
async fn mutate<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<(), TournamentError>,
{
    let mut g = state.write().await;
    let t = match g.get_mut(&id) {
        Some(t) => t,
        None => return not_found(),
    };
    match f(&mut *t) {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => {
            log::debug!("Tournament {} rejected request: {}", id, e);
            bad_request(e)
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "bracket-tournament-web",
    })
}

/// Sports accepted when creating a tournament.
#[get("/api/sport-types")]
async fn api_sport_types() -> HttpResponse {
    HttpResponse::Ok().json(SPORT_TYPES)
}

/// Create a new tournament in Draft (returns it with id).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let name = body.name.trim();
    if name.is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Tournament name is required" }));
    }
    let sport_type = match canonical_sport_type(&body.sport_type) {
        Ok(sport_type) => sport_type,
        Err(e) => return bad_request(e),
    };
    let mut tournament = Tournament::new(name, sport_type);
    tournament.description = body.description.filter(|d| !d.trim().is_empty());
    let id = tournament.id;
    log::info!("Created tournament {} ({})", id, tournament.name);
    let mut g = state.write().await;
    let response = HttpResponse::Ok().json(&tournament);
    g.insert(id, tournament);
    response
}

/// List all tournaments, newest first.
#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    let g = state.read().await;
    let mut all: Vec<&Tournament> = g.values().collect();
    all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    HttpResponse::Ok().json(all)
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = state.read().await;
    match g.get(&path.id) {
        Some(t) => HttpResponse::Ok().json(t),
        None => not_found(),
    }
}

/// Add a player (tournament must be in Draft).
#[post("/api/tournaments/{id}/players")]
async fn api_add_player(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddPlayerBody>,
) -> HttpResponse {
    let body = body.into_inner();
    mutate(&state, path.id, move |t| {
        let player =
            Player::new(body.name, body.team_name.trim()).with_contact(body.email, body.phone);
        t.add_player(player).map(|_| ())
    })
    .await
}

/// Deactivate a player by id (tournament must be in Draft).
#[delete("/api/tournaments/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<TournamentPlayerPath>) -> HttpResponse {
    let player_id = path.player_id;
    mutate(&state, path.id, move |t| t.deactivate_player(player_id)).await
}

/// Import players from a CSV body (header row: Name, Email, Phone, Team).
#[post("/api/tournaments/{id}/players/import")]
async fn api_import_players(
    state: AppState,
    path: Path<TournamentPath>,
    body: String,
) -> HttpResponse {
    let entries = match parse_roster_csv(body.as_bytes()) {
        Ok(entries) => entries,
        Err(e) => return bad_request(e),
    };
    let warnings = validate_roster(&entries).warnings;

    let mut g = state.write().await;
    let t = match g.get_mut(&path.id) {
        Some(t) => t,
        None => return not_found(),
    };
    match import_roster(t, &entries) {
        Ok(added) => HttpResponse::Ok().json(ImportResponse {
            imported: added.len(),
            warnings,
            tournament: t,
        }),
        Err(e) => bad_request(e),
    }
}

/// Generate round 1 from the active roster (Draft -> Active).
#[post("/api/tournaments/{id}/bracket")]
async fn api_generate_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    mutate(&state, path.id, |t| generate_bracket(t, &mut RngShuffler::thread())).await
}

/// Bracket grouped by round, with round names.
#[get("/api/tournaments/{id}/bracket")]
async fn api_get_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = state.read().await;
    let t = match g.get(&path.id) {
        Some(t) => t,
        None => return not_found(),
    };
    let rounds: Vec<RoundView> = matches_by_round(&t.matches)
        .into_iter()
        .map(|(round_number, matches)| RoundView {
            round_number,
            name: round_name(matches.len() * 2),
            matches,
        })
        .collect();
    HttpResponse::Ok().json(rounds)
}

/// Generate the next round once the current one is fully decided.
#[post("/api/tournaments/{id}/rounds/next")]
async fn api_next_round(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    mutate(&state, path.id, advance_round).await
}

/// Mark a pending match as in progress.
#[put("/api/tournaments/{id}/matches/{match_id}/start")]
async fn api_start_match(state: AppState, path: Path<TournamentMatchPath>) -> HttpResponse {
    let match_id = path.match_id;
    mutate(&state, path.id, move |t| t.start_match(match_id)).await
}

/// Report the winner of a match (optional notes).
#[put("/api/tournaments/{id}/matches/{match_id}/result")]
async fn api_report_result(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<ReportResultBody>,
) -> HttpResponse {
    let match_id = path.match_id;
    let body = body.into_inner();
    mutate(&state, path.id, move |t| {
        report_result(t, match_id, body.winner_id, body.notes)
    })
    .await
}

/// Completion state; `null` before the bracket is generated.
#[get("/api/tournaments/{id}/progress")]
async fn api_progress(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = state.read().await;
    match g.get(&path.id) {
        Some(t) => {
            let progress = tournament_progress(t);
            let can_advance = progress.as_ref().is_some_and(|p| p.can_advance());
            HttpResponse::Ok().json(serde_json::json!({
                "progress": progress,
                "can_advance": can_advance,
                "champion": t.champion(),
            }))
        }
        None => not_found(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, Tournament>::new()));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_sport_types)
            .service(api_create_tournament)
            .service(api_list_tournaments)
            .service(api_get_tournament)
            .service(api_add_player)
            .service(api_remove_player)
            .service(api_import_players)
            .service(api_generate_bracket)
            .service(api_get_bracket)
            .service(api_next_round)
            .service(api_start_match)
            .service(api_report_result)
            .service(api_progress)
    })
    .bind(bind)?
    .run()
    .await
}
