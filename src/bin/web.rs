//! Single binary web server: JSON API for members, tournaments, schedules and scores.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT, DATA_FILE,
//! MEMBERS_CSV, SYNC_INTERVAL_SECS.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::NaiveDate;
use round_robin_web::{
    api_error::ApiError,
    config::ServerConfig,
    members::{MemberForm, MemberPool},
    parse_score,
    repository::{JsonFileRepository, Repository},
    service::Dashboard,
    CompletionPredicate, TournamentId, TournamentStatus,
};
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

type FileDashboard = Dashboard<JsonFileRepository>;

/// Shared dashboard: member pool plus the file-backed store.
type AppState = Data<RwLock<FileDashboard>>;

fn read(state: &AppState) -> Result<RwLockReadGuard<'_, FileDashboard>, ApiError> {
    state.read().map_err(|_| ApiError::Lock)
}

fn write(state: &AppState) -> Result<RwLockWriteGuard<'_, FileDashboard>, ApiError> {
    state.write().map_err(|_| ApiError::Lock)
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
    pending_changes: usize,
}

/// ?q= searches member name, email and team label.
#[derive(Deserialize)]
struct MembersQuery {
    #[serde(default)]
    q: Option<String>,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default)]
    start_date: Option<NaiveDate>,
    #[serde(default)]
    end_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
struct RenameBody {
    name: String,
}

#[derive(Deserialize)]
struct StatusBody {
    status: String,
}

#[derive(Deserialize)]
struct RosterBody {
    member_ids: Vec<String>,
}

/// Scores arrive as JSON numbers or numeric strings; anything else is rejected.
#[derive(Deserialize)]
struct ScoreBody {
    score_a: Value,
    score_b: Value,
}

/// Raw status string, parsed case-insensitively by the handler.
#[derive(Deserialize)]
struct ListQuery {
    #[serde(default)]
    status: Option<String>,
}

#[derive(Deserialize)]
struct SummaryQuery {
    #[serde(default)]
    predicate: CompletionPredicate,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and match id
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: String,
}

#[derive(Deserialize)]
struct MemberPath {
    member_id: String,
}

#[get("/api/health")]
async fn api_health(state: AppState) -> Result<HttpResponse, ApiError> {
    let pending_changes = read(&state)?.repository().pending_changes();
    Ok(HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "round-robin-web",
        pending_changes,
    }))
}

#[get("/api/members")]
async fn api_list_members(
    state: AppState,
    query: Query<MembersQuery>,
) -> Result<HttpResponse, ApiError> {
    let members = read(&state)?.search_members(query.q.as_deref().unwrap_or(""));
    Ok(HttpResponse::Ok().json(members))
}

#[post("/api/members")]
async fn api_add_member(
    state: AppState,
    body: Json<MemberForm>,
) -> Result<HttpResponse, ApiError> {
    let outcome = write(&state)?.add_member(&body)?;
    Ok(HttpResponse::Created().json(outcome))
}

#[put("/api/members/{member_id}")]
async fn api_update_member(
    state: AppState,
    path: Path<MemberPath>,
    body: Json<MemberForm>,
) -> Result<HttpResponse, ApiError> {
    let outcome = write(&state)?.update_member(&path.member_id, &body)?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[delete("/api/members/{member_id}")]
async fn api_remove_member(
    state: AppState,
    path: Path<MemberPath>,
) -> Result<HttpResponse, ApiError> {
    let outcome = write(&state)?.remove_member(&path.member_id)?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// List tournaments, optionally filtered with ?status=upcoming|active|completed (any case).
#[get("/api/tournaments")]
async fn api_list_tournaments(
    state: AppState,
    query: Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    let status =
        TournamentStatus::parse_filter(query.status.as_deref()).map_err(ApiError::BadRequest)?;
    let tournaments = read(&state)?.tournaments(status);
    Ok(HttpResponse::Ok().json(tournaments))
}

/// Dashboard counters by status.
#[get("/api/tournaments/stats")]
async fn api_tournament_stats(state: AppState) -> Result<HttpResponse, ApiError> {
    let counts = read(&state)?.status_counts();
    Ok(HttpResponse::Ok().json(counts))
}

#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    body: Json<CreateTournamentBody>,
) -> Result<HttpResponse, ApiError> {
    let outcome =
        write(&state)?.create_tournament(&body.name, body.start_date, body.end_date)?;
    Ok(HttpResponse::Created().json(outcome))
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(
    state: AppState,
    path: Path<TournamentPath>,
) -> Result<HttpResponse, ApiError> {
    let tournament = read(&state)?.tournament(path.id)?;
    Ok(HttpResponse::Ok().json(tournament))
}

#[put("/api/tournaments/{id}")]
async fn api_rename_tournament(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RenameBody>,
) -> Result<HttpResponse, ApiError> {
    let outcome = write(&state)?.rename_tournament(path.id, &body.name)?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// Delete a tournament and all of its matches.
#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(
    state: AppState,
    path: Path<TournamentPath>,
) -> Result<HttpResponse, ApiError> {
    let outcome = write(&state)?.delete_tournament(path.id)?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// Manual status override (any status, any time).
#[put("/api/tournaments/{id}/status")]
async fn api_set_status(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<StatusBody>,
) -> Result<HttpResponse, ApiError> {
    let status: TournamentStatus = body.status.parse().map_err(ApiError::BadRequest)?;
    let outcome = write(&state)?.set_status(path.id, status)?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// Commit the roster from selected member ids.
#[post("/api/tournaments/{id}/teams")]
async fn api_assign_roster(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RosterBody>,
) -> Result<HttpResponse, ApiError> {
    let outcome = write(&state)?.assign_roster(path.id, &body.member_ids)?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[post("/api/tournaments/{id}/generate-matches")]
async fn api_generate_matches(
    state: AppState,
    path: Path<TournamentPath>,
) -> Result<HttpResponse, ApiError> {
    let outcome = write(&state)?.generate(path.id)?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[get("/api/tournaments/{id}/matches")]
async fn api_list_matches(
    state: AppState,
    path: Path<TournamentPath>,
) -> Result<HttpResponse, ApiError> {
    let matches = read(&state)?.matches(path.id)?;
    Ok(HttpResponse::Ok().json(matches))
}

/// Record or edit a match score.
#[put("/api/tournaments/{id}/matches/{match_id}/score")]
async fn api_record_score(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<ScoreBody>,
) -> Result<HttpResponse, ApiError> {
    let score_a = parse_score(&body.score_a)?;
    let score_b = parse_score(&body.score_b)?;
    let outcome = write(&state)?.record_score(path.id, &path.match_id, score_a, score_b)?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// Match counts and derived status; ?predicate=lenient_score for the legacy rule.
#[get("/api/tournaments/{id}/summary")]
async fn api_summary(
    state: AppState,
    path: Path<TournamentPath>,
    query: Query<SummaryQuery>,
) -> Result<HttpResponse, ApiError> {
    let summary = read(&state)?.summary(path.id, query.predicate)?;
    Ok(HttpResponse::Ok().json(summary))
}

/// Avoid 404 in browser tab.
#[get("/favicon.ico")]
async fn favicon() -> impl Responder {
    HttpResponse::NoContent().finish()
}

fn load_members(config: &ServerConfig) -> std::io::Result<MemberPool> {
    let Some(path) = &config.members_csv else {
        return Ok(MemberPool::new());
    };
    let file = File::open(path)?;
    let pool = MemberPool::from_csv_reader(file)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    log::info!("Loaded {} member(s) from {}", pool.len(), path.display());
    Ok(pool)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let members = load_members(&config)?;
    let repo = JsonFileRepository::open(&config.data_file)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let state = Data::new(RwLock::new(Dashboard::new(members, repo)));

    // Background task: periodically retry syncing records that failed to persist
    let state_sync = state.clone();
    let sync_interval = config.sync_interval;
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(sync_interval);
        loop {
            interval.tick().await;
            let mut g = match state_sync.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            match g.sync() {
                Ok(0) => {}
                Ok(n) => log::info!("Synced {} pending change(s)", n),
                Err(e) => log::warn!("Background sync failed: {}", e),
            }
        }
    });

    log::info!("Starting server at http://{}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(favicon)
            .service(api_list_members)
            .service(api_add_member)
            .service(api_update_member)
            .service(api_remove_member)
            .service(api_tournament_stats)
            .service(api_list_tournaments)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_rename_tournament)
            .service(api_delete_tournament)
            .service(api_set_status)
            .service(api_assign_roster)
            .service(api_generate_matches)
            .service(api_list_matches)
            .service(api_record_score)
            .service(api_summary)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
