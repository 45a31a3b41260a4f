//! Classroom HTTP routes.

use actix_web::web;
use serde::{Deserialize, Serialize};

use crate::domain::{Classroom, EpochMillis, Player, ScoreEntry};
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::middleware::request_trace::record_classroom;
use crate::services::classrooms::player_from_input;
use crate::services::scores::entry_from_input;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateClassroomRequest {
    #[serde(default)]
    code: Option<String>,
    player_id: String,
    #[serde(default)]
    player_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JoinClassroomRequest {
    code: String,
    player_id: String,
    #[serde(default)]
    player_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LeaveClassroomRequest {
    #[serde(default)]
    code: String,
    #[serde(default)]
    player_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitScoreRequest {
    #[serde(default)]
    code: String,
    #[serde(default)]
    player_id: String,
    #[serde(default)]
    player_name: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    successful_hashes: i64,
    #[serde(default)]
    timestamp: Option<EpochMillis>,
}

#[derive(Debug, Serialize)]
struct ClassroomResponse {
    success: bool,
    classroom: Classroom,
}

#[derive(Debug, Serialize)]
struct SuccessResponse {
    success: bool,
}

#[derive(Debug, Serialize)]
struct PlayersResponse {
    players: Vec<Player>,
}

#[derive(Debug, Serialize)]
struct LeaderboardResponse {
    leaderboard: Vec<ScoreEntry>,
}

/// POST /api/classroom/create
///
/// Without a `code` the server picks a free one.
async fn create_classroom(
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateClassroomRequest>,
) -> Result<web::Json<ClassroomResponse>, AppError> {
    let body = body.into_inner();
    if let Some(code) = body.code.as_deref() {
        record_classroom(code.trim());
    }
    let creator = player_from_input(&body.player_id, &body.player_name)?;
    let classroom = app_state
        .classrooms()
        .create(&app_state.store, body.code.as_deref(), creator)?;
    record_classroom(&classroom.code);

    Ok(web::Json(ClassroomResponse {
        success: true,
        classroom,
    }))
}

/// POST /api/classroom/join
async fn join_classroom(
    app_state: web::Data<AppState>,
    body: ValidatedJson<JoinClassroomRequest>,
) -> Result<web::Json<ClassroomResponse>, AppError> {
    let body = body.into_inner();
    record_classroom(body.code.trim());
    let player = player_from_input(&body.player_id, &body.player_name)?;
    let classroom = app_state
        .classrooms()
        .join(&app_state.store, &body.code, player)?;

    Ok(web::Json(ClassroomResponse {
        success: true,
        classroom,
    }))
}

/// POST /api/classroom/leave
///
/// Always succeeds for well-formed JSON; missing fields leave nothing.
async fn leave_classroom(
    app_state: web::Data<AppState>,
    body: ValidatedJson<LeaveClassroomRequest>,
) -> Result<web::Json<SuccessResponse>, AppError> {
    record_classroom(body.code.trim());
    app_state
        .classrooms()
        .leave(&app_state.store, &body.code, &body.player_id);

    Ok(web::Json(SuccessResponse { success: true }))
}

/// GET /api/classroom/players/{code}
async fn list_players(
    app_state: web::Data<AppState>,
    code: web::Path<String>,
) -> Result<web::Json<PlayersResponse>, AppError> {
    let players = app_state
        .classrooms()
        .list_players(&app_state.store, &code)?;

    Ok(web::Json(PlayersResponse { players }))
}

/// POST /api/classroom/score
///
/// Whether an unknown code is accepted depends on the configured score policy.
async fn submit_score(
    app_state: web::Data<AppState>,
    body: ValidatedJson<SubmitScoreRequest>,
) -> Result<web::Json<SuccessResponse>, AppError> {
    let body = body.into_inner();
    record_classroom(body.code.trim());
    let entry = entry_from_input(
        &body.player_id,
        &body.player_name,
        body.score,
        body.successful_hashes,
        body.timestamp,
    );
    app_state.scores().submit(&app_state.store, &body.code, entry)?;

    Ok(web::Json(SuccessResponse { success: true }))
}

/// GET /api/classroom/leaderboard/{code}
async fn leaderboard(
    app_state: web::Data<AppState>,
    code: web::Path<String>,
) -> Result<web::Json<LeaderboardResponse>, AppError> {
    let leaderboard = app_state.scores().leaderboard(&app_state.store, &code);
    Ok(web::Json(LeaderboardResponse { leaderboard }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/create", web::post().to(create_classroom))
        .route("/join", web::post().to(join_classroom))
        .route("/leave", web::post().to(leave_classroom))
        .route("/players/{code}", web::get().to(list_players))
        .route("/score", web::post().to(submit_score))
        .route("/leaderboard/{code}", web::get().to(leaderboard));
}
