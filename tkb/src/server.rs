use actix_cors::Cors;
use actix_web::error::BlockingError;
use actix_web::http::header;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use crate::export::EXPORT_FILE_NAME;
use crate::models::{StatusFilter, ToggleOutcome};
use crate::planner::Planner;

/// Shared application state. Every selection call goes through the mutex,
/// so concurrent requests are applied one at a time.
pub struct AppState {
    pub planner: Mutex<Planner>,
    /// Why the catalog is empty, when loading failed at startup.
    pub load_error: Option<String>,
}

impl AppState {
    pub fn new(planner: Planner, load_error: Option<String>) -> AppState {
        AppState { planner: Mutex::new(planner), load_error }
    }
}

#[derive(Deserialize)]
struct CoursesQuery {
    #[serde(default)]
    q: String,
    #[serde(default)]
    filter: StatusFilter,
}

#[derive(Serialize)]
struct SelectedEntry {
    id: String,
    title: String,
    instructor: String,
    schedule: String,
    weeks: String,
    color: &'static str,
    conflicts_with: Vec<String>,
}

/// GET /courses?q=...&filter=all|available|selected
async fn courses_handler(state: web::Data<AppState>, query: web::Query<CoursesQuery>) -> impl Responder {
    let q = query.into_inner();
    let mut planner = state.planner.lock();
    if planner.catalog().is_empty() {
        if let Some(err) = &state.load_error {
            return HttpResponse::ServiceUnavailable()
                .json(json!({"error": "no course data available", "details": err}));
        }
    }
    let courses = planner.listing(&q.q, q.filter);
    HttpResponse::Ok().json(json!({
        "source": planner.catalog().source(),
        "loaded_at": planner.catalog().loaded_at(),
        "count": courses.len(),
        "courses": courses,
    }))
}

/// GET /selection
async fn selection_handler(state: web::Data<AppState>) -> impl Responder {
    let mut planner = state.planner.lock();
    let ids: Vec<String> = planner.selected_ids().iter().map(|s| s.to_string()).collect();
    let mut entries = Vec::with_capacity(ids.len());
    for id in ids.iter() {
        let Some(s) = planner.catalog().get(id).cloned() else { continue };
        let conflicts_with = planner.conflicts_of(id).iter().map(|c| c.id.clone()).collect();
        entries.push(SelectedEntry {
            color: planner.color_for(&s.course_code),
            id: s.id,
            title: s.title,
            instructor: s.instructor,
            schedule: s.raw_schedule,
            weeks: s.raw_weeks,
            conflicts_with,
        });
    }
    HttpResponse::Ok().json(json!({
        "count": entries.len(),
        "courses": entries,
        "has_conflict": planner.has_any_conflict(),
        "conflicts": planner.conflicting_pairs(),
    }))
}

/// POST /selection/{id}/toggle
async fn toggle_handler(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    let target = id.clone();
    // the snapshot write is blocking I/O, keep it off the async workers
    let result = web::block(move || state.planner.lock().toggle(&target)).await;
    match result {
        Ok(Ok(outcome)) => {
            info!(id = %id, ?outcome, "toggle");
            match &outcome {
                ToggleOutcome::NotFound => HttpResponse::NotFound().json(&outcome),
                ToggleOutcome::RejectedFull => HttpResponse::Conflict().json(&outcome),
                _ => HttpResponse::Ok().json(&outcome),
            }
        }
        Ok(Err(e)) => {
            error!(id = %id, error = %e, "failed to persist selection");
            HttpResponse::InternalServerError().json(json!({"error": format!("failed to persist selection: {}", e)}))
        }
        Err(e) => blocking_failed(e),
    }
}

/// DELETE /selection
async fn clear_handler(state: web::Data<AppState>) -> impl Responder {
    match web::block(move || state.planner.lock().clear()).await {
        Ok(Ok(())) => HttpResponse::Ok().json(json!({"status": "ok"})),
        Ok(Err(e)) => {
            error!(error = %e, "failed to persist cleared selection");
            HttpResponse::InternalServerError().json(json!({"error": format!("failed to persist selection: {}", e)}))
        }
        Err(e) => blocking_failed(e),
    }
}

fn blocking_failed(e: BlockingError) -> HttpResponse {
    error!(error = %e, "store task did not complete");
    HttpResponse::InternalServerError().json(json!({"error": "store task did not complete"}))
}

/// GET /timetable
async fn timetable_handler(state: web::Data<AppState>) -> impl Responder {
    let grid = state.planner.lock().timetable();
    HttpResponse::Ok().json(grid)
}

/// GET /export
async fn export_handler(state: web::Data<AppState>) -> impl Responder {
    let planner = state.planner.lock();
    if planner.selected_ids().is_empty() {
        return HttpResponse::BadRequest().json(json!({"error": "nothing selected to export"}));
    }
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
        ))
        .body(planner.export())
}

/// GET /note
async fn note_handler(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(json!({"closed": state.planner.lock().note_closed()}))
}

/// POST /note/close
async fn close_note_handler(state: web::Data<AppState>) -> impl Responder {
    match web::block(move || state.planner.lock().close_note()).await {
        Ok(Ok(())) => HttpResponse::Ok().json(json!({"closed": true})),
        Ok(Err(e)) => {
            error!(error = %e, "failed to store note flag");
            HttpResponse::InternalServerError().json(json!({"error": format!("{}", e)}))
        }
        Err(e) => blocking_failed(e),
    }
}

async fn help_handler() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "description": "Timetable planner API. Browse sections, toggle them into a personal timetable, check conflicts and export.",
        "endpoints": {
            "GET /courses": "list sections; query: q (search title/instructor), filter = all | available | selected",
            "GET /selection": "selected sections with their conflicts",
            "POST /selection/{id}/toggle": "add or remove a section (full sections are refused, conflicts only warned)",
            "DELETE /selection": "remove every selected section",
            "GET /timetable": "12 periods x 6 days grid of the selection",
            "GET /export": "plain text timetable download",
            "GET /note": "whether the data-source notice was dismissed",
            "POST /note/close": "dismiss the data-source notice"
        }
    }))
}

/// Route table, shared by the server and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/courses", web::get().to(courses_handler))
        .route("/selection", web::get().to(selection_handler))
        .route("/selection", web::delete().to(clear_handler))
        .route("/selection/{id}/toggle", web::post().to(toggle_handler))
        .route("/timetable", web::get().to(timetable_handler))
        .route("/export", web::get().to(export_handler))
        .route("/note", web::get().to(note_handler))
        .route("/note/close", web::post().to(close_note_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(bind_addr: &str, state: AppState) -> std::io::Result<()> {
    let data = web::Data::new(state);
    info!("listening on http://{}", bind_addr);
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(data.clone())
            .configure(configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
