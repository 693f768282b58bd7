// --- Timetable planner - binary entry point ---

use tkb::config::Settings;
use tkb::server::AppState;
use tkb::storage::{MemoryStorage, SqliteStorage, StorageBackend};
use tkb::{load_catalog, run_server, Catalog, Planner};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let settings = Settings::from_env();

    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::new(&settings.log_level))
        .with_target(true)
        .init();

    info!("=== Timetable planner (API) ===");

    let (catalog, load_error) = match load_catalog(&settings.sources()).await {
        Ok(c) => (c, None),
        Err(e) => {
            error!(error = %e, details = %e.describe(), "could not load course data");
            (Catalog::empty(), Some(e.describe()))
        }
    };

    let store: Box<dyn StorageBackend + Send> = match SqliteStorage::open(&settings.db_path) {
        Ok(s) => Box::new(s),
        Err(e) => {
            warn!(path = %settings.db_path.display(), error = %e, "selection store unavailable, keeping it in memory");
            Box::new(MemoryStorage::new())
        }
    };

    let planner = Planner::open(catalog, store);
    info!(
        sections = planner.catalog().len(),
        restored = planner.selected_ids().len(),
        "session ready"
    );

    run_server(&settings.bind, AppState::new(planner, load_error)).await
}
