mod bootstrap;

use anyhow::Result;
use dash_core::error::DashError;
use dash_core::settings::Settings;
use dash_runtime::loader::LoadOrchestrator;
use dash_ui::app::App;
use dash_ui::state::SortSpec;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Salary Dash v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("Theme: {}, Sort: {}", settings.theme, settings.sort);

    // Resolve the data file before entering the alternate screen so a bad
    // path fails as a plain CLI error.
    let data_file = match settings.data_file.clone() {
        Some(path) => {
            if !path.is_file() {
                return Err(DashError::DataFileNotFound(path).into());
            }
            path
        }
        None => match bootstrap::discover_data_file() {
            Some(path) => path,
            None => anyhow::bail!(
                "no salary data file found; pass --data-file or place salaries.csv \
                 in the current directory or ~/.salary-dash/"
            ),
        },
    };
    tracing::info!("Data file: {}", data_file.display());

    let orchestrator = LoadOrchestrator::new(data_file);
    let (rx, handle) = orchestrator.start();
    let app = App::new(
        &settings.theme,
        SortSpec::from_name(&settings.sort),
        orchestrator,
    );

    // Run the TUI event loop. The loop exits on 'q' / Ctrl+C inside the TUI.
    // We also listen for Ctrl+C at the OS level so that signals received
    // while the terminal is in raw mode are handled cleanly.
    tokio::select! {
        result = app.run(rx, handle) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl+C received; shutting down");
        }
    }

    tracing::info!("Salary Dash exited cleanly");
    Ok(())
}
