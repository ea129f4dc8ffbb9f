use std::fs::{self, File};
use std::sync::Mutex;

use ai_master::app::App;
use ai_master::config::Config;
use ai_master::{log_info, util};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let config = Config::load()?;
    util::log::init(&config.log_dir);

    // The terminal belongs to the UI; tracing goes to a file.
    fs::create_dir_all(&config.log_dir)?;
    let trace_file = File::create(config.log_dir.join("trace.log"))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(trace_file))
        .with_ansi(false)
        .init();

    log_info!("Starting with model {}", config.model);

    let app = App::new(config)?;
    let terminal = ratatui::init();
    let result = app.run(terminal).await;
    ratatui::restore();
    result
}
