use anyhow::Context;
use log::LevelFilter;
use std::io::{self, BufRead, Write};
use trace_layout::layout::{ComponentCatalog, LayoutConfig};
use trace_layout::server::util::ServerLogger;
use trace_layout::server::{error_codes, handle_request, Request, Response, ServerState};

fn main() -> anyhow::Result<()> {
    ServerLogger::new(LevelFilter::Debug, true)
        .install()
        .context("Failed to install logger")?;

    let config = match std::env::args().nth(1) {
        Some(path) => LayoutConfig::from_file(&path)?,
        None => LayoutConfig::default(),
    };
    let catalog = ComponentCatalog::from_path(&config.catalog_path)
        .with_context(|| format!("Failed to load component library {}", config.catalog_path.display()))?;

    log::info!("Starting layout server with {} component types...", catalog.len());
    let mut state = ServerState::new(config, catalog);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                log::error!("Error reading stdin: {}", e);
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => handle_request(&mut state, request),
            Err(e) => {
                log::error!("Failed to parse request: {}", e);
                Response::error(None, error_codes::PARSE_ERROR, format!("Parse error: {}", e))
            }
        };

        writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
        stdout.flush()?;
    }

    log::info!("stdin closed, shutting down");
    Ok(())
}
