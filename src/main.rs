use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::sync::Notify;

use report_server::{config, logger, server};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> Result<(), BoxError> {
    // Config file path without extension, e.g. `report-server /etc/report-server/config`
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config".to_string());
    let cfg = config::Config::load_from(&config_path)?;
    cfg.validate()?;
    logger::init(&cfg.logging)?;

    // Create Tokio runtime, worker count from config when set
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), BoxError> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    for (name, dir) in [("CSV", &cfg.csv.base_dir), ("Reports", &cfg.reports.base_dir)] {
        if !dir.is_dir() {
            logger::log_warning(&format!(
                "{name} directory '{}' does not exist yet",
                dir.display()
            ));
        }
    }

    let state = Arc::new(config::AppState::new(&cfg));
    let active_connections = Arc::new(AtomicUsize::new(0));
    let shutdown = Arc::new(Notify::new());

    logger::log_server_start(&addr, &cfg);
    server::start_signal_handler(Arc::clone(&shutdown));
    server::start_server_loop(listener, state, active_connections, shutdown).await;

    Ok(())
}
