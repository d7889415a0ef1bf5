use std::path::Path;
use std::process;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use logorec::{web, AppConfig, Recommender};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Optional single argument: path to a config JSON; defaults otherwise
    let config = match std::env::args().nth(1) {
        Some(path) => match AppConfig::from_json_file(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                error!("failed to load config {}: {}", path, e);
                process::exit(1);
            }
        },
        None => AppConfig::default(),
    };

    info!(
        "building logo catalog from {}",
        config.snapshot_path.display()
    );
    let recommender = match Recommender::build(&config).await {
        Ok(recommender) => recommender,
        Err(e) => {
            error!("failed to build catalog: {}", e);
            process::exit(1);
        }
    };
    info!(
        candidates = recommender.candidate_count(),
        "catalog built, starting server"
    );

    if let Err(e) = web::serve(config, recommender).await {
        error!("{}", e);
        process::exit(1);
    }
}
