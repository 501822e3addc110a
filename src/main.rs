use crate::cities::CityPool;
use crate::config::Config;
use crate::listings::{Discoverer, Extractor, HttpSource, PropertyFinder};
use crate::router::{handle, AppState};
use astra::Server;
use std::sync::Arc;

mod cities;
mod config;
mod errors;
mod listings;
mod responses;
mod router;

#[cfg(test)]
mod tests;

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
}

fn build_state(config: &Config) -> Result<AppState<HttpSource>, Box<dyn std::error::Error>> {
    // Read once; every request samples from the same pool.
    let pool = Arc::new(CityPool::load(&config.cities_path)?);

    let source = HttpSource::new(&config.user_agent, &config.referer, config.request_timeout)?;
    let discoverer = Discoverer::new(config.base_url_str())?;
    let extractor = Extractor::new(config.value_ceiling, config.min_photos);

    let finder = PropertyFinder::new(source, pool, discoverer, extractor, config.retry);
    Ok(AppState { finder })
}

fn main() {
    init_logging();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            log::error!("❌ Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let state = match build_state(&config) {
        Ok(s) => s,
        Err(e) => {
            log::error!("❌ Startup failed: {e}");
            std::process::exit(1);
        }
    };

    log::info!(
        "Starting server at http://{} ({} workers, retry {:?})",
        config.bind_addr,
        config.max_workers,
        config.retry
    );

    let server = Server::bind(&config.bind_addr).max_workers(config.max_workers);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => responses::error_response(err),
    });

    if let Err(e) = result {
        log::error!("Server ended with error: {e}");
    }

    log::info!("Server shut down cleanly.");
}
