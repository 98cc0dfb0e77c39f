//! Atelier - headless scene authoring
//!
//! Builds the configured scene and reports what a UI host would start with.

use atelier::{AppConfig, AuthoringService};

fn main() {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    log::info!("Starting Atelier");

    let service = match AuthoringService::new(config) {
        Ok(service) => service,
        Err(e) => {
            log::error!("Failed to build scene: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(bounds) = service.world().bounding_box() {
        log::info!("Bounding box {:?} to {:?}", bounds.min, bounds.max);
    }
    for (face, key) in service.world().walls() {
        log::debug!("{} wall: {:?}", face.label(), key);
    }
    for (group, name) in service.groups().iter() {
        log::info!("Collision group {:?}: {}", group, name);
    }
    log::info!(
        "{} cascade rules enabled",
        service.cascades().rules().len()
    );
}
