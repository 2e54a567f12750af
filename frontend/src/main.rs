use trip_planner::app;
use trip_planner::config::AppConfig;

#[cfg(target_arch = "wasm32")]
fn main() {
    let config = AppConfig::bundled();
    trip_planner::logging::init(config.log_level());

    if let Err(err) = start(&config) {
        log::error!("failed to start: {err}");
    }
}

#[cfg(target_arch = "wasm32")]
fn start(config: &AppConfig) -> Result<(), app::StartError> {
    use trip_planner::framework::dom::WebDom;
    use trip_planner::framework::error::ViewError;

    let dom = WebDom::new().map_err(ViewError::from)?;
    let root = dom.body().ok_or(ViewError::InvalidContainer)?;
    let app = app::App::mount(dom, &root, config, app::bundled_catalog()?)?;
    // The page owns the app until it is unloaded.
    std::mem::forget(app);
    Ok(())
}

/// Without a browser, render the page into memory and print it.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    let config = AppConfig::bundled();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(config.log_level.as_str()));

    match app::preview(&config) {
        Ok(html) => println!("{html}"),
        Err(err) => {
            log::error!("preview failed: {err}");
            std::process::exit(1);
        }
    }
}
