//! Main application entry point.

use ipen_app::{App, AppConfig, ShortcutRegistry};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting Ipen");

    ShortcutRegistry::print_all();

    if let Err(e) = App::run(AppConfig::default()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
