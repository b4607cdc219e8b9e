mod app;
mod core;
mod errors;
mod global_constants;
mod ports;
mod presentation;
mod utils;

use iced::daemon;

fn main() -> iced::Result {
    env_logger::init();

    log::info!("[MAIN] Starting quicksnip");

    daemon(
        app::SnipApp::build,
        app::SnipApp::handle_update,
        app::SnipApp::render_view,
    )
    .subscription(app::SnipApp::handle_subscription)
    .run()
}
