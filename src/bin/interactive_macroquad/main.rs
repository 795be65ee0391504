use macroquad::prelude::Conf;
use tracing_subscriber::EnvFilter;

mod app;
mod constants;
mod controls;
mod hud;
mod render;
mod state;

fn window_conf() -> Conf {
    app::window_conf()
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    app::run().await;
}
