mod app;
mod core;
mod db;
mod theme;
mod ui;

fn main() -> iced::Result {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("Toastline starting...");

    iced::application(app::App::new, app::App::update, app::App::view)
        .title(app::App::title)
        .subscription(app::App::subscription)
        .theme(app::App::theme)
        .window_size((app::WINDOW_WIDTH, app::WINDOW_HEIGHT))
        .antialiasing(true)
        .run()
}
