use eframe::egui;
use tiles_music_player::{
    app::App,
    config::{self, Config},
};

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load();

    eframe::run_native(
        config::APP_NAME,
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(config::APP_NAME)
                .with_inner_size(config::WINDOW_SIZE)
                .with_min_inner_size(config::WINDOW_SIZE)
                .with_drag_and_drop(true),
            ..Default::default()
        },
        Box::new(move |cc| Ok(Box::new(App::new(cc, &config)))),
    )
}
