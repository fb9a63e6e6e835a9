use focus_timer::app::FocusTimerApp;
use focus_timer::constant;
use focus_timer::ui;

fn main() -> eframe::Result {
    tracing_subscriber::fmt::init();

    let options = ui::viewport::build_viewport();
    eframe::run_native(
        constant::DEFAULT_WINDOW_TITLE,
        options,
        Box::new(|cc| Ok(Box::new(FocusTimerApp::new(cc)))),
    )
}
