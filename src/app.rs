use crate::prefs::{ConfyStore, PrefStore};
use crate::style::configure_style;
use crate::timer::{Phase, TimerBackend, TimerHost};
use crate::ui::settings_window::SettingsWindow;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub struct FocusTimerApp {
    store: Arc<ConfyStore>,
    timer: TimerBackend,
    settings: Option<SettingsWindow>,
    /// While set, the viewport keeps grabbing focus (work session just ended)
    force_focus_until: Option<Instant>,
}

impl FocusTimerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        configure_style(&cc.egui_ctx);
        let store = Arc::new(ConfyStore);
        let prefs = store.load();
        Self {
            store,
            timer: TimerBackend::spawn(prefs),
            settings: None,
            force_focus_until: None,
        }
    }

    /// Open the settings panel. Controller instances are single-use, so a
    /// dismissed one is replaced with a fresh window.
    fn open_settings(&mut self) {
        if let Some(window) = self.settings.as_mut()
            && !window.is_closed()
        {
            window.show();
            return;
        }

        let mut window = SettingsWindow::new(
            self.store.clone(),
            Arc::new(self.timer.handle()),
            self.timer.left_secs_observable(),
        );
        window.set_on_submit(|| tracing::info!("Settings applied, work session restarted"));
        window.set_on_close(|| tracing::debug!("Settings window closed"));
        window.show();
        self.settings = Some(window);
    }
}

impl eframe::App for FocusTimerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // A finished work session forces the window into focus for the
        // configured number of seconds
        if self.timer.take_focus_request() {
            let secs = u64::from(self.store.load().force_window_focus_secs);
            self.force_focus_until = Some(Instant::now() + Duration::from_secs(secs));
        }
        if let Some(until) = self.force_focus_until {
            if Instant::now() < until {
                ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
            } else {
                self.force_focus_until = None;
            }
        }

        let mut settings_clicked = false;
        egui::TopBottomPanel::top("title_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(crate::constant::DEFAULT_WINDOW_TITLE);
                ui.with_layout(
                    egui::Layout::right_to_left(egui::Align::Center),
                    |ui| {
                        if ui.button("⚙").on_hover_text("Settings").clicked() {
                            settings_clicked = true;
                        }
                    },
                );
            });
        });
        if settings_clicked {
            self.open_settings();
        }

        let phase = self.timer.phase();
        let left = self.timer.left_secs();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.label(match phase {
                    Phase::Work => "Focusing",
                    Phase::Break => "On break",
                    Phase::Idle => "Idle",
                });
                ui.label(
                    egui::RichText::new(format_countdown(left))
                        .monospace()
                        .size(48.0),
                );
                if phase != Phase::Idle {
                    let ends = chrono::Local::now() + chrono::Duration::seconds(left as i64);
                    ui.label(
                        egui::RichText::new(format!("Ends at {}", ends.format("%H:%M")))
                            .small()
                            .weak(),
                    );
                }
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    if ui.button("Start work").clicked() {
                        self.timer.handle().start_work();
                    }
                    if ui.button("Pause").clicked() {
                        self.timer.handle().pause_all();
                    }
                });
            });
        });

        if let Some(window) = self.settings.as_mut() {
            window.ui(ctx);
            if window.is_closed() {
                self.settings = None;
            }
        }

        // Keep the countdown ticking on screen
        if phase != Phase::Idle || self.force_focus_until.is_some() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}

/// Format a countdown in seconds to a readable string (MM:SS or HH:MM:SS)
pub(crate) fn format_countdown(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(0), "00:00");
        assert_eq!(format_countdown(59), "00:59");
        assert_eq!(format_countdown(60), "01:00");
        assert_eq!(format_countdown(1500), "25:00");
        assert_eq!(format_countdown(3599), "59:59");
        assert_eq!(format_countdown(3600), "01:00:00");
        assert_eq!(format_countdown(7265), "02:01:05");
    }
}
