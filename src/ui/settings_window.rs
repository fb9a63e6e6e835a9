use crate::prefs::PrefStore;
use crate::timer::TimerHost;
use crate::ui::settings_form::{FormAction, SettingsForm};
use std::sync::Arc;
use std::sync::atomic::AtomicU64;

/// Controller for the settings window.
///
/// Wraps a [`SettingsForm`] in an `egui::Window` and owns its visibility.
/// An instance is single-use: once dismissed it stays closed, and the host
/// app constructs a fresh one to reopen the panel.
pub struct SettingsWindow {
    form: SettingsForm,
    open: bool,
    closed: bool,
    on_submit: Option<Box<dyn FnMut()>>,
    on_close: Option<Box<dyn FnMut()>>,
}

impl SettingsWindow {
    pub fn new(
        store: Arc<dyn PrefStore>,
        host: Arc<dyn TimerHost>,
        left_secs: Arc<AtomicU64>,
    ) -> Self {
        Self {
            form: SettingsForm::new(store, host, left_secs),
            open: false,
            closed: false,
            on_submit: None,
            on_close: None,
        }
    }

    /// Make the window visible. Idempotent; a no-op once the window
    /// has been dismissed.
    pub fn show(&mut self) {
        if !self.closed {
            self.open = true;
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Register a callback invoked after a successful submit, once the
    /// window has closed.
    pub fn set_on_submit(&mut self, callback: impl FnMut() + 'static) {
        self.on_submit = Some(Box::new(callback));
    }

    /// Register a callback invoked when the window is dismissed by any
    /// means: submit, cancel, or its close control.
    pub fn set_on_close(&mut self, callback: impl FnMut() + 'static) {
        self.on_close = Some(Box::new(callback));
    }

    /// Render the window. Call once per frame from the app's update loop.
    pub fn ui(&mut self, ctx: &egui::Context) {
        if !self.open {
            return;
        }

        let mut keep_open = true;
        let mut action = None;
        egui::Window::new("Settings")
            .open(&mut keep_open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                action = self.form.show(ui);
            });

        match action {
            Some(FormAction::Submitted) => self.dismiss(true),
            Some(FormAction::Cancelled) => self.dismiss(false),
            None if !keep_open => self.dismiss(false),
            None => {}
        }
    }

    fn dismiss(&mut self, submitted: bool) {
        self.open = false;
        self.closed = true;
        if let Some(callback) = self.on_close.as_mut() {
            callback();
        }
        if submitted && let Some(callback) = self.on_submit.as_mut() {
            callback();
        }
    }
}
