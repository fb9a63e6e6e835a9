use crate::constant::{
    DEFAULT_BREAK_MINUTES, DEFAULT_FORCE_FOCUS_SECS, DEFAULT_WORK_MINUTES, PREF_MAX, PREF_MIN,
};
use crate::prefs::{PrefStore, Preferences};
use crate::timer::TimerHost;
use crate::ui::numeric_entry::NumericEntry;
use crate::validate::range_validator;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

pub enum FormAction {
    Submitted,
    Cancelled,
}

/// One editable row: a string buffer behind a numeric entry, plus the
/// validator and the inline error it produced last time.
struct NumericField {
    label: &'static str,
    id_salt: &'static str,
    hint: String,
    buffer: String,
    validator: Box<dyn Fn(&str) -> Result<(), String>>,
    error: Option<String>,
}

impl NumericField {
    fn new(label: &'static str, id_salt: &'static str, hint: String, value: u32) -> Self {
        Self {
            label,
            id_salt,
            hint,
            buffer: value.to_string(),
            validator: Box::new(range_validator(PREF_MIN, PREF_MAX)),
            error: None,
        }
    }

    /// Run the validator, remembering the inline error on failure.
    fn validate(&mut self) -> Option<u32> {
        match (self.validator)(&self.buffer) {
            Ok(()) => {
                self.error = None;
                self.buffer.parse().ok()
            }
            Err(message) => {
                self.error = Some(message);
                None
            }
        }
    }
}

/// The settings form: three validated duration fields plus a read-only
/// row mirroring the timer's countdown. Store and timer host are injected.
pub struct SettingsForm {
    store: Arc<dyn PrefStore>,
    host: Arc<dyn TimerHost>,
    left_secs: Arc<AtomicU64>,
    work: NumericField,
    brk: NumericField,
    focus: NumericField,
}

impl SettingsForm {
    pub fn new(
        store: Arc<dyn PrefStore>,
        host: Arc<dyn TimerHost>,
        left_secs: Arc<AtomicU64>,
    ) -> Self {
        let prefs = store.load();
        Self {
            store,
            host,
            left_secs,
            work: NumericField::new(
                "Work duration in minutes",
                "work_minutes",
                format!("Default is: {DEFAULT_WORK_MINUTES} minutes."),
                prefs.work_minutes,
            ),
            brk: NumericField::new(
                "Break duration in minutes",
                "break_minutes",
                format!("Default is: {DEFAULT_BREAK_MINUTES} minutes."),
                prefs.break_minutes,
            ),
            focus: NumericField::new(
                "Force window focus in seconds",
                "force_focus_secs",
                format!("Default is: {DEFAULT_FORCE_FOCUS_SECS} seconds."),
                prefs.force_window_focus_secs,
            ),
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) -> Option<FormAction> {
        let mut action = None;

        egui::Grid::new("settings_form")
            .num_columns(2)
            .spacing([16.0, 10.0])
            .show(ui, |ui| {
                for field in [&mut self.work, &mut self.brk, &mut self.focus] {
                    ui.label(field.label);
                    ui.vertical(|ui| {
                        ui.add(NumericEntry::new(field.id_salt, &mut field.buffer));
                        ui.label(egui::RichText::new(&field.hint).small().weak());
                        if let Some(message) = &field.error {
                            ui.label(
                                egui::RichText::new(message)
                                    .small()
                                    .color(ui.visuals().error_fg_color),
                            );
                        }
                    });
                    ui.end_row();
                }

                ui.label("Left time in seconds");
                ui.label(self.left_secs.load(Ordering::Relaxed).to_string());
                ui.end_row();
            });

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Submit").clicked() && self.submit() {
                action = Some(FormAction::Submitted);
            }
            if ui.button("Cancel").clicked() {
                action = Some(FormAction::Cancelled);
            }
        });

        action
    }

    /// Validate every field, then persist and restart the timer.
    ///
    /// Returns false when any field is out of range, leaving the inline
    /// errors set and the stored preferences untouched. On success the
    /// sequence is: pause timers, save synchronously, reload durations,
    /// then a fire-and-forget restart of the work session.
    pub fn submit(&mut self) -> bool {
        let work = self.work.validate();
        let brk = self.brk.validate();
        let focus = self.focus.validate();
        let (Some(work_minutes), Some(break_minutes), Some(force_window_focus_secs)) =
            (work, brk, focus)
        else {
            return false;
        };

        self.host.pause_all();
        let prefs = Preferences {
            work_minutes,
            break_minutes,
            force_window_focus_secs,
        };
        self.store.save(&prefs);
        self.host.reload(&prefs);
        self.host.start_work();
        info!("Settings applied: {:?}", prefs);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryStore;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicU64;

    struct RecordingHost {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingHost {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl TimerHost for RecordingHost {
        fn pause_all(&self) {
            self.calls.lock().unwrap().push("pause_all".into());
        }

        fn reload(&self, prefs: &Preferences) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("reload({})", prefs.work_minutes));
        }

        fn start_work(&self) {
            self.calls.lock().unwrap().push("start_work".into());
        }
    }

    fn build_form(
        store: Arc<MemoryStore>,
        host: Arc<RecordingHost>,
    ) -> SettingsForm {
        SettingsForm::new(store, host, Arc::new(AtomicU64::new(0)))
    }

    #[test]
    fn fields_show_defaults_for_empty_store() {
        let form = build_form(Arc::new(MemoryStore::empty()), Arc::new(RecordingHost::new()));
        assert_eq!(form.work.buffer, "25");
        assert_eq!(form.brk.buffer, "5");
        assert_eq!(form.focus.buffer, "60");
        assert_eq!(form.work.hint, "Default is: 25 minutes.");
        assert_eq!(form.focus.hint, "Default is: 60 seconds.");
    }

    #[test]
    fn hints_show_documented_defaults_even_with_stored_values() {
        let store = Arc::new(MemoryStore::empty());
        store.save(&Preferences {
            work_minutes: 50,
            break_minutes: 10,
            force_window_focus_secs: 120,
        });
        let form = build_form(store, Arc::new(RecordingHost::new()));

        // Entries are bound to the stored values, the hint keeps naming
        // the documented fallback
        assert_eq!(form.work.buffer, "50");
        assert_eq!(form.work.hint, "Default is: 25 minutes.");
        assert_eq!(form.brk.buffer, "10");
        assert_eq!(form.brk.hint, "Default is: 5 minutes.");
        assert_eq!(form.focus.hint, "Default is: 60 seconds.");
    }

    #[test]
    fn submit_persists_and_restarts_in_order() {
        let store = Arc::new(MemoryStore::empty());
        let host = Arc::new(RecordingHost::new());
        let mut form = build_form(store.clone(), host.clone());

        form.work.buffer = "50".to_string();
        assert!(form.submit());

        assert_eq!(
            store.stored(),
            Some(Preferences {
                work_minutes: 50,
                break_minutes: 5,
                force_window_focus_secs: 60,
            })
        );
        assert_eq!(host.calls(), vec!["pause_all", "reload(50)", "start_work"]);
    }

    #[test]
    fn out_of_range_field_blocks_submit() {
        let store = Arc::new(MemoryStore::empty());
        let host = Arc::new(RecordingHost::new());
        let mut form = build_form(store.clone(), host.clone());

        form.brk.buffer = "1000".to_string();
        assert!(!form.submit());
        assert_eq!(form.brk.error.as_deref(), Some("must be lesser than 999"));
        assert_eq!(store.stored(), None);
        assert!(host.calls().is_empty());
    }

    #[test]
    fn non_numeric_field_blocks_submit() {
        let store = Arc::new(MemoryStore::empty());
        let host = Arc::new(RecordingHost::new());
        let mut form = build_form(store.clone(), host.clone());

        form.work.buffer.clear();
        assert!(!form.submit());
        assert_eq!(form.work.error.as_deref(), Some("not a valid number"));
        assert!(host.calls().is_empty());
    }

    #[test]
    fn resubmit_after_fixing_the_field_succeeds() {
        let store = Arc::new(MemoryStore::empty());
        let host = Arc::new(RecordingHost::new());
        let mut form = build_form(store.clone(), host.clone());

        form.work.buffer = "abc".to_string();
        assert!(!form.submit());

        form.work.buffer = "30".to_string();
        assert!(form.submit());
        assert_eq!(form.work.error, None);
        assert_eq!(store.stored().map(|p| p.work_minutes), Some(30));
    }
}
