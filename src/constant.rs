// Window size constants
pub const DEFAULT_WINDOW_WIDTH: f32 = 420.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 340.0;
pub const DEFAULT_WINDOW_TITLE: &str = "Focus Timer";

/// Application name used for the preference file location
pub const APP_NAME: &str = "focus-timer";

/// Preference defaults, substituted for any unset key
pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;
pub const DEFAULT_FORCE_FOCUS_SECS: u32 = 60;

/// Accepted range for every numeric preference, checked at submit time
pub const PREF_MIN: i64 = 0;
pub const PREF_MAX: i64 = 999;
