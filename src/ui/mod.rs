pub mod numeric_entry;
pub mod settings_form;
pub mod settings_window;
pub mod viewport;
