use egui::{Event, Response, TextEdit, Ui, Widget};

/// Keep only decimal digits from interactively typed text.
/// Dropped characters are discarded silently, no error is surfaced.
pub fn filter_typed(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// A paste is taken whole or not at all: the clipboard content must parse
/// as a base-10 integer within 64-bit range.
pub fn accept_paste(content: &str) -> bool {
    content.parse::<i64>().is_ok()
}

/// Single-line text entry that only lets numeric input through.
///
/// Wraps a plain `TextEdit` instead of subclassing anything: while this
/// entry has keyboard focus it rewrites the pending input events, so the
/// inner widget never sees the rejected characters. This is an input
/// filter only; out-of-range values are still typable digit by digit and
/// are caught by the range validator at submit time.
pub struct NumericEntry<'a> {
    text: &'a mut String,
    id_salt: &'static str,
    desired_width: f32,
}

impl<'a> NumericEntry<'a> {
    pub fn new(id_salt: &'static str, text: &'a mut String) -> Self {
        Self {
            text,
            id_salt,
            desired_width: 72.0,
        }
    }

    #[allow(dead_code)]
    pub fn desired_width(mut self, width: f32) -> Self {
        self.desired_width = width;
        self
    }
}

impl Widget for NumericEntry<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let id = ui.make_persistent_id(self.id_salt);

        if ui.memory(|m| m.has_focus(id)) {
            ui.input_mut(|input| {
                input.events.retain_mut(|event| match event {
                    Event::Text(text) => {
                        *text = filter_typed(text);
                        !text.is_empty()
                    }
                    Event::Paste(content) => accept_paste(content),
                    _ => true,
                });
            });
        }

        ui.add(
            TextEdit::singleline(self.text)
                .id(id)
                .desired_width(self.desired_width),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_text_keeps_digits_only() {
        assert_eq!(filter_typed("5"), "5");
        assert_eq!(filter_typed("0123456789"), "0123456789");
        assert_eq!(filter_typed("a"), "");
        assert_eq!(filter_typed("-"), "");
        assert_eq!(filter_typed("1a2b3"), "123");
        assert_eq!(filter_typed(" 7 "), "7");
    }

    #[test]
    fn paste_must_be_a_whole_integer() {
        assert!(accept_paste("123"));
        assert!(accept_paste("0"));
        // A signed integer parses, the range validator rejects it later
        assert!(accept_paste("-5"));
        assert!(!accept_paste("abc"));
        assert!(!accept_paste("12.3"));
        assert!(!accept_paste("12 3"));
        assert!(!accept_paste(""));
    }
}
