/// Build a validator for an inclusive integer range.
///
/// The returned closure is stateless and safe to call repeatedly: it parses
/// the text as a base-10 integer and checks it against `min..=max`, yielding
/// an inline error message on failure.
pub fn range_validator(min: i64, max: i64) -> impl Fn(&str) -> Result<(), String> {
    move |text: &str| {
        let value: i64 = text
            .parse()
            .map_err(|_| "not a valid number".to_string())?;
        if value < min {
            return Err(format!("must be greater than {min}"));
        }
        if value > max {
            return Err(format!("must be lesser than {max}"));
        }
        Ok(())
    }
}
