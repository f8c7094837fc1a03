//! Helpers shared by the HTML form handlers.

/// Validation messages keyed by form field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: Vec<(&'static str, String)>,
}

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// First message recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    /// Every message in insertion order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|(_, message)| message.as_str())
    }
}

/// Trimmed value, or `None` when blank.
#[must_use]
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// HTML checkbox state. Unchecked boxes are absent from the form body.
#[must_use]
pub fn checked(value: Option<&str>) -> bool {
    matches!(value, Some("on" | "true" | "1"))
}

/// Required text field; records `message` when blank.
pub fn required(
    errors: &mut FormErrors,
    field: &'static str,
    value: Option<&str>,
    message: &str,
) -> String {
    non_blank(value).unwrap_or_else(|| {
        errors.add(field, message);
        String::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  自宅 ")), Some("自宅".to_string()));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_checked() {
        assert!(checked(Some("on")));
        assert!(!checked(None));
        assert!(!checked(Some("off")));
    }

    #[test]
    fn test_errors_lookup() {
        let mut errors = FormErrors::default();
        assert!(errors.is_empty());
        let name = required(&mut errors, "name", Some(" "), "氏名を入力してください");
        assert!(name.is_empty());
        assert_eq!(errors.get("name"), Some("氏名を入力してください"));
        assert_eq!(errors.get("email"), None);
        assert_eq!(errors.messages().count(), 1);
    }
}
