//! Message templates shared by every validation backend.

pub fn required(label: &str) -> String {
    format!("{label} is required. Please enter a value")
}

pub fn required_selection(label: &str) -> String {
    format!("{label} is required. Please select at least one value")
}

pub fn required_range(label: &str) -> String {
    format!("{label} is required.")
}

pub fn too_short(label: &str, min: u64) -> String {
    format!("{label} is too short. Please enter at least {min} characters")
}

pub fn too_long(label: &str, max: u64) -> String {
    format!("{label} is too long. Please enter at most {max} characters")
}

pub fn too_small(label: &str, min: f64) -> String {
    format!("{label} is too small. Please enter a number of at least {min}")
}

pub fn too_large(label: &str, max: f64) -> String {
    format!("{label} is too large. Please enter a number of at most {max}")
}

pub fn invalid_email(label: &str) -> String {
    format!("{label} must be a valid email address")
}

pub fn invalid_pattern(label: &str) -> String {
    format!("{label} does not match the required format")
}

/// Reported when an item's own `reg_exp` does not compile.
pub fn broken_pattern(pattern: &str, error: &str) -> String {
    format!("Invalid regular expression '{pattern}': {error}")
}

pub fn invalid_type(expected: &str, received: &str) -> String {
    format!("Expected {expected}, received {received}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_render_without_trailing_zero() {
        assert_eq!(
            too_small("Age", 18.0),
            "Age is too small. Please enter a number of at least 18"
        );
        assert_eq!(
            too_large("Rate", 0.5),
            "Rate is too large. Please enter a number of at most 0.5"
        );
    }

    #[test]
    fn test_label_leads_every_message() {
        assert!(required("Name").starts_with("Name "));
        assert!(too_long("Name", 20).contains("20"));
    }
}
