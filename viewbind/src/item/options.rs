use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Choices offered by select, radio and multi-check items.
///
/// Options are arbitrary JSON objects; `value_key` and `label_key` name the
/// fields holding the stored value and the displayed label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOptions {
    pub options: Vec<Value>,
    #[serde(default = "default_value_key")]
    pub value_key: String,
    #[serde(default = "default_label_key")]
    pub label_key: String,
}

fn default_value_key() -> String {
    "value".to_string()
}

fn default_label_key() -> String {
    "label".to_string()
}

impl SelectOptions {
    pub fn new(options: Vec<Value>) -> Self {
        Self {
            options,
            value_key: default_value_key(),
            label_key: default_label_key(),
        }
    }

    /// Use custom field names for the value and label.
    pub fn with_keys(mut self, value_key: impl Into<String>, label_key: impl Into<String>) -> Self {
        self.value_key = value_key.into();
        self.label_key = label_key.into();
        self
    }

    /// Stored value of an option, if the option has one.
    pub fn value_of<'a>(&self, option: &'a Value) -> Option<&'a Value> {
        option.get(&self.value_key)
    }

    /// Label of an option rendered as text.
    pub fn label_of(&self, option: &Value) -> String {
        match option.get(&self.label_key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    /// Options whose value is a string contained in `values`, in option order.
    pub fn matching<'a>(&'a self, values: &'a [String]) -> impl Iterator<Item = &'a Value> + 'a {
        self.options.iter().filter(move |option| {
            self.value_of(option)
                .and_then(Value::as_str)
                .is_some_and(|v| values.iter().any(|s| s == v))
        })
    }
}

/// Options with custom value and label keys.
pub fn select_options(
    options: Vec<Value>,
    value_key: Option<&str>,
    label_key: Option<&str>,
) -> SelectOptions {
    SelectOptions::new(options).with_keys(
        value_key.unwrap_or("value"),
        label_key.unwrap_or("label"),
    )
}

/// Options whose value and label are the same string.
pub fn select_option_strings<S: AsRef<str>>(options: &[S]) -> SelectOptions {
    SelectOptions::new(
        options
            .iter()
            .map(|o| json!({ "value": o.as_ref(), "label": o.as_ref() }))
            .collect(),
    )
}

/// Options whose value and label are the same number.
pub fn select_option_numbers(options: &[f64]) -> SelectOptions {
    SelectOptions::new(
        options
            .iter()
            .map(|o| json!({ "value": o, "label": o }))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_options_share_value_and_label() {
        let opts = select_option_strings(&["a", "b"]);
        assert_eq!(opts.options.len(), 2);
        assert_eq!(opts.value_of(&opts.options[1]), Some(&json!("b")));
        assert_eq!(opts.label_of(&opts.options[1]), "b");
    }

    #[test]
    fn test_custom_keys() {
        let opts = select_options(
            vec![json!({ "code": "jp", "name": "Japan" })],
            Some("code"),
            Some("name"),
        );
        assert_eq!(opts.value_of(&opts.options[0]), Some(&json!("jp")));
        assert_eq!(opts.label_of(&opts.options[0]), "Japan");
    }

    #[test]
    fn test_number_labels_render_as_text() {
        let opts = select_option_numbers(&[1.5]);
        assert_eq!(opts.label_of(&opts.options[0]), "1.5");
    }
}
