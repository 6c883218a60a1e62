//! Ready-made character-class and format rules for string items.

use super::{CustomRuleMessage, CustomValidationRules, create_reg_exp_validator, string_custom_validation_rule};

/// `(name, pattern, message suffix)`; messages read "<label> <suffix>".
const BUILTIN_RULES: &[(&str, &str, &str)] = &[
    ("halfWidthDigits", r"^[0-9]*$", "must contain half-width digits only"),
    ("halfWidthLetters", r"^[a-zA-Z]*$", "must contain half-width letters only"),
    (
        "halfWidthSymbols",
        r"^[!-)+-/:-@\[-`{-~]*$",
        "must contain half-width symbols only",
    ),
    ("halfWidthKana", r"^[ｦ-ﾟ ]*$", "must contain half-width katakana only"),
    (
        "halfWidthAlphanumeric",
        r"^[a-zA-Z0-9]*$",
        "must contain half-width letters and digits only",
    ),
    (
        "halfWidthAlphanumericSymbols",
        r"^[a-zA-Z0-9!-/:-@\[-`{-~]*$",
        "must contain half-width letters, digits and symbols only",
    ),
    ("halfWidth", r"^[ -~｡-ﾟ]*$", "must contain half-width characters only"),
    (
        "fullWidthAlphanumeric",
        r"^[Ａ-Ｚａ-ｚ０-９]*$",
        "must contain full-width letters and digits only",
    ),
    ("fullWidthHiragana", r"^[ぁ-ゟ]*$", "must contain full-width hiragana only"),
    ("fullWidthKatakana", r"^[ァ-ヿ]*$", "must contain full-width katakana only"),
    ("fullWidth", r"^[^ -~｡-ﾟ]*$", "must contain full-width characters only"),
    (
        "postalCode",
        r"^[0-9]{3}-?[0-9]{4}$",
        "must be in XXX-XXXX or XXXXXXX format",
    ),
    ("postalCodeHyphen", r"^[0-9]{3}-[0-9]{4}$", "must be in XXX-XXXX format"),
    ("postalCodeNoHyphen", r"^[0-9]{7}$", "must be in XXXXXXX format"),
    (
        "phoneNumber",
        r"^([0-9]|[ -/:-@\[-`{-~])*[0-9]+([0-9]|[ -/:-@\[-`{-~])*$",
        "must be a phone number",
    ),
];

/// The built-in rule set, keyed by rule name.
///
/// Patterns that fail to compile are logged and left out.
pub fn builtin_custom_validation_rules() -> CustomValidationRules {
    let mut rules = CustomValidationRules::new();
    for &(name, pattern, suffix) in BUILTIN_RULES {
        let validator = match create_reg_exp_validator(pattern) {
            Ok(v) => v,
            Err(e) => {
                log::error!("Skipping built-in rule '{}': {}", name, e);
                continue;
            }
        };
        rules.insert(
            name,
            string_custom_validation_rule(
                move |value, _| validator(value),
                CustomRuleMessage::from_fn(move |label, _, _| format!("{label} {suffix}")),
            ),
        );
    }
    rules
}
