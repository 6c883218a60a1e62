//! Constructors for the common item flavours.

use super::options::SelectOptions;
use super::range::{DateRangeItem, RangeItem};
use super::{Item, ReadWrite};
use crate::rule::{
    BooleanValidationRule, NumberArrayValidationRule, NumberValidationRule,
    StringArrayValidationRule, StringValidationRule,
};
use crate::state::State;
use crate::value::ItemValue;

/// Create a value cell with an optional initial value.
pub fn init_state<T>(value: Option<T>) -> State<Option<T>> {
    State::new(value)
}

/// Create a range cell holding `[lower, upper]`.
pub fn range_state<V>(lower: Option<V>, upper: Option<V>) -> State<Option<Vec<Option<V>>>> {
    State::new(Some(vec![lower, upper]))
}

fn build<T: ItemValue>(
    label: &str,
    state: State<Option<T>>,
    rule: Option<T::Rule>,
    options: Option<SelectOptions>,
    readonly: ReadWrite,
    placeholder: Option<&str>,
) -> Item<T> {
    let item = Item::new(state);
    item.init(label, readonly.is_readonly());
    item.set_placeholder(placeholder.map(str::to_string));
    if let Some(rule) = rule {
        item.set_validation_rule(rule);
    }
    item.set_options(options);
    item
}

pub fn input_text_item(
    label: &str,
    state: State<Option<String>>,
    rule: StringValidationRule,
    readonly: ReadWrite,
    placeholder: Option<&str>,
) -> Item<String> {
    build(label, state, Some(rule), None, readonly, placeholder)
}

pub fn input_number_item(
    label: &str,
    state: State<Option<f64>>,
    rule: NumberValidationRule,
    readonly: ReadWrite,
    placeholder: Option<&str>,
) -> Item<f64> {
    build(label, state, Some(rule), None, readonly, placeholder)
}

/// A check box; the rule defaults to optional when omitted.
pub fn check_box_item(
    label: &str,
    state: State<Option<bool>>,
    check_box_text: &str,
    readonly: ReadWrite,
    rule: Option<BooleanValidationRule>,
) -> Item<bool> {
    let item = build(label, state, rule, None, readonly, None);
    item.set_check_box_text(check_box_text);
    item
}

pub fn select_box_item(
    label: &str,
    state: State<Option<String>>,
    rule: StringValidationRule,
    options: Option<SelectOptions>,
    readonly: ReadWrite,
    placeholder: Option<&str>,
) -> Item<String> {
    build(label, state, Some(rule), options, readonly, placeholder)
}

pub fn select_number_box_item(
    label: &str,
    state: State<Option<f64>>,
    rule: NumberValidationRule,
    options: Option<SelectOptions>,
    readonly: ReadWrite,
    placeholder: Option<&str>,
) -> Item<f64> {
    build(label, state, Some(rule), options, readonly, placeholder)
}

pub fn multi_check_box_item(
    label: &str,
    state: State<Option<Vec<String>>>,
    rule: StringArrayValidationRule,
    options: Option<SelectOptions>,
    readonly: ReadWrite,
) -> Item<Vec<String>> {
    build(label, state, Some(rule), options, readonly, None)
}

pub fn number_array_item(
    label: &str,
    state: State<Option<Vec<f64>>>,
    rule: NumberArrayValidationRule,
    readonly: ReadWrite,
) -> Item<Vec<f64>> {
    build(label, state, Some(rule), None, readonly, None)
}

pub fn input_number_range_item(
    label: &str,
    state: State<Option<Vec<Option<f64>>>>,
    rule: NumberValidationRule,
    readonly: ReadWrite,
    lower_placeholder: Option<&str>,
    upper_placeholder: Option<&str>,
) -> RangeItem<f64> {
    let range = RangeItem::new(state);
    range.init(label, readonly.is_readonly());
    range.set_validation_rule(rule);
    range.set_placeholders(
        lower_placeholder.map(str::to_string),
        upper_placeholder.map(str::to_string),
    );
    range
}

pub fn input_date_range_item(
    label: &str,
    state: State<Option<Vec<Option<String>>>>,
    rule: StringArrayValidationRule,
    readonly: ReadWrite,
    lower_placeholder: Option<&str>,
    upper_placeholder: Option<&str>,
) -> DateRangeItem {
    let range = DateRangeItem::new(state);
    range.init(label, readonly.is_readonly());
    range.set_validation_rule(rule);
    range.set_placeholders(
        lower_placeholder.map(str::to_string),
        upper_placeholder.map(str::to_string),
    );
    range
}
