use std::ops::Deref;
use std::sync::Arc;

use super::date::{DATE_VALUE_FORMAT, InputDateFormat, YEAR_MONTH_FORMAT, normalize_date};
use super::{AnyItem, AsAnyItem, Item};
use crate::rule::ValidationRule;
use crate::state::State;
use crate::value::{ItemKind, ItemValue};

/// Outcome of [`RangeItem::validate_date_range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeValidity {
    /// Optional range with no value; nothing was checked.
    NotApplicable,
    Valid,
    Invalid,
}

impl RangeValidity {
    pub fn has_error(&self) -> bool {
        matches!(self, Self::Invalid)
    }
}

#[derive(Debug, Clone, Default)]
struct Placeholders {
    lower: Option<String>,
    upper: Option<String>,
}

/// An item holding a `[lower, upper]` pair.
///
/// Derefs to the underlying [`Item`], so every item operation is available.
pub struct RangeItem<V>
where
    Vec<Option<V>>: ItemValue,
{
    item: Item<Vec<Option<V>>>,
    placeholders: State<Placeholders>,
}

impl<V> Clone for RangeItem<V>
where
    Vec<Option<V>>: ItemValue,
{
    fn clone(&self) -> Self {
        Self {
            item: self.item.clone(),
            placeholders: self.placeholders.clone(),
        }
    }
}

impl<V> Deref for RangeItem<V>
where
    Vec<Option<V>>: ItemValue,
{
    type Target = Item<Vec<Option<V>>>;

    fn deref(&self) -> &Self::Target {
        &self.item
    }
}

impl<V: Clone> RangeItem<V>
where
    Vec<Option<V>>: ItemValue,
{
    pub fn new(state: State<Option<Vec<Option<V>>>>) -> Self {
        Self {
            item: Item::new(state),
            placeholders: State::default(),
        }
    }

    /// The underlying item.
    pub fn item(&self) -> &Item<Vec<Option<V>>> {
        &self.item
    }

    fn bound(&self, index: usize) -> Option<V> {
        self.item.state().with(|v| match v {
            Some(pair) if pair.len() == 2 => pair[index].clone(),
            _ => None,
        })
    }

    /// Lower bound; `None` unless the stored value is a pair.
    pub fn lower_value(&self) -> Option<V> {
        self.bound(0)
    }

    /// Upper bound; `None` unless the stored value is a pair.
    pub fn upper_value(&self) -> Option<V> {
        self.bound(1)
    }

    /// Replace the lower bound, keeping the current upper bound.
    pub fn set_lower_value(&self, value: Option<V>) {
        self.item.set_value_opt(|prev| {
            let upper = prev.and_then(|p| p.into_iter().nth(1).flatten());
            Some(vec![value, upper])
        });
    }

    /// Replace the upper bound, keeping the current lower bound.
    pub fn set_upper_value(&self, value: Option<V>) {
        self.item.set_value_opt(|prev| {
            let lower = prev.and_then(|p| p.into_iter().next().flatten());
            Some(vec![lower, value])
        });
    }

    /// Replace both bounds in a single commit.
    pub fn set_range_value(&self, lower: Option<V>, upper: Option<V>) {
        self.item.set_value(Some(vec![lower, upper]));
    }

    pub fn lower_placeholder(&self) -> Option<String> {
        self.placeholders.with(|p| p.lower.clone())
    }

    pub fn upper_placeholder(&self) -> Option<String> {
        self.placeholders.with(|p| p.upper.clone())
    }

    pub fn set_placeholders(&self, lower: Option<String>, upper: Option<String>) {
        self.placeholders.set(Placeholders { lower, upper });
    }

    /// Validate the current range through the owning view.
    pub fn validate_date_range(&self) -> RangeValidity {
        let rule: ValidationRule = self.item.validation_rule().into();
        let value = self.item.field_value();
        if !rule.required() && value.is_none() {
            return RangeValidity::NotApplicable;
        }
        if self.item.validate_field_value(value.as_ref()) {
            RangeValidity::Invalid
        } else {
            RangeValidity::Valid
        }
    }
}

impl<V> AsAnyItem for RangeItem<V>
where
    Vec<Option<V>>: ItemValue,
{
    fn as_any_item(&self) -> Arc<dyn AnyItem> {
        self.item.as_any_item()
    }
}

/// A range of dates stored as normalised strings.
///
/// Every bound written through this type is parsed and rewritten in the
/// canonical value format ([`DATE_VALUE_FORMAT`], or [`YEAR_MONTH_FORMAT`]
/// when the display format has no day). Unparsable input is stored as an
/// unset bound.
#[derive(Clone)]
pub struct DateRangeItem {
    range: RangeItem<String>,
    format: State<Option<InputDateFormat>>,
}

impl Deref for DateRangeItem {
    type Target = RangeItem<String>;

    fn deref(&self) -> &Self::Target {
        &self.range
    }
}

impl DateRangeItem {
    pub fn new(state: State<Option<Vec<Option<String>>>>) -> Self {
        let range = RangeItem::new(state);
        range.set_kind(ItemKind::DateRange);
        Self {
            range,
            format: State::new(None),
        }
    }

    pub fn format(&self) -> Option<InputDateFormat> {
        self.format.get()
    }

    pub fn set_format(&self, format: Option<InputDateFormat>) {
        self.format.set(format);
    }

    pub fn is_year_month(&self) -> bool {
        self.format
            .with(|f| f.as_ref().is_some_and(InputDateFormat::is_year_month))
    }

    /// `chrono` pattern of stored values.
    pub fn value_format(&self) -> &'static str {
        if self.is_year_month() {
            YEAR_MONTH_FORMAT
        } else {
            DATE_VALUE_FORMAT
        }
    }

    fn normalize(&self, value: Option<&str>) -> Option<String> {
        normalize_date(value, self.is_year_month())
    }

    pub fn set_lower_value(&self, value: Option<&str>) {
        self.range.set_lower_value(self.normalize(value));
    }

    pub fn set_upper_value(&self, value: Option<&str>) {
        self.range.set_upper_value(self.normalize(value));
    }

    pub fn set_range_value(&self, lower: Option<&str>, upper: Option<&str>) {
        self.range
            .set_range_value(self.normalize(lower), self.normalize(upper));
    }
}

impl AsAnyItem for DateRangeItem {
    fn as_any_item(&self) -> Arc<dyn AnyItem> {
        self.range.as_any_item()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_require_a_pair() {
        let range = RangeItem::<f64>::new(State::new(Some(vec![Some(1.0)])));
        assert_eq!(range.lower_value(), None);
        assert_eq!(range.upper_value(), None);

        range.set_range_value(Some(1.0), Some(5.0));
        assert_eq!(range.lower_value(), Some(1.0));
        assert_eq!(range.upper_value(), Some(5.0));
    }

    #[test]
    fn test_set_bound_from_empty_state() {
        let range = RangeItem::<f64>::new(State::new(None));
        range.set_upper_value(Some(9.0));
        assert_eq!(range.value(), Some(vec![None, Some(9.0)]));
    }

    #[test]
    fn test_date_range_kind() {
        let range = DateRangeItem::new(State::new(None));
        assert_eq!(range.kind(), ItemKind::DateRange);
        assert_eq!(range.value_format(), DATE_VALUE_FORMAT);

        range.set_format(Some(InputDateFormat::YearMonthSlash));
        assert_eq!(range.value_format(), YEAR_MONTH_FORMAT);
    }
}
