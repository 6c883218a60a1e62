pub mod custom;
pub mod event;
pub mod item;
pub mod resource;
pub mod rule;
pub mod state;
pub mod validation;
pub mod value;
pub mod view;

pub use view::{View, execute_validation};

pub mod prelude {
    pub use crate::custom::{
        CustomRuleError, CustomRuleMessage, CustomValidationRule, CustomValidationRules,
        boolean_custom_validation_rule, builtin_custom_validation_rules, create_reg_exp_validator,
        number_array_custom_validation_rule, number_custom_validation_rule,
        number_range_custom_validation_rule, string_array_custom_validation_rule,
        string_custom_validation_rule, string_range_custom_validation_rule,
    };
    pub use crate::event::{AsEvent, Event};
    pub use crate::item::{
        AnyItem, AsAnyItem, DateRangeItem, InputDateFormat, Item, RangeItem, RangeValidity,
        ReadWrite, SelectOptions, check_box_item, init_state, input_date_range_item,
        input_number_item, input_number_range_item, input_text_item, multi_check_box_item,
        number_array_item, range_state, select_box_item, select_number_box_item,
        select_option_numbers, select_option_strings, select_options,
    };
    pub use crate::resource::{Resource, ResourceError, ResourceState};
    pub use crate::rule::{
        BooleanValidationRule, NumberArrayValidationRule, NumberValidationRule,
        StringArrayValidationRule, StringValidationRule, ValidationRule, boolean_rule,
        number_array_rule, number_rule, string_array_rule, string_rule,
    };
    pub use crate::state::State;
    pub use crate::validation::{
        FluentValidationEvent, SchemaValidationEvent, ValidationBackend, ValidationEvent,
        ValidationEventFactory,
    };
    pub use crate::value::{FieldValue, ItemKind, ItemValue, ValueShape};
    pub use crate::view::{
        ValidateTrigger, View, ViewDefinition, ViewEntry, ViewError, ViewHandle, ViewId,
        ViewOptions, execute_validation,
    };
}
