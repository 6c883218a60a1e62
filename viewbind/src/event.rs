use std::sync::Arc;

/// A non-item entry of a view that may be busy.
///
/// A view is loading while any of its events is loading.
pub trait Event: Send + Sync {
    fn is_loading(&self) -> bool;
}

/// Anything that can be registered as an event in a view definition.
pub trait AsEvent {
    fn as_event(&self) -> Arc<dyn Event>;
}
