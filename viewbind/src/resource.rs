use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::event::{AsEvent, Event};

/// Error type for resource loading failures
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ResourceError {
    pub message: String,
}

impl ResourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for ResourceError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ResourceError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// The state of a loadable resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResourceState<T> {
    /// Resource has not started loading
    #[default]
    Idle,
    Loading,
    Ready(T),
    Error(ResourceError),
}

impl<T> ResourceState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Self::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&ResourceError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }
}

/// Load event whose state a view folds into its loading flag.
///
/// Clones share the same state, so the loader can keep one clone while
/// the view holds another.
///
/// # Example
///
/// ```
/// use viewbind::resource::Resource;
///
/// let customers: Resource<Vec<String>> = Resource::new();
/// customers.set_loading();
/// assert!(customers.is_loading());
///
/// customers.set_ready(vec!["ACME".to_string()]);
/// assert!(customers.is_ready());
/// ```
#[derive(Debug)]
pub struct Resource<T> {
    inner: Arc<RwLock<ResourceState<T>>>,
    dirty: Arc<AtomicBool>,
}

impl<T> Resource<T> {
    /// Create a new resource in idle state
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ResourceState::Idle)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    fn replace(&self, state: ResourceState<T>) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = state;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    fn inspect(&self, f: impl FnOnce(&ResourceState<T>) -> bool) -> bool {
        self.inner.read().map(|guard| f(&guard)).unwrap_or(false)
    }

    /// Get a clone of the current state
    pub fn get(&self) -> ResourceState<T>
    where
        T: Clone,
    {
        self.inner
            .read()
            .map(|guard| guard.clone())
            .unwrap_or(ResourceState::Idle)
    }

    pub fn set_idle(&self) {
        self.replace(ResourceState::Idle);
    }

    pub fn set_loading(&self) {
        log::debug!("Resource loading");
        self.replace(ResourceState::Loading);
    }

    pub fn set_ready(&self, value: T) {
        self.replace(ResourceState::Ready(value));
    }

    pub fn set_error(&self, err: impl Into<ResourceError>) {
        let err = err.into();
        log::debug!("Resource failed: {}", err);
        self.replace(ResourceState::Error(err));
    }

    /// Check if the resource has been modified since last check
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    pub fn is_loading(&self) -> bool {
        self.inspect(ResourceState::is_loading)
    }

    pub fn is_ready(&self) -> bool {
        self.inspect(ResourceState::is_ready)
    }

    pub fn is_error(&self) -> bool {
        self.inspect(ResourceState::is_error)
    }
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T: Send + Sync> Event for Resource<T> {
    fn is_loading(&self) -> bool {
        Resource::is_loading(self)
    }
}

impl<T: Send + Sync + 'static> AsEvent for Resource<T> {
    fn as_event(&self) -> Arc<dyn Event> {
        Arc::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_transitions() {
        let res: Resource<u32> = Resource::new();
        assert!(res.get().is_idle());
        assert!(!res.is_dirty());

        res.set_loading();
        assert!(Event::is_loading(&res));
        assert!(res.is_dirty());

        res.set_ready(7);
        assert_eq!(res.get().as_ready(), Some(&7));
        assert!(!res.is_loading());

        res.set_error("boom");
        assert_eq!(res.get().as_error().map(|e| e.message.as_str()), Some("boom"));
    }

    #[test]
    fn test_clones_share_state() {
        let res: Resource<()> = Resource::new();
        let view_side = res.clone();
        res.set_loading();
        assert!(view_side.is_loading());
    }
}
