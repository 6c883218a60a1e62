use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockWriteGuard};

/// Reactive value cell shared between an item and whoever renders it.
///
/// `State<T>` is the external cell an [`Item`](crate::item::Item) binds to.
/// Clones share the same storage, so a renderer holding one clone observes
/// every commit made through the item. Writes raise a dirty flag the
/// renderer can poll and clear.
///
/// # Example
///
/// ```
/// use viewbind::state::State;
///
/// let name = State::new(Some("Alice".to_string()));
/// let shared = name.clone();
/// shared.set(Some("Bob".to_string()));
///
/// assert_eq!(name.get().as_deref(), Some("Bob"));
/// assert!(name.is_dirty());
/// ```
#[derive(Debug)]
pub struct State<T> {
    inner: Arc<RwLock<T>>,
    dirty: Arc<AtomicBool>,
}

impl<T> State<T> {
    /// Create a new cell holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Read the current value through a closure without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        match self.inner.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    /// Replace the value.
    pub fn set(&self, value: T) {
        *self.write() = value;
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Mutate the value in place.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        f(&mut self.write());
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Replace the value with one computed from the previous value.
    ///
    /// The previous value is moved into `f`, so nothing is cloned.
    pub fn replace_with<F>(&self, f: F)
    where
        F: FnOnce(T) -> T,
        T: Default,
    {
        let mut guard = self.write();
        let prev = std::mem::take(&mut *guard);
        *guard = f(prev);
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Check whether the cell was written since the last [`clear_dirty`](Self::clear_dirty).
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T: Default> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
