//! Shared-state stand-ins for host-runtime component state.
//!
//! Widget instances keep their state in a [`StateCell`] so it survives
//! across render passes, and hand out a [`Callback`] as the stable setter
//! published through context. Both compare by identity, which is what the
//! published-value memoization needs: re-publishing the same cell and setter
//! with an unchanged snapshot reads as "nothing changed".

use std::fmt;
use std::sync::{Arc, RwLock};

pub struct StateCell<T> {
    inner: Arc<RwLock<T>>,
}

impl<T: Clone> StateCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    pub fn get(&self) -> T {
        self.inner.read().unwrap().clone()
    }

    pub fn set(&self, value: T) {
        *self.inner.write().unwrap() = value;
    }
}

impl<T> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> PartialEq for StateCell<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: fmt::Debug> fmt::Debug for StateCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StateCell").field(&*self.inner.read().unwrap()).finish()
    }
}

/// Shared closure with identity equality, the stand-in for a stable state
/// setter.
pub struct Callback<T> {
    inner: Arc<dyn Fn(T) + Send + Sync>,
}

impl<T> Callback<T> {
    pub fn new(f: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self { inner: Arc::new(f) }
    }

    pub fn call(&self, value: T) {
        (self.inner)(value)
    }
}

impl<T> Clone for Callback<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> PartialEq for Callback<T> {
    fn eq(&self, other: &Self) -> bool {
        // Data-pointer comparison; vtable addresses are not stable.
        std::ptr::eq(
            Arc::as_ptr(&self.inner) as *const (),
            Arc::as_ptr(&other.inner) as *const (),
        )
    }
}

impl<T> fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}
