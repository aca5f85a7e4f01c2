//! The unscoped, single-instance context form.
//!
//! `create_context` is the right tool when at most one instance of a
//! component family exists in a tree at a time: one slot, published by the
//! nearest enclosing provider, no scope threading. Nesting two roots of the
//! same family shadows the outer one for the inner subtree; that behavior
//! is inherent to this form and is exactly what the scoped variant in
//! [`crate::scope`] exists to avoid.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::errors::ContextError;
use crate::slot::{ContextValue, SlotCell};
use crate::tree::Tree;

/// Declare an unscoped context slot.
///
/// `root_component_name` names the provider in diagnostics. When `default`
/// is given, resolving with no enclosing provider yields the default instead
/// of an error.
pub fn create_context<T: ContextValue>(
    root_component_name: &'static str,
    default: Option<T>,
) -> (Provider<T>, Consumer<T>) {
    let default = default.map(|value| Arc::new(value) as _);
    let cell = SlotCell::new(root_component_name, root_component_name, 0, default);
    (
        Provider {
            cell: cell.clone(),
            _marker: PhantomData,
        },
        Consumer {
            cell,
            _marker: PhantomData,
        },
    )
}

/// Publishes a value for the duration of a subtree.
pub struct Provider<T> {
    cell: Arc<SlotCell>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: ContextValue> Provider<T> {
    /// Publish `value` for everything rendered inside `subtree`.
    ///
    /// Publication is memoized by structural equality: descendants observe a
    /// referentially new value only when the state actually changed.
    pub fn provide<R>(&self, tree: &Tree, value: T, subtree: impl FnOnce(&Tree) -> R) -> R {
        let published = self.cell.publish(value);
        tree.push(&self.cell, published);
        let out = subtree(tree);
        tree.pop(&self.cell);
        out
    }
}

impl<T> Clone for Provider<T> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
            _marker: PhantomData,
        }
    }
}

/// Reads the nearest enclosing provider's published value.
pub struct Consumer<T> {
    cell: Arc<SlotCell>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: ContextValue> Consumer<T> {
    /// `consumer_name` names the failing call site in diagnostics.
    pub fn resolve(&self, tree: &Tree, consumer_name: &'static str) -> Result<Arc<T>, ContextError> {
        resolve_cell(tree, &self.cell, consumer_name)
    }
}

impl<T> Clone for Consumer<T> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
            _marker: PhantomData,
        }
    }
}

/// Nearest publication, else the slot default, else `MissingProvider`.
pub(crate) fn resolve_cell<T: ContextValue>(
    tree: &Tree,
    cell: &Arc<SlotCell>,
    consumer_name: &'static str,
) -> Result<Arc<T>, ContextError> {
    let value = tree.peek(cell).or_else(|| cell.default());
    match value {
        Some(value) => Ok(value
            .downcast::<T>()
            .expect("published value has the declared slot type")),
        None => Err(ContextError::MissingProvider {
            consumer: consumer_name,
            provider: cell.name(),
        }),
    }
}
