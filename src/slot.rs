//! Slot cells: the concrete identities that publication and resolution key on.
//!
//! A `SlotCell` is one resolvable slot instance. Scoped families mint one
//! cell per declared slot when their registry is sealed; the unscoped
//! `create_context` mints a single standalone cell. Cells are compared by
//! process-unique id, never by name.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Type-erased published value.
pub(crate) type AnyValue = Arc<dyn Any + Send + Sync>;

/// Marker for values publishable through a context slot.
///
/// `PartialEq` drives the structural-equality memoization of published
/// values: a re-publication that compares equal to the previous one reuses
/// the previous shared allocation, so consumers can treat pointer identity
/// as "did the state actually change".
pub trait ContextValue: Any + Send + Sync + PartialEq {}

impl<T: Any + Send + Sync + PartialEq> ContextValue for T {}

static NEXT_CELL_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) struct SlotCell {
    id: u64,
    /// Root component name of the declaration, used in diagnostics.
    name: &'static str,
    scope_name: &'static str,
    index: usize,
    default: Option<AnyValue>,
    /// Most recent publication through this cell.
    last: RwLock<Option<AnyValue>>,
}

impl SlotCell {
    pub(crate) fn new(
        name: &'static str,
        scope_name: &'static str,
        index: usize,
        default: Option<AnyValue>,
    ) -> Arc<Self> {
        let id = NEXT_CELL_ID.fetch_add(1, Ordering::Relaxed);
        log::trace!("slot cell {scope_name}[{index}] `{name}` minted (id {id})");
        Arc::new(Self {
            id,
            name,
            scope_name,
            index,
            default,
            last: RwLock::new(None),
        })
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn default(&self) -> Option<AnyValue> {
        self.default.clone()
    }

    /// Turn `value` into the shared allocation descendants will observe.
    ///
    /// Reuses the previously published allocation when the new value compares
    /// equal to it, so a re-render with unchanged state is invisible to
    /// pointer-identity change detection.
    pub(crate) fn publish<T: ContextValue>(&self, value: T) -> AnyValue {
        let mut last = self.last.write().unwrap();
        if let Some(prev) = last.as_ref() {
            if let Some(prev_value) = prev.downcast_ref::<T>() {
                if *prev_value == value {
                    return prev.clone();
                }
            }
        }
        let fresh: AnyValue = Arc::new(value);
        *last = Some(fresh.clone());
        fresh
    }
}

impl fmt::Debug for SlotCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotCell")
            .field("id", &self.id)
            .field("scope", &self.scope_name)
            .field("index", &self.index)
            .field("name", &self.name)
            .finish()
    }
}
