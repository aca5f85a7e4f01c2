//! The explicit component tree a render pass runs against.
//!
//! Host UI runtimes propagate context ambiently down the component tree.
//! Here that propagation is explicit: a [`Tree`] owns, per slot cell, a
//! stack of published values. A provider pushes on subtree entry and pops on
//! exit, so "the nearest enclosing provider" is simply the top of the stack
//! while a subtree closure runs. The tree also carries the per-pass memo of
//! scope-factory output, which is what makes repeated scope resolution
//! during one pass referentially stable.
//!
//! One `Tree` corresponds to one render pass. State that must survive
//! between passes belongs to the components themselves, not the tree.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::RwLock;

use crate::scope::Scope;
use crate::slot::{AnyValue, SlotCell};

#[derive(Default)]
pub struct Tree {
    stacks: RwLock<HashMap<u64, Vec<AnyValue>>>,
    scope_memo: RwLock<HashMap<MemoKey, Scope>>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, cell: &SlotCell, value: AnyValue) {
        self.stacks
            .write()
            .unwrap()
            .entry(cell.id())
            .or_default()
            .push(value);
    }

    pub(crate) fn pop(&self, cell: &SlotCell) {
        let mut stacks = self.stacks.write().unwrap();
        if let Some(stack) = stacks.get_mut(&cell.id()) {
            stack.pop();
            if stack.is_empty() {
                stacks.remove(&cell.id());
            }
        }
    }

    /// Value published by the nearest enclosing provider for `cell`, if any.
    pub(crate) fn peek(&self, cell: &SlotCell) -> Option<AnyValue> {
        self.stacks
            .read()
            .unwrap()
            .get(&cell.id())
            .and_then(|stack| stack.last().cloned())
    }

    /// Per-pass memo for scope-factory resolution, keyed on the factory and
    /// the identity of the supplied scope. The key retains a clone of the
    /// input scope so its pointer stays valid for the life of the pass.
    pub(crate) fn memoized_scope(
        &self,
        factory: usize,
        input: Option<&Scope>,
        build: impl FnOnce() -> Scope,
    ) -> Scope {
        let key = MemoKey {
            factory,
            input: input.cloned(),
        };
        if let Some(cached) = self.scope_memo.read().unwrap().get(&key) {
            return cached.clone();
        }
        // Built outside the lock: dependency factories recurse back in here.
        let built = build();
        self.scope_memo
            .write()
            .unwrap()
            .entry(key)
            .or_insert(built)
            .clone()
    }
}

struct MemoKey {
    factory: usize,
    input: Option<Scope>,
}

impl PartialEq for MemoKey {
    fn eq(&self, other: &Self) -> bool {
        self.factory == other.factory
            && match (&self.input, &other.input) {
                (Some(a), Some(b)) => Scope::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
    }
}

impl Eq for MemoKey {}

impl Hash for MemoKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.factory.hash(state);
        self.input.as_ref().map(Scope::identity).hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::SlotCell;
    use std::sync::Arc;

    #[test]
    fn peek_returns_none_on_empty_tree() {
        let tree = Tree::new();
        let cell = SlotCell::new("Opener", "Opener", 0, None);
        assert!(tree.peek(&cell).is_none());
    }

    #[test]
    fn nested_pushes_shadow_and_unwind() {
        let tree = Tree::new();
        let cell = SlotCell::new("Opener", "Opener", 0, None);
        let outer: AnyValue = Arc::new(1_u32);
        let inner: AnyValue = Arc::new(2_u32);

        tree.push(&cell, outer.clone());
        tree.push(&cell, inner.clone());
        assert!(Arc::ptr_eq(&tree.peek(&cell).unwrap(), &inner));

        tree.pop(&cell);
        assert!(Arc::ptr_eq(&tree.peek(&cell).unwrap(), &outer));

        tree.pop(&cell);
        assert!(tree.peek(&cell).is_none());
    }

    #[test]
    fn stacks_are_independent_per_cell() {
        let tree = Tree::new();
        let a = SlotCell::new("A", "A", 0, None);
        let b = SlotCell::new("B", "B", 0, None);

        tree.push(&a, Arc::new(1_u32));
        assert!(tree.peek(&b).is_none());
    }
}
