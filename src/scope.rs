//! Scoped context families: registry, scope values, and scope factories.
//!
//! A scoped family declares its slots once, during module setup, into a
//! [`Registry`]. The family's [`ScopeFactory`] mints one slot-cell sequence
//! mirroring the registry and hands out [`Scope`] values that pin a subtree
//! to a concrete sequence. Providers and consumers given a scope publish and
//! resolve through the pinned cells; without one they fall back to the
//! family's base cells, which together with tree position keeps independent
//! roots isolated from each other.
//!
//! The factory returned by [`create_context_scope`] already carries the
//! factories of every declared dependency, so a single scope value produced
//! by an outer family satisfies the whole family chain underneath it.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, RwLock};

use crate::compose::compose_context_scopes;
use crate::context::resolve_cell;
use crate::errors::ContextError;
use crate::slot::{ContextValue, SlotCell};
use crate::tree::Tree;

pub(crate) type SlotSeq = Arc<Vec<Arc<SlotCell>>>;

static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(1);

/// Ordered slot declarations of one scope family.
///
/// Append-only while the family's module initializes; sealed the first time
/// the family's factory needs the slot sequence. Declaring after sealing is
/// a setup-order bug and panics.
pub(crate) struct Registry {
    id: u64,
    scope_name: &'static str,
    inner: RwLock<RegistryInner>,
}

struct RegistryInner {
    slots: Vec<SlotSpec>,
    sealed: bool,
}

struct SlotSpec {
    name: &'static str,
    default: Option<crate::slot::AnyValue>,
}

impl Registry {
    fn new(scope_name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            id: NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed),
            scope_name,
            inner: RwLock::new(RegistryInner {
                slots: Vec::new(),
                sealed: false,
            }),
        })
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn scope_name(&self) -> &'static str {
        self.scope_name
    }

    fn declare(&self, name: &'static str, default: Option<crate::slot::AnyValue>) -> usize {
        let mut inner = self.inner.write().unwrap();
        if inner.sealed {
            panic!(
                "scope `{}` is sealed; declare every context before the scope factory is first resolved",
                self.scope_name
            );
        }
        let index = inner.slots.len();
        log::trace!("scope `{}`[{index}] declared as `{name}`", self.scope_name);
        inner.slots.push(SlotSpec { name, default });
        index
    }

    fn seal(&self) {
        let mut inner = self.inner.write().unwrap();
        if !inner.sealed {
            inner.sealed = true;
            log::debug!(
                "scope `{}` sealed with {} context slot(s)",
                self.scope_name,
                inner.slots.len()
            );
        }
    }

    fn mint(&self) -> SlotSeq {
        let inner = self.inner.read().unwrap();
        Arc::new(
            inner
                .slots
                .iter()
                .enumerate()
                .map(|(index, spec)| {
                    SlotCell::new(spec.name, self.scope_name, index, spec.default.clone())
                })
                .collect(),
        )
    }
}

/* -------------------------------------------------------------------------
 * Scope values
 * ---------------------------------------------------------------------- */

/// A mapping from scope name to a concrete slot-cell sequence, threaded
/// explicitly through a subtree to pin resolution.
///
/// Cheap to clone; two clones of one resolution share identity, observable
/// through [`Scope::ptr_eq`].
#[derive(Clone)]
pub struct Scope {
    families: Arc<BTreeMap<&'static str, SlotSeq>>,
}

impl Scope {
    pub(crate) fn from_map(families: BTreeMap<&'static str, SlotSeq>) -> Self {
        Self {
            families: Arc::new(families),
        }
    }

    /// Whether two scope values are the same resolution, not merely equal
    /// content.
    pub fn ptr_eq(a: &Scope, b: &Scope) -> bool {
        Arc::ptr_eq(&a.families, &b.families)
    }

    /// Scope names carried by this value, in sorted order.
    pub fn family_names(&self) -> Vec<&'static str> {
        self.families.keys().copied().collect()
    }

    pub(crate) fn identity(&self) -> usize {
        Arc::as_ptr(&self.families) as *const () as usize
    }

    pub(crate) fn sequence(&self, scope_name: &str) -> Option<&SlotSeq> {
        self.families.get(scope_name)
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&'static str, &SlotSeq)> {
        self.families.iter().map(|(name, seq)| (*name, seq))
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, seq) in self.families.iter() {
            map.entry(name, &seq.len());
        }
        map.finish()
    }
}

/* -------------------------------------------------------------------------
 * Scoped declarations
 * ---------------------------------------------------------------------- */

/// Declares context slots for one scope family.
pub struct ContextScope {
    registry: Arc<Registry>,
}

impl ContextScope {
    /// Declare the next slot of this family.
    ///
    /// Slots must be declared unconditionally and in a fixed order during
    /// setup; the declaration index is how every scope value produced for
    /// this family addresses the slot.
    pub fn create_context<T: ContextValue>(
        &self,
        root_component_name: &'static str,
        default: Option<T>,
    ) -> (ScopedProvider<T>, ScopedConsumer<T>) {
        let default = default.map(|value| Arc::new(value) as _);
        let index = self.registry.declare(root_component_name, default.clone());
        let base = SlotCell::new(
            root_component_name,
            self.registry.scope_name(),
            index,
            default,
        );
        (
            ScopedProvider {
                scope_name: self.registry.scope_name(),
                index,
                base: base.clone(),
                _marker: PhantomData,
            },
            ScopedConsumer {
                scope_name: self.registry.scope_name(),
                index,
                base,
                _marker: PhantomData,
            },
        )
    }
}

fn cell_for(
    scope: Option<&Scope>,
    scope_name: &'static str,
    index: usize,
    base: &Arc<SlotCell>,
) -> Arc<SlotCell> {
    scope
        .and_then(|scope| scope.sequence(scope_name))
        .and_then(|seq| seq.get(index).cloned())
        .unwrap_or_else(|| base.clone())
}

/// Scope-aware counterpart of [`crate::Provider`].
pub struct ScopedProvider<T> {
    scope_name: &'static str,
    index: usize,
    base: Arc<SlotCell>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: ContextValue> ScopedProvider<T> {
    /// Publish into the sequence pinned by `scope`, or into the family's
    /// base cell when no scope (or an unrelated one) is supplied.
    pub fn provide<R>(
        &self,
        tree: &Tree,
        scope: Option<&Scope>,
        value: T,
        subtree: impl FnOnce(&Tree) -> R,
    ) -> R {
        let cell = cell_for(scope, self.scope_name, self.index, &self.base);
        let published = cell.publish(value);
        tree.push(&cell, published);
        let out = subtree(tree);
        tree.pop(&cell);
        out
    }
}

impl<T> Clone for ScopedProvider<T> {
    fn clone(&self) -> Self {
        Self {
            scope_name: self.scope_name,
            index: self.index,
            base: self.base.clone(),
            _marker: PhantomData,
        }
    }
}

/// Scope-aware counterpart of [`crate::Consumer`].
pub struct ScopedConsumer<T> {
    scope_name: &'static str,
    index: usize,
    base: Arc<SlotCell>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: ContextValue> ScopedConsumer<T> {
    pub fn resolve(
        &self,
        tree: &Tree,
        consumer_name: &'static str,
        scope: Option<&Scope>,
    ) -> Result<Arc<T>, ContextError> {
        let cell = cell_for(scope, self.scope_name, self.index, &self.base);
        resolve_cell(tree, &cell, consumer_name)
    }
}

impl<T> Clone for ScopedConsumer<T> {
    fn clone(&self) -> Self {
        Self {
            scope_name: self.scope_name,
            index: self.index,
            base: self.base.clone(),
            _marker: PhantomData,
        }
    }
}

/* -------------------------------------------------------------------------
 * Scope factories
 * ---------------------------------------------------------------------- */

/// Produces [`Scope`] values for a family (and, once composed, for every
/// family it depends on).
#[derive(Clone)]
pub struct ScopeFactory {
    inner: Arc<FactoryInner>,
}

pub(crate) struct FactoryInner {
    scope_name: &'static str,
    /// Scope name -> registry id of the factory contributing it. Used to
    /// tell genuine ambiguity apart from one factory reached twice.
    contributions: BTreeMap<&'static str, u64>,
    kind: FactoryKind,
}

enum FactoryKind {
    Leaf {
        registry: Arc<Registry>,
        slots: OnceLock<SlotSeq>,
    },
    Composed {
        parts: Vec<ScopeFactory>,
    },
}

impl ScopeFactory {
    fn leaf(registry: Arc<Registry>) -> Self {
        let mut contributions = BTreeMap::new();
        contributions.insert(registry.scope_name(), registry.id());
        Self {
            inner: Arc::new(FactoryInner {
                scope_name: registry.scope_name(),
                contributions,
                kind: FactoryKind::Leaf {
                    registry,
                    slots: OnceLock::new(),
                },
            }),
        }
    }

    pub(crate) fn composed(
        scope_name: &'static str,
        contributions: BTreeMap<&'static str, u64>,
        parts: Vec<ScopeFactory>,
    ) -> Self {
        Self {
            inner: Arc::new(FactoryInner {
                scope_name,
                contributions,
                kind: FactoryKind::Composed { parts },
            }),
        }
    }

    /// Name of the base family this factory was created for.
    pub fn scope_name(&self) -> &'static str {
        self.inner.scope_name
    }

    pub(crate) fn contributions(&self) -> &BTreeMap<&'static str, u64> {
        &self.inner.contributions
    }

    /// Resolve the scope value a subtree should thread down.
    ///
    /// The output keeps every sequence the input scope already carries,
    /// reuses the input's sequence for any family it already resolves, and
    /// mints this factory's own sequence otherwise. Within one render pass,
    /// resolving again with the same input returns the identical value.
    pub fn resolve(&self, tree: &Tree, scope: Option<&Scope>) -> Scope {
        let identity = Arc::as_ptr(&self.inner) as *const () as usize;
        tree.memoized_scope(identity, scope, || self.build(tree, scope))
    }

    fn build(&self, tree: &Tree, scope: Option<&Scope>) -> Scope {
        match &self.inner.kind {
            FactoryKind::Leaf { registry, slots } => {
                // First resolution freezes the declaration order, whichever
                // path supplies the sequence.
                registry.seal();
                let seq = scope
                    .and_then(|scope| scope.sequence(self.inner.scope_name).cloned())
                    .unwrap_or_else(|| slots.get_or_init(|| registry.mint()).clone());
                let mut families = scope
                    .map(|scope| scope.entries().map(|(n, s)| (n, s.clone())).collect())
                    .unwrap_or_else(BTreeMap::new);
                families.insert(self.inner.scope_name, seq);
                Scope::from_map(families)
            }
            FactoryKind::Composed { parts } => {
                let mut families: BTreeMap<&'static str, SlotSeq> = BTreeMap::new();
                for part in parts {
                    let resolved = part.resolve(tree, scope);
                    for (name, seq) in resolved.entries() {
                        // First contribution wins; composed factories own
                        // disjoint names, so a repeat is the same sequence.
                        families.entry(name).or_insert_with(|| seq.clone());
                    }
                }
                Scope::from_map(families)
            }
        }
    }
}

impl fmt::Debug for ScopeFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeFactory")
            .field("scope_name", &self.inner.scope_name)
            .field("contributes", &self.inner.contributions.keys())
            .finish()
    }
}

/// Declare a new scope family.
///
/// Returns the family's [`ContextScope`] (for declaring slots during setup)
/// and its [`ScopeFactory`], pre-composed with `deps` so that one scope
/// value produced here pins this family and everything it is built from.
/// Fails with [`ContextError::AmbiguousScope`] when `deps` already claim
/// this family's name.
pub fn create_context_scope(
    scope_name: &'static str,
    deps: &[ScopeFactory],
) -> Result<(ContextScope, ScopeFactory), ContextError> {
    let registry = Registry::new(scope_name);
    let mut parts = Vec::with_capacity(deps.len() + 1);
    parts.push(ScopeFactory::leaf(registry.clone()));
    parts.extend(deps.iter().cloned());
    let factory = compose_context_scopes(&parts)?;
    Ok((ContextScope { registry }, factory))
}
