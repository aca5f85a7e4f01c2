//! The scope-threaded disclosure widgets.
//!
//! Same surface as [`crate::opener`], plus an optional [`Scope`] on every
//! operation. Call sites that thread a scope value are pinned to the slot
//! sequence it carries; call sites that pass `None` get nearest-ancestor
//! behavior against the family's base slot.

use std::sync::LazyLock;

use ctxscope::{
    create_context_scope, ContextError, Scope, ScopeFactory, ScopedConsumer, ScopedProvider, Tree,
};

use crate::opener::OpenerContext;
use crate::state::{Callback, StateCell};

struct OpenerScope {
    provider: ScopedProvider<OpenerContext>,
    consumer: ScopedConsumer<OpenerContext>,
    factory: ScopeFactory,
}

static OPENER_SCOPE: LazyLock<OpenerScope> = LazyLock::new(|| {
    let (ctx, factory) =
        create_context_scope("Opener", &[]).expect("opener scope has no dependencies");
    let (provider, consumer) = ctx.create_context::<OpenerContext>("Opener", None);
    OpenerScope {
        provider,
        consumer,
        factory,
    }
});

/// The opener family's scope factory; families built on the opener list
/// this as a dependency.
pub fn opener_scope() -> ScopeFactory {
    OPENER_SCOPE.factory.clone()
}

pub struct ScopedOpener {
    open: StateCell<bool>,
    set_open: Callback<bool>,
}

impl ScopedOpener {
    pub fn new() -> Self {
        let open = StateCell::new(false);
        let set_open = Callback::new({
            let open = open.clone();
            move |value| open.set(value)
        });
        Self { open, set_open }
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn render<R>(
        &self,
        tree: &Tree,
        scope: Option<&Scope>,
        children: impl FnOnce(&Tree) -> R,
    ) -> R {
        let value = OpenerContext {
            open: self.open.get(),
            set_open: self.set_open.clone(),
        };
        OPENER_SCOPE.provider.provide(tree, scope, value, children)
    }
}

impl Default for ScopedOpener {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ScopedOpenerTrigger;

impl ScopedOpenerTrigger {
    pub fn press(tree: &Tree, scope: Option<&Scope>) -> Result<(), ContextError> {
        let ctx = OPENER_SCOPE.consumer.resolve(tree, "OpenerTrigger", scope)?;
        log::debug!("scoped opener trigger: {} -> {}", ctx.open, !ctx.open);
        ctx.set_open.call(!ctx.open);
        Ok(())
    }
}

pub struct ScopedOpenerContent;

impl ScopedOpenerContent {
    pub fn render<R>(
        tree: &Tree,
        scope: Option<&Scope>,
        children: impl FnOnce(&Tree) -> R,
    ) -> Result<Option<R>, ContextError> {
        let ctx = OPENER_SCOPE.consumer.resolve(tree, "OpenerContent", scope)?;
        Ok(if ctx.open { Some(children(tree)) } else { None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn behaves_like_plain_opener_without_a_scope() {
        let opener = ScopedOpener::new();
        let tree = Tree::new();
        opener
            .render(&tree, None, |tree| ScopedOpenerTrigger::press(tree, None))
            .unwrap();
        assert!(opener.is_open());
    }

    #[test]
    fn scope_value_pins_past_a_nearer_root() {
        let pinned = ScopedOpener::new();
        let nearer = ScopedOpener::new();

        let tree = Tree::new();
        let scope = opener_scope().resolve(&tree, None);
        pinned.render(&tree, Some(&scope), |tree| {
            nearer.render(tree, None, |tree| {
                ScopedOpenerTrigger::press(tree, Some(&scope)).unwrap();
            });
        });

        assert!(pinned.is_open());
        assert!(!nearer.is_open());
    }
}
