//! Alert opener composed from the scoped opener family.
//!
//! Declares its own scope with the opener factory as a dependency, so one
//! scope value from [`alert_opener_scope`] pins both families. Every alert
//! component derives the opener scope the same way, which is what keeps the
//! alert's trigger bound to the alert's own opener root even when an
//! unrelated opener root sits closer in the tree.

use std::sync::LazyLock;

use ctxscope::{
    create_context_scope, ContextError, Scope, ScopeFactory, ScopedConsumer, ScopedProvider, Tree,
};

use crate::scoped_opener::{
    opener_scope, ScopedOpener, ScopedOpenerContent, ScopedOpenerTrigger,
};
use crate::state::StateCell;

/// Geometry the alert content publishes for size readers.
#[derive(Clone, Debug, PartialEq)]
pub struct AlertContentContext {
    pub size: StateCell<(f32, f32)>,
}

struct AlertScope {
    content_provider: ScopedProvider<AlertContentContext>,
    content_consumer: ScopedConsumer<AlertContentContext>,
    factory: ScopeFactory,
}

static ALERT_SCOPE: LazyLock<AlertScope> = LazyLock::new(|| {
    let (ctx, factory) = create_context_scope("AlertOpener", &[opener_scope()])
        .expect("alert opener and opener scope names are disjoint");
    let (content_provider, content_consumer) =
        ctx.create_context::<AlertContentContext>("AlertOpenerContent", None);
    AlertScope {
        content_provider,
        content_consumer,
        factory,
    }
});

/// Scope factory covering the alert opener and the opener it is built from.
pub fn alert_opener_scope() -> ScopeFactory {
    ALERT_SCOPE.factory.clone()
}

pub struct ScopedAlertOpener {
    inner: ScopedOpener,
}

impl ScopedAlertOpener {
    pub fn new() -> Self {
        Self {
            inner: ScopedOpener::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    pub fn render<R>(
        &self,
        tree: &Tree,
        scope: Option<&Scope>,
        children: impl FnOnce(&Tree) -> R,
    ) -> R {
        let opener = opener_scope().resolve(tree, scope);
        self.inner.render(tree, Some(&opener), children)
    }
}

impl Default for ScopedAlertOpener {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ScopedAlertOpenerTrigger;

impl ScopedAlertOpenerTrigger {
    pub fn press(tree: &Tree, scope: Option<&Scope>) -> Result<(), ContextError> {
        let opener = opener_scope().resolve(tree, scope);
        ScopedOpenerTrigger::press(tree, Some(&opener))
    }
}

/// Alert content; holds the per-instance geometry cell it publishes.
pub struct ScopedAlertOpenerContent {
    context: AlertContentContext,
}

impl ScopedAlertOpenerContent {
    pub fn new() -> Self {
        Self {
            context: AlertContentContext {
                size: StateCell::new((0.0, 0.0)),
            },
        }
    }

    /// `size` is what the host runtime would have measured for the content
    /// box; it is recorded only when the content actually shows.
    pub fn render<R>(
        &self,
        tree: &Tree,
        scope: Option<&Scope>,
        size: (f32, f32),
        children: impl FnOnce(&Tree) -> R,
    ) -> Result<Option<R>, ContextError> {
        let opener = opener_scope().resolve(tree, scope);
        self.context.size.set((0.0, 0.0));
        ALERT_SCOPE
            .content_provider
            .provide(tree, scope, self.context.clone(), |tree| {
                ScopedOpenerContent::render(tree, Some(&opener), |tree| {
                    self.context.size.set(size);
                    children(tree)
                })
            })
    }
}

impl Default for ScopedAlertOpenerContent {
    fn default() -> Self {
        Self::new()
    }
}

pub struct AlertContentSize;

impl AlertContentSize {
    /// Measured size published by the nearest enclosing alert content.
    pub fn read(tree: &Tree, scope: Option<&Scope>) -> Result<(f32, f32), ContextError> {
        let ctx = ALERT_SCOPE
            .content_consumer
            .resolve(tree, "AlertOpenerContentSize", scope)?;
        Ok(ctx.size.get())
    }
}
