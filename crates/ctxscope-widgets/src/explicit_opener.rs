//! Opener widgets parameterized by an explicit context handle.
//!
//! The halfway fix between the unscoped opener and the scope machinery:
//! every component takes the [`OpenerSlot`] it should publish/resolve
//! through, so a derived family can mint a private slot and pin itself to
//! it. It works, but every call site has to thread the right handle by
//! hand; scope values automate exactly that.

use std::sync::LazyLock;

use ctxscope::{create_context, Consumer, ContextError, Provider, Tree};

use crate::opener::OpenerContext;
use crate::state::{Callback, StateCell};

/// A pair of publish/resolve handles for one opener slot.
#[derive(Clone)]
pub struct OpenerSlot {
    provider: Provider<OpenerContext>,
    consumer: Consumer<OpenerContext>,
}

impl OpenerSlot {
    pub fn new() -> Self {
        let (provider, consumer) = create_context::<OpenerContext>("Opener", None);
        Self { provider, consumer }
    }
}

impl Default for OpenerSlot {
    fn default() -> Self {
        Self::new()
    }
}

static DEFAULT_SLOT: LazyLock<OpenerSlot> = LazyLock::new(OpenerSlot::new);

/// Slot used when a call site does not pin one explicitly.
pub fn default_slot() -> &'static OpenerSlot {
    &DEFAULT_SLOT
}

pub struct ExplicitOpener {
    open: StateCell<bool>,
    set_open: Callback<bool>,
}

impl ExplicitOpener {
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
        slot: &OpenerSlot,
        children: impl FnOnce(&Tree) -> R,
    ) -> R {
        let value = OpenerContext {
            open: self.open.get(),
            set_open: self.set_open.clone(),
        };
        slot.provider.provide(tree, value, children)
    }
}

impl Default for ExplicitOpener {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ExplicitOpenerTrigger;

impl ExplicitOpenerTrigger {
    pub fn press(tree: &Tree, slot: &OpenerSlot) -> Result<(), ContextError> {
        let ctx = slot.consumer.resolve(tree, "OpenerTrigger")?;
        ctx.set_open.call(!ctx.open);
        Ok(())
    }
}

pub struct ExplicitOpenerContent;

impl ExplicitOpenerContent {
    pub fn render<R>(
        tree: &Tree,
        slot: &OpenerSlot,
        children: impl FnOnce(&Tree) -> R,
    ) -> Result<Option<R>, ContextError> {
        let ctx = slot.consumer.resolve(tree, "OpenerContent")?;
        Ok(if ctx.open { Some(children(tree)) } else { None })
    }
}

/* -------------------------------------------------------------------------
 * Alert variant pinned to its own private slot
 * ---------------------------------------------------------------------- */

static ALERT_SLOT: LazyLock<OpenerSlot> = LazyLock::new(OpenerSlot::new);

/// The private slot every explicit alert component pins itself to.
pub fn alert_slot() -> &'static OpenerSlot {
    &ALERT_SLOT
}

pub struct ExplicitAlertOpener {
    inner: ExplicitOpener,
}

impl ExplicitAlertOpener {
    pub fn new() -> Self {
        Self {
            inner: ExplicitOpener::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    pub fn render<R>(&self, tree: &Tree, children: impl FnOnce(&Tree) -> R) -> R {
        self.inner.render(tree, alert_slot(), children)
    }
}

impl Default for ExplicitAlertOpener {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ExplicitAlertOpenerTrigger;

impl ExplicitAlertOpenerTrigger {
    pub fn press(tree: &Tree) -> Result<(), ContextError> {
        ExplicitOpenerTrigger::press(tree, alert_slot())
    }
}

pub struct ExplicitAlertOpenerContent;

impl ExplicitAlertOpenerContent {
    pub fn render<R>(
        tree: &Tree,
        children: impl FnOnce(&Tree) -> R,
    ) -> Result<Option<R>, ContextError> {
        ExplicitOpenerContent::render(tree, alert_slot(), children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_trigger_skips_a_nested_default_slot_opener() {
        let alert = ExplicitAlertOpener::new();
        let opener = ExplicitOpener::new();

        let tree = Tree::new();
        alert.render(&tree, |tree| {
            opener.render(tree, default_slot(), |tree| {
                // Resolves through the alert's private slot even though a
                // default-slot root is nearer.
                ExplicitAlertOpenerTrigger::press(tree).unwrap();
            });
        });

        assert!(alert.is_open());
        assert!(!opener.is_open());
    }

    #[test]
    fn distinct_slots_do_not_observe_each_other() {
        let a = ExplicitOpener::new();
        let slot_a = OpenerSlot::new();
        let slot_b = OpenerSlot::new();

        let tree = Tree::new();
        a.render(&tree, &slot_a, |tree| {
            assert!(ExplicitOpenerTrigger::press(tree, &slot_b).is_err());
            ExplicitOpenerTrigger::press(tree, &slot_a).unwrap();
        });
        assert!(a.is_open());
    }
}
