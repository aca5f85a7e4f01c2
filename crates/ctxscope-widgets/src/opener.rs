//! The plain disclosure widget: one unscoped context slot.
//!
//! Fine on its own; nest two roots and the inner one shadows the outer for
//! everything below it. The scoped variant in [`crate::scoped_opener`] is
//! the fix.

use std::sync::LazyLock;

use ctxscope::{create_context, Consumer, ContextError, Provider, Tree};

use crate::state::{Callback, StateCell};

/// State an opener root publishes for its subtree.
#[derive(Clone, Debug)]
pub struct OpenerContext {
    pub open: bool,
    pub set_open: Callback<bool>,
}

impl PartialEq for OpenerContext {
    fn eq(&self, other: &Self) -> bool {
        self.open == other.open && self.set_open == other.set_open
    }
}

static OPENER: LazyLock<(Provider<OpenerContext>, Consumer<OpenerContext>)> =
    LazyLock::new(|| create_context::<OpenerContext>("Opener", None));

pub struct Opener {
    open: StateCell<bool>,
    set_open: Callback<bool>,
}

impl Opener {
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

    pub fn render<R>(&self, tree: &Tree, children: impl FnOnce(&Tree) -> R) -> R {
        let value = OpenerContext {
            open: self.open.get(),
            set_open: self.set_open.clone(),
        };
        OPENER.0.provide(tree, value, children)
    }
}

impl Default for Opener {
    fn default() -> Self {
        Self::new()
    }
}

pub struct OpenerTrigger;

impl OpenerTrigger {
    /// Simulates activating the trigger: toggles the nearest enclosing root.
    pub fn press(tree: &Tree) -> Result<(), ContextError> {
        let ctx = OPENER.1.resolve(tree, "OpenerTrigger")?;
        log::debug!("opener trigger: {} -> {}", ctx.open, !ctx.open);
        ctx.set_open.call(!ctx.open);
        Ok(())
    }
}

pub struct OpenerContent;

impl OpenerContent {
    /// Runs `children` only while the nearest enclosing root is open.
    pub fn render<R>(
        tree: &Tree,
        children: impl FnOnce(&Tree) -> R,
    ) -> Result<Option<R>, ContextError> {
        let ctx = OPENER.1.resolve(tree, "OpenerContent")?;
        Ok(if ctx.open { Some(children(tree)) } else { None })
    }
}
