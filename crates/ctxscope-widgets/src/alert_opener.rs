//! Alert-flavored opener that delegates to the plain opener wholesale.
//!
//! Because it reuses the opener's unscoped slot, nesting an [`Opener`]
//! inside an [`AlertOpener`] makes the alert's trigger act on whichever
//! root is nearest. That entanglement is the reason the scoped families
//! exist; it is kept here as the reference misbehavior.

use ctxscope::{ContextError, Tree};

use crate::opener::{Opener, OpenerContent, OpenerTrigger};

pub struct AlertOpener {
    inner: Opener,
}

impl AlertOpener {
    pub fn new() -> Self {
        Self {
            inner: Opener::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    pub fn render<R>(&self, tree: &Tree, children: impl FnOnce(&Tree) -> R) -> R {
        self.inner.render(tree, children)
    }
}

impl Default for AlertOpener {
    fn default() -> Self {
        Self::new()
    }
}

pub struct AlertOpenerTrigger;

impl AlertOpenerTrigger {
    pub fn press(tree: &Tree) -> Result<(), ContextError> {
        OpenerTrigger::press(tree)
    }
}

pub struct AlertOpenerContent;

impl AlertOpenerContent {
    pub fn render<R>(
        tree: &Tree,
        children: impl FnOnce(&Tree) -> R,
    ) -> Result<Option<R>, ContextError> {
        OpenerContent::render(tree, children)
    }
}
