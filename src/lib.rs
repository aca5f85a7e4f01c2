//! Scoped context resolution for composable widget state.
//!
//! Compound widgets publish state for their descendants through context
//! slots. A single unscoped slot is enough until two instances of the same
//! family end up nested or interleaved in one tree; then the inner provider
//! shadows the outer one for everything below it, and families built on top
//! of other families silently entangle their state.
//!
//! This crate offers both forms:
//!
//! - [`create_context`]: the plain single-instance slot, shadowing and all;
//! - [`create_context_scope`] + [`compose_context_scopes`]: scoped families
//!   whose [`Scope`] values pin each root (and every family it is built
//!   from) to its own slot sequence, threaded explicitly down the tree.
//!
//! Publication and resolution run against an explicit [`Tree`], one per
//! render pass, so the mechanism is testable without any UI runtime.

mod compose;
mod context;
mod errors;
mod scope;
mod slot;
mod tree;

pub use crate::compose::compose_context_scopes;
pub use crate::context::{create_context, Consumer, Provider};
pub use crate::errors::ContextError;
pub use crate::scope::{
    create_context_scope, ContextScope, Scope, ScopeFactory, ScopedConsumer, ScopedProvider,
};
pub use crate::slot::ContextValue;
pub use crate::tree::Tree;
