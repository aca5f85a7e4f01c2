//! Disclosure-style demo widgets built on `ctxscope`.
//!
//! Three generations of the same widget pair, from collision-prone to fully
//! isolated:
//!
//! 1. [`opener`] / [`alert_opener`]: one unscoped slot shared by both
//!    families; nesting them entangles their state.
//! 2. [`explicit_opener`]: components take the slot handle to use, so a
//!    derived family can pin itself to a private slot by hand.
//! 3. [`scoped_opener`] / [`scoped_alert_opener`]: scope factories do the
//!    pinning; one scope value covers a whole family chain.

pub mod alert_opener;
pub mod explicit_opener;
pub mod opener;
pub mod scoped_alert_opener;
pub mod scoped_opener;
pub mod state;
