//! Request routing
//!
//! Name-based delegation over the resolved agent registry. Matching is
//! deterministic: a linear scan in registry order, first match wins.

pub mod delegator;

pub use delegator::DelegationRouter;
