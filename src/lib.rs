
//! A "derivative at a point" operator for a symbolic calculator,
//! together with the expression model, evaluator and reducer it
//! plugs into.

// The #[non_exhaustive] attribute applies at the crate-level, and I
// want module-level restrictions, which are far stricter.
#![allow(clippy::manual_non_exhaustive)]

pub mod display;
pub mod error;
pub mod errorlist;
pub mod expr;
pub mod mode;
pub mod util;
