
//! Various utility functions.

pub mod angles;
pub mod prism;
pub mod stricteq;

use std::convert::Infallible;

/// Unwraps a `Result` whose error type is uninhabited.
pub fn unwrap_infallible<T>(res: Result<T, Infallible>) -> T {
  match res {
    Ok(res) => res,
    Err(_) => unreachable!(),
  }
}
