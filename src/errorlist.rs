
/// An `ErrorList<E>` can be thought of, roughly, as a `Vec<E>`.
/// Recoverable errors are appended to the list as a pass runs, and in
/// the end the caller can see everything that went wrong without the
/// pass having been aborted.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorList<E> {
  errors: Vec<E>,
}

impl<E> ErrorList<E> {
  /// A new, empty error list.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, error: E) {
    self.errors.push(error)
  }

  pub fn is_empty(&self) -> bool {
    self.errors.is_empty()
  }

  pub fn len(&self) -> usize {
    self.errors.len()
  }

  pub fn errors(&self) -> &[E] {
    &self.errors
  }

  /// Unwraps `result`, recording the error and falling back to
  /// `default()` on failure.
  pub fn unwrap_result_or_else<T, E1, F>(&mut self, result: Result<T, E1>, default: F) -> T
  where E: From<E1>,
        F: FnOnce() -> T {
    match result {
      Ok(x) => x,
      Err(err) => {
        self.push(err.into());
        default()
      }
    }
  }

  pub fn into_vec(self) -> Vec<E> {
    self.errors
  }
}

impl<E> IntoIterator for ErrorList<E> {
  type Item = E;
  type IntoIter = ::std::vec::IntoIter<E>;

  fn into_iter(self) -> Self::IntoIter {
    self.errors.into_iter()
  }
}

impl<E> Default for ErrorList<E> {
  fn default() -> Self {
    Self { errors: Vec::new() }
  }
}

impl<E> From<ErrorList<E>> for Vec<E> {
  fn from(error_list: ErrorList<E>) -> Self {
    error_list.into_vec()
  }
}
