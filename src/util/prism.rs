
//! Functional-style prisms for checked downcasts.

/// A prism from `Up` to `Down` asserts that every `Down` can be seen
/// as an `Up`, and that some `Up`s can be safely downcast to `Down`.
///
/// Prisms implementing this trait should satisfy the following laws,
/// where `===` means "conceptually equal".
///
/// * A widen followed by a narrow reproduces the original value:
/// `prism.narrow_type(prism.widen_type(d)) === Ok(d)`.
///
/// * A successful narrow followed by a widen reproduces the original
/// value: if `prism.narrow_type(u) = Ok(d)`, then
/// `prism.widen_type(d) === u`.
///
/// * A failed narrow returns the original value untouched.
pub trait Prism<Up, Down> {
  /// Attempts to downcast `input` to the type `Down`, returning the
  /// original input as an `Err` on failure.
  fn narrow_type(&self, input: Up) -> Result<Down, Up>;

  /// Widens a `Down` value to its parent type. This must always
  /// succeed.
  fn widen_type(&self, input: Down) -> Up;
}

/// Lift a prism into each element of a `Vec`. Narrowing succeeds only
/// if every element narrows.
#[derive(Debug, Clone)]
pub struct OnVec<X> {
  inner: X,
}

impl<X> OnVec<X> {
  pub fn new(inner: X) -> Self {
    Self { inner }
  }
}

impl<X, Up, Down> Prism<Vec<Up>, Vec<Down>> for OnVec<X>
where X: Prism<Up, Down> {
  fn narrow_type(&self, input: Vec<Up>) -> Result<Vec<Down>, Vec<Up>> {
    let mut output = Vec::with_capacity(input.len());
    let mut iter = input.into_iter();
    while let Some(elem) = iter.next() {
      match self.inner.narrow_type(elem) {
        Ok(elem) => output.push(elem),
        Err(elem) => {
          return Err(recover_failed_downcast(self, output, elem, iter));
        }
      }
    }
    Ok(output)
  }

  fn widen_type(&self, input: Vec<Down>) -> Vec<Up> {
    input.into_iter().map(|i| self.inner.widen_type(i)).collect()
  }
}

// Rebuilds the original vector after a partial downcast, so that a
// failed narrow hands back exactly what it was given.
fn recover_failed_downcast<X, Up, Down, I>(
  vec_prism: &OnVec<X>,
  some_outputs: Vec<Down>,
  current_element: Up,
  rest_of_inputs: I,
) -> Vec<Up>
where X: Prism<Up, Down>,
      I: Iterator<Item=Up> {
  let mut inputs = Vec::with_capacity(some_outputs.len() * 2);
  for out in some_outputs {
    inputs.push(vec_prism.inner.widen_type(out));
  }
  inputs.push(current_element);
  inputs.extend(rest_of_inputs);
  inputs
}
