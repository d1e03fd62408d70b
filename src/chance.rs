//! Random draws shared by every transform.
//!
//! All randomness goes through an injected `rand::Rng`, never a global, so a
//! seeded `StdRng` makes the whole pipeline reproducible.

use rand::seq::SliceRandom;
use rand::Rng;

/// Clamp a probability into [0, 1]. NaN counts as 0.
pub fn clamp_probability(p: f64) -> f64 {
  if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

/// One Bernoulli(p) trial. `p = 0` never fires and `p = 1` always does.
pub fn roll<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
  rng.gen_bool(clamp_probability(p))
}

/// Uniform choice from a slice; `None` when the slice is empty.
pub fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
  items.choose(rng)
}
