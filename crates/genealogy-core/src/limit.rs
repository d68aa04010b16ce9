//! Result caps for listing operations.
//!
//! Every listing clamps its caller-supplied limit into `1..=max` before the
//! value reaches storage.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Limit(u32);

impl Limit {
  pub const MIN: u32 = 1;
  /// Cap for free-text searches over people and locations.
  pub const SEARCH_MAX: u32 = 200;
  /// Cap for every other listing.
  pub const LIST_MAX: u32 = 500;

  /// Clamp `requested` into `MIN..=max`.
  pub fn clamped(requested: i64, max: u32) -> Self {
    let max = max.max(Self::MIN);
    let value = requested.clamp(i64::from(Self::MIN), i64::from(max));
    Self(u32::try_from(value).unwrap_or(max))
  }

  pub fn get(self) -> u32 { self.0 }
}

#[cfg(test)]
mod tests {
  use super::Limit;

  #[test]
  fn oversized_limits_clamp_to_max() {
    assert_eq!(Limit::clamped(10_000, Limit::LIST_MAX).get(), 500);
    assert_eq!(Limit::clamped(i64::MAX, Limit::SEARCH_MAX).get(), 200);
  }

  #[test]
  fn zero_and_negative_limits_clamp_to_one() {
    assert_eq!(Limit::clamped(0, Limit::LIST_MAX).get(), 1);
    assert_eq!(Limit::clamped(-25, Limit::LIST_MAX).get(), 1);
    assert_eq!(Limit::clamped(i64::MIN, Limit::LIST_MAX).get(), 1);
  }

  #[test]
  fn in_range_limits_pass_through() {
    assert_eq!(Limit::clamped(50, Limit::LIST_MAX).get(), 50);
    assert_eq!(Limit::clamped(200, Limit::SEARCH_MAX).get(), 200);
  }
}
