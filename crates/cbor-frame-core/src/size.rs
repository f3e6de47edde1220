//! Size expressions: predicted byte lengths of encodings.
//!
//! A [`Size`] is either a concrete byte count or a function of some input
//! magnitude (a byte string's length, an integer's value) whose head width
//! is not known until that magnitude is. Sizes add together; a sum that
//! contains any dependent part stays dependent, and every dependent part
//! of a sum receives the same argument when it is applied.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::sync::Arc;

use crate::error::{Result, SizeError};
use crate::head::head_size;

type SizeFn = dyn Fn(Size) -> Size + Send + Sync;

/// Predicted encoded size in bytes.
#[derive(Clone)]
pub enum Size {
    /// A concrete byte count.
    Fixed(u64),
    /// A byte count that depends on an input magnitude.
    Dependent(Arc<SizeFn>),
}

impl Size {
    /// Zero bytes.
    pub const ZERO: Self = Size::Fixed(0);

    /// A concrete byte count.
    pub const fn fixed(n: u64) -> Self {
        Size::Fixed(n)
    }

    /// A byte count computed from an input magnitude.
    pub fn dependent<F>(f: F) -> Self
    where
        F: Fn(Size) -> Size + Send + Sync + 'static,
    {
        Size::Dependent(Arc::new(f))
    }

    /// A size equal to its input: "the input magnitude, in bytes".
    pub fn input() -> Self {
        Self::dependent(|n| n)
    }

    /// A size that depends on more than one independent magnitude.
    ///
    /// A single input cannot determine it, so applying any argument yields
    /// another unresolved size and evaluation fails with
    /// [`SizeError::Unresolved`].
    pub fn unresolved() -> Self {
        Self::dependent(|_| Size::unresolved())
    }

    /// Sum of sizes that each have their own input magnitude.
    ///
    /// Fixed parts add up as usual. With one dependent part the input is
    /// that part's. With more than one, no single input fits them all and
    /// the result is [`Size::unresolved`].
    pub fn independent_sum<I: IntoIterator<Item = Size>>(parts: I) -> Self {
        let mut fixed = 0u64;
        let mut dependent = None;
        for part in parts {
            match part {
                Size::Fixed(n) => fixed = fixed.saturating_add(n),
                Size::Dependent(_) if dependent.is_none() => dependent = Some(part),
                Size::Dependent(_) => return Size::unresolved(),
            }
        }
        match dependent {
            Some(part) => Size::Fixed(fixed) + part,
            None => Size::Fixed(fixed),
        }
    }

    /// Feed `arg` to a dependent size. Fixed sizes ignore it.
    pub fn apply(&self, arg: Size) -> Size {
        match self {
            Size::Fixed(n) => Size::Fixed(*n),
            Size::Dependent(f) => f(arg),
        }
    }

    /// Shorthand for applying a concrete magnitude and evaluating.
    pub fn at(&self, n: u64) -> Result<u64> {
        self.apply(Size::Fixed(n)).evaluate()
    }

    /// The concrete byte count, if no input is still outstanding.
    pub fn evaluate(&self) -> Result<u64> {
        match self {
            Size::Fixed(n) => Ok(*n),
            Size::Dependent(_) => Err(SizeError::Unresolved),
        }
    }

    /// Whether this size is already concrete.
    pub fn is_fixed(&self) -> bool {
        matches!(self, Size::Fixed(_))
    }

    /// Size of a CBOR head whose argument is this size's value.
    ///
    /// Lifts [`head_size`] over dependent sizes, so a byte string of
    /// `len` bytes costs `Size::head_of(len) + len`.
    pub fn head_of(inner: Size) -> Size {
        match inner {
            Size::Fixed(n) => Size::Fixed(head_size(n)),
            Size::Dependent(f) => Size::dependent(move |x| Size::head_of(f(x))),
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Size::ZERO
    }
}

impl fmt::Debug for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Size::Fixed(n) => write!(f, "Fixed({n})"),
            Size::Dependent(_) => f.write_str("Dependent(..)"),
        }
    }
}

impl From<u64> for Size {
    fn from(n: u64) -> Self {
        Size::Fixed(n)
    }
}

impl Add for Size {
    type Output = Size;

    fn add(self, rhs: Size) -> Size {
        match (self, rhs) {
            (Size::Fixed(a), Size::Fixed(b)) => Size::Fixed(a.saturating_add(b)),
            (Size::Fixed(a), Size::Dependent(g)) => {
                Size::dependent(move |x| Size::Fixed(a) + g(x))
            }
            (Size::Dependent(f), Size::Fixed(b)) => {
                Size::dependent(move |x| f(x) + Size::Fixed(b))
            }
            (Size::Dependent(f), Size::Dependent(g)) => {
                Size::dependent(move |x| f(x.clone()) + g(x))
            }
        }
    }
}

impl Add<u64> for Size {
    type Output = Size;

    fn add(self, rhs: u64) -> Size {
        self + Size::Fixed(rhs)
    }
}

impl Add<Size> for u64 {
    type Output = Size;

    fn add(self, rhs: Size) -> Size {
        Size::Fixed(self) + rhs
    }
}

impl Sum for Size {
    fn sum<I: Iterator<Item = Size>>(iter: I) -> Size {
        iter.fold(Size::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_addition() {
        let total = Size::fixed(2) + Size::fixed(3) + 4;
        assert_eq!(total.evaluate(), Ok(9));
        assert!(total.is_fixed());
    }

    #[test]
    fn test_dependent_is_unresolved_until_applied() {
        let bytes = Size::head_of(Size::input()) + Size::input();
        assert!(!bytes.is_fixed());
        assert_eq!(bytes.evaluate(), Err(SizeError::Unresolved));
        assert_eq!(bytes.at(0), Ok(1));
        assert_eq!(bytes.at(24), Ok(26));
        assert_eq!(bytes.at(256), Ok(259));
    }

    #[test]
    fn test_fixed_ignores_argument() {
        assert_eq!(Size::fixed(7).at(1_000_000), Ok(7));
    }

    #[test]
    fn test_mixed_sum_shares_argument() {
        let s = 1u64 + Size::input() + Size::input() + Size::fixed(1);
        assert_eq!(s.at(10), Ok(22));
    }

    #[test]
    fn test_head_of_fixed() {
        assert_eq!(Size::head_of(Size::fixed(23)).evaluate(), Ok(1));
        assert_eq!(Size::head_of(Size::fixed(65536)).evaluate(), Ok(5));
    }

    #[test]
    fn test_nested_dependency() {
        // head of a byte string whose own length is a byte string of `n`
        let inner = Size::head_of(Size::input()) + Size::input();
        let outer = Size::head_of(inner.clone()) + inner;
        // n = 23 -> inner = 24 -> outer = 2 + 24
        assert_eq!(outer.at(23), Ok(26));
    }

    #[test]
    fn test_unresolved_never_evaluates() {
        let s = Size::unresolved();
        assert_eq!(s.at(0), Err(SizeError::Unresolved));
        let twice = s.apply(Size::fixed(3)).apply(Size::fixed(3));
        assert_eq!(twice.evaluate(), Err(SizeError::Unresolved));
        assert_eq!((Size::fixed(1) + s).at(5), Err(SizeError::Unresolved));
    }

    #[test]
    fn test_independent_sum() {
        let all_fixed = Size::independent_sum([Size::fixed(1), Size::fixed(2)]);
        assert_eq!(all_fixed.evaluate(), Ok(3));

        let one_dependent = Size::independent_sum([Size::fixed(1), Size::head_of(Size::input())]);
        assert_eq!(one_dependent.at(24), Ok(3));

        let two_dependent = Size::independent_sum([Size::input(), Size::input()]);
        for n in [0, 24, 256, 65536] {
            assert_eq!(two_dependent.at(n), Err(SizeError::Unresolved));
        }
    }

    #[test]
    fn test_sum() {
        let total: Size = (1..=4).map(Size::fixed).sum();
        assert_eq!(total.evaluate(), Ok(10));
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", Size::fixed(3)), "Fixed(3)");
        assert_eq!(format!("{:?}", Size::input()), "Dependent(..)");
    }
}
