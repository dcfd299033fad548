//! Two-operand reductions.

use super::Reduce3Op;
use crate::element::Element;

/// Number of element pairs whose absolute difference exceeds the tolerance
/// in `extra[0]` (default [`Element::default_eps`]). Zero means equal.
///
/// Identical values always match, so equal infinities compare equal. NaN
/// never matches anything, itself included.
pub struct EqualsWithEps;

impl<T: Element> Reduce3Op<T> for EqualsWithEps {
    fn start(_extra: &[T]) -> T {
        T::zero()
    }

    fn pair(x: T, y: T, extra: &[T]) -> T {
        let eps = extra.first().copied().unwrap_or_else(T::default_eps);
        if x == y || (x - y).abs() <= eps {
            T::zero()
        } else {
            T::one()
        }
    }

    fn merge(a: T, b: T, _extra: &[T]) -> T {
        a + b
    }
}

pub struct EuclideanDistance;

impl<T: Element> Reduce3Op<T> for EuclideanDistance {
    fn start(_extra: &[T]) -> T {
        T::zero()
    }

    fn pair(x: T, y: T, _extra: &[T]) -> T {
        let d = x - y;
        d * d
    }

    fn merge(a: T, b: T, _extra: &[T]) -> T {
        a + b
    }

    fn finish(acc: T, _n: usize, _extra: &[T]) -> T {
        acc.sqrt()
    }
}

pub struct ManhattanDistance;

impl<T: Element> Reduce3Op<T> for ManhattanDistance {
    fn start(_extra: &[T]) -> T {
        T::zero()
    }

    fn pair(x: T, y: T, _extra: &[T]) -> T {
        (x - y).abs()
    }

    fn merge(a: T, b: T, _extra: &[T]) -> T {
        a + b
    }
}

/// Inner product.
pub struct Dot;

impl<T: Element> Reduce3Op<T> for Dot {
    fn start(_extra: &[T]) -> T {
        T::zero()
    }

    fn pair(x: T, y: T, _extra: &[T]) -> T {
        x * y
    }

    fn merge(a: T, b: T, _extra: &[T]) -> T {
        a + b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold<Op: Reduce3Op<f64>>(x: &[f64], y: &[f64], extra: &[f64]) -> f64 {
        let acc = x
            .iter()
            .zip(y)
            .fold(Op::start(extra), |acc, (&a, &b)| {
                Op::merge(acc, Op::pair(a, b, extra), extra)
            });
        Op::finish(acc, x.len(), extra)
    }

    #[test]
    fn test_equals_with_eps_counts_mismatches() {
        let a = [1.0, 2.0, 3.0];
        assert_eq!(fold::<EqualsWithEps>(&a, &[1.0, 2.0, 3.0], &[1e-5]), 0.0);
        assert_eq!(fold::<EqualsWithEps>(&a, &[1.0, 2.5, 4.0], &[1e-5]), 2.0);
        assert_eq!(fold::<EqualsWithEps>(&a, &[1.0, 2.5, 4.0], &[1.0]), 0.0);
        assert_eq!(fold::<EqualsWithEps>(&[f64::NAN], &[f64::NAN], &[]), 1.0);
    }

    #[test]
    fn test_equals_with_eps_infinities() {
        let inf = [f64::INFINITY, f64::NEG_INFINITY];
        assert_eq!(fold::<EqualsWithEps>(&inf, &inf, &[]), 0.0);
        assert_eq!(
            fold::<EqualsWithEps>(&inf, &[f64::NEG_INFINITY, f64::INFINITY], &[]),
            2.0
        );
        assert_eq!(fold::<EqualsWithEps>(&[f64::INFINITY], &[1e300], &[1.0]), 1.0);
    }

    #[test]
    fn test_distances() {
        assert_eq!(fold::<EuclideanDistance>(&[0.0, 0.0], &[3.0, 4.0], &[]), 5.0);
        assert_eq!(fold::<ManhattanDistance>(&[0.0, 0.0], &[3.0, -4.0], &[]), 7.0);
        assert_eq!(fold::<Dot>(&[1.0, 2.0], &[3.0, 4.0], &[]), 11.0);
    }
}
