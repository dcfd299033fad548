//! Single-operand reductions.

use super::ReduceOp;
use crate::element::Element;

pub struct Sum;

impl<T: Element> ReduceOp<T> for Sum {
    fn start(_extra: &[T]) -> T {
        T::zero()
    }

    fn merge(a: T, b: T, _extra: &[T]) -> T {
        a + b
    }
}

/// Arithmetic mean. The mean of no elements is NaN.
pub struct Mean;

impl<T: Element> ReduceOp<T> for Mean {
    fn start(_extra: &[T]) -> T {
        T::zero()
    }

    fn merge(a: T, b: T, _extra: &[T]) -> T {
        a + b
    }

    fn finish(acc: T, n: usize, _extra: &[T]) -> T {
        if n == 0 {
            T::nan()
        } else {
            acc / T::from_count(n)
        }
    }
}

pub struct Max;

impl<T: Element> ReduceOp<T> for Max {
    fn start(_extra: &[T]) -> T {
        T::neg_infinity()
    }

    fn merge(a: T, b: T, _extra: &[T]) -> T {
        a.max(b)
    }
}

pub struct Min;

impl<T: Element> ReduceOp<T> for Min {
    fn start(_extra: &[T]) -> T {
        T::infinity()
    }

    fn merge(a: T, b: T, _extra: &[T]) -> T {
        a.min(b)
    }
}

pub struct Prod;

impl<T: Element> ReduceOp<T> for Prod {
    fn start(_extra: &[T]) -> T {
        T::one()
    }

    fn merge(a: T, b: T, _extra: &[T]) -> T {
        a * b
    }
}

/// Sum of absolute values (L1 norm).
pub struct AbsSum;

impl<T: Element> ReduceOp<T> for AbsSum {
    fn start(_extra: &[T]) -> T {
        T::zero()
    }

    fn map(x: T, _extra: &[T]) -> T {
        x.abs()
    }

    fn merge(a: T, b: T, _extra: &[T]) -> T {
        a + b
    }
}

/// Sum of squares.
pub struct SquaredNorm;

impl<T: Element> ReduceOp<T> for SquaredNorm {
    fn start(_extra: &[T]) -> T {
        T::zero()
    }

    fn map(x: T, _extra: &[T]) -> T {
        x * x
    }

    fn merge(a: T, b: T, _extra: &[T]) -> T {
        a + b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold<Op: ReduceOp<f32>>(values: &[f32]) -> f32 {
        let acc = values
            .iter()
            .fold(Op::start(&[]), |acc, &v| Op::merge(acc, Op::map(v, &[]), &[]));
        Op::finish(acc, values.len(), &[])
    }

    #[test]
    fn test_sum_mean() {
        assert_eq!(fold::<Sum>(&[1.0, 2.0, 3.0, 4.0]), 10.0);
        assert_eq!(fold::<Mean>(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert!(fold::<Mean>(&[]).is_nan());
    }

    #[test]
    fn test_min_max_prod() {
        assert_eq!(fold::<Min>(&[-1.0, -2.0, -3.0, -4.0]), -4.0);
        assert_eq!(fold::<Max>(&[-1.0, -2.0, -3.0, -4.0]), -1.0);
        assert_eq!(fold::<Prod>(&[1.0, 2.0, 3.0, 4.0]), 24.0);
    }

    #[test]
    fn test_norms() {
        assert_eq!(fold::<AbsSum>(&[-1.0, 2.0, -3.0]), 6.0);
        assert_eq!(fold::<SquaredNorm>(&[3.0, 4.0]), 25.0);
    }
}
