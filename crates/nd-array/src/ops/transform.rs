//! Unary transforms.

use super::UnaryOp;
use crate::element::Element;

pub struct Identity;

impl<T: Element> UnaryOp<T> for Identity {
    fn op(x: T, _extra: &[T]) -> T {
        x
    }
}

pub struct Abs;

impl<T: Element> UnaryOp<T> for Abs {
    fn op(x: T, _extra: &[T]) -> T {
        x.abs()
    }
}

pub struct Neg;

impl<T: Element> UnaryOp<T> for Neg {
    fn op(x: T, _extra: &[T]) -> T {
        -x
    }
}

pub struct Sqrt;

impl<T: Element> UnaryOp<T> for Sqrt {
    fn op(x: T, _extra: &[T]) -> T {
        x.sqrt()
    }
}

pub struct Exp;

impl<T: Element> UnaryOp<T> for Exp {
    fn op(x: T, _extra: &[T]) -> T {
        x.exp()
    }
}

pub struct Log;

impl<T: Element> UnaryOp<T> for Log {
    fn op(x: T, _extra: &[T]) -> T {
        x.ln()
    }
}

/// Logistic sigmoid: `1 / (1 + exp(-x))`.
pub struct Sigmoid;

impl<T: Element> UnaryOp<T> for Sigmoid {
    fn op(x: T, _extra: &[T]) -> T {
        T::one() / (T::one() + (-x).exp())
    }
}

pub struct Tanh;

impl<T: Element> UnaryOp<T> for Tanh {
    fn op(x: T, _extra: &[T]) -> T {
        x.tanh()
    }
}

/// Rectifier. `extra[0]`, when present, is the cutoff (default 0).
pub struct Relu;

impl<T: Element> UnaryOp<T> for Relu {
    fn op(x: T, extra: &[T]) -> T {
        let cutoff = extra.first().copied().unwrap_or_else(T::zero);
        if x > cutoff {
            x
        } else {
            T::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_abs_neg() {
        assert_eq!(<Abs as UnaryOp<f32>>::op(-3.0, &[]), 3.0);
        assert_eq!(<Neg as UnaryOp<f32>>::op(2.0, &[]), -2.0);
        assert_eq!(<Identity as UnaryOp<f64>>::op(1.5, &[]), 1.5);
    }

    #[test]
    fn test_sigmoid() {
        assert_abs_diff_eq!(<Sigmoid as UnaryOp<f32>>::op(0.0, &[]), 0.5);
        assert_abs_diff_eq!(
            <Sigmoid as UnaryOp<f64>>::op(1.0, &[]),
            0.7310585786300049,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_exp_log_sqrt_tanh() {
        assert_abs_diff_eq!(
            <Exp as UnaryOp<f64>>::op(1.0, &[]),
            std::f64::consts::E,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            <Log as UnaryOp<f64>>::op(std::f64::consts::E, &[]),
            1.0,
            epsilon = 1e-12
        );
        assert_eq!(<Sqrt as UnaryOp<f32>>::op(9.0, &[]), 3.0);
        assert_eq!(<Tanh as UnaryOp<f32>>::op(0.0, &[]), 0.0);
    }

    #[test]
    fn test_relu_cutoff() {
        assert_eq!(<Relu as UnaryOp<f32>>::op(-1.0, &[]), 0.0);
        assert_eq!(<Relu as UnaryOp<f32>>::op(2.0, &[]), 2.0);
        assert_eq!(<Relu as UnaryOp<f32>>::op(0.5, &[1.0]), 0.0);
    }
}
