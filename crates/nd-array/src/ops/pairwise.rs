//! Binary ops, usable both pairwise and with a scalar operand.

use super::BinaryOp;
use crate::element::Element;

pub struct Add;

impl<T: Element> BinaryOp<T> for Add {
    fn op(x: T, y: T, _extra: &[T]) -> T {
        x + y
    }
}

pub struct Sub;

impl<T: Element> BinaryOp<T> for Sub {
    fn op(x: T, y: T, _extra: &[T]) -> T {
        x - y
    }
}

pub struct Mul;

impl<T: Element> BinaryOp<T> for Mul {
    fn op(x: T, y: T, _extra: &[T]) -> T {
        x * y
    }
}

pub struct Div;

impl<T: Element> BinaryOp<T> for Div {
    fn op(x: T, y: T, _extra: &[T]) -> T {
        x / y
    }
}

/// Takes the second operand. Pairwise it copies, with a scalar it fills.
pub struct Assign;

impl<T: Element> BinaryOp<T> for Assign {
    fn op(_x: T, y: T, _extra: &[T]) -> T {
        y
    }
}

pub struct Max;

impl<T: Element> BinaryOp<T> for Max {
    fn op(x: T, y: T, _extra: &[T]) -> T {
        x.max(y)
    }
}

pub struct Min;

impl<T: Element> BinaryOp<T> for Min {
    fn op(x: T, y: T, _extra: &[T]) -> T {
        x.min(y)
    }
}

pub struct Pow;

impl<T: Element> BinaryOp<T> for Pow {
    fn op(x: T, y: T, _extra: &[T]) -> T {
        x.powf(y)
    }
}
