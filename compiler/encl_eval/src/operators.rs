//! Binary and unary operators.
//!
//! Integer arithmetic is checked. Mixed int/float operands promote to float.
//! `&&` and `||` short-circuit in the interpreter; the versions here only see
//! already-evaluated operands.

use std::cmp::Ordering;

use encl_ir::{BinaryOp, UnaryOp};

use crate::errors::{binary_type_mismatch, division_by_zero, integer_overflow, type_mismatch};
use crate::{EvalResult, Value};

#[inline]
fn checked(result: Option<i64>, op_name: &'static str) -> EvalResult {
    result.map(Value::Int).ok_or_else(|| integer_overflow(op_name))
}

fn compare(ordering: Option<Ordering>, op: BinaryOp) -> Option<Value> {
    let ordering = ordering?;
    let result = match op {
        BinaryOp::Lt => ordering.is_lt(),
        BinaryOp::LtEq => ordering.is_le(),
        BinaryOp::Gt => ordering.is_gt(),
        BinaryOp::GtEq => ordering.is_ge(),
        _ => return None,
    };
    Some(Value::Bool(result))
}

#[allow(clippy::cast_precision_loss)]
pub fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    let result = match (left, right) {
        (Value::Int(a), Value::Int(b)) => return eval_int(op, *a, *b, left, right),
        (Value::Float(a), Value::Float(b)) => eval_float(op, *a, *b),
        (Value::Int(a), Value::Float(b)) => eval_float(op, *a as f64, *b),
        (Value::Float(a), Value::Int(b)) => eval_float(op, *a, *b as f64),
        (Value::Str(a), Value::Str(b)) => match op {
            BinaryOp::Add => Some(Value::string(format!("{a}{b}"))),
            _ => compare(Some(a.cmp(b)), op),
        },
        (Value::Bool(a), Value::Bool(b)) => match op {
            BinaryOp::And => Some(Value::Bool(*a && *b)),
            BinaryOp::Or => Some(Value::Bool(*a || *b)),
            _ => None,
        },
        _ => None,
    };

    match (result, op) {
        (Some(value), _) => Ok(value),
        (None, BinaryOp::Eq) => Ok(Value::Bool(left == right)),
        (None, BinaryOp::NotEq) => Ok(Value::Bool(left != right)),
        (None, _) => Err(binary_type_mismatch(op, left, right)),
    }
}

fn eval_int(op: BinaryOp, a: i64, b: i64, left: &Value, right: &Value) -> EvalResult {
    match op {
        BinaryOp::Add => checked(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked(a.checked_mul(b), "multiplication"),
        BinaryOp::Div if b == 0 => Err(division_by_zero()),
        BinaryOp::Div => checked(a.checked_div(b), "division"),
        BinaryOp::Rem if b == 0 => Err(division_by_zero()),
        BinaryOp::Rem => checked(a.checked_rem(b), "remainder"),
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        BinaryOp::And | BinaryOp::Or => Err(binary_type_mismatch(op, left, right)),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            compare(Some(a.cmp(&b)), op).ok_or_else(|| binary_type_mismatch(op, left, right))
        }
    }
}

#[allow(clippy::float_cmp)]
fn eval_float(op: BinaryOp, a: f64, b: f64) -> Option<Value> {
    let value = match op {
        BinaryOp::Add => Value::Float(a + b),
        BinaryOp::Sub => Value::Float(a - b),
        BinaryOp::Mul => Value::Float(a * b),
        BinaryOp::Div => Value::Float(a / b),
        BinaryOp::Rem => Value::Float(a % b),
        BinaryOp::Eq => Value::Bool(a == b),
        BinaryOp::NotEq => Value::Bool(a != b),
        BinaryOp::And | BinaryOp::Or => return None,
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            // NaN compares false under every ordering.
            return Some(compare(a.partial_cmp(&b), op).unwrap_or(Value::Bool(false)));
        }
    };
    Some(value)
}

pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> EvalResult {
    match (op, operand) {
        (UnaryOp::Neg, Value::Int(n)) => checked(n.checked_neg(), "negation"),
        (UnaryOp::Neg, Value::Float(x)) => Ok(Value::Float(-x)),
        (UnaryOp::Neg, other) => Err(type_mismatch("int or float", other)),
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOp::Not, other) => Err(type_mismatch("bool", other)),
    }
}
