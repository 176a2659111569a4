//! Libraries shipped with the default registry.

use encl_eval::errors::{integer_overflow, type_mismatch};
use encl_eval::{Arity, BuiltinFn, EvalError, EvalResult, ModuleValue, PrintHandler, Value};
use encl_ir::Name;

use crate::StaticRegistry;

/// Registry with the `math` and `strings` libraries.
pub fn standard_registry() -> StaticRegistry {
    StaticRegistry::new()
        .with_library("math", math())
        .with_library("strings", strings())
}

fn library(constants: Vec<(&str, Value)>, functions: &[BuiltinFn]) -> ModuleValue {
    constants
        .into_iter()
        .map(|(name, value)| (Name::from(name), value))
        .chain(
            functions
                .iter()
                .map(|f| (Name::from(f.name), Value::Builtin(*f))),
        )
        .collect()
}

fn math() -> ModuleValue {
    library(
        vec![("pi", Value::Float(std::f64::consts::PI))],
        &[
            BuiltinFn::new("sqrt", Arity::Exact(1), math_sqrt),
            BuiltinFn::new("floor", Arity::Exact(1), math_floor),
            BuiltinFn::new("max", Arity::Exact(2), math_max),
            BuiltinFn::new("min", Arity::Exact(2), math_min),
            BuiltinFn::new("pow", Arity::Exact(2), math_pow),
        ],
    )
}

fn strings() -> ModuleValue {
    library(
        Vec::new(),
        &[
            BuiltinFn::new("upper", Arity::Exact(1), strings_upper),
            BuiltinFn::new("lower", Arity::Exact(1), strings_lower),
            BuiltinFn::new("concat", Arity::Variadic, strings_concat),
            BuiltinFn::new("repeat", Arity::Exact(2), strings_repeat),
        ],
    )
}

#[allow(clippy::cast_precision_loss)]
fn number(value: &Value) -> Result<f64, EvalError> {
    match value {
        Value::Int(n) => Ok(*n as f64),
        Value::Float(x) => Ok(*x),
        other => Err(type_mismatch("int or float", other)),
    }
}

fn text(value: &Value) -> Result<&str, EvalError> {
    match value {
        Value::Str(s) => Ok(&**s),
        other => Err(type_mismatch("str", other)),
    }
}

fn math_sqrt(args: &[Value], _: &PrintHandler) -> EvalResult {
    Ok(Value::Float(number(&args[0])?.sqrt()))
}

fn math_floor(args: &[Value], _: &PrintHandler) -> EvalResult {
    match &args[0] {
        Value::Int(n) => Ok(Value::Int(*n)),
        other => Ok(Value::Float(number(other)?.floor())),
    }
}

fn pick(args: &[Value], prefer_left: fn(f64, f64) -> bool) -> EvalResult {
    let (a, b) = (number(&args[0])?, number(&args[1])?);
    Ok(if prefer_left(a, b) {
        args[0].clone()
    } else {
        args[1].clone()
    })
}

fn math_max(args: &[Value], _: &PrintHandler) -> EvalResult {
    pick(args, |a, b| a >= b)
}

fn math_min(args: &[Value], _: &PrintHandler) -> EvalResult {
    pick(args, |a, b| a <= b)
}

fn math_pow(args: &[Value], _: &PrintHandler) -> EvalResult {
    if let (Value::Int(base), Value::Int(exp)) = (&args[0], &args[1]) {
        if let Ok(exp) = u32::try_from(*exp) {
            return base
                .checked_pow(exp)
                .map(Value::Int)
                .ok_or_else(|| integer_overflow("pow"));
        }
    }
    Ok(Value::Float(number(&args[0])?.powf(number(&args[1])?)))
}

fn strings_upper(args: &[Value], _: &PrintHandler) -> EvalResult {
    Ok(Value::string(text(&args[0])?.to_uppercase()))
}

fn strings_lower(args: &[Value], _: &PrintHandler) -> EvalResult {
    Ok(Value::string(text(&args[0])?.to_lowercase()))
}

fn strings_concat(args: &[Value], _: &PrintHandler) -> EvalResult {
    let mut out = String::new();
    for arg in args {
        out.push_str(text(arg)?);
    }
    Ok(Value::string(out))
}

/// Largest string `strings::repeat` builds, in bytes.
pub const MAX_REPEAT_BYTES: usize = 64 * 1024 * 1024;

fn strings_repeat(args: &[Value], _: &PrintHandler) -> EvalResult {
    let s = text(&args[0])?;
    match &args[1] {
        Value::Int(n) => {
            let n = usize::try_from(*n).map_err(|_| type_mismatch("non-negative int", &args[1]))?;
            if !matches!(s.len().checked_mul(n), Some(len) if len <= MAX_REPEAT_BYTES) {
                return Err(integer_overflow("repeat"));
            }
            Ok(Value::string(s.repeat(n)))
        }
        other => Err(type_mismatch("int", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LibraryRegistry;
    use encl_eval::silent_handler;
    use pretty_assertions::assert_eq;

    fn call(library: &str, name: &str, args: &[Value]) -> EvalResult {
        let module = standard_registry()
            .resolve_external(library, None)
            .unwrap_or_else(|err| panic!("{err}"));
        match module.get(name) {
            Some(Value::Builtin(f)) => (f.func)(args, &silent_handler()),
            other => panic!("{library}::{name} is not a builtin: {other:?}"),
        }
    }

    #[test]
    fn math_library() {
        assert_eq!(call("math", "sqrt", &[Value::Int(16)]), Ok(Value::Float(4.0)));
        assert_eq!(call("math", "floor", &[Value::Float(2.7)]), Ok(Value::Float(2.0)));
        assert_eq!(call("math", "max", &[Value::Int(2), Value::Float(2.5)]), Ok(Value::Float(2.5)));
        assert_eq!(call("math", "min", &[Value::Int(2), Value::Int(9)]), Ok(Value::Int(2)));
        assert_eq!(call("math", "pow", &[Value::Int(2), Value::Int(10)]), Ok(Value::Int(1024)));
        assert_eq!(call("math", "pow", &[Value::Int(4), Value::Float(0.5)]), Ok(Value::Float(2.0)));
    }

    #[test]
    fn math_exports_pi_first() {
        let module = standard_registry()
            .resolve_external("math", None)
            .unwrap_or_else(|err| panic!("{err}"));
        assert_eq!(module.names().next().map(Name::as_str), Some("pi"));
    }

    #[test]
    fn strings_library() {
        assert_eq!(call("strings", "upper", &[Value::from("ab")]), Ok(Value::from("AB")));
        assert_eq!(call("strings", "lower", &[Value::from("AB")]), Ok(Value::from("ab")));
        assert_eq!(
            call("strings", "concat", &[Value::from("a"), Value::from("b"), Value::from("c")]),
            Ok(Value::from("abc"))
        );
        assert_eq!(
            call("strings", "repeat", &[Value::from("ab"), Value::Int(3)]),
            Ok(Value::from("ababab"))
        );
        assert!(call("strings", "repeat", &[Value::from("ab"), Value::Int(-1)]).is_err());
        assert!(call("strings", "upper", &[Value::Int(1)]).is_err());
    }

    #[test]
    fn repeat_rejects_oversized_results() {
        assert_eq!(
            call("strings", "repeat", &[Value::from("abc"), Value::Int(i64::MAX)]),
            Err(EvalError::IntegerOverflow { operation: "repeat" })
        );
        let just_over = i64::try_from(MAX_REPEAT_BYTES / 2 + 1).unwrap_or(i64::MAX);
        assert_eq!(
            call("strings", "repeat", &[Value::from("ab"), Value::Int(just_over)]),
            Err(EvalError::IntegerOverflow { operation: "repeat" })
        );
        assert_eq!(
            call("strings", "repeat", &[Value::from(""), Value::Int(i64::MAX)]),
            Ok(Value::from(""))
        );
    }

    #[test]
    fn repeat_overflow_surfaces_through_session() {
        let session = crate::Session::with_config(
            crate::SessionConfig::default().print_handler(silent_handler()),
        );
        assert_eq!(
            session.eval_source("x = strings::repeat(\"abc\", 9223372036854775807)"),
            Err(EvalError::IntegerOverflow { operation: "repeat" })
        );
    }
}
