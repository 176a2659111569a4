//! Baseline primitives bound in the root scope.

use std::fmt::Write as _;

use crate::errors::{integer_overflow, type_mismatch};
use crate::print_handler::PrintHandler;
use crate::value::{Arity, BuiltinFn};
use crate::{EvalResult, Value};

pub(crate) const ROOT_BUILTINS: [BuiltinFn; 6] = [
    BuiltinFn::new("print", Arity::Variadic, builtin_print),
    BuiltinFn::new("paste", Arity::Variadic, builtin_paste),
    BuiltinFn::new("len", Arity::Exact(1), builtin_len),
    BuiltinFn::new("str", Arity::Exact(1), builtin_str),
    BuiltinFn::new("abs", Arity::Exact(1), builtin_abs),
    BuiltinFn::new("names", Arity::Exact(1), builtin_names),
];

fn join_display(args: &[Value], sep: &str) -> String {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        let _ = write!(out, "{arg}");
    }
    out
}

fn builtin_print(args: &[Value], print: &PrintHandler) -> EvalResult {
    print.println(&join_display(args, " "));
    Ok(Value::None)
}

fn builtin_paste(args: &[Value], _: &PrintHandler) -> EvalResult {
    Ok(Value::string(join_display(args, "")))
}

fn builtin_len(args: &[Value], _: &PrintHandler) -> EvalResult {
    let len = match &args[0] {
        Value::Str(s) => s.chars().count(),
        Value::Module(module) => module.len(),
        other => return Err(type_mismatch("str or module", other)),
    };
    i64::try_from(len)
        .map(Value::Int)
        .map_err(|_| integer_overflow("len"))
}

fn builtin_str(args: &[Value], _: &PrintHandler) -> EvalResult {
    Ok(Value::string(args[0].to_string()))
}

fn builtin_abs(args: &[Value], _: &PrintHandler) -> EvalResult {
    match &args[0] {
        Value::Int(n) => n
            .checked_abs()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("abs")),
        Value::Float(x) => Ok(Value::Float(x.abs())),
        other => Err(type_mismatch("int or float", other)),
    }
}

fn builtin_names(args: &[Value], _: &PrintHandler) -> EvalResult {
    match &args[0] {
        Value::Module(module) => {
            let names: Vec<&str> = module.names().map(encl_ir::Name::as_str).collect();
            Ok(Value::string(names.join(",")))
        }
        other => Err(type_mismatch("module", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::print_handler::{buffer_handler, silent_handler};
    use crate::{EvalError, ModuleValue};
    use encl_ir::Name;

    fn call(name: &str, args: &[Value]) -> EvalResult {
        let builtin = ROOT_BUILTINS
            .iter()
            .find(|b| b.name == name)
            .map_or_else(|| panic!("no builtin {name}"), |b| *b);
        (builtin.func)(args, &silent_handler())
    }

    #[test]
    fn print_joins_with_spaces() {
        let handler = buffer_handler();
        let result = builtin_print(&[Value::from("a"), Value::Int(1), Value::Float(2.0)], &handler);
        assert_eq!(result, Ok(Value::None));
        assert_eq!(handler.output(), "a 1 2.0\n");
    }

    #[test]
    fn paste_concatenates() {
        assert_eq!(
            call("paste", &[Value::from("x"), Value::Int(3), Value::Bool(true)]),
            Ok(Value::from("x3true"))
        );
        assert_eq!(call("paste", &[]), Ok(Value::from("")));
    }

    #[test]
    fn len_of_string_and_module() {
        assert_eq!(call("len", &[Value::from("héllo")]), Ok(Value::Int(5)));
        let module: ModuleValue = [(Name::from("a"), Value::Int(1))].into_iter().collect();
        assert_eq!(call("len", &[Value::Module(module)]), Ok(Value::Int(1)));
        assert!(matches!(
            call("len", &[Value::Int(1)]),
            Err(EvalError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn abs_checks_overflow() {
        assert_eq!(call("abs", &[Value::Int(-4)]), Ok(Value::Int(4)));
        assert_eq!(call("abs", &[Value::Float(-0.5)]), Ok(Value::Float(0.5)));
        assert_eq!(
            call("abs", &[Value::Int(i64::MIN)]),
            Err(EvalError::IntegerOverflow { operation: "abs" })
        );
    }

    #[test]
    fn names_lists_exports_in_order() {
        let module: ModuleValue = [
            (Name::from("b"), Value::Int(1)),
            (Name::from("a"), Value::Int(2)),
        ]
        .into_iter()
        .collect();
        assert_eq!(call("names", &[Value::Module(module)]), Ok(Value::from("b,a")));
    }
}
