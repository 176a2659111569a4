//! Runtime values.
//!
//! Every variant is `Send + Sync`: strings, closures and module snapshots are
//! shared through `Arc`, so a value pulled out of a module can be handed to
//! another thread and invoked there.

use std::fmt;
use std::sync::Arc;

use encl_ir::{Body, Name};
use rustc_hash::FxHashMap;

use crate::print_handler::PrintHandler;
use crate::{EvalResult, ScopeRef};

#[derive(Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    Function(FunctionValue),
    Builtin(BuiltinFn),
    Module(ModuleValue),
}

impl Value {
    pub fn string(text: impl Into<Arc<str>>) -> Self {
        Value::Str(text.into())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Function(_) => "function",
            Value::Builtin(_) => "builtin",
            Value::Module(_) => "module",
        }
    }

    pub fn as_module(&self) -> Option<&ModuleValue> {
        match self {
            Value::Module(module) => Some(module),
            _ => None,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_) | Value::Builtin(_))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,
            (Value::Module(a), Value::Module(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("none"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::Function(func) => write!(f, "{func:?}"),
            Value::Builtin(builtin) => write!(f, "<builtin {}>", builtin.name),
            Value::Module(module) => {
                f.write_str("<module")?;
                for (i, name) in module.names().enumerate() {
                    f.write_str(if i == 0 { " " } else { ", " })?;
                    f.write_str(name.as_str())?;
                }
                f.write_str(">")
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{:?}", &**s),
            Value::Module(module) => fmt::Debug::fmt(module, f),
            other => fmt::Display::fmt(other, f),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Arc::from(s))
    }
}

impl From<ModuleValue> for Value {
    fn from(module: ModuleValue) -> Self {
        Value::Module(module)
    }
}

/// A closure: parameters, a shared body and the scope it was created in.
///
/// The captured scope is the only resolution context the body sees at call
/// time. For functions defined in a module that is the module scope, whose
/// parent is the root scope.
///
/// # Memory
///
/// A function bound in the scope it captured keeps that scope alive, and the
/// scope keeps the function alive. Such a module scope is never freed, even
/// after every module value and extracted function is dropped. Code that
/// evaluates `module { f = fn() { ... } }` repeatedly, for example inside a
/// function called in a loop, retains one scope per evaluation. Build
/// modules once and reuse the values.
#[derive(Clone)]
pub struct FunctionValue(Arc<FunctionInner>);

struct FunctionInner {
    params: Vec<Name>,
    body: Arc<Body>,
    scope: ScopeRef,
}

impl FunctionValue {
    pub fn new(params: Vec<Name>, body: Arc<Body>, scope: ScopeRef) -> Self {
        FunctionValue(Arc::new(FunctionInner {
            params,
            body,
            scope,
        }))
    }

    pub fn params(&self) -> &[Name] {
        &self.0.params
    }

    pub fn body(&self) -> &Body {
        &self.0.body
    }

    pub fn scope(&self) -> &ScopeRef {
        &self.0.scope
    }

    pub fn ptr_eq(&self, other: &FunctionValue) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<fn(")?;
        for (i, param) in self.0.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(param.as_str())?;
        }
        f.write_str(")>")
    }
}

/// Native function signature. Builtins get the active print handler so
/// `print` needs no global state.
pub type BuiltinFnPtr = fn(&[Value], &PrintHandler) -> EvalResult;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Variadic,
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => n == count,
            Arity::Variadic => true,
        }
    }
}

/// A function implemented in Rust.
#[derive(Copy, Clone)]
pub struct BuiltinFn {
    pub name: &'static str,
    pub arity: Arity,
    pub func: BuiltinFnPtr,
}

impl BuiltinFn {
    pub const fn new(name: &'static str, arity: Arity, func: BuiltinFnPtr) -> Self {
        BuiltinFn { name, arity, func }
    }
}

impl fmt::Debug for BuiltinFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<builtin {}>", self.name)
    }
}

/// Immutable, ordered snapshot of a module's exported bindings.
///
/// Cloning shares the snapshot. It holds no reference to the scope it was
/// taken from; exported closures keep their own scope alive.
#[derive(Clone, Default)]
pub struct ModuleValue(Arc<ModuleInner>);

#[derive(Default)]
struct ModuleInner {
    exports: Vec<(Name, Value)>,
    index: FxHashMap<Name, usize>,
}

impl ModuleValue {
    /// Build from ordered exports. A repeated name keeps its first position
    /// and takes the later value.
    pub fn new(exports: impl IntoIterator<Item = (Name, Value)>) -> Self {
        let mut inner = ModuleInner::default();
        for (name, value) in exports {
            if let Some(&slot) = inner.index.get(&name) {
                inner.exports[slot].1 = value;
            } else {
                inner.index.insert(name.clone(), inner.exports.len());
                inner.exports.push((name, value));
            }
        }
        ModuleValue(Arc::new(inner))
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.index.get(name).map(|&slot| &self.0.exports[slot].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.index.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &Name> {
        self.0.exports.iter().map(|(name, _)| name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Value)> {
        self.0.exports.iter().map(|(name, value)| (name, value))
    }

    pub fn len(&self) -> usize {
        self.0.exports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.exports.is_empty()
    }

    /// Whether both handles share one snapshot.
    pub fn ptr_eq(&self, other: &ModuleValue) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl FromIterator<(Name, Value)> for ModuleValue {
    fn from_iter<I: IntoIterator<Item = (Name, Value)>>(iter: I) -> Self {
        ModuleValue::new(iter)
    }
}

impl PartialEq for ModuleValue {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0.exports == other.0.exports
    }
}

impl fmt::Debug for ModuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
