//! Runtime value domain.
//!
//! A tagged union over everything a Rulang expression can produce.
//! Arrays, objects, and state instances are shared mutable cells: two
//! bindings to the same value observe each other's mutations, which is
//! what the state-machine aliasing semantics require. Functions capture
//! their defining scope by reference and keep its parent chain alive.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use rulang_par::ast::Block;
use rulang_sem::CompiledState;

use crate::control::Flow;
use crate::machine::StateInstance;
use crate::scope::Scope;

/// Shared insertion-ordered string map backing object values.
pub type ObjectRef = Rc<RefCell<IndexMap<String, Value>>>;

/// Shared vector backing array values.
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    Null,
    Number(f64),
    String(String),
    Bool(bool),
    Array(ArrayRef),
    Object(ObjectRef),
    /// User function: parameters, body, and the captured defining scope.
    Function(Rc<FunctionValue>),
    /// Host-provided callable.
    Native(NativeFn),
    /// A compiled state machine, bound under its declared name.
    StateType(Rc<CompiledState>),
    /// A live cursor over a state machine, mutated in place.
    StateInstance(Rc<RefCell<StateInstance>>),
}

/// A user-defined function value.
pub struct FunctionValue {
    pub params: Vec<String>,
    pub body: Rc<Block>,
    pub scope: Rc<Scope>,
}

/// A host-provided callable with a diagnostic name.
///
/// Natives receive the evaluated argument vector and may raise control
/// signals as well as errors - the `next` binding is a native that
/// signals [`Flow::Next`].
#[derive(Clone)]
pub struct NativeFn {
    name: &'static str,
    func: Rc<dyn Fn(&[Value]) -> Result<Value, Flow>>,
}

impl NativeFn {
    pub fn new(
        name: &'static str,
        func: impl Fn(&[Value]) -> Result<Value, Flow> + 'static,
    ) -> Self {
        Self {
            name,
            func: Rc::new(func),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, Flow> {
        (self.func)(args)
    }
}

impl Value {
    /// Builds an array value from evaluated elements.
    pub fn array(elements: Vec<Value>) -> Value {
        Value::Array(Rc::new(RefCell::new(elements)))
    }

    /// Builds an object value from ordered entries.
    pub fn object(entries: Vec<(String, Value)>) -> Value {
        Value::Object(Rc::new(RefCell::new(entries.into_iter().collect())))
    }

    /// Tag name used in error messages and validation reports.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
            Value::Native(_) => "native function",
            Value::StateType(_) => "state type",
            Value::StateInstance(_) => "state instance",
        }
    }

    /// Truthiness: Null, `false`, `0`, and `""` are falsy; everything
    /// else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Stringification used by `print`, string concatenation, and the
    /// host JSON boundary.
    ///
    /// Numbers render as locale-independent decimal; integral floats drop
    /// the fractional part (`14`, not `14.0`). Strings render raw,
    /// without quotes.
    pub fn stringify(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Number(n) => format_number(*n),
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Array(elements) => {
                let parts: Vec<String> =
                    elements.borrow().iter().map(Value::stringify).collect();
                format!("[{}]", parts.join(", "))
            },
            Value::Object(entries) => {
                let parts: Vec<String> = entries
                    .borrow()
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, value.stringify()))
                    .collect();
                format!("{{{}}}", parts.join(", "))
            },
            Value::Function(_) => "<function>".to_string(),
            Value::Native(_) => "<native function>".to_string(),
            Value::StateType(compiled) => format!("<state-type {}>", compiled.name),
            Value::StateInstance(instance) => {
                let instance = instance.borrow();
                format!("<{}: {}>", instance.compiled.name, instance.state_name())
            },
        }
    }
}

/// Renders a number without a trailing `.0` for integral values.
/// Rust's `f64` Display already prints the shortest decimal form.
fn format_number(n: f64) -> String {
    format!("{}", n)
}

/// Language-level equality.
///
/// Two values are equal iff they share a tag and, for Null always, for
/// Number/String/Boolean by payload. Every other pairing - including two
/// references to the same array or instance - compares false.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        _ => false,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        values_equal(self, other)
    }
}

// Debug mirrors stringify but quotes strings so test failures read well.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s),
            other => write!(f, "{}", other.stringify()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stringify_scalars() {
        assert_eq!(Value::Null.stringify(), "null");
        assert_eq!(Value::Bool(true).stringify(), "true");
        assert_eq!(Value::Bool(false).stringify(), "false");
        assert_eq!(Value::String("hi".to_string()).stringify(), "hi");
    }

    #[test]
    fn test_stringify_numbers_without_trailing_zero() {
        assert_eq!(Value::Number(14.0).stringify(), "14");
        assert_eq!(Value::Number(3.14).stringify(), "3.14");
        assert_eq!(Value::Number(0.0).stringify(), "0");
        assert_eq!(Value::Number(-2.0).stringify(), "-2");
    }

    #[test]
    fn test_stringify_array() {
        let value = Value::array(vec![
            Value::Number(1.0),
            Value::String("a".to_string()),
            Value::Bool(true),
        ]);
        assert_eq!(value.stringify(), "[1, a, true]");
    }

    #[test]
    fn test_stringify_object_in_insertion_order() {
        let value = Value::object(vec![
            ("a".to_string(), Value::Number(1.0)),
            ("b".to_string(), Value::Number(2.0)),
        ]);
        assert_eq!(value.stringify(), "{a: 1, b: 2}");
    }

    #[test]
    fn test_stringify_nested() {
        let inner = Value::object(vec![("x".to_string(), Value::Null)]);
        let value = Value::array(vec![inner]);
        assert_eq!(value.stringify(), "[{x: null}]");
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::String(String::new()).is_truthy());

        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Number(-1.0).is_truthy());
        assert!(Value::String(" ".to_string()).is_truthy());
        assert!(Value::array(vec![]).is_truthy());
        assert!(Value::object(vec![]).is_truthy());
    }

    #[test]
    fn test_equality_by_payload() {
        assert_eq!(Value::Null, Value::Null);
        assert_eq!(Value::Number(2.0), Value::Number(2.0));
        assert_ne!(Value::Number(2.0), Value::Number(3.0));
        assert_eq!(
            Value::String("a".to_string()),
            Value::String("a".to_string())
        );
        assert_ne!(Value::Bool(true), Value::Bool(false));
    }

    #[test]
    fn test_cross_tag_equality_is_false() {
        assert_ne!(Value::Number(0.0), Value::Null);
        assert_ne!(Value::String("1".to_string()), Value::Number(1.0));
        assert_ne!(Value::Bool(true), Value::Number(1.0));
    }

    #[test]
    fn test_compound_values_never_compare_equal() {
        let array = Value::array(vec![]);
        assert!(!values_equal(&array, &array.clone()));
        let object = Value::object(vec![]);
        assert!(!values_equal(&object, &object.clone()));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::Bool(true).type_name(), "boolean");
        assert_eq!(Value::array(vec![]).type_name(), "array");
        assert_eq!(Value::object(vec![]).type_name(), "object");
    }
}
