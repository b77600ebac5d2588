//! State-machine value protocol.
//!
//! A [`StateInstance`] is a live cursor over a compiled machine: the
//! current state index plus the full history of visited indices. `apply`
//! and `rollback` mutate the instance in place, so every binding that
//! shares the instance observes the same history.
//!
//! Member access on machine values is implemented here: `.new` on a state
//! type; `.state`, `.history`, `.apply`, `.rollback` on an instance.

use std::cell::RefCell;
use std::rc::Rc;

use rulang_sem::CompiledState;
use rulang_util::RuntimeError;

use crate::value::{NativeFn, Value};

/// A live cursor over a state machine.
///
/// Invariants: `history` is never empty, its last element equals
/// `current`, and every element is a valid index into the machine's
/// state list.
#[derive(Debug)]
pub struct StateInstance {
    pub compiled: Rc<CompiledState>,
    pub current: usize,
    pub history: Vec<usize>,
}

impl StateInstance {
    /// Creates a fresh instance positioned at the machine's initial state.
    pub fn new(compiled: Rc<CompiledState>) -> Self {
        Self {
            compiled,
            current: CompiledState::INITIAL,
            history: vec![CompiledState::INITIAL],
        }
    }

    /// Name of the current state.
    pub fn state_name(&self) -> &str {
        self.compiled.state_name(self.current)
    }

    /// Visited state names in chronological order.
    pub fn history_names(&self) -> Vec<String> {
        self.history
            .iter()
            .map(|&index| self.compiled.state_name(index).to_string())
            .collect()
    }

    /// Applies `event`, advancing to the registered target state.
    pub fn apply(&mut self, event: &str) -> Result<(), RuntimeError> {
        match self.compiled.target(self.current, event) {
            Some(to) => {
                self.current = to;
                self.history.push(to);
                Ok(())
            },
            None => Err(RuntimeError::transition(format!(
                "Cannot apply {} in state {}",
                event,
                self.state_name()
            ))),
        }
    }

    /// Undoes the most recent `apply`, returning the state rolled back to.
    pub fn rollback(&mut self) -> Result<String, RuntimeError> {
        if self.history.len() <= 1 {
            return Err(RuntimeError::transition("no previous state"));
        }
        self.history.pop();
        if let Some(&last) = self.history.last() {
            self.current = last;
        }
        Ok(self.state_name().to_string())
    }
}

/// Member access on a state type. Only `.new` is defined.
pub fn state_type_member(
    compiled: &Rc<CompiledState>,
    property: &str,
) -> Result<Value, RuntimeError> {
    match property {
        "new" => {
            let compiled = compiled.clone();
            Ok(Value::Native(NativeFn::new("new", move |args| {
                if !args.is_empty() {
                    return Err(RuntimeError::type_error("new takes no arguments").into());
                }
                let instance = StateInstance::new(compiled.clone());
                Ok(Value::StateInstance(Rc::new(RefCell::new(instance))))
            })))
        },
        other => Err(RuntimeError::type_error(format!(
            "no property `{}` on state type `{}`",
            other, compiled.name
        ))),
    }
}

/// Member access on a state instance.
pub fn state_instance_member(
    instance: &Rc<RefCell<StateInstance>>,
    property: &str,
) -> Result<Value, RuntimeError> {
    match property {
        "state" => Ok(Value::String(instance.borrow().state_name().to_string())),
        "history" => {
            let names = instance
                .borrow()
                .history_names()
                .into_iter()
                .map(Value::String)
                .collect();
            Ok(Value::array(names))
        },
        "apply" => {
            let instance = instance.clone();
            Ok(Value::Native(NativeFn::new("apply", move |args| {
                let event = match args {
                    [Value::String(event)] => event,
                    [other] => {
                        return Err(RuntimeError::type_error(format!(
                            "apply expects a string event, got {}",
                            other.type_name()
                        ))
                        .into())
                    },
                    _ => {
                        return Err(RuntimeError::type_error(
                            "apply takes exactly one argument",
                        )
                        .into())
                    },
                };
                instance.borrow_mut().apply(event)?;
                Ok(Value::Null)
            })))
        },
        "rollback" => {
            let instance = instance.clone();
            Ok(Value::Native(NativeFn::new("rollback", move |_args| {
                let name = instance.borrow_mut().rollback()?;
                Ok(Value::String(name))
            })))
        },
        other => {
            let machine = instance.borrow().compiled.name.clone();
            Err(RuntimeError::type_error(format!(
                "no property `{}` on instance of `{}`",
                other, machine
            )))
        },
    }
}
