//! rulang-sem - State-machine compiler.
//!
//! A two-pass walk over the program that materializes every `state`
//! declaration into a [`CompiledState`] with dense indices and resolves
//! every `transition` declaration against it. The output is a map from
//! machine name to compiled table; the program itself is untouched and
//! `state`/`transition` statements become no-ops at evaluation time.
//!
//! Pass 1 assigns indices `0..N-1` to the declared states in source
//! order; index 0 is the initial state. Pass 2 resolves each rule's
//! `from`/`to` names to indices and inserts `transitions[from][event] =
//! to`. An unknown machine or state name aborts with a
//! [`CompileError`]; a duplicate `(from, event)` pair is last-writer-wins.

use std::rc::Rc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use rulang_par::ast::{Program, Stmt};
use rulang_util::CompileError;

/// A state machine compiled to dense transition tables.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledState {
    /// Machine name as declared.
    pub name: String,

    /// State names in declaration order; index 0 is the initial state.
    pub state_names: Vec<String>,

    /// Reverse lookup from state name to dense index.
    pub name_to_index: FxHashMap<String, usize>,

    /// `transitions[from][event] = to`, all indices dense.
    pub transitions: FxHashMap<usize, FxHashMap<String, usize>>,
}

impl CompiledState {
    /// Index of the initial state. Always the first declared state.
    pub const INITIAL: usize = 0;

    fn new(name: String, states: Vec<String>) -> Self {
        let mut name_to_index = FxHashMap::default();
        for (index, state) in states.iter().enumerate() {
            name_to_index.insert(state.clone(), index);
        }
        Self {
            name,
            state_names: states,
            name_to_index,
            transitions: FxHashMap::default(),
        }
    }

    /// Resolves a state name to its dense index.
    pub fn state_index(&self, state: &str) -> Option<usize> {
        self.name_to_index.get(state).copied()
    }

    /// Name of the state at `index`.
    ///
    /// Indices originate from this table, so the lookup is total for any
    /// index stored in an instance or a transition entry.
    pub fn state_name(&self, index: usize) -> &str {
        &self.state_names[index]
    }

    /// Looks up the target state for `(from, event)`.
    pub fn target(&self, from: usize, event: &str) -> Option<usize> {
        self.transitions.get(&from)?.get(event).copied()
    }
}

/// Compiled machines keyed by name, in declaration order.
pub type StateTable = IndexMap<String, Rc<CompiledState>>;

/// Compiles every state machine declared in `program`.
///
/// # Errors
///
/// [`CompileError::UnknownMachine`] when a `transition` block names a
/// machine with no prior `state` declaration, and
/// [`CompileError::UnknownState`] when a rule names a state the machine
/// does not have.
pub fn compile_states(program: &Program) -> Result<StateTable, CompileError> {
    let mut machines: IndexMap<String, CompiledState> = IndexMap::new();

    for stmt in &program.body {
        if let Stmt::State(decl) = stmt {
            machines.insert(
                decl.name.clone(),
                CompiledState::new(decl.name.clone(), decl.states.clone()),
            );
        }
    }

    for stmt in &program.body {
        if let Stmt::Transition(decl) = stmt {
            let machine = machines.get_mut(&decl.state_name).ok_or_else(|| {
                CompileError::UnknownMachine {
                    name: decl.state_name.clone(),
                    line: decl.span.line,
                }
            })?;

            for rule in &decl.rules {
                let from = machine.state_index(&rule.from).ok_or_else(|| {
                    CompileError::UnknownState {
                        machine: machine.name.clone(),
                        state: rule.from.clone(),
                        line: rule.span.line,
                    }
                })?;
                let to = machine.state_index(&rule.to).ok_or_else(|| {
                    CompileError::UnknownState {
                        machine: machine.name.clone(),
                        state: rule.to.clone(),
                        line: rule.span.line,
                    }
                })?;

                // Later rules overwrite earlier ones for the same
                // (from, event) pair.
                machine
                    .transitions
                    .entry(from)
                    .or_default()
                    .insert(rule.event.clone(), to);
            }
        }
    }

    Ok(machines
        .into_iter()
        .map(|(name, machine)| (name, Rc::new(machine)))
        .collect())
}
