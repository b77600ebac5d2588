//! The tree-walking evaluator.
//!
//! `run` pre-registers every compiled state type into the root scope,
//! then executes top-level statements in source order. Handler and
//! middleware bodies are executed later by the host through
//! [`Evaluator::exec_block_in`], which surfaces `return`/`next()` as an
//! [`Outcome`] instead of swallowing them.

use std::rc::Rc;

use rulang_par::ast::*;
use rulang_sem::StateTable;
use rulang_util::RuntimeError;

use crate::control::{EvalResult, Flow, Outcome};
use crate::host::Host;
use crate::machine;
use crate::scope::Scope;
use crate::validate::validate_object;
use crate::value::{values_equal, FunctionValue, Value};

/// Tree-walking evaluator bound to a host.
pub struct Evaluator {
    host: Rc<dyn Host>,
}

impl Evaluator {
    pub fn new(host: Rc<dyn Host>) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &Rc<dyn Host> {
        &self.host
    }

    /// Runs a program's top-level statements in `root`.
    ///
    /// Every machine in `states` is bound into `root` as a state type
    /// first, in declaration order, so expressions can call
    /// `Machine.new()` regardless of statement ordering.
    pub fn run(
        &self,
        program: &Program,
        states: &StateTable,
        root: &Rc<Scope>,
    ) -> Result<(), RuntimeError> {
        for (name, compiled) in states {
            root.define(name, Value::StateType(compiled.clone()));
        }

        for stmt in &program.body {
            match self.exec_stmt(stmt, root) {
                Ok(()) => {},
                Err(Flow::Error(err)) => return Err(err),
                Err(Flow::Return(_)) => {
                    return Err(RuntimeError::type_error("`return` outside of a function"))
                },
                Err(Flow::Next) => {
                    return Err(RuntimeError::type_error("`next()` outside of a middleware"))
                },
            }
        }
        Ok(())
    }

    /// Executes a handler or middleware body directly in `scope`.
    ///
    /// The caller supplies the scope (typically a fresh child of the root
    /// with `req`/`res`/`next`/`db` bound) and receives control signals
    /// as an [`Outcome`] rather than having them routed internally.
    pub fn exec_block_in(&self, block: &Block, scope: &Rc<Scope>) -> Result<Outcome, RuntimeError> {
        for stmt in &block.body {
            match self.exec_stmt(stmt, scope) {
                Ok(()) => {},
                Err(Flow::Return(value)) => return Ok(Outcome::Returned(value)),
                Err(Flow::Next) => return Ok(Outcome::Next),
                Err(Flow::Error(err)) => return Err(err),
            }
        }
        Ok(Outcome::Completed)
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn exec_stmt(&self, stmt: &Stmt, scope: &Rc<Scope>) -> EvalResult<()> {
        match stmt {
            // Handled by the state compiler before execution starts.
            Stmt::State(_) | Stmt::Transition(_) => Ok(()),

            Stmt::Let(decl) => {
                let value = self.eval_expr(&decl.value, scope)?;
                scope.define(&decl.name, value);
                Ok(())
            },

            Stmt::Fn(decl) => {
                let function = FunctionValue {
                    params: decl.params.clone(),
                    body: decl.body.clone(),
                    scope: scope.clone(),
                };
                scope.define(&decl.name, Value::Function(Rc::new(function)));
                Ok(())
            },

            Stmt::If(if_stmt) => self.exec_if(if_stmt, scope),

            Stmt::Return(ret) => {
                let value = match &ret.arg {
                    Some(expr) => self.eval_expr(expr, scope)?,
                    None => Value::Null,
                };
                Err(Flow::Return(value))
            },

            Stmt::Print(print) => {
                let value = self.eval_expr(&print.arg, scope)?;
                self.host.print(&value.stringify());
                Ok(())
            },

            Stmt::Block(block) => self.exec_block_child(block, scope),

            Stmt::Expr(expr) => {
                self.eval_expr(expr, scope)?;
                Ok(())
            },

            Stmt::Endpoint(decl) => {
                self.host.on_endpoint(
                    decl.method,
                    &decl.path,
                    &decl.middlewares,
                    decl.body.clone(),
                );
                Ok(())
            },

            Stmt::Middleware(decl) => {
                self.host.on_middleware(&decl.name, decl.body.clone());
                Ok(())
            },

            Stmt::Use(stmt) => {
                self.host.on_use(&stmt.middlewares);
                Ok(())
            },

            Stmt::Server(stmt) => {
                let port = self.eval_expr(&stmt.port, scope)?;
                match port {
                    Value::Number(port) => {
                        self.host.on_server(port);
                        Ok(())
                    },
                    other => Err(RuntimeError::type_error(format!(
                        "server port must be a number, got {}",
                        other.type_name()
                    ))
                    .into()),
                }
            },

            Stmt::Validate(stmt) => {
                let target = self.eval_expr(&stmt.target, scope)?;
                validate_object(&target, &stmt.fields)?;
                Ok(())
            },
        }
    }

    /// Executes a block in a fresh child scope.
    fn exec_block_child(&self, block: &Block, scope: &Rc<Scope>) -> EvalResult<()> {
        let child = Scope::child(scope);
        for stmt in &block.body {
            self.exec_stmt(stmt, &child)?;
        }
        Ok(())
    }

    /// `if`/`else if`/`else`.
    ///
    /// Branch blocks open child scopes; a chained `else if` evaluates its
    /// condition in the current scope, not a fresh one.
    fn exec_if(&self, if_stmt: &IfStmt, scope: &Rc<Scope>) -> EvalResult<()> {
        let cond = self.eval_expr(&if_stmt.cond, scope)?;
        if cond.is_truthy() {
            return self.exec_block_child(&if_stmt.then_block, scope);
        }
        match if_stmt.else_clause.as_deref() {
            Some(ElseClause::Block(block)) => self.exec_block_child(block, scope),
            Some(ElseClause::If(nested)) => self.exec_if(nested, scope),
            None => Ok(()),
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn eval_expr(&self, expr: &Expr, scope: &Rc<Scope>) -> EvalResult<Value> {
        match expr {
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::String(s) => Ok(Value::String(s.clone())),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Null => Ok(Value::Null),

            Expr::Ident(name) => Ok(scope.get(name)?),

            Expr::Assign(assign) => {
                let value = self.eval_expr(&assign.value, scope)?;
                scope.assign(&assign.name, value.clone())?;
                Ok(value)
            },

            Expr::Unary(unary) => {
                let operand = self.eval_expr(&unary.expr, scope)?;
                match (unary.op, operand) {
                    (UnOp::Neg, Value::Number(n)) => Ok(Value::Number(-n)),
                    (UnOp::Neg, other) => Err(RuntimeError::type_error(format!(
                        "unary `-` requires a number, got {}",
                        other.type_name()
                    ))
                    .into()),
                }
            },

            Expr::Binary(binary) => self.eval_binary(binary, scope),

            Expr::Call(call) => self.eval_call(call, scope),

            Expr::Member(member) => self.eval_member(member, scope),

            Expr::Array(elements) => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.eval_expr(element, scope)?);
                }
                Ok(Value::array(values))
            },

            Expr::Object(entries) => {
                let mut values = Vec::with_capacity(entries.len());
                for entry in entries {
                    values.push((entry.key.clone(), self.eval_expr(&entry.value, scope)?));
                }
                Ok(Value::object(values))
            },

            Expr::Function(func) => {
                let function = FunctionValue {
                    params: func.params.clone(),
                    body: func.body.clone(),
                    scope: scope.clone(),
                };
                Ok(Value::Function(Rc::new(function)))
            },
        }
    }

    fn eval_binary(&self, binary: &BinaryExpr, scope: &Rc<Scope>) -> EvalResult<Value> {
        // `and`/`or` short-circuit; the result is the truthiness of the
        // deciding operand, as a Boolean.
        match binary.op {
            BinOp::And => {
                let left = self.eval_expr(&binary.left, scope)?;
                if !left.is_truthy() {
                    return Ok(Value::Bool(false));
                }
                let right = self.eval_expr(&binary.right, scope)?;
                return Ok(Value::Bool(right.is_truthy()));
            },
            BinOp::Or => {
                let left = self.eval_expr(&binary.left, scope)?;
                if left.is_truthy() {
                    return Ok(Value::Bool(true));
                }
                let right = self.eval_expr(&binary.right, scope)?;
                return Ok(Value::Bool(right.is_truthy()));
            },
            _ => {},
        }

        let left = self.eval_expr(&binary.left, scope)?;
        let right = self.eval_expr(&binary.right, scope)?;

        match binary.op {
            BinOp::Add => match (&left, &right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                // `+` concatenates when either side is a string.
                (Value::String(_), _) | (_, Value::String(_)) => Ok(Value::String(format!(
                    "{}{}",
                    left.stringify(),
                    right.stringify()
                ))),
                _ => Err(self.numeric_op_error(binary.op, &left, &right)),
            },

            BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod => match (&left, &right) {
                (Value::Number(a), Value::Number(b)) => {
                    let result = match binary.op {
                        BinOp::Sub => a - b,
                        BinOp::Mul => a * b,
                        BinOp::Div => a / b,
                        _ => a % b,
                    };
                    Ok(Value::Number(result))
                },
                _ => Err(self.numeric_op_error(binary.op, &left, &right)),
            },

            BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge => match (&left, &right) {
                (Value::Number(a), Value::Number(b)) => {
                    let result = match binary.op {
                        BinOp::Lt => a < b,
                        BinOp::Gt => a > b,
                        BinOp::Le => a <= b,
                        _ => a >= b,
                    };
                    Ok(Value::Bool(result))
                },
                _ => Err(self.numeric_op_error(binary.op, &left, &right)),
            },

            BinOp::Eq => Ok(Value::Bool(values_equal(&left, &right))),
            BinOp::Ne => Ok(Value::Bool(!values_equal(&left, &right))),

            BinOp::And | BinOp::Or => unreachable!("handled above"),
        }
    }

    fn numeric_op_error(&self, op: BinOp, left: &Value, right: &Value) -> Flow {
        RuntimeError::type_error(format!(
            "`{}` requires numbers, got {} and {}",
            op.symbol(),
            left.type_name(),
            right.type_name()
        ))
        .into()
    }

    fn eval_call(&self, call: &CallExpr, scope: &Rc<Scope>) -> EvalResult<Value> {
        let callee = self.eval_expr(&call.callee, scope)?;

        let mut args = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            args.push(self.eval_expr(arg, scope)?);
        }

        match callee {
            Value::Function(function) => self.call_function(&function, &args),
            Value::Native(native) => native.call(&args),
            other => Err(RuntimeError::type_error(format!(
                "value of type {} is not callable",
                other.type_name()
            ))
            .into()),
        }
    }

    /// Calls a user function: parameters bind in a fresh child of the
    /// captured scope, missing arguments default to Null, extra arguments
    /// are ignored. A `return` signal stops the body and becomes the call
    /// result; falling off the end yields Null.
    fn call_function(&self, function: &FunctionValue, args: &[Value]) -> EvalResult<Value> {
        let frame = Scope::child(&function.scope);
        for (index, param) in function.params.iter().enumerate() {
            let value = args.get(index).cloned().unwrap_or(Value::Null);
            frame.define(param, value);
        }

        for stmt in &function.body.body {
            match self.exec_stmt(stmt, &frame) {
                Ok(()) => {},
                Err(Flow::Return(value)) => return Ok(value),
                Err(other) => return Err(other),
            }
        }
        Ok(Value::Null)
    }

    fn eval_member(&self, member: &MemberExpr, scope: &Rc<Scope>) -> EvalResult<Value> {
        let object = self.eval_expr(&member.object, scope)?;
        let property = member.property.as_str();

        match object {
            Value::Object(entries) => Ok(entries
                .borrow()
                .get(property)
                .cloned()
                .unwrap_or(Value::Null)),

            Value::Array(elements) => match property {
                "length" => Ok(Value::Number(elements.borrow().len() as f64)),
                other => Err(RuntimeError::type_error(format!(
                    "no property `{}` on array",
                    other
                ))
                .into()),
            },

            Value::StateType(compiled) => Ok(machine::state_type_member(&compiled, property)?),

            Value::StateInstance(instance) => {
                Ok(machine::state_instance_member(&instance, property)?)
            },

            other => Err(RuntimeError::type_error(format!(
                "cannot access property `{}` on {}",
                property,
                other.type_name()
            ))
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    /// Compiles and runs a source program against a fresh memory host,
    /// returning the host for inspection.
    fn run_source(source: &str) -> Result<Rc<MemoryHost>, RuntimeError> {
        let program = rulang_par::Parser::new(rulang_lex::tokenize(source).unwrap())
            .parse()
            .unwrap();
        let states = rulang_sem::compile_states(&program).unwrap();
        let host = MemoryHost::new();
        let evaluator = Evaluator::new(host.clone());
        let root = Scope::root();
        evaluator.run(&program, &states, &root)?;
        Ok(host)
    }

    fn printed(source: &str) -> Vec<String> {
        run_source(source).unwrap().printed()
    }

    #[test]
    fn test_arithmetic_precedence() {
        assert_eq!(printed("let x = 2 + 3 * 4 print(x)"), vec!["14"]);
    }

    #[test]
    fn test_division_and_modulo() {
        assert_eq!(printed("print(7 / 2) print(7 % 2)"), vec!["3.5", "1"]);
    }

    #[test]
    fn test_string_concatenation() {
        assert_eq!(printed("print(\"x=\" + 3)"), vec!["x=3"]);
        assert_eq!(printed("print(1 + \"s\")"), vec!["1s"]);
    }

    #[test]
    fn test_print_compound_values() {
        assert_eq!(printed("print([1, \"a\", true])"), vec!["[1, a, true]"]);
        assert_eq!(printed("print({a: 1, b: 2})"), vec!["{a: 1, b: 2}"]);
    }

    #[test]
    fn test_shadowing() {
        let lines = printed("let x = 1 { let x = 2 print(x) } print(x)");
        assert_eq!(lines, vec!["2", "1"]);
    }

    #[test]
    fn test_assignment_updates_outer_binding() {
        let lines = printed("let x = 1 { x = 5 } print(x)");
        assert_eq!(lines, vec!["5"]);
    }

    #[test]
    fn test_assignment_expression_yields_value() {
        assert_eq!(printed("let x = 0 print(x = 3)"), vec!["3"]);
    }

    #[test]
    fn test_recursion() {
        let lines = printed(
            "fn f(n) { if (n <= 1) { return 1 } return n * f(n - 1) } print(f(5))",
        );
        assert_eq!(lines, vec!["120"]);
    }

    #[test]
    fn test_missing_args_default_to_null_and_extras_are_ignored() {
        assert_eq!(printed("fn f(a, b) { return b } print(f(1))"), vec!["null"]);
        assert_eq!(
            printed("fn f(a) { return a } print(f(1, 2, 3))"),
            vec!["1"]
        );
    }

    #[test]
    fn test_function_without_return_yields_null() {
        assert_eq!(printed("fn f() { let x = 1 } print(f())"), vec!["null"]);
    }

    #[test]
    fn test_closures_capture_defining_scope() {
        let lines = printed(
            "fn make(n) { return fn (m) { return n + m } }
             let add2 = make(2)
             print(add2(5))",
        );
        assert_eq!(lines, vec!["7"]);
    }

    #[test]
    fn test_logical_operators_return_booleans() {
        assert_eq!(
            printed("print(1 and \"s\") print(0 and 1) print(null or 3) print(0 or \"\")"),
            vec!["true", "false", "true", "false"]
        );
    }

    #[test]
    fn test_short_circuit_skips_right_operand() {
        // The right operand would fail with a name error if evaluated.
        assert_eq!(printed("print(0 and ghost)"), vec!["false"]);
        assert_eq!(printed("print(1 or ghost)"), vec!["true"]);
    }

    #[test]
    fn test_if_else_chain() {
        let lines = printed(
            "fn grade(n) {
                 if n >= 90 { return \"A\" } else if n >= 80 { return \"B\" } else { return \"C\" }
             }
             print(grade(95)) print(grade(85)) print(grade(10))",
        );
        assert_eq!(lines, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_equality_semantics() {
        assert_eq!(
            printed("print(null == null) print(1 == \"1\") print([1] == [1])"),
            vec!["true", "false", "false"]
        );
    }

    #[test]
    fn test_object_member_access() {
        assert_eq!(
            printed("let o = {a: {b: 2}} print(o.a.b) print(o.missing)"),
            vec!["2", "null"]
        );
    }

    #[test]
    fn test_array_length() {
        assert_eq!(printed("print([1, 2, 3].length)"), vec!["3"]);
    }

    #[test]
    fn test_array_unknown_property_fails() {
        let err = run_source("[1].push").unwrap_err();
        assert!(matches!(err, RuntimeError::Type(_)));
    }

    #[test]
    fn test_calling_non_function_fails() {
        let err = run_source("let x = 1 x()").unwrap_err();
        assert_eq!(
            err,
            RuntimeError::Type("value of type number is not callable".to_string())
        );
    }

    #[test]
    fn test_undefined_name_fails() {
        let err = run_source("print(ghost)").unwrap_err();
        assert_eq!(err, RuntimeError::Name("ghost".to_string()));
    }

    #[test]
    fn test_arithmetic_type_errors() {
        assert!(matches!(
            run_source("\"a\" - 1").unwrap_err(),
            RuntimeError::Type(_)
        ));
        assert!(matches!(
            run_source("-\"a\"").unwrap_err(),
            RuntimeError::Type(_)
        ));
        assert!(matches!(
            run_source("1 < \"2\"").unwrap_err(),
            RuntimeError::Type(_)
        ));
    }

    #[test]
    fn test_return_at_top_level_fails() {
        let err = run_source("return 1").unwrap_err();
        assert!(matches!(err, RuntimeError::Type(_)));
    }

    // =========================================================================
    // State machines, end to end
    // =========================================================================

    const ORDER: &str = "state Order { CREATED PAID SHIPPED }
         transition Order {
             CREATED -> PAID when pay
             PAID -> SHIPPED when ship
         } ";

    #[test]
    fn test_new_instance_starts_at_initial_state() {
        let lines = printed(&format!("{} let o = Order.new() print(o.state)", ORDER));
        assert_eq!(lines, vec!["CREATED"]);
    }

    #[test]
    fn test_apply_and_history() {
        let lines = printed(&format!(
            "{} let o = Order.new() o.apply(\"pay\") print(o.state) print(o.history)",
            ORDER
        ));
        assert_eq!(lines, vec!["PAID", "[CREATED, PAID]"]);
    }

    #[test]
    fn test_apply_unregistered_event_fails() {
        let err = run_source(&format!(
            "{} let o = Order.new() o.apply(\"ship\") o.apply(\"ship\")",
            ORDER
        ))
        .unwrap_err();
        assert_eq!(
            err,
            RuntimeError::Transition("Cannot apply ship in state CREATED".to_string())
        );
    }

    #[test]
    fn test_rollback_sequence() {
        let lines = printed(&format!(
            "{} let o = Order.new()
             o.apply(\"pay\") o.apply(\"ship\")
             print(o.rollback()) print(o.state)
             print(o.rollback()) print(o.state)",
            ORDER
        ));
        assert_eq!(lines, vec!["PAID", "PAID", "CREATED", "CREATED"]);
    }

    #[test]
    fn test_rollback_past_initial_fails() {
        let err = run_source(&format!("{} let o = Order.new() o.rollback()", ORDER)).unwrap_err();
        assert_eq!(
            err,
            RuntimeError::Transition("no previous state".to_string())
        );
    }

    #[test]
    fn test_dotted_event_error_message() {
        let err = run_source(
            "state Order { CREATED PAID SHIPPED }
             transition Order {
                 CREATED -> PAID when payment.success
                 PAID -> SHIPPED when delivery.pickup
             }
             let o = Order.new()
             o.apply(\"delivery.pickup\")",
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("delivery.pickup"));
        assert!(message.contains("CREATED"));
    }

    #[test]
    fn test_instances_alias() {
        let lines = printed(&format!(
            "{} let a = Order.new() let b = a a.apply(\"pay\") print(b.state)",
            ORDER
        ));
        assert_eq!(lines, vec!["PAID"]);
    }

    #[test]
    fn test_stringify_machine_values() {
        let lines = printed(&format!(
            "{} print(Order) let o = Order.new() print(o)",
            ORDER
        ));
        assert_eq!(lines, vec!["<state-type Order>", "<Order: CREATED>"]);
    }

    // =========================================================================
    // Validation in the language
    // =========================================================================

    #[test]
    fn test_validate_passes_silently() {
        let lines = printed(
            "let body = {name: \"A\", age: 1}
             validate body { name: string, age: optional number }
             print(\"ok\")",
        );
        assert_eq!(lines, vec!["ok"]);
    }

    #[test]
    fn test_validate_failure_carries_dotted_path() {
        let err = run_source(
            "let body = {name: 1}
             validate body { name: string }",
        )
        .unwrap_err();
        assert_eq!(
            err,
            RuntimeError::Validation {
                path: "name".to_string(),
                expected: "string".to_string(),
                actual: "number".to_string(),
            }
        );
    }

    // =========================================================================
    // Host registration
    // =========================================================================

    #[test]
    fn test_endpoint_and_server_registration() {
        let host = run_source(
            "endpoint GET \"/h\" { res.json({m: \"hi\"}) }
             server 3000",
        )
        .unwrap();

        let endpoints = host.endpoints.borrow();
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].method, HttpMethod::Get);
        assert_eq!(endpoints[0].path, "/h");
        assert!(endpoints[0].middlewares.is_empty());

        assert_eq!(*host.ports.borrow(), vec![3000.0]);
    }

    #[test]
    fn test_middleware_and_use_registration() {
        let host = run_source(
            "middleware auth { next() }
             use auth
             endpoint GET \"/x\" use [auth] { }",
        )
        .unwrap();

        assert_eq!(host.middlewares.borrow().len(), 1);
        assert_eq!(*host.use_order.borrow(), vec!["auth"]);
        assert_eq!(host.endpoints.borrow()[0].middlewares, vec!["auth"]);
    }

    #[test]
    fn test_server_port_must_be_numeric() {
        let err = run_source("server \"3000\"").unwrap_err();
        assert!(matches!(err, RuntimeError::Type(_)));
    }

    // =========================================================================
    // Handler block execution for the host driver
    // =========================================================================

    #[test]
    fn test_exec_block_in_surfaces_signals() {
        let program = rulang_par::Parser::new(
            rulang_lex::tokenize("middleware m { if skip { return } next() }").unwrap(),
        )
        .parse()
        .unwrap();
        let states = rulang_sem::compile_states(&program).unwrap();
        let host = MemoryHost::new();
        let evaluator = Evaluator::new(host.clone());
        let root = Scope::root();
        evaluator.run(&program, &states, &root).unwrap();

        let body = host.middlewares.borrow()[0].1.clone();

        let scope = Scope::child(&root);
        scope.define("skip", Value::Bool(false));
        scope.define("next", crate::host::next_native());
        let outcome = evaluator.exec_block_in(&body, &scope).unwrap();
        assert!(matches!(outcome, Outcome::Next));

        let scope = Scope::child(&root);
        scope.define("skip", Value::Bool(true));
        scope.define("next", crate::host::next_native());
        let outcome = evaluator.exec_block_in(&body, &scope).unwrap();
        assert!(matches!(outcome, Outcome::Returned(Value::Null)));
    }

    #[test]
    fn test_exec_block_in_completes_normally() {
        let program = rulang_par::Parser::new(rulang_lex::tokenize("middleware m { let x = 1 }").unwrap())
            .parse()
            .unwrap();
        let host = MemoryHost::new();
        let evaluator = Evaluator::new(host.clone());
        let root = Scope::root();
        evaluator
            .run(&program, &rulang_sem::StateTable::new(), &root)
            .unwrap();

        let body = host.middlewares.borrow()[0].1.clone();
        let scope = Scope::child(&root);
        let outcome = evaluator.exec_block_in(&body, &scope).unwrap();
        assert!(matches!(outcome, Outcome::Completed));
    }
}
