use std::collections::HashMap;
use std::cell::RefCell;
use std::rc::Rc;

use crate::class::{self, Class};
use crate::environment::Environment;
use crate::error::{RuntimeError, Signal};
use crate::expr::{self, Expr, ExprVisitor};
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::{Stmt, StmtVisitor};
use crate::token::{Token, Type};

/// Walks the resolved AST and executes it against a chain of environments.
///
/// `locals` is the resolver's output: for every variable/`this`/`super` reference, how many
/// enclosing scopes separate it from the scope that declares it. It is keyed by the address of
/// the `Expr` node itself rather than by the node's contents, since two syntactically identical
/// references in different places must never collide (see the resolver for why).
pub struct Interpreter {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<*const Expr, usize>,
}

impl Interpreter {
    pub fn new() -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));

        for native in NativeFunction::globals() {
            globals.borrow_mut().define(native.name, Object::from(native));
        }

        Interpreter {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
        }
    }

    /// Records the scope distance the resolver computed for `expr`. Called once per
    /// variable/`this`/`super` reference, before the interpreter ever evaluates it.
    pub fn resolve(&mut self, expr: &Expr, depth: usize) {
        self.locals.insert(expr as *const Expr, depth);
    }

    /// Drops every recorded scope distance. Each REPL line is scanned/parsed/resolved into a
    /// fresh AST, so a stale entry keyed by a previous line's (by-then-dropped) `Expr` address
    /// could alias a new node allocated at the same address and return the wrong scope depth.
    /// Must be called before resolving each new chunk of source against a persistent interpreter.
    pub fn clear_locals(&mut self) {
        self.locals.clear();
    }

    /// Executes a whole program, stopping at the first runtime error.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for statement in statements {
            self.execute(statement)?;
        }

        Ok(())
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<Signal, RuntimeError> {
        stmt.accept(self)
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        expr.accept(self)
    }

    /// Executes `statements` in a fresh scope enclosed by `environment`, restoring the
    /// interpreter's previous environment on the way out (including when a statement errors or
    /// returns), and stopping early on the first `Signal::Return` or error.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> Result<Signal, RuntimeError> {
        let previous = std::mem::replace(&mut self.environment, environment);

        let mut result = Ok(Signal::Normal);
        for statement in statements {
            match self.execute(statement) {
                Ok(Signal::Normal) => continue,
                other => {
                    result = other;
                    break;
                }
            }
        }

        self.environment = previous;
        result
    }

    /// Looks up the value bound to `name` for the reference `expr`: through `getAt` at the
    /// resolver's recorded depth if one was recorded, otherwise directly in globals.
    fn look_up_variable(&self, name: &Token, expr: &Expr) -> Result<Object, RuntimeError> {
        match self.locals.get(&(expr as *const Expr)) {
            Some(distance) => self.environment.borrow().get_at(*distance, name),
            None => self.globals.borrow().get(name),
        }
    }

    fn is_equal(left: &Object, right: &Object) -> bool {
        left == right
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl ExprVisitor<Result<Object, RuntimeError>> for Interpreter {
    fn visit_literal_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Literal(literal) = expr else { unreachable!() };

        Ok(Object::from(literal.clone()))
    }

    fn visit_grouping_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Grouping(grouping) = expr else { unreachable!() };

        self.evaluate(&grouping.expr)
    }

    fn visit_unary_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Unary(unary) = expr else { unreachable!() };

        let right = self.evaluate(&unary.expr)?;

        match unary.operator.r#type {
            Type::Minus => match right {
                Object::Literal(Literal::Number(n)) => Ok(Object::from(-n)),
                _ => Err(RuntimeError {
                    token: unary.operator.clone(),
                    message: "Operand must be a number.".to_string(),
                }),
            },
            Type::Bang => Ok(Object::from(!right.is_truthy())),
            _ => unreachable!(),
        }
    }

    fn visit_binary_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Binary(binary) = expr else { unreachable!() };

        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;

        let as_numbers = |l: &Object, r: &Object| -> Option<(f64, f64)> {
            match (l, r) {
                (Object::Literal(Literal::Number(l)), Object::Literal(Literal::Number(r))) => Some((*l, *r)),
                _ => None,
            }
        };

        match binary.operator.r#type {
            Type::Plus => match (&left, &right) {
                (Object::Literal(Literal::Number(l)), Object::Literal(Literal::Number(r))) => Ok(Object::from(l + r)),
                (Object::Literal(Literal::String(l)), Object::Literal(Literal::String(r))) => {
                    Ok(Object::from(format!("{l}{r}")))
                },
                _ => Err(RuntimeError {
                    token: binary.operator.clone(),
                    message: "Operands must be two numbers or two strings.".to_string(),
                }),
            },
            Type::Minus => as_numbers(&left, &right)
                .map(|(l, r)| Object::from(l - r))
                .ok_or_else(|| RuntimeError {
                    token: binary.operator.clone(),
                    message: "Operands must be numbers.".to_string(),
                }),
            Type::Star => as_numbers(&left, &right)
                .map(|(l, r)| Object::from(l * r))
                .ok_or_else(|| RuntimeError {
                    token: binary.operator.clone(),
                    message: "Operands must be numbers.".to_string(),
                }),
            Type::Slash => {
                let (l, r) = as_numbers(&left, &right).ok_or_else(|| RuntimeError {
                    token: binary.operator.clone(),
                    message: "Operands must be numbers.".to_string(),
                })?;

                if r == 0.0 {
                    return Err(RuntimeError {
                        token: binary.operator.clone(),
                        message: "Cannot divide by zero.".to_string(),
                    });
                }

                Ok(Object::from(l / r))
            },
            Type::Greater => as_numbers(&left, &right)
                .map(|(l, r)| Object::from(l > r))
                .ok_or_else(|| RuntimeError {
                    token: binary.operator.clone(),
                    message: "Operands must be numbers.".to_string(),
                }),
            Type::GreaterEqual => as_numbers(&left, &right)
                .map(|(l, r)| Object::from(l >= r))
                .ok_or_else(|| RuntimeError {
                    token: binary.operator.clone(),
                    message: "Operands must be numbers.".to_string(),
                }),
            Type::Less => as_numbers(&left, &right)
                .map(|(l, r)| Object::from(l < r))
                .ok_or_else(|| RuntimeError {
                    token: binary.operator.clone(),
                    message: "Operands must be numbers.".to_string(),
                }),
            Type::LessEqual => as_numbers(&left, &right)
                .map(|(l, r)| Object::from(l <= r))
                .ok_or_else(|| RuntimeError {
                    token: binary.operator.clone(),
                    message: "Operands must be numbers.".to_string(),
                }),
            Type::BangEqual => Ok(Object::from(!Self::is_equal(&left, &right))),
            Type::EqualEqual => Ok(Object::from(Self::is_equal(&left, &right))),
            _ => unreachable!(),
        }
    }

    fn visit_logical_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Logical(logical) = expr else { unreachable!() };

        let left = self.evaluate(&logical.left)?;

        match logical.operator.r#type {
            Type::Or if left.is_truthy() => Ok(left),
            Type::Or => self.evaluate(&logical.right),
            Type::And if !left.is_truthy() => Ok(left),
            Type::And => self.evaluate(&logical.right),
            _ => unreachable!(),
        }
    }

    fn visit_variable_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Variable(variable) = expr else { unreachable!() };

        self.look_up_variable(&variable.name, expr)
    }

    fn visit_assign_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Assign(assign) = expr else { unreachable!() };

        let value = self.evaluate(&assign.value)?;

        match self.locals.get(&(expr as *const Expr)) {
            Some(distance) => self.environment.borrow_mut().assign_at(*distance, &assign.name, value.clone()),
            None => self.globals.borrow_mut().assign(&assign.name, value.clone())?,
        }

        Ok(value)
    }

    fn visit_call_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Call(call) = expr else { unreachable!() };

        let callee = self.evaluate(&call.callee)?;

        let mut arguments = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        let arity = match &callee {
            Object::Function(f) => f.arity(),
            Object::NativeFunction(f) => f.arity(),
            Object::Class(class) => class.arity(),
            _ => return Err(RuntimeError {
                token: call.paren.clone(),
                message: "Can only call functions and classes.".to_string(),
            }),
        };

        if arguments.len() != arity {
            return Err(RuntimeError {
                token: call.paren.clone(),
                message: format!("Expected {arity} arguments but got {}.", arguments.len()),
            });
        }

        match callee {
            Object::Function(f) => f.call(self, arguments),
            Object::NativeFunction(f) => f.call(self, arguments),
            Object::Class(class) => class::instantiate(&class, self, arguments),
            _ => unreachable!(),
        }
    }

    fn visit_get_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Get(get) = expr else { unreachable!() };

        let object = self.evaluate(&get.object)?;

        match &object {
            Object::Instance(instance) => instance.borrow().get(&get.name, &object),
            _ => Err(RuntimeError {
                token: get.name.clone(),
                message: "Only instances have properties.".to_string(),
            }),
        }
    }

    fn visit_set_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Set(set) = expr else { unreachable!() };

        let object = self.evaluate(&set.object)?;

        let Object::Instance(instance) = object else {
            return Err(RuntimeError {
                token: set.name.clone(),
                message: "Only instances have fields.".to_string(),
            });
        };

        let value = self.evaluate(&set.value)?;
        instance.borrow_mut().set(&set.name, value.clone());

        Ok(value)
    }

    fn visit_this_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::This(this) = expr else { unreachable!() };

        self.look_up_variable(&this.keyword, expr)
    }

    fn visit_super_expr(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        let Expr::Super(super_expr) = expr else { unreachable!() };

        let distance = *self.locals.get(&(expr as *const Expr))
            .expect("resolver to have recorded a depth for every 'super' reference");

        let superclass = self.environment.borrow().get_at(distance, &Token::from("super"))?;
        let Object::Class(superclass) = superclass else {
            unreachable!("resolver guarantees 'super' is bound to a class");
        };

        let instance = self.environment.borrow().get_at(distance - 1, &Token::from("this"))?;

        let method = superclass.find_method(&super_expr.method.lexeme).ok_or_else(|| RuntimeError {
            token: super_expr.method.clone(),
            message: format!("Undefined property '{}'.", super_expr.method.lexeme),
        })?;

        Ok(Object::from(method.bind(instance)))
    }
}

impl StmtVisitor<Result<Signal, RuntimeError>> for Interpreter {
    fn visit_expression_stmt(&mut self, stmt: &Stmt) -> Result<Signal, RuntimeError> {
        let Stmt::Expression(data) = stmt else { unreachable!() };

        self.evaluate(&data.expr)?;
        Ok(Signal::Normal)
    }

    fn visit_print_stmt(&mut self, stmt: &Stmt) -> Result<Signal, RuntimeError> {
        let Stmt::Print(data) = stmt else { unreachable!() };

        let value = self.evaluate(&data.expr)?;
        println!("{value}");

        Ok(Signal::Normal)
    }

    fn visit_var_stmt(&mut self, stmt: &Stmt) -> Result<Signal, RuntimeError> {
        let Stmt::Var(data) = stmt else { unreachable!() };

        let value = match &data.initializer {
            Some(initializer) => self.evaluate(initializer)?,
            None => Object::from(Literal::Nil),
        };

        self.environment.borrow_mut().define(&data.name.lexeme, value);

        Ok(Signal::Normal)
    }

    fn visit_block_stmt(&mut self, stmt: &Stmt) -> Result<Signal, RuntimeError> {
        let Stmt::Block(data) = stmt else { unreachable!() };

        let environment = Environment::new(Some(Rc::clone(&self.environment)));
        self.execute_block(&data.statements, Rc::new(RefCell::new(environment)))
    }

    fn visit_if_stmt(&mut self, stmt: &Stmt) -> Result<Signal, RuntimeError> {
        let Stmt::If(data) = stmt else { unreachable!() };

        if self.evaluate(&data.condition)?.is_truthy() {
            self.execute(&data.then_branch)
        } else if let Some(else_branch) = &data.else_branch {
            self.execute(else_branch)
        } else {
            Ok(Signal::Normal)
        }
    }

    fn visit_while_stmt(&mut self, stmt: &Stmt) -> Result<Signal, RuntimeError> {
        let Stmt::While(data) = stmt else { unreachable!() };

        while self.evaluate(&data.condition)?.is_truthy() {
            match self.execute(&data.body)? {
                Signal::Normal => continue,
                signal @ Signal::Return(_) => return Ok(signal),
            }
        }

        Ok(Signal::Normal)
    }

    fn visit_function_stmt(&mut self, stmt: &Stmt) -> Result<Signal, RuntimeError> {
        let Stmt::Function(data) = stmt else { unreachable!() };

        let function = Function::new(data.clone(), Rc::clone(&self.environment), false);
        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(function));

        Ok(Signal::Normal)
    }

    fn visit_return_stmt(&mut self, stmt: &Stmt) -> Result<Signal, RuntimeError> {
        let Stmt::Return(data) = stmt else { unreachable!() };

        let value = match &data.value {
            Some(value) => self.evaluate(value)?,
            None => Object::from(Literal::Nil),
        };

        Ok(Signal::Return(value))
    }

    fn visit_class_stmt(&mut self, stmt: &Stmt) -> Result<Signal, RuntimeError> {
        let Stmt::Class(data) = stmt else { unreachable!() };

        let superclass = match &data.superclass {
            Some(superclass_expr) => {
                let value = self.evaluate(superclass_expr)?;
                let Object::Class(class) = value else {
                    let Expr::Variable(variable) = superclass_expr else { unreachable!() };
                    return Err(RuntimeError {
                        token: variable.name.clone(),
                        message: "Superclass must be a class.".to_string(),
                    });
                };
                Some(class)
            },
            None => None,
        };

        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(Literal::Nil));

        let methods_closure = match &superclass {
            Some(superclass) => {
                let mut environment = Environment::new(Some(Rc::clone(&self.environment)));
                environment.define("super", Object::from(Rc::clone(superclass)));
                Rc::new(RefCell::new(environment))
            },
            None => Rc::clone(&self.environment),
        };

        let mut methods = HashMap::new();
        for method in &data.methods {
            let Stmt::Function(method_data) = method else { unreachable!() };

            let is_initializer = method_data.name.lexeme == "init";
            let function = Function::new(method_data.clone(), Rc::clone(&methods_closure), is_initializer);
            methods.insert(method_data.name.lexeme.clone(), function);
        }

        let class = Rc::new(Class::new(data.name.lexeme.clone(), superclass, methods));

        self.environment.borrow_mut().assign(&data.name, Object::from(class))?;

        Ok(Signal::Normal)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::token::Location;

    fn token(r#type: Type, lexeme: &str) -> Token {
        Token::new(r#type, lexeme.to_string(), None, Location::new(1, 1))
    }

    #[test]
    fn evaluate_literal() {
        let mut interpreter = Interpreter::new();
        let expr = Expr::Literal(Literal::Number(12.0));
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(12.0));
    }

    #[test]
    fn evaluate_unary_negate() {
        let mut interpreter = Interpreter::new();
        let expr = Expr::Unary(expr::UnaryData {
            operator: token(Type::Minus, "-"),
            expr: Box::new(Expr::Literal(Literal::Number(12.0))),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(-12.0));
    }

    #[test]
    fn evaluate_binary_arithmetic() {
        let mut interpreter = Interpreter::new();
        let expr = Expr::Binary(expr::BinaryData {
            left: Box::new(Expr::Literal(Literal::Number(6.0))),
            operator: token(Type::Minus, "-"),
            right: Box::new(Expr::Literal(Literal::Number(4.0))),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(2.0));
    }

    #[test]
    fn evaluate_string_concatenation() {
        let mut interpreter = Interpreter::new();
        let expr = Expr::Binary(expr::BinaryData {
            left: Box::new(Expr::Literal(Literal::String("Hello".to_string()))),
            operator: token(Type::Plus, "+"),
            right: Box::new(Expr::Literal(Literal::String("World".to_string()))),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from("HelloWorld"));
    }

    #[test]
    fn string_plus_number_is_a_runtime_error() {
        let mut interpreter = Interpreter::new();
        let expr = Expr::Binary(expr::BinaryData {
            left: Box::new(Expr::Literal(Literal::String("Hello".to_string()))),
            operator: token(Type::Plus, "+"),
            right: Box::new(Expr::Literal(Literal::Number(12.0))),
        });
        assert!(interpreter.evaluate(&expr).is_err());
    }

    #[test]
    fn division_by_zero_is_a_runtime_error() {
        let mut interpreter = Interpreter::new();
        let expr = Expr::Binary(expr::BinaryData {
            left: Box::new(Expr::Literal(Literal::Number(1.0))),
            operator: token(Type::Slash, "/"),
            right: Box::new(Expr::Literal(Literal::Number(0.0))),
        });
        let error = interpreter.evaluate(&expr).unwrap_err();
        assert_eq!(error.message, "Cannot divide by zero.");
    }

    #[test]
    fn logical_or_returns_the_truthy_operand_unchanged() {
        let mut interpreter = Interpreter::new();
        let expr = Expr::Logical(expr::LogicalData {
            left: Box::new(Expr::Literal(Literal::Nil)),
            operator: token(Type::Or, "or"),
            right: Box::new(Expr::Literal(Literal::String("x".to_string()))),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from("x"));
    }

    #[test]
    fn logical_and_short_circuits_without_evaluating_the_right_operand() {
        let mut interpreter = Interpreter::new();
        let expr = Expr::Logical(expr::LogicalData {
            left: Box::new(Expr::Literal(Literal::Bool(false))),
            operator: token(Type::And, "and"),
            right: Box::new(Expr::Variable(expr::VariableData { name: token(Type::Identifier, "bomb") })),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(false));
    }

    #[test]
    fn equality_is_reflexive_for_numbers() {
        let mut interpreter = Interpreter::new();
        let expr = Expr::Binary(expr::BinaryData {
            left: Box::new(Expr::Literal(Literal::Number(12.0))),
            operator: token(Type::EqualEqual, "=="),
            right: Box::new(Expr::Literal(Literal::Number(12.0))),
        });
        assert_eq!(interpreter.evaluate(&expr).unwrap(), Object::from(true));
    }
}
