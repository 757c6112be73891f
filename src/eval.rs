//! Tree-walking evaluation of Pym programs.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::io;
use std::io::prelude::*;
use std::rc::Rc;

use crate::ast::{CmpOp, Expr, Stmt};
use crate::ctx::{Context, WellKnown};
use crate::interner::Symbol;
use crate::runtime::{Class, ClassInstance, Closure, ObjectHolder, Value};

/// Walks the AST, writing program output to `output`.
///
/// A statement or expression evaluates to an [`ObjectHolder`]; statements
/// that produce nothing yield the empty holder.  Method calls run their body
/// in a fresh closure holding only `self` and the formal parameters, so a
/// method never sees its caller's scope.
#[derive(Debug)]
pub struct Evaluator<'t, W: Write> {
    output: &'t mut W,
    names: WellKnown,

    // Every class ever defined in this session, by name.  Class names resolve
    // here when the current closure has no binding for them, which is what
    // lets a method body instantiate classes despite its sealed scope.
    classes: HashMap<Symbol, Rc<Class>>,

    // Set by `return`, cleared at the method-body boundary.  While it is set,
    // statement execution unwinds without doing anything.
    pending_return: Option<ObjectHolder>,
}

#[derive(Debug)]
pub enum RuntimeError {
    UnknownVariable(String),
    NotAnInstance,
    NotAClass(String),
    UnknownMethod(String, String),
    BadOperands(&'static str),
    DivisionByZero,
    NoViableEqual,
    NoViableLess,
    ComparisonNotBool,
    ReturnOutsideMethod,
    Io(io::Error),
}

impl Error for RuntimeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RuntimeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::UnknownVariable(name) => write!(f, "variable {} not found", name),
            RuntimeError::NotAnInstance => write!(f, "not a class instance"),
            RuntimeError::NotAClass(name) => write!(f, "{} is not a class", name),
            RuntimeError::UnknownMethod(method, class) => {
                write!(f, "no implementation of {} in {}", method, class)
            }
            RuntimeError::BadOperands(op) => write!(f, "cannot {} arguments", op),
            RuntimeError::DivisionByZero => write!(f, "division by zero"),
            RuntimeError::NoViableEqual => write!(f, "no viable equal operator"),
            RuntimeError::NoViableLess => write!(f, "no viable comparator"),
            RuntimeError::ComparisonNotBool => {
                write!(f, "comparison method must return True or False")
            }
            RuntimeError::ReturnOutsideMethod => write!(f, "return outside of a method"),
            RuntimeError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl From<io::Error> for RuntimeError {
    fn from(e: io::Error) -> RuntimeError {
        RuntimeError::Io(e)
    }
}

impl<'a, W: Write> Evaluator<'a, W> {
    pub fn new(output: &'a mut W, ctx: Rc<Context>) -> Evaluator<'a, W> {
        Evaluator {
            output,
            names: ctx.names().clone(),
            classes: HashMap::new(),
            pending_return: None,
        }
    }

    /// Run a parsed program against `closure`, the session's global scope.
    pub fn run(&mut self, stmts: &[Stmt], closure: &mut Closure) -> Result<(), RuntimeError> {
        for stmt in stmts {
            self.eval_stmt(stmt, closure)?;
        }
        if self.pending_return.take().is_some() {
            return Err(RuntimeError::ReturnOutsideMethod);
        }
        Ok(())
    }

    fn eval_stmt(&mut self, stmt: &Stmt, closure: &mut Closure) -> Result<ObjectHolder, RuntimeError> {
        // A pending return unwinds through every statement up to the
        // enclosing method body.
        if self.pending_return.is_some() {
            return Ok(ObjectHolder::none());
        }

        match stmt {
            Stmt::Assign(var, rv) => {
                let value = self.eval_expr(rv, closure)?;
                closure.insert(var.clone(), value.clone());
                Ok(value)
            }
            Stmt::FieldAssign(object, field, rv) => {
                let target = self.resolve_var(object, closure)?;
                match target.as_instance() {
                    Some(instance) => {
                        let instance = instance.clone();
                        let value = self.eval_expr(rv, closure)?;
                        instance.fields_mut().insert(field.clone(), value.clone());
                        Ok(value)
                    }
                    // Writing a field of a non-instance assigns nothing.
                    None => Ok(ObjectHolder::none()),
                }
            }
            Stmt::Expr(e) => self.eval_expr(e, closure),
            Stmt::Print(args) => self.eval_print(args, closure),
            Stmt::ClassDef(name, parent, methods) => {
                let parent = match parent {
                    Some(parent_name) => Some(self.lookup_class(parent_name, closure)?),
                    None => None,
                };
                let class = Class::new(name.clone(), methods.clone(), parent);
                self.classes.insert(name.clone(), class.clone());
                closure.insert(name.clone(), ObjectHolder::own(Value::Class(class)));
                Ok(ObjectHolder::none())
            }
            Stmt::If(cond, then_body, else_body) => {
                if self.eval_expr(cond, closure)?.is_truthy() {
                    self.eval_stmt(then_body, closure)
                } else if let Some(else_body) = else_body {
                    self.eval_stmt(else_body, closure)
                } else {
                    Ok(ObjectHolder::none())
                }
            }
            Stmt::Compound(stmts) => {
                for stmt in stmts {
                    self.eval_stmt(stmt, closure)?;
                }
                Ok(ObjectHolder::none())
            }
            Stmt::Return(e) => {
                debug_assert!(self.pending_return.is_none());
                let value = self.eval_expr(e, closure)?;
                self.pending_return = Some(value);
                Ok(ObjectHolder::none())
            }
        }
    }

    fn eval_expr(&mut self, expr: &Expr, closure: &mut Closure) -> Result<ObjectHolder, RuntimeError> {
        match expr {
            Expr::None => Ok(ObjectHolder::none()),
            Expr::Number(n) => Ok(ObjectHolder::own(Value::Number(*n))),
            Expr::Str(s) => Ok(ObjectHolder::own(Value::Str(s.clone()))),
            Expr::Bool(b) => Ok(ObjectHolder::own(Value::Bool(*b))),
            Expr::Var(dotted) => self.resolve_var(dotted, closure),
            Expr::Stringify(arg) => {
                let value = self.eval_expr(arg, closure)?;
                let mut buf = String::new();
                self.append_value(&mut buf, &value)?;
                Ok(ObjectHolder::own(Value::Str(buf)))
            }
            Expr::Add(lhs, rhs) => {
                let l = self.eval_expr(lhs, closure)?;
                let r = self.eval_expr(rhs, closure)?;
                if let (Some(l), Some(r)) = (l.as_number(), r.as_number()) {
                    return Ok(ObjectHolder::own(Value::Number(l + r)));
                }
                if let (Some(l), Some(r)) = (l.as_str(), r.as_str()) {
                    return Ok(ObjectHolder::own(Value::Str([l, r].concat())));
                }
                if let Some(instance) = l.as_instance() {
                    if instance.class().has_method(&self.names.add, 1) {
                        let instance = instance.clone();
                        let add = self.names.add.clone();
                        return self.call_method(&instance, &add, vec![r]);
                    }
                }
                Err(RuntimeError::BadOperands("add"))
            }
            Expr::Sub(lhs, rhs) => {
                let l = self.eval_expr(lhs, closure)?;
                let r = self.eval_expr(rhs, closure)?;
                match (l.as_number(), r.as_number()) {
                    (Some(l), Some(r)) => Ok(ObjectHolder::own(Value::Number(l - r))),
                    _ => Err(RuntimeError::BadOperands("subtract")),
                }
            }
            Expr::Mul(lhs, rhs) => {
                let l = self.eval_expr(lhs, closure)?;
                let r = self.eval_expr(rhs, closure)?;
                match (l.as_number(), r.as_number()) {
                    (Some(l), Some(r)) => Ok(ObjectHolder::own(Value::Number(l * r))),
                    _ => Err(RuntimeError::BadOperands("multiply")),
                }
            }
            Expr::Div(lhs, rhs) => {
                let l = self.eval_expr(lhs, closure)?;
                let r = self.eval_expr(rhs, closure)?;
                match (l.as_number(), r.as_number()) {
                    (Some(_), Some(0)) => Err(RuntimeError::DivisionByZero),
                    (Some(l), Some(r)) => Ok(ObjectHolder::own(Value::Number(l / r))),
                    _ => Err(RuntimeError::BadOperands("divide")),
                }
            }
            Expr::Compare(op, lhs, rhs) => {
                let l = self.eval_expr(lhs, closure)?;
                let r = self.eval_expr(rhs, closure)?;
                let outcome = match op {
                    CmpOp::Eq => self.equal(&l, &r)?,
                    CmpOp::NotEq => !self.equal(&l, &r)?,
                    CmpOp::Less => self.less(&l, &r)?,
                    CmpOp::GreaterOrEq => !self.less(&l, &r)?,
                    CmpOp::LessOrEq => self.less(&l, &r)? || self.equal(&l, &r)?,
                    CmpOp::Greater => !self.less(&l, &r)? && !self.equal(&l, &r)?,
                };
                Ok(ObjectHolder::own(Value::Bool(outcome)))
            }
            Expr::Or(lhs, rhs) => {
                let outcome = if self.eval_expr(lhs, closure)?.is_truthy() {
                    true
                } else {
                    self.eval_expr(rhs, closure)?.is_truthy()
                };
                Ok(ObjectHolder::own(Value::Bool(outcome)))
            }
            Expr::And(lhs, rhs) => {
                let outcome = if self.eval_expr(lhs, closure)?.is_truthy() {
                    self.eval_expr(rhs, closure)?.is_truthy()
                } else {
                    false
                };
                Ok(ObjectHolder::own(Value::Bool(outcome)))
            }
            Expr::Not(arg) => {
                let value = self.eval_expr(arg, closure)?;
                Ok(ObjectHolder::own(Value::Bool(!value.is_truthy())))
            }
            Expr::MethodCall(object, method, args) => {
                let target = self.eval_expr(object, closure)?;
                let instance = match target.as_instance() {
                    Some(instance) => instance.clone(),
                    None => return Err(RuntimeError::NotAnInstance),
                };
                if !instance.class().has_method(method, args.len()) {
                    return Err(RuntimeError::UnknownMethod(
                        method.name().to_string(),
                        instance.class().name().name().to_string(),
                    ));
                }
                let args = self.eval_args(args, closure)?;
                self.call_method(&instance, method, args)
            }
            Expr::NewInstance(name, args) => {
                let class = self.lookup_class(name, closure)?;
                let instance = Rc::new(ClassInstance::new(class.clone()));
                // Without a matching __init__ the instance starts out with no
                // fields and the arguments are never evaluated.
                if class.has_method(&self.names.init, args.len()) {
                    let args = self.eval_args(args, closure)?;
                    let init = self.names.init.clone();
                    self.call_method(&instance, &init, args)?;
                }
                Ok(ObjectHolder::own(Value::Instance(instance)))
            }
        }
    }

    /// Resolve a dotted chain `id1.id2. ... .idN` starting from `closure` and
    /// descending through instance fields.
    fn resolve_var(&self, dotted: &[Symbol], closure: &Closure) -> Result<ObjectHolder, RuntimeError> {
        let mut holder: Option<ObjectHolder> = None;
        for id in dotted {
            let scope_value = match &holder {
                None => closure.get(id).cloned(),
                Some(h) => match h.as_instance() {
                    Some(instance) => instance.fields().get(id).cloned(),
                    None => return Err(RuntimeError::NotAnInstance),
                },
            };
            holder = Some(scope_value.ok_or_else(|| {
                RuntimeError::UnknownVariable(id.name().to_string())
            })?);
        }
        Ok(holder.expect("dotted chain is never empty"))
    }

    /// Resolve a class name: a closure binding wins (so a local rebinding
    /// shadows the class), the session registry is the fallback.
    fn lookup_class(&self, name: &Symbol, closure: &Closure) -> Result<Rc<Class>, RuntimeError> {
        match closure.get(name) {
            Some(holder) => holder
                .as_class()
                .cloned()
                .ok_or_else(|| RuntimeError::NotAClass(name.name().to_string())),
            None => self
                .classes
                .get(name)
                .cloned()
                .ok_or_else(|| RuntimeError::UnknownVariable(name.name().to_string())),
        }
    }

    fn eval_args(&mut self, args: &[Expr], closure: &mut Closure) -> Result<Vec<ObjectHolder>, RuntimeError> {
        let mut executed = Vec::with_capacity(args.len());
        for arg in args {
            executed.push(self.eval_expr(arg, closure)?);
        }
        Ok(executed)
    }

    /// Invoke `method` on `instance` with already evaluated arguments.
    ///
    /// The body runs in a fresh closure with `self` and the formal parameters
    /// bound; the pending return raised anywhere inside it is caught here and
    /// becomes the call's value.
    fn call_method(
        &mut self,
        instance: &Rc<ClassInstance>,
        method: &Symbol,
        args: Vec<ObjectHolder>,
    ) -> Result<ObjectHolder, RuntimeError> {
        let class = instance.class().clone();
        let target = match class.method(method) {
            Some(m) => m,
            None => {
                return Err(RuntimeError::UnknownMethod(
                    method.name().to_string(),
                    class.name().name().to_string(),
                ))
            }
        };

        let mut locals = Closure::new();
        locals.insert(
            self.names.self_.clone(),
            ObjectHolder::own(Value::Instance(instance.clone())),
        );
        for (param, arg) in target.formal_params.iter().zip(args) {
            locals.insert(param.clone(), arg);
        }

        self.eval_stmt(&target.body, &mut locals)?;
        Ok(self.pending_return.take().unwrap_or_else(ObjectHolder::none))
    }

    fn equal(&mut self, lhs: &ObjectHolder, rhs: &ObjectHolder) -> Result<bool, RuntimeError> {
        if let (Some(l), Some(r)) = (lhs.as_number(), rhs.as_number()) {
            return Ok(l == r);
        }
        if let (Some(l), Some(r)) = (lhs.as_str(), rhs.as_str()) {
            return Ok(l == r);
        }
        if let (Some(l), Some(r)) = (lhs.as_bool(), rhs.as_bool()) {
            return Ok(l == r);
        }
        if let Some(instance) = lhs.as_instance() {
            if instance.class().has_method(&self.names.eq, 1) {
                let instance = instance.clone();
                let eq = self.names.eq.clone();
                let verdict = self.call_method(&instance, &eq, vec![rhs.clone()])?;
                return verdict.as_bool().ok_or(RuntimeError::ComparisonNotBool);
            }
        }
        if !lhs.is_some() && !rhs.is_some() {
            return Ok(true);
        }
        Err(RuntimeError::NoViableEqual)
    }

    fn less(&mut self, lhs: &ObjectHolder, rhs: &ObjectHolder) -> Result<bool, RuntimeError> {
        if let (Some(l), Some(r)) = (lhs.as_number(), rhs.as_number()) {
            return Ok(l < r);
        }
        if let (Some(l), Some(r)) = (lhs.as_str(), rhs.as_str()) {
            return Ok(l < r);
        }
        if let (Some(l), Some(r)) = (lhs.as_bool(), rhs.as_bool()) {
            return Ok(l < r);
        }
        if let Some(instance) = lhs.as_instance() {
            if instance.class().has_method(&self.names.lt, 1) {
                let instance = instance.clone();
                let lt = self.names.lt.clone();
                let verdict = self.call_method(&instance, &lt, vec![rhs.clone()])?;
                return verdict.as_bool().ok_or(RuntimeError::ComparisonNotBool);
            }
        }
        Err(RuntimeError::NoViableLess)
    }

    fn eval_print(&mut self, args: &[Expr], closure: &mut Closure) -> Result<ObjectHolder, RuntimeError> {
        let mut buf = String::new();
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                buf.push(' ');
            }
            let value = self.eval_expr(arg, closure)?;
            self.append_value(&mut buf, &value)?;
        }
        buf.push('\n');

        // The whole line goes out in one write.
        self.output.write_all(buf.as_bytes())?;
        Ok(ObjectHolder::none())
    }

    /// Append the printable form of `value` to `buf`.
    ///
    /// The empty holder renders as `None`.  Instances format themselves
    /// through `__str__` when they define it and fall back to an address-like
    /// identifier otherwise.
    fn append_value(&mut self, buf: &mut String, value: &ObjectHolder) -> Result<(), RuntimeError> {
        match value.value() {
            None | Some(Value::None) => buf.push_str("None"),
            Some(Value::Number(n)) => buf.push_str(&n.to_string()),
            Some(Value::Str(s)) => buf.push_str(s),
            Some(Value::Bool(true)) => buf.push_str("True"),
            Some(Value::Bool(false)) => buf.push_str("False"),
            Some(Value::Class(class)) => {
                buf.push_str("Class ");
                buf.push_str(class.name().name());
            }
            Some(Value::Instance(instance)) => {
                let instance = instance.clone();
                if instance.class().has_method(&self.names.str_, 0) {
                    let str_ = self.names.str_.clone();
                    let shown = self.call_method(&instance, &str_, vec![])?;
                    self.append_value(buf, &shown)?;
                } else {
                    buf.push_str(&format!("{:p}", Rc::as_ptr(&instance)));
                }
            }
        }
        Ok(())
    }
}
