use crate::interner::Symbol;
use crate::runtime::Method;

// Clone is needed because method bodies are copied into a runtime class when
// their definition executes.
#[derive(Debug, PartialEq, Clone)]
pub enum Stmt {
    /// `var = expr`
    Assign(Symbol, Box<Expr>),
    /// `obj.path.field = expr`; the first element names the object chain,
    /// the second the field written.
    FieldAssign(Vec<Symbol>, Symbol, Box<Expr>),
    Expr(Box<Expr>),
    Print(Vec<Expr>),
    /// `class Name(Parent):` with its method table.
    ClassDef(Symbol, Option<Symbol>, Vec<Method>),
    If(Box<Expr>, Box<Stmt>, Option<Box<Stmt>>),
    Compound(Vec<Stmt>),
    Return(Box<Expr>),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    None,
    Number(i64),
    Str(String),
    Bool(bool),
    /// A dotted chain `id1.id2. ... .idN`; a plain variable is a chain of one.
    Var(Vec<Symbol>),
    /// `str(expr)`
    Stringify(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Compare(CmpOp, Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
    /// `object.method(args)`
    MethodCall(Box<Expr>, Symbol, Vec<Expr>),
    /// `ClassName(args)`; the class is looked up by name when evaluated.
    NewInstance(Symbol, Vec<Expr>),
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum CmpOp {
    Eq,
    NotEq,
    Less,
    Greater,
    LessOrEq,
    GreaterOrEq,
}
