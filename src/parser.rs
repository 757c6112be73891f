//! Recursive-descent parser: token stream -> AST.

use std::error::Error;
use std::fmt;
use std::io;
use std::io::prelude::*;
use std::rc::Rc;

use crate::ast::{CmpOp, Expr, Stmt};
use crate::ctx::Context;
use crate::diag::{FullSyntaxError, SyntaxError};
use crate::interner::Symbol;
use crate::lexer::{Lexer, LexerError};
use crate::runtime::Method;
use crate::token::Token;

#[derive(Debug)]
pub enum ParserError {
    Read(io::Error),
    Syntax(FullSyntaxError),
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserError::Read(e) => write!(f, "read error: {}", e),
            ParserError::Syntax(e) => write!(f, "{}", e),
        }
    }
}

impl Error for ParserError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParserError::Read(e) => Some(e),
            ParserError::Syntax(e) => Some(e),
        }
    }
}

impl From<LexerError> for ParserError {
    fn from(e: LexerError) -> ParserError {
        match e {
            LexerError::Io(e) => ParserError::Read(e),
            LexerError::Syntax(e) => ParserError::Syntax(e),
        }
    }
}

#[derive(Debug)]
pub struct Parser<R: BufRead> {
    lexer: Lexer<R>,
}

impl<R: BufRead> Parser<R> {
    pub fn new(input: R, ctx: Rc<Context>) -> Result<Parser<R>, ParserError> {
        Ok(Parser {
            lexer: Lexer::new(input, ctx)?,
        })
    }

    pub fn parse_program(&mut self) -> Result<Vec<Stmt>, ParserError> {
        let mut prg = vec![];
        while *self.lexer.current_token() != Token::Eof {
            prg.push(self.statement()?);
        }
        Ok(prg)
    }

    fn statement(&mut self) -> Result<Stmt, ParserError> {
        match self.lexer.current_token() {
            Token::Class => self.class_definition(),
            Token::If => self.if_statement(),
            _ => {
                let stmt = self.simple_statement()?;
                self.consume(&Token::Newline)?;
                Ok(stmt)
            }
        }
    }

    fn simple_statement(&mut self) -> Result<Stmt, ParserError> {
        match self.lexer.current_token() {
            Token::Print => {
                self.advance()?;
                self.print_statement()
            }
            Token::Return => {
                self.advance()?;
                let expr = if *self.lexer.current_token() == Token::Newline {
                    Expr::None
                } else {
                    self.expression()?
                };
                Ok(Stmt::Return(Box::new(expr)))
            }
            _ => self.assignment_or_expression(),
        }
    }

    /// Parse either an assignment (`dotted = expr`) or a bare expression
    /// statement; which one it is only becomes clear after the left-hand side.
    fn assignment_or_expression(&mut self) -> Result<Stmt, ParserError> {
        let expr = self.expression()?;
        if *self.lexer.current_token() != Token::Char(b'=') {
            return Ok(Stmt::Expr(Box::new(expr)));
        }
        match expr {
            Expr::Var(mut dotted) => {
                self.advance()?;
                let rv = Box::new(self.expression()?);
                let field = dotted.pop().expect("dotted chain is never empty");
                if dotted.is_empty() {
                    Ok(Stmt::Assign(field, rv))
                } else {
                    Ok(Stmt::FieldAssign(dotted, field, rv))
                }
            }
            _ => Err(self.syntax_error(SyntaxError::ExpectedLvalue)),
        }
    }

    /// Current token is the one after `print`.
    fn print_statement(&mut self) -> Result<Stmt, ParserError> {
        let mut args = vec![];
        if *self.lexer.current_token() != Token::Newline {
            args.push(self.expression()?);
            while *self.lexer.current_token() == Token::Char(b',') {
                self.advance()?;
                args.push(self.expression()?);
            }
        }
        Ok(Stmt::Print(args))
    }

    /// `class Name(Parent):` followed by an optional indented method table.
    ///
    /// A class with no body owns no methods of its own, which is how a
    /// subclass inherits everything from its parent.
    fn class_definition(&mut self) -> Result<Stmt, ParserError> {
        self.advance()?;
        let name = self.identifier()?;

        let parent = if *self.lexer.current_token() == Token::Char(b'(') {
            self.advance()?;
            let parent = self.identifier()?;
            self.consume(&Token::Char(b')'))?;
            Some(parent)
        } else {
            None
        };

        self.consume(&Token::Char(b':'))?;
        self.consume(&Token::Newline)?;

        let mut methods = vec![];
        if *self.lexer.current_token() == Token::Indent {
            self.advance()?;
            while *self.lexer.current_token() != Token::Dedent {
                methods.push(self.method_definition()?);
            }
            self.advance()?;
        }

        Ok(Stmt::ClassDef(name, parent, methods))
    }

    fn method_definition(&mut self) -> Result<Method, ParserError> {
        self.consume(&Token::Def)?;
        let name = self.identifier()?;

        self.consume(&Token::Char(b'('))?;
        let mut formal_params = vec![];
        if *self.lexer.current_token() != Token::Char(b')') {
            loop {
                formal_params.push(self.identifier()?);
                if *self.lexer.current_token() != Token::Char(b',') {
                    break;
                }
                self.advance()?;
            }
        }
        self.consume(&Token::Char(b')'))?;

        self.consume(&Token::Char(b':'))?;
        let body = self.suite()?;
        Ok(Method {
            name,
            formal_params,
            body,
        })
    }

    /// An indented statement block: `NEWLINE INDENT statement+ DEDENT`.
    fn suite(&mut self) -> Result<Stmt, ParserError> {
        self.lexer.expect(&Token::Newline)?;
        self.lexer.expect_next(&Token::Indent)?;
        self.lexer.next_token()?;
        let mut stmts = vec![];
        while *self.lexer.current_token() != Token::Dedent {
            stmts.push(self.statement()?);
        }
        self.advance()?;
        Ok(Stmt::Compound(stmts))
    }

    fn if_statement(&mut self) -> Result<Stmt, ParserError> {
        self.advance()?;
        let cond = self.expression()?;
        self.consume(&Token::Char(b':'))?;
        let then_body = self.suite()?;

        let else_body = if *self.lexer.current_token() == Token::Else {
            self.advance()?;
            self.consume(&Token::Char(b':'))?;
            Some(Box::new(self.suite()?))
        } else {
            None
        };

        Ok(Stmt::If(Box::new(cond), Box::new(then_body), else_body))
    }

    fn expression(&mut self) -> Result<Expr, ParserError> {
        self.or_test()
    }

    fn or_test(&mut self) -> Result<Expr, ParserError> {
        let mut expr = self.and_test()?;
        while *self.lexer.current_token() == Token::Or {
            self.advance()?;
            expr = Expr::Or(Box::new(expr), Box::new(self.and_test()?));
        }
        Ok(expr)
    }

    fn and_test(&mut self) -> Result<Expr, ParserError> {
        let mut expr = self.not_test()?;
        while *self.lexer.current_token() == Token::And {
            self.advance()?;
            expr = Expr::And(Box::new(expr), Box::new(self.not_test()?));
        }
        Ok(expr)
    }

    fn not_test(&mut self) -> Result<Expr, ParserError> {
        if *self.lexer.current_token() == Token::Not {
            self.advance()?;
            Ok(Expr::Not(Box::new(self.not_test()?)))
        } else {
            self.comparison()
        }
    }

    /// A single, non-chaining comparison.
    fn comparison(&mut self) -> Result<Expr, ParserError> {
        let lhs = self.additive()?;
        let op = match self.lexer.current_token() {
            Token::Eq => CmpOp::Eq,
            Token::NotEq => CmpOp::NotEq,
            Token::LessOrEq => CmpOp::LessOrEq,
            Token::GreaterOrEq => CmpOp::GreaterOrEq,
            Token::Char(b'<') => CmpOp::Less,
            Token::Char(b'>') => CmpOp::Greater,
            _ => return Ok(lhs),
        };
        self.advance()?;
        let rhs = self.additive()?;
        Ok(Expr::Compare(op, Box::new(lhs), Box::new(rhs)))
    }

    fn additive(&mut self) -> Result<Expr, ParserError> {
        let mut expr = self.term()?;
        loop {
            match self.lexer.current_token() {
                Token::Char(b'+') => {
                    self.advance()?;
                    expr = Expr::Add(Box::new(expr), Box::new(self.term()?));
                }
                Token::Char(b'-') => {
                    self.advance()?;
                    expr = Expr::Sub(Box::new(expr), Box::new(self.term()?));
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr, ParserError> {
        let mut expr = self.factor()?;
        loop {
            match self.lexer.current_token() {
                Token::Char(b'*') => {
                    self.advance()?;
                    expr = Expr::Mul(Box::new(expr), Box::new(self.factor()?));
                }
                Token::Char(b'/') => {
                    self.advance()?;
                    expr = Expr::Div(Box::new(expr), Box::new(self.factor()?));
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr, ParserError> {
        match self.lexer.current_token().clone() {
            Token::Number(n) => {
                self.advance()?;
                Ok(Expr::Number(n))
            }
            Token::Str(s) => {
                self.advance()?;
                Ok(Expr::Str(s))
            }
            Token::True => {
                self.advance()?;
                Ok(Expr::Bool(true))
            }
            Token::False => {
                self.advance()?;
                Ok(Expr::Bool(false))
            }
            Token::None => {
                self.advance()?;
                Ok(Expr::None)
            }
            Token::Char(b'(') => {
                self.advance()?;
                let expr = self.expression()?;
                self.consume(&Token::Char(b')'))?;
                Ok(expr)
            }
            Token::Id(_) => self.name_expression(),
            other => Err(self.syntax_error(SyntaxError::UnexpectedToken(
                other.to_string(),
                "expression".to_string(),
            ))),
        }
    }

    /// An expression opening with an identifier: a variable or field read, a
    /// method call, a `str(...)` conversion, or a class instantiation.
    fn name_expression(&mut self) -> Result<Expr, ParserError> {
        let mut dotted = self.dotted_ids()?;
        if *self.lexer.current_token() != Token::Char(b'(') {
            return Ok(Expr::Var(dotted));
        }
        self.advance()?;
        let mut args = self.call_args()?;

        let mut expr = if dotted.len() == 1 {
            if dotted[0].name() == "str" && args.len() == 1 {
                Expr::Stringify(Box::new(args.remove(0)))
            } else {
                Expr::NewInstance(dotted.remove(0), args)
            }
        } else {
            let method = dotted.pop().expect("dotted chain is never empty");
            Expr::MethodCall(Box::new(Expr::Var(dotted)), method, args)
        };

        // Further calls chain on the result: B().f().g()
        while *self.lexer.current_token() == Token::Char(b'.') {
            self.advance()?;
            let method = self.identifier()?;
            self.consume(&Token::Char(b'('))?;
            let args = self.call_args()?;
            expr = Expr::MethodCall(Box::new(expr), method, args);
        }
        Ok(expr)
    }

    fn dotted_ids(&mut self) -> Result<Vec<Symbol>, ParserError> {
        let mut ids = vec![self.identifier()?];
        while *self.lexer.current_token() == Token::Char(b'.') {
            self.advance()?;
            ids.push(self.identifier()?);
        }
        Ok(ids)
    }

    /// Comma-separated arguments up to and including the closing parenthesis.
    fn call_args(&mut self) -> Result<Vec<Expr>, ParserError> {
        let mut args = vec![];
        if *self.lexer.current_token() != Token::Char(b')') {
            loop {
                args.push(self.expression()?);
                if *self.lexer.current_token() != Token::Char(b',') {
                    break;
                }
                self.advance()?;
            }
        }
        self.consume(&Token::Char(b')'))?;
        Ok(args)
    }

    fn identifier(&mut self) -> Result<Symbol, ParserError> {
        let sym = self.lexer.expect_id()?;
        self.advance()?;
        Ok(sym)
    }

    fn advance(&mut self) -> Result<&Token, ParserError> {
        self.lexer.next_token()?;
        Ok(self.lexer.current_token())
    }

    fn consume(&mut self, expected: &Token) -> Result<(), ParserError> {
        self.lexer.expect(expected)?;
        self.lexer.next_token()?;
        Ok(())
    }

    fn syntax_error(&self, error: SyntaxError) -> ParserError {
        ParserError::Syntax(FullSyntaxError {
            pos: self.lexer.pos(),
            error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_prg(input: &str) -> Result<Vec<Stmt>, ParserError> {
        parse_prg_with_ctx(input, Context::new())
    }

    fn parse_prg_with_ctx(input: &str, ctx: Rc<Context>) -> Result<Vec<Stmt>, ParserError> {
        let mut parser = Parser::new(input.as_bytes(), ctx)?;
        parser.parse_program()
    }

    /// Parse a program of exactly one statement.
    fn parse_stmt(input: &str, ctx: Rc<Context>) -> Result<Stmt, ParserError> {
        let mut prg = parse_prg_with_ctx(input, ctx)?;
        assert_eq!(prg.len(), 1);
        Ok(prg.pop().unwrap())
    }

    #[test]
    fn empty_program() -> Result<(), ParserError> {
        assert_eq!(parse_prg("")?, vec![]);
        Ok(())
    }

    #[test]
    fn arithmetic_precedence() -> Result<(), ParserError> {
        let ctx = Context::new();
        let x = ctx.symbol("x");
        assert_eq!(
            parse_stmt("x = 1 + 2 * 3\n", ctx)?,
            Stmt::Assign(
                x,
                Box::new(Expr::Add(
                    Box::new(Expr::Number(1)),
                    Box::new(Expr::Mul(
                        Box::new(Expr::Number(2)),
                        Box::new(Expr::Number(3))
                    ))
                ))
            )
        );
        Ok(())
    }

    #[test]
    fn addition_is_left_associative() -> Result<(), ParserError> {
        let ctx = Context::new();
        let x = ctx.symbol("x");
        assert_eq!(
            parse_stmt("x = 1 - 2 - 3\n", ctx)?,
            Stmt::Assign(
                x,
                Box::new(Expr::Sub(
                    Box::new(Expr::Sub(
                        Box::new(Expr::Number(1)),
                        Box::new(Expr::Number(2))
                    )),
                    Box::new(Expr::Number(3))
                ))
            )
        );
        Ok(())
    }

    #[test]
    fn parenthesized_expression_takes_precedence() -> Result<(), ParserError> {
        let ctx = Context::new();
        let x = ctx.symbol("x");
        assert_eq!(
            parse_stmt("x = (1 + 2) * 3\n", ctx)?,
            Stmt::Assign(
                x,
                Box::new(Expr::Mul(
                    Box::new(Expr::Add(
                        Box::new(Expr::Number(1)),
                        Box::new(Expr::Number(2))
                    )),
                    Box::new(Expr::Number(3))
                ))
            )
        );
        Ok(())
    }

    #[test]
    fn comparison_operators() -> Result<(), ParserError> {
        let cases = [
            ("==", CmpOp::Eq),
            ("!=", CmpOp::NotEq),
            ("<", CmpOp::Less),
            (">", CmpOp::Greater),
            ("<=", CmpOp::LessOrEq),
            (">=", CmpOp::GreaterOrEq),
        ];
        for (op, expected) in cases.iter() {
            let ctx = Context::new();
            let x = ctx.symbol("x");
            assert_eq!(
                parse_stmt(&format!("x = 1 {} 2\n", op), ctx)?,
                Stmt::Assign(
                    x,
                    Box::new(Expr::Compare(
                        *expected,
                        Box::new(Expr::Number(1)),
                        Box::new(Expr::Number(2))
                    ))
                )
            );
        }
        Ok(())
    }

    #[test]
    fn not_binds_looser_than_comparison() -> Result<(), ParserError> {
        let ctx = Context::new();
        let x = ctx.symbol("x");
        assert_eq!(
            parse_stmt("x = not 1 == 2\n", ctx)?,
            Stmt::Assign(
                x,
                Box::new(Expr::Not(Box::new(Expr::Compare(
                    CmpOp::Eq,
                    Box::new(Expr::Number(1)),
                    Box::new(Expr::Number(2))
                ))))
            )
        );
        Ok(())
    }

    #[test]
    fn and_binds_tighter_than_or() -> Result<(), ParserError> {
        let ctx = Context::new();
        let x = ctx.symbol("x");
        assert_eq!(
            parse_stmt("x = True or False and False\n", ctx)?,
            Stmt::Assign(
                x,
                Box::new(Expr::Or(
                    Box::new(Expr::Bool(true)),
                    Box::new(Expr::And(
                        Box::new(Expr::Bool(false)),
                        Box::new(Expr::Bool(false))
                    ))
                ))
            )
        );
        Ok(())
    }

    #[test]
    fn literals() -> Result<(), ParserError> {
        let ctx = Context::new();
        let x = ctx.symbol("x");
        assert_eq!(
            parse_stmt("x = None\n", ctx.clone())?,
            Stmt::Assign(x.clone(), Box::new(Expr::None))
        );
        assert_eq!(
            parse_stmt("x = 'hi'\n", ctx)?,
            Stmt::Assign(x, Box::new(Expr::Str("hi".to_string())))
        );
        Ok(())
    }

    #[test]
    fn field_assignment() -> Result<(), ParserError> {
        let ctx = Context::new();
        assert_eq!(
            parse_stmt("self.who = who\n", ctx.clone())?,
            Stmt::FieldAssign(
                vec![ctx.symbol("self")],
                ctx.symbol("who"),
                Box::new(Expr::Var(vec![ctx.symbol("who")]))
            )
        );
        Ok(())
    }

    #[test]
    fn deep_field_assignment() -> Result<(), ParserError> {
        let ctx = Context::new();
        assert_eq!(
            parse_stmt("a.b.c = 1\n", ctx.clone())?,
            Stmt::FieldAssign(
                vec![ctx.symbol("a"), ctx.symbol("b")],
                ctx.symbol("c"),
                Box::new(Expr::Number(1))
            )
        );
        Ok(())
    }

    #[test]
    fn dotted_read() -> Result<(), ParserError> {
        let ctx = Context::new();
        assert_eq!(
            parse_stmt("x = circle.center.x\n", ctx.clone())?,
            Stmt::Assign(
                ctx.symbol("x"),
                Box::new(Expr::Var(vec![
                    ctx.symbol("circle"),
                    ctx.symbol("center"),
                    ctx.symbol("x")
                ]))
            )
        );
        Ok(())
    }

    #[test]
    fn bad_assignment_target() {
        match parse_prg("1 + 2 = 3\n") {
            Err(ParserError::Syntax(FullSyntaxError {
                error: SyntaxError::ExpectedLvalue,
                ..
            })) => (),
            out => panic!("unexpected output: {:?}", out),
        }
    }

    #[test]
    fn print_with_several_arguments() -> Result<(), ParserError> {
        let ctx = Context::new();
        assert_eq!(
            parse_stmt("print 1, x, 'hi'\n", ctx.clone())?,
            Stmt::Print(vec![
                Expr::Number(1),
                Expr::Var(vec![ctx.symbol("x")]),
                Expr::Str("hi".to_string())
            ])
        );
        Ok(())
    }

    #[test]
    fn print_without_arguments() -> Result<(), ParserError> {
        let ctx = Context::new();
        assert_eq!(parse_stmt("print\n", ctx)?, Stmt::Print(vec![]));
        Ok(())
    }

    #[test]
    fn stringify_call() -> Result<(), ParserError> {
        let ctx = Context::new();
        assert_eq!(
            parse_stmt("x = str(42)\n", ctx.clone())?,
            Stmt::Assign(
                ctx.symbol("x"),
                Box::new(Expr::Stringify(Box::new(Expr::Number(42))))
            )
        );
        Ok(())
    }

    #[test]
    fn method_call_with_arguments() -> Result<(), ParserError> {
        let ctx = Context::new();
        assert_eq!(
            parse_stmt("y = a.b.f(1, 2)\n", ctx.clone())?,
            Stmt::Assign(
                ctx.symbol("y"),
                Box::new(Expr::MethodCall(
                    Box::new(Expr::Var(vec![ctx.symbol("a"), ctx.symbol("b")])),
                    ctx.symbol("f"),
                    vec![Expr::Number(1), Expr::Number(2)]
                ))
            )
        );
        Ok(())
    }

    #[test]
    fn bare_method_call_statement() -> Result<(), ParserError> {
        let ctx = Context::new();
        assert_eq!(
            parse_stmt("p.set_name('Ivan')\n", ctx.clone())?,
            Stmt::Expr(Box::new(Expr::MethodCall(
                Box::new(Expr::Var(vec![ctx.symbol("p")])),
                ctx.symbol("set_name"),
                vec![Expr::Str("Ivan".to_string())]
            )))
        );
        Ok(())
    }

    #[test]
    fn instantiation() -> Result<(), ParserError> {
        let ctx = Context::new();
        assert_eq!(
            parse_stmt("g = Greeter('Ann')\n", ctx.clone())?,
            Stmt::Assign(
                ctx.symbol("g"),
                Box::new(Expr::NewInstance(
                    ctx.symbol("Greeter"),
                    vec![Expr::Str("Ann".to_string())]
                ))
            )
        );
        Ok(())
    }

    #[test]
    fn return_with_and_without_value() -> Result<(), ParserError> {
        let ctx = Context::new();
        let prg = "\
class A:
  def f():
    return 1
  def g():
    return
";
        let stmts = parse_prg_with_ctx(prg, ctx)?;
        match &stmts[0] {
            Stmt::ClassDef(_, None, methods) => {
                assert_eq!(
                    methods[0].body,
                    Stmt::Compound(vec![Stmt::Return(Box::new(Expr::Number(1)))])
                );
                assert_eq!(
                    methods[1].body,
                    Stmt::Compound(vec![Stmt::Return(Box::new(Expr::None))])
                );
            }
            out => panic!("unexpected statement: {:?}", out),
        }
        Ok(())
    }

    #[test]
    fn class_definition_with_methods() -> Result<(), ParserError> {
        let ctx = Context::new();
        let prg = "\
class Greeter:
  def __init__(who):
    self.who = who
  def hi():
    return 'Hi, ' + self.who
";
        let stmts = parse_prg_with_ctx(prg, ctx.clone())?;
        assert_eq!(stmts.len(), 1);
        match &stmts[0] {
            Stmt::ClassDef(name, None, methods) => {
                assert_eq!(*name, ctx.symbol("Greeter"));
                assert_eq!(methods.len(), 2);
                assert_eq!(methods[0].name, ctx.symbol("__init__"));
                assert_eq!(methods[0].formal_params, vec![ctx.symbol("who")]);
                assert_eq!(methods[1].name, ctx.symbol("hi"));
                assert!(methods[1].formal_params.is_empty());
            }
            out => panic!("unexpected statement: {:?}", out),
        }
        Ok(())
    }

    #[test]
    fn subclass_names_its_parent() -> Result<(), ParserError> {
        let ctx = Context::new();
        let prg = "\
class A:
  def f():
    return 1
class B(A):
x = B()
";
        let stmts = parse_prg_with_ctx(prg, ctx.clone())?;
        assert_eq!(stmts.len(), 3);
        match &stmts[1] {
            Stmt::ClassDef(name, Some(parent), methods) => {
                assert_eq!(*name, ctx.symbol("B"));
                assert_eq!(*parent, ctx.symbol("A"));
                assert!(methods.is_empty());
            }
            out => panic!("unexpected statement: {:?}", out),
        }
        Ok(())
    }

    #[test]
    fn if_else_with_suites() -> Result<(), ParserError> {
        let ctx = Context::new();
        let prg = "\
if x == 0:
  print 1
else:
  print 2
";
        assert_eq!(
            parse_stmt(prg, ctx.clone())?,
            Stmt::If(
                Box::new(Expr::Compare(
                    CmpOp::Eq,
                    Box::new(Expr::Var(vec![ctx.symbol("x")])),
                    Box::new(Expr::Number(0))
                )),
                Box::new(Stmt::Compound(vec![Stmt::Print(vec![Expr::Number(1)])])),
                Some(Box::new(Stmt::Compound(vec![Stmt::Print(vec![
                    Expr::Number(2)
                ])])))
            )
        );
        Ok(())
    }

    #[test]
    fn nested_if_inside_method() -> Result<(), ParserError> {
        let ctx = Context::new();
        let prg = "\
class A:
  def sign():
    if self.n < 0:
      return 0 - 1
    return 1
";
        let stmts = parse_prg_with_ctx(prg, ctx)?;
        match &stmts[0] {
            Stmt::ClassDef(_, None, methods) => match &methods[0].body {
                Stmt::Compound(body) => {
                    assert_eq!(body.len(), 2);
                    assert!(match body[0] {
                        Stmt::If(..) => true,
                        _ => false,
                    });
                }
                out => panic!("unexpected body: {:?}", out),
            },
            out => panic!("unexpected statement: {:?}", out),
        }
        Ok(())
    }

    #[test]
    fn missing_block_after_if_is_an_error() {
        match parse_prg("if True:\nprint 1\n") {
            Err(ParserError::Syntax(FullSyntaxError {
                error: SyntaxError::UnexpectedToken(_, _),
                ..
            })) => (),
            out => panic!("unexpected output: {:?}", out),
        }
    }

    #[test]
    fn statement_must_end_with_newline() {
        match parse_prg("x = 1 1\n") {
            Err(ParserError::Syntax(FullSyntaxError {
                error: SyntaxError::UnexpectedToken(_, _),
                ..
            })) => (),
            out => panic!("unexpected output: {:?}", out),
        }
    }
}
