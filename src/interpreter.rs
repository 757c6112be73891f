//! API to control the interpreter.

use std::error::Error;
use std::fmt;
use std::io::prelude::*;
use std::rc::Rc;

use crate::ctx::Context;
use crate::eval::{Evaluator, RuntimeError};
use crate::parser::{Parser, ParserError};
use crate::runtime::Closure;

/// Tree-walk interpreter for Pym.
///
/// # Example
///
/// Invoke the interpreter a first time to define a class, then again to
/// instantiate it; globals and class definitions persist across calls:
///
/// ```
/// # use rpym::interpreter::{Interpreter, PymError};
///
/// let mut output: Vec<u8> = Vec::new();
/// let mut interp = Interpreter::new(&mut output);
///
/// let class_def = "\
/// class Greeter:
///   def __init__(who):
///     self.who = who
///   def hi():
///     return 'Hi, ' + self.who
/// ";
/// interp.eval(class_def.as_bytes())?;
///
/// interp.eval("g = Greeter('Ann')\n".as_bytes())?;
/// interp.eval("print g.hi()\n".as_bytes())?;
///
/// assert_eq!(output, b"Hi, Ann\n");
/// # Ok::<(), PymError>(())
/// ```
#[derive(Debug)]
pub struct Interpreter<'t, W: Write> {
    ctx: Rc<Context>,
    globals: Closure,
    evaluator: Evaluator<'t, W>,
}

/// Errors the interpreter can raise.
#[derive(Debug)]
pub enum PymError {
    /// Error occurring during lexical or syntactic analysis.
    Parse(ParserError),

    /// Error occurring during evaluation.
    Runtime(RuntimeError),
}

impl fmt::Display for PymError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PymError::Parse(e) => write!(f, "{}", e),
            PymError::Runtime(e) => write!(f, "runtime error: {}", e),
        }
    }
}

impl Error for PymError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PymError::Parse(e) => Some(e),
            PymError::Runtime(e) => Some(e),
        }
    }
}

impl From<ParserError> for PymError {
    fn from(e: ParserError) -> PymError {
        PymError::Parse(e)
    }
}

impl From<RuntimeError> for PymError {
    fn from(e: RuntimeError) -> PymError {
        PymError::Runtime(e)
    }
}

impl<W: Write> Interpreter<'_, W> {
    pub fn new(output: &mut W) -> Interpreter<'_, W> {
        let ctx = Context::new();
        Interpreter {
            ctx: ctx.clone(),
            globals: Closure::new(),
            evaluator: Evaluator::new(output, ctx),
        }
    }

    /// Parse and run one program against the session's global scope.
    pub fn eval<R: BufRead>(&mut self, input: R) -> Result<(), PymError> {
        let mut parser = Parser::new(input, self.ctx.clone())?;
        let prg = parser.parse_program()?;
        self.evaluator.run(&prg, &mut self.globals)?;
        Ok(())
    }
}
