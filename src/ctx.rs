use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::interner::{Interner, Symbol};
use crate::token::Token;

/// Shared session state: the string interner, the keyword table and the
/// pre-interned names the evaluator dispatches on.
///
/// The context is created once per interpreter session and shared (via `Rc`)
/// between the lexer, the parser and the evaluator so that all of them hand
/// out symbols from the same interner.
#[derive(Debug)]
pub struct Context {
    interner: RefCell<Interner>,
    keywords: HashMap<Symbol, Token>,
    names: WellKnown,
}

/// Names with built-in meaning: the receiver binding and the dunder methods
/// the evaluator invokes implicitly.
#[derive(Debug, Clone)]
pub struct WellKnown {
    pub self_: Symbol,
    pub init: Symbol,
    pub add: Symbol,
    pub eq: Symbol,
    pub lt: Symbol,
    pub str_: Symbol,
}

impl Context {
    /// Creates a new context.
    ///
    /// Returns an `Rc` because the context is shared between the pipeline
    /// stages.
    pub fn new() -> Rc<Self> {
        let mut interner = Interner::new();

        let mut keywords = HashMap::new();
        for (name, token) in KEYWORDS.iter().cloned() {
            keywords.insert(interner.symbol(name), token);
        }

        let names = WellKnown {
            self_: interner.symbol("self"),
            init: interner.symbol("__init__"),
            add: interner.symbol("__add__"),
            eq: interner.symbol("__eq__"),
            lt: interner.symbol("__lt__"),
            str_: interner.symbol("__str__"),
        };

        Rc::new(Context {
            interner: RefCell::new(interner),
            keywords,
            names,
        })
    }

    /// Intern `name` if needed and return its symbol.
    pub fn symbol(&self, name: &str) -> Symbol {
        self.interner.borrow_mut().symbol(name)
    }

    /// Return the token associated with `id` if it is a reserved word.
    pub fn keyword(&self, id: &Symbol) -> Option<Token> {
        self.keywords.get(id).cloned()
    }

    pub fn names(&self) -> &WellKnown {
        &self.names
    }
}

const KEYWORDS: [(&str, Token); 12] = [
    ("class", Token::Class),
    ("return", Token::Return),
    ("if", Token::If),
    ("else", Token::Else),
    ("def", Token::Def),
    ("print", Token::Print),
    ("and", Token::And),
    ("or", Token::Or),
    ("not", Token::Not),
    ("None", Token::None),
    ("True", Token::True),
    ("False", Token::False),
];
