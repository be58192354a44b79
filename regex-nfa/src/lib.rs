//! Regular expression to NFA compilation with Thompson's construction.
//!
//! A pattern passes through four stages, each consuming the whole output of
//! the one before it:
//!
//! 1. [`expand_classes`] tokenizes the pattern and rewrites bracket classes
//!    such as `[a-c]` into alternations such as `(a|b|c)`.
//! 2. [`insert_concat`] makes implicit concatenation explicit with `.`.
//! 3. [`to_postfix`] reorders the tokens into postfix form with the
//!    shunting-yard algorithm.
//! 4. [`Compiler::build`] assembles the [`NFA`] from the postfix tokens.
//!
//! [`compile`] runs all four. The result exposes its start state, its
//! accept state and the whole state graph:
//!
//! ```
//! use regex_nfa::Order;
//!
//! let nfa = regex_nfa::compile("a|b").unwrap();
//! assert_eq!(nfa.len(), 6);
//! assert_eq!(nfa.traverse(Order::DepthFirst).len(), 6);
//! assert!(nfa.state(nfa.accept()).is_terminal());
//! ```
//!
//! The supported syntax is small: alphanumeric literals, the operators
//! `|`, `*`, `+` and `?`, grouping with parentheses, an optional explicit
//! concatenation operator `.`, and bracket classes with `x-y` ranges.
//! There is no wildcard, no escaping and no negated class.
//!
//! # Crate features
//!
//! * **logging** - Emits pipeline stages and construction statistics through
//!   the `log` crate. Disabled by default.

#[macro_use]
mod macros;

pub mod class;
pub mod compiler;
pub mod concat;
pub mod nfa;
pub mod postfix;
pub mod token;

use std::fmt;

pub use class::{expand_classes, ClassErrorKind};
pub use compiler::{Compiler, Config};
pub use concat::insert_concat;
pub use nfa::{Order, State, StateId, NFA};
pub use postfix::to_postfix;
pub use token::{Operator, Token};

/// The result of compiling a pattern to a Thompson NFA
pub type CompileResult<T> = Result<T, CompileError>;

/// Which side of a parenthesis pair is missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unbalanced {
    /// A `)` with no `(` before it.
    UnmatchedClose,
    /// A `(` that is never closed.
    UnclosedOpen,
}

/// Errors that can occur during compilation
#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    /// The pattern is the empty string.
    EmptyExpression,
    /// A character that is neither a literal nor an operator.
    UnexpectedCharacter { ch: char, offset: usize },
    /// The bracket class opening at byte `offset` is malformed.
    MalformedCharacterClass { offset: usize, kind: ClassErrorKind },
    /// Syntax that is recognized but not supported.
    UnsupportedFeature(String),
    /// Parentheses do not pair up.
    UnbalancedParentheses(Unbalanced),
    /// Construction did not end with exactly one automaton, e.g., `a|` or
    /// `()`.
    InvalidExpression,
    /// The NFA would need more states than the configured limit.
    TooComplex { limit: usize },
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::EmptyExpression => write!(f, "empty expression"),
            CompileError::UnexpectedCharacter { ch, offset } => {
                write!(f, "unexpected character '{}' at offset {}", ch, offset)
            }
            CompileError::MalformedCharacterClass { offset, kind } => {
                write!(
                    f,
                    "malformed character class at offset {}: {}",
                    offset, kind
                )
            }
            CompileError::UnsupportedFeature(feature) => {
                write!(f, "unsupported feature: {}", feature)
            }
            CompileError::UnbalancedParentheses(Unbalanced::UnmatchedClose) => {
                write!(f, "unbalanced parentheses: unopened ')'")
            }
            CompileError::UnbalancedParentheses(Unbalanced::UnclosedOpen) => {
                write!(f, "unbalanced parentheses: unclosed '('")
            }
            CompileError::InvalidExpression => write!(f, "invalid expression"),
            CompileError::TooComplex { limit } => write!(
                f,
                "regex pattern is too complex (exceeds {} states)",
                limit
            ),
        }
    }
}

impl std::error::Error for CompileError {}

/// Compile a pattern with the default configuration.
///
/// This is a convenience for `Compiler::new().compile(pattern)`.
pub fn compile(pattern: &str) -> CompileResult<NFA> {
    Compiler::new().compile(pattern)
}
