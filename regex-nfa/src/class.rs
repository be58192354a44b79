//! Tokenization of a raw pattern, with bracket classes expanded.
//!
//! A class such as `[a-c]` is rewritten into the explicit alternation
//! `(a|b|c)`. Members are emitted in the order written, and a `x-y` range
//! contributes every character from `x` to `y` inclusive in ascending code
//! point order. Classes neither nest nor negate.

use std::fmt;
use std::str::CharIndices;

use crate::token::{Operator, Token};
use crate::{CompileError, CompileResult};

/// The reason a bracket class was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassErrorKind {
    /// The `[` has no matching `]`.
    Unclosed,
    /// The class has no members, i.e., `[]`.
    Empty,
    /// A member is not alphanumeric.
    InvalidMember(char),
    /// A range whose start comes after its end, e.g., `z-a`.
    InvalidRange(char, char),
}

impl fmt::Display for ClassErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ClassErrorKind::Unclosed => write!(f, "missing closing ']'"),
            ClassErrorKind::Empty => write!(f, "empty class"),
            ClassErrorKind::InvalidMember(ch) => {
                write!(f, "invalid member '{}'", ch)
            }
            ClassErrorKind::InvalidRange(start, end) => {
                write!(f, "invalid range '{}-{}'", start, end)
            }
        }
    }
}

/// Tokenizes `pattern`, expanding every bracket class into a parenthesized
/// alternation of its members.
pub fn expand_classes(pattern: &str) -> CompileResult<Vec<Token>> {
    let mut tokens = Vec::with_capacity(pattern.len());
    let mut chars = pattern.char_indices();
    while let Some((offset, ch)) = chars.next() {
        if ch == '[' {
            let content = class_content(offset, &mut chars)?;
            let members = class_members(offset, &content)?;
            push_alternation(&members, &mut tokens);
        } else if let Some(op) = Operator::from_char(ch) {
            tokens.push(Token::Op(op));
        } else if ch.is_alphanumeric() {
            tokens.push(Token::Literal(ch));
        } else {
            return Err(CompileError::UnexpectedCharacter { ch, offset });
        }
    }
    Ok(tokens)
}

/// Consumes everything up to and including the `]` closing the class that
/// opened at `offset`, returning the characters in between.
fn class_content(
    offset: usize,
    chars: &mut CharIndices<'_>,
) -> CompileResult<Vec<char>> {
    let mut content = Vec::new();
    for (_, ch) in chars.by_ref() {
        if ch == ']' {
            return Ok(content);
        }
        content.push(ch);
    }
    Err(malformed(offset, ClassErrorKind::Unclosed))
}

fn class_members(offset: usize, content: &[char]) -> CompileResult<Vec<char>> {
    if content.first() == Some(&'^') {
        return Err(CompileError::UnsupportedFeature(
            "negated character class".to_string(),
        ));
    }
    if content.is_empty() {
        return Err(malformed(offset, ClassErrorKind::Empty));
    }

    let member = |ch: char| {
        if ch.is_alphanumeric() {
            Ok(ch)
        } else {
            Err(malformed(offset, ClassErrorKind::InvalidMember(ch)))
        }
    };

    let mut members = Vec::with_capacity(content.len());
    let mut i = 0;
    while i < content.len() {
        let start = member(content[i])?;
        if i + 2 < content.len() && content[i + 1] == '-' {
            let end = member(content[i + 2])?;
            if start > end {
                return Err(malformed(
                    offset,
                    ClassErrorKind::InvalidRange(start, end),
                ));
            }
            members.extend((start as u32..=end as u32).filter_map(char::from_u32));
            i += 3;
        } else {
            members.push(start);
            i += 1;
        }
    }
    Ok(members)
}

fn push_alternation(members: &[char], tokens: &mut Vec<Token>) {
    tokens.push(Token::Op(Operator::Open));
    for (i, &ch) in members.iter().enumerate() {
        if i > 0 {
            tokens.push(Token::Op(Operator::Alternate));
        }
        tokens.push(Token::Literal(ch));
    }
    tokens.push(Token::Op(Operator::Close));
}

fn malformed(offset: usize, kind: ClassErrorKind) -> CompileError {
    CompileError::MalformedCharacterClass { offset, kind }
}
