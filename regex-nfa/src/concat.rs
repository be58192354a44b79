use crate::token::{Operator, Token};

/// Makes implicit concatenation explicit.
///
/// A single left to right pass inserts `.` between every adjacent pair
/// where the left token can end a sub-expression and the right token can
/// begin one. Since `.` itself can neither end nor begin a sub-expression,
/// running this over its own output changes nothing.
pub fn insert_concat(tokens: &[Token]) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len() * 2);
    for (i, &token) in tokens.iter().enumerate() {
        if i > 0 && tokens[i - 1].can_end() && token.can_begin() {
            out.push(Token::Op(Operator::Concat));
        }
        out.push(token);
    }
    out
}
