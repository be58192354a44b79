use crate::token::{Operator, Token};
use crate::{CompileError, CompileResult, Unbalanced};

/// Translates an infix token stream (with explicit concatenation) into
/// postfix order with the shunting-yard algorithm.
///
/// Operators of equal precedence pop each other, which makes the binary
/// operators left associative. The output never contains parentheses.
pub fn to_postfix(tokens: &[Token]) -> CompileResult<Vec<Token>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Operator> = Vec::new();

    for &token in tokens {
        match token {
            Token::Literal(_) => output.push(token),
            Token::Op(Operator::Open) => stack.push(Operator::Open),
            Token::Op(Operator::Close) => loop {
                match stack.pop() {
                    Some(Operator::Open) => break,
                    Some(op) => output.push(Token::Op(op)),
                    None => {
                        return Err(CompileError::UnbalancedParentheses(
                            Unbalanced::UnmatchedClose,
                        ))
                    }
                }
            },
            Token::Op(op) => {
                while let Some(&top) = stack.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    output.push(Token::Op(top));
                    stack.pop();
                }
                stack.push(op);
            }
        }
    }

    while let Some(op) = stack.pop() {
        if op == Operator::Open {
            return Err(CompileError::UnbalancedParentheses(
                Unbalanced::UnclosedOpen,
            ));
        }
        output.push(Token::Op(op));
    }
    Ok(output)
}
