use std::fmt;

/// An operator symbol in a pattern.
///
/// `Concat` is the explicit concatenation operator `.`. It never means
/// "any character".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `(`
    Open,
    /// `)`
    Close,
    /// `|`
    Alternate,
    /// `*`
    Star,
    /// `+`
    Plus,
    /// `?`
    Question,
    /// `.`
    Concat,
}

impl Operator {
    /// Returns the operator spelled by `ch`, if any.
    pub fn from_char(ch: char) -> Option<Operator> {
        match ch {
            '(' => Some(Operator::Open),
            ')' => Some(Operator::Close),
            '|' => Some(Operator::Alternate),
            '*' => Some(Operator::Star),
            '+' => Some(Operator::Plus),
            '?' => Some(Operator::Question),
            '.' => Some(Operator::Concat),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Operator::Open => '(',
            Operator::Close => ')',
            Operator::Alternate => '|',
            Operator::Star => '*',
            Operator::Plus => '+',
            Operator::Question => '?',
            Operator::Concat => '.',
        }
    }

    /// Binding strength of the operator. Higher binds tighter.
    ///
    /// Parentheses are structural and have precedence 0, which means no
    /// operator ever pops them off the translator's stack.
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Star | Operator::Plus | Operator::Question => 3,
            Operator::Concat => 2,
            Operator::Alternate => 1,
            Operator::Open | Operator::Close => 0,
        }
    }

    /// Whether this is one of the postfix repetition operators.
    pub fn is_repetition(self) -> bool {
        matches!(self, Operator::Star | Operator::Plus | Operator::Question)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A single symbol of a pattern at any stage of the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    /// A symbol matched literally.
    Literal(char),
    /// An operator or a parenthesis.
    Op(Operator),
}

impl Token {
    /// Whether a sub-expression can end with this token.
    pub fn can_end(&self) -> bool {
        match *self {
            Token::Literal(_) => true,
            Token::Op(op) => op == Operator::Close || op.is_repetition(),
        }
    }

    /// Whether a sub-expression can begin with this token.
    pub fn can_begin(&self) -> bool {
        matches!(*self, Token::Literal(_) | Token::Op(Operator::Open))
    }
}

impl From<Operator> for Token {
    fn from(op: Operator) -> Token {
        Token::Op(op)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Token::Literal(ch) => write!(f, "{}", ch),
            Token::Op(op) => op.fmt(f),
        }
    }
}

/// Renders a token stream back to pattern text.
pub fn render(tokens: &[Token]) -> String {
    tokens.iter().map(|token| token.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_order() {
        assert!(Operator::Star.precedence() > Operator::Concat.precedence());
        assert!(
            Operator::Concat.precedence() > Operator::Alternate.precedence()
        );
        assert_eq!(Operator::Plus.precedence(), Operator::Question.precedence());
        assert_eq!(Operator::Open.precedence(), 0);
    }

    #[test]
    fn operator_chars_round_trip() {
        for ch in "()|*+?.".chars() {
            let op = Operator::from_char(ch).unwrap();
            assert_eq!(op.as_char(), ch);
        }
        assert_eq!(Operator::from_char('a'), None);
        assert_eq!(Operator::from_char('['), None);
    }

    #[test]
    fn begin_and_end() {
        assert!(Token::Literal('a').can_end());
        assert!(Token::Literal('a').can_begin());
        assert!(Token::Op(Operator::Close).can_end());
        assert!(!Token::Op(Operator::Close).can_begin());
        assert!(Token::Op(Operator::Open).can_begin());
        assert!(!Token::Op(Operator::Open).can_end());
        assert!(Token::Op(Operator::Star).can_end());
        assert!(!Token::Op(Operator::Alternate).can_end());
        assert!(!Token::Op(Operator::Alternate).can_begin());
        assert!(!Token::Op(Operator::Concat).can_begin());
    }

    #[test]
    fn render_stream() {
        let tokens = vec![
            Token::Literal('a'),
            Token::Literal('b'),
            Operator::Alternate.into(),
        ];
        assert_eq!(render(&tokens), "ab|");
    }
}
