use crate::{
    class::expand_classes,
    concat::insert_concat,
    nfa::{StateId, NFA},
    postfix::to_postfix,
    token::{Operator, Token},
    CompileError, CompileResult,
};

/// The configuration used by a [`Compiler`].
#[derive(Clone, Debug, Default)]
pub struct Config {
    state_limit: Option<usize>,
}

impl Config {
    /// Return a new default configuration. By default there is no limit
    /// on the size of the compiled NFA.
    pub fn new() -> Config {
        Config::default()
    }

    /// Sets the maximum number of states a compiled NFA may have.
    ///
    /// Compiling a pattern that needs more states fails with
    /// [`CompileError::TooComplex`]. `None` removes the limit.
    pub fn state_limit(mut self, limit: Option<usize>) -> Config {
        self.state_limit = limit;
        self
    }

    pub fn get_state_limit(&self) -> Option<usize> {
        self.state_limit
    }
}

/// Compiler that converts a pattern into a Thompson NFA.
///
/// A compiler only holds its configuration. Every call to
/// [`compile`](Compiler::compile) builds into fresh storage, so a single
/// compiler may be shared freely between threads.
#[derive(Clone, Debug, Default)]
pub struct Compiler {
    config: Config,
}

impl Compiler {
    /// Create a new compiler with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the given configuration to this compiler.
    pub fn configure(&mut self, config: Config) -> &mut Compiler {
        self.config = config;
        self
    }

    /// Compile a pattern.
    ///
    /// The pattern goes through class expansion, concatenation insertion,
    /// postfix translation and finally Thompson construction. The first
    /// stage to fail aborts the rest.
    pub fn compile(&self, pattern: &str) -> CompileResult<NFA> {
        if pattern.is_empty() {
            return Err(CompileError::EmptyExpression);
        }
        let tokens = expand_classes(pattern)?;
        trace!("class-expanded: {}", crate::token::render(&tokens));
        let tokens = insert_concat(&tokens);
        trace!("concat-annotated: {}", crate::token::render(&tokens));
        let postfix = to_postfix(&tokens)?;
        trace!("postfix: {}", crate::token::render(&postfix));
        self.build(&postfix)
    }

    /// Run Thompson's construction over a postfix token stream.
    ///
    /// Exactly one fragment must remain once every token is consumed.
    /// Anything else, including an operator short of operands, is an
    /// [`CompileError::InvalidExpression`].
    pub fn build(&self, postfix: &[Token]) -> CompileResult<NFA> {
        let mut builder = Builder::new(self.config.state_limit);
        for &token in postfix {
            builder.push(token)?;
        }
        builder.finish()
    }
}

/// Fragment of an NFA with start and end states
#[derive(Clone, Copy, Debug)]
struct Fragment {
    start: StateId,
    end: StateId,
}

struct Builder {
    nfa: NFA,
    fragments: Vec<Fragment>,
    state_limit: Option<usize>,
}

impl Builder {
    fn new(state_limit: Option<usize>) -> Builder {
        Builder { nfa: NFA::new(), fragments: Vec::new(), state_limit }
    }

    fn push(&mut self, token: Token) -> CompileResult<()> {
        let fragment = match token {
            Token::Literal(ch) => self.literal(ch)?,
            Token::Op(Operator::Concat) => self.concat()?,
            Token::Op(Operator::Alternate) => self.alternate()?,
            Token::Op(Operator::Star) => self.star()?,
            Token::Op(Operator::Plus) => self.plus()?,
            Token::Op(Operator::Question) => self.question()?,
            Token::Op(Operator::Open | Operator::Close) => {
                return Err(CompileError::InvalidExpression)
            }
        };
        self.fragments.push(fragment);
        Ok(())
    }

    fn finish(mut self) -> CompileResult<NFA> {
        if self.fragments.len() != 1 {
            debug!(
                "construction left {} fragments, expected exactly one",
                self.fragments.len(),
            );
            return Err(CompileError::InvalidExpression);
        }
        let fragment = self.pop()?;
        self.nfa.set_endpoints(fragment.start, fragment.end);
        debug!("Thompson construction complete, {} states", self.nfa.len());
        Ok(self.nfa)
    }

    fn pop(&mut self) -> CompileResult<Fragment> {
        self.fragments.pop().ok_or(CompileError::InvalidExpression)
    }

    fn add_state(&mut self) -> CompileResult<StateId> {
        if let Some(limit) = self.state_limit {
            if self.nfa.len() >= limit {
                return Err(CompileError::TooComplex { limit });
            }
        }
        Ok(self.nfa.add_state())
    }

    /// Allocates the start and end states of a new fragment, in that order.
    fn endpoints(&mut self) -> CompileResult<Fragment> {
        let start = self.add_state()?;
        let end = self.add_state()?;
        Ok(Fragment { start, end })
    }

    fn literal(&mut self, ch: char) -> CompileResult<Fragment> {
        let fragment = self.endpoints()?;
        self.nfa.add_transition(fragment.start, ch, fragment.end);
        Ok(fragment)
    }

    fn concat(&mut self) -> CompileResult<Fragment> {
        let second = self.pop()?;
        let first = self.pop()?;
        self.nfa.add_epsilon(first.end, second.start);
        Ok(Fragment { start: first.start, end: second.end })
    }

    fn alternate(&mut self) -> CompileResult<Fragment> {
        let second = self.pop()?;
        let first = self.pop()?;
        let fragment = self.endpoints()?;
        self.nfa.add_epsilon(fragment.start, first.start);
        self.nfa.add_epsilon(fragment.start, second.start);
        self.nfa.add_epsilon(first.end, fragment.end);
        self.nfa.add_epsilon(second.end, fragment.end);
        Ok(fragment)
    }

    /// Zero or more: the new start may skip straight to the new end.
    fn star(&mut self) -> CompileResult<Fragment> {
        let inner = self.pop()?;
        let fragment = self.endpoints()?;
        self.nfa.add_epsilon(fragment.start, inner.start);
        self.nfa.add_epsilon(fragment.start, fragment.end);
        self.nfa.add_epsilon(inner.end, inner.start);
        self.nfa.add_epsilon(inner.end, fragment.end);
        Ok(fragment)
    }

    /// One or more: the only way to the new end is through the inner
    /// fragment.
    fn plus(&mut self) -> CompileResult<Fragment> {
        let inner = self.pop()?;
        let fragment = self.endpoints()?;
        self.nfa.add_epsilon(fragment.start, inner.start);
        self.nfa.add_epsilon(inner.end, inner.start);
        self.nfa.add_epsilon(inner.end, fragment.end);
        Ok(fragment)
    }

    fn question(&mut self) -> CompileResult<Fragment> {
        let inner = self.pop()?;
        let fragment = self.endpoints()?;
        self.nfa.add_epsilon(fragment.start, inner.start);
        self.nfa.add_epsilon(fragment.start, fragment.end);
        self.nfa.add_epsilon(inner.end, fragment.end);
        Ok(fragment)
    }
}
