use quickcheck::{Arbitrary, Gen, QuickCheck, Testable};

use regex_nfa::{
    compile, expand_classes, insert_concat, to_postfix, Operator, Order,
    Token,
};

fn qc<T: Testable>(t: T) {
    QuickCheck::new().tests(2_000).max_tests(4_000).quickcheck(t);
}

/// A well-formed pattern.
///
/// Generation is biased toward operators and groups; a pattern made only of
/// literals makes for a very boring automaton.
#[derive(Clone, Debug)]
struct Pattern(String);

impl Arbitrary for Pattern {
    fn arbitrary(g: &mut Gen) -> Pattern {
        let depth = usize::arbitrary(g) % 5;
        Pattern(expr(g, depth))
    }
}

fn expr(g: &mut Gen, depth: usize) -> String {
    const LITERALS: &[char] = &['a', 'b', 'c', 'x', '0', '1'];
    const CLASSES: &[&str] = &["[a-c]", "[xy]", "[0-2b]", "[a]"];
    const REPETITIONS: &[char] = &['*', '+', '?'];

    // At the bottom only literals and classes remain.
    let choices = if depth == 0 { 2 } else { 6 };
    let choice = usize::arbitrary(g) % choices;
    let depth = depth.saturating_sub(1);
    match choice {
        0 => g.choose(LITERALS).unwrap().to_string(),
        1 => g.choose(CLASSES).unwrap().to_string(),
        2 => format!("{}{}", expr(g, depth), expr(g, depth)),
        3 => format!("{}|{}", expr(g, depth), expr(g, depth)),
        4 => format!("({})", expr(g, depth)),
        _ => format!("({}){}", expr(g, depth), g.choose(REPETITIONS).unwrap()),
    }
}

#[test]
fn well_formed_patterns_compile() {
    fn prop(p: Pattern) -> bool {
        compile(&p.0).is_ok()
    }
    qc(prop as fn(Pattern) -> bool);
}

#[test]
fn every_state_is_reachable_from_start() {
    fn prop(p: Pattern) -> bool {
        let nfa = compile(&p.0).unwrap();
        nfa.traverse(Order::DepthFirst).len() == nfa.len()
            && nfa.traverse(Order::BreadthFirst).len() == nfa.len()
    }
    qc(prop as fn(Pattern) -> bool);
}

#[test]
fn accept_is_a_distinct_dead_end() {
    fn prop(p: Pattern) -> bool {
        let nfa = compile(&p.0).unwrap();
        nfa.start() != nfa.accept() && nfa.state(nfa.accept()).is_terminal()
    }
    qc(prop as fn(Pattern) -> bool);
}

#[test]
fn compiling_twice_gives_isomorphic_automata() {
    fn prop(p: Pattern) -> bool {
        let first = compile(&p.0).unwrap();
        let second = compile(&p.0).unwrap();
        first.is_isomorphic(&second)
    }
    qc(prop as fn(Pattern) -> bool);
}

#[test]
fn concat_insertion_is_idempotent() {
    fn prop(p: Pattern) -> bool {
        let once = insert_concat(&expand_classes(&p.0).unwrap());
        insert_concat(&once) == once
    }
    qc(prop as fn(Pattern) -> bool);
}

#[test]
fn postfix_drops_parentheses_and_keeps_literals() {
    fn prop(p: Pattern) -> bool {
        let infix = insert_concat(&expand_classes(&p.0).unwrap());
        let postfix = to_postfix(&infix).unwrap();
        let literals = |tokens: &[Token]| {
            tokens.iter().filter(|t| matches!(t, Token::Literal(_))).count()
        };
        let is_paren = |t: &Token| {
            matches!(t, Token::Op(Operator::Open | Operator::Close))
        };
        !postfix.iter().any(is_paren) && literals(&infix) == literals(&postfix)
    }
    qc(prop as fn(Pattern) -> bool);
}

#[test]
fn each_literal_contributes_two_states() {
    // Literals and every operator but concatenation allocate two states.
    fn prop(p: Pattern) -> bool {
        let infix = insert_concat(&expand_classes(&p.0).unwrap());
        let allocating = infix
            .iter()
            .filter(|t| match t {
                Token::Literal(_) => true,
                Token::Op(op) => {
                    op.is_repetition() || *op == Operator::Alternate
                }
            })
            .count();
        compile(&p.0).unwrap().len() == 2 * allocating
    }
    qc(prop as fn(Pattern) -> bool);
}
