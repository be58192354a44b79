use std::collections::HashMap;
use std::process;

use regex_nfa::{
    expand_classes, insert_concat, to_postfix, token::render, Order, StateId,
    NFA,
};

fn main() {
    let mut patterns: Vec<String> = std::env::args().skip(1).collect();
    if patterns.is_empty() {
        patterns = ["ab", "a*", "a+", "a?", "a|b", "[a-c]", "(a|b)*abb"]
            .iter()
            .map(|pattern| pattern.to_string())
            .collect();
    }

    let mut failed = false;
    for pattern in &patterns {
        println!("\n=== Pattern: '{}' ===", pattern);
        match regex_nfa::compile(pattern) {
            Ok(nfa) => {
                if let Some(postfix) = postfix_of(pattern) {
                    println!("Postfix: {}", postfix);
                }
                print_nfa(&nfa);
            }
            Err(e) => {
                println!("Failed to compile: {}", e);
                failed = true;
            }
        }
    }

    if failed {
        process::exit(1);
    }
}

fn postfix_of(pattern: &str) -> Option<String> {
    let tokens = insert_concat(&expand_classes(pattern).ok()?);
    to_postfix(&tokens).ok().map(|postfix| render(&postfix))
}

fn print_nfa(nfa: &NFA) {
    let order = nfa.traverse(Order::DepthFirst);
    let labels: HashMap<StateId, usize> = nfa.labels(Order::DepthFirst);
    let name = |id: StateId| format!("S{}", labels[&id]);

    let names: Vec<String> = order.iter().map(|&id| name(id)).collect();
    println!("States: [{}]", names.join(", "));
    println!("Start: {}", name(nfa.start()));
    println!("Accept: {}", name(nfa.accept()));

    for &id in &order {
        let state = nfa.state(id);
        if state.is_terminal() {
            println!("  {}: (no transitions)", name(id));
            continue;
        }
        println!("  {}:", name(id));
        for (symbol, targets) in state.transitions() {
            for &target in targets {
                println!("    '{}' -> {}", symbol, name(target));
            }
        }
        for &target in state.epsilons() {
            println!("    ε -> {}", name(target));
        }
    }
}
