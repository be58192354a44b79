use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

/// A state ID in the NFA. It is the state's index in [`NFA::states`].
pub type StateId = usize;

/// A Thompson NFA state.
///
/// A state has labeled transitions, where one symbol may lead to several
/// successors, and unlabeled epsilon transitions. Successor lists never
/// contain duplicates and keep the order in which edges were added.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct State {
    transitions: BTreeMap<char, Vec<StateId>>,
    epsilons: Vec<StateId>,
}

impl State {
    /// Labeled transitions, in ascending symbol order.
    pub fn transitions(&self) -> impl Iterator<Item = (char, &[StateId])> {
        self.transitions
            .iter()
            .map(|(&symbol, targets)| (symbol, targets.as_slice()))
    }

    /// Successors on `symbol`, if there are any.
    pub fn targets(&self, symbol: char) -> &[StateId] {
        match self.transitions.get(&symbol) {
            Some(targets) => targets,
            None => &[],
        }
    }

    /// Successors reachable without consuming input.
    pub fn epsilons(&self) -> &[StateId] {
        &self.epsilons
    }

    /// All successors: labeled ones in symbol order, then epsilon ones.
    ///
    /// Every traversal of the NFA visits successors in this order.
    pub fn successors(&self) -> impl Iterator<Item = StateId> + '_ {
        self.transitions
            .values()
            .flat_map(|targets| targets.iter().copied())
            .chain(self.epsilons.iter().copied())
    }

    /// Whether the state has no outgoing edges at all.
    pub fn is_terminal(&self) -> bool {
        self.transitions.is_empty() && self.epsilons.is_empty()
    }

    fn add_transition(&mut self, symbol: char, to: StateId) {
        let targets = self.transitions.entry(symbol).or_default();
        if !targets.contains(&to) {
            targets.push(to);
        }
    }

    fn add_epsilon(&mut self, to: StateId) {
        if !self.epsilons.contains(&to) {
            self.epsilons.push(to);
        }
    }
}

/// The order in which [`NFA::traverse`] visits states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    /// Preorder: a state, then everything reachable from its first
    /// successor, then from its second, and so on.
    DepthFirst,
    /// All states at distance one from the start, then distance two, etc.
    BreadthFirst,
}

/// A Thompson NFA with exactly one start and one accept state.
///
/// States live in an arena and refer to each other by [`StateId`], so the
/// cycles introduced by repetition need no shared ownership. Every state in
/// the arena is reachable from the start state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NFA {
    states: Vec<State>,
    start: StateId,
    accept: StateId,
}

impl NFA {
    /// Create a new empty NFA
    pub(crate) fn new() -> Self {
        Self {
            states: Vec::new(),
            start: 0,
            accept: 0,
        }
    }

    /// Add a new state and return its ID
    pub(crate) fn add_state(&mut self) -> StateId {
        let id = self.states.len();
        self.states.push(State::default());
        id
    }

    pub(crate) fn add_transition(
        &mut self,
        from: StateId,
        symbol: char,
        to: StateId,
    ) {
        self.states[from].add_transition(symbol, to);
    }

    pub(crate) fn add_epsilon(&mut self, from: StateId, to: StateId) {
        self.states[from].add_epsilon(to);
    }

    pub(crate) fn set_endpoints(&mut self, start: StateId, accept: StateId) {
        self.start = start;
        self.accept = accept;
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn accept(&self) -> StateId {
        self.accept
    }

    /// All states, indexed by [`StateId`].
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Returns the state with the given ID.
    ///
    /// # Panics
    ///
    /// When `id` does not belong to this NFA.
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id]
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Get epsilon closure of a set of states
    pub fn epsilon_closure(&self, states: &HashSet<StateId>) -> HashSet<StateId> {
        let mut closure = states.clone();
        let mut stack: Vec<StateId> = states.iter().cloned().collect();

        while let Some(state_id) = stack.pop() {
            if let Some(state) = self.states.get(state_id) {
                for &next in state.epsilons() {
                    if closure.insert(next) {
                        stack.push(next);
                    }
                }
            }
        }

        closure
    }

    /// Lists every state reachable from the start state exactly once, in
    /// the given order.
    ///
    /// Both orders use an explicit stack or queue, so arbitrarily large
    /// automata do not exhaust the call stack.
    pub fn traverse(&self, order: Order) -> Vec<StateId> {
        if self.states.is_empty() {
            return Vec::new();
        }
        let mut visited = vec![false; self.states.len()];
        let mut seen = Vec::with_capacity(self.states.len());
        match order {
            Order::DepthFirst => {
                let mut stack = vec![self.start];
                while let Some(id) = stack.pop() {
                    if visited[id] {
                        continue;
                    }
                    visited[id] = true;
                    seen.push(id);
                    // Reversed, so the first successor is popped first.
                    let successors: Vec<StateId> =
                        self.states[id].successors().collect();
                    stack.extend(successors.into_iter().rev());
                }
            }
            Order::BreadthFirst => {
                let mut queue = VecDeque::from([self.start]);
                visited[self.start] = true;
                while let Some(id) = queue.pop_front() {
                    seen.push(id);
                    for next in self.states[id].successors() {
                        if !visited[next] {
                            visited[next] = true;
                            queue.push_back(next);
                        }
                    }
                }
            }
        }
        seen
    }

    /// Assigns sequential labels `0..len()` to states by their position in
    /// the given traversal order.
    pub fn labels(&self, order: Order) -> HashMap<StateId, usize> {
        self.traverse(order)
            .into_iter()
            .enumerate()
            .map(|(label, id)| (id, label))
            .collect()
    }

    /// Whether `other` has the same shape as this NFA, up to renaming of
    /// states.
    ///
    /// Symbols must agree, successors are matched up positionally, and the
    /// start and accept states must correspond.
    pub fn is_isomorphic(&self, other: &NFA) -> bool {
        if self.len() != other.len() {
            return false;
        }
        if self.is_empty() {
            return true;
        }

        let mut forward: HashMap<StateId, StateId> = HashMap::new();
        let mut backward: HashMap<StateId, StateId> = HashMap::new();
        let mut queue = VecDeque::from([(self.start, other.start)]);
        forward.insert(self.start, other.start);
        backward.insert(other.start, self.start);

        while let Some((a, b)) = queue.pop_front() {
            let (sa, sb) = (&self.states[a], &other.states[b]);
            let shape_a = sa.transitions().map(|(c, t)| (c, t.len()));
            let shape_b = sb.transitions().map(|(c, t)| (c, t.len()));
            if !shape_a.eq(shape_b) || sa.epsilons.len() != sb.epsilons.len()
            {
                return false;
            }
            for (na, nb) in sa.successors().zip(sb.successors()) {
                match (forward.get(&na), backward.get(&nb)) {
                    (Some(&mapped), _) if mapped != nb => return false,
                    (None, Some(_)) => return false,
                    (Some(_), _) => {}
                    (None, None) => {
                        forward.insert(na, nb);
                        backward.insert(nb, na);
                        queue.push_back((na, nb));
                    }
                }
            }
        }

        forward.len() == self.len()
            && forward.get(&self.accept) == Some(&other.accept)
    }
}
