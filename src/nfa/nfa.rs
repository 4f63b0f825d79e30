use std::collections::BTreeSet;
use std::fmt::Debug;

use crate::error_handling::Error::{InternalInvariantViolation, MalformedExpression};
use crate::error_handling::Result;
use crate::parser::Token;
use log::debug;

// Index into the NFA's state arena. Two states are the same state iff their indices are equal.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct State(usize);

impl State {
    pub(crate) fn from_id(id: usize) -> Self {
        State(id)
    }

    pub fn get_id(&self) -> usize {
        self.0
    }
}

#[derive(Clone)]
pub struct Transition {
    from: State,
    to: State,
    symbol: Option<char>, // None is an epsilon transition
}

impl Debug for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.symbol {
            Some(c) => write!(f, "{:?} -> {:?}, symbol: {:?}", self.from, self.to, c),
            None => write!(f, "{:?} -> {:?}, symbol: epsilon", self.from, self.to),
        }
    }
}

impl Transition {
    pub fn get_from_state(&self) -> State {
        self.from
    }

    pub fn get_to_state(&self) -> State {
        self.to
    }

    pub fn get_symbol(&self) -> Option<char> {
        self.symbol
    }

    pub fn is_epsilon(&self) -> bool {
        self.symbol.is_none()
    }
}

// A partially built automaton living inside the arena: one entry state and one accept state.
#[derive(Clone, Copy, Debug)]
struct Fragment {
    start: State,
    accept: State,
}

pub struct NFA {
    start: State,
    accept: State,
    transitions: Vec<Vec<Transition>>, // from_state -> outgoing transitions, in insertion order
}

impl Debug for NFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "NFA( start: {:?}, accept: {:?}, num_states: {}, transitions: {{\n",
            self.start,
            self.accept,
            self.num_states()
        )?;
        for (idx, transitions) in self.transitions.iter().enumerate() {
            if transitions.is_empty() {
                continue;
            }
            write!(f, "\t{:?}:\n", State(idx))?;
            for transition in transitions {
                write!(f, "\t\t{:?}\n", transition)?;
            }
        }
        write!(f, "}} )")
    }
}

impl NFA {
    fn empty() -> Self {
        NFA {
            start: State(0),
            accept: State(0),
            transitions: Vec::new(),
        }
    }

    fn new_state(&mut self) -> State {
        self.transitions.push(Vec::new());
        State(self.transitions.len() - 1)
    }

    fn add_transition(&mut self, from: State, to: State, symbol: Option<char>) {
        self.transitions[from.0].push(Transition { from, to, symbol });
    }

    fn add_epsilon_transition(&mut self, from: State, to: State) {
        self.add_transition(from, to, None);
    }

    fn pop_fragment(stack: &mut Vec<Fragment>, op: &Token) -> Result<Fragment> {
        stack.pop().ok_or_else(|| {
            MalformedExpression(format!("operator '{}' is missing an operand", op.as_char()))
        })
    }
}

// Thompson construction
impl NFA {
    pub fn from_postfix(postfix: &str) -> Result<Self> {
        let tokens = postfix
            .chars()
            .map(Token::from_char)
            .collect::<Result<Vec<Token>>>()?;
        Self::from_postfix_tokens(&tokens)
    }

    pub fn from_postfix_tokens(postfix: &[Token]) -> Result<Self> {
        let mut nfa = NFA::empty();
        let mut stack: Vec<Fragment> = Vec::new();

        for token in postfix {
            match token {
                Token::Literal(c) => {
                    let start = nfa.new_state();
                    let accept = nfa.new_state();
                    nfa.add_transition(start, accept, Some(*c));
                    stack.push(Fragment { start, accept });
                }
                Token::Concat => {
                    let right = Self::pop_fragment(&mut stack, token)?;
                    let left = Self::pop_fragment(&mut stack, token)?;
                    nfa.add_epsilon_transition(left.accept, right.start);
                    stack.push(Fragment {
                        start: left.start,
                        accept: right.accept,
                    });
                }
                Token::Union => {
                    let right = Self::pop_fragment(&mut stack, token)?;
                    let left = Self::pop_fragment(&mut stack, token)?;
                    let start = nfa.new_state();
                    let accept = nfa.new_state();
                    nfa.add_epsilon_transition(start, left.start);
                    nfa.add_epsilon_transition(start, right.start);
                    nfa.add_epsilon_transition(left.accept, accept);
                    nfa.add_epsilon_transition(right.accept, accept);
                    stack.push(Fragment { start, accept });
                }
                Token::Star => {
                    let inner = Self::pop_fragment(&mut stack, token)?;
                    let start = nfa.new_state();
                    let accept = nfa.new_state();
                    nfa.add_epsilon_transition(start, inner.start);
                    nfa.add_epsilon_transition(start, accept);
                    nfa.add_epsilon_transition(inner.accept, inner.start);
                    nfa.add_epsilon_transition(inner.accept, accept);
                    stack.push(Fragment { start, accept });
                }
                Token::LParen | Token::RParen => {
                    return Err(MalformedExpression(format!(
                        "unexpected '{}' in postfix expression",
                        token.as_char()
                    )));
                }
            }
        }

        let fragment = match stack.len() {
            1 => stack[0],
            0 => return Err(MalformedExpression("expression has no operands".to_string())),
            n => {
                return Err(MalformedExpression(format!(
                    "{} operands are not joined by any operator",
                    n
                )))
            }
        };
        nfa.start = fragment.start;
        nfa.accept = fragment.accept;
        if false == nfa.transitions[nfa.accept.0].is_empty() {
            return Err(InternalInvariantViolation(
                "NFA accept state has outgoing transitions",
            ));
        }
        debug!(
            "Built NFA with {} states from {} postfix tokens",
            nfa.num_states(),
            postfix.len()
        );
        Ok(nfa)
    }
}

impl NFA {
    pub fn get_start(&self) -> State {
        self.start
    }

    pub fn get_accept(&self) -> State {
        self.accept
    }

    pub fn num_states(&self) -> usize {
        self.transitions.len()
    }

    pub fn get_transitions_from_state(&self, state: &State) -> Option<&Vec<Transition>> {
        self.transitions.get(state.0)
    }

    // All non-epsilon symbols on transitions reachable from the start state.
    pub fn alphabet(&self) -> BTreeSet<char> {
        let mut symbols = BTreeSet::new();
        let mut visited = vec![false; self.num_states()];
        let mut to_visit = vec![self.start];
        visited[self.start.0] = true;
        while let Some(state) = to_visit.pop() {
            for transition in &self.transitions[state.0] {
                if let Some(c) = transition.symbol {
                    symbols.insert(c);
                }
                if false == visited[transition.to.0] {
                    visited[transition.to.0] = true;
                    to_visit.push(transition.to);
                }
            }
        }
        symbols
    }

    // Returns the sorted set of states reachable from `states` through epsilon transitions only.
    pub fn epsilon_closure(&self, states: &[State]) -> Vec<State> {
        let mut in_closure = vec![false; self.num_states()];
        let mut stack: Vec<State> = Vec::new();
        for state in states {
            if false == in_closure[state.0] {
                in_closure[state.0] = true;
                stack.push(*state);
            }
        }

        while let Some(state) = stack.pop() {
            for transition in &self.transitions[state.0] {
                if transition.is_epsilon() && false == in_closure[transition.to.0] {
                    in_closure[transition.to.0] = true;
                    stack.push(transition.to);
                }
            }
        }

        in_closure
            .iter()
            .enumerate()
            .filter(|(_, included)| **included)
            .map(|(idx, _)| State(idx))
            .collect()
    }

    // Returns the sorted set of states reachable from `states` through one `symbol` transition.
    pub fn move_on(&self, states: &[State], symbol: char) -> Vec<State> {
        let mut targets = BTreeSet::new();
        for state in states {
            for transition in &self.transitions[state.0] {
                if Some(symbol) == transition.symbol {
                    targets.insert(transition.to);
                }
            }
        }
        targets.into_iter().collect()
    }
}
