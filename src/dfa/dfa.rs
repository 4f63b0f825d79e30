use crate::error_handling::Error::InternalInvariantViolation;
use crate::error_handling::Result;
use crate::nfa::nfa::NFA;
use log::{debug, trace};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::fmt::{Debug, Display};
use std::rc::Rc;

// DFA states are numbered in discovery order and labeled `q0`, `q1`, ...
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct State(pub(crate) usize);

impl State {
    pub fn get_label(&self) -> String {
        format!("q{}", self.0)
    }
}

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.0)
    }
}

pub struct DFA {
    start: State,
    accept: BTreeSet<State>,
    states: Vec<State>,
    alphabet: BTreeSet<char>,
    transitions: BTreeMap<(State, char), State>, // partial: missing entries reject
}

impl Debug for DFA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DFA( start: {}, accept: {:?}, states: {:?}, transitions: {{\n",
            self.start, self.accept, self.states
        )?;
        for ((from_state, symbol), to_state) in &self.transitions {
            write!(f, "\t{} -> {}, symbol: {:?}\n", from_state, to_state, symbol)?;
        }
        write!(f, "}} )")
    }
}

impl DFA {
    // Create a DFA holding only the given start state.
    pub(crate) fn new(start: State, alphabet: BTreeSet<char>) -> Self {
        DFA {
            start,
            accept: BTreeSet::new(),
            states: vec![start],
            alphabet,
            transitions: BTreeMap::new(),
        }
    }

    pub(crate) fn add_state(&mut self, state: State) {
        if false == self.states.contains(&state) {
            self.states.push(state);
        }
    }

    pub(crate) fn add_accept_state(&mut self, state: State) {
        self.accept.insert(state);
    }

    // Returns the target previously recorded for (from_state, symbol), if any.
    pub(crate) fn add_transition(
        &mut self,
        from_state: State,
        symbol: char,
        to_state: State,
    ) -> Option<State> {
        self.transitions.insert((from_state, symbol), to_state)
    }
}

impl DFA {
    pub fn get_start(&self) -> State {
        self.start
    }

    pub fn get_accept(&self) -> &BTreeSet<State> {
        &self.accept
    }

    pub fn get_states(&self) -> &[State] {
        &self.states
    }

    pub fn get_alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    pub fn get_transitions(&self) -> &BTreeMap<(State, char), State> {
        &self.transitions
    }

    pub fn get_next_state(&self, state: State, symbol: char) -> Option<State> {
        self.transitions.get(&(state, symbol)).copied()
    }

    pub fn is_accept_state(&self, state: State) -> bool {
        self.accept.contains(&state)
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }
}

// Subset construction
impl DFA {
    pub fn from_nfa(nfa: &NFA) -> Result<DFA> {
        let alphabet = nfa.alphabet();
        trace!("Create DFA ------------------------------");
        trace!("Alphabet: {:?}", alphabet);

        // dfa state id -> set of NFA states it stands for
        let mut dfa_to_nfa_state_mapping: Vec<Rc<Vec<crate::nfa::nfa::State>>> = Vec::new();
        let mut l_nfa_states_to_dfa_mapping: HashMap<Rc<Vec<crate::nfa::nfa::State>>, State> =
            HashMap::new();
        let mut l_worklist: VecDeque<State> = VecDeque::new();

        let start_closure = Rc::new(nfa.epsilon_closure(&[nfa.get_start()]));
        let start = State(0);
        dfa_to_nfa_state_mapping.push(start_closure.clone());
        l_nfa_states_to_dfa_mapping.insert(start_closure, start);
        l_worklist.push_back(start);

        let mut dfa = DFA::new(start, alphabet.clone());

        while let Some(dfa_state) = l_worklist.pop_front() {
            let nfa_states = dfa_to_nfa_state_mapping
                .get(dfa_state.0)
                .cloned()
                .ok_or(InternalInvariantViolation(
                    "DFA state has no underlying NFA state set",
                ))?;
            trace!("Process state {}: {:?}", dfa_state, nfa_states);

            if nfa_states.binary_search(&nfa.get_accept()).is_ok() {
                dfa.add_accept_state(dfa_state);
            }

            for &symbol in &alphabet {
                let destination_nfa_states =
                    nfa.epsilon_closure(&nfa.move_on(&nfa_states, symbol));
                if destination_nfa_states.is_empty() {
                    continue;
                }

                let destination_nfa_states = Rc::new(destination_nfa_states);
                let destination_dfa_state =
                    match l_nfa_states_to_dfa_mapping.get(&destination_nfa_states) {
                        Some(state) => *state,
                        None => {
                            let state = State(dfa_to_nfa_state_mapping.len());
                            trace!("Add state {}: {:?}", state, destination_nfa_states);
                            dfa_to_nfa_state_mapping.push(destination_nfa_states.clone());
                            l_nfa_states_to_dfa_mapping.insert(destination_nfa_states, state);
                            l_worklist.push_back(state);
                            dfa.add_state(state);
                            state
                        }
                    };

                if dfa
                    .add_transition(dfa_state, symbol, destination_dfa_state)
                    .is_some()
                {
                    return Err(InternalInvariantViolation(
                        "DFA transition recorded twice for the same state and symbol",
                    ));
                }
            }
        }

        debug!(
            "Determinized NFA with {} states into DFA with {} states and {} transitions",
            nfa.num_states(),
            dfa.num_states(),
            dfa.transitions.len()
        );
        Ok(dfa)
    }
}
