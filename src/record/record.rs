use crate::dfa::dfa::DFA;
use crate::nfa::nfa::NFA;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// Marker used for epsilon transitions in the exchange format.
pub const EPSILON: &str = "ε";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct TransitionRecord {
    pub from: String,
    pub to: String,
    pub symbol: String,
    pub id: String,
}

impl TransitionRecord {
    fn new(from: String, to: String, symbol: String) -> Self {
        let id = format!("{}_{}_{}", from, to, symbol);
        TransitionRecord {
            from,
            to,
            symbol,
            id,
        }
    }
}

/// Exchange representation of a DFA.
///
/// `states` holds every state that appears in `transitions` plus the start state, sorted by
/// label. Every list except `transitions` is sorted; `transitions` follows the order of the
/// transition function.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct AutomatonRecord {
    pub states: Vec<String>,
    pub start: String,
    pub accepting: Vec<String>,
    pub transitions: Vec<TransitionRecord>,
    pub symbols: Vec<String>,
}

impl AutomatonRecord {
    pub(crate) fn from_dfa(dfa: &DFA) -> Self {
        let mut states: BTreeSet<String> = BTreeSet::new();
        let mut transitions = Vec::with_capacity(dfa.get_transitions().len());
        for ((from_state, symbol), to_state) in dfa.get_transitions() {
            let from = from_state.get_label();
            let to = to_state.get_label();
            states.insert(from.clone());
            states.insert(to.clone());
            transitions.push(TransitionRecord::new(from, to, symbol.to_string()));
        }
        states.insert(dfa.get_start().get_label());

        let accepting: BTreeSet<String> =
            dfa.get_accept().iter().map(|s| s.get_label()).collect();

        AutomatonRecord {
            states: states.into_iter().collect(),
            start: dfa.get_start().get_label(),
            accepting: accepting.into_iter().collect(),
            transitions,
            symbols: dfa.get_alphabet().iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn is_accepting(&self, state: &str) -> bool {
        self.accepting.binary_search_by(|s| s.as_str().cmp(state)).is_ok()
    }

    pub fn get_next_state(&self, state: &str, symbol: &str) -> Option<&str> {
        self.transitions
            .iter()
            .find(|t| t.from == state && t.symbol == symbol)
            .map(|t| t.to.as_str())
    }
}

/// Exchange representation of a Thompson NFA. States are named `n0`, `n1`, ... after their
/// arena index, and epsilon transitions carry the [`EPSILON`] symbol.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct NfaRecord {
    pub states: Vec<String>,
    pub start: String,
    pub accept: String,
    pub transitions: Vec<TransitionRecord>,
}

impl NfaRecord {
    fn state_name(id: usize) -> String {
        format!("n{}", id)
    }

    pub(crate) fn from_nfa(nfa: &NFA) -> Self {
        let mut transitions = Vec::new();
        for id in 0..nfa.num_states() {
            let Some(outgoing) =
                nfa.get_transitions_from_state(&crate::nfa::nfa::State::from_id(id))
            else {
                continue;
            };
            for transition in outgoing {
                let symbol = match transition.get_symbol() {
                    Some(c) => c.to_string(),
                    None => EPSILON.to_string(),
                };
                transitions.push(TransitionRecord::new(
                    Self::state_name(transition.get_from_state().get_id()),
                    Self::state_name(transition.get_to_state().get_id()),
                    symbol,
                ));
            }
        }

        NfaRecord {
            states: (0..nfa.num_states()).map(Self::state_name).collect(),
            start: Self::state_name(nfa.get_start().get_id()),
            accept: Self::state_name(nfa.get_accept().get_id()),
            transitions,
        }
    }
}
