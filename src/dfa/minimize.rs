//! Moore partition refinement over a [`DFA`].
//!
//! The states start out split into accepting and non-accepting groups. Every pass splits each
//! group by the groups its members' transitions land in, until a whole pass splits nothing.

use super::dfa::{State, DFA};
use crate::error_handling::Error::InternalInvariantViolation;
use crate::error_handling::Result;
use log::{debug, trace};
use std::collections::{BTreeMap, BTreeSet, HashMap};

pub(crate) type StateGroup = BTreeSet<State>;
pub(crate) type Partition = Vec<StateGroup>;

// For each symbol of the sorted alphabet, the group the transition lands in. `None` stands for a
// missing transition.
type Signature = Vec<Option<usize>>;

pub struct MinimizedDFA {
    representatives: BTreeMap<State, State>,
    dfa: DFA,
}

impl MinimizedDFA {
    /// Maps every state of the unminimized DFA to the representative of its equivalence class.
    pub fn get_representatives(&self) -> &BTreeMap<State, State> {
        &self.representatives
    }

    pub fn get_dfa(&self) -> &DFA {
        &self.dfa
    }

    pub fn into_dfa(self) -> DFA {
        self.dfa
    }
}

impl DFA {
    pub fn minimize(&self) -> Result<MinimizedDFA> {
        trace!("Minimize DFA ----------------------------");
        trace!("Initial DFA:\n{:?}", self);
        let mut partition = self.calculate_initial_partition();
        Self::trace_partition("initial", &partition);

        let mut num_passes = 0usize;
        loop {
            num_passes += 1;
            let (new_partition, changed) = self.calculate_new_partition(&partition);
            partition = new_partition;
            Self::trace_partition("new", &partition);
            if false == changed {
                break;
            }
        }

        let minimized = self.create_from_partition(&partition)?;
        debug!(
            "Minimized DFA from {} to {} states in {} passes",
            self.num_states(),
            minimized.dfa.num_states(),
            num_passes
        );
        Ok(minimized)
    }

    fn trace_partition(context: &str, partition: &[StateGroup]) {
        trace!("Partition {}:", context);
        for (i, group) in partition.iter().enumerate() {
            trace!("Group {}: {:?}", i, group);
        }
    }

    // Accepting states first, then the rest. Empty groups are dropped.
    fn calculate_initial_partition(&self) -> Partition {
        let (accepting, non_accepting): (StateGroup, StateGroup) = self
            .get_states()
            .iter()
            .copied()
            .partition(|state| self.is_accept_state(*state));
        vec![accepting, non_accepting]
            .into_iter()
            .filter(|group| false == group.is_empty())
            .collect()
    }

    fn calculate_new_partition(&self, partition: &[StateGroup]) -> (Partition, bool) {
        let group_of: HashMap<State, usize> = partition
            .iter()
            .enumerate()
            .flat_map(|(idx, group)| group.iter().map(move |state| (*state, idx)))
            .collect();

        let mut new_partition = Partition::new();
        let mut changed = false;
        for (index, group) in partition.iter().enumerate() {
            let sub_groups = self.split_group(index, group, &group_of);
            if sub_groups.len() > 1 {
                changed = true;
            }
            new_partition.extend(sub_groups);
        }
        (new_partition, changed)
    }

    fn split_group(
        &self,
        group_index: usize,
        group: &StateGroup,
        group_of: &HashMap<State, usize>,
    ) -> Partition {
        if group.len() == 1 {
            return vec![group.clone()];
        }
        trace!("Split group {}: {:?}", group_index, group);
        let mut signature_to_states: BTreeMap<Signature, StateGroup> = BTreeMap::new();
        for state in group {
            signature_to_states
                .entry(self.build_signature(*state, group_of))
                .or_default()
                .insert(*state);
        }
        signature_to_states.into_values().collect()
    }

    fn build_signature(&self, state: State, group_of: &HashMap<State, usize>) -> Signature {
        let signature: Signature = self
            .get_alphabet()
            .iter()
            .map(|symbol| {
                self.get_next_state(state, *symbol)
                    .and_then(|target| group_of.get(&target).copied())
            })
            .collect();
        trace!("Signature of {}: {:?}", state, signature);
        signature
    }

    fn create_from_partition(&self, partition: &[StateGroup]) -> Result<MinimizedDFA> {
        let mut representatives: BTreeMap<State, State> = BTreeMap::new();
        for group in partition {
            // Smallest label, not smallest id: `q10` is picked over `q2`.
            let representative = group
                .iter()
                .min_by_key(|state| state.get_label())
                .copied()
                .ok_or(InternalInvariantViolation("empty group in partition"))?;
            for state in group {
                representatives.insert(*state, representative);
            }
        }

        let start = representatives
            .get(&self.get_start())
            .copied()
            .ok_or(InternalInvariantViolation("start state has no representative"))?;
        let mut dfa = DFA::new(start, self.get_alphabet().clone());

        let mut representative_states: Vec<State> = representatives.values().copied().collect();
        representative_states.sort();
        representative_states.dedup();
        for state in representative_states {
            dfa.add_state(state);
        }

        for ((from_state, symbol), to_state) in self.get_transitions() {
            let (Some(from_rep), Some(to_rep)) = (
                representatives.get(from_state),
                representatives.get(to_state),
            ) else {
                continue;
            };
            if let Some(previous) = dfa.add_transition(*from_rep, *symbol, *to_rep) {
                if previous != *to_rep {
                    return Err(InternalInvariantViolation(
                        "equivalent states disagree on a transition target",
                    ));
                }
            }
        }

        for state in self.get_accept() {
            let representative = representatives.get(state).copied().ok_or(
                InternalInvariantViolation("accepting state has no representative"),
            )?;
            dfa.add_accept_state(representative);
        }

        Ok(MinimizedDFA {
            representatives,
            dfa,
        })
    }
}
