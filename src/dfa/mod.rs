pub(crate) mod dfa;
pub(crate) mod minimize;

#[cfg(feature = "regex-engine")]
pub use dfa::State;
#[cfg(feature = "regex-engine")]
pub use dfa::DFA;
#[cfg(feature = "regex-engine")]
pub use minimize::MinimizedDFA;
