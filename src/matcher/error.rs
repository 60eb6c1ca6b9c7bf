use crate::matcher::MatcherState;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("matching aborted after {failures} consecutive unmatched samples")]
    Aborted {
        failures: usize,
        state: Box<MatcherState>,
    },
}

impl MatchError {
    /// The state reached before matching was aborted.
    pub fn into_state(self) -> MatcherState {
        match self {
            MatchError::Aborted { state, .. } => *state,
        }
    }
}
