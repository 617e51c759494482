#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeStatus {
    #[default]
    Unknown,
    Checking,
    Available,
    Unavailable,
}

/// Availability tracking for one debounced field. Every edit bumps the
/// sequence; a completion carrying an older sequence is discarded, so a
/// stale answer is never applied over newer input.
#[derive(Debug, Clone, Default)]
pub struct ProbeState {
    seq: u64,
    status: ProbeStatus,
}

impl ProbeState {
    pub fn status(&self) -> ProbeStatus {
        self.status
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The watched value changed; anything in flight is now stale.
    pub fn invalidate(&mut self) {
        self.seq = self.seq.wrapping_add(1);
        self.status = ProbeStatus::Unknown;
    }

    /// A check is being dispatched for the current value; returns the
    /// sequence the completion must echo.
    pub fn begin_check(&mut self) -> u64 {
        self.status = ProbeStatus::Checking;
        self.seq
    }

    /// Applies a completion unless it is stale. `Err` from the predicate
    /// maps to `Unknown`; the caller logs it.
    pub fn apply(&mut self, seq: u64, result: Result<bool, String>) -> bool {
        if seq != self.seq {
            return false;
        }
        self.status = match result {
            Ok(true) => ProbeStatus::Available,
            Ok(false) => ProbeStatus::Unavailable,
            Err(_) => ProbeStatus::Unknown,
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{ProbeState, ProbeStatus};

    #[test]
    fn applies_result_for_current_sequence() {
        let mut state = ProbeState::default();
        let seq = state.begin_check();
        assert_eq!(state.status(), ProbeStatus::Checking);

        assert!(state.apply(seq, Ok(true)));
        assert_eq!(state.status(), ProbeStatus::Available);
    }

    #[test]
    fn stale_result_is_never_applied_over_newer_input() {
        let mut state = ProbeState::default();
        let stale = state.begin_check();

        // New keystroke arrives before the first check resolves.
        state.invalidate();
        let current = state.begin_check();

        assert!(!state.apply(stale, Ok(false)));
        assert_eq!(state.status(), ProbeStatus::Checking);

        assert!(state.apply(current, Ok(true)));
        assert_eq!(state.status(), ProbeStatus::Available);
    }

    #[test]
    fn predicate_failure_maps_to_unknown() {
        let mut state = ProbeState::default();
        let seq = state.begin_check();
        assert!(state.apply(seq, Err("check offline".to_string())));
        assert_eq!(state.status(), ProbeStatus::Unknown);
    }
}
