//! State machine trait for status enums.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors define valid state transitions and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// let next = TicketStatus::Pending.transition_to(TicketStatus::Confirmed)?;
/// assert!(!next.is_terminal());
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum DoorState {
        Closed,
        Open,
        Sealed,
    }

    impl StateMachine for DoorState {
        fn can_transition_to(&self, target: &Self) -> bool {
            self.valid_transitions().contains(target)
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use DoorState::*;
            match self {
                Closed => vec![Open, Sealed],
                Open => vec![Closed],
                Sealed => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        assert_eq!(DoorState::Closed.transition_to(DoorState::Open), Ok(DoorState::Open));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        assert!(DoorState::Open.transition_to(DoorState::Sealed).is_err());
    }

    #[test]
    fn is_terminal_only_for_states_without_exits() {
        assert!(DoorState::Sealed.is_terminal());
        assert!(!DoorState::Closed.is_terminal());
        assert!(!DoorState::Open.is_terminal());
    }
}
