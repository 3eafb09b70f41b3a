//! Item state definitions for tracking harvest progress
//!
//! Every target page moves through these states exactly once per run.
use crate::HarvestError;
use std::fmt;

/// Represents the current state of one target page in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemState {
    // ===== Active States =====
    /// Target is waiting its turn
    Pending,

    /// Target is being fetched (including retries)
    Fetching,

    /// Page was fetched and its document tree built
    Extracted,

    // ===== Terminal Success States =====
    /// Document had content and was exported
    Saved,

    // ===== Terminal Error States =====
    /// All fetch attempts failed
    FetchFailed,

    /// Page was fetched but yielded zero sections
    NoContent,

    /// Document had content but exporting it failed
    SaveFailed,
}

impl ItemState {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending | Self::Fetching | Self::Extracted)
    }

    /// Returns true if this represents a successful completion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Saved)
    }

    /// Returns true if this is a terminal failure recorded in the failed list
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::FetchFailed | Self::NoContent | Self::SaveFailed)
    }

    /// Returns true if `next` may follow this state
    pub fn can_transition_to(&self, next: ItemState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Fetching)
                | (Self::Fetching, Self::FetchFailed)
                | (Self::Fetching, Self::Extracted)
                | (Self::Extracted, Self::NoContent)
                | (Self::Extracted, Self::Saved)
                | (Self::Extracted, Self::SaveFailed)
        )
    }

    /// Moves to `next`, rejecting transitions the state machine does not allow
    pub fn transition_to(self, next: ItemState) -> Result<ItemState, HarvestError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(HarvestError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fetching => "fetching",
            Self::Extracted => "extracted",
            Self::Saved => "saved",
            Self::FetchFailed => "fetch_failed",
            Self::NoContent => "no_content",
            Self::SaveFailed => "save_failed",
        }
    }
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_terminal() {
        assert!(!ItemState::Pending.is_terminal());
        assert!(!ItemState::Fetching.is_terminal());
        assert!(!ItemState::Extracted.is_terminal());

        assert!(ItemState::Saved.is_terminal());
        assert!(ItemState::FetchFailed.is_terminal());
        assert!(ItemState::NoContent.is_terminal());
        assert!(ItemState::SaveFailed.is_terminal());
    }

    #[test]
    fn test_success_and_failure_are_disjoint() {
        assert!(ItemState::Saved.is_success());
        assert!(!ItemState::Saved.is_failure());

        for state in [
            ItemState::FetchFailed,
            ItemState::NoContent,
            ItemState::SaveFailed,
        ] {
            assert!(state.is_failure());
            assert!(!state.is_success());
        }
    }

    #[test]
    fn test_happy_path_transitions() {
        let state = ItemState::Pending
            .transition_to(ItemState::Fetching)
            .and_then(|s| s.transition_to(ItemState::Extracted))
            .and_then(|s| s.transition_to(ItemState::Saved))
            .unwrap();
        assert_eq!(state, ItemState::Saved);
    }

    #[test]
    fn test_invalid_transitions() {
        assert!(ItemState::Pending.transition_to(ItemState::Saved).is_err());
        assert!(ItemState::Fetching.transition_to(ItemState::NoContent).is_err());
        assert!(ItemState::Saved.transition_to(ItemState::Fetching).is_err());

        match ItemState::FetchFailed.transition_to(ItemState::Extracted) {
            Err(HarvestError::InvalidTransition { from, to }) => {
                assert_eq!(from, ItemState::FetchFailed);
                assert_eq!(to, ItemState::Extracted);
            }
            other => panic!("expected invalid transition, got {:?}", other),
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ItemState::NoContent), "no_content");
        assert_eq!(format!("{}", ItemState::Saved), "saved");
    }
}
