//! Draft lifecycle transition rules.
//!
//! Every status mutation goes through [`validate_transition`]; handlers never
//! write a status the table below does not allow. There are no automatic
//! transitions and no timers — a rejected or withdrawn draft sits until its
//! owner acts.

use crate::errors::AppError;

use super::types::DraftStatus;

/// Who is attempting the transition, relative to the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Owner,
    Reviewer,
}

/// Check one status transition against the lifecycle table.
///
/// | From     | To       | Actor    |
/// |----------|----------|----------|
/// | DRAFT    | PENDING  | owner    |
/// | REJECTED | PENDING  | owner    |
/// | PENDING  | DRAFT    | owner (withdraw) |
/// | PENDING  | APPROVED | reviewer |
/// | PENDING  | REJECTED | reviewer |
pub fn validate_transition(
    from: DraftStatus,
    to: DraftStatus,
    actor: Actor,
) -> Result<(), AppError> {
    use DraftStatus::*;

    let allowed = match (from, to) {
        (Draft, Pending) | (Rejected, Pending) => actor == Actor::Owner,
        (Pending, Draft) => actor == Actor::Owner,
        (Pending, Approved) | (Pending, Rejected) => actor == Actor::Reviewer,
        _ => false,
    };

    if allowed {
        Ok(())
    } else {
        Err(AppError::InvalidTransition(format!(
            "Cannot move draft from {} to {}",
            from.as_str(),
            to.as_str()
        )))
    }
}

/// Owner deletion is allowed for every status except APPROVED — an approved
/// draft is the provenance record of a live listing.
pub fn validate_delete(status: DraftStatus) -> Result<(), AppError> {
    if status == DraftStatus::Approved {
        Err(AppError::InvalidTransition(
            "Approved drafts cannot be deleted".to_string(),
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use DraftStatus::*;

    #[test]
    fn owner_submits_and_withdraws() {
        assert!(validate_transition(Draft, Pending, Actor::Owner).is_ok());
        assert!(validate_transition(Pending, Draft, Actor::Owner).is_ok());
        assert!(validate_transition(Rejected, Pending, Actor::Owner).is_ok());
    }

    #[test]
    fn only_reviewer_decides() {
        assert!(validate_transition(Pending, Approved, Actor::Reviewer).is_ok());
        assert!(validate_transition(Pending, Rejected, Actor::Reviewer).is_ok());
        assert!(validate_transition(Pending, Approved, Actor::Owner).is_err());
        assert!(validate_transition(Pending, Rejected, Actor::Owner).is_err());
    }

    #[test]
    fn terminal_states_stay_put() {
        assert!(validate_transition(Approved, Draft, Actor::Owner).is_err());
        assert!(validate_transition(Approved, Pending, Actor::Owner).is_err());
        assert!(validate_transition(Rejected, Approved, Actor::Reviewer).is_err());
        assert!(validate_transition(Draft, Approved, Actor::Reviewer).is_err());
    }

    #[test]
    fn approved_is_delete_protected() {
        assert!(validate_delete(Approved).is_err());
        assert!(validate_delete(Draft).is_ok());
        assert!(validate_delete(Pending).is_ok());
        assert!(validate_delete(Rejected).is_ok());
    }
}
