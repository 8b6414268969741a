//! Unit tests for the session entity

use crate::domain::entities::session::*;

#[test]
fn test_new_session_is_active() {
    let session = Session::new(7);
    assert_eq!(session.user_id, 7);
    assert!(session.is_active());
    assert!(uuid::Uuid::parse_str(&session.session_id).is_ok());
}

#[test]
fn test_session_ids_are_unique() {
    assert_ne!(Session::new(1).session_id, Session::new(1).session_id);
}

#[test]
fn test_revoke_is_terminal_and_idempotent() {
    let mut session = Session::new(1);
    session.revoke();
    assert_eq!(session.state, SessionState::Revoked);
    session.revoke();
    assert!(!session.is_active());
}

#[test]
fn test_state_round_trip_through_strings() {
    assert_eq!("active".parse::<SessionState>(), Ok(SessionState::Active));
    assert_eq!(SessionState::Revoked.to_string(), "revoked");
    assert!("expired".parse::<SessionState>().is_err());
}
