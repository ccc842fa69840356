use super::*;

#[test]
fn error_codes_are_distinct() {
    let errors = [
        AuthError::InvalidCredentials,
        AuthError::NetworkFailure("x".into()),
        AuthError::BackendRejected { status: 500, message: String::new() },
        AuthError::NoActiveSession,
    ];
    let mut codes: Vec<_> = errors.iter().map(AuthError::error_code).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), errors.len());
}

#[test]
fn user_message_is_never_empty() {
    let errors = [
        AuthError::InvalidCredentials,
        AuthError::NetworkFailure(String::new()),
        AuthError::BackendRejected { status: 422, message: "   ".into() },
        AuthError::NoActiveSession,
    ];
    for err in errors {
        assert!(!err.user_message().is_empty(), "empty message for {err:?}");
    }
}

#[test]
fn backend_rejected_surfaces_backend_message() {
    let err = AuthError::BackendRejected { status: 429, message: " Too many requests ".into() };
    assert_eq!(err.user_message(), "Too many requests");
}

#[test]
fn backend_rejected_without_message_mentions_status() {
    let err = AuthError::BackendRejected { status: 503, message: String::new() };
    assert_eq!(err.user_message(), "Sign-in was rejected (status 503).");
}

#[test]
fn display_includes_network_detail() {
    let err = AuthError::NetworkFailure("connection refused".into());
    assert_eq!(err.to_string(), "network failure: connection refused");
}
