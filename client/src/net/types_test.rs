use super::*;

fn user_json() -> serde_json::Value {
    serde_json::json!({
        "id": "8d0e-1",
        "aud": "authenticated",
        "email": "ada@example.com",
        "user_metadata": {"full_name": "Ada"},
        "app_metadata": {"provider": "email"}
    })
}

// =============================================================================
// GoTrueUser
// =============================================================================

#[test]
fn user_maps_to_identity_with_opaque_metadata() {
    let user: GoTrueUser = serde_json::from_value(user_json()).unwrap();
    let identity = user.into_identity();
    assert_eq!(identity.id, "8d0e-1");
    assert_eq!(identity.email.as_deref(), Some("ada@example.com"));
    assert_eq!(identity.metadata["user_metadata"]["full_name"], "Ada");
    assert_eq!(identity.metadata["app_metadata"]["provider"], "email");
}

#[test]
fn blank_email_is_dropped() {
    let user: GoTrueUser = serde_json::from_value(serde_json::json!({"id": "x", "email": ""})).unwrap();
    assert!(user.into_identity().email.is_none());
}

// =============================================================================
// TokenResponse / StoredSession
// =============================================================================

#[test]
fn token_response_prefers_absolute_expiry() {
    let body = serde_json::json!({
        "access_token": "at",
        "refresh_token": "rt",
        "expires_in": 3600,
        "expires_at": 2_000_000_000,
        "user": user_json()
    });
    let session = serde_json::from_value::<TokenResponse>(body).unwrap().into_session(100);
    assert_eq!(session.expires_at, 2_000_000_000);
    assert_eq!(session.access_token, "at");
    assert_eq!(session.refresh_token, "rt");
    assert_eq!(session.user.id, "8d0e-1");
}

#[test]
fn token_response_derives_expiry_from_lifetime() {
    let body = serde_json::json!({"access_token": "at", "expires_in": 600, "user": user_json()});
    let session = serde_json::from_value::<TokenResponse>(body).unwrap().into_session(1_000);
    assert_eq!(session.expires_at, 1_600);
    assert!(session.refresh_token.is_empty());
}

#[test]
fn token_response_without_expiry_uses_default_lifetime() {
    let body = serde_json::json!({"access_token": "at", "user": user_json()});
    let session = serde_json::from_value::<TokenResponse>(body).unwrap().into_session(0);
    assert_eq!(session.expires_at, 3600);
}

#[test]
fn needs_refresh_within_margin() {
    let session = StoredSession {
        access_token: "at".into(),
        refresh_token: "rt".into(),
        expires_at: 1_000,
        user: Identity::new("u"),
    };
    assert!(!session.needs_refresh(1_000 - REFRESH_MARGIN_SECS - 1));
    assert!(session.needs_refresh(1_000 - REFRESH_MARGIN_SECS));
    assert!(session.needs_refresh(2_000));
}

#[test]
fn extreme_stored_expiry_does_not_overflow() {
    let mut session = StoredSession {
        access_token: "at".into(),
        refresh_token: "rt".into(),
        expires_at: i64::MIN,
        user: Identity::new("u"),
    };
    assert!(session.needs_refresh(1_700_000_000));
    assert!(session.needs_refresh(i64::MAX));

    session.expires_at = i64::MAX;
    assert!(!session.needs_refresh(1_700_000_000));
    assert!(!session.needs_refresh(i64::MIN + 1));
}

#[test]
fn huge_lifetime_saturates() {
    let body = serde_json::json!({"access_token": "at", "expires_in": i64::MAX, "user": user_json()});
    let session = serde_json::from_value::<TokenResponse>(body).unwrap().into_session(1_700_000_000);
    assert_eq!(session.expires_at, i64::MAX);
    assert!(!session.needs_refresh(1_700_000_000));
}

#[test]
fn stored_session_survives_storage() {
    let session = StoredSession {
        access_token: "at".into(),
        refresh_token: "rt".into(),
        expires_at: 42,
        user: Identity::new("u").with_email("u@example.com"),
    };
    let raw = serde_json::to_string(&session).unwrap();
    assert_eq!(serde_json::from_str::<StoredSession>(&raw).unwrap(), session);
}

// =============================================================================
// GoTrueErrorBody
// =============================================================================

#[test]
fn error_message_precedence() {
    let body: GoTrueErrorBody = serde_json::from_value(serde_json::json!({
        "error": "invalid_grant",
        "error_description": "Invalid login credentials"
    }))
    .unwrap();
    assert_eq!(body.message(), Some("Invalid login credentials"));
    assert!(body.is_invalid_credentials());

    let body: GoTrueErrorBody = serde_json::from_value(serde_json::json!({
        "code": 400,
        "error_code": "invalid_credentials",
        "msg": "Invalid login credentials"
    }))
    .unwrap();
    assert_eq!(body.message(), Some("Invalid login credentials"));
    assert!(body.is_invalid_credentials());
}

#[test]
fn blank_fields_are_skipped() {
    let body: GoTrueErrorBody =
        serde_json::from_value(serde_json::json!({"msg": "  ", "message": "Email not confirmed"})).unwrap();
    assert_eq!(body.message(), Some("Email not confirmed"));
    assert!(!body.is_invalid_credentials());
}
