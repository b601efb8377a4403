//! Session establishment after a successful authentication response.

use tracing::{info, warn};

use crate::auth::{AuthSession, SessionVault};

use super::Effect;

/// Establish the local session for a successful login.
///
/// Emits the locale-change effect when the user record carries a preferred
/// language, then persists the session under the tier its remember-me flag
/// selects. Token and user are one document, so the write is all-or-nothing.
/// A storage failure is logged but does not fail the login - the in-process
/// flow continues with the session it already has.
pub fn establish(session: &AuthSession, vault: &SessionVault) -> Vec<Effect> {
    let mut effects = Vec::new();

    if let Some(language) = session.user.prefered_language.as_deref() {
        if !language.is_empty() {
            effects.push(Effect::ChangeLocale(language.to_string()));
        }
    }

    if let Err(e) = vault.save(session) {
        warn!(error = %e, "Failed to persist session");
    }

    info!(
        user_id = session.user.id,
        remember_me = session.remember_me,
        "Session established"
    );

    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionStore;
    use crate::models::UserRecord;

    fn user(language: Option<&str>) -> UserRecord {
        UserRecord {
            id: 3,
            email: Some("ops@example.com".to_string()),
            full_name: None,
            role: None,
            prefered_language: language.map(str::to_string),
        }
    }

    #[test]
    fn test_locale_effect_and_persistent_storage() {
        let dir = tempfile::tempdir().expect("tempdir");
        let vault = SessionVault::new(dir.path().to_path_buf());
        let session = AuthSession::new("tok".to_string(), user(Some("fr")), true);

        let effects = establish(&session, &vault);
        assert_eq!(effects, vec![Effect::ChangeLocale("fr".to_string())]);

        let stored = vault.disk().load().expect("load").expect("present");
        assert_eq!(stored.token, "tok");
        assert_eq!(stored.user, session.user);
    }

    #[test]
    fn test_no_language_no_effect_session_scoped_storage() {
        let dir = tempfile::tempdir().expect("tempdir");
        let vault = SessionVault::new(dir.path().to_path_buf());
        let session = AuthSession::new("tok".to_string(), user(None), false);

        let effects = establish(&session, &vault);
        assert!(effects.is_empty());
        assert!(vault.disk().load().expect("load").is_none());
        assert!(vault.memory().load().expect("load").is_some());
    }
}
