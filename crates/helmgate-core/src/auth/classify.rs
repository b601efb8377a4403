//! Failure classification: silent redirect vs. user-visible alert.
//!
//! The console's identity endpoint signals a deactivated account with a
//! message that normalizes to `usernotactive`. That case navigates to a
//! dedicated screen with no error banner; every other failure message is
//! surfaced verbatim in the form's alert region.

use tracing::debug;

/// Destination for the silent account-inactive redirect
pub const ACCOUNT_INACTIVE_PATH: &str = "/account-inactive";

/// Normalized form of the server's deactivated-account message.
/// The comparison is a string contract with the server; keep it in sync.
const INACTIVE_SENTINEL: &str = "usernotactive";

/// How a failed authentication attempt should be presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    /// Recognized deactivated-account condition; navigate, show nothing.
    AccountInactive,
    /// Anything else; show the message in the alert region.
    Generic(String),
}

/// Classify a failure response's message.
///
/// The incoming message is compared in a canonical form so casing and
/// word-separator variants ("UserNotActive", "user not active",
/// "USER_NOT_ACTIVE") all hit the same branch. The message surfaced to the
/// user is the untransformed original.
pub fn classify(message: &str) -> AuthFailure {
    if normalize(message) == INACTIVE_SENTINEL {
        debug!("Account inactive - redirecting without alert");
        AuthFailure::AccountInactive
    } else {
        AuthFailure::Generic(message.to_string())
    }
}

/// Strip everything but letters and digits, lowercased
fn normalize(message: &str) -> String {
    message
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_variants() {
        for message in [
            "UserNotActive",
            "usernotactive",
            "user not active",
            "USER_NOT_ACTIVE",
            "User not active.",
            " User\tNot Active ",
        ] {
            assert_eq!(classify(message), AuthFailure::AccountInactive, "{message:?}");
        }
    }

    #[test]
    fn test_generic_keeps_original_message() {
        assert_eq!(
            classify("Invalid credentials"),
            AuthFailure::Generic("Invalid credentials".to_string())
        );
        // Near-misses must not trigger the silent redirect
        assert_eq!(
            classify("user is not active yet"),
            AuthFailure::Generic("user is not active yet".to_string())
        );
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("User Not-Active!"), "usernotactive");
        assert_eq!(normalize(""), "");
    }
}
