//! User identity record returned by the console's login endpoint.

use serde::{Deserialize, Serialize};

/// The user record issued alongside a token on successful login.
///
/// Only `id` is guaranteed by the server; everything else is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "fullName")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// The wire format spells this field "preferedLanguage".
    #[serde(default, rename = "preferedLanguage")]
    pub prefered_language: Option<String>,
}

impl UserRecord {
    /// Best display name available for this user
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("unknown user")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_record() {
        let json = r#"{"id": 42, "fullName": "Ada Lovelace", "email": "ada@example.com", "role": "admin", "preferedLanguage": "fr"}"#;
        let user: UserRecord = serde_json::from_str(json).expect("Failed to parse user record");
        assert_eq!(user.id, 42);
        assert_eq!(user.full_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(user.prefered_language.as_deref(), Some("fr"));
        assert_eq!(user.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_parse_minimal_user_record() {
        let user: UserRecord = serde_json::from_str(r#"{"id": 7}"#).expect("Failed to parse");
        assert_eq!(user.id, 7);
        assert!(user.prefered_language.is_none());
        assert_eq!(user.display_name(), "unknown user");
    }
}
