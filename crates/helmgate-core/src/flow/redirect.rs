//! Post-login destination resolution.
//!
//! The navigational context that brought the user to the login screen may
//! carry a URL-encoded `redirectTo` query parameter (a deep link into the
//! console). After a successful login that path wins; otherwise the user
//! lands on the root. Failures never consult this module.

use tracing::debug;

/// Where a successful login lands when no deep link was supplied
pub const DEFAULT_LANDING_PATH: &str = "/";

/// Query parameter carrying the deep-link destination
const REDIRECT_PARAM: &str = "redirectTo";

/// Resolve the post-login destination from the raw query string.
///
/// The decoded path is used as-is: no allow-list or same-origin check is
/// applied before navigating.
pub fn resolve(query: Option<&str>) -> String {
    let Some(query) = query else {
        return DEFAULT_LANDING_PATH.to_string();
    };

    let target = url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| key == REDIRECT_PARAM && !value.is_empty())
        .map(|(_, value)| value.into_owned());

    match target {
        Some(path) => {
            debug!(path = %path, "Honoring deep-link redirect");
            path
        }
        None => DEFAULT_LANDING_PATH.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deep_link_is_decoded() {
        assert_eq!(resolve(Some("redirectTo=%2Fsettings")), "/settings");
        assert_eq!(
            resolve(Some("redirectTo=%2Fsettings%2Fteam%3Ftab%3Dbilling")),
            "/settings/team?tab=billing"
        );
    }

    #[test]
    fn test_missing_or_empty_falls_back_to_root() {
        assert_eq!(resolve(None), "/");
        assert_eq!(resolve(Some("")), "/");
        assert_eq!(resolve(Some("redirectTo=")), "/");
        assert_eq!(resolve(Some("theme=dark")), "/");
    }

    #[test]
    fn test_other_params_are_ignored() {
        assert_eq!(
            resolve(Some("theme=dark&redirectTo=%2Fusers&lang=fr")),
            "/users"
        );
    }
}
