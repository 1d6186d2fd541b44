//! # Login Gate
//!
//! A single fixed credential pair checked by pure string comparison. This
//! is a UI gate, not a security boundary: there is no hashing, no session
//! token and no expiry. The authenticated flag it feeds lives beside the
//! other preference keys (see [`crate::prefs`]).

/// The only accepted username.
pub const ADMIN_USERNAME: &str = "Admin";

/// The only accepted password.
pub const ADMIN_PASSWORD: &str = "Admin000";

/// Checks a credential pair against the fixed constants.
///
/// ## Example
/// ```rust
/// use tillbook_store::auth::verify_credentials;
///
/// assert!(verify_credentials("Admin", "Admin000"));
/// assert!(!verify_credentials("Admin", "wrong"));
/// ```
pub fn verify_credentials(username: &str, password: &str) -> bool {
    username == ADMIN_USERNAME && password == ADMIN_PASSWORD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truth_table() {
        assert!(verify_credentials("Admin", "Admin000"));
        assert!(!verify_credentials("admin", "Admin000")); // case-sensitive
        assert!(!verify_credentials("Admin", "admin000"));
        assert!(!verify_credentials("", ""));
    }
}
