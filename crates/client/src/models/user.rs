//! Customer profile types.

use serde::{Deserialize, Serialize};

use clementine_core::UserId;

/// The authenticated customer's profile, as returned by `GET /users/me/`.
///
/// Fetched after login and cached by the session façade; never mutated
/// locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserializes_without_names() {
        let user: User = serde_json::from_str(
            r#"{"id": 1, "username": "alice", "email": "alice@example.com"}"#,
        )
        .unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.first_name, "");
    }
}
