//! The user entity.

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// A stored user.
///
/// `id` is assigned by the store on insert and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct User {
    /// Store-assigned primary key.
    pub id: UserId,
    /// Free-form display name.
    pub name: String,
    /// Age in years. No range is enforced here.
    pub age: i32,
}

/// The client-supplied fields of a user, used by create and update.
///
/// Both fields are required. Any other field in the body, including `id`,
/// is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    pub name: String,
    pub age: i32,
}

impl UserDraft {
    /// Attach a store-assigned ID.
    #[must_use]
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            age: self.age,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serializes_flat() {
        let user = User {
            id: UserId::new(1),
            name: "Ann".to_string(),
            age: 30,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "name": "Ann", "age": 30}));
    }

    #[test]
    fn test_draft_ignores_client_id() {
        let draft: UserDraft =
            serde_json::from_str(r#"{"id": 99, "name": "Bob", "age": 41}"#).unwrap();
        assert_eq!(draft.name, "Bob");
        assert_eq!(draft.age, 41);
        assert_eq!(draft.with_id(UserId::new(3)).id, UserId::new(3));
    }

    #[test]
    fn test_draft_ignores_unknown_fields() {
        let draft: UserDraft =
            serde_json::from_str(r#"{"name": "Cy", "age": 0, "email": "x"}"#).unwrap();
        assert_eq!(draft.age, 0);
    }

    #[test]
    fn test_draft_accepts_negative_age() {
        let draft: UserDraft = serde_json::from_str(r#"{"name": "Dee", "age": -4}"#).unwrap();
        assert_eq!(draft.age, -4);
    }

    #[test]
    fn test_draft_requires_both_fields() {
        assert!(serde_json::from_str::<UserDraft>(r#"{"name": "Eve"}"#).is_err());
        assert!(serde_json::from_str::<UserDraft>(r#"{"age": 5}"#).is_err());
    }

    #[test]
    fn test_draft_rejects_wrong_types() {
        assert!(serde_json::from_str::<UserDraft>(r#"{"name": "Fay", "age": "ten"}"#).is_err());
        assert!(serde_json::from_str::<UserDraft>(r#"{"name": 7, "age": 10}"#).is_err());
    }
}
