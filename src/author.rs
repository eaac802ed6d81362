use serde::Serialize;

use crate::error::AppError;

/// Who wrote a work or a comment.
///
/// Stored as `user_id` / `is_guest` / `guest_nickname` columns; this type is
/// the only way the rest of the crate reads or writes them together.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Author {
    Registered { user_id: i32 },
    Guest { nickname: String },
}

impl Author {
    pub fn registered(user_id: i32) -> Self {
        Self::Registered { user_id }
    }

    pub fn guest(nickname: impl Into<String>) -> Self {
        Self::Guest {
            nickname: nickname.into(),
        }
    }

    pub fn from_columns(
        user_id: Option<i32>,
        is_guest: bool,
        guest_nickname: Option<&str>,
    ) -> Result<Self, AppError> {
        if is_guest {
            return Ok(Self::guest(guest_nickname.unwrap_or_default()));
        }
        match user_id {
            Some(user_id) => Ok(Self::registered(user_id)),
            None => Err(AppError::invalid_author("registered author without user id")),
        }
    }

    pub fn into_columns(self) -> (Option<i32>, bool, Option<String>) {
        match self {
            Self::Registered { user_id } => (Some(user_id), false, None),
            Self::Guest { nickname } => (None, true, Some(nickname)),
        }
    }

    pub fn user_id(&self) -> Option<i32> {
        match self {
            Self::Registered { user_id } => Some(*user_id),
            Self::Guest { .. } => None,
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Self::Guest { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_round_trip() {
        let cols = Author::registered(7).into_columns();
        assert_eq!(cols, (Some(7), false, None));
        let back = Author::from_columns(cols.0, cols.1, cols.2.as_deref()).unwrap();
        assert_eq!(back, Author::registered(7));
        assert_eq!(back.user_id(), Some(7));
    }

    #[test]
    fn guest_round_trip() {
        let cols = Author::guest("night owl").into_columns();
        assert_eq!(cols, (None, true, Some("night owl".to_string())));
        let back = Author::from_columns(cols.0, cols.1, cols.2.as_deref()).unwrap();
        assert!(back.is_guest());
        assert_eq!(back.user_id(), None);
    }

    #[test]
    fn guest_flag_wins_over_stray_user_id() {
        let author = Author::from_columns(Some(3), true, Some("anon")).unwrap();
        assert_eq!(author, Author::guest("anon"));
    }

    #[test]
    fn guest_without_nickname_gets_empty_name() {
        let author = Author::from_columns(None, true, None).unwrap();
        assert_eq!(author, Author::guest(""));
    }

    #[test]
    fn registered_without_user_id_is_rejected() {
        let err = Author::from_columns(None, false, Some("ghost")).unwrap_err();
        assert_eq!(err.code(), 5);
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(Author::guest("mika")).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "guest", "nickname": "mika" }));
    }
}
