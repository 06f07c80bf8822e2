//! Session context
//!
//! Resolving a session is the auth layer's job. Everything downstream only
//! ever sees the resolved, read-only [`SessionContext`].

use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// The signed-in user as exposed by the auth layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Avatar URL
    #[serde(default)]
    pub image: Option<String>,
}

impl SessionUser {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            name: None,
            email: None,
            image: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Name to show in the UI: the profile name, then the email, then the id.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or_else(|| self.id.as_str())
    }
}

/// Read-only session state handed to session-dependent views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    user: Option<SessionUser>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn signed_in(user: SessionUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_email_then_id() {
        let user = SessionUser::new(UserId::new("u-1"));
        assert_eq!(user.display_name(), "u-1");

        let user = user.with_email("joe@example.com");
        assert_eq!(user.display_name(), "joe@example.com");

        let user = user.with_name("Joe");
        assert_eq!(user.display_name(), "Joe");
    }

    #[test]
    fn anonymous_session_has_no_user() {
        let session = SessionContext::anonymous();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }
}
