//! Site header view model
//!
//! The header shows the logo linking home and, on the right, either a
//! sign-in link or the user menu depending on the session passed in.

use menutree_types::SessionContext;
use serde::Serialize;

/// Link target of the logo
pub const HOME_HREF: &str = "/";

/// Link target of the sign-in button
pub const SIGN_IN_HREF: &str = "/auth";

/// What the right-hand side of the header shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HeaderAction {
    SignIn { href: String, label: String },
    UserMenu { name: String, image: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub home_href: String,
    pub action: HeaderAction,
}

impl HeaderView {
    pub fn for_session(session: &SessionContext) -> Self {
        let action = match session.user() {
            None => HeaderAction::SignIn {
                href: SIGN_IN_HREF.to_string(),
                label: "Sign In".to_string(),
            },
            Some(user) => HeaderAction::UserMenu {
                name: user.display_name().to_string(),
                image: user.image.clone(),
            },
        };

        Self {
            home_href: HOME_HREF.to_string(),
            action,
        }
    }
}
