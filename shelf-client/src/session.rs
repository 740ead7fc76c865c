use std::fmt;

use shelf_model::{LoginResponse, User};
use zeroize::Zeroizing;

use crate::error::{ClientError, Result};

/// Authentication state of one logged-in user.
///
/// Returned by [`ApiClient::authorize`](crate::ApiClient::authorize) and
/// passed by reference to every authenticated call.
#[derive(Clone)]
pub struct Session {
    token: Zeroizing<String>,
    user: Option<User>,
    default_library_id: Option<String>,
}

impl Session {
    /// Session for a token obtained elsewhere, such as an API key.
    pub fn from_token(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(ClientError::MissingAuthorization);
        }
        Ok(Self {
            token: Zeroizing::new(token),
            user: None,
            default_library_id: None,
        })
    }

    #[cfg(test)]
    pub(crate) fn anonymous() -> Self {
        Self {
            token: Zeroizing::new(String::new()),
            user: None,
            default_library_id: None,
        }
    }

    pub(crate) fn from_login(login: LoginResponse) -> Result<Self> {
        let user = login.user().ok_or(ClientError::MissingField("user"))?;
        let token = user
            .token()
            .ok_or(ClientError::MissingField("user.token"))?
            .to_owned();
        Ok(Self {
            token: Zeroizing::new(token),
            default_library_id: login.user_default_library_id().map(str::to_owned),
            user: Some(user),
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().and_then(User::id)
    }

    pub fn default_library_id(&self) -> Option<&str> {
        self.default_library_id.as_deref()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user.as_ref().and_then(User::username))
            .field("default_library_id", &self.default_library_id)
            .field("token", &"<redacted>")
            .finish()
    }
}
