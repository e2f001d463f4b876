//! Bearer credential resolution.
//!
//! The credential is `Authorization: Bearer <user-id>` where the user id is a
//! positive decimal integer. Parsing the integer is the *only* check made.
//! There is no signature and no secret, so anyone can claim any id. This is
//! insecure by design and stands in for real token verification.

use std::fmt;

use tracing::{debug, warn};

use crate::error::AuthError;

const SCHEME: &str = "Bearer";

/// A validated user identifier.
///
/// Keeps the credential's exact spelling (`"007"` stays `"007"`) next to the
/// parsed number used for role classification.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct UserIdentity {
    raw: String,
    id: u64,
}

impl UserIdentity {
    /// Resolves an `Authorization` header value into an identity.
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingCredential`] when the header is absent or blank.
    /// - [`AuthError::EmptyIdentity`] when nothing follows the `Bearer` scheme.
    /// - [`AuthError::MalformedIdentity`] when the scheme is wrong or the
    ///   token is not a positive integer.
    pub fn resolve(header: Option<&str>) -> Result<Self, AuthError> {
        let result = Self::parse(header);
        match &result {
            Ok(identity) => debug!(user_id = %identity, "credential resolved"),
            Err(e) => warn!(error = %e, "credential rejected"),
        }
        result
    }

    fn parse(header: Option<&str>) -> Result<Self, AuthError> {
        let value = header.map(str::trim).unwrap_or_default();
        if value.is_empty() {
            return Err(AuthError::MissingCredential);
        }

        let token = match value.strip_prefix(SCHEME) {
            Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim(),
            _ => return Err(AuthError::MalformedIdentity(value.to_owned())),
        };
        if token.is_empty() {
            return Err(AuthError::EmptyIdentity);
        }

        if !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AuthError::MalformedIdentity(token.to_owned()));
        }
        match token.parse::<u64>() {
            Ok(id) if id > 0 => Ok(Self { raw: token.to_owned(), id }),
            _ => Err(AuthError::MalformedIdentity(token.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
