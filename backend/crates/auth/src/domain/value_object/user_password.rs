//! User Password Value Object
//!
//! Domain wrappers over `platform::password`: `RawPassword` is user input,
//! `UserPassword` is the stored hash. New hashes are Argon2id; bcrypt hashes
//! of imported accounts still verify.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    ClearTextPassword, HashedPassword, PasswordPolicy, PasswordPolicyError, is_bcrypt_hash,
    verify_bcrypt,
};
use std::fmt;

/// Password as typed by the user, zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Password for a new account, checked against `policy`
    pub fn for_sign_up(raw: String, policy: &PasswordPolicy) -> AppResult<Self> {
        ClearTextPassword::new_checked(raw, policy)
            .map(Self)
            .map_err(policy_error)
    }

    /// Password offered at login; only compared, never validated
    pub fn for_login(raw: String) -> Self {
        Self(ClearTextPassword::new(raw))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

fn policy_error(err: PasswordPolicyError) -> AppError {
    match err {
        PasswordPolicyError::TooShort { .. } => {
            AppError::bad_request(err.to_string()).with_action("Please choose a longer password")
        }
        PasswordPolicyError::TooLong { .. } => {
            AppError::bad_request(err.to_string()).with_action("Please choose a shorter password")
        }
        PasswordPolicyError::EmptyOrWhitespace => {
            AppError::bad_request("Password cannot be empty").with_action("Please enter a password")
        }
        PasswordPolicyError::InvalidCharacter => AppError::bad_request(err.to_string())
            .with_action("Remove control characters from the password"),
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Stored password hash (`users.password`)
#[derive(Clone)]
pub struct UserPassword(String);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw
            .inner()
            .hash(pepper)
            .map_err(|e| AppError::internal("Failed to hash password").with_source(e))?;
        Ok(Self(hashed.as_phc_string().to_string()))
    }

    /// Wrap the column value as-is
    pub fn from_db(stored: impl Into<String>) -> Self {
        Self(stored.into())
    }

    pub fn as_phc_string(&self) -> &str {
        &self.0
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        if is_bcrypt_hash(&self.0) {
            return verify_bcrypt(&self.0, raw.inner());
        }

        match HashedPassword::from_phc_string(self.0.as_str()) {
            Ok(hashed) => hashed.verify(raw.inner(), pepper),
            Err(_) => {
                tracing::warn!("Stored password is neither Argon2 nor bcrypt");
                false
            }
        }
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserPassword").field(&"[HASH]").finish()
    }
}
