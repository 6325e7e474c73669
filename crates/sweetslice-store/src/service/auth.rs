//! # Auth Service
//!
//! Registration and login against the store's user collection.
//!
//! ## Login Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Login Flow                                       │
//! │                                                                         │
//! │  login("Ali@Example.com", "pass")                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  linear scan: email matches case-insensitively?                        │
//! │       │                                                                 │
//! │       ├── no user matched ──────────────┐                              │
//! │       ▼                                 │                              │
//! │  argon2 verify against stored hash      │                              │
//! │       │                                 │                              │
//! │       ├── mismatch ─────────────────────┤                              │
//! │       ▼                                 ▼                              │
//! │  Ok(User)                    Err(InvalidCredentials)                   │
//! │                                                                         │
//! │  One failure variant for both paths: callers cannot enumerate which    │
//! │  emails exist.                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::store::Store;
use sweetslice_core::validation::{validate_email, validate_password, validate_user_name};
use sweetslice_core::{CoreError, Role, User};

// =============================================================================
// Password Hashing
// =============================================================================

/// Hashes a password for storage (argon2, random salt, PHC string output).
pub(crate) fn hash_password(password: &str) -> StoreResult<String> {
    use argon2::{
        password_hash::{rand_core::OsRng, SaltString},
        Argon2, PasswordHasher,
    };

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| StoreError::Credential(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verifies a password against a stored hash.
///
/// An unparseable stored hash verifies as false rather than erroring; a user
/// with a mangled credential simply cannot log in until it is reset.
pub(crate) fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};

    let parsed = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

// =============================================================================
// Auth Service
// =============================================================================

/// Registration and login.
#[derive(Debug, Clone)]
pub struct AuthService {
    store: Arc<Store>,
}

impl AuthService {
    /// Creates a new AuthService over an injected store.
    pub fn new(store: Arc<Store>) -> Self {
        AuthService { store }
    }

    /// Registers a new account and persists it.
    ///
    /// ## Errors
    /// - `Validation` for empty name/password or a malformed email
    /// - `DuplicateEmail` if any existing email matches case-insensitively
    pub fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> StoreResult<User> {
        validate_user_name(name)?;
        validate_email(email)?;
        validate_password(password)?;

        // Hash outside the lock; the scan-insert pair below still runs under
        // one commit scope so two racing registrations cannot both pass the
        // uniqueness check.
        let password_hash = hash_password(password)?;
        let name = name.trim().to_string();
        let email_lower = email.trim().to_lowercase();

        let user = self.store.commit(move |snap| {
            if snap.users.iter().any(|u| u.email == email_lower) {
                return Err(CoreError::DuplicateEmail(email_lower));
            }

            let user = User::new(name, &email_lower, password_hash, role);
            snap.users.push(user.clone());
            Ok(user)
        })?;

        info!(user_id = %user.id, email = %user.email, role = ?user.role, "User registered");
        Ok(user)
    }

    /// Authenticates by email and password.
    ///
    /// Returns the matching user, or `InvalidCredentials` for both unknown
    /// emails and wrong passwords.
    pub fn login(&self, email: &str, password: &str) -> StoreResult<User> {
        let email_lower = email.trim().to_lowercase();
        debug!(email = %email_lower, "Login attempt");

        let user = self.store.read(|snap| {
            snap.users
                .iter()
                .find(|u| u.email == email_lower)
                .cloned()
        });

        match user {
            Some(u) if verify_password(password, &u.password_hash) => {
                info!(user_id = %u.id, "Login succeeded");
                Ok(u)
            }
            _ => {
                warn!(email = %email_lower, "Login failed");
                Err(CoreError::InvalidCredentials.into())
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::DEFAULT_CUSTOMER;

    fn service() -> (tempfile::TempDir, AuthService) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(Store::open(dir.path().join("store.json")).unwrap());
        (dir, AuthService::new(store))
    }

    #[test]
    fn test_register_then_login() {
        let (_dir, auth) = service();

        let registered = auth
            .register("Mona", "mona@example.com", "s3cret", Role::Customer)
            .unwrap();
        assert_eq!(registered.role, Role::Customer);

        let logged_in = auth.login("mona@example.com", "s3cret").unwrap();
        assert_eq!(logged_in.id, registered.id);
    }

    #[test]
    fn test_register_lowercases_email() {
        let (_dir, auth) = service();

        let user = auth
            .register("Mona", "Mona@Example.COM", "s3cret", Role::Customer)
            .unwrap();
        assert_eq!(user.email, "mona@example.com");

        // Login is case-insensitive either way.
        assert!(auth.login("MONA@EXAMPLE.COM", "s3cret").is_ok());
    }

    #[test]
    fn test_duplicate_email_any_case() {
        let (_dir, auth) = service();

        auth.register("Mona", "mona@example.com", "s3cret", Role::Customer)
            .unwrap();
        let err = auth
            .register("Other", "MONA@example.com", "other", Role::Customer)
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::Core(CoreError::DuplicateEmail(_))
        ));
    }

    #[test]
    fn test_wrong_password_and_unknown_email_look_identical() {
        let (_dir, auth) = service();

        auth.register("Mona", "mona@example.com", "s3cret", Role::Customer)
            .unwrap();

        let wrong_pw = auth.login("mona@example.com", "nope").unwrap_err();
        let unknown = auth.login("ghost@example.com", "nope").unwrap_err();

        assert_eq!(wrong_pw.to_string(), unknown.to_string());
    }

    #[test]
    fn test_seeded_customer_can_login() {
        let (_dir, auth) = service();
        let (email, password) = DEFAULT_CUSTOMER;

        let user = auth.login(email, password).unwrap();
        assert_eq!(user.name, "Ali");
        assert_eq!(user.role, Role::Customer);
    }

    #[test]
    fn test_register_rejects_malformed_input() {
        let (_dir, auth) = service();

        assert!(auth.register("", "a@b.com", "pw", Role::Customer).is_err());
        assert!(auth.register("A", "not-an-email", "pw", Role::Customer).is_err());
        assert!(auth.register("A", "a@b.com", "", Role::Customer).is_err());
    }

    #[test]
    fn test_registration_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        {
            let store = Arc::new(Store::open(&path).unwrap());
            AuthService::new(store)
                .register("Mona", "mona@example.com", "s3cret", Role::Customer)
                .unwrap();
        }

        let store = Arc::new(Store::open(&path).unwrap());
        assert!(AuthService::new(store).login("mona@example.com", "s3cret").is_ok());
    }
}
