//! Fixed credential set guarding the query endpoint.
//!
//! The store is built once at startup and only ever read afterwards.
//! Passwords are compared as plaintext for equality; that matches the
//! contract clients already depend on.

use std::collections::BTreeMap;
use std::fmt;

use zeroize::Zeroizing;

/// Account the service accepts when no credentials are configured.
pub const DEFAULT_USERNAME: &str = "john doe";
const DEFAULT_PASSWORD: &str = "john@12345";

/// Errors raised while parsing a `user:password` list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsParseError {
    /// The list contained no entries.
    #[error("credential list must contain at least one user:password entry")]
    Empty,
    /// An entry had no `:` separating username and password.
    #[error("credential entry {index} is missing a ':' separator")]
    MissingSeparator { index: usize },
    /// An entry had a blank username.
    #[error("credential entry {index} has an empty username")]
    EmptyUsername { index: usize },
    /// An entry had an empty password.
    #[error("credential entry {index} has an empty password")]
    EmptyPassword { index: usize },
}

/// Immutable username to password mapping.
///
/// # Examples
/// ```
/// use sqlqa::domain::CredentialStore;
///
/// let store: CredentialStore = "alice:wonderland, bob:builder".parse().unwrap();
/// assert!(store.verify("alice", "wonderland"));
/// assert!(!store.verify("alice", "Wonderland"));
/// assert!(!store.verify("carol", "wonderland"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialStore {
    users: BTreeMap<String, Zeroizing<String>>,
}

impl CredentialStore {
    /// Build a store from `(username, password)` pairs.
    pub fn from_pairs<I, U, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (U, P)>,
        U: Into<String>,
        P: Into<String>,
    {
        let users = pairs
            .into_iter()
            .map(|(user, password)| (user.into(), Zeroizing::new(password.into())))
            .collect();
        Self { users }
    }

    /// Store containing only the built-in account.
    pub fn fallback() -> Self {
        Self::from_pairs([(DEFAULT_USERNAME, DEFAULT_PASSWORD)])
    }

    /// Return `true` iff `username` is known and `password` matches exactly.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|stored| stored.as_str() == password)
    }

    /// Number of configured accounts.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the store has no accounts.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("users", &self.users.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl std::str::FromStr for CredentialStore {
    type Err = CredentialsParseError;

    /// Parse `user:password` entries separated by commas. Usernames are
    /// trimmed; passwords are kept verbatim after the first `:`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut users = BTreeMap::new();
        for (index, entry) in raw.split(',').enumerate() {
            if entry.trim().is_empty() {
                continue;
            }
            let (user, password) = entry
                .split_once(':')
                .ok_or(CredentialsParseError::MissingSeparator { index })?;
            let user = user.trim();
            if user.is_empty() {
                return Err(CredentialsParseError::EmptyUsername { index });
            }
            if password.is_empty() {
                return Err(CredentialsParseError::EmptyPassword { index });
            }
            users.insert(user.to_owned(), Zeroizing::new(password.to_owned()));
        }
        if users.is_empty() {
            return Err(CredentialsParseError::Empty);
        }
        Ok(Self { users })
    }
}
