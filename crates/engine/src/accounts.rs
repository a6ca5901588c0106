//! Credential store. Maps usernames to Argon2 password hashes and turns a
//! matching username/password pair into an [`Identity`].

use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    EngineError, ResultEngine,
    password::{hash_password, verify_password},
};

/// Opaque authenticated identity. Keys every piece of per-user state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(username: impl Into<String>) -> Self {
        Self(username.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A username and its stored hash, detached from [`Accounts`] so the slow
/// Argon2 check can run without borrowing the credential store.
#[derive(Clone, Debug)]
pub struct LoginAttempt {
    username: String,
    hash: Option<String>,
}

impl LoginAttempt {
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Unknown usernames and wrong passwords produce the same
    /// [`EngineError::AuthFailure`].
    pub fn verify(&self, password: &str) -> ResultEngine<Identity> {
        let Some(hash) = &self.hash else {
            return Err(EngineError::AuthFailure);
        };

        if verify_password(password, hash)? {
            Ok(Identity::new(&self.username))
        } else {
            Err(EngineError::AuthFailure)
        }
    }
}

#[derive(Debug, Default)]
pub struct Accounts {
    hashes: HashMap<String, String>,
}

impl Accounts {
    /// Hashes `password` and stores it under `username`, replacing any
    /// previous credential.
    pub fn insert(&mut self, username: &str, password: &str) -> ResultEngine<Identity> {
        let hash = hash_password(password)?;
        Ok(self.insert_hashed(username, hash))
    }

    /// Stores an already hashed (PHC string) credential.
    pub fn insert_hashed(&mut self, username: &str, hash: impl Into<String>) -> Identity {
        self.hashes.insert(username.to_string(), hash.into());
        Identity::new(username)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.hashes.contains_key(username)
    }

    pub fn identities(&self) -> impl Iterator<Item = Identity> + '_ {
        self.hashes.keys().map(Identity::new)
    }

    pub fn attempt(&self, username: &str) -> LoginAttempt {
        LoginAttempt {
            username: username.to_string(),
            hash: self.hashes.get(username).cloned(),
        }
    }

    /// See [`LoginAttempt::verify`].
    pub fn authenticate(&self, username: &str, password: &str) -> ResultEngine<Identity> {
        self.attempt(username).verify(password)
    }
}
