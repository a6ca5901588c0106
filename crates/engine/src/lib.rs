pub use accounts::{Accounts, Identity, LoginAttempt};
pub use categories::{DEFAULT_CATEGORIES, default_categories};
pub use error::{AUTH_FAILURE_MESSAGE, EngineError};
pub use export::{EXPORT_FILE_NAME, export};
pub use history::{HistoryQuery, HistoryRow, SortKey, SortOrder, history};
pub use ledger::{Ledger, LedgerStore, MemoryStore, delete_row};
pub use money::Amount;
pub use password::{hash_password, verify_password};
pub use sessions::{Session, Sessions};
pub use summary::{ChartBar, ChartSeries, Summary, aggregate};
pub use transactions::{Transaction, TransactionDraft, parse_date};
use uuid::Uuid;

mod accounts;
mod categories;
mod error;
mod export;
mod history;
mod ledger;
mod money;
mod password;
mod sessions;
mod summary;
mod transactions;

type ResultEngine<T> = Result<T, EngineError>;

/// View state handed to the presentation layer after every read or mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dashboard {
    pub rows: Vec<HistoryRow>,
    pub summary: Summary,
}

impl Dashboard {
    fn derive(sequence: &[Transaction], query: &HistoryQuery) -> ResultEngine<Self> {
        Ok(Self {
            rows: history(sequence, query),
            summary: aggregate(sequence)?,
        })
    }
}

/// Owns accounts, sessions and the ledger for the lifetime of the process.
///
/// All methods are synchronous. Callers sharing an `Engine` across requests
/// must serialize mutations, e.g. behind a single `RwLock`.
#[derive(Debug, Default)]
pub struct Engine {
    accounts: Accounts,
    sessions: Sessions,
    ledger: Ledger,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Checks the credentials and opens a session on success.
    ///
    /// Runs Argon2 while borrowing the engine mutably. Callers sharing the
    /// engine behind a lock should use [`Engine::login_attempt`] and
    /// [`Engine::complete_login`] instead.
    pub fn login(&mut self, username: &str, password: &str) -> ResultEngine<Session> {
        let verified = self.accounts.authenticate(username, password);
        self.complete_login(username, verified)
    }

    /// First half of a split login: the stored credential for `username`.
    pub fn login_attempt(&self, username: &str) -> LoginAttempt {
        self.accounts.attempt(username)
    }

    /// Second half of a split login: opens a session for a verified identity.
    pub fn complete_login(
        &mut self,
        username: &str,
        verified: ResultEngine<Identity>,
    ) -> ResultEngine<Session> {
        match verified {
            Ok(identity) if self.accounts.contains(identity.as_str()) => {
                let session = self.sessions.open(identity);
                tracing::info!(
                    "{} logged in ({} active sessions)",
                    session.identity,
                    self.sessions.len()
                );
                Ok(session)
            }
            Ok(_) => {
                tracing::warn!("failed login for \"{username}\": account no longer exists");
                Err(EngineError::AuthFailure)
            }
            Err(err) => {
                tracing::warn!("failed login for \"{username}\": {err}");
                Err(err)
            }
        }
    }

    pub fn logout(&mut self, token: &Uuid) {
        if let Some(identity) = self.sessions.close(token) {
            tracing::info!("{identity} logged out");
        }
    }

    pub fn current_identity(&self, token: &Uuid) -> Option<Identity> {
        self.sessions.current(token).cloned()
    }

    pub fn transactions(&self, identity: &Identity) -> ResultEngine<&[Transaction]> {
        self.ledger.transactions(identity)
    }

    /// Appends the draft when complete; an incomplete draft leaves the ledger
    /// unchanged and returns `false`.
    pub fn append(&mut self, identity: &Identity, draft: TransactionDraft) -> ResultEngine<bool> {
        let (sequence, appended) = self.ledger.append(identity, draft)?;
        if appended {
            tracing::debug!("{identity} appended row {}", sequence.len() - 1);
        } else {
            tracing::debug!("{identity} sent an incomplete transaction, ignored");
        }
        Ok(appended)
    }

    pub fn delete_row(
        &mut self,
        identity: &Identity,
        index: usize,
    ) -> ResultEngine<Option<Transaction>> {
        let (_, removed) = self.ledger.delete_row(identity, index)?;
        match &removed {
            Some(_) => tracing::debug!("{identity} deleted row {index}"),
            None => tracing::debug!("{identity} asked to delete missing row {index}"),
        }
        Ok(removed)
    }

    pub fn dashboard(&self, identity: &Identity, query: &HistoryQuery) -> ResultEngine<Dashboard> {
        let sequence = self.ledger.transactions(identity)?;
        Dashboard::derive(sequence, query)
    }

    pub fn export(&self, identity: &Identity) -> ResultEngine<Vec<u8>> {
        let sequence = self.ledger.transactions(identity)?;
        let data = export(sequence)?;
        tracing::info!("{identity} exported {} rows ({} bytes)", sequence.len(), data.len());
        Ok(data)
    }
}

#[derive(Clone, Debug)]
enum Credential {
    Plain(String),
    Hashed(String),
}

#[derive(Debug, Default)]
pub struct EngineBuilder {
    accounts: Vec<(String, Credential)>,
}

impl EngineBuilder {
    /// Register an account from a plaintext password. The password is hashed
    /// in [`EngineBuilder::build`].
    pub fn account(mut self, username: &str, password: &str) -> EngineBuilder {
        self.accounts
            .push((username.to_string(), Credential::Plain(password.to_string())));
        self
    }

    /// Register an account from an Argon2 PHC hash.
    pub fn account_hashed(mut self, username: &str, hash: &str) -> EngineBuilder {
        self.accounts
            .push((username.to_string(), Credential::Hashed(hash.to_string())));
        self
    }

    /// Construct `Engine`, provisioning an empty ledger for every account.
    pub fn build(self) -> ResultEngine<Engine> {
        let mut engine = Engine::default();

        for (username, credential) in self.accounts {
            if engine.accounts.contains(&username) {
                tracing::warn!("account \"{username}\" registered twice, keeping the last one");
            }
            let identity = match credential {
                Credential::Plain(password) => engine.accounts.insert(&username, &password)?,
                Credential::Hashed(hash) => engine.accounts.insert_hashed(&username, hash),
            };
            engine.ledger.provision(&identity);
        }

        tracing::debug!(
            "engine ready with {} account(s)",
            engine.accounts.identities().count()
        );
        Ok(engine)
    }
}
