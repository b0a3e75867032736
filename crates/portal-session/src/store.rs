//! Durable credential storage
//!
//! A store holds at most one credential under a single fixed key. Writes are
//! last-write-wins; there is never more than one writer per request.

use crate::credential::Credential;
use crate::error::Result;

/// Read/write access to the single credential slot.
pub trait CredentialStore {
    /// Current credential, if any. An empty stored value counts as absent.
    fn read(&self) -> Result<Option<Credential>>;

    /// Replace the stored credential.
    fn write(&mut self, credential: &Credential) -> Result<()>;

    /// Remove the stored credential. Clearing an empty store succeeds.
    fn clear(&mut self) -> Result<()>;
}

/// In-process store. Used by tests and as a reference implementation.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slot: Option<Credential>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            slot: Some(credential),
            writes: 0,
        }
    }

    /// Number of successful `write`/`clear` calls.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl CredentialStore for MemoryStore {
    fn read(&self) -> Result<Option<Credential>> {
        Ok(self.slot.clone())
    }

    fn write(&mut self, credential: &Credential) -> Result<()> {
        self.slot = Some(credential.clone());
        self.writes += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.slot = None;
        self.writes += 1;
        Ok(())
    }
}
