//! Lock-guarded registry handle for multi-threaded hosts.
//!
//! Every operation holds one global lock for its whole duration, so calls from
//! any number of threads are applied in a single total order and each one is
//! all-or-nothing, exactly as on a serializing host.

use crate::config::PopConfig;
use crate::identity::Identity;
use crate::ledger::{CredentialId, Ledger, MemoryLedger};
use crate::pop::Pop;
use crate::promise::{BurnAuth, PromiseClass, PromiseDeclaration, PromiseHash};
use crate::{PopError, PopResult};
use std::sync::{Arc, Mutex, MutexGuard};

pub struct SharedPop<L: Ledger = MemoryLedger> {
    inner: Arc<Mutex<Pop<L>>>,
}

impl<L: Ledger> Clone for SharedPop<L> {
    fn clone(&self) -> Self {
        SharedPop {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SharedPop<MemoryLedger> {
    pub fn new(config: PopConfig) -> Self {
        Self::from_pop(Pop::with_config(config))
    }
}

impl<L: Ledger> SharedPop<L> {
    pub fn from_pop(pop: Pop<L>) -> Self {
        SharedPop {
            inner: Arc::new(Mutex::new(pop)),
        }
    }

    fn lock(&self) -> PopResult<MutexGuard<'_, Pop<L>>> {
        self.inner.lock().map_err(|_| PopError::LockError)
    }

    pub fn create_promise(&self, caller: &Identity, decl: PromiseDeclaration) -> PopResult<()> {
        self.lock()?.create_promise(caller, decl)
    }

    pub fn sign_promise(&self, caller: &Identity, hash: &PromiseHash) -> PopResult<CredentialId> {
        self.lock()?.sign_promise(caller, hash)
    }

    pub fn burn_token(&self, caller: &Identity, id: CredentialId, hash: &PromiseHash) -> PopResult<()> {
        self.lock()?.burn_token(caller, id, hash)
    }

    /// A copy of the stored class; the lock is released on return.
    pub fn get_promise(&self, hash: &PromiseHash) -> PopResult<PromiseClass> {
        self.lock()?.get_promise(hash).cloned()
    }

    pub fn owner_of(&self, id: CredentialId) -> PopResult<Identity> {
        self.lock()?.owner_of(id)
    }

    pub fn burn_auth_of(&self, id: CredentialId) -> PopResult<BurnAuth> {
        self.lock()?.burn_auth_of(id)
    }

    /// Run `f` against the registry while holding the lock.
    pub fn with<R>(&self, f: impl FnOnce(&Pop<L>) -> R) -> PopResult<R> {
        Ok(f(&*self.lock()?))
    }
}
