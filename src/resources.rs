//! Pending-resource barrier that gates the first frame.
//!
//! Every asynchronous load takes a [`LoadTicket`] before it starts and
//! resolves it when the platform reports back. The frame host only starts
//! once no ticket is outstanding, and the first failure aborts startup.

use crate::error::{AssetError, HostError};
use alloc::collections::BTreeMap;
use alloc::string::String;

/// Receipt for one in-flight load.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

#[derive(Clone, Debug, Default)]
pub struct ResourceBarrier {
    pending: BTreeMap<LoadTicket, String>,
    next: u64,
    loaded: usize,
    failure: Option<AssetError>,
}

impl ResourceBarrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a load of `path`.
    pub fn begin(&mut self, path: impl Into<String>) -> LoadTicket {
        let ticket = LoadTicket(self.next);
        self.next += 1;
        self.pending.insert(ticket, path.into());
        ticket
    }

    /// Mark a load as finished. Unknown or already-resolved tickets are ignored.
    pub fn complete(&mut self, ticket: LoadTicket) -> bool {
        if self.pending.remove(&ticket).is_some() {
            self.loaded += 1;
            true
        } else {
            false
        }
    }

    /// Mark a load as failed. Only the first failure is kept.
    pub fn fail(&mut self, ticket: LoadTicket, reason: impl Into<String>) -> bool {
        match self.pending.remove(&ticket) {
            Some(path) => {
                let error = AssetError::new(path, reason);
                log::error!("{}", error);
                self.failure.get_or_insert(error);
                true
            }
            None => false,
        }
    }

    /// Resolve a ticket from a loader result, handing the asset back on success.
    pub fn resolve<T>(&mut self, ticket: LoadTicket, result: Result<T, AssetError>) -> Option<T> {
        match result {
            Ok(asset) => {
                self.complete(ticket);
                Some(asset)
            }
            Err(error) => {
                self.fail(ticket, error.reason);
                None
            }
        }
    }

    pub fn outstanding(&self) -> usize {
        self.pending.len()
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn failure(&self) -> Option<&AssetError> {
        self.failure.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.pending.is_empty() && self.failure.is_none()
    }

    /// `Ok` once everything loaded; a failure wins over pending loads.
    pub fn check(&self) -> Result<(), HostError> {
        if let Some(error) = &self.failure {
            return Err(HostError::Asset(error.clone()));
        }
        if !self.pending.is_empty() {
            return Err(HostError::ResourcesPending { outstanding: self.pending.len() });
        }
        Ok(())
    }
}
