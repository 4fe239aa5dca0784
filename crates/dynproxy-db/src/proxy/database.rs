//! Database proxy, the root of the chain.

use super::{Member, TableProxy};
use crate::executor::Executor;
use crate::lease::Lease;
use dynproxy_core::{Dispatch, Error, Result};
use std::fmt;
use tracing::debug;

/// Resolves member names to tables that exist in the store's catalog.
///
/// The executor is borrowed, never owned; every table handed out shares it.
#[derive(Clone, Copy)]
pub struct DatabaseProxy<'e> {
    executor: &'e dyn Executor,
}

impl<'e> DatabaseProxy<'e> {
    /// Wrap an executor.
    pub fn new(executor: &'e dyn Executor) -> Self {
        Self { executor }
    }

    /// Look a table up in the catalog.
    ///
    /// The handle is open only for the existence check and is closed again
    /// whether or not the table exists.
    pub fn table(&self, name: &str) -> Result<TableProxy<'e>> {
        let exists = Lease::acquire(self.executor)
            .and_then(|lease| lease.exists_table(name))
            .map_err(|e| Error::TableNotFound {
                table: name.to_string(),
                cause: Some(e.into()),
            })?;

        if !exists {
            debug!(table = name, "table not in catalog");
            return Err(Error::table_not_found(name));
        }
        Ok(TableProxy::new(name, self.executor))
    }
}

impl fmt::Debug for DatabaseProxy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseProxy")
            .field("open", &self.executor.is_open())
            .finish()
    }
}

impl<'e> Dispatch for DatabaseProxy<'e> {
    type Member<'a>
        = Member<'e>
    where
        Self: 'a;

    fn resolve_get<'a>(&'a self, name: &str) -> Result<Member<'e>> {
        self.table(name).map(Member::Table)
    }
}
