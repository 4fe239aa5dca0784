//! Scoped acquisition of an executor handle.

use crate::error::Result;
use crate::executor::Executor;
use std::ops::Deref;
use tracing::trace;

/// An open executor handle, closed again when dropped.
///
/// Every exit path out of the scope holding a lease releases the handle,
/// including early returns through `?`.
pub struct Lease<'e> {
    executor: &'e dyn Executor,
}

impl<'e> Lease<'e> {
    /// Open the handle.
    pub fn acquire(executor: &'e dyn Executor) -> Result<Self> {
        executor.open()?;
        trace!("executor handle opened");
        Ok(Self { executor })
    }
}

impl<'e> Deref for Lease<'e> {
    type Target = dyn Executor + 'e;

    fn deref(&self) -> &Self::Target {
        self.executor
    }
}

impl Drop for Lease<'_> {
    fn drop(&mut self) {
        self.executor.close();
        trace!("executor handle closed");
    }
}
