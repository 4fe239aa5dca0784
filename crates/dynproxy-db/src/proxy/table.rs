//! Table proxy.

use super::{Member, ResultSetProxy};
use crate::executor::{BoundParam, Executor};
use crate::lease::Lease;
use dynproxy_core::{Dispatch, Error, Result, Value};
use std::fmt;
use tracing::{debug, warn};

/// A verified table whose methods map to stored procedures.
///
/// Calling `op` runs the procedure `<table>_<op>`.
pub struct TableProxy<'e> {
    table: String,
    executor: &'e dyn Executor,
}

impl<'e> TableProxy<'e> {
    pub(crate) fn new(table: impl Into<String>, executor: &'e dyn Executor) -> Self {
        Self {
            table: table.into(),
            executor,
        }
    }

    /// Table name.
    pub fn name(&self) -> &str {
        &self.table
    }

    /// Stored procedure backing `method` on this table.
    pub fn procedure_name(&self, method: &str) -> String {
        format!("{}_{}", self.table, method)
    }

    /// Invoke `method` with positional arguments.
    ///
    /// Arguments bind left to right to the procedure's formal parameters
    /// after the return-value slot. Arity is checked before anything runs.
    pub fn invoke(&self, method: &str, args: &[Value]) -> Result<ResultSetProxy> {
        let procedure = self.procedure_name(method);

        let formals = Lease::acquire(self.executor)
            .and_then(|lease| lease.derive_parameters(&procedure))
            .map_err(|e| Error::invocation_failure(&procedure, e))?;

        let slots = formals.get(1..).unwrap_or_default();
        if slots.len() != args.len() {
            return Err(Error::ParameterCountMismatch {
                procedure,
                expected: slots.len(),
                got: args.len(),
            });
        }

        let bound: Vec<BoundParam> = slots
            .iter()
            .zip(args)
            .map(|(formal, value)| BoundParam {
                name: formal.name.clone(),
                value: value.clone(),
            })
            .collect();
        debug!(%procedure, params = bound.len(), "invoking stored procedure");

        let table = Lease::acquire(self.executor)
            .and_then(|lease| lease.execute(&procedure, &bound))
            .map_err(|e| {
                warn!(%procedure, error = %e, "stored procedure failed");
                Error::invocation_failure(&procedure, e)
            })?;

        Ok(ResultSetProxy::new(table.into()))
    }
}

impl fmt::Debug for TableProxy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableProxy")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl<'e> Dispatch for TableProxy<'e> {
    type Member<'a>
        = Member<'e>
    where
        Self: 'a;

    fn resolve_invoke<'a>(&'a self, name: &str, args: &[Value]) -> Result<Member<'e>> {
        self.invoke(name, args).map(Member::ResultSet)
    }
}
