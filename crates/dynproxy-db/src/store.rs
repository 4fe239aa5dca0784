//! Database store wrapper.

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::executor::{BoundParam, Executor, ParamDescriptor, ResultTable};
use crate::models::*;
use crate::procedure::{self, ProcedureBody, ProcedureDef, Predicate};
use dynproxy_core::Value;
use native_db::*;
use std::cell::Cell;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, trace};

// Static models for the database
static MODELS: LazyLock<Models> = LazyLock::new(|| {
    let mut models = Models::new();
    models.define::<StoredTable>().unwrap();
    models.define::<StoredRow>().unwrap();
    models.define::<StoredProcedure>().unwrap();
    models
});

/// Backing store holding tables, rows and stored procedures.
///
/// `Store` is also an [`Executor`]: the open flag lives in a `Cell`, so a
/// store cannot be shared across threads and at most one operation is in
/// flight at a time.
pub struct Store {
    pub(crate) db: Database<'static>,
    open: Cell<bool>,
}

impl Store {
    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Builder::new()
            .create(&MODELS, path.as_ref())
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self::with_db(db))
    }

    /// Create an in-memory database.
    pub fn in_memory() -> Result<Self> {
        let db = Builder::new()
            .create_in_memory(&MODELS)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self::with_db(db))
    }

    /// Open the store a configuration describes.
    ///
    /// The seed script is not applied here; see `dynproxy-script`.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        match config.path() {
            Some(path) => Self::open(path),
            None => Self::in_memory(),
        }
    }

    fn with_db(db: Database<'static>) -> Self {
        Self {
            db,
            open: Cell::new(false),
        }
    }

    /// Create a table.
    pub fn create_table(&self, name: &str, columns: Vec<String>) -> Result<()> {
        if self.table(name)?.is_some() {
            return Err(Error::DuplicateKey(name.to_string()));
        }
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].contains(column) {
                return Err(Error::DuplicateKey(format!("{}.{}", name, column)));
            }
        }

        let rw = self.db.rw_transaction()?;
        rw.upsert(StoredTable {
            name: name.to_string(),
            columns,
        })?;
        rw.commit()?;
        debug!(table = name, "table created");
        Ok(())
    }

    /// Append a row. Values are given in column order.
    pub fn insert_row(&self, table: &str, values: Vec<Value>) -> Result<()> {
        let definition = self.load_table(table)?;
        if values.len() != definition.columns.len() {
            return Err(Error::InvalidDefinition(format!(
                "row for {} has {} values, expected {}",
                table,
                values.len(),
                definition.columns.len()
            )));
        }

        let stored = StoredRow::new(table, self.next_seq(table)?, &values)?;
        let rw = self.db.rw_transaction()?;
        rw.upsert(stored)?;
        rw.commit()?;
        Ok(())
    }

    /// Define a stored procedure `<table>_<operation>`.
    pub fn create_procedure(&self, def: &ProcedureDef) -> Result<()> {
        let name = def.name();
        let table = self.load_table(&def.table)?;
        if self.procedure(&name)?.is_some() {
            return Err(Error::DuplicateKey(name));
        }

        for Predicate { column, param } in def.body.predicates() {
            if !table.columns.contains(column) {
                return Err(Error::InvalidDefinition(format!(
                    "{} refers to unknown column {}",
                    name, column
                )));
            }
            if !def.params.contains(param) {
                return Err(Error::InvalidDefinition(format!(
                    "{} refers to undeclared parameter {}",
                    name, param
                )));
            }
        }

        let stored = StoredProcedure::new(&def.table, &def.operation, def.params.clone(), &def.body)?;
        let rw = self.db.rw_transaction()?;
        rw.upsert(stored)?;
        rw.commit()?;
        debug!(procedure = %name, "procedure created");
        Ok(())
    }

    /// Delete every row of a table, returning how many were removed.
    pub fn clear_table(&self, table: &str) -> Result<usize> {
        self.load_table(table)?;
        self.remove_rows(self.rows(table)?)
    }

    fn remove_rows(&self, rows: Vec<StoredRow>) -> Result<usize> {
        let count = rows.len();
        let rw = self.db.rw_transaction()?;
        for row in rows {
            rw.remove(row)?;
        }
        rw.commit()?;
        Ok(count)
    }

    fn load_table(&self, name: &str) -> Result<StoredTable> {
        self.table(name)?
            .ok_or_else(|| Error::NotFound(format!("table {}", name)))
    }

    fn load_procedure(&self, name: &str) -> Result<StoredProcedure> {
        self.procedure(name)?
            .ok_or_else(|| Error::NotFound(format!("procedure {}", name)))
    }

    fn ensure_open(&self) -> Result<()> {
        if self.open.get() {
            Ok(())
        } else {
            Err(Error::InvalidState("handle is closed".into()))
        }
    }

    fn run(&self, stored: &StoredProcedure, params: &[BoundParam]) -> Result<ResultTable> {
        let table = self.load_table(&stored.table)?;
        let lookup = |name: &str| {
            params
                .iter()
                .find(|p| p.name == name)
                .map(|p| p.value.clone())
        };

        let mut result = ResultTable::new(table.columns.clone());
        match stored.decode_body()? {
            ProcedureBody::SelectAll => {
                for row in self.rows(&table.name)? {
                    result.push_row(row.decode_values()?);
                }
            }
            ProcedureBody::SelectWhere(predicates) => {
                for row in self.rows(&table.name)? {
                    let values = row.decode_values()?;
                    if procedure::matches(&predicates, &table.columns, &values, lookup) {
                        result.push_row(values);
                    }
                }
            }
            ProcedureBody::Insert(assignments) => {
                let values: Vec<Value> = table
                    .columns
                    .iter()
                    .map(|column| {
                        assignments
                            .iter()
                            .find(|a| a.column == *column)
                            .and_then(|a| lookup(a.param.as_str()))
                            .unwrap_or_default()
                    })
                    .collect();
                self.insert_row(&table.name, values.clone())?;
                result.push_row(values);
            }
            ProcedureBody::DeleteWhere(predicates) => {
                let mut doomed = Vec::new();
                for row in self.rows(&table.name)? {
                    let values = row.decode_values()?;
                    if procedure::matches(&predicates, &table.columns, &values, lookup) {
                        result.push_row(values);
                        doomed.push(row);
                    }
                }
                self.remove_rows(doomed)?;
            }
        }
        Ok(result)
    }
}

impl Executor for Store {
    fn open(&self) -> Result<()> {
        if self.open.replace(true) {
            return Err(Error::InvalidState("handle is already open".into()));
        }
        trace!("store handle opened");
        Ok(())
    }

    fn close(&self) {
        if self.open.replace(false) {
            trace!("store handle closed");
        }
    }

    fn is_open(&self) -> bool {
        self.open.get()
    }

    fn exists_table(&self, name: &str) -> Result<bool> {
        self.ensure_open()?;
        Ok(self.table(name)?.is_some())
    }

    fn derive_parameters(&self, procedure: &str) -> Result<Vec<ParamDescriptor>> {
        self.ensure_open()?;
        let stored = self.load_procedure(procedure)?;
        Ok(std::iter::once(ParamDescriptor::return_value())
            .chain(stored.params.into_iter().map(ParamDescriptor::input))
            .collect())
    }

    fn execute(&self, procedure: &str, params: &[BoundParam]) -> Result<ResultTable> {
        self.ensure_open()?;
        let stored = self.load_procedure(procedure)?;
        if stored.params.len() != params.len() {
            return Err(Error::ParameterMismatch {
                procedure: procedure.to_string(),
                expected: stored.params.len(),
                got: params.len(),
            });
        }
        let result = self.run(&stored, params)?;
        debug!(procedure, rows = result.len(), "procedure executed");
        Ok(result)
    }
}

impl From<native_db::db_type::Error> for Error {
    fn from(err: native_db::db_type::Error) -> Self {
        Error::Database(err.to_string())
    }
}
