//! Catalog and row queries.

use crate::error::{Error, Result};
use crate::models::*;
use crate::store::Store;
use dynproxy_core::Value;

impl Store {
    /// Look up a table definition.
    pub fn table(&self, name: &str) -> Result<Option<StoredTable>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredTable> = r.get().primary(name.to_string())?;
        Ok(stored)
    }

    /// Get all table definitions.
    pub fn tables(&self) -> Result<Vec<StoredTable>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredTable>()?;
        let iter = scan.all()?;
        let tables: std::result::Result<Vec<StoredTable>, _> = iter.collect();
        tables.map_err(|e| Error::Database(e.to_string()))
    }

    /// Look up a stored procedure.
    pub fn procedure(&self, name: &str) -> Result<Option<StoredProcedure>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredProcedure> = r.get().primary(name.to_string())?;
        Ok(stored)
    }

    /// Get all stored procedures of a table.
    pub fn procedures_for(&self, table: &str) -> Result<Vec<StoredProcedure>> {
        let r = self.db.r_transaction()?;
        let scan = r
            .scan()
            .secondary::<StoredProcedure>(StoredProcedureKey::table)?;
        let iter = scan.start_with(table)?;
        let procedures: std::result::Result<Vec<StoredProcedure>, _> = iter.collect();
        let procedures = procedures.map_err(|e| Error::Database(e.to_string()))?;
        // start_with is a prefix match
        Ok(procedures.into_iter().filter(|p| p.table == table).collect())
    }

    /// Get the rows of a table in insertion order.
    pub fn rows(&self, table: &str) -> Result<Vec<StoredRow>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().secondary::<StoredRow>(StoredRowKey::table)?;
        let iter = scan.start_with(table)?;
        let rows: std::result::Result<Vec<StoredRow>, _> = iter.collect();
        let rows = rows.map_err(|e| Error::Database(e.to_string()))?;
        let mut rows: Vec<StoredRow> = rows.into_iter().filter(|row| row.table == table).collect();
        rows.sort_by_key(|row| row.seq);
        Ok(rows)
    }

    /// Get the decoded row values of a table in insertion order.
    pub fn row_values(&self, table: &str) -> Result<Vec<Vec<Value>>> {
        self.rows(table)?
            .iter()
            .map(StoredRow::decode_values)
            .collect()
    }

    /// Count the rows of a table.
    pub fn row_count(&self, table: &str) -> Result<usize> {
        Ok(self.rows(table)?.len())
    }

    /// Sequence number for the next row of a table.
    pub(crate) fn next_seq(&self, table: &str) -> Result<u64> {
        Ok(self
            .rows(table)?
            .last()
            .map(|row| row.seq + 1)
            .unwrap_or(0))
    }
}
