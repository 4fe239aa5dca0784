//! Recording executor for unit tests.

use crate::error::{Error, Result};
use crate::executor::{BoundParam, Executor, ParamDescriptor, ResultTable};
use dynproxy_core::Value;
use indexmap::IndexMap;
use std::cell::{Cell, RefCell};

struct MockProcedure {
    table: String,
    params: Vec<String>,
    /// Column compared against the first bound parameter.
    filter: Option<String>,
}

/// In-memory executor that records every handle transition and execution.
pub(crate) struct MockExecutor {
    tables: IndexMap<String, ResultTable>,
    procedures: IndexMap<String, MockProcedure>,
    open: Cell<bool>,
    opens: Cell<usize>,
    closes: Cell<usize>,
    catalog_lookups: Cell<usize>,
    executed: RefCell<Vec<(String, Vec<BoundParam>)>>,
    fail_catalog: bool,
    fail_execute: bool,
}

impl MockExecutor {
    /// Three customers with `Customers_SelectAll` and `Customers_SelectByID`.
    pub(crate) fn northwind() -> Self {
        let customers = ResultTable::new(vec![
            "CustomerID".into(),
            "CompanyName".into(),
            "City".into(),
        ])
        .with_row(vec!["ALFKI".into(), "Alfreds Futterkiste".into(), "Berlin".into()])
        .with_row(vec!["EASTC".into(), "Eastern Connection".into(), "London".into()])
        .with_row(vec!["WOLZA".into(), "Wolski Zajazd".into(), "Warszawa".into()]);

        let mut procedures = IndexMap::new();
        procedures.insert(
            "Customers_SelectAll".to_string(),
            MockProcedure {
                table: "Customers".into(),
                params: vec![],
                filter: None,
            },
        );
        procedures.insert(
            "Customers_SelectByID".to_string(),
            MockProcedure {
                table: "Customers".into(),
                params: vec!["CustomerID".into()],
                filter: Some("CustomerID".into()),
            },
        );

        let mut tables = IndexMap::new();
        tables.insert("Customers".to_string(), customers);

        Self {
            tables,
            procedures,
            open: Cell::new(false),
            opens: Cell::new(0),
            closes: Cell::new(0),
            catalog_lookups: Cell::new(0),
            executed: RefCell::new(Vec::new()),
            fail_catalog: false,
            fail_execute: false,
        }
    }

    /// Make every catalog lookup fault.
    pub(crate) fn failing_catalog(mut self) -> Self {
        self.fail_catalog = true;
        self
    }

    /// Make every execution fault.
    pub(crate) fn failing_execute(mut self) -> Self {
        self.fail_execute = true;
        self
    }

    pub(crate) fn opens(&self) -> usize {
        self.opens.get()
    }

    pub(crate) fn closes(&self) -> usize {
        self.closes.get()
    }

    pub(crate) fn catalog_lookups(&self) -> usize {
        self.catalog_lookups.get()
    }

    /// Executed procedures with their bound parameters, in call order.
    pub(crate) fn executed(&self) -> Vec<(String, Vec<BoundParam>)> {
        self.executed.borrow().clone()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.open.get() {
            Ok(())
        } else {
            Err(Error::InvalidState("handle is closed".into()))
        }
    }

    fn procedure(&self, name: &str) -> Result<&MockProcedure> {
        self.procedures
            .get(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }
}

impl Executor for MockExecutor {
    fn open(&self) -> Result<()> {
        if self.open.replace(true) {
            return Err(Error::InvalidState("handle is already open".into()));
        }
        self.opens.set(self.opens.get() + 1);
        Ok(())
    }

    fn close(&self) {
        if self.open.replace(false) {
            self.closes.set(self.closes.get() + 1);
        }
    }

    fn is_open(&self) -> bool {
        self.open.get()
    }

    fn exists_table(&self, name: &str) -> Result<bool> {
        self.ensure_open()?;
        self.catalog_lookups.set(self.catalog_lookups.get() + 1);
        if self.fail_catalog {
            return Err(Error::Database("catalog unavailable".into()));
        }
        Ok(self.tables.contains_key(name))
    }

    fn derive_parameters(&self, procedure: &str) -> Result<Vec<ParamDescriptor>> {
        self.ensure_open()?;
        let procedure = self.procedure(procedure)?;
        Ok(std::iter::once(ParamDescriptor::return_value())
            .chain(procedure.params.iter().map(ParamDescriptor::input))
            .collect())
    }

    fn execute(&self, procedure: &str, params: &[BoundParam]) -> Result<ResultTable> {
        self.ensure_open()?;
        self.executed
            .borrow_mut()
            .push((procedure.to_string(), params.to_vec()));
        if self.fail_execute {
            return Err(Error::Database("deadlock victim".into()));
        }

        let definition = self.procedure(procedure)?;
        let table = &self.tables[&definition.table];
        let Some(column) = &definition.filter else {
            return Ok(table.clone());
        };

        let position = table
            .columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| Error::NotFound(column.clone()))?;
        let key = params.first().map(|p| &p.value).unwrap_or(&Value::Null);
        let mut result = ResultTable::new(table.columns.clone());
        for row in table.rows.iter().filter(|row| &row[position] == key) {
            result.push_row(row.clone());
        }
        Ok(result)
    }
}
