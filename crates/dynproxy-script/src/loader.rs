//! RON seed loader

use crate::error::{Error, Result};
use crate::schema::{ProcedureDef, TableDef};
use dynproxy_db::{Store, StoreConfig};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Loaded seed definitions
#[derive(Debug, Default)]
pub struct SeedDefs {
    /// Table definitions in load order
    pub tables: Vec<TableDef>,
    /// Procedure definitions in load order
    pub procedures: Vec<ProcedureDef>,
}

/// What `SeedDefs::apply` wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyStats {
    pub tables: usize,
    pub rows: usize,
    pub procedures: usize,
}

impl SeedDefs {
    /// Create empty seed definitions
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a table definition
    pub fn get_table(&self, name: &str) -> Option<&TableDef> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Get a procedure definition by its full `<table>_<operation>` name
    pub fn get_procedure(&self, name: &str) -> Option<&ProcedureDef> {
        self.procedures.iter().find(|p| p.name() == name)
    }

    /// Write every table, row and procedure into `store`.
    ///
    /// Tables go first so procedures can refer to any of them.
    pub fn apply(&self, store: &Store) -> Result<ApplyStats> {
        let mut stats = ApplyStats::default();
        for table in &self.tables {
            store.create_table(&table.name, table.columns.clone())?;
            for row in &table.rows {
                store.insert_row(&table.name, row.clone())?;
                stats.rows += 1;
            }
            stats.tables += 1;
        }
        for procedure in &self.procedures {
            store.create_procedure(procedure)?;
            stats.procedures += 1;
        }
        info!(
            tables = stats.tables,
            rows = stats.rows,
            procedures = stats.procedures,
            "seed applied"
        );
        Ok(stats)
    }
}

/// Loader for RON seed scripts
pub struct Loader {
    defs: SeedDefs,
}

#[derive(Deserialize)]
struct SeedFile {
    #[serde(default)]
    tables: Vec<TableDef>,
    #[serde(default)]
    procedures: Vec<ProcedureDef>,
}

impl Loader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            defs: SeedDefs::new(),
        }
    }

    /// Load a single RON file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        debug!(?path, "loading seed file");
        let content = fs::read_to_string(path)?;
        self.load_str(&content)
    }

    /// Load `(tables: [...], procedures: [...])` from a RON string
    pub fn load_str(&mut self, content: &str) -> Result<()> {
        let file: SeedFile = ron::from_str(content)?;
        for table in file.tables {
            self.add_table(table)?;
        }
        for procedure in file.procedures {
            self.add_procedure(procedure)?;
        }
        Ok(())
    }

    /// Add one table definition
    pub fn add_table(&mut self, table: TableDef) -> Result<()> {
        if self.defs.get_table(&table.name).is_some() {
            return Err(Error::DuplicateDefinition(table.name));
        }
        if let Some(index) = table.ragged_row() {
            return Err(Error::InvalidSchema(format!(
                "row {} of {} does not have {} values",
                index,
                table.name,
                table.columns.len()
            )));
        }
        self.defs.tables.push(table);
        Ok(())
    }

    /// Add one procedure definition
    pub fn add_procedure(&mut self, procedure: ProcedureDef) -> Result<()> {
        let name = procedure.name();
        if self.defs.get_procedure(&name).is_some() {
            return Err(Error::DuplicateDefinition(name));
        }
        self.defs.procedures.push(procedure);
        Ok(())
    }

    /// Load all RON files from a directory
    pub fn load_directory(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Not a directory: {:?}", path),
            )));
        }

        let mut entries: Vec<_> = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<_>>()?;
        // read_dir order is platform dependent
        entries.sort();

        for file_path in entries {
            if file_path.extension().map(|e| e == "ron").unwrap_or(false) {
                self.load_file(&file_path)?;
            } else if file_path.is_dir() {
                self.load_directory(&file_path)?;
            }
        }

        Ok(())
    }

    /// Finish loading and return the seed definitions
    pub fn finish(self) -> SeedDefs {
        self.defs
    }

    /// Get the current definitions (for inspection during loading)
    pub fn defs(&self) -> &SeedDefs {
        &self.defs
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Open the store a configuration describes and apply its seed script.
///
/// The seed only runs against an empty catalog, so reopening a seeded
/// on-disk store keeps the data it already holds.
pub fn open_store(config: &StoreConfig) -> Result<Store> {
    let store = Store::from_config(config)?;
    if let Some(seed) = config.seed() {
        if !store.tables()?.is_empty() {
            debug!(?seed, "catalog already populated, seed skipped");
            return Ok(store);
        }
        let mut loader = Loader::new();
        loader.load_file(seed)?;
        loader.finish().apply(&store)?;
    }
    Ok(store)
}
