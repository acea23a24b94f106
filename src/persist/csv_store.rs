//! CSV directory store
//!
//! Design `N` lives in `root/N/` with one `*_N.csv` file per table. Writes
//! go to a hidden sibling file that is then renamed over the table, so a
//! crash mid-write leaves the previous table intact.

use super::records::{ComponentRecord, PinRecord, Table, TableRow, TraceRow, WorkspaceRecord};
use super::{DesignStore, StoreError};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CsvDesignStore {
    name: String,
    dir: PathBuf,
}

impl CsvDesignStore {
    /// Store for design `name` under `root`. Nothing is touched on disk
    /// until the first read or write.
    pub fn new<P: AsRef<Path>>(root: P, name: &str) -> Self {
        Self {
            name: name.to_string(),
            dir: root.as_ref().join(name),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn table_path(&self, table: Table) -> PathBuf {
        self.dir.join(table.file_name(&self.name))
    }

    /// True when the design directory is present, whatever tables it holds
    pub fn exists(&self) -> bool {
        self.dir.exists()
    }

    fn read_table<T: TableRow>(&self) -> Result<Vec<T>, StoreError> {
        let path = self.table_path(T::TABLE);
        if !path.is_file() {
            return Err(StoreError::MissingTable(path));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&path)
            .map_err(|source| StoreError::Csv { path: path.clone(), source })?;

        reader
            .deserialize()
            .collect::<Result<Vec<T>, _>>()
            .map_err(|source| StoreError::Csv { path, source })
    }

    fn write_table<T: TableRow>(&self, rows: &[T]) -> Result<(), StoreError> {
        let path = self.table_path(T::TABLE);
        let tmp = self.dir.join(format!(".{}.tmp", T::TABLE.file_name(&self.name)));

        let csv_err = |source: csv::Error| StoreError::Csv { path: tmp.clone(), source };
        {
            // Header is written by hand so empty tables still carry one
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_path(&tmp)
                .map_err(csv_err)?;
            writer.write_record(T::HEADERS).map_err(csv_err)?;
            for row in rows {
                writer.serialize(row).map_err(csv_err)?;
            }
            writer
                .flush()
                .map_err(|source| StoreError::Io { path: tmp.clone(), source })?;
        }

        fs::rename(&tmp, &path).map_err(|source| StoreError::Io { path, source })
    }
}

impl DesignStore for CsvDesignStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self, workspace: &WorkspaceRecord) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)
            .map_err(|source| StoreError::Io { path: self.dir.clone(), source })?;
        self.write_table(std::slice::from_ref(workspace))?;
        self.write_table::<ComponentRecord>(&[])?;
        self.write_table::<PinRecord>(&[])?;
        self.write_table::<TraceRow>(&[])
    }

    fn read_components(&self) -> Result<Vec<ComponentRecord>, StoreError> {
        self.read_table()
    }

    fn write_components(&mut self, rows: &[ComponentRecord]) -> Result<(), StoreError> {
        self.write_table(rows)
    }

    fn read_pins(&self) -> Result<Vec<PinRecord>, StoreError> {
        self.read_table()
    }

    fn write_pins(&mut self, rows: &[PinRecord]) -> Result<(), StoreError> {
        self.write_table(rows)
    }

    fn read_traces(&self) -> Result<Vec<TraceRow>, StoreError> {
        self.read_table()
    }

    fn write_traces(&mut self, rows: &[TraceRow]) -> Result<(), StoreError> {
        self.write_table(rows)
    }

    fn read_workspace(&self) -> Result<WorkspaceRecord, StoreError> {
        self.read_table::<WorkspaceRecord>()?
            .into_iter()
            .next()
            .ok_or(StoreError::Malformed {
                table: Table::Workspace.label(),
                message: "no bounds row".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace() -> WorkspaceRecord {
        WorkspaceRecord { base_x: vec![2.0, 177.0], base_y: vec![2.0, 252.0] }
    }

    #[test]
    fn test_initialize_writes_headers_and_bounds() {
        let root = tempfile::tempdir().unwrap();
        let mut store = CsvDesignStore::new(root.path(), "board");
        assert!(!store.exists());
        store.initialize(&workspace()).unwrap();
        assert!(store.exists());

        let traces = fs::read_to_string(store.table_path(Table::Traces)).unwrap();
        assert_eq!(traces.trim(), "Tunnel,X,Y,Tag");

        let base = fs::read_to_string(store.table_path(Table::Workspace)).unwrap();
        assert!(base.contains("\"[2.0, 177.0]\""));
        assert_eq!(store.read_workspace().unwrap(), workspace());
        assert!(store.read_components().unwrap().is_empty());
    }

    #[test]
    fn test_partial_design_directory_exists() {
        let root = tempfile::tempdir().unwrap();
        let store = CsvDesignStore::new(root.path(), "board");
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.table_path(Table::Traces), "Tunnel,X,Y,Tag\n").unwrap();
        assert!(store.exists());
    }

    #[test]
    fn test_trace_rows_round_trip() {
        let root = tempfile::tempdir().unwrap();
        let mut store = CsvDesignStore::new(root.path(), "board");
        store.initialize(&workspace()).unwrap();

        let rows = vec![TraceRow {
            tunnel: true,
            xs: vec![10.0, 20.5],
            ys: vec![30.0, 30.0],
            tag: "line_1".to_string(),
        }];
        store.write_traces(&rows).unwrap();

        let text = fs::read_to_string(store.table_path(Table::Traces)).unwrap();
        assert!(text.contains("1,\"[10.0, 20.5]\",\"[30.0, 30.0]\",line_1"));
        assert_eq!(store.read_traces().unwrap(), rows);
        assert!(!store.dir().join(".Traces_Coordinates_board.csv.tmp").exists());
    }

    #[test]
    fn test_missing_table_is_reported() {
        let root = tempfile::tempdir().unwrap();
        let store = CsvDesignStore::new(root.path(), "nothing");
        assert!(matches!(store.read_pins(), Err(StoreError::MissingTable(_))));
    }

    #[test]
    fn test_bad_list_cell_is_csv_error() {
        let root = tempfile::tempdir().unwrap();
        let mut store = CsvDesignStore::new(root.path(), "board");
        store.initialize(&workspace()).unwrap();
        fs::write(
            store.table_path(Table::Traces),
            "Tunnel,X,Y,Tag\n0,10.0,\"[1.0]\",line_1\n",
        )
        .unwrap();
        assert!(matches!(store.read_traces(), Err(StoreError::Csv { .. })));
    }
}
