use crate::config::SearchPath;
use crate::query::{FastLowercase, TableName};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Extension recognized as a table file, compared case-insensitively.
pub const TABLE_EXT: &str = ".csv";

/// Deepest level walked below each search directory. Entries directly inside
/// a search directory are at depth 1.
pub const MAX_DEPTH: usize = 5;

/// Table name → every file holding rows for it, in discovery order.
#[derive(Debug, Default, Clone)]
pub struct TableIndex {
    tables: BTreeMap<TableName, Vec<PathBuf>>,
}

impl TableIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: TableName, path: PathBuf) {
        self.tables.entry(name).or_default().push(path);
    }

    /// Files for `name`, empty when the table is unknown.
    pub fn files(&self, name: &TableName) -> &[PathBuf] {
        self.tables.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All table names, sorted ascending.
    pub fn names(&self) -> impl Iterator<Item = &TableName> {
        self.tables.keys()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

pub struct TableDiscovery {
    max_depth: usize,
}

impl Default for TableDiscovery {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
        }
    }
}

impl TableDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Walks every search directory in order and indexes all table files.
    pub fn discover(&self, search_path: &SearchPath) -> TableIndex {
        let mut index = TableIndex::new();
        for dir in search_path.dirs() {
            self.discover_in_dir(&mut index, dir);
        }
        tracing::debug!(tables = index.len(), "table discovery finished");
        index
    }

    /// Adds the tables found below `dir` to `index`. Problems are logged and
    /// the walk carries on with the remaining entries.
    pub fn discover_in_dir(&self, index: &mut TableIndex, dir: &Path) {
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(self.max_depth)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let not_found = err
                        .io_error()
                        .is_some_and(|io_err| io_err.kind() == io::ErrorKind::NotFound);
                    if not_found || err.loop_ancestor().is_some() {
                        // Missing search directory, dangling symlink or link cycle.
                        tracing::debug!("skipping {}: {}", display_err_path(&err, dir), err);
                    } else {
                        tracing::warn!("{}", err);
                    }
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            let name = table_name_for(&entry.file_name().to_string_lossy());
            if let Some(name) = name {
                tracing::trace!(table = %name, path = %entry.path().display(), "found table file");
                index.insert(name, entry.into_path());
            }
        }
    }
}

fn display_err_path(err: &walkdir::Error, fallback: &Path) -> String {
    err.path().unwrap_or(fallback).display().to_string()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Table name for a file name ending in `.csv` (any case), or `None`.
/// Hidden names never get here; the walker filters them.
pub fn table_name_for(file_name: &str) -> Option<TableName> {
    let lowered = file_name.fast_to_lowercase();
    lowered.strip_suffix(TABLE_EXT).map(TableName::new)
}

/// Builds the index for a whole search path with the default depth limit.
pub fn discover_tables(search_path: &SearchPath) -> TableIndex {
    TableDiscovery::new().discover(search_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs::{File, create_dir_all};
    use std::io::Write;
    use tempfile::tempdir;

    fn touch(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }
        File::create(path)?.write_all(b"name,value\n")?;
        Ok(())
    }

    #[test]
    fn test_table_name_for() {
        assert_eq!(table_name_for("Colors.CSV"), Some(TableName::new("colors")));
        assert_eq!(table_name_for("area codes.csv"), Some(TableName::new("area codes")));
        assert_eq!(table_name_for("colors.txt"), None);
        assert_eq!(table_name_for("colors.csv.bak"), None);
    }

    #[test]
    fn test_discovers_nested_tables() -> Result<()> {
        let temp_dir = tempdir()?;
        let base = temp_dir.path();

        touch(&base.join("colors.csv"))?;
        touch(&base.join("web/Colors.csv"))?;
        touch(&base.join("web/fonts.csv"))?;
        touch(&base.join("notes.txt"))?;

        let index = discover_tables(&SearchPath::new(vec![base.to_path_buf()])?);

        assert_eq!(
            index.files(&TableName::new("colors")),
            &[base.join("colors.csv"), base.join("web/Colors.csv")]
        );
        assert_eq!(index.files(&TableName::new("fonts")).len(), 1);
        assert!(index.files(&TableName::new("notes")).is_empty());
        assert_eq!(
            index.names().map(TableName::as_str).collect::<Vec<_>>(),
            vec!["colors", "fonts"]
        );
        Ok(())
    }

    #[test]
    fn test_merges_tables_across_directories_in_path_order() -> Result<()> {
        let user = tempdir()?;
        let system = tempdir()?;
        touch(&system.path().join("colors.csv"))?;
        touch(&user.path().join("colors.csv"))?;

        let search_path =
            SearchPath::new(vec![user.path().to_path_buf(), system.path().to_path_buf()])?;
        let index = discover_tables(&search_path);

        assert_eq!(
            index.files(&TableName::new("colors")),
            &[user.path().join("colors.csv"), system.path().join("colors.csv")]
        );
        Ok(())
    }

    #[test]
    fn test_hidden_entries_are_skipped() -> Result<()> {
        let temp_dir = tempdir()?;
        let base = temp_dir.path();

        touch(&base.join(".secret.csv"))?;
        touch(&base.join(".hidden/colors.csv"))?;

        let index = discover_tables(&SearchPath::new(vec![base.to_path_buf()])?);

        assert!(index.is_empty());
        Ok(())
    }

    #[test]
    fn test_hidden_search_directory_is_still_walked() -> Result<()> {
        let temp_dir = tempdir()?;
        let root = temp_dir.path().join(".lookup");
        touch(&root.join("colors.csv"))?;

        let index = discover_tables(&SearchPath::new(vec![root.clone()])?);

        assert_eq!(index.files(&TableName::new("colors")), &[root.join("colors.csv")]);
        Ok(())
    }

    #[test]
    fn test_depth_limit() -> Result<()> {
        let temp_dir = tempdir()?;
        let base = temp_dir.path();

        touch(&base.join("a/b/c/d/shallow.csv"))?;
        touch(&base.join("a/b/c/d/e/deep.csv"))?;

        let index = discover_tables(&SearchPath::new(vec![base.to_path_buf()])?);
        assert_eq!(index.files(&TableName::new("shallow")).len(), 1);
        assert!(index.files(&TableName::new("deep")).is_empty());

        let mut shallow_only = TableIndex::new();
        TableDiscovery::with_max_depth(1).discover_in_dir(&mut shallow_only, base);
        assert!(shallow_only.is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_directory_is_skipped() -> Result<()> {
        let temp_dir = tempdir()?;
        touch(&temp_dir.path().join("colors.csv"))?;

        let search_path = SearchPath::new(vec![
            temp_dir.path().join("does-not-exist"),
            temp_dir.path().to_path_buf(),
        ])?;
        let index = discover_tables(&search_path);

        assert_eq!(index.len(), 1);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_resolved() -> Result<()> {
        let temp_dir = tempdir()?;
        let base = temp_dir.path();
        let data = tempdir()?;

        touch(&data.path().join("fonts.csv"))?;
        std::os::unix::fs::symlink(data.path().join("fonts.csv"), base.join("fonts.csv"))?;
        std::os::unix::fs::symlink(data.path(), base.join("linked"))?;
        std::os::unix::fs::symlink(base.join("missing.csv"), base.join("broken.csv"))?;
        std::os::unix::fs::symlink(base, base.join("loop"))?;

        let index = discover_tables(&SearchPath::new(vec![base.to_path_buf()])?);

        assert_eq!(
            index.files(&TableName::new("fonts")),
            &[base.join("fonts.csv"), base.join("linked/fonts.csv")]
        );
        assert!(index.files(&TableName::new("broken")).is_empty());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_is_not_a_walk_error() -> Result<()> {
        let temp_dir = tempdir()?;
        let base = temp_dir.path();

        touch(&base.join("nested/colors.csv"))?;
        std::os::unix::fs::symlink(base, base.join("nested/back"))?;

        let err = WalkDir::new(base)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| entry.err())
            .next()
            .expect("cycle error");
        assert!(err.loop_ancestor().is_some());

        let index = discover_tables(&SearchPath::new(vec![base.to_path_buf()])?);
        assert_eq!(
            index.files(&TableName::new("colors")),
            &[base.join("nested/colors.csv")]
        );
        Ok(())
    }
}
