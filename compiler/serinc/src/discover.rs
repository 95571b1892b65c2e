//! Source file discovery.

use std::fs;
use std::path::{Path, PathBuf};

use crate::CliError;

/// Suffix of units the generator writes; never read back as input.
const GENERATED_SUFFIX: &str = "_g.cs";

/// Expand `paths` into the `.cs` files to analyze, sorted and deduplicated.
///
/// Directories are walked recursively, skipping hidden ones. Files named
/// explicitly are taken as they are.
pub fn discover_sources(paths: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    let mut found = Vec::new();
    for path in paths {
        if path.is_dir() {
            walk(path, &mut found)?;
        } else if path.is_file() {
            found.push(path.clone());
        } else {
            return Err(CliError::NotFound(path.clone()));
        }
    }
    found.sort();
    found.dedup();

    if found.is_empty() {
        return Err(CliError::NoSources);
    }
    tracing::debug!(count = found.len(), "discovered sources");
    Ok(found)
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> Result<(), CliError> {
    let read_error = |source| CliError::Read {
        path: dir.to_path_buf(),
        source,
    };
    for entry in fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_dir() {
            if !is_hidden(&path) {
                walk(&path, found)?;
            }
        } else if is_input_source(&path) {
            found.push(path);
        }
    }
    Ok(())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

fn is_input_source(path: &Path) -> bool {
    let is_cs = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("cs"));
    let is_generated = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(GENERATED_SUFFIX));
    is_cs && !is_generated
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_walks_recursively_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("Scripts/Enemies")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join("Scripts/Player.cs"), "").unwrap();
        fs::write(root.join("Scripts/Enemies/Boss.cs"), "").unwrap();
        fs::write(root.join("Scripts/Player_g.cs"), "").unwrap();
        fs::write(root.join("Scripts/readme.txt"), "").unwrap();
        fs::write(root.join(".git/Hidden.cs"), "").unwrap();

        let found = discover_sources(&[root.to_path_buf()]).unwrap();
        let relative: Vec<_> = found
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            relative,
            vec![
                PathBuf::from("Scripts/Enemies/Boss.cs"),
                PathBuf::from("Scripts/Player.cs"),
            ]
        );
    }

    #[test]
    fn test_explicit_files_and_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("One.cs");
        fs::write(&file, "").unwrap();

        let found = discover_sources(&[file.clone(), dir.path().to_path_buf()]).unwrap();
        assert_eq!(found, vec![file]);
    }

    #[test]
    fn test_missing_and_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            discover_sources(&[dir.path().join("missing")]),
            Err(CliError::NotFound(_))
        ));
        assert!(matches!(
            discover_sources(&[dir.path().to_path_buf()]),
            Err(CliError::NoSources)
        ));
    }
}
