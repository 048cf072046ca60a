//! Marker sequence files.
//!
//! A marker file holds whitespace-separated k-mer ids. Everything after a `#`
//! on a line is a comment. A pairs file has one `seq0<TAB>seq1` line per pair.

use crate::error::{CliError, CliResult};
use malign_core::KmerId;
use std::path::{Path, PathBuf};

/// Parse the content of a marker file. `name` is only used in error messages.
pub fn parse_markers(name: &str, content: &str) -> CliResult<Vec<KmerId>> {
    let mut markers = Vec::new();
    for (line_number, line) in content.lines().enumerate() {
        let data = line.split('#').next().unwrap_or("");
        for token in data.split_whitespace() {
            let marker = token.parse::<KmerId>().map_err(|e| {
                CliError::parse(name, format!("bad marker '{}' at line {}: {}", token, line_number + 1, e))
            })?;
            markers.push(marker);
        }
    }
    Ok(markers)
}

pub fn read_markers(path: &Path) -> CliResult<Vec<KmerId>> {
    if !path.exists() {
        return Err(CliError::file_not_found(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| CliError::parse(path.display().to_string(), e.to_string()))?;
    let markers = parse_markers(&path.display().to_string(), &content)?;
    log::debug!("Read {} markers from {}", markers.len(), path.display());
    Ok(markers)
}

/// Read a pairs file. Relative paths are resolved against the directory of
/// the pairs file.
pub fn read_pairs(path: &Path) -> CliResult<Vec<(PathBuf, PathBuf)>> {
    if !path.exists() {
        return Err(CliError::file_not_found(path.to_path_buf()));
    }
    let name = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| CliError::parse(name.as_str(), e.to_string()))?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));

    let mut pairs = Vec::new();
    for (line_number, line) in content.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 2 {
            return Err(CliError::parse(
                name.as_str(),
                format!("line {}: expected 2 tab-separated paths, found {}", line_number + 1, fields.len()),
            ));
        }
        pairs.push((base.join(fields[0]), base.join(fields[1])));
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_markers_with_comments() {
        let markers = parse_markers("test", "# read 0\n45 58\t106\n\n17 # last\n").unwrap();
        assert_eq!(markers, vec![45, 58, 106, 17]);
    }

    #[test]
    fn test_parse_markers_rejects_bad_tokens() {
        let err = parse_markers("test", "1 2\n3 -4\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
        assert!(parse_markers("test", "99999999999").is_err());
    }

    #[test]
    fn test_read_pairs_relative_paths() {
        let dir = TempDir::new().unwrap();
        let pairs_path = dir.path().join("pairs.tsv");
        std::fs::write(&pairs_path, "# pairs\na.txt\tb.txt\n\n/abs/c.txt\td.txt\n").unwrap();

        let pairs = read_pairs(&pairs_path).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, dir.path().join("a.txt"));
        assert_eq!(pairs[1].0, PathBuf::from("/abs/c.txt"));
        assert_eq!(pairs[1].1, dir.path().join("d.txt"));
    }

    #[test]
    fn test_read_pairs_bad_line() {
        let dir = TempDir::new().unwrap();
        let pairs_path = dir.path().join("pairs.tsv");
        std::fs::write(&pairs_path, "a.txt b.txt\n").unwrap();
        assert!(matches!(read_pairs(&pairs_path), Err(CliError::Parse { .. })));
    }

    #[test]
    fn test_missing_file() {
        let err = read_markers(Path::new("/nonexistent/markers.txt")).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound { .. }));
    }
}
