use std::path::Path;
use colored::Colorize;
use crate::error::{ReclaimError, Result};

/// Whether a manifest path points at an existing file
pub fn file_exists(path: &str) -> bool {
    Path::new(path).is_file()
}

/// Read a manifest into lines. Missing and empty files are errors for the
/// whole invocation; a header-only file is not.
pub fn read_lines(path: &str) -> Result<Vec<String>> {
    if !file_exists(path) {
        return Err(ReclaimError::ManifestMissing(path.to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let lines: Vec<String> = content
        .trim_start_matches('\u{feff}')
        .lines()
        .map(str::to_string)
        .collect();

    if lines.is_empty() {
        return Err(ReclaimError::EmptyManifest(path.to_string()));
    }
    Ok(lines)
}

/// Format a node id truncated for display
pub fn format_id(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() <= 16 {
        id.to_string()
    } else {
        let head: String = chars[..8].iter().collect();
        let tail: String = chars[chars.len() - 6..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

/// Mapping column for a mannequin listing, padded to `width` before it is
/// coloured so escape codes do not count towards the column width
pub fn format_mapping(login: Option<&str>, id: Option<&str>, width: usize) -> String {
    let pad = |text: &str| format!("{:<width$}", text, width = width);
    match (login, id) {
        (Some(login), _) => pad(login).cyan().to_string(),
        (None, Some(id)) => pad(&format_id(id)).cyan().to_string(),
        (None, None) => pad("-").dimmed().to_string(),
    }
}

/// Print a formatted table border
pub fn print_table_border(width: usize) {
    println!("{}", "=".repeat(width));
}

/// Print a table row with columns
pub fn print_table_row(columns: &[&str], widths: &[usize]) {
    let mut row = String::new();
    for (i, col) in columns.iter().enumerate() {
        if i < widths.len() {
            row.push_str(&format!("{:<width$}  ", col, width = widths[i]));
        }
    }
    println!("{}", row.trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "\u{feff}source,target\nalice,bob\r\n").unwrap();

        let lines = read_lines(file.path().to_str().unwrap()).unwrap();
        assert_eq!(lines, vec!["source,target", "alice,bob"]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        let path = path.to_str().unwrap();

        assert!(!file_exists(path));
        assert!(matches!(read_lines(path), Err(ReclaimError::ManifestMissing(_))));
    }

    #[test]
    fn test_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(matches!(
            read_lines(file.path().to_str().unwrap()),
            Err(ReclaimError::EmptyManifest(_))
        ));
    }

    #[test]
    fn test_format_id() {
        assert_eq!(format_id("M_short"), "M_short");
        assert_eq!(format_id("MDg6TWFubmVxdWluMTIzNDU2Nzg5"), "MDg6TWFu...U2Nzg5");
    }

    #[test]
    fn test_format_id_counts_chars() {
        assert_eq!(format_id("ÀÉÎÕÜàéîõüçñßøåæ"), "ÀÉÎÕÜàéîõüçñßøåæ");
        assert_eq!(format_id("ÀÉÎÕÜàéîõüçñßøåæÿ"), "ÀÉÎÕÜàéî...ñßøåæÿ");
    }

    #[test]
    fn test_mapping_is_padded_before_colouring() {
        let cell = format_mapping(Some("carol"), None, 16);
        assert!(cell.contains(&format!("{:<16}", "carol")));

        let unmapped = format_mapping(None, None, 4);
        assert!(unmapped.contains("-   "));
    }
}
