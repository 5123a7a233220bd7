use crate::{
    error::{ReclaimError, Result},
    mannequin::ReclaimRequest,
};
use tracing::debug;

/// One data row of a manifest. Malformed rows keep their error so the
/// batch can report them without dropping the rest of the file.
#[derive(Debug)]
pub struct ManifestRow {
    /// 1-based line number in the file (the header is line 1)
    pub line: usize,
    pub request: Result<ReclaimRequest>,
}

pub struct ManifestParser;

impl ManifestParser {
    /// Parse manifest lines into rows, in file order.
    ///
    /// The first line is always a header and is discarded. Blank lines are
    /// not rows. Columns are `mannequin-login,target-login[,...]`; anything
    /// past the second column is ignored.
    pub fn parse<I, S>(lines: I) -> Vec<ManifestRow>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows: Vec<ManifestRow> = lines
            .into_iter()
            .enumerate()
            .skip(1)
            .filter(|(_, line)| !line.as_ref().trim().is_empty())
            .map(|(index, line)| {
                let line_number = index + 1;
                ManifestRow {
                    line: line_number,
                    request: parse_row(line_number, line.as_ref()),
                }
            })
            .collect();

        debug!("Parsed {} manifest rows", rows.len());
        rows
    }
}

fn parse_row(line: usize, raw: &str) -> Result<ReclaimRequest> {
    let columns: Vec<&str> = raw.trim().split(',').map(str::trim).collect();

    if columns.len() < 2 {
        return Err(ReclaimError::MalformedRow {
            line,
            reason: format!("expected at least 2 columns, found {}: '{}'", columns.len(), raw.trim()),
        });
    }

    let (mannequin, target) = (columns[0], columns[1]);
    if mannequin.is_empty() || target.is_empty() {
        return Err(ReclaimError::MalformedRow {
            line,
            reason: format!("mannequin and target logins must not be empty: '{}'", raw.trim()),
        });
    }

    ReclaimRequest::by_login(mannequin, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_is_always_skipped() {
        let rows = ManifestParser::parse(["alice,bob", "carol,dave"]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].line, 2);

        let req = rows[0].request.as_ref().unwrap();
        assert_eq!(req.mannequin_login(), Some("carol"));
        assert_eq!(req.target_login(), "dave");
        assert_eq!(req.mannequin_id(), None);
    }

    #[test]
    fn test_header_only_yields_no_rows() {
        assert!(ManifestParser::parse(["source,target"]).is_empty());
        assert!(ManifestParser::parse(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_extra_columns_and_whitespace() {
        let rows = ManifestParser::parse(["source,target", " alice-mannequin , bob-real ,note"]);
        let req = rows[0].request.as_ref().unwrap();
        assert_eq!(req.mannequin_login(), Some("alice-mannequin"));
        assert_eq!(req.target_login(), "bob-real");
    }

    #[test]
    fn test_malformed_rows_are_isolated() {
        let rows = ManifestParser::parse([
            "source,target",
            "only-one-column",
            "alice,bob",
            ",carol",
        ]);

        assert_eq!(rows.len(), 3);
        assert!(matches!(rows[0].request, Err(ReclaimError::MalformedRow { line: 2, .. })));
        assert!(rows[1].request.is_ok());
        assert!(matches!(rows[2].request, Err(ReclaimError::MalformedRow { line: 4, .. })));
    }

    #[test]
    fn test_blank_lines_keep_line_numbers() {
        let rows = ManifestParser::parse(["source,target", "", "alice,bob", "   "]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].line, 3);
    }
}
