//! `xmlspan spans`: dump the scanner's span list.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use xmlspan::Annotator;

use super::read_source;

/// Execute the spans command
pub fn execute(file: &Path, json: bool) -> Result<()> {
    let source = read_source(file)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_spans(&source, json, &mut out)
        .with_context(|| format!("Failed to scan {}", file.display()))?;
    Ok(())
}

fn write_spans<W: Write>(source: &str, json: bool, out: &mut W) -> Result<()> {
    let annotator = Annotator::scan_only(source)?;
    info!(spans = annotator.spans().len(), "scanned");

    if json {
        serde_json::to_writer_pretty(&mut *out, annotator.spans())?;
        writeln!(out)?;
    } else {
        annotator.write_listing(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(source: &str, json: bool) -> String {
        let mut out = Vec::new();
        write_spans(source, json, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_listing() {
        insta::assert_snapshot!(render("<a>\n<!DOCTYPE x><b/>\n</a>", false).trim_end(), @r"
        0: element line 1, column 1 [<a>]
        1: text line 1, column 4 [\n]
        2: declaration line 2, column 1 [<!DOCTYPE x>]
        3: element line 2, column 13 [<b/>]
        4: text line 2, column 17 [\n]
        ");
    }

    #[test]
    fn test_json() {
        let spans: serde_json::Value = serde_json::from_str(&render("<a/>", true)).unwrap();
        assert_eq!(
            spans,
            serde_json::json!([{
                "sequence": 0,
                "kind": "Element",
                "start": 0,
                "head_end": 4,
                "end": 4
            }])
        );
    }

    #[test]
    fn test_malformed_input() {
        let err = write_spans("<a>", false, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("never closed"), "{err}");
    }
}
