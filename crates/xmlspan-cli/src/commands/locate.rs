//! `xmlspan locate`: parse a file and report where each element lives.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};
use xmlspan::Position;
use xmlspan_dom::{Document, parse};

use super::read_source;

/// Arguments for the locate command
#[derive(Debug)]
pub struct LocateArgs {
    pub file: PathBuf,
    pub json: bool,
    /// Include each element's open tag
    pub with_head: bool,
}

/// One output record.
#[derive(Debug, Serialize)]
struct ElementLocation {
    name: String,
    /// Depth below the root element.
    depth: usize,
    start: Position,
    end: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    head: Option<String>,
}

/// Execute the locate command
pub fn execute(args: LocateArgs) -> Result<()> {
    let source = read_source(&args.file)?;
    let doc = parse(&source).with_context(|| format!("Failed to parse {}", args.file.display()))?;

    let records = collect(&doc, args.with_head);
    info!(elements = records.len(), "located elements");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &records)?;
        writeln!(out)?;
    } else {
        write_text(&records, &mut out)?;
    }
    Ok(())
}

fn collect(doc: &Document, with_head: bool) -> Vec<ElementLocation> {
    let mut records = Vec::new();
    let mut stack = vec![(&doc.root, 0)];

    while let Some((node, depth)) = stack.pop() {
        let Some(name) = node.tag_name() else {
            continue;
        };
        match doc.location(node) {
            Some(loc) => records.push(ElementLocation {
                name: name.to_string(),
                depth,
                start: loc.start(),
                end: loc.end(),
                head: with_head.then(|| loc.text(true).to_string()),
            }),
            None => debug!(name, "element has no location"),
        }
        stack.extend(
            node.element_children()
                .into_iter()
                .rev()
                .map(|child| (child, depth + 1)),
        );
    }
    records
}

/// `name L:C-L:C`, indented by depth, with 1-based lines and columns.
fn write_text<W: Write>(records: &[ElementLocation], out: &mut W) -> io::Result<()> {
    for record in records {
        write!(
            out,
            "{:indent$}{} {}:{}-{}:{}",
            "",
            record.name,
            record.start.row + 1,
            record.start.column + 1,
            record.end.row + 1,
            record.end.column + 1,
            indent = record.depth * 2
        )?;
        if let Some(head) = &record.head {
            write!(out, " {}", head.escape_debug())?;
        }
        writeln!(out)?;
    }
    out.flush()
}
