//! Output formatting for query results

use crate::index::types::{ArtifactId, Location};
use serde::Serialize;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// What a listing of ids was looked up by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "by")]
pub enum Target<'a> {
    Document { uri: &'a str },
    Line { uri: &'a str, line: u32 },
    Node { node_id: &'a str },
}

impl std::fmt::Display for Target<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Document { uri } => write!(f, "{}", uri),
            Target::Line { uri, line } => write!(f, "{}:{}", uri, line),
            Target::Node { node_id } => write!(f, "node {}", node_id),
        }
    }
}

/// JSON shape of an id listing
#[derive(Debug, Serialize)]
pub struct Listing<'a> {
    #[serde(flatten)]
    pub target: Target<'a>,
    pub ids: &'a [ArtifactId],
}

/// JSON shape of a location lookup
#[derive(Debug, Serialize)]
pub struct NodeLocation<'a> {
    pub node_id: &'a str,
    pub line: u32,
    pub column: u32,
}

pub fn stdout(color: bool) -> StandardStream {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

/// Print a heading followed by one id per line
pub fn print_ids<W: WriteColor>(
    out: &mut W,
    target: Target<'_>,
    ids: &[ArtifactId],
) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
    write!(out, "{}", target)?;
    out.reset()?;

    out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
    writeln!(out, " ({})", ids.len())?;
    out.reset()?;

    for id in ids {
        writeln!(out, "  {}", id)?;
    }
    Ok(())
}

/// Print `node_id` followed by its green `line:column`
pub fn print_location<W: WriteColor>(
    out: &mut W,
    node_id: &str,
    location: Location,
) -> io::Result<()> {
    write!(out, "{} ", node_id)?;
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    writeln!(out, "{}", location)?;
    out.reset()?;
    Ok(())
}

/// Print any serializable value as pretty JSON
pub fn print_json<W: Write>(out: &mut W, value: &impl Serialize) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(out)
}
