use crate::index::writer::SourceIndex;
use std::fmt::Write;

/// How many documents to list individually before summarising
const MAX_LISTED_DOCUMENTS: usize = 15;

/// Display index statistics
pub fn show_stats(index: &SourceIndex) {
    print!("{}", format_stats(index));
}

/// Render index statistics as a human-readable report
pub fn format_stats(index: &SourceIndex) -> String {
    let stats = index.stats();
    let mut out = String::new();

    let _ = writeln!(out, "Index Statistics");
    let _ = writeln!(out, "================");
    let _ = writeln!(out);
    let _ = writeln!(out, "Documents:        {}", stats.documents);
    let _ = writeln!(out, "Located nodes:    {}", stats.nodes);
    let _ = writeln!(out, "Artifacts:        {}", stats.artifacts);
    let _ = writeln!(out, "Artifact steps:   {}", stats.artifact_steps);

    if index.uris().is_empty() {
        return out;
    }

    // Artifacts by document, busiest first, ties in arrival order
    let mut per_uri: Vec<(&str, usize)> = index
        .uris()
        .iter()
        .map(|uri| (uri.as_str(), index.artifacts().artifacts_for_uri(uri).len()))
        .collect();
    per_uri.sort_by(|a, b| b.1.cmp(&a.1));

    let width = per_uri
        .iter()
        .take(MAX_LISTED_DOCUMENTS)
        .map(|(uri, _)| uri.len())
        .max()
        .unwrap_or(0);

    let _ = writeln!(out);
    let _ = writeln!(out, "Artifacts by document:");
    for (uri, count) in per_uri.iter().take(MAX_LISTED_DOCUMENTS) {
        let _ = writeln!(out, "  {:width$} {}", uri, count, width = width);
    }

    if per_uri.len() > MAX_LISTED_DOCUMENTS {
        let _ = writeln!(out, "  ... and {} more", per_uri.len() - MAX_LISTED_DOCUMENTS);
    }

    out
}
