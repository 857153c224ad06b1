use sfreport_types::ReportResult;

/// Fold one chunk's result into the accumulated result.
///
/// - Rows are appended, keeping chunk order and row order within the chunk.
/// - Column labels not yet present are appended in first-seen order; labels
///   are compared as plain strings, so two labels for the same underlying
///   field both survive.
pub fn merge(acc: &mut ReportResult, chunk: ReportResult) {
    acc.rows.extend(chunk.rows);
    for name in chunk.column_names {
        if !acc.column_names.contains(&name) {
            acc.column_names.push(name);
        }
    }
}

/// Merge a sequence of chunk results in order.
pub fn merge_all<I>(chunks: I) -> ReportResult
where
    I: IntoIterator<Item = ReportResult>,
{
    chunks.into_iter().fold(ReportResult::default(), |mut acc, c| {
        merge(&mut acc, c);
        acc
    })
}
