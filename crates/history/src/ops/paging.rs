//! Chunked pagination over a single source.

use std::collections::HashSet;

use crate::{HistoryConfig, RawRecord, RecordSource, ResultHistory, RowRange};

/// Reads `source` for `identity` in chunks of `config.chunk_size`.
///
/// Chunks are requested one after the other, stopping as soon as a chunk
/// comes back short (the source is exhausted) or `max_rows_per_source` rows
/// have been read. The last request is clipped to the remaining budget plus
/// one row, which only tells whether older rows are left out.
///
/// Rows already returned by an earlier chunk are skipped: a record inserted
/// at the head between two chunks shifts the offsets by one.
pub async fn fetch_source(
    source: &dyn RecordSource,
    identity: &str,
    config: &HistoryConfig,
) -> ResultHistory<Vec<RawRecord>> {
    config.validate()?;
    let kind = source.kind();
    let scope = kind.scope(identity);
    let ceiling = usize::try_from(config.max_rows_per_source).unwrap_or(usize::MAX);

    let mut rows: Vec<RawRecord> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut offset = 0u64;
    while rows.len() < ceiling {
        let remaining = (ceiling - rows.len()) as u64;
        let limit = if config.chunk_size >= remaining {
            remaining.saturating_add(1)
        } else {
            config.chunk_size
        };
        let mut chunk = source.fetch(&scope, RowRange::new(offset, limit)).await?;
        chunk.truncate(usize::try_from(limit).unwrap_or(usize::MAX));

        let fetched = chunk.len() as u64;
        let before = rows.len();
        rows.extend(
            chunk
                .into_iter()
                .filter(|record| seen.insert(record.id().to_string())),
        );
        tracing::debug!(
            source = %kind,
            offset,
            limit,
            fetched,
            skipped = fetched as usize - (rows.len() - before),
            "fetched chunk"
        );
        offset += fetched;

        if fetched < limit {
            return Ok(rows);
        }
    }

    if rows.len() > ceiling {
        rows.truncate(ceiling);
        tracing::warn!(
            source = %kind,
            ceiling,
            "source reached its row ceiling, older rows are left out"
        );
    }
    Ok(rows)
}
