//! Dump command implementation.

use crate::error::{CliError, CliResult};
use crate::output::OutputFormat;
use cmuscache_core::{CacheImage, Config};
use cmuscache_storage::FileBackend;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// What a completed dump wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DumpSummary {
    /// Number of data rows written.
    pub rows: usize,
}

/// Runs the dump command.
///
/// The header row is written before the file is opened, so it appears even
/// when the cache turns out to be missing or corrupt. Each row is fully
/// written before the next record is decoded.
pub fn run<W: Write + ?Sized>(
    path: &Path,
    format: OutputFormat,
    config: &Config,
    out: &mut W,
) -> CliResult<DumpSummary> {
    format.write_header(out)?;

    let backend = FileBackend::open(path).map_err(|source| CliError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let image = CacheImage::load(&backend).map_err(|err| CliError::from_cache(path, err))?;
    let cache = image
        .parse(config)
        .map_err(|err| CliError::from_cache(path, err))?;

    let mut summary = DumpSummary::default();
    for entry in cache.entries() {
        let entry = entry.map_err(|err| {
            debug!(path = %path.display(), rows = summary.rows, error = %err, "stopping at corrupt record");
            CliError::from_cache(path, err)
        })?;
        format.write_row(&entry.to_row(), out)?;
        summary.rows += 1;
    }

    debug!(path = %path.display(), rows = summary.rows, "dump complete");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmuscache_core::{CacheLayout, TSV_HEADER};
    use cmuscache_testkit::{scenarios, CacheBuilder, EntryBuilder, TempCache};

    fn dump(path: &Path, format: OutputFormat, config: &Config) -> (CliResult<DumpSummary>, String) {
        let mut out = Vec::new();
        let result = run(path, format, config, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn dumps_single_track() {
        let cache = TempCache::from_builder(&scenarios::single_track(CacheLayout::native()));
        let (result, out) = dump(cache.path(), OutputFormat::Tsv, &Config::default());

        assert_eq!(result.unwrap().rows, 1);
        assert_eq!(out, format!("{TSV_HEADER}{}", scenarios::SINGLE_TRACK_ROW));
    }

    #[test]
    fn missing_file_still_writes_header() {
        let cache = TempCache::with_bytes(b"");
        let (result, out) = dump(&cache.missing_path(), OutputFormat::Tsv, &Config::default());

        assert!(matches!(result, Err(CliError::Open { .. })));
        assert_eq!(out, TSV_HEADER);
    }

    #[test]
    fn corrupt_header_writes_no_rows() {
        let cache = TempCache::from_builder(&scenarios::bad_magic(CacheLayout::native()));
        let (result, out) = dump(cache.path(), OutputFormat::Tsv, &Config::default());

        assert!(matches!(result, Err(CliError::Corrupt { .. })));
        assert_eq!(out, TSV_HEADER);
    }

    #[test]
    fn corrupt_record_keeps_rows_before_it() {
        let builder = CacheBuilder::native()
            .entry(EntryBuilder::new("/ok.mp3"))
            .entry(EntryBuilder::new("/bad.mp3").declared_size(u32::MAX));
        let cache = TempCache::from_builder(&builder);
        let (result, out) = dump(cache.path(), OutputFormat::Tsv, &Config::default());

        assert!(matches!(result, Err(CliError::Corrupt { .. })));
        assert_eq!(out.lines().count(), 2);
        assert!(out.lines().nth(1).unwrap().starts_with("/ok.mp3\t"));
    }

    #[test]
    fn short_file_is_header_only() {
        let cache = TempCache::with_bytes(b"CTC\0");
        let (result, out) = dump(cache.path(), OutputFormat::Tsv, &Config::default());

        assert_eq!(result.unwrap().rows, 0);
        assert_eq!(out, TSV_HEADER);
    }

    #[test]
    fn limit_and_json() {
        let cache = TempCache::from_builder(&scenarios::library(CacheLayout::native(), 10));
        let config = Config::new().limit(Some(3));
        let (result, out) = dump(cache.path(), OutputFormat::Json, &config);

        assert_eq!(result.unwrap().rows, 3);
        let filenames: Vec<String> = out
            .lines()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).unwrap();
                value["filename"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(
            filenames,
            vec!["/music/0000.flac", "/music/0001.flac", "/music/0002.flac"]
        );
    }
}
