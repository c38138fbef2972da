//! Output formats.

use crate::error::CliResult;
use clap::ValueEnum;
use cmuscache_core::{write_tsv_header, TrackRow};
use std::io::Write;

/// How rows are written to standard output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated values with a header line.
    #[default]
    Tsv,
    /// One JSON object per line.
    Json,
}

impl OutputFormat {
    /// Writes whatever precedes the first row.
    pub fn write_header<W: Write + ?Sized>(self, out: &mut W) -> CliResult<()> {
        match self {
            Self::Tsv => write_tsv_header(out)?,
            Self::Json => {}
        }
        Ok(())
    }

    /// Writes one row.
    pub fn write_row<W: Write + ?Sized>(self, row: &TrackRow<'_>, out: &mut W) -> CliResult<()> {
        match self {
            Self::Tsv => row.write_tsv(out)?,
            Self::Json => {
                serde_json::to_writer(&mut *out, row)?;
                out.write_all(b"\n")?;
            }
        }
        Ok(())
    }
}
