//! Tab-delimited output of extracted listings.

use crate::alibaba::ItemRecord;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Column order of the output file.
pub const HEADER: [&str; 7] = [
    "item_url",
    "listing_title",
    "seller_name",
    "store_url",
    "price",
    "image_url",
    "seller_location",
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Writes result sets into a directory, one file per search.
pub struct OutputWriter {
    dir: PathBuf,
}

impl OutputWriter {
    /// Creates a writer targeting `dir`. The directory is created lazily.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Saves `items` for `search_text` and returns the file path.
    ///
    /// Nothing is written and `None` is returned when `items` is empty.
    pub fn save(&self, search_text: &str, items: &[ItemRecord]) -> Result<Option<PathBuf>> {
        self.save_at(search_text, items, Local::now())
    }

    /// Same as [`OutputWriter::save`] with an explicit timestamp.
    pub fn save_at(
        &self,
        search_text: &str,
        items: &[ItemRecord],
        timestamp: DateTime<Local>,
    ) -> Result<Option<PathBuf>> {
        if items.is_empty() {
            return Ok(None);
        }

        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create output directory: {}", self.dir.display()))?;

        let path = output_path(&self.dir, search_text, timestamp);
        debug!("Writing {} items to {}", items.len(), path.display());

        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        write_items(file, items)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;

        Ok(Some(path))
    }
}

/// Builds `<dir>/<search text>_<timestamp>.csv`.
///
/// Path separators in the search text are replaced so the file always lands
/// directly inside `dir`.
pub fn output_path(dir: &Path, search_text: &str, timestamp: DateTime<Local>) -> PathBuf {
    let stem: String =
        search_text.chars().map(|c| if c == '/' || c == '\\' { '_' } else { c }).collect();
    dir.join(format!("{}_{}.csv", stem, timestamp.format(TIMESTAMP_FORMAT)))
}

/// Serializes items as tab-delimited, `|`-quoted rows under [`HEADER`].
/// Missing fields become empty cells.
pub fn write_items<W: Write>(writer: W, items: &[ItemRecord]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote(b'|')
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    wtr.write_record(HEADER)?;

    for item in items {
        let cell = |field: &Option<String>| field.clone().unwrap_or_default();
        wtr.write_record([
            cell(&item.item_url),
            item.listing_title.clone(),
            cell(&item.seller_name),
            cell(&item.store_url),
            cell(&item.price),
            cell(&item.image_url),
            cell(&item.seller_location),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
