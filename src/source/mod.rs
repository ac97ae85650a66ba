//! Line-delimited record source.
//!
//! Input is one or more NDJSON files, each line a JSON object carrying a
//! nested `article_body.html` field. Files are discovered by a recursive
//! walk under a configured root and always processed in sorted-path order
//! so repeated runs over unchanged input are reproducible.
//!
//! Malformed lines and records without the HTML field are counted skips,
//! never fatal. The scan driver hands each HTML body to a visitor closure
//! whose [`ScanControl`] return value is the single stop signal: the
//! coordinator that owns the early-stop decision across the nested
//! per-file/per-line loops.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;

/// Tells the scan driver whether to keep visiting records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanControl {
    Continue,
    Stop,
}

/// Per-scan bookkeeping of skipped input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Files opened before the scan ended (early stop included).
    pub files_considered: usize,
    /// Lines that failed to parse as JSON.
    pub malformed_lines: usize,
    /// Parsed records without a non-empty `article_body.html`.
    pub missing_html: usize,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    article_body: Option<ArticleBody>,
}

#[derive(Debug, Deserialize)]
struct ArticleBody {
    #[serde(default)]
    html: Option<String>,
}

/// An ordered set of NDJSON dump files.
#[derive(Debug, Clone)]
pub struct RecordSource {
    files: Vec<PathBuf>,
}

impl RecordSource {
    /// Recursively discover `*.ndjson` files under `root`, sorted by path.
    pub fn discover(root: &Path) -> Result<Self> {
        let mut files = Vec::new();
        collect_ndjson(root, &mut files)?;
        files.sort();
        Ok(Self { files })
    }

    /// Use an explicit file list (sorted for determinism).
    pub fn from_files(mut files: Vec<PathBuf>) -> Self {
        files.sort();
        Self { files }
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Visit every record's HTML body in deterministic order.
    ///
    /// The visitor's [`ScanControl`] return is checked after each record;
    /// `Stop` ends the whole scan immediately. I/O errors are fatal,
    /// malformed records are counted skips.
    pub fn for_each_html<F>(&self, mut visit: F) -> Result<ScanStats>
    where
        F: FnMut(&str) -> Result<ScanControl>,
    {
        let mut stats = ScanStats::default();

        'files: for path in &self.files {
            stats.files_considered += 1;
            let reader = BufReader::new(File::open(path)?);
            for line in reader.lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let record: RawRecord = match serde_json::from_str(&line) {
                    Ok(record) => record,
                    Err(_) => {
                        stats.malformed_lines += 1;
                        continue;
                    }
                };
                let html = record.article_body.and_then(|body| body.html);
                let html = match html.as_deref() {
                    Some(html) if !html.is_empty() => html,
                    _ => {
                        stats.missing_html += 1;
                        continue;
                    }
                };
                if visit(html)? == ScanControl::Stop {
                    break 'files;
                }
            }
        }
        Ok(stats)
    }
}

fn collect_ndjson(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_ndjson(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "ndjson") {
            files.push(path);
        }
    }
    Ok(())
}
