use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing::info;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Destination for a finished report.
pub trait ReportSink {
    /// Stores `report`; returns the written path for file-backed sinks.
    fn persist(&mut self, report: &str) -> Result<Option<PathBuf>>;
}

/// `<prefix>-<YYYY-MM-DD>.md`
pub fn report_file_name(prefix: &str, date: Date) -> Result<String> {
    let stamp = date
        .format(DATE_FORMAT)
        .context("failed to format report date")?;
    Ok(format!("{prefix}-{stamp}.md"))
}

#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path, prefix: &str, date: Date) -> Result<Self> {
        Ok(Self::at(dir.join(report_file_name(prefix, date)?)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for FileSink {
    fn persist(&mut self, report: &str) -> Result<Option<PathBuf>> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create report directory {}", parent.display())
            })?;
        }
        fs::write(&self.path, report)
            .with_context(|| format!("failed to write report {}", self.path.display()))?;
        info!(path = %self.path.display(), bytes = report.len(), "report written");
        Ok(Some(self.path.clone()))
    }
}

/// Streams the report to any writer, typically stdout.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for WriterSink<W> {
    fn persist(&mut self, report: &str) -> Result<Option<PathBuf>> {
        self.writer
            .write_all(report.as_bytes())
            .context("failed to write report")?;
        self.writer.flush().context("failed to flush report")?;
        Ok(None)
    }
}
