//! Formatting heuristic results and appending them to a report file.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use tracing::debug;

use crate::{Heuristic, Tour};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ReportFormat {
    /// Tab separated: instance, heuristic, cost, milliseconds and optionally the tour
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// One run of one heuristic on one instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub instance: String,
    pub heuristic: Heuristic,
    pub cost: f64,
    pub elapsed: Duration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<usize>>,
}

impl Outcome {
    /// `with_order` keeps the visiting order, which can be long for big instances
    pub fn new(
        instance: &str,
        heuristic: Heuristic,
        tour: Tour,
        elapsed: Duration,
        with_order: bool,
    ) -> Self {
        Self {
            instance: instance.to_owned(),
            heuristic,
            cost: tour.cost,
            elapsed,
            order: with_order.then_some(tour.order),
        }
    }

    pub fn to_line(&self, format: ReportFormat) -> serde_json::Result<String> {
        match format {
            ReportFormat::Json => serde_json::to_string(self),
            ReportFormat::Text => {
                let mut line = format!(
                    "{}\t{}\t{:.4}\t{:.3}ms",
                    self.instance,
                    self.heuristic,
                    self.cost,
                    self.elapsed.as_secs_f64() * 1000.
                );
                if let Some(order) = &self.order {
                    line.push('\t');
                    line.push_str(
                        &order
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(" "),
                    );
                }
                Ok(line)
            }
        }
    }
}

/// `reports/report-<unix seconds>.log`
pub fn default_report_path() -> PathBuf {
    let seconds = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|since| since.as_secs())
        .unwrap_or_default();
    Path::new("reports").join(format!("report-{seconds}.log"))
}

/// Append-only sink for report lines, flushed after every line.
#[derive(Debug)]
pub struct ReportWriter {
    path: PathBuf,
    file: File,
}

impl ReportWriter {
    /// Open `path` for appending, creating it and its parent directories if needed.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        debug!("Appending report lines to {}", path.display());
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.file, "{line}")?;
        self.file.flush()
    }
}
