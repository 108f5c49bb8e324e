use crate::domain::model::{DrillingLog, Parameter, DEPTH_COLUMN};
use crate::utils::error::{Result, SimError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 摘要輸出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum SummaryFormat {
    #[default]
    Text,
    Json,
    None,
}

pub fn to_csv(log: &DrillingLog) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for sample in &log.samples {
        writer.serialize(sample)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| SimError::ProcessingError {
            message: format!("Failed to flush CSV writer: {}", e.error()),
        })?;
    String::from_utf8(bytes).map_err(|e| SimError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

/// Streams the samples of one or more logs into a single CSV document.
///
/// The header row is written once, before the first sample.
pub struct CsvSink<W: std::io::Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl<W: std::io::Write> CsvSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
            rows: 0,
        }
    }

    pub fn append(&mut self, log: &DrillingLog) -> Result<()> {
        for sample in &log.samples {
            self.writer.serialize(sample)?;
        }
        self.rows += log.len();
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        self.writer.into_inner().map_err(|e| SimError::ProcessingError {
            message: format!("Failed to flush CSV writer: {}", e.error()),
        })
    }
}

/// 前 `rows` 筆資料的對齊文字表格
pub fn preview(log: &DrillingLog, rows: usize) -> String {
    let mut headers = vec![DEPTH_COLUMN.to_string()];
    headers.extend(Parameter::ALL.iter().map(|p| p.column().to_string()));

    let body: Vec<Vec<String>> = log
        .samples
        .iter()
        .take(rows)
        .map(|s| {
            let mut row = vec![s.depth_m.to_string()];
            row.extend(Parameter::ALL.iter().map(|p| format!("{:.3}", s.value(*p))));
            row
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            body.iter()
                .map(|row| row[i].len())
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:>width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut lines = vec![format_row(&headers)];
    lines.extend(body.iter().map(|row| format_row(row)));
    lines.join("\n")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelStats {
    pub column: String,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogSummary {
    pub samples: usize,
    pub top_depth_m: u32,
    pub bottom_depth_m: u32,
    pub seed: Option<u64>,
    pub channels: Vec<ChannelStats>,
    pub generated_at: DateTime<Utc>,
}

pub fn summarize(log: &DrillingLog) -> Result<LogSummary> {
    let (first, last) = match (log.samples.first(), log.samples.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(SimError::ProcessingError {
                message: "Cannot summarize an empty drilling log".to_string(),
            })
        }
    };

    let channels = Parameter::ALL
        .iter()
        .map(|parameter| {
            let (min, max, sum) = log.channel(*parameter).fold(
                (f64::INFINITY, f64::NEG_INFINITY, 0.0),
                |(min, max, sum), v| (min.min(v), max.max(v), sum + v),
            );
            ChannelStats {
                column: parameter.column().to_string(),
                min,
                max,
                mean: sum / log.len() as f64,
            }
        })
        .collect();

    Ok(LogSummary {
        samples: log.len(),
        top_depth_m: first.depth_m,
        bottom_depth_m: last.depth_m,
        seed: log.seed,
        channels,
        generated_at: Utc::now(),
    })
}

impl LogSummary {
    pub fn to_text(&self) -> String {
        let mut lines = vec![format!(
            "{} samples, {}m - {}m (generated {})",
            self.samples,
            self.top_depth_m,
            self.bottom_depth_m,
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )];
        for channel in &self.channels {
            lines.push(format!(
                "  {:<22} min {:>9.3}  max {:>9.3}  mean {:>9.3}",
                channel.column, channel.min, channel.max, channel.mean
            ));
        }
        lines.join("\n")
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Preview and summary text for one generated log, as shown after a run.
pub fn describe(log: &DrillingLog, preview_rows: usize, format: SummaryFormat) -> Result<String> {
    let mut sections = Vec::new();
    if preview_rows > 0 {
        sections.push(preview(log, preview_rows));
    }
    match format {
        SummaryFormat::Text => sections.push(summarize(log)?.to_text()),
        SummaryFormat::Json => sections.push(summarize(log)?.to_json()?),
        SummaryFormat::None => {}
    }
    Ok(sections.join("\n\n"))
}
