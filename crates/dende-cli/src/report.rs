use std::{
    io::{self, Write},
    path::Path,
};

use chrono::{DateTime, Utc};
use dende_stats::{
    FrequencyMethod, FrequencyTable, Value,
    histogram::Histogram,
    quartiles::Quartiles,
    summary::{ColumnSummary, CovariancePair, Relationship, TopFrequency},
};
use serde::Serialize;

const BANNER_WIDTH: usize = 60;
const MODE_LIMIT: usize = 5;

/// Where a report came from and when it was produced.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ReportHeader {
    pub source: String,
    pub generated_at: DateTime<Utc>,
}

impl ReportHeader {
    pub fn new(source: &Path) -> Self {
        Self {
            source: source.display().to_string(),
            generated_at: Utc::now(),
        }
    }

    fn write_text(&self, w: &mut dyn Write, title: &str) -> io::Result<()> {
        banner(w, title)?;
        writeln!(w, "Source:    {}", self.source)?;
        writeln!(
            w,
            "Generated: {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(w)
    }
}

fn banner(w: &mut dyn Write, title: &str) -> io::Result<()> {
    writeln!(w, "{title}")?;
    writeln!(w, "{}", "=".repeat(BANNER_WIDTH))
}

fn section(w: &mut dyn Write, title: &str) -> io::Result<()> {
    writeln!(w, "{title}")?;
    writeln!(w, "{}", "-".repeat(title.len()))
}

fn format_modes(modes: &[Value]) -> String {
    let shown = modes
        .iter()
        .take(MODE_LIMIT)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    if modes.len() > MODE_LIMIT {
        format!("{shown}, ... (total: {})", modes.len())
    } else {
        shown
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct DescribeReport {
    #[serde(flatten)]
    pub header: ReportHeader,
    pub columns: Vec<ColumnSummary>,
    pub covariances: Vec<CovarianceRow>,
}

/// Serializable form of a [`CovariancePair`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct CovarianceRow {
    pub left: String,
    pub right: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub covariance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<Relationship>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&CovariancePair> for CovarianceRow {
    fn from(pair: &CovariancePair) -> Self {
        Self {
            left: pair.left.clone(),
            right: pair.right.clone(),
            covariance: pair.covariance.as_ref().ok().copied(),
            relationship: pair.relationship(),
            error: pair.covariance.as_ref().err().map(ToString::to_string),
        }
    }
}

impl DescribeReport {
    pub fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
        self.header.write_text(w, "Descriptive Statistics Report")?;
        for summary in &self.columns {
            write_summary(w, summary)?;
            writeln!(w)?;
        }

        banner(w, "Covariance")?;
        if self.covariances.is_empty() {
            writeln!(w, "  (fewer than two numeric columns)")?;
        }
        for row in &self.covariances {
            match (row.covariance, row.relationship, &row.error) {
                (Some(cov), Some(relationship), _) => writeln!(
                    w,
                    "  {} x {}: {cov:.4} ({})",
                    row.left,
                    row.right,
                    relationship_label(relationship)
                )?,
                (_, _, Some(error)) => {
                    writeln!(w, "  {} x {}: n/a ({error})", row.left, row.right)?;
                }
                _ => writeln!(w, "  {} x {}: n/a", row.left, row.right)?,
            }
        }
        Ok(())
    }
}

fn relationship_label(relationship: Relationship) -> &'static str {
    match relationship {
        Relationship::Positive => "+ move together",
        Relationship::Negative => "- move opposite",
        Relationship::Uncorrelated => "0 no linear relationship",
    }
}

fn write_summary(w: &mut dyn Write, summary: &ColumnSummary) -> io::Result<()> {
    section(w, &format!("Column: {}", summary.column))?;
    writeln!(w, "  {:<14}{}", "Count:", summary.count)?;
    if summary.ignored > 0 {
        writeln!(w, "  {:<14}{} non-numeric", "Ignored:", summary.ignored)?;
    }
    writeln!(w, "  {:<14}{}", "Distinct:", summary.distinct)?;
    match &summary.median {
        Some(median) => writeln!(w, "  {:<14}{median}", "Median:")?,
        None => writeln!(w, "  {:<14}n/a", "Median:")?,
    }
    writeln!(w, "  {:<14}{}", "Mode:", format_modes(&summary.modes))?;

    if let Some(numeric) = &summary.numeric {
        let stats = &numeric.stats;
        let q = &numeric.quartiles;
        writeln!(w, "  {:<14}{:.4}", "Mean:", stats.mean)?;
        writeln!(w, "  {:<14}{:.4}", "Variance:", stats.variance)?;
        writeln!(w, "  {:<14}{:.4}", "Std dev:", stats.std_dev)?;
        writeln!(
            w,
            "  {:<14}{} .. {} (range {})",
            "Min/Max:", stats.min, stats.max, stats.range
        )?;
        writeln!(
            w,
            "  {:<14}Q1={} Q2={} Q3={} (IQR {})",
            "Quartiles:",
            q.q1,
            q.q2,
            q.q3,
            q.iqr()
        )?;
    }

    writeln!(
        w,
        "  {:<14}{} / {:.4}",
        "Cumulative:", summary.cumulative_absolute, summary.cumulative_relative
    )?;
    if !summary.top.is_empty() {
        writeln!(w, "  Most frequent:")?;
        write_distribution(w, &summary.top, 4)?;
    }
    Ok(())
}

fn write_distribution(w: &mut dyn Write, rows: &[TopFrequency], indent: usize) -> io::Result<()> {
    let width = rows
        .iter()
        .map(|row| row.value.to_string().len())
        .max()
        .unwrap_or(0)
        .max("value".len());
    writeln!(
        w,
        "{:indent$}{:<width$}  {:>8}  {:>8}",
        "", "value", "count", "percent"
    )?;
    for row in rows {
        writeln!(
            w,
            "{:indent$}{:<width$}  {:>8}  {:>7.2}%",
            "",
            row.value.to_string(),
            row.count,
            row.proportion * 100.0
        )?;
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct FrequencyReport {
    #[serde(flatten)]
    pub header: ReportHeader,
    pub column: String,
    #[serde(flatten)]
    pub table: FrequencyRows,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum FrequencyRows {
    /// Count and proportion of every distinct value.
    Distribution { rows: Vec<TopFrequency> },
    /// Running totals in accumulation order.
    Cumulative {
        method: FrequencyMethod,
        rows: FrequencyTable<f64>,
    },
}

impl FrequencyReport {
    pub fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
        self.header.write_text(w, "Frequency Report")?;
        match &self.table {
            FrequencyRows::Distribution { rows } => {
                section(w, &format!("Column: {}", self.column))?;
                write_distribution(w, rows, 2)?;
            }
            FrequencyRows::Cumulative { method, rows } => {
                section(w, &format!("Column: {} (cumulative {method})", self.column))?;
                let width = rows
                    .values()
                    .map(|value| value.to_string().len())
                    .max()
                    .unwrap_or(0);
                for (value, total) in rows.iter() {
                    match method {
                        FrequencyMethod::Absolute => {
                            writeln!(w, "  {:<width$}  {total:>8}", value.to_string())?;
                        }
                        FrequencyMethod::Relative => {
                            writeln!(w, "  {:<width$}  {total:>8.4}", value.to_string())?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct HistogramReport {
    #[serde(flatten)]
    pub header: ReportHeader,
    pub column: String,
    pub histogram: Histogram,
}

impl HistogramReport {
    pub fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
        const BAR_WIDTH: u64 = 40;

        self.header.write_text(w, "Histogram Report")?;
        section(w, &format!("Column: {}", self.column))?;
        let peak = self.histogram.counts().into_iter().max().unwrap_or(0);
        let last = self.histogram.bins.len().saturating_sub(1);
        for (idx, ((lo, hi), count)) in self.histogram.iter().enumerate() {
            let close = if idx == last { ']' } else { ')' };
            let bar = if peak == 0 { 0 } else { count * BAR_WIDTH / peak };
            writeln!(
                w,
                "  [{lo:>10.2}, {hi:>10.2}{close}  {count:>6}  {}",
                "#".repeat(usize::try_from(bar).unwrap_or(0))
            )?;
        }
        writeln!(w, "  total: {}", self.histogram.total())
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct TransitionReport {
    #[serde(flatten)]
    pub header: ReportHeader,
    pub column: String,
    pub from: Value,
    pub to: Value,
    pub probability: f64,
}

impl TransitionReport {
    pub fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
        self.header.write_text(w, "Transition Report")?;
        section(w, &format!("Column: {}", self.column))?;
        writeln!(
            w,
            "  P({} follows {}) = {:.4}",
            self.to, self.from, self.probability
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct QuartilesReport {
    #[serde(flatten)]
    pub header: ReportHeader,
    pub column: String,
    pub quartiles: Quartiles,
    pub iqr: f64,
}

impl QuartilesReport {
    pub fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
        self.header.write_text(w, "Quartiles Report")?;
        section(w, &format!("Column: {}", self.column))?;
        writeln!(w, "  {:<6}{}", "Q1:", self.quartiles.q1)?;
        writeln!(w, "  {:<6}{}", "Q2:", self.quartiles.q2)?;
        writeln!(w, "  {:<6}{}", "Q3:", self.quartiles.q3)?;
        writeln!(w, "  {:<6}{}", "IQR:", self.iqr)
    }
}
