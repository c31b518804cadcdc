use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
};

use anyhow::{Context, bail};
use clap::Args;
use dende_stats::{Column, Dataset, Value};

/// Where to read the dataset from and how to parse it.
#[derive(Debug, Clone, Args)]
pub(crate) struct DatasetArg {
    /// Path to the CSV file; the first row holds the column names
    pub path: PathBuf,

    /// Field delimiter
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Cell values treated as missing (comma-separated)
    #[arg(long, value_delimiter = ',', default_values = ["N/A", ""])]
    pub missing: Vec<String>,
}

impl DatasetArg {
    pub fn load(&self) -> anyhow::Result<Dataset> {
        let options = self.csv_options()?;
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open dataset: {}", self.path.display()))?;
        let dataset = read_dataset(BufReader::new(file), &options)
            .with_context(|| format!("Failed to parse dataset: {}", self.path.display()))?;
        tracing::info!(
            path = %self.path.display(),
            columns = dataset.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    fn csv_options(&self) -> anyhow::Result<CsvOptions> {
        let Ok(delimiter) = u8::try_from(self.delimiter) else {
            bail!("delimiter must be a single-byte character, got {:?}", self.delimiter);
        };
        Ok(CsvOptions {
            delimiter,
            missing: self.missing.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CsvOptions {
    pub delimiter: u8,
    pub missing: Vec<String>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            missing: vec!["N/A".to_owned(), String::new()],
        }
    }
}

/// Reads a headed CSV table into a dataset, one column per header field.
///
/// Missing cells are dropped from their column, so columns of one table may
/// end up with different lengths. Rows shorter than the header leave the
/// trailing columns without a value; extra trailing fields are ignored.
pub(crate) fn read_dataset<R>(reader: R, options: &CsvOptions) -> anyhow::Result<Dataset>
where
    R: io::Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .flexible(true)
        .from_reader(reader);

    let names = reader
        .headers()
        .context("Failed to read CSV header")?
        .iter()
        .map(|name| clean_cell(name).to_owned())
        .collect::<Vec<_>>();
    let mut columns = vec![Column::default(); names.len()];

    for (row, record) in reader.records().enumerate() {
        // header is line 1
        let record = record.with_context(|| format!("Failed to read CSV line {}", row + 2))?;
        for (column, cell) in columns.iter_mut().zip(record.iter()) {
            let cell = clean_cell(cell);
            if options.missing.iter().any(|marker| marker == cell) {
                continue;
            }
            column.push(parse_value(cell));
        }
    }

    let mut dataset = Dataset::new();
    for (name, column) in names.into_iter().zip(columns) {
        if dataset.contains(&name) {
            tracing::warn!(column = %name, "duplicate column name, keeping the last one");
        }
        dataset.insert(name, column);
    }
    Ok(dataset)
}

/// Parses a cell or argument: finite numbers become [`Value::Number`],
/// everything else [`Value::Text`]. `-0` reads as `0`.
pub(crate) fn parse_value(s: &str) -> Value {
    match s.parse::<f64>() {
        Ok(number) if number.is_finite() => Value::Number(number + 0.0),
        _ => Value::Text(s.to_owned()),
    }
}

fn clean_cell(cell: &str) -> &str {
    cell.trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
}
