//! Generic list table: columns, search, selection and CSV export.

pub mod columns;

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Colour hint for a cell; the UI maps these onto theme colours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Good,
    Bad,
    Warn,
    Info,
    Dim,
}

pub struct Column<'a, T> {
    pub label: &'static str,
    pub cell: Box<dyn Fn(&T) -> String + 'a>,
    pub tone: Option<fn(&T) -> Tone>,
}

impl<'a, T> Column<'a, T> {
    pub fn new(label: &'static str, cell: impl Fn(&T) -> String + 'a) -> Self {
        Self { label, cell: Box::new(cell), tone: None }
    }

    pub fn toned(mut self, tone: fn(&T) -> Tone) -> Self {
        self.tone = Some(tone);
        self
    }

    pub fn render(&self, row: &T) -> String {
        (self.cell)(row)
    }

    pub fn tone_of(&self, row: &T) -> Tone {
        self.tone.map_or(Tone::Plain, |f| f(row))
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export")]
    Empty,
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Per-screen table state: search query and cursor
#[derive(Debug, Clone, Default)]
pub struct TableState {
    pub query: String,
    pub searching: bool,
    pub selected: usize,
}

impl TableState {
    pub fn select_next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_prev(&mut self, len: usize) {
        if len > 0 {
            self.selected = self.selected.checked_sub(1).unwrap_or(len - 1);
        }
    }

    /// Keep the cursor inside a row set that may have shrunk
    pub fn clamp(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}

/// Rows with any rendered cell containing `query`, case-insensitively
pub fn search<'r, T>(rows: Vec<&'r T>, columns: &[Column<'_, T>], query: &str) -> Vec<&'r T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|row| {
            columns
                .iter()
                .any(|c| c.render(row).to_lowercase().contains(&needle))
        })
        .collect()
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn to_csv<T>(columns: &[Column<'_, T>], rows: &[&T]) -> String {
    let mut out = String::new();
    let header: Vec<String> = columns.iter().map(|c| csv_field(c.label)).collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for row in rows {
        let cells: Vec<String> = columns.iter().map(|c| csv_field(&c.render(row))).collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

/// `<name>-<YYYY-MM-DD>.csv`
pub fn export_file_name(name: &str, today: NaiveDate) -> String {
    format!("{}-{}.csv", name, today.format("%Y-%m-%d"))
}

/// Write visible rows to `<dir>/<name>-<date>.csv`
pub async fn export<T>(
    dir: &Path,
    name: &str,
    today: NaiveDate,
    columns: &[Column<'_, T>],
    rows: &[&T],
) -> Result<PathBuf, ExportError> {
    if rows.is_empty() {
        return Err(ExportError::Empty);
    }

    let path = dir.join(export_file_name(name, today));
    let content = to_csv(columns, rows);

    if let Err(e) = tokio::fs::create_dir_all(dir).await {
        tracing::warn!("Could not create export directory: {}", e);
    }
    tokio::fs::write(&path, content)
        .await
        .map_err(|source| ExportError::Write { path: path.clone(), source })?;

    tracing::info!(rows = rows.len(), "Exported {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: &'static str,
        note: &'static str,
    }

    fn columns() -> Vec<Column<'static, Row>> {
        vec![
            Column::new("Name", |r: &Row| r.name.to_string()),
            Column::new("Note", |r: &Row| r.note.to_string()),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive_over_all_cells() {
        let rows = [
            Row { name: "Pizza Corner", note: "casablanca" },
            Row { name: "Fresh Market", note: "Rabat" },
        ];
        let cols = columns();

        let hits = search(rows.iter().collect(), &cols, "PIZZA");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Pizza Corner");

        let hits = search(rows.iter().collect(), &cols, "rabat");
        assert_eq!(hits[0].name, "Fresh Market");

        assert_eq!(search(rows.iter().collect(), &cols, "  ").len(), 2);
        assert!(search(rows.iter().collect(), &cols, "tokyo").is_empty());
    }

    #[test]
    fn test_csv_quotes_special_cells() {
        let rows = [Row { name: "Sweet \"Treats\"", note: "789 Zerktouni, Marrakech" }];
        let refs: Vec<&Row> = rows.iter().collect();

        let csv = to_csv(&columns(), &refs);
        assert_eq!(csv, "Name,Note\n\"Sweet \"\"Treats\"\"\",\"789 Zerktouni, Marrakech\"\n");
    }

    #[test]
    fn test_selection_wraps_and_clamps() {
        let mut state = TableState::default();
        state.select_prev(3);
        assert_eq!(state.selected, 2);
        state.select_next(3);
        assert_eq!(state.selected, 0);

        state.selected = 5;
        state.clamp(2);
        assert_eq!(state.selected, 1);
        state.clamp(0);
        assert_eq!(state.selected, 0);

        state.select_next(0);
        assert_eq!(state.selected, 0);
    }

    #[tokio::test]
    async fn test_export_writes_dated_file() {
        let dir = std::env::temp_dir().join(format!("omeal-export-{}", std::process::id()));
        let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let rows = [Row { name: "a", note: "b" }];
        let refs: Vec<&Row> = rows.iter().collect();

        let path = export(&dir, "vendors", today, &columns(), &refs).await.unwrap();
        assert!(path.ends_with("vendors-2024-01-20.csv"));
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "Name,Note\na,b\n");

        let empty: Vec<&Row> = Vec::new();
        assert!(matches!(export(&dir, "vendors", today, &columns(), &empty).await, Err(ExportError::Empty)));

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
