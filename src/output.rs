//! Output formatting and persistence for course summaries and query views.
//!
//! Supports pretty-printing, JSON serialization, CSV export and a plain-text
//! table for the terminal.

use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

use crate::courses::types::{CourseSummary, CourseView, TableRow};

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty<T: std::fmt::Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Serializes a value as pretty-printed JSON.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Writes all summaries to a CSV file, replacing any existing file.
///
/// Courses without enrollment get empty GPA and percentage cells.
pub fn write_summaries(path: impl AsRef<Path>, summaries: &[CourseSummary]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for summary in summaries {
        writer.serialize(summary)?;
    }
    writer.flush()?;

    info!(path = %path.display(), courses = summaries.len(), "Wrote course summaries");
    Ok(())
}

/// Renders table rows as CSV text with the dashboard's column names.
pub fn rows_to_csv(rows: &[TableRow]) -> Result<String> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(vec![]);
    if rows.is_empty() {
        writer.write_record(["Course", "Average GPA", "% A+/A"])?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

/// Renders a query view as an aligned plain-text table.
pub fn render_table(view: &CourseView) -> String {
    let headers = ["Course", "Average GPA", "% A+/A", "Avg Class Size"];
    let rows: Vec<[String; 4]> = view
        .chart
        .points
        .iter()
        .map(|p| {
            [
                p.label.clone(),
                format!("{:.2}", p.y),
                format!("{:.2}", p.x),
                format!("{:.2}", p.size),
            ]
        })
        .collect();

    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = format!(
        "{} | {} | min GPA > {:.2} | {} courses\n",
        view.subject,
        view.level,
        view.min_gpa,
        rows.len()
    );
    push_line(&mut out, &headers.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(idx, (cell, &width))| {
            if idx == 0 {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::courses::aggregate::aggregate_courses;
    use crate::courses::filter::{StudentLevel, query};
    use crate::courses::types::GradeRecord;
    use crate::grades::Grade;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn summaries() -> Vec<CourseSummary> {
        aggregate_courses(&[
            GradeRecord::new("CS", 225, "Data Structures")
                .with_count(Grade::A, 30)
                .with_count(Grade::B, 10),
            GradeRecord::new("CS", 591, "Seminar"),
        ])
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&summaries());
    }

    #[test]
    fn test_render_json_keeps_no_data_as_null() {
        let json = render_json(&summaries()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["average_gpa"], 3.75);
        assert!(value[1]["average_gpa"].is_null());
    }

    #[test]
    fn test_write_summaries_creates_file() {
        let path = temp_path("gpa_explorer_test_summaries.csv");
        let _ = fs::remove_file(&path);

        write_summaries(&path, &summaries()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("subject,number,title,enrolled"));
        assert!(lines[2].contains("CS 591: Seminar"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_summaries_overwrites() {
        let path = temp_path("gpa_explorer_test_overwrite.csv");
        let _ = fs::remove_file(&path);

        write_summaries(&path, &summaries()).unwrap();
        write_summaries(&path, &summaries()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header_count = content.lines().filter(|l| l.starts_with("subject")).count();
        assert_eq!(header_count, 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_rows_to_csv() {
        let view = query(&summaries(), "CS", StudentLevel::Undergraduate, 3.0).unwrap();
        let text = rows_to_csv(&view.table).unwrap();
        assert_eq!(
            text,
            "Course,Average GPA,% A+/A\nCS 225: Data Structures,3.75,75.0\n"
        );
    }

    #[test]
    fn test_rows_to_csv_empty_keeps_header() {
        assert_eq!(rows_to_csv(&[]).unwrap(), "Course,Average GPA,% A+/A\n");
    }

    #[test]
    fn test_render_table() {
        let view = query(&summaries(), "CS", StudentLevel::Graduate, 0.0).unwrap();
        let text = render_table(&view);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "CS | Graduate | min GPA > 0.00 | 0 courses");
        assert!(lines[1].starts_with("Course"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_render_table_header_keeps_threshold_precision() {
        let view = query(&summaries(), "CS", StudentLevel::Undergraduate, 3.25).unwrap();
        let text = render_table(&view);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "CS | Undergraduate | min GPA > 3.25 | 1 courses");
        assert!(lines[3].starts_with("CS 225: Data Structures"));
    }
}
