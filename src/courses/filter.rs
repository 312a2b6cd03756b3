//! Course selection and the chart/table projections built from it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::courses::types::{
    ChartHover, ChartPoint, ChartSpec, CourseSummary, CourseView, TableRow,
};
use crate::error::QueryError;

pub const MIN_GPA_FLOOR: f64 = 0.0;
pub const MIN_GPA_CEILING: f64 = 4.0;

/// Highest course number listed for undergraduates.
pub const UNDERGRADUATE_MAX_NUMBER: u32 = 500;
/// Lowest course number listed for graduates.
pub const GRADUATE_MIN_NUMBER: u32 = 400;

pub const CHART_TITLE: &str = "GPA";
pub const CHART_SIZE_MAX: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum StudentLevel {
    Undergraduate,
    Graduate,
}

impl StudentLevel {
    pub const ALL: [StudentLevel; 2] = [StudentLevel::Undergraduate, StudentLevel::Graduate];

    /// Whether a course number is listed for this level.
    ///
    /// The ranges overlap: 400-500 level courses show up for both.
    pub fn includes(self, number: u32) -> bool {
        match self {
            StudentLevel::Undergraduate => number <= UNDERGRADUATE_MAX_NUMBER,
            StudentLevel::Graduate => number >= GRADUATE_MIN_NUMBER,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StudentLevel::Undergraduate => "Undergraduate",
            StudentLevel::Graduate => "Graduate",
        }
    }
}

impl fmt::Display for StudentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudentLevel {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "undergraduate" => Ok(StudentLevel::Undergraduate),
            "graduate" => Ok(StudentLevel::Graduate),
            _ => Err(QueryError::UnknownLevel(s.to_string())),
        }
    }
}

/// The 41 slider stops 0.0, 0.1, ..., 4.0.
pub fn gpa_marks() -> Vec<f64> {
    (0..=40).map(|tenths| tenths as f64 / 10.0).collect()
}

pub fn validate_min_gpa(min_gpa: f64) -> Result<f64, QueryError> {
    if min_gpa.is_finite() && (MIN_GPA_FLOOR..=MIN_GPA_CEILING).contains(&min_gpa) {
        Ok(min_gpa)
    } else {
        Err(QueryError::GpaOutOfRange(min_gpa))
    }
}

/// Whether a summary passes all three conditions.
///
/// Average GPA must be strictly greater than `min_gpa`; courses without
/// enrollment never match.
pub fn matches(summary: &CourseSummary, subject: &str, level: StudentLevel, min_gpa: f64) -> bool {
    summary.subject == subject
        && summary.average_gpa.is_some_and(|gpa| gpa > min_gpa)
        && level.includes(summary.number)
}

/// Returns the summaries matching the selection, in input order.
pub fn select<'a>(
    summaries: &'a [CourseSummary],
    subject: &str,
    level: StudentLevel,
    min_gpa: f64,
) -> Vec<&'a CourseSummary> {
    summaries
        .iter()
        .filter(|s| matches(s, subject, level, min_gpa))
        .collect()
}

/// Filters `summaries` and builds the chart and table for the result.
///
/// An unknown subject is not an error; it just matches nothing.
#[tracing::instrument(skip(summaries), fields(matches = tracing::field::Empty))]
pub fn query(
    summaries: &[CourseSummary],
    subject: &str,
    level: StudentLevel,
    min_gpa: f64,
) -> Result<CourseView, QueryError> {
    let min_gpa = validate_min_gpa(min_gpa)?;
    let selected = select(summaries, subject, level, min_gpa);

    tracing::Span::current().record("matches", selected.len());
    debug!(matches = selected.len(), "Filtered courses");

    Ok(CourseView {
        subject: subject.to_string(),
        level,
        min_gpa,
        chart: chart_spec(&selected),
        table: table_rows(&selected),
    })
}

/// Projects summaries onto table rows. Rows without data are skipped.
pub fn table_rows(selected: &[&CourseSummary]) -> Vec<TableRow> {
    selected
        .iter()
        .filter_map(|s| {
            Some(TableRow {
                course: s.label.clone(),
                average_gpa: s.average_gpa?,
                top_grade_pct: s.top_grade_pct?,
            })
        })
        .collect()
}

/// Projects summaries onto scatter points. Rows without data are skipped.
pub fn chart_spec(selected: &[&CourseSummary]) -> ChartSpec {
    let points = selected
        .iter()
        .filter_map(|s| {
            let gpa = s.average_gpa?;
            Some(ChartPoint {
                x: s.top_grade_pct?,
                y: gpa,
                size: s.avg_class_size,
                color: gpa,
                label: s.label.clone(),
                hover: ChartHover {
                    avg_class_size: s.avg_class_size,
                },
            })
        })
        .collect();

    ChartSpec {
        title: CHART_TITLE.to_string(),
        x_title: "% A+/A".to_string(),
        y_title: "Average GPA".to_string(),
        size_max: CHART_SIZE_MAX,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(subject: &str, number: u32, average_gpa: Option<f64>) -> CourseSummary {
        CourseSummary {
            subject: subject.to_string(),
            number,
            title: "Course".to_string(),
            enrolled: if average_gpa.is_some() { 20 } else { 0 },
            gpa_points: 0.0,
            offerings: 1,
            top_grade_count: 0,
            average_gpa,
            top_grade_pct: average_gpa.map(|_| 40.0),
            avg_class_size: 20.0,
            label: format!("{subject} {number}: Course"),
        }
    }

    #[test]
    fn test_level_ranges_overlap() {
        assert!(StudentLevel::Undergraduate.includes(100));
        assert!(StudentLevel::Undergraduate.includes(498));
        assert!(StudentLevel::Undergraduate.includes(500));
        assert!(!StudentLevel::Undergraduate.includes(501));

        assert!(!StudentLevel::Graduate.includes(399));
        assert!(StudentLevel::Graduate.includes(400));
        assert!(StudentLevel::Graduate.includes(498));
        assert!(StudentLevel::Graduate.includes(598));
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!("Undergraduate".parse::<StudentLevel>(), Ok(StudentLevel::Undergraduate));
        assert_eq!(" graduate ".parse::<StudentLevel>(), Ok(StudentLevel::Graduate));
        assert_eq!(
            "phd".parse::<StudentLevel>(),
            Err(QueryError::UnknownLevel("phd".to_string()))
        );
    }

    #[test]
    fn test_gpa_marks() {
        let marks = gpa_marks();
        assert_eq!(marks.len(), 41);
        assert_eq!(marks[0], 0.0);
        assert_eq!(marks[30], 3.0);
        assert_eq!(marks[40], 4.0);
    }

    #[test]
    fn test_validate_min_gpa() {
        assert_eq!(validate_min_gpa(0.0), Ok(0.0));
        assert_eq!(validate_min_gpa(4.0), Ok(4.0));
        assert_eq!(validate_min_gpa(4.1), Err(QueryError::GpaOutOfRange(4.1)));
        assert_eq!(validate_min_gpa(-0.1), Err(QueryError::GpaOutOfRange(-0.1)));
        assert!(validate_min_gpa(f64::NAN).is_err());
    }

    #[test]
    fn test_threshold_is_strict() {
        let summaries = vec![summary("CS", 225, Some(3.0)), summary("CS", 233, Some(3.01))];
        let selected = select(&summaries, "CS", StudentLevel::Undergraduate, 3.0);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].number, 233);
    }

    #[test]
    fn test_no_data_never_matches() {
        let summaries = vec![summary("CS", 225, None)];
        for min_gpa in gpa_marks() {
            assert!(select(&summaries, "CS", StudentLevel::Undergraduate, min_gpa).is_empty());
        }
    }

    #[test]
    fn test_subject_must_match_exactly() {
        let summaries = vec![summary("CS", 225, Some(3.5))];
        assert!(select(&summaries, "cs", StudentLevel::Undergraduate, 0.0).is_empty());
        assert!(select(&summaries, "ECE", StudentLevel::Undergraduate, 0.0).is_empty());
    }

    #[test]
    fn test_498_listed_for_both_levels() {
        let summaries = vec![summary("CS", 498, Some(3.5))];
        assert_eq!(select(&summaries, "CS", StudentLevel::Undergraduate, 3.0).len(), 1);
        assert_eq!(select(&summaries, "CS", StudentLevel::Graduate, 3.0).len(), 1);
    }

    #[test]
    fn test_query_projections() {
        let summaries = vec![summary("CS", 225, Some(3.4)), summary("CS", 598, Some(3.8))];
        let view = query(&summaries, "CS", StudentLevel::Undergraduate, 3.0).unwrap();

        assert_eq!(view.table.len(), 1);
        assert_eq!(view.table[0].course, "CS 225: Course");
        assert_eq!(view.table[0].average_gpa, 3.4);
        assert_eq!(view.table[0].top_grade_pct, 40.0);

        let point = &view.chart.points[0];
        assert_eq!(point.x, 40.0);
        assert_eq!(point.y, 3.4);
        assert_eq!(point.color, 3.4);
        assert_eq!(point.size, 20.0);
        assert_eq!(view.chart.title, "GPA");
        assert_eq!(view.chart.size_max, 50);
    }

    #[test]
    fn test_query_rejects_bad_threshold() {
        let summaries = vec![summary("CS", 225, Some(3.4))];
        assert_eq!(
            query(&summaries, "CS", StudentLevel::Graduate, 5.0),
            Err(QueryError::GpaOutOfRange(5.0))
        );
    }

    #[test]
    fn test_table_row_serializes_with_column_names() {
        let row = TableRow {
            course: "CS 225: Course".to_string(),
            average_gpa: 3.4,
            top_grade_pct: 40.0,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["Course"], "CS 225: Course");
        assert_eq!(json["Average GPA"], 3.4);
        assert_eq!(json["% A+/A"], 40.0);
    }
}
