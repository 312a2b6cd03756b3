//! Data types used by the aggregation and query pipeline.

use serde::{Deserialize, Serialize};

use crate::courses::filter::StudentLevel;
use crate::grades::Grade;

/// A single offering deserialized from the grade CSV.
///
/// Columns the dataset carries beyond these (term, instructor, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GradeRecord {
    #[serde(rename = "Subject")]
    pub subject: String,
    #[serde(rename = "Number")]
    pub number: u32,
    #[serde(rename = "Course Title")]
    pub title: String,

    #[serde(rename = "A+")]
    pub a_plus: u64,
    #[serde(rename = "A")]
    pub a: u64,
    #[serde(rename = "A-")]
    pub a_minus: u64,
    #[serde(rename = "B+")]
    pub b_plus: u64,
    #[serde(rename = "B")]
    pub b: u64,
    #[serde(rename = "B-")]
    pub b_minus: u64,
    #[serde(rename = "C+")]
    pub c_plus: u64,
    #[serde(rename = "C")]
    pub c: u64,
    #[serde(rename = "C-")]
    pub c_minus: u64,
    #[serde(rename = "D+")]
    pub d_plus: u64,
    #[serde(rename = "D")]
    pub d: u64,
    #[serde(rename = "D-")]
    pub d_minus: u64,
    #[serde(rename = "F")]
    pub f: u64,
    #[serde(rename = "W")]
    pub w: u64,
}

impl GradeRecord {
    /// An offering with every bucket at zero.
    pub fn new(subject: &str, number: u32, title: &str) -> Self {
        Self {
            subject: subject.to_string(),
            number,
            title: title.to_string(),
            a_plus: 0,
            a: 0,
            a_minus: 0,
            b_plus: 0,
            b: 0,
            b_minus: 0,
            c_plus: 0,
            c: 0,
            c_minus: 0,
            d_plus: 0,
            d: 0,
            d_minus: 0,
            f: 0,
            w: 0,
        }
    }

    /// Sets the count for one bucket.
    pub fn with_count(mut self, grade: Grade, count: u64) -> Self {
        *self.count_mut(grade) = count;
        self
    }

    pub fn count(&self, grade: Grade) -> u64 {
        match grade {
            Grade::APlus => self.a_plus,
            Grade::A => self.a,
            Grade::AMinus => self.a_minus,
            Grade::BPlus => self.b_plus,
            Grade::B => self.b,
            Grade::BMinus => self.b_minus,
            Grade::CPlus => self.c_plus,
            Grade::C => self.c,
            Grade::CMinus => self.c_minus,
            Grade::DPlus => self.d_plus,
            Grade::D => self.d,
            Grade::DMinus => self.d_minus,
            Grade::F => self.f,
            Grade::W => self.w,
        }
    }

    fn count_mut(&mut self, grade: Grade) -> &mut u64 {
        match grade {
            Grade::APlus => &mut self.a_plus,
            Grade::A => &mut self.a,
            Grade::AMinus => &mut self.a_minus,
            Grade::BPlus => &mut self.b_plus,
            Grade::B => &mut self.b,
            Grade::BMinus => &mut self.b_minus,
            Grade::CPlus => &mut self.c_plus,
            Grade::C => &mut self.c,
            Grade::CMinus => &mut self.c_minus,
            Grade::DPlus => &mut self.d_plus,
            Grade::D => &mut self.d,
            Grade::DMinus => &mut self.d_minus,
            Grade::F => &mut self.f,
            Grade::W => &mut self.w,
        }
    }

    /// Students across all 14 buckets, withdrawals included.
    pub fn enrolled(&self) -> u64 {
        Grade::ALL.iter().map(|g| self.count(*g)).sum()
    }

    pub fn gpa_points(&self) -> f64 {
        Grade::ALL
            .iter()
            .map(|g| self.count(*g) as f64 * g.points())
            .sum()
    }

    pub fn top_grade_count(&self) -> u64 {
        Grade::ALL
            .iter()
            .filter(|g| g.is_top())
            .map(|g| self.count(*g))
            .sum()
    }

    pub fn key(&self) -> CourseKey {
        CourseKey {
            subject: self.subject.clone(),
            number: self.number,
            title: self.title.clone(),
        }
    }
}

/// Grouping key for offerings of the same course.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CourseKey {
    pub subject: String,
    pub number: u32,
    pub title: String,
}

impl CourseKey {
    /// Display label, e.g. `"AAS 100: Intro Asian American Studies"`.
    pub fn label(&self) -> String {
        format!("{} {}: {}", self.subject, self.number, self.title)
    }
}

/// Aggregated statistics for one course across all of its offerings.
///
/// `average_gpa` and `top_grade_pct` are `None` when nobody enrolled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseSummary {
    pub subject: String,
    pub number: u32,
    pub title: String,
    pub enrolled: u64,
    pub gpa_points: f64,
    pub offerings: u64,
    pub top_grade_count: u64,
    pub average_gpa: Option<f64>,
    pub top_grade_pct: Option<f64>,
    pub avg_class_size: f64,
    pub label: String,
}

/// One row of the course table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    #[serde(rename = "Course")]
    pub course: String,
    #[serde(rename = "Average GPA")]
    pub average_gpa: f64,
    #[serde(rename = "% A+/A")]
    pub top_grade_pct: f64,
}

/// One scatter point: x = top-grade percentage, y and color = average GPA,
/// size = average class size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub color: f64,
    pub label: String,
    pub hover: ChartHover,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartHover {
    pub avg_class_size: f64,
}

/// Everything a plotting client needs to draw the scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub size_max: u32,
    pub points: Vec<ChartPoint>,
}

/// Result of one query: chart plus table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseView {
    pub subject: String,
    pub level: StudentLevel,
    pub min_gpa: f64,
    pub chart: ChartSpec,
    pub table: Vec<TableRow>,
}

/// The three dashboard inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub subject: String,
    pub level: StudentLevel,
    pub min_gpa: f64,
}
