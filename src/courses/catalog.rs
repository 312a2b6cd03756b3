use crate::courses::aggregate::aggregate_courses;
use crate::courses::filter::{StudentLevel, query};
use crate::courses::types::{CourseSummary, CourseView, GradeRecord};
use crate::error::{DataError, QueryError};
use crate::fetch::load_source;
use crate::parser::parse_records;
use std::collections::HashSet;
use tracing::info;

/// Course summaries computed once from the full dataset, plus the subject
/// list for the selector. Read-only after [`CourseCatalog::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct CourseCatalog {
    summaries: Vec<CourseSummary>,
    subjects: Vec<String>,
}

impl CourseCatalog {
    /// Fetches and parses the dataset at `source`, then builds the catalog.
    ///
    /// Any failure is fatal; callers should abort rather than serve.
    #[tracing::instrument]
    pub async fn load(source: &str) -> Result<Self, DataError> {
        let bytes = load_source(source).await?;
        let records = parse_records(&bytes)?;
        Ok(Self::build(&records))
    }

    pub fn build(records: &[GradeRecord]) -> Self {
        let summaries = aggregate_courses(records);
        let subjects = distinct_subjects(records);

        info!(
            records = records.len(),
            courses = summaries.len(),
            subjects = subjects.len(),
            "Course catalog built"
        );

        Self {
            summaries,
            subjects,
        }
    }

    pub fn summaries(&self) -> &[CourseSummary] {
        &self.summaries
    }

    /// Distinct subjects in the order they first appear in the raw data.
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn has_subject(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }

    pub fn query(
        &self,
        subject: &str,
        level: StudentLevel,
        min_gpa: f64,
    ) -> Result<CourseView, QueryError> {
        query(&self.summaries, subject, level, min_gpa)
    }
}

fn distinct_subjects(records: &[GradeRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.subject.as_str()))
        .map(|r| r.subject.clone())
        .collect()
}
