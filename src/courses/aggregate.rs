use crate::courses::types::{CourseKey, CourseSummary, GradeRecord};
use crate::courses::utility::{ratio, round2};
use std::collections::BTreeMap;
use tracing::debug;

/// Running totals for one course while offerings are folded in.
#[derive(Default)]
struct CourseTotals {
    enrolled: u64,
    gpa_points: f64,
    offerings: u64,
    top_grade_count: u64,
}

/// Aggregates per-offering [`GradeRecord`] rows into one [`CourseSummary`]
/// per (subject, number, title).
///
/// Sums enrollment, GPA points and A+/A counts across the offerings of a
/// course, then derives average GPA, top-grade percentage and average class
/// size, each rounded to two decimals. A course nobody enrolled in keeps
/// `None` for its GPA and percentage.
///
/// The result comes back sorted by key. Running this twice on the same
/// input yields identical output.
#[tracing::instrument(skip_all, fields(records = records.len()))]
pub fn aggregate_courses(records: &[GradeRecord]) -> Vec<CourseSummary> {
    let mut groups: BTreeMap<CourseKey, CourseTotals> = BTreeMap::new();

    for record in records {
        let totals = groups.entry(record.key()).or_default();
        totals.enrolled += record.enrolled();
        totals.gpa_points += record.gpa_points();
        totals.offerings += 1;
        totals.top_grade_count += record.top_grade_count();
    }

    let summaries: Vec<CourseSummary> = groups
        .into_iter()
        .map(|(key, totals)| summarize(key, totals))
        .collect();

    debug!(courses = summaries.len(), "Aggregated course summaries");
    summaries
}

fn summarize(key: CourseKey, totals: CourseTotals) -> CourseSummary {
    let enrolled = totals.enrolled as f64;

    let average_gpa = ratio(totals.gpa_points, enrolled).map(round2);
    let top_grade_pct = ratio(totals.top_grade_count as f64 * 100.0, enrolled).map(round2);
    // offerings >= 1 for any key that made it into the map
    let avg_class_size = round2(enrolled / totals.offerings as f64);

    if average_gpa.is_none() {
        debug!(course = %key.label(), "Course has no enrolled students");
    }

    CourseSummary {
        label: key.label(),
        subject: key.subject,
        number: key.number,
        title: key.title,
        enrolled: totals.enrolled,
        gpa_points: totals.gpa_points,
        offerings: totals.offerings,
        top_grade_count: totals.top_grade_count,
        average_gpa,
        top_grade_pct,
        avg_class_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::courses::filter::{StudentLevel, query};
    use crate::grades::Grade;

    fn intro(a: u64, b: u64, f: u64) -> GradeRecord {
        GradeRecord::new("AAS", 100, "Intro")
            .with_count(Grade::A, a)
            .with_count(Grade::B, b)
            .with_count(Grade::F, f)
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate_courses(&[]).is_empty());
    }

    #[test]
    fn test_two_offerings_of_one_course() {
        let records = vec![intro(10, 5, 0), intro(5, 0, 5)];
        let summaries = aggregate_courses(&records);

        assert_eq!(summaries.len(), 1);
        let s = &summaries[0];
        assert_eq!(s.enrolled, 25);
        assert_eq!(s.gpa_points, 75.0);
        assert_eq!(s.offerings, 2);
        assert_eq!(s.top_grade_count, 15);
        assert_eq!(s.average_gpa, Some(3.0));
        assert_eq!(s.top_grade_pct, Some(60.0));
        assert_eq!(s.avg_class_size, 12.5);
        assert_eq!(s.label, "AAS 100: Intro");
    }

    #[test]
    fn test_all_a_offering_reaches_three_point_two() {
        let records = vec![intro(15, 0, 0), intro(5, 0, 5)];
        let s = &aggregate_courses(&records)[0];

        assert_eq!(s.gpa_points, 80.0);
        assert_eq!(s.average_gpa, Some(3.2));
        assert_eq!(s.avg_class_size, 12.5);
    }

    #[test]
    fn test_zero_enrollment_is_no_data() {
        let records = vec![intro(0, 0, 0), intro(0, 0, 0)];
        let s = &aggregate_courses(&records)[0];

        assert_eq!(s.enrolled, 0);
        assert_eq!(s.offerings, 2);
        assert_eq!(s.average_gpa, None);
        assert_eq!(s.top_grade_pct, None);
        assert_eq!(s.avg_class_size, 0.0);
    }

    #[test]
    fn test_title_is_part_of_the_key() {
        let records = vec![
            GradeRecord::new("CS", 498, "Special Topics").with_count(Grade::A, 1),
            GradeRecord::new("CS", 498, "Virtual Reality").with_count(Grade::B, 1),
        ];
        let summaries = aggregate_courses(&records);
        assert_eq!(summaries.len(), 2);
    }

    #[test]
    fn test_output_sorted_by_key() {
        let records = vec![
            GradeRecord::new("MATH", 241, "Calculus III"),
            GradeRecord::new("CS", 225, "Data Structures"),
            GradeRecord::new("CS", 125, "Intro to CS"),
        ];
        let labels: Vec<String> = aggregate_courses(&records)
            .into_iter()
            .map(|s| s.label)
            .collect();
        assert_eq!(
            labels,
            vec![
                "CS 125: Intro to CS",
                "CS 225: Data Structures",
                "MATH 241: Calculus III"
            ]
        );
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        // 1 A- and 2 B: (3.66 + 6.0) / 3 = 3.22
        let records = vec![
            GradeRecord::new("CHEM", 102, "General Chemistry I")
                .with_count(Grade::AMinus, 1)
                .with_count(Grade::B, 2),
        ];
        let s = &aggregate_courses(&records)[0];
        assert_eq!(s.average_gpa, Some(3.22));
        assert_eq!(s.top_grade_pct, Some(0.0));
    }
    #[test]
    fn test_half_cent_average_rounds_to_even() {
        // 621 points over 200 students is exactly 3.105
        let records = vec![
            GradeRecord::new("ECON", 102, "Microeconomic Principles")
                .with_count(Grade::A, 155)
                .with_count(Grade::D, 1)
                .with_count(Grade::F, 44),
        ];
        let summaries = aggregate_courses(&records);
        let s = &summaries[0];
        assert_eq!(s.gpa_points, 621.0);
        assert_eq!(s.enrolled, 200);
        assert_eq!(s.average_gpa, Some(3.1));

        let view = query(&summaries, "ECON", StudentLevel::Undergraduate, 3.1).unwrap();
        assert!(view.table.is_empty());
    }
}
