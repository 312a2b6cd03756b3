//! Letter-grade buckets and their GPA point weights.

/// One of the 14 grade buckets reported per offering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Grade {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    DPlus,
    D,
    DMinus,
    F,
    W,
}

/// GPA points earned per student in each bucket.
///
/// | Grade  | Points |
/// |--------|--------|
/// | A+, A  | 4.00   |
/// | A-     | 3.66   |
/// | B+     | 3.33   |
/// | B      | 3.00   |
/// | B-     | 2.66   |
/// | C+     | 2.33   |
/// | C      | 2.00   |
/// | C-     | 1.66   |
/// | D+     | 1.33   |
/// | D      | 1.00   |
/// | D-     | 0.66   |
/// | F, W   | 0.00   |
pub const GPA_POINTS: [(Grade, f64); 14] = [
    (Grade::APlus, 4.0),
    (Grade::A, 4.0),
    (Grade::AMinus, 3.66),
    (Grade::BPlus, 3.33),
    (Grade::B, 3.0),
    (Grade::BMinus, 2.66),
    (Grade::CPlus, 2.33),
    (Grade::C, 2.0),
    (Grade::CMinus, 1.66),
    (Grade::DPlus, 1.33),
    (Grade::D, 1.0),
    (Grade::DMinus, 0.66),
    (Grade::F, 0.0),
    (Grade::W, 0.0),
];

impl Grade {
    /// All buckets in column order.
    pub const ALL: [Grade; 14] = [
        Grade::APlus,
        Grade::A,
        Grade::AMinus,
        Grade::BPlus,
        Grade::B,
        Grade::BMinus,
        Grade::CPlus,
        Grade::C,
        Grade::CMinus,
        Grade::DPlus,
        Grade::D,
        Grade::DMinus,
        Grade::F,
        Grade::W,
    ];

    /// Column header used for this bucket in the source CSV.
    pub fn column(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::DMinus => "D-",
            Grade::F => "F",
            Grade::W => "W",
        }
    }

    pub fn points(self) -> f64 {
        GPA_POINTS
            .iter()
            .find(|(grade, _)| *grade == self)
            .map(|(_, points)| *points)
            .unwrap_or(0.0)
    }

    /// A+ and A count as top grades.
    pub fn is_top(self) -> bool {
        matches!(self, Grade::APlus | Grade::A)
    }
}
