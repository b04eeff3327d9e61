//! Letter grades and the fixed 4.0 grade-point scale.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A letter grade on the 4.0 scale.
///
/// The set is closed: anything that is not one of these eleven grades is
/// rejected when parsed, so a `Grade` always has a grade-point value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl Grade {
    /// All grades, best first.
    pub const ALL: [Grade; 11] = [
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
        Grade::F,
    ];

    /// The letter as written on a transcript, e.g. `"B+"`.
    pub fn as_str(&self) -> &'static str {
        match self {
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
            Grade::F => "F",
        }
    }

    /// Grade-point value on the standard table.
    pub fn points(&self) -> f64 {
        GradeTable::STANDARD.points_for(*self)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        Grade::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == wanted)
            .ok_or_else(|| format!("unknown grade: {}", s.trim()))
    }
}

/// Immutable mapping from letter grade to grade points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeTable {
    points: [f64; 11],
}

impl GradeTable {
    /// The 4.0 scale. Indexed in the same order as [`Grade::ALL`].
    pub const STANDARD: GradeTable = GradeTable {
        points: [4.0, 3.7, 3.3, 3.0, 2.7, 2.3, 2.0, 1.7, 1.3, 1.0, 0.0],
    };

    /// Grade-point value for `grade`.
    pub fn points_for(&self, grade: Grade) -> f64 {
        self.points[grade as usize]
    }

    /// `(grade, points)` pairs, best grade first.
    pub fn entries(&self) -> impl Iterator<Item = (Grade, f64)> + '_ {
        Grade::ALL.iter().map(move |g| (*g, self.points_for(*g)))
    }

    /// Highest value on the scale.
    pub fn max_points(&self) -> f64 {
        self.points_for(Grade::A)
    }
}

impl Default for GradeTable {
    fn default() -> Self {
        Self::STANDARD
    }
}
