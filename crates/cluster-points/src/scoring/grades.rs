use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::subjects::SubjectCode;

/// Raw grade sheet as submitted by a host: subject key to free-form grade token.
pub type RawGrades = BTreeMap<String, String>;

/// Letter grade on the 12-step KCSE scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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
    #[serde(rename = "D-")]
    DMinus,
    #[serde(rename = "E")]
    E,
}

impl Grade {
    /// Highest to lowest.
    pub const ALL: [Grade; 12] = [
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
        Grade::E,
    ];

    pub fn points(self) -> u8 {
        match self {
            Grade::A => 12,
            Grade::AMinus => 11,
            Grade::BPlus => 10,
            Grade::B => 9,
            Grade::BMinus => 8,
            Grade::CPlus => 7,
            Grade::C => 6,
            Grade::CMinus => 5,
            Grade::DPlus => 4,
            Grade::D => 3,
            Grade::DMinus => 2,
            Grade::E => 1,
        }
    }

    pub fn label(self) -> &'static str {
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
            Grade::DMinus => "D-",
            Grade::E => "E",
        }
    }

    /// Exact match against the grade labels; callers trim and uppercase first.
    pub fn parse(token: &str) -> Option<Self> {
        Grade::ALL.iter().copied().find(|grade| grade.label() == token)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl PartialOrd for Grade {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Grade {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.points().cmp(&other.points())
    }
}

/// Points per subject for one student. Absent subjects have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreMap {
    points: BTreeMap<SubjectCode, u8>,
}

impl ScoreMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, subject: SubjectCode, grade: Grade) {
        self.points.insert(subject, grade.points());
    }

    pub fn get(&self, subject: SubjectCode) -> Option<u8> {
        self.points.get(&subject).copied()
    }

    /// Points for `subject`, or 0 when the subject was not sat.
    pub fn points_or_zero(&self, subject: SubjectCode) -> u8 {
        self.get(subject).unwrap_or(0)
    }

    pub fn contains(&self, subject: SubjectCode) -> bool {
        self.points.contains_key(&subject)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = u8> + '_ {
        self.points.values().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SubjectCode, u8)> + '_ {
        self.points.iter().map(|(subject, points)| (*subject, *points))
    }
}

impl FromIterator<(SubjectCode, Grade)> for ScoreMap {
    fn from_iter<I: IntoIterator<Item = (SubjectCode, Grade)>>(iter: I) -> Self {
        let mut map = ScoreMap::new();
        for (subject, grade) in iter {
            map.insert(subject, grade);
        }
        map
    }
}

/// Build the score map used by cluster scoring.
///
/// Keys must be subject codes (surrounding whitespace tolerated). Grade tokens are trimmed
/// and uppercased; anything that is not one of the twelve grades drops the entry.
pub fn normalize<K, V>(raw_grades: impl IntoIterator<Item = (K, V)>) -> ScoreMap
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    raw_grades
        .into_iter()
        .filter_map(|(subject, grade)| {
            let subject = subject.as_ref().parse::<SubjectCode>().ok()?;
            let grade = Grade::parse(&grade.as_ref().trim().to_uppercase())?;
            Some((subject, grade))
        })
        .collect()
}
