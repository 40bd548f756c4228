use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of scorable secondary-school subjects, keyed by their short exam code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SubjectCode {
    Eng,
    Kis,
    Mat,
    Bio,
    Che,
    Phy,
    Gsc,
    Hag,
    Geo,
    Cre,
    Ire,
    Hre,
    Cmp,
    Agr,
    Ard,
    Hsc,
    Bst,
    Fre,
    Ger,
    Mus,
    Arb,
}

impl SubjectCode {
    /// Every code, ordered group by group (G1 through G5).
    pub const ALL: [SubjectCode; 21] = [
        SubjectCode::Eng,
        SubjectCode::Kis,
        SubjectCode::Mat,
        SubjectCode::Bio,
        SubjectCode::Che,
        SubjectCode::Phy,
        SubjectCode::Gsc,
        SubjectCode::Hag,
        SubjectCode::Geo,
        SubjectCode::Cre,
        SubjectCode::Ire,
        SubjectCode::Hre,
        SubjectCode::Cmp,
        SubjectCode::Agr,
        SubjectCode::Ard,
        SubjectCode::Hsc,
        SubjectCode::Bst,
        SubjectCode::Fre,
        SubjectCode::Ger,
        SubjectCode::Mus,
        SubjectCode::Arb,
    ];

    pub fn code(self) -> &'static str {
        match self {
            SubjectCode::Eng => "ENG",
            SubjectCode::Kis => "KIS",
            SubjectCode::Mat => "MAT",
            SubjectCode::Bio => "BIO",
            SubjectCode::Che => "CHE",
            SubjectCode::Phy => "PHY",
            SubjectCode::Gsc => "GSC",
            SubjectCode::Hag => "HAG",
            SubjectCode::Geo => "GEO",
            SubjectCode::Cre => "CRE",
            SubjectCode::Ire => "IRE",
            SubjectCode::Hre => "HRE",
            SubjectCode::Cmp => "CMP",
            SubjectCode::Agr => "AGR",
            SubjectCode::Ard => "ARD",
            SubjectCode::Hsc => "HSC",
            SubjectCode::Bst => "BST",
            SubjectCode::Fre => "FRE",
            SubjectCode::Ger => "GER",
            SubjectCode::Mus => "MUS",
            SubjectCode::Arb => "ARB",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SubjectCode::Eng => "English",
            SubjectCode::Kis => "Kiswahili",
            SubjectCode::Mat => "Mathematics",
            SubjectCode::Bio => "Biology",
            SubjectCode::Che => "Chemistry",
            SubjectCode::Phy => "Physics",
            SubjectCode::Gsc => "General Science",
            SubjectCode::Hag => "History & Government",
            SubjectCode::Geo => "Geography",
            SubjectCode::Cre => "CRE",
            SubjectCode::Ire => "IRE",
            SubjectCode::Hre => "HRE",
            SubjectCode::Cmp => "Computer Studies",
            SubjectCode::Agr => "Agriculture",
            SubjectCode::Ard => "Art & Design",
            SubjectCode::Hsc => "Home Science",
            SubjectCode::Bst => "Business Studies",
            SubjectCode::Fre => "French",
            SubjectCode::Ger => "German",
            SubjectCode::Mus => "Music",
            SubjectCode::Arb => "Arabic",
        }
    }

    pub fn group(self) -> SubjectGroup {
        match self {
            SubjectCode::Eng | SubjectCode::Kis | SubjectCode::Mat => SubjectGroup::Compulsory,
            SubjectCode::Bio | SubjectCode::Che | SubjectCode::Phy | SubjectCode::Gsc => {
                SubjectGroup::Sciences
            }
            SubjectCode::Hag
            | SubjectCode::Geo
            | SubjectCode::Cre
            | SubjectCode::Ire
            | SubjectCode::Hre => SubjectGroup::Humanities,
            SubjectCode::Cmp | SubjectCode::Agr | SubjectCode::Ard | SubjectCode::Hsc => {
                SubjectGroup::Technical
            }
            SubjectCode::Bst
            | SubjectCode::Fre
            | SubjectCode::Ger
            | SubjectCode::Mus
            | SubjectCode::Arb => SubjectGroup::Other,
        }
    }
}

impl fmt::Display for SubjectCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Raised when a token is not one of the 21 known subject codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown subject code '{0}'")]
pub struct UnknownSubject(pub String);

impl FromStr for SubjectCode {
    type Err = UnknownSubject;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        SubjectCode::ALL
            .iter()
            .copied()
            .find(|subject| subject.code() == trimmed)
            .ok_or_else(|| UnknownSubject(trimmed.to_string()))
    }
}

/// Static partition of the subjects used by "best of group" selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectGroup {
    Compulsory,
    Sciences,
    Humanities,
    Technical,
    Other,
}

impl SubjectGroup {
    pub const ALL: [SubjectGroup; 5] = [
        SubjectGroup::Compulsory,
        SubjectGroup::Sciences,
        SubjectGroup::Humanities,
        SubjectGroup::Technical,
        SubjectGroup::Other,
    ];

    pub const fn members(self) -> &'static [SubjectCode] {
        match self {
            SubjectGroup::Compulsory => &[SubjectCode::Eng, SubjectCode::Kis, SubjectCode::Mat],
            SubjectGroup::Sciences => &[
                SubjectCode::Bio,
                SubjectCode::Che,
                SubjectCode::Phy,
                SubjectCode::Gsc,
            ],
            SubjectGroup::Humanities => &[
                SubjectCode::Hag,
                SubjectCode::Geo,
                SubjectCode::Cre,
                SubjectCode::Ire,
                SubjectCode::Hre,
            ],
            SubjectGroup::Technical => &[
                SubjectCode::Cmp,
                SubjectCode::Agr,
                SubjectCode::Ard,
                SubjectCode::Hsc,
            ],
            SubjectGroup::Other => &[
                SubjectCode::Bst,
                SubjectCode::Fre,
                SubjectCode::Ger,
                SubjectCode::Mus,
                SubjectCode::Arb,
            ],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SubjectGroup::Compulsory => "Group I",
            SubjectGroup::Sciences => "Group II (Sciences)",
            SubjectGroup::Humanities => "Group III (Humanities)",
            SubjectGroup::Technical => "Group IV (Technical)",
            SubjectGroup::Other => "Group V (Others)",
        }
    }
}

/// Uppercased full names and common aliases accepted in requirement keys.
const SUBJECT_ALIASES: &[(&str, SubjectCode)] = &[
    ("ENGLISH", SubjectCode::Eng),
    ("KISWAHILI", SubjectCode::Kis),
    ("MATHEMATICS", SubjectCode::Mat),
    ("MATH", SubjectCode::Mat),
    ("BIOLOGY", SubjectCode::Bio),
    ("CHEMISTRY", SubjectCode::Che),
    ("PHYSICS", SubjectCode::Phy),
    ("GENERAL SCIENCE", SubjectCode::Gsc),
    ("HISTORY", SubjectCode::Hag),
    ("HISTORY & GOVERNMENT", SubjectCode::Hag),
    ("GEOGRAPHY", SubjectCode::Geo),
    ("CRE", SubjectCode::Cre),
    ("IRE", SubjectCode::Ire),
    ("HRE", SubjectCode::Hre),
    ("COMPUTER STUDIES", SubjectCode::Cmp),
    ("AGRICULTURE", SubjectCode::Agr),
    ("ART & DESIGN", SubjectCode::Ard),
    ("HOME SCIENCE", SubjectCode::Hsc),
    ("BUSINESS STUDIES", SubjectCode::Bst),
    ("FRENCH", SubjectCode::Fre),
    ("GERMAN", SubjectCode::Ger),
    ("MUSIC", SubjectCode::Mus),
    ("ARABIC", SubjectCode::Arb),
];

/// Map a subject display name or alias to its code.
///
/// Unrecognized tokens are returned trimmed and uppercased, so callers can pass codes
/// (`"PHY"`) and names (`"Physics"`) interchangeably.
pub fn resolve_subject_name(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    SUBJECT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == upper)
        .map(|(_, code)| code.code().to_string())
        .unwrap_or(upper)
}

/// One row of the subject listing exposed to hosts building grade-entry forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectEntry {
    pub code: SubjectCode,
    pub name: &'static str,
    pub group: SubjectGroup,
    pub group_title: &'static str,
}

pub fn subject_catalog() -> Vec<SubjectEntry> {
    SubjectCode::ALL
        .iter()
        .map(|&code| SubjectEntry {
            code,
            name: code.display_name(),
            group: code.group(),
            group_title: code.group().title(),
        })
        .collect()
}
