//! The twenty cluster rules as data.
//!
//! Each rule pairs a mandatory-subject gate with one or more relevance formulas. A formula is
//! four terms; each term takes the maximum over its picks. When a rule lists several formulas
//! the relevance is the best of them.

use super::aggregate::{best, nth_best};
use super::grades::ScoreMap;
use super::subjects::{SubjectCode, SubjectGroup};

use SubjectCode::{Agr, Bio, Che, Cre, Eng, Fre, Geo, Ger, Gsc, Hre, Hsc, Ire, Kis, Mat, Mus, Phy};

const G2: &[SubjectCode] = SubjectGroup::Sciences.members();
const G3: &[SubjectCode] = SubjectGroup::Humanities.members();
const G4: &[SubjectCode] = SubjectGroup::Technical.members();
const G5: &[SubjectCode] = SubjectGroup::Other.members();
const LANGUAGES: &[SubjectCode] = &[Eng, Kis];
const FOREIGN: &[SubjectCode] = &[Fre, Ger];
const RELIGION: &[SubjectCode] = &[Cre, Ire, Hre];

/// Mandatory-subject precondition for a cluster.
#[derive(Debug, Clone, Copy)]
pub enum Gate {
    Open,
    AllOf(&'static [SubjectCode]),
    AnyOf(&'static [SubjectCode]),
}

impl Gate {
    pub fn admits(&self, scores: &ScoreMap) -> bool {
        match self {
            Gate::Open => true,
            Gate::AllOf(subjects) => subjects.iter().all(|&subject| scores.contains(subject)),
            Gate::AnyOf(subjects) => subjects.iter().any(|&subject| scores.contains(subject)),
        }
    }
}

/// A single value read off the score map.
#[derive(Debug, Clone, Copy)]
pub enum Pick {
    Subject(SubjectCode),
    Best(&'static [SubjectCode]),
    NthBest(&'static [SubjectCode], usize),
}

impl Pick {
    fn value(&self, scores: &ScoreMap) -> u32 {
        match *self {
            Pick::Subject(subject) => u32::from(scores.points_or_zero(subject)),
            Pick::Best(subjects) => best(scores, subjects),
            Pick::NthBest(subjects, n) => nth_best(scores, subjects, n),
        }
    }
}

/// Maximum over the listed picks.
pub type Term = &'static [Pick];
pub type Formula = [Term; 4];

#[derive(Debug, Clone, Copy)]
pub struct ClusterRule {
    pub cluster: u32,
    pub gate: Gate,
    pub formulas: &'static [Formula],
}

impl ClusterRule {
    /// Raw relevance score R. Does not consult the gate.
    pub fn relevance(&self, scores: &ScoreMap) -> u32 {
        self.formulas
            .iter()
            .map(|formula| {
                formula
                    .iter()
                    .map(|term| term.iter().map(|pick| pick.value(scores)).max().unwrap_or(0))
                    .sum::<u32>()
            })
            .max()
            .unwrap_or(0)
    }
}

use Pick::{Best, NthBest, Subject};

const ALL_SUBJECTS: &[SubjectCode] = &SubjectCode::ALL;

const HUMANITIES_LED: &[Formula] = &[[
    &[Best(LANGUAGES)],
    &[Subject(Mat), Best(G2)],
    &[Best(G3)],
    &[Best(G2), NthBest(G3, 2), Best(G4), Best(G5)],
]];

const SCIENCE_BIO_CHE: &[Formula] = &[[
    &[Subject(Bio)],
    &[Subject(Che)],
    &[Subject(Mat), Subject(Phy)],
    &[Best(LANGUAGES), NthBest(G2, 3), Best(G3), Best(G4), Best(G5)],
]];

pub static CLUSTER_RULES: [ClusterRule; 20] = [
    ClusterRule {
        cluster: 1,
        gate: Gate::AnyOf(LANGUAGES),
        formulas: HUMANITIES_LED,
    },
    ClusterRule {
        cluster: 2,
        gate: Gate::AnyOf(LANGUAGES),
        formulas: &[[
            &[Best(LANGUAGES)],
            &[Subject(Mat)],
            &[Best(G2), Best(G3)],
            &[Best(G2), Best(G3), Best(G4), Best(G5)],
        ]],
    },
    ClusterRule {
        cluster: 3,
        gate: Gate::AnyOf(LANGUAGES),
        formulas: HUMANITIES_LED,
    },
    ClusterRule {
        cluster: 4,
        gate: Gate::AllOf(&[Mat, Phy]),
        formulas: &[[
            &[Subject(Mat)],
            &[Subject(Phy)],
            &[Subject(Bio), Subject(Che), Subject(Geo)],
            &[Best(G2), Best(G3), Best(G4), Best(G5)],
        ]],
    },
    ClusterRule {
        cluster: 5,
        gate: Gate::AllOf(&[Mat, Phy, Che]),
        formulas: &[[
            &[Subject(Mat)],
            &[Subject(Phy)],
            &[Subject(Che)],
            &[Subject(Bio), Best(G3), Best(G4), Best(G5)],
        ]],
    },
    ClusterRule {
        cluster: 6,
        gate: Gate::AllOf(&[Mat, Phy]),
        formulas: &[[
            &[Subject(Mat)],
            &[Subject(Phy)],
            &[Best(G3)],
            &[NthBest(G2, 2), NthBest(G3, 2), Best(G4), Best(G5)],
        ]],
    },
    ClusterRule {
        cluster: 7,
        gate: Gate::AllOf(&[Mat, Phy]),
        formulas: &[[
            &[Subject(Mat)],
            &[Subject(Phy)],
            &[NthBest(G2, 2), Best(G3)],
            &[Best(G2), Best(G3), Best(G4), Best(G5)],
        ]],
    },
    ClusterRule {
        cluster: 8,
        gate: Gate::AllOf(&[Mat, Bio]),
        formulas: &[[
            &[Subject(Mat)],
            &[Subject(Bio)],
            &[Subject(Phy), Subject(Che)],
            &[NthBest(G2, 3), Best(G3), Best(G4), Best(G5)],
        ]],
    },
    ClusterRule {
        cluster: 9,
        gate: Gate::AllOf(&[Mat]),
        formulas: &[[
            &[Subject(Mat)],
            &[Best(G2)],
            &[NthBest(G2, 2)],
            &[NthBest(G2, 3), Best(G3), Best(G4), Best(G5)],
        ]],
    },
    ClusterRule {
        cluster: 10,
        gate: Gate::AllOf(&[Mat]),
        formulas: &[[
            &[Subject(Mat)],
            &[Best(G2)],
            &[Best(G3)],
            &[NthBest(G2, 2), NthBest(G3, 2), Best(G4), Best(G5)],
        ]],
    },
    ClusterRule {
        cluster: 11,
        gate: Gate::Open,
        formulas: &[
            [
                &[Subject(Che)],
                &[Subject(Mat), Subject(Phy)],
                &[Subject(Bio), Subject(Hsc)],
                &[Best(LANGUAGES), Best(G3), Best(G4), Best(G5)],
            ],
            [
                &[Subject(Bio), Subject(Gsc)],
                &[Subject(Mat)],
                &[Best(G2), Best(G3)],
                &[Best(LANGUAGES), Best(G2), Best(G3), Best(G4), Best(G5)],
            ],
        ],
    },
    ClusterRule {
        cluster: 12,
        gate: Gate::AllOf(&[Bio, Che]),
        formulas: SCIENCE_BIO_CHE,
    },
    ClusterRule {
        cluster: 13,
        gate: Gate::AllOf(&[Bio, Che]),
        formulas: SCIENCE_BIO_CHE,
    },
    ClusterRule {
        cluster: 14,
        gate: Gate::AllOf(&[Che]),
        formulas: &[[
            &[Subject(Bio), Subject(Agr), Subject(Hsc)],
            &[Subject(Che)],
            &[Subject(Mat), Subject(Phy), Subject(Geo)],
            &[Best(LANGUAGES), Best(G3), Best(G4), Best(G5)],
        ]],
    },
    ClusterRule {
        cluster: 15,
        gate: Gate::AllOf(&[Bio, Che]),
        formulas: &[[
            &[Subject(Bio)],
            &[Subject(Che)],
            &[Subject(Mat), Subject(Phy), Subject(Agr)],
            &[Best(LANGUAGES), Best(G3), Best(G4), Best(G5)],
        ]],
    },
    ClusterRule {
        cluster: 16,
        gate: Gate::AllOf(&[Geo]),
        formulas: &[[
            &[Subject(Geo)],
            &[Subject(Mat)],
            &[Best(G2)],
            &[NthBest(G2, 2), NthBest(G3, 2), Best(G4), Best(G5)],
        ]],
    },
    ClusterRule {
        cluster: 17,
        gate: Gate::AnyOf(FOREIGN),
        formulas: &[[
            &[Best(FOREIGN)],
            &[Best(LANGUAGES)],
            &[Subject(Mat), Best(G2), Best(G3)],
            &[Best(G2), Best(G3), Best(G4), NthBest(G5, 2)],
        ]],
    },
    ClusterRule {
        cluster: 18,
        gate: Gate::AllOf(&[Mus]),
        formulas: &[[
            &[Subject(Mus)],
            &[Best(LANGUAGES)],
            &[Subject(Mat), Best(G2), Best(G3)],
            &[Best(G2), Best(G3), Best(G4), NthBest(G5, 2)],
        ]],
    },
    ClusterRule {
        cluster: 19,
        gate: Gate::Open,
        formulas: &[[
            &[Best(ALL_SUBJECTS)],
            &[NthBest(ALL_SUBJECTS, 2)],
            &[NthBest(ALL_SUBJECTS, 3)],
            &[NthBest(ALL_SUBJECTS, 4)],
        ]],
    },
    ClusterRule {
        cluster: 20,
        gate: Gate::AnyOf(RELIGION),
        formulas: &[[
            &[Best(RELIGION)],
            &[Best(LANGUAGES)],
            &[NthBest(G3, 2)],
            &[Best(G2), Best(G4), Best(G5)],
        ]],
    },
];

/// Look up the rule for a cluster id; `None` outside 1..=20.
pub fn rule_for(cluster: u32) -> Option<&'static ClusterRule> {
    CLUSTER_RULES.iter().find(|rule| rule.cluster == cluster)
}
