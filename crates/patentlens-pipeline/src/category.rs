//! Assignee type codes → human-readable labels.
//!
//! Two fixed vocabularies share the same integer codes:
//! - granular (9 labels, e.g. "Foreign Company or Corporation")
//! - unified (4 labels: Unassigned, Company, Individual, Government)

use std::fmt;

/// Label for codes outside 1..=9.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Separator between pieces of a unified composite label.
pub const UNIFIED_JOINER: &str = " & ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssigneeCategory {
    Unassigned,
    UsCompany,
    ForeignCompany,
    UsIndividual,
    ForeignIndividual,
    UsFederalGovernment,
    ForeignGovernment,
    UsCountyGovernment,
    UsStateGovernment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnifiedCategory {
    Unassigned,
    Company,
    Individual,
    Government,
}

impl AssigneeCategory {
    pub const ALL: [AssigneeCategory; 9] = [
        AssigneeCategory::Unassigned,
        AssigneeCategory::UsCompany,
        AssigneeCategory::ForeignCompany,
        AssigneeCategory::UsIndividual,
        AssigneeCategory::ForeignIndividual,
        AssigneeCategory::UsFederalGovernment,
        AssigneeCategory::ForeignGovernment,
        AssigneeCategory::UsCountyGovernment,
        AssigneeCategory::UsStateGovernment,
    ];

    pub fn from_code(code: i64) -> Option<Self> {
        let idx = usize::try_from(code).ok()?.checked_sub(1)?;
        Self::ALL.get(idx).copied()
    }

    pub fn code(self) -> i64 {
        match self {
            AssigneeCategory::Unassigned => 1,
            AssigneeCategory::UsCompany => 2,
            AssigneeCategory::ForeignCompany => 3,
            AssigneeCategory::UsIndividual => 4,
            AssigneeCategory::ForeignIndividual => 5,
            AssigneeCategory::UsFederalGovernment => 6,
            AssigneeCategory::ForeignGovernment => 7,
            AssigneeCategory::UsCountyGovernment => 8,
            AssigneeCategory::UsStateGovernment => 9,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AssigneeCategory::Unassigned => "Unassigned",
            AssigneeCategory::UsCompany => "US Company or Corporation",
            AssigneeCategory::ForeignCompany => "Foreign Company or Corporation",
            AssigneeCategory::UsIndividual => "US Individual",
            AssigneeCategory::ForeignIndividual => "Foreign Individual",
            AssigneeCategory::UsFederalGovernment => "US Federal Government",
            AssigneeCategory::ForeignGovernment => "Foreign Government",
            AssigneeCategory::UsCountyGovernment => "US County Government",
            AssigneeCategory::UsStateGovernment => "US State Government",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    pub fn unified(self) -> UnifiedCategory {
        match self {
            AssigneeCategory::Unassigned => UnifiedCategory::Unassigned,
            AssigneeCategory::UsCompany | AssigneeCategory::ForeignCompany => UnifiedCategory::Company,
            AssigneeCategory::UsIndividual | AssigneeCategory::ForeignIndividual => {
                UnifiedCategory::Individual
            }
            AssigneeCategory::UsFederalGovernment
            | AssigneeCategory::ForeignGovernment
            | AssigneeCategory::UsCountyGovernment
            | AssigneeCategory::UsStateGovernment => UnifiedCategory::Government,
        }
    }
}

impl UnifiedCategory {
    pub fn label(self) -> &'static str {
        match self {
            UnifiedCategory::Unassigned => "Unassigned",
            UnifiedCategory::Company => "Company",
            UnifiedCategory::Individual => "Individual",
            UnifiedCategory::Government => "Government",
        }
    }
}

impl fmt::Display for AssigneeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for UnifiedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Granular label for a raw type code; `"Unknown"` when unmapped.
pub fn granular_label(code: i64) -> &'static str {
    AssigneeCategory::from_code(code)
        .map(AssigneeCategory::label)
        .unwrap_or(UNKNOWN_LABEL)
}

pub fn unified_from_granular(label: &str) -> Option<UnifiedCategory> {
    AssigneeCategory::from_label(label).map(AssigneeCategory::unified)
}

/// Maps a possibly composite granular label (`"A& B"`) to unified labels.
///
/// Splits on `&`, trims each piece, maps known labels and passes unknown
/// pieces through trimmed, then rejoins with `" & "`.
pub fn map_unified(expr: &str) -> String {
    expr.split('&')
        .map(|piece| {
            let piece = piece.trim();
            unified_from_granular(piece)
                .map(UnifiedCategory::label)
                .unwrap_or(piece)
        })
        .collect::<Vec<_>>()
        .join(UNIFIED_JOINER)
}
