//! Closed intent set and canonical department keys

use serde::{Deserialize, Serialize};

/// The caller's inferred purpose for one message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Fees,
    Admission,
    Department,
    Faculty,
    Contact,
    Placement,
    Discipline,
    Transportation,
    Workshop,
    Library,
    Disability,
    #[default]
    General,
}

impl Intent {
    /// Wire label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Fees => "fees",
            Self::Admission => "admission",
            Self::Department => "department",
            Self::Faculty => "faculty",
            Self::Contact => "contact",
            Self::Placement => "placement",
            Self::Discipline => "discipline",
            Self::Transportation => "transportation",
            Self::Workshop => "workshop",
            Self::Library => "library",
            Self::Disability => "disability",
            Self::General => "general",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::all().iter().copied().find(|i| i.as_str() == s)
    }

    /// Every intent, in declaration order
    pub fn all() -> &'static [Intent] {
        &[
            Self::Greeting,
            Self::Fees,
            Self::Admission,
            Self::Department,
            Self::Faculty,
            Self::Contact,
            Self::Placement,
            Self::Discipline,
            Self::Transportation,
            Self::Workshop,
            Self::Library,
            Self::Disability,
            Self::General,
        ]
    }

    /// Whether the resolver reads the department entity for this intent
    pub fn uses_department(&self) -> bool {
        matches!(self, Self::Department | Self::Faculty)
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical engineering departments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    Computer,
    Mechanical,
    Electrical,
    Civil,
    It,
}

impl Department {
    /// Canonical key used in content tables
    pub fn key(&self) -> &'static str {
        match self {
            Self::Computer => "computer",
            Self::Mechanical => "mechanical",
            Self::Electrical => "electrical",
            Self::Civil => "civil",
            Self::It => "it",
        }
    }

    /// Display name used in rendered fragments
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Computer => "Computer Science",
            Self::Mechanical => "Mechanical Engineering",
            Self::Electrical => "Electrical Engineering",
            Self::Civil => "Civil Engineering",
            Self::It => "Information Technology",
        }
    }

    /// Font Awesome icon class for faculty sections
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Computer => "fas fa-laptop-code",
            Self::Mechanical => "fas fa-cogs",
            Self::Electrical => "fas fa-bolt",
            Self::Civil => "fas fa-hard-hat",
            Self::It => "fas fa-network-wired",
        }
    }

    /// Parse a canonical key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|d| d.key() == key)
    }

    /// All departments, in entity matching order
    pub fn all() -> &'static [Department] {
        &[
            Self::Computer,
            Self::Mechanical,
            Self::Electrical,
            Self::Civil,
            Self::It,
        ]
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
