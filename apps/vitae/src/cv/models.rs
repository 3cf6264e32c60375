//! Data model for the CV document: experience records, the optional profile
//! header, and the static section configuration.
//!
//! Records are immutable once loaded. Everything that varies per render pass
//! (page assignment, rounding classes) lives in the layout plan, not here.

use std::fmt;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Experience records
// ────────────────────────────────────────────────────────────────────────────

/// One entry of a CV section: a position, contract, or activity.
///
/// `topic`, `discipline`, `place`, and `link` are optional; the card builder
/// omits their markup entirely when they are absent. `current` marks an
/// ongoing engagement and defaults to false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceRecord {
    pub organization: String,
    pub role: String,
    /// Free-text time period, e.g. "Oct 2019 – present". Never parsed.
    pub period: String,
    #[serde(default)]
    pub topic: Option<String>,
    /// Discipline or course code, e.g. "CS-402".
    #[serde(default)]
    pub discipline: Option<String>,
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    /// Logo file name, resolved under the assets directory at render time.
    pub logo: String,
    #[serde(default)]
    pub current: bool,
}

impl ExperienceRecord {
    /// Absolute URL for the record's link, if any.
    ///
    /// Bare DOI suffixes ("10.xxxx/...") resolve through doi.org. Empty or
    /// whitespace-only links count as absent.
    pub fn link_href(&self) -> Option<String> {
        let link = self.link.as_deref()?.trim();
        if link.is_empty() {
            return None;
        }
        if link.starts_with("10.") {
            return Some(format!("https://doi.org/{link}"));
        }
        Some(link.to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Profile header
// ────────────────────────────────────────────────────────────────────────────

/// Person data rendered into the first page's intro and side panel.
/// Entirely optional; a missing profile leaves the intro slots empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub headline: Option<String>,
    /// Photo file name under the assets directory.
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub link: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Section configuration
// ────────────────────────────────────────────────────────────────────────────

/// The four CV sections, in their fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Academic,
    ForeignContracts,
    TechTransfer,
    Entrepreneurial,
}

/// Static display configuration for one section.
pub struct SectionSpec {
    pub kind: SectionKind,
    pub title: &'static str,
    /// DOM id / URL-safe identifier.
    pub slug: &'static str,
    /// True for the section that anchors the intro page.
    pub first: bool,
}

/// Section table in display order. Fixed at compile time.
pub const SECTIONS: [SectionSpec; 4] = [
    SectionSpec {
        kind: SectionKind::Academic,
        title: "Academic Activity",
        slug: "academic",
        first: true,
    },
    SectionSpec {
        kind: SectionKind::ForeignContracts,
        title: "Foreign Contracts",
        slug: "foreign-contracts",
        first: false,
    },
    SectionSpec {
        kind: SectionKind::TechTransfer,
        title: "Technology Transfer",
        slug: "tech-transfer",
        first: false,
    },
    SectionSpec {
        kind: SectionKind::Entrepreneurial,
        title: "Entrepreneurial Activity",
        slug: "entrepreneurial",
        first: false,
    },
];

impl SectionKind {
    /// All sections in display order. Layout and rendering iterate this and
    /// nothing else, so the order is defined in exactly one place.
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Academic,
        SectionKind::ForeignContracts,
        SectionKind::TechTransfer,
        SectionKind::Entrepreneurial,
    ];

    pub fn spec(self) -> &'static SectionSpec {
        SECTIONS
            .iter()
            .find(|spec| spec.kind == self)
            .expect("every section kind has an entry in SECTIONS")
    }

    /// Key of this section's record list in the CV data document.
    pub fn data_key(self) -> &'static str {
        match self {
            SectionKind::Academic => "academic",
            SectionKind::ForeignContracts => "foreign_contracts",
            SectionKind::TechTransfer => "tech_transfer",
            SectionKind::Entrepreneurial => "entrepreneurial",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().slug)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Loaded section store
// ────────────────────────────────────────────────────────────────────────────

/// Records of the sections that loaded successfully in a render pass.
/// Sections that failed to load simply stay empty here; the layout plan
/// holds no slices for them either.
#[derive(Debug, Clone, Default)]
pub struct SectionRecords {
    academic: Vec<ExperienceRecord>,
    foreign_contracts: Vec<ExperienceRecord>,
    tech_transfer: Vec<ExperienceRecord>,
    entrepreneurial: Vec<ExperienceRecord>,
}

impl SectionRecords {
    pub fn set(&mut self, kind: SectionKind, records: Vec<ExperienceRecord>) {
        match kind {
            SectionKind::Academic => self.academic = records,
            SectionKind::ForeignContracts => self.foreign_contracts = records,
            SectionKind::TechTransfer => self.tech_transfer = records,
            SectionKind::Entrepreneurial => self.entrepreneurial = records,
        }
    }

    pub fn get(&self, kind: SectionKind) -> &[ExperienceRecord] {
        match kind {
            SectionKind::Academic => &self.academic,
            SectionKind::ForeignContracts => &self.foreign_contracts,
            SectionKind::TechTransfer => &self.tech_transfer,
            SectionKind::Entrepreneurial => &self.entrepreneurial,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
