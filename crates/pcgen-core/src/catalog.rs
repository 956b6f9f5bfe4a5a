//! Catalog data model.
//!
//! The catalog is the union of the three startup documents: the site config,
//! the program table and the QRIS region table. Field names on the wire follow
//! the published JSON documents; Rust names describe what the fields hold.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::narrative::PLACEHOLDER;

// =============================================================================
// SITE CONFIG
// =============================================================================

/// General site configuration (`data.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Base URL that program paths are appended to.
    #[serde(rename = "baseUrl")]
    pub base_url: String,

    /// Confirmation contact used when the user gives no override.
    #[serde(rename = "konfirmasiDefault")]
    pub default_confirmation: String,

    /// Bank accounts shown in the narrative appendix.
    #[serde(rename = "rekening")]
    pub accounts: AccountBook,
}

/// The two bank accounts donors can transfer to.
///
/// Stored flat on the wire (`bsi`, `anBsi`, `mandiri`, `anMandiri`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBook {
    /// BSI account number.
    pub bsi: String,
    /// BSI account holder.
    #[serde(rename = "anBsi")]
    pub bsi_holder: String,
    /// Mandiri account number.
    pub mandiri: String,
    /// Mandiri account holder.
    #[serde(rename = "anMandiri")]
    pub mandiri_holder: String,
}

/// Display view of a single bank account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankAccount<'a> {
    /// Institution name.
    pub institution: &'static str,
    /// Account number.
    pub number: &'a str,
    /// Account holder name.
    pub holder: &'a str,
}

impl AccountBook {
    /// Returns both accounts in display order.
    pub fn accounts(&self) -> [BankAccount<'_>; 2] {
        [
            BankAccount {
                institution: "BSI",
                number: &self.bsi,
                holder: &self.bsi_holder,
            },
            BankAccount {
                institution: "Mandiri",
                number: &self.mandiri,
                holder: &self.mandiri_holder,
            },
        ]
    }
}

// =============================================================================
// PROGRAMS AND REGIONS
// =============================================================================

/// A donation program (`program.json` entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Display name.
    pub name: String,

    /// Path segment appended to the base URL, e.g. `/zakat`.
    pub path: String,

    /// Narrative template containing the link placeholder.
    #[serde(rename = "text")]
    pub template: String,

    /// Google Drive id of the poster image.
    #[serde(rename = "posterDriveId", default, skip_serializing_if = "Option::is_none")]
    pub poster_drive_id: Option<String>,
}

impl Program {
    /// Returns the poster asset id if one is set and non-empty.
    pub fn poster_asset(&self) -> Option<&str> {
        non_empty(self.poster_drive_id.as_deref())
    }
}

/// A regional QRIS entry (`qris.json` entry).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrisEntry {
    /// Google Drive id of the QRIS image.
    #[serde(rename = "driveId", default, skip_serializing_if = "Option::is_none")]
    pub drive_id: Option<String>,
}

impl QrisEntry {
    /// Returns the QRIS asset id if one is set and non-empty.
    pub fn asset(&self) -> Option<&str> {
        non_empty(self.drive_id.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|id| !id.trim().is_empty())
}

/// Program table keyed by program key, in document order.
pub type ProgramTable = IndexMap<String, Program>;

/// QRIS table keyed by region name, in document order.
pub type QrisTable = IndexMap<String, QrisEntry>;

// =============================================================================
// CATALOG
// =============================================================================

/// Everything loaded at startup. Immutable for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    config: SiteConfig,
    programs: ProgramTable,
    qris: QrisTable,
}

impl Catalog {
    /// Assembles a catalog from its three documents.
    pub fn new(config: SiteConfig, programs: ProgramTable, qris: QrisTable) -> Self {
        Self {
            config,
            programs,
            qris,
        }
    }

    /// Site configuration.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Looks up a program by key.
    pub fn program(&self, key: &str) -> Option<&Program> {
        self.programs.get(key)
    }

    /// Iterates programs in document order.
    pub fn programs(&self) -> impl Iterator<Item = (&str, &Program)> {
        self.programs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Looks up a QRIS entry by region name.
    pub fn region(&self, name: &str) -> Option<&QrisEntry> {
        self.qris.get(name)
    }

    /// Iterates QRIS regions in document order.
    pub fn regions(&self) -> impl Iterator<Item = (&str, &QrisEntry)> {
        self.qris.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of programs.
    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    /// Number of QRIS regions.
    pub fn region_count(&self) -> usize {
        self.qris.len()
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// A single catalog finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogIssue {
    /// Location of the problem, e.g. `programs.zakat.text`.
    pub field: String,
    /// What is wrong.
    pub message: String,
}

impl CatalogIssue {
    /// Creates a new issue.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Trait for data that can be checked for suspicious content.
///
/// Findings are reported, not enforced: generation still works on a catalog
/// with issues.
pub trait Validate {
    /// Returns every issue found, or an empty vector.
    fn validate(&self) -> Vec<CatalogIssue>;

    /// Returns true if no issues were found.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

impl Validate for Catalog {
    fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        if self.config.base_url.trim().is_empty() {
            issues.push(CatalogIssue::new("config.baseUrl", "base URL is empty"));
        }

        for (key, program) in &self.programs {
            if program.path.is_empty() {
                issues.push(CatalogIssue::new(
                    format!("programs.{key}.path"),
                    "path is empty",
                ));
            }
            let count = program.template.matches(PLACEHOLDER).count();
            if count != 1 {
                issues.push(CatalogIssue::new(
                    format!("programs.{key}.text"),
                    format!("template contains {PLACEHOLDER} {count} times, expected exactly once"),
                ));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> SiteConfig {
        serde_json::from_str(
            r#"{
                "baseUrl": "https://donasi.example",
                "konfirmasiDefault": "0812xxxxxxx",
                "rekening": {
                    "bsi": "7123456789",
                    "anBsi": "Yayasan Peduli",
                    "mandiri": "1330012345678",
                    "anMandiri": "Yayasan Peduli Umat"
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_config_wire_format() {
        let config = sample_config();
        assert_eq!(config.base_url, "https://donasi.example");
        assert_eq!(config.default_confirmation, "0812xxxxxxx");
        assert_eq!(config.accounts.bsi_holder, "Yayasan Peduli");

        let [bsi, mandiri] = config.accounts.accounts();
        assert_eq!(bsi.institution, "BSI");
        assert_eq!(bsi.number, "7123456789");
        assert_eq!(mandiri.institution, "Mandiri");
        assert_eq!(mandiri.holder, "Yayasan Peduli Umat");
    }

    #[test]
    fn test_program_table_keeps_document_order() {
        let programs: ProgramTable = serde_json::from_str(
            r#"{
                "zakat": {"name": "Zakat", "path": "/zakat", "text": "{LINK}"},
                "air": {"name": "Sumur", "path": "/air", "text": "{LINK}", "posterDriveId": "abc"},
                "beasiswa": {"name": "Beasiswa", "path": "/beasiswa", "text": "{LINK}", "posterDriveId": ""}
            }"#,
        )
        .unwrap();

        let keys: Vec<_> = programs.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zakat", "air", "beasiswa"]);
        assert_eq!(programs["zakat"].poster_asset(), None);
        assert_eq!(programs["air"].poster_asset(), Some("abc"));
        assert_eq!(programs["beasiswa"].poster_asset(), None);
    }

    #[test]
    fn test_qris_entry_without_id() {
        let qris: QrisTable =
            serde_json::from_str(r#"{"Jakarta": {"driveId": "q1"}, "Bandung": {}}"#).unwrap();
        assert_eq!(qris["Jakarta"].asset(), Some("q1"));
        assert_eq!(qris["Bandung"].asset(), None);
    }

    #[test]
    fn test_validate_reports_placeholder_count() {
        let mut programs = ProgramTable::new();
        programs.insert(
            "ok".into(),
            Program {
                name: "Ok".into(),
                path: "/ok".into(),
                template: "Link: {LINK}".into(),
                poster_drive_id: None,
            },
        );
        programs.insert(
            "twice".into(),
            Program {
                name: "Twice".into(),
                path: "/twice".into(),
                template: "{LINK} and {LINK}".into(),
                poster_drive_id: None,
            },
        );
        programs.insert(
            "none".into(),
            Program {
                name: "None".into(),
                path: String::new(),
                template: "no link".into(),
                poster_drive_id: None,
            },
        );
        let catalog = Catalog::new(sample_config(), programs, QrisTable::new());

        let issues = catalog.validate();
        let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(
            fields,
            ["programs.twice.text", "programs.none.path", "programs.none.text"]
        );
        assert!(!catalog.is_valid());
    }

    #[test]
    fn test_lookup() {
        let mut qris = QrisTable::new();
        qris.insert("Jakarta".into(), QrisEntry::default());
        let catalog = Catalog::new(sample_config(), ProgramTable::new(), qris);

        assert!(catalog.program("zakat").is_none());
        assert!(catalog.region("Jakarta").is_some());
        assert_eq!(catalog.region_count(), 1);
        assert_eq!(catalog.program_count(), 0);
        assert!(catalog.is_valid());
    }
}
