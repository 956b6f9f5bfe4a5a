//! Where the three startup documents live.

use serde::{Deserialize, Serialize};

/// The three startup documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Document {
    /// Site configuration (`data.json`).
    Config,
    /// Program catalog (`program.json`).
    Programs,
    /// QRIS region catalog (`qris.json`).
    Qris,
}

impl Document {
    /// File name under the `json/` directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Config => "data.json",
            Self::Programs => "program.json",
            Self::Qris => "qris.json",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Programs => "program catalog",
            Self::Qris => "QRIS catalog",
        }
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Locations (URLs or paths) of the three documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataLocations {
    /// Site configuration.
    pub config: String,
    /// Program catalog.
    pub programs: String,
    /// QRIS catalog.
    pub qris: String,
}

impl DataLocations {
    /// Creates locations from three explicit values.
    pub fn new(
        config: impl Into<String>,
        programs: impl Into<String>,
        qris: impl Into<String>,
    ) -> Self {
        Self {
            config: config.into(),
            programs: programs.into(),
            qris: qris.into(),
        }
    }

    /// Derives `<base>/json/<file>` for every document.
    ///
    /// `base` may be a URL (`https://host/PCGenerator`) or a directory.
    pub fn from_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        let at = |doc: Document| {
            if base.is_empty() {
                format!("json/{}", doc.file_name())
            } else {
                format!("{base}/json/{}", doc.file_name())
            }
        };
        Self {
            config: at(Document::Config),
            programs: at(Document::Programs),
            qris: at(Document::Qris),
        }
    }

    /// Location of one document.
    pub fn get(&self, document: Document) -> &str {
        match document {
            Document::Config => &self.config,
            Document::Programs => &self.programs,
            Document::Qris => &self.qris,
        }
    }

    /// Replaces the location of one document.
    pub fn with(mut self, document: Document, location: impl Into<String>) -> Self {
        let location = location.into();
        match document {
            Document::Config => self.config = location,
            Document::Programs => self.programs = location,
            Document::Qris => self.qris = location,
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base_url() {
        let locations = DataLocations::from_base("https://host.example/PCGenerator/");
        assert_eq!(locations.config, "https://host.example/PCGenerator/json/data.json");
        assert_eq!(locations.programs, "https://host.example/PCGenerator/json/program.json");
        assert_eq!(locations.qris, "https://host.example/PCGenerator/json/qris.json");
    }

    #[test]
    fn test_from_base_dir() {
        assert_eq!(DataLocations::from_base("data").get(Document::Qris), "data/json/qris.json");
        assert_eq!(DataLocations::from_base("").get(Document::Config), "json/data.json");
    }

    #[test]
    fn test_with_override() {
        let locations = DataLocations::from_base("data").with(Document::Programs, "/tmp/p.json");
        assert_eq!(locations.programs, "/tmp/p.json");
        assert_eq!(locations.config, "data/json/data.json");
    }
}
