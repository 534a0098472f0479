use super::ToolEntry;
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Read-only list of tool entries in catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolCatalog {
    entries: Vec<ToolEntry>,
}

impl ToolCatalog {
    pub fn new(entries: Vec<ToolEntry>) -> Self {
        Self { entries }
    }

    /// Parses `id,name,category,free_tier,rating,price,commission_rate,url` rows.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut entries = Vec::new();

        for (index, record) in csv_reader.deserialize::<ToolRow>().enumerate() {
            let row = record?;
            entries.push(row.into_entry(index + 2)?);
        }

        Ok(Self { entries })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn entries(&self) -> &[ToolEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Where the assessment service obtains its tool catalog.
pub trait ToolCatalogSource: Send + Sync {
    fn load(&self) -> Result<ToolCatalog, CatalogError>;
}

/// Source that always hands back the same in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    catalog: ToolCatalog,
}

impl StaticCatalog {
    pub fn new(catalog: ToolCatalog) -> Self {
        Self { catalog }
    }
}

impl ToolCatalogSource for StaticCatalog {
    fn load(&self) -> Result<ToolCatalog, CatalogError> {
        Ok(self.catalog.clone())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to open tool catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tool catalog: {0}")]
    Csv(#[from] csv::Error),
    #[error("tool catalog line {line}: {message}")]
    InvalidRow { line: usize, message: String },
    #[error("tool catalog unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Deserialize)]
struct ToolRow {
    id: String,
    name: String,
    category: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    free_tier: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    rating: Option<String>,
    #[serde(default)]
    price: String,
    #[serde(default)]
    commission_rate: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    url: Option<String>,
}

impl ToolRow {
    fn into_entry(self, line: usize) -> Result<ToolEntry, CatalogError> {
        if self.id.is_empty() {
            return Err(CatalogError::InvalidRow {
                line,
                message: "id must not be empty".to_string(),
            });
        }

        let has_free_tier = match self.free_tier.as_deref().map(str::to_ascii_lowercase) {
            None => false,
            Some(flag) => match flag.as_str() {
                "true" | "yes" | "y" | "1" => true,
                "false" | "no" | "n" | "0" => false,
                other => {
                    return Err(CatalogError::InvalidRow {
                        line,
                        message: format!("free_tier must be true or false (got {other})"),
                    })
                }
            },
        };

        let rating = match self.rating {
            None => None,
            Some(raw) => match raw.parse::<f64>() {
                Ok(value) if (0.0..=5.0).contains(&value) => Some(value),
                _ => {
                    return Err(CatalogError::InvalidRow {
                        line,
                        message: format!("rating must be a number between 0 and 5 (got {raw})"),
                    })
                }
            },
        };

        Ok(ToolEntry {
            id: self.id,
            name: self.name,
            category: normalize_category(&self.category),
            has_free_tier,
            rating,
            price: self.price,
            commission_rate: self.commission_rate,
            url: self.url,
        })
    }
}

fn normalize_category(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .replace([' ', '-'], "_")
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
