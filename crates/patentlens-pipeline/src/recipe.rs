//! Recipe descriptors and run configuration.
//!
//! A recipe names which filters and joins a run performs and where the result
//! goes; it holds no data. Recipes round-trip through JSON so keyword sets and
//! CPC allowlists can live in a config file instead of code.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

fn primary_sequence() -> String {
    "0".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recipe {
    /// Primary CPC rows restricted to a subclass allowlist.
    CpcCount(CpcCountRecipe),
    /// Keyword hits in title/abstract that carry a (filtered) primary CPC.
    TextCpc(TextCpcRecipe),
    /// Full enrichment of a pre-selected patent id list.
    PatentList(PatentListRecipe),
    /// Full enrichment of every keyword hit.
    KeywordSearch(KeywordSearchRecipe),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CpcCountRecipe {
    #[serde(default = "primary_sequence")]
    pub sequence: String,
    /// Empty means "all subclasses".
    #[serde(default)]
    pub cpc_subclasses: Vec<String>,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextCpcRecipe {
    #[serde(default = "primary_sequence")]
    pub sequence: String,
    #[serde(default)]
    pub cpc_subclasses: Vec<String>,
    pub keywords: Vec<String>,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatentListRecipe {
    /// CSV file with a `patent_id` column.
    pub patent_list: PathBuf,
    #[serde(default = "primary_sequence")]
    pub sequence: String,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordSearchRecipe {
    pub keywords: Vec<String>,
    #[serde(default = "primary_sequence")]
    pub sequence: String,
    pub output: PathBuf,
}

impl Recipe {
    pub fn name(&self) -> &'static str {
        match self {
            Recipe::CpcCount(_) => "cpc_count",
            Recipe::TextCpc(_) => "text_cpc",
            Recipe::PatentList(_) => "patent_list",
            Recipe::KeywordSearch(_) => "keyword_search",
        }
    }

    pub fn output(&self) -> &Path {
        match self {
            Recipe::CpcCount(r) => &r.output,
            Recipe::TextCpc(r) => &r.output,
            Recipe::PatentList(r) => &r.output,
            Recipe::KeywordSearch(r) => &r.output,
        }
    }

    pub fn set_output(&mut self, output: PathBuf) {
        match self {
            Recipe::CpcCount(r) => r.output = output,
            Recipe::TextCpc(r) => r.output = output,
            Recipe::PatentList(r) => r.output = output,
            Recipe::KeywordSearch(r) => r.output = output,
        }
    }
}

/// Locations of the four upstream tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DatasetPaths {
    pub patent: PathBuf,
    pub cpc: PathBuf,
    pub assignee: PathBuf,
    pub location: PathBuf,
}

impl Default for DatasetPaths {
    fn default() -> Self {
        DatasetPaths {
            patent: PathBuf::from("g_patent.tsv"),
            cpc: PathBuf::from("g_cpc_current.tsv"),
            assignee: PathBuf::from("g_assignee_disambiguated.tsv"),
            location: PathBuf::from("g_location_disambiguated.tsv"),
        }
    }
}

impl DatasetPaths {
    /// Relative paths are taken relative to `dir`; absolute paths are kept.
    pub fn resolve_in(&self, dir: &Path) -> DatasetPaths {
        let join = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        };
        DatasetPaths {
            patent: join(&self.patent),
            cpc: join(&self.cpc),
            assignee: join(&self.assignee),
            location: join(&self.location),
        }
    }
}

/// Everything one run needs: input tables plus the recipe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunConfig {
    #[serde(default)]
    pub inputs: DatasetPaths,
    pub recipe: Recipe,
}

impl RunConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| PipelineError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| PipelineError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_with_defaults() {
        let cfg: RunConfig = serde_json::from_str(
            r#"{
                "recipe": {
                    "kind": "cpc_count",
                    "cpc_subclasses": ["F24S", "H02S"],
                    "output": "solar.csv"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.inputs, DatasetPaths::default());
        match &cfg.recipe {
            Recipe::CpcCount(r) => {
                assert_eq!(r.sequence, "0");
                assert_eq!(r.cpc_subclasses, vec!["F24S", "H02S"]);
            }
            other => panic!("unexpected recipe {other:?}"),
        }
        assert_eq!(cfg.recipe.output(), Path::new("solar.csv"));
    }

    #[test]
    fn test_partial_inputs_keep_default_names() {
        let cfg: RunConfig = serde_json::from_str(
            r#"{
                "inputs": { "patent": "/data/g_patent_n.tsv" },
                "recipe": { "kind": "keyword_search", "keywords": ["zcash"], "output": "out.csv" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.inputs.patent, PathBuf::from("/data/g_patent_n.tsv"));
        assert_eq!(cfg.inputs.cpc, PathBuf::from("g_cpc_current.tsv"));
        assert_eq!(cfg.recipe.name(), "keyword_search");
    }

    #[test]
    fn test_config_roundtrip_json() {
        let cfg = RunConfig {
            inputs: DatasetPaths::default(),
            recipe: Recipe::PatentList(PatentListRecipe {
                patent_list: PathBuf::from("ids.csv"),
                sequence: "0".into(),
                output: PathBuf::from("out.csv"),
            }),
        };
        let parsed: RunConfig = serde_json::from_str(&cfg.to_json_pretty().unwrap()).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn test_resolve_in_keeps_absolute() {
        let paths = DatasetPaths {
            patent: PathBuf::from("/abs/g_patent.tsv"),
            ..DatasetPaths::default()
        };
        let resolved = paths.resolve_in(Path::new("/data"));
        assert_eq!(resolved.patent, PathBuf::from("/abs/g_patent.tsv"));
        assert_eq!(resolved.cpc, PathBuf::from("/data/g_cpc_current.tsv"));
    }

    #[test]
    fn test_bad_config_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        fs::write(&path, r#"{ "recipe": { "kind": "nope" } }"#).unwrap();
        let err = RunConfig::from_path(&path).unwrap_err();
        assert!(matches!(err, PipelineError::Config { .. }));
        assert!(err.to_string().contains("run.json"));
    }
}
