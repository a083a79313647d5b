//! Built-in recipes for the topics the tool was first run on.

use std::path::PathBuf;

use crate::error::{PipelineError, Result};
use crate::recipe::{
    CpcCountRecipe, KeywordSearchRecipe, PatentListRecipe, Recipe, TextCpcRecipe,
};

pub const PRESET_NAMES: [&str; 4] = ["solar-cpc", "dental-implant", "solar-patent-list", "blockchain"];

pub const SOLAR_CPC_SUBCLASSES: [&str; 2] = ["F24S", "H02S"];

pub const DENTAL_CPC_SUBCLASSES: [&str; 1] = ["A61C"];

pub const DENTAL_IMPLANT_KEYWORDS: [&str; 10] = [
    "dental implant",
    "Dental implant fixture",
    "Dental implant fix",
    "Dental implant screw",
    "dental implant abutment",
    "dental implant connect",
    "dental implant connector",
    "Dental implant artificial teeth",
    "Dental implant artificial tooth",
    "Dental implant artificial cap",
];

pub const BLOCKCHAIN_KEYWORDS: [&str; 28] = [
    "blockchain",
    "bitcoin",
    "bit-coin",
    "block-chain",
    "blocksign",
    "codius",
    "colored coin",
    "colored-coin",
    "crypto currency",
    "crypto-currency",
    "cryptocurrency",
    "distributed ledger",
    "distributed-ledger",
    "dogecoin",
    "doge-coin",
    "ethereum",
    "factom",
    "litecoin",
    "lite-coin",
    "pay-to-script-hash",
    "p2sh",
    "proof of stake",
    "proof-of-stake",
    "sidechain",
    "smart contract",
    "smart-contract",
    "zcash",
    "zerocash",
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn preset(name: &str) -> Result<Recipe> {
    let recipe = match name {
        "solar-cpc" => Recipe::CpcCount(CpcCountRecipe {
            sequence: "0".into(),
            cpc_subclasses: owned(&SOLAR_CPC_SUBCLASSES),
            output: PathBuf::from("num_patent_cpc_solar.csv"),
        }),
        "dental-implant" => Recipe::TextCpc(TextCpcRecipe {
            sequence: "0".into(),
            cpc_subclasses: owned(&DENTAL_CPC_SUBCLASSES),
            keywords: owned(&DENTAL_IMPLANT_KEYWORDS),
            output: PathBuf::from("new_topic_all.csv"),
        }),
        // Consumes the output of `solar-cpc`.
        "solar-patent-list" => Recipe::PatentList(PatentListRecipe {
            patent_list: PathBuf::from("num_patent_cpc_solar.csv"),
            sequence: "0".into(),
            output: PathBuf::from("full_data_patent_list_solar.csv"),
        }),
        "blockchain" => Recipe::KeywordSearch(KeywordSearchRecipe {
            keywords: owned(&BLOCKCHAIN_KEYWORDS),
            sequence: "0".into(),
            output: PathBuf::from("final_data_blockchain.csv"),
        }),
        other => return Err(PipelineError::UnknownPreset(other.to_string())),
    };
    Ok(recipe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_resolves() {
        for name in PRESET_NAMES {
            assert!(preset(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_unknown_preset() {
        assert!(matches!(preset("wind"), Err(PipelineError::UnknownPreset(n)) if n == "wind"));
    }

    #[test]
    fn test_blockchain_keywords_distinct() {
        let mut sorted = BLOCKCHAIN_KEYWORDS.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), BLOCKCHAIN_KEYWORDS.len());
    }
}
