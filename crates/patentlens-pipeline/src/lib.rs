//! Record-linkage and aggregation pipeline over PatentsView tables
//!
//! Four normalized inputs (patents, CPC assignments, assignees, locations)
//! share `patent_id` as their join key. This crate turns them into flat
//! extracts:
//! - predicate filters (primary-sequence, subclass allowlist, keywords)
//! - left-outer joins that fan a patent out per CPC row / assignee
//! - an assignee aggregator that folds the fan-out back into one row
//! - assignee category labelling (granular and unified)
//! - a [`Pipeline`] driver running one [`Recipe`] end to end
//!
//! Table IO lives in `patentlens-table`; this crate only reasons about data
//! shape.

pub mod aggregate;
pub mod category;
pub mod columns;
pub mod derive;
pub mod driver;
pub mod error;
pub mod filter;
pub mod join;
pub mod preset;
pub mod recipe;

pub use aggregate::{collapse_assignees, max_assignee_sequence};
pub use category::{granular_label, map_unified, AssigneeCategory, UnifiedCategory};
pub use driver::{Pipeline, RunReport, StepTiming};
pub use error::{PipelineError, Result};
pub use filter::{filter_by_keywords, filter_by_membership, filter_by_sequence, KeywordMatcher};
pub use join::left_join;
pub use preset::{preset, PRESET_NAMES};
pub use recipe::{
    CpcCountRecipe, DatasetPaths, KeywordSearchRecipe, PatentListRecipe, Recipe, RunConfig,
    TextCpcRecipe,
};
