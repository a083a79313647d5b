//! Pipeline driver: runs one [`Recipe`] from input tables to a CSV file.
//!
//! Data flows load → filter → join → aggregate → map categories → write.
//! Every run loads its inputs afresh; nothing is shared between runs. A
//! failure at any step aborts the run before the output file is touched.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use patentlens_table::{load_columns, write_csv, LoadOptions, Table};

use crate::aggregate::{collapse_assignees, max_assignee_sequence};
use crate::category::map_unified;
use crate::columns::*;
use crate::derive::{derive_assignee_fields, with_combined_text};
use crate::error::Result;
use crate::filter::{
    drop_missing, filter_by_keywords, filter_by_membership, filter_by_sequence, KeywordMatcher,
};
use crate::join::left_join;
use crate::recipe::{
    CpcCountRecipe, DatasetPaths, KeywordSearchRecipe, PatentListRecipe, Recipe, TextCpcRecipe,
};

const CPC_COUNT_COLUMNS: &[&str] = &[PATENT_ID, CPC_SUBCLASS, CPC_SEQUENCE, CPC_CLASS, CPC_GROUP];
const TEXT_PATENT_COLUMNS: &[&str] = &[PATENT_ID, PATENT_DATE, PATENT_ABSTRACT, PATENT_TITLE];
const ENRICH_PATENT_COLUMNS: &[&str] = &[
    PATENT_ID,
    PATENT_DATE,
    PATENT_TYPE,
    PATENT_ABSTRACT,
    PATENT_TITLE,
];
const PRIMARY_CPC_COLUMNS: &[&str] = &[PATENT_ID, CPC_SUBCLASS, CPC_SEQUENCE];
const PRIMARY_CPC_CLASS_COLUMNS: &[&str] = &[PATENT_ID, CPC_SUBCLASS, CPC_SEQUENCE, CPC_CLASS];
const ASSIGNEE_COLUMNS: &[&str] = &[
    PATENT_ID,
    ASSIGNEE_NAME_FIRST,
    ASSIGNEE_NAME_LAST,
    ASSIGNEE_ORGANIZATION,
    ASSIGNEE_SEQUENCE,
    ASSIGNEE_TYPE,
    LOCATION_ID,
];
const LOCATION_COLUMNS: &[&str] = &[LOCATION_ID, DISAMBIG_STATE, DISAMBIG_COUNTRY];

/// Working columns removed from keyword-search output.
const KEYWORD_SEARCH_DROPPED: &[&str] = &[CPC_SEQUENCE, LOCATION_ID, COMBINED_TEXT];

#[derive(Debug, Clone)]
pub struct StepTiming {
    pub label: String,
    pub elapsed: Duration,
    /// Rows in the table the step produced.
    pub rows: usize,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub recipe: &'static str,
    pub output: PathBuf,
    pub rows: usize,
    pub distinct_patents: usize,
    pub steps: Vec<StepTiming>,
}

#[derive(Default)]
struct Steps {
    timings: Vec<StepTiming>,
}

impl Steps {
    fn run<F>(&mut self, label: &str, f: F) -> Result<Table>
    where
        F: FnOnce() -> Result<Table>,
    {
        let start = Instant::now();
        let table = f()?;
        self.record(label, start, table.len());
        Ok(table)
    }

    fn record(&mut self, label: &str, start: Instant, rows: usize) {
        let elapsed = start.elapsed();
        tracing::info!(
            step = label,
            rows,
            elapsed_ms = elapsed.as_millis() as u64,
            "step finished"
        );
        self.timings.push(StepTiming {
            label: label.to_string(),
            elapsed,
            rows,
        });
    }
}

/// Where an enrichment run gets its starting patents from.
enum Seed<'a> {
    List(&'a PatentListRecipe),
    Keywords(&'a KeywordSearchRecipe),
}

struct Enrichment<'a> {
    seed: Seed<'a>,
    sequence: &'a str,
    cpc_columns: &'static [&'static str],
    drop_columns: &'static [&'static str],
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    inputs: DatasetPaths,
    table_options: LoadOptions,
    list_options: LoadOptions,
}

impl Pipeline {
    pub fn new(inputs: DatasetPaths) -> Self {
        Pipeline {
            inputs,
            table_options: LoadOptions::tsv(),
            list_options: LoadOptions::csv(),
        }
    }

    /// Overrides how the four dataset tables are parsed.
    pub fn with_table_options(mut self, options: LoadOptions) -> Self {
        self.table_options = options;
        self
    }

    pub fn inputs(&self) -> &DatasetPaths {
        &self.inputs
    }

    pub fn run(&self, recipe: &Recipe) -> Result<RunReport> {
        let span = tracing::info_span!("recipe", kind = recipe.name());
        let _guard = span.enter();

        let mut steps = Steps::default();
        let table = match recipe {
            Recipe::CpcCount(r) => self.cpc_count(r, &mut steps)?,
            Recipe::TextCpc(r) => self.text_cpc(r, &mut steps)?,
            Recipe::PatentList(r) => self.enrich(
                Enrichment {
                    seed: Seed::List(r),
                    sequence: &r.sequence,
                    cpc_columns: PRIMARY_CPC_COLUMNS,
                    drop_columns: &[],
                },
                &mut steps,
            )?,
            Recipe::KeywordSearch(r) => self.enrich(
                Enrichment {
                    seed: Seed::Keywords(r),
                    sequence: &r.sequence,
                    cpc_columns: PRIMARY_CPC_CLASS_COLUMNS,
                    drop_columns: KEYWORD_SEARCH_DROPPED,
                },
                &mut steps,
            )?,
        };

        let output = recipe.output().to_path_buf();
        let start = Instant::now();
        write_csv(&table, &output)?;
        steps.record("write output", start, table.len());

        let report = RunReport {
            recipe: recipe.name(),
            output,
            rows: table.len(),
            distinct_patents: table.distinct_count(PATENT_ID)?,
            steps: steps.timings,
        };
        tracing::info!(
            rows = report.rows,
            distinct_patents = report.distinct_patents,
            output = %report.output.display(),
            "recipe finished"
        );
        Ok(report)
    }

    fn load(&self, path: &Path, columns: &[&str]) -> Result<Table> {
        Ok(load_columns(path, &self.table_options, columns)?)
    }

    fn load_patents(&self, columns: &[&str]) -> Result<Table> {
        let mut patents = self.load(&self.inputs.patent, columns)?;
        with_combined_text(&mut patents)?;
        Ok(patents)
    }

    fn primary_cpc<S: AsRef<str>>(
        &self,
        columns: &[&str],
        sequence: &str,
        subclasses: &[S],
    ) -> Result<Table> {
        let cpc = self.load(&self.inputs.cpc, columns)?;
        let cpc = filter_by_sequence(&cpc, CPC_SEQUENCE, sequence)?;
        Ok(filter_by_membership(&cpc, CPC_SUBCLASS, subclasses)?)
    }

    fn cpc_count(&self, r: &CpcCountRecipe, steps: &mut Steps) -> Result<Table> {
        steps.run("load and filter cpc", || {
            self.primary_cpc(CPC_COUNT_COLUMNS, &r.sequence, &r.cpc_subclasses)
        })
    }

    fn text_cpc(&self, r: &TextCpcRecipe, steps: &mut Steps) -> Result<Table> {
        let matcher = KeywordMatcher::new(&r.keywords)?;
        let patents = steps.run("load patents", || self.load_patents(TEXT_PATENT_COLUMNS))?;
        let cpc = steps.run("load and filter cpc", || {
            self.primary_cpc(PRIMARY_CPC_COLUMNS, &r.sequence, &r.cpc_subclasses)
        })?;
        let joined = steps.run("join patents with cpc", || {
            Ok(left_join(&patents, &cpc, PATENT_ID)?)
        })?;
        steps.run("keyword search", || {
            let hits = filter_by_keywords(&joined, COMBINED_TEXT, &matcher)?;
            Ok(drop_missing(&hits, CPC_SUBCLASS)?)
        })
    }

    fn enrich(&self, plan: Enrichment<'_>, steps: &mut Steps) -> Result<Table> {
        let seed = match plan.seed {
            Seed::List(r) => {
                let list = steps.run("load patent list", || {
                    Ok(load_columns(&r.patent_list, &self.list_options, &[PATENT_ID])?)
                })?;
                let patents = steps.run("load patents", || self.load_patents(ENRICH_PATENT_COLUMNS))?;
                steps.run("join list with patents", || Ok(left_join(&list, &patents, PATENT_ID)?))?
            }
            Seed::Keywords(r) => {
                let matcher = KeywordMatcher::new(&r.keywords)?;
                let patents = steps.run("load patents", || self.load_patents(ENRICH_PATENT_COLUMNS))?;
                steps.run("keyword search", || {
                    Ok(filter_by_keywords(&patents, COMBINED_TEXT, &matcher)?)
                })?
            }
        };

        let no_subclasses: [&str; 0] = [];
        let cpc = steps.run("load and filter cpc", || {
            self.primary_cpc(plan.cpc_columns, plan.sequence, &no_subclasses)
        })?;
        let joined = steps.run("join with cpc", || Ok(left_join(&seed, &cpc, PATENT_ID)?))?;

        let assignees = steps.run("load assignees", || {
            let mut assignees = self.load(&self.inputs.assignee, ASSIGNEE_COLUMNS)?;
            derive_assignee_fields(&mut assignees)?;
            Ok(assignees)
        })?;
        let joined = steps.run("join with assignees", || {
            Ok(left_join(&joined, &assignees, PATENT_ID)?)
        })?;

        let locations = steps.run("load locations", || self.load(&self.inputs.location, LOCATION_COLUMNS))?;
        let mut joined = steps.run("join with locations", || {
            Ok(left_join(&joined, &locations, LOCATION_ID)?)
        })?;
        joined.drop_columns(plan.drop_columns)?;

        let max_sequence = max_assignee_sequence(&assignees)?;
        let collapsed = steps.run("aggregate assignees", || Ok(collapse_assignees(joined)?))?;

        steps.run("map categories", || {
            let mut collapsed = collapsed;
            let reg = collapsed.column_index(ASSIGNEE_TYPE_REG)?;
            let unified = collapsed
                .rows()
                .iter()
                .map(|row| row[reg].as_deref().map(map_unified))
                .collect();
            collapsed.push_column(ASSIGNEE_TYPE_UNIFIED, unified)?;
            Ok(left_join(&collapsed, &max_sequence, PATENT_ID)?)
        })
    }
}
