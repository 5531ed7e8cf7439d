//! End-to-end run: load → normalize → aggregate → figure → outputs
//!
//! [`PipelineContext`] carries the configuration and the loaded reference into
//! every stage, so each stage is a plain function of its inputs.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::aggregate::{aggregate, Aggregation};
use crate::config::HeatmapConfig;
use crate::plot::{Figure, PriorityTier};
use crate::reader::{CountryReference, CsvFileReader, NormalizedProjects, Reader};
use crate::writer::{display, HtmlWriter, KaleidoExporter};
use crate::{HeatmapError, Result};

/// Configuration plus the reference table, built once per run
#[derive(Debug, Clone)]
pub struct PipelineContext {
    pub config: HeatmapConfig,
    pub reference: CountryReference,
}

/// Everything computed before any output is written
#[derive(Debug, Clone)]
pub struct Prepared {
    pub projects: NormalizedProjects,
    pub aggregation: Aggregation,
    pub figure: Figure,
}

/// What a run did, for logging
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub loaded_rows: usize,
    pub kept_rows: usize,
    pub unmapped: Vec<String>,
    /// Countries with at least one project
    pub countries: usize,
    pub per_tier: BTreeMap<PriorityTier, usize>,
    pub global_max: u64,
    pub html_path: PathBuf,
    pub png_path: PathBuf,
}

impl PipelineContext {
    pub fn new(config: HeatmapConfig, reference: CountryReference) -> Self {
        Self { config, reference }
    }

    /// Load the reference table named in the configuration
    pub fn load(config: HeatmapConfig) -> Result<Self> {
        let reader = CsvFileReader::new(&config.countries_path);
        let reference = CountryReference::load(&reader, &config.reference_columns)?;
        Ok(Self::new(config, reference))
    }

    pub fn normalize(&self, roster: &dyn Reader) -> Result<NormalizedProjects> {
        NormalizedProjects::load(roster, &self.reference, &self.config.project_columns)
    }

    pub fn aggregate(&self, projects: &NormalizedProjects) -> Result<Aggregation> {
        aggregate(projects, &self.reference)
    }

    pub fn figure(&self, aggregation: &Aggregation) -> Result<Figure> {
        Figure::build(aggregation, &self.config)
    }

    /// Run every stage that has no side effects
    pub fn prepare(&self, roster: &dyn Reader) -> Result<Prepared> {
        let projects = self.normalize(roster)?;
        let aggregation = self.aggregate(&projects)?;
        let figure = self.figure(&aggregation)?;
        Ok(Prepared {
            projects,
            aggregation,
            figure,
        })
    }

    /// Write and show the HTML page, then export the PNG
    pub fn render(&self, figure: &Figure) -> Result<()> {
        let html = figure.render(&HtmlWriter::new())?;
        display(&html, &self.config.html_path, self.config.auto_open)?;

        let png = figure.render(&KaleidoExporter::new(&self.config.kaleido_path))?;
        fs::write(&self.config.png_path, png).map_err(|e| {
            HeatmapError::ExportError(format!(
                "Failed to write '{}': {}",
                self.config.png_path.display(),
                e
            ))
        })?;
        info!(path = %self.config.png_path.display(), "Wrote PNG");
        Ok(())
    }

    pub fn summarize(&self, prepared: &Prepared) -> RunSummary {
        let per_tier = PriorityTier::ALL
            .iter()
            .map(|tier| (*tier, prepared.aggregation.tier(*tier).count()))
            .collect();
        RunSummary {
            loaded_rows: prepared.projects.loaded_rows(),
            kept_rows: prepared.projects.len(),
            unmapped: prepared.projects.unmapped().iter().cloned().collect(),
            countries: prepared.aggregation.len(),
            per_tier,
            global_max: prepared.aggregation.global_max,
            html_path: self.config.html_path.clone(),
            png_path: self.config.png_path.clone(),
        }
    }
}

/// Run the whole pipeline with the files named in `config`
pub fn run(config: &HeatmapConfig) -> Result<RunSummary> {
    let context = PipelineContext::load(config.clone())?;
    let roster = CsvFileReader::new(&config.projects_path);
    let prepared = context.prepare(&roster)?;
    context.render(&prepared.figure)?;
    Ok(context.summarize(&prepared))
}
