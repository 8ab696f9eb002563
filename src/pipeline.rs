use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info, info_span, warn};

use crate::app::ports::PageFetcher;
use crate::assemble::Candidate;
use crate::config::Config;
use crate::error::Result;
use crate::extract::{fixtures, results, Extraction, Extractor, Tier};
use crate::output::write_json;
use crate::types::ListingKind;

/// What one listing pipeline wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Written {
    pub records: usize,
    pub skipped: usize,
    pub tier: Tier,
    pub path: PathBuf,
}

#[derive(Debug)]
pub struct PipelineOutcome {
    pub kind: ListingKind,
    pub result: Result<Written>,
}

/// Outcomes of every pipeline that was requested, in run order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<PipelineOutcome>,
}

impl RunSummary {
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    /// 0 when every requested pipeline succeeded, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.failures() == 0 {
            0
        } else {
            1
        }
    }
}

/// Runs the fixtures pipeline, then the results pipeline, for whichever URLs are configured.
///
/// A failure in one pipeline is recorded and does not stop the other.
pub fn run(config: &Config, fetcher: &dyn PageFetcher) -> RunSummary {
    let mut summary = RunSummary::default();
    if !config.has_work() {
        info!("No listing URLs configured");
        println!("Nothing to do: no FA URLs provided.");
        return summary;
    }

    if let Some(url) = config.fixtures_url.as_deref() {
        let outcome = run_listing(&fixtures::extractor(), url, &config.fixtures_path, fetcher);
        summary.outcomes.push(report(ListingKind::Fixtures, outcome));
    }

    if let Some(url) = config.results_url.as_deref() {
        let outcome = run_listing(&results::extractor(), url, &config.results_path, fetcher);
        summary.outcomes.push(report(ListingKind::Results, outcome));
    }

    summary
}

/// Extracts records from HTML already in hand and renders them as the artifact's JSON.
pub fn render(kind: ListingKind, html: &str) -> Result<String> {
    match kind {
        ListingKind::Fixtures => render_with(&fixtures::extractor(), html),
        ListingKind::Results => render_with(&results::extractor(), html),
    }
}

fn render_with<C>(extractor: &Extractor<C>, html: &str) -> Result<String>
where
    C: Candidate,
    C::Record: Serialize,
{
    let extraction = extractor.extract(html);
    Ok(serde_json::to_string_pretty(&extraction.records)?)
}

fn run_listing<C>(
    extractor: &Extractor<C>,
    url: &str,
    path: &Path,
    fetcher: &dyn PageFetcher,
) -> Result<Written>
where
    C: Candidate,
    C::Record: Serialize,
{
    let kind = extractor.kind();
    let span = info_span!("pipeline", kind = %kind);
    let _enter = span.enter();

    info!(url, "Fetching listing page");
    let html = fetcher.fetch(url)?;

    let Extraction {
        records,
        tier,
        skipped,
    } = extractor.extract(&html);
    if skipped > 0 {
        warn!(skipped, "Some rows or cards were not recognized");
    }

    write_json(path, &records)?;
    Ok(Written {
        records: records.len(),
        skipped,
        tier,
        path: path.to_path_buf(),
    })
}

fn report(kind: ListingKind, result: Result<Written>) -> PipelineOutcome {
    match &result {
        Ok(written) => {
            info!(kind = %kind, records = written.records, tier = ?written.tier, path = %written.path.display(), "Wrote artifact");
            println!("Wrote {} {} -> {}", written.records, kind, written.path.display());
        }
        Err(e) => {
            error!(kind = %kind, error = %e, "Pipeline failed");
        }
    }
    PipelineOutcome { kind, result }
}
