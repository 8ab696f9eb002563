use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Result;
use fulltime_scraper::app::ports::PageFetcher;
use fulltime_scraper::config::Config;
use fulltime_scraper::error::{Result as ScrapeResult, ScraperError};
use fulltime_scraper::extract::Tier;
use fulltime_scraper::pipeline;
use fulltime_scraper::types::ListingKind;
use serde_json::{json, Value};
use tempfile::tempdir;

const FIXTURES_URL: &str = "https://fulltime.example.com/fixtures";
const RESULTS_URL: &str = "https://fulltime.example.com/results";

const FIXTURES_PAGE: &str = r#"
<html><body>
  <table class="fixtures-table">
    <thead><tr><th>Date</th><th>Type</th><th>Home</th><th>Away</th><th>Venue</th><th>KO</th></tr></thead>
    <tbody>
      <tr><td>Sun 14 Sep 2025</td><td>League</td><td>Team C</td><td>Team D</td><td>Ground 2</td><td>10:30</td></tr>
      <tr><td>2025-09-07</td><td>League</td><td>Team A</td><td>Team B</td><td>Ground 1</td><td>15:00</td></tr>
      <tr><td>TBC</td><td>Cup</td><td>Team E</td><td>Team F</td><td>Ground 3</td><td></td></tr>
      <tr><td colspan="3">Season break</td></tr>
    </tbody>
  </table>
</body></html>
"#;

const RESULTS_PAGE: &str = r#"
<html><body>
  <div class="match">Sat 06 Sep 2025 Team Z 5 - 5 Team Y</div>
  <table>
    <tr><td>07/09/2025</td><td>Cup</td><td>Team A</td><td>2 - 0</td><td>Team B</td><td>extra</td></tr>
    <tr><td>13/09/2025</td><td>League</td><td>Team C</td><td>1</td><td>Team D</td><td>3</td></tr>
  </table>
</body></html>
"#;

/// Serves canned pages; unknown URLs answer 404.
struct StubFetcher {
    pages: HashMap<&'static str, &'static str>,
}

impl StubFetcher {
    fn new(pages: &[(&'static str, &'static str)]) -> Self {
        Self {
            pages: pages.iter().copied().collect(),
        }
    }
}

impl PageFetcher for StubFetcher {
    fn fetch(&self, url: &str) -> ScrapeResult<String> {
        self.pages
            .get(url)
            .map(|page| page.to_string())
            .ok_or_else(|| ScraperError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

fn config_in(dir: &Path, fixtures_url: Option<&str>, results_url: Option<&str>) -> Config {
    Config {
        fixtures_url: fixtures_url.map(str::to_string),
        results_url: results_url.map(str::to_string),
        fixtures_path: dir.join("fixtures.json"),
        results_path: dir.join("results.json"),
        ..Config::default()
    }
}

fn read_json(path: &Path) -> Result<Value> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

#[test]
fn test_both_pipelines_write_artifacts_in_page_order() -> Result<()> {
    let dir = tempdir()?;
    let config = config_in(dir.path(), Some(FIXTURES_URL), Some(RESULTS_URL));
    let fetcher = StubFetcher::new(&[(FIXTURES_URL, FIXTURES_PAGE), (RESULTS_URL, RESULTS_PAGE)]);

    let summary = pipeline::run(&config, &fetcher);
    assert_eq!(summary.exit_code(), 0);
    assert_eq!(summary.outcomes.len(), 2);
    assert_eq!(summary.outcomes[0].kind, ListingKind::Fixtures);

    let fixtures = summary.outcomes[0].result.as_ref().unwrap();
    assert_eq!(fixtures.records, 2);
    assert_eq!(fixtures.skipped, 2);
    assert_eq!(fixtures.tier, Tier::TableRows);

    assert_eq!(
        read_json(&config.fixtures_path)?,
        json!([
            {"date": "2025-09-14", "matchType": "League", "home": "Team C", "away": "Team D", "venue": "Ground 2", "ko": "10:30"},
            {"date": "2025-09-07", "matchType": "League", "home": "Team A", "away": "Team B", "venue": "Ground 1", "ko": "15:00"}
        ])
    );

    // the card block is ignored because the table produced records
    assert_eq!(
        read_json(&config.results_path)?,
        json!([
            {"date": "2025-09-07", "matchType": "Cup", "home": "Team A", "away": "Team B", "hs": 2, "as": 0},
            {"date": "2025-09-13", "matchType": "League", "home": "Team C", "away": "Team D", "hs": 1, "as": 3}
        ])
    );
    Ok(())
}

#[test]
fn test_no_urls_is_a_successful_noop() -> Result<()> {
    let dir = tempdir()?;
    let config = config_in(dir.path(), None, None);
    let fetcher = StubFetcher::new(&[]);

    let summary = pipeline::run(&config, &fetcher);
    assert!(summary.outcomes.is_empty());
    assert_eq!(summary.exit_code(), 0);
    assert!(!config.fixtures_path.exists());
    assert!(!config.results_path.exists());
    Ok(())
}

#[test]
fn test_fetch_failure_is_isolated_to_its_pipeline() -> Result<()> {
    let dir = tempdir()?;
    let config = config_in(dir.path(), Some("https://fulltime.example.com/missing"), Some(RESULTS_URL));
    let fetcher = StubFetcher::new(&[(RESULTS_URL, RESULTS_PAGE)]);

    let summary = pipeline::run(&config, &fetcher);
    assert_eq!(summary.failures(), 1);
    assert_eq!(summary.exit_code(), 1);
    assert!(matches!(
        summary.outcomes[0].result,
        Err(ScraperError::Status { status: 404, .. })
    ));
    assert!(!config.fixtures_path.exists());
    assert_eq!(read_json(&config.results_path)?.as_array().map(Vec::len), Some(2));
    Ok(())
}

#[test]
fn test_unrecognizable_page_writes_empty_array() -> Result<()> {
    let dir = tempdir()?;
    let config = config_in(dir.path(), Some(FIXTURES_URL), None);
    let fetcher = StubFetcher::new(&[(FIXTURES_URL, "<html><body><p>Coming soon</p></body></html>")]);

    let summary = pipeline::run(&config, &fetcher);
    assert_eq!(summary.exit_code(), 0);
    let written = summary.outcomes[0].result.as_ref().unwrap();
    assert_eq!(written.tier, Tier::Empty);
    assert_eq!(read_json(&config.fixtures_path)?, json!([]));
    Ok(())
}

#[test]
fn test_rerun_overwrites_previous_artifact() -> Result<()> {
    let dir = tempdir()?;
    let config = config_in(dir.path(), None, Some(RESULTS_URL));
    fs::write(&config.results_path, "[{\"stale\": true}]")?;

    let fetcher = StubFetcher::new(&[(RESULTS_URL, RESULTS_PAGE)]);
    pipeline::run(&config, &fetcher);

    let value = read_json(&config.results_path)?;
    assert_eq!(value[0]["home"], "Team A");
    assert!(value[0].get("stale").is_none());
    Ok(())
}

#[test]
fn test_render_card_only_fixture_page() -> Result<()> {
    let html = r#"
        <div class="fixture">
          <span class="teams">Team A v Team B</span>
          <span>7 Sep 2025</span> <span>15:00</span> <span>Ground 2</span>
        </div>
    "#;
    let rendered: Value = serde_json::from_str(&pipeline::render(ListingKind::Fixtures, html)?)?;
    assert_eq!(
        rendered,
        json!([{"date": "2025-09-07", "matchType": "", "home": "Team A", "away": "Team B", "venue": "", "ko": "15:00"}])
    );
    Ok(())
}
