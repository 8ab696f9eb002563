//! Environment variable names and defaults shared by the CLI and configuration layer.

// Environment variables
pub const FIXTURES_URL_ENV: &str = "FA_FIXTURES_URL";
pub const RESULTS_URL_ENV: &str = "FA_RESULTS_URL";
pub const FIXTURES_PATH_ENV: &str = "FA_FIXTURES_PATH";
pub const RESULTS_PATH_ENV: &str = "FA_RESULTS_PATH";
pub const TIMEOUT_SECS_ENV: &str = "FA_TIMEOUT_SECS";
pub const CONFIG_PATH_ENV: &str = "FA_CONFIG";

// Output artifacts
pub const DEFAULT_FIXTURES_PATH: &str = "fixtures.json";
pub const DEFAULT_RESULTS_PATH: &str = "results.json";

// Network
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_USER_AGENT: &str = concat!("fulltime_scraper/", env!("CARGO_PKG_VERSION"));

// Logging
pub const DEFAULT_LOG_FILTER: &str = "fulltime_scraper=info";
pub const LOG_FILE_NAME: &str = "scraper.log";

// Markup
pub const TABLE_ROW_SELECTOR: &str = "table tr";
pub const TABLE_CELL_SELECTOR: &str = "td";
pub const FIXTURE_CARD_SELECTOR: &str = r#"[class*="fixture"], [class*="match"]"#;
pub const RESULT_CARD_SELECTOR: &str = r#"[class*="result"], [class*="match"]"#;
pub const MIN_FIXTURE_CELLS: usize = 5;
pub const MIN_RESULT_CELLS: usize = 6;
