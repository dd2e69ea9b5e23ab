//! Configuration loading and management.
//!
//! Provides types for the TOML-based configuration file controlling which
//! checks are skipped or marked not applicable and how the report is built.
//!
//! # Configuration file
//!
//! The default configuration file is `bench-summarizer.toml` in the current
//! working directory. Use [`Config::load`] to read it:
//!
//! ```rust,no_run
//! use bench_summarizer::config::Config;
//!
//! let config = Config::load(None).expect("failed to load config");
//! assert!(!config.is_skipped("1.1.1"));
//! ```
//!
//! # File format
//!
//! ```toml
//! [skip]
//! checks = ["1.1.1", "2.1"]      # forced to state S
//!
//! [not_applicable]
//! checks = ["1.2.1"]             # forced to state N
//!
//! [report]
//! failures_only = true           # keep only failing checks in the tree
//! ```

use std::path::Path;
use std::sync::LazyLock;

/// Main configuration for the summarizer.
///
/// Loaded from a TOML file (typically `bench-summarizer.toml`). All fields
/// carry sensible defaults so the config file can be omitted entirely.
///
/// # Examples
///
/// ```rust,no_run
/// use bench_summarizer::config::Config;
///
/// // Load from the default location or fall back to built-in defaults.
/// let config = Config::load(None).unwrap();
/// ```
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Config {
    /// Checks forced to state S regardless of what any node reported.
    pub skip: SkipConfig,
    /// Checks forced to state N (not applicable to this environment).
    pub not_applicable: NotApplicableConfig,
    /// Report shaping options.
    pub report: ReportConfig,
}

/// Check ids to skip.
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct SkipConfig {
    /// Benchmark check ids (e.g., `"1.1.1"`).
    pub checks: Vec<String>,
}

/// Check ids that do not apply to the scanned environment.
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct NotApplicableConfig {
    /// Benchmark check ids (e.g., `"1.2.1"`).
    pub checks: Vec<String>,
}

/// Report shaping options.
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Keep only FAIL and MIXED checks in the results tree. Totals still
    /// describe the full scan.
    pub failures_only: bool,
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// Resolution order:
    /// 1. If `path` is `Some`, load from that file (error if missing).
    /// 2. If `path` is `None`, try `bench-summarizer.toml` in the current directory.
    /// 3. If that file does not exist either, return [`Config::default()`].
    ///
    /// Loaded check ids are validated via [`Config::validate`].
    ///
    /// # Errors
    ///
    /// Returns `Err(String)` when:
    /// - The explicit path does not exist.
    /// - The file cannot be read from disk.
    /// - The TOML content fails to parse.
    /// - A configured check id is not a dotted number like `1.1.1`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use std::path::Path;
    /// use bench_summarizer::config::Config;
    ///
    /// // Explicit path
    /// let cfg = Config::load(Some(Path::new("my-config.toml")))?;
    ///
    /// // Auto-detect or default
    /// let cfg = Config::load(None)?;
    /// # Ok::<(), String>(())
    /// ```
    pub fn load(path: Option<&Path>) -> Result<Config, String> {
        let config_path = if let Some(p) = path {
            if p.exists() {
                Some(p.to_path_buf())
            } else {
                return Err(format!("Config file not found: {}", p.display()));
            }
        } else {
            let default_path = Path::new("bench-summarizer.toml");
            if default_path.exists() {
                Some(default_path.to_path_buf())
            } else {
                None
            }
        };

        match config_path {
            Some(path) => {
                let content = std::fs::read_to_string(&path)
                    .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
                let config: Config = toml::from_str(&content)
                    .map_err(|e| format!("Failed to parse config {}: {}", path.display(), e))?;
                config.validate()?;
                Ok(config)
            }
            None => Ok(Config::default()),
        }
    }

    /// Validates every configured check id.
    ///
    /// Ids must be dotted numbers (`4`, `1.2`, `1.1.12`). Called by
    /// [`Config::load`]; call it again after merging ids from the command
    /// line.
    ///
    /// # Errors
    ///
    /// Returns `Err(String)` naming the first invalid id.
    pub fn validate(&self) -> Result<(), String> {
        for id in self.skip.checks.iter().chain(&self.not_applicable.checks) {
            if !is_valid_check_id(id) {
                return Err(format!(
                    "Invalid check id {id:?}: expected a dotted number like 1.1.1"
                ));
            }
        }
        Ok(())
    }

    /// Returns `true` if the check id is configured to be skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use bench_summarizer::config::Config;
    ///
    /// let mut config = Config::default();
    /// config.skip.checks.push("1.1.1".to_string());
    /// assert!(config.is_skipped("1.1.1"));
    /// assert!(!config.is_skipped("1.1.2"));
    /// ```
    pub fn is_skipped(&self, check_id: &str) -> bool {
        self.skip.checks.iter().any(|id| id == check_id)
    }

    /// Returns `true` if the check id is configured as not applicable.
    pub fn is_not_applicable(&self, check_id: &str) -> bool {
        self.not_applicable.checks.iter().any(|id| id == check_id)
    }
}

/// Returns `true` for dotted-number benchmark ids (`1`, `1.2`, `1.1.12`).
fn is_valid_check_id(id: &str) -> bool {
    static RE_CHECK_ID: LazyLock<regex::Regex> =
        LazyLock::new(|| regex::Regex::new(r"^[0-9]+(\.[0-9]+)*$").unwrap());
    RE_CHECK_ID.is_match(id)
}
