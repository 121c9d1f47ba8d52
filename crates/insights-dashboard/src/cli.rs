#![forbid(unsafe_code)]

//! Command-line argument parsing for the insights dashboard.
//!
//! Parses args manually and supports environment variable overrides via the
//! `RETAIL_INSIGHTS_*` prefix. Explicit flags win over the environment.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prefix of every environment override.
pub const ENV_PREFIX: &str = "RETAIL_INSIGHTS_";

const HELP_TEXT: &str = "\
Retail Insights Dashboard

USAGE:
    retail-insights [OPTIONS]

OPTIONS:
    --screen-mode=MODE         Screen mode: 'alt' (default) or 'inline'
    --ui-height=N              UI height in rows for inline mode (default: 24)
    --screen=N                 Start on screen N, 1-indexed (default: 1)
    --no-mouse                 Disable mouse event capture
    --exit-after-ms=N          Auto-quit after N milliseconds (0 = never)
    --catalog=PATH             Load catalogs from a JSON file
    --dump-catalog             Print the active catalogs as JSON and exit
    --insight-interval-ms=N    Insight card rotation interval (default: 5000)
    --metric-interval-ms=N     Performance metric rotation interval (default: 3000)
    --log-file=PATH            Write tracing output to PATH
    --help, -h                 Show this help message
    --version, -V              Show version

SCREENS:
    1  AI Insights            Model observatory and generated business insights
    2  Visualization Hub      Interactive charts and pattern discovery
    3  Predictive Analytics   Forecasts, engine metrics and recommendations

KEYBINDINGS:
    1-3             Switch screens by number
    Tab / Shift-Tab Cycle through screens
    ?               Toggle help overlay
    Ctrl+T          Cycle color theme
    q / Ctrl+C      Quit

ENVIRONMENT VARIABLES:
    RETAIL_INSIGHTS_SCREEN_MODE     Override --screen-mode (alt|inline)
    RETAIL_INSIGHTS_UI_HEIGHT       Override --ui-height
    RETAIL_INSIGHTS_SCREEN          Override --screen
    RETAIL_INSIGHTS_EXIT_AFTER_MS   Override --exit-after-ms
    RETAIL_INSIGHTS_CATALOG         Override --catalog
    RETAIL_INSIGHTS_LOG_FILE        Override --log-file
    RETAIL_INSIGHTS_LOG             Tracing filter directive (default: info)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Screen mode: "alt" or "inline".
    pub screen_mode: String,
    /// UI height for inline mode.
    pub ui_height: u16,
    /// Starting screen (1-indexed).
    pub start_screen: u16,
    /// Whether mouse events are enabled.
    pub mouse: bool,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
    /// Catalog file replacing the built-in data.
    pub catalog: Option<PathBuf>,
    /// Print catalogs and exit instead of starting the UI.
    pub dump_catalog: bool,
    pub insight_interval_ms: u64,
    pub metric_interval_ms: u64,
    /// Tracing output file. No subscriber is installed without one.
    pub log_file: Option<PathBuf>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            screen_mode: "alt".into(),
            ui_height: 24,
            start_screen: 1,
            mouse: true,
            exit_after_ms: 0,
            catalog: None,
            dump_catalog: false,
            insight_interval_ms: 5_000,
            metric_interval_ms: 3_000,
            log_file: None,
        }
    }
}

/// What the parsed command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

/// A command-line argument that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    message: String,
}

impl CliError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

fn parse_value<T: std::str::FromStr>(flag: &str, val: &str) -> Result<T, CliError> {
    val.parse()
        .map_err(|_| CliError::new(format!("Invalid {flag} value: {val}")))
}

fn parse_interval(flag: &str, val: &str) -> Result<u64, CliError> {
    match parse_value::<u64>(flag, val)? {
        0 => Err(CliError::new(format!("{flag} must be greater than zero"))),
        n => Ok(n),
    }
}

impl Opts {
    /// Parse the process arguments and environment.
    ///
    /// Prints help or version and exits when asked to; prints the error and
    /// exits with status 1 on a bad argument.
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        match Self::from_args(&args, |key| env::var(key).ok()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("retail-insights {VERSION}");
                process::exit(0);
            }
            Err(err) => {
                eprintln!("{err}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse `args` with environment lookups through `env_var`.
    ///
    /// Environment values take precedence over defaults but are overridden
    /// by explicit flags. Unparseable environment values are ignored.
    pub fn from_args<S, F>(args: &[S], env_var: F) -> Result<Command, CliError>
    where
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();
        let var = |name: &str| env_var(&format!("{ENV_PREFIX}{name}"));

        if let Some(val) = var("SCREEN_MODE") {
            opts.screen_mode = val;
        }
        if let Some(val) = var("UI_HEIGHT")
            && let Ok(n) = val.parse()
        {
            opts.ui_height = n;
        }
        if let Some(val) = var("SCREEN")
            && let Ok(n) = val.parse()
        {
            opts.start_screen = n;
        }
        if let Some(val) = var("EXIT_AFTER_MS")
            && let Ok(n) = val.parse()
        {
            opts.exit_after_ms = n;
        }
        if let Some(val) = var("CATALOG")
            && !val.is_empty()
        {
            opts.catalog = Some(PathBuf::from(val));
        }
        if let Some(val) = var("LOG_FILE")
            && !val.is_empty()
        {
            opts.log_file = Some(PathBuf::from(val));
        }

        for arg in args {
            match arg.as_ref() {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                "--no-mouse" => opts.mouse = false,
                "--dump-catalog" => opts.dump_catalog = true,
                other => {
                    if let Some(val) = other.strip_prefix("--screen-mode=") {
                        opts.screen_mode = val.to_string();
                    } else if let Some(val) = other.strip_prefix("--ui-height=") {
                        opts.ui_height = parse_value("--ui-height", val)?;
                    } else if let Some(val) = other.strip_prefix("--screen=") {
                        opts.start_screen = parse_value("--screen", val)?;
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = parse_value("--exit-after-ms", val)?;
                    } else if let Some(val) = other.strip_prefix("--catalog=") {
                        opts.catalog = Some(PathBuf::from(val));
                    } else if let Some(val) = other.strip_prefix("--insight-interval-ms=") {
                        opts.insight_interval_ms = parse_interval("--insight-interval-ms", val)?;
                    } else if let Some(val) = other.strip_prefix("--metric-interval-ms=") {
                        opts.metric_interval_ms = parse_interval("--metric-interval-ms", val)?;
                    } else if let Some(val) = other.strip_prefix("--log-file=") {
                        opts.log_file = Some(PathBuf::from(val));
                    } else {
                        return Err(CliError::new(format!("Unknown argument: {other}")));
                    }
                }
            }
        }

        Ok(Command::Run(opts))
    }
}
