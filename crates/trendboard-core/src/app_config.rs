use std::path::PathBuf;
use std::str::FromStr;

/// Which maximum `LaunchDate` the default recency window is measured from
/// when no year is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowAnchor {
    /// Latest date of the location/category-scoped records.
    #[default]
    Filtered,
    /// Latest date of the whole dataset.
    Global,
}

impl std::fmt::Display for WindowAnchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowAnchor::Filtered => write!(f, "filtered"),
            WindowAnchor::Global => write!(f, "global"),
        }
    }
}

impl FromStr for WindowAnchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "filtered" => Ok(WindowAnchor::Filtered),
            "global" => Ok(WindowAnchor::Global),
            other => Err(format!(
                "unknown window anchor '{other}'; expected 'filtered' or 'global'"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown output format '{other}'; expected 'text' or 'json'"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dataset_path: PathBuf,
    pub log_level: String,
    pub csv_delimiter: u8,
    pub recent_window_days: u32,
    pub window_anchor: WindowAnchor,
    pub output_format: OutputFormat,
}
