use crate::document_model::encoding::{self, LineEnding};
use crate::document_model::gap_buffer::DEFAULT_GAP_SLACK;
use crate::document_model::kill_ring::DEFAULT_KILL_RING_MAX;
use encoding_rs::Encoding;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const RC_FILE_NAME: &str = ".gapeditrc";

#[derive(Debug, Clone)]
pub struct RcConfig {
    pub tab_width: usize,
    pub kill_ring_max: usize,
    pub gap_slack: usize,
    pub encodings: Vec<&'static Encoding>,
    pub line_ending: LineEnding,
}

impl Default for RcConfig {
    fn default() -> Self {
        Self {
            tab_width: 8,
            kill_ring_max: DEFAULT_KILL_RING_MAX,
            gap_slack: DEFAULT_GAP_SLACK,
            encodings: encoding::default_encodings(),
            line_ending: LineEnding::Unix,
        }
    }
}

pub struct RcLoader;

impl RcLoader {
    /// Looks for .gapeditrc in:
    /// 1. Current directory
    /// 2. Home directory (~/.gapeditrc)
    pub fn get_rc_path() -> Option<PathBuf> {
        let current_rc = Path::new(RC_FILE_NAME);
        if current_rc.exists() {
            return Some(current_rc.to_path_buf());
        }

        if let Ok(home) = env::var("HOME") {
            let home_rc = Path::new(&home).join(RC_FILE_NAME);
            if home_rc.exists() {
                return Some(home_rc);
            }
        }

        None
    }

    /// Defaults, overlaid with the rc file if there is one.
    pub fn load_config() -> RcConfig {
        match Self::get_rc_path() {
            Some(rc_path) => Self::load_from(&rc_path),
            None => RcConfig::default(),
        }
    }

    /// An unreadable file yields the defaults.
    pub fn load_from(rc_path: &Path) -> RcConfig {
        let mut config = RcConfig::default();
        match fs::read_to_string(rc_path) {
            Ok(content) => {
                debug!(path = %rc_path.display(), "reading configuration");
                Self::parse_config_content(&content, &mut config);
            }
            Err(err) => {
                warn!(path = %rc_path.display(), error = %err, "could not read configuration");
            }
        }
        config
    }

    pub fn parse_config_content(content: &str, config: &mut RcConfig) {
        for line in content.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') || line.starts_with('"') {
                continue;
            }

            Self::parse_config_line(line, config);
        }
    }

    fn parse_config_line(line: &str, config: &mut RcConfig) {
        let line = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        }
        .trim();

        let setting = line.strip_prefix("set ").unwrap_or(line).trim();
        let Some((key, value)) = setting.split_once('=') else {
            warn!(line, "ignoring configuration line without a value");
            return;
        };
        let (key, value) = (key.trim(), value.trim());

        match key {
            "tabstop" | "tab_width" => {
                if let Some(tab_width) = Self::parse_in_range(value, 1, 16) {
                    config.tab_width = tab_width;
                } else {
                    warn!(key, value, "tab width must be between 1 and 16");
                }
            }
            "kill_ring_max" => {
                if let Some(max) = Self::parse_in_range(value, 1, 1000) {
                    config.kill_ring_max = max;
                } else {
                    warn!(key, value, "kill ring size must be between 1 and 1000");
                }
            }
            "gap_slack" => {
                if let Some(slack) = Self::parse_in_range(value, 16, 1 << 20) {
                    config.gap_slack = slack;
                } else {
                    warn!(key, value, "gap slack must be between 16 and 1048576");
                }
            }
            "encodings" => {
                let labels: Vec<&str> = value.split(',').collect();
                match encoding::encodings_for_labels(&labels) {
                    Ok(encodings) => config.encodings = encodings,
                    Err(err) => warn!(key, value, error = %err, "ignoring encoding list"),
                }
            }
            "fileformat" | "line_ending" => match LineEnding::from_name(value) {
                Some(line_ending) => config.line_ending = line_ending,
                None => warn!(key, value, "unknown file format"),
            },
            _ => warn!(key, "unknown setting"),
        }
    }

    fn parse_in_range(value: &str, min: usize, max: usize) -> Option<usize> {
        value
            .parse::<usize>()
            .ok()
            .filter(|n| (min..=max).contains(n))
    }

    pub fn generate_sample_rc() -> String {
        r#"# gapedit configuration file (.gapeditrc)
# Lines starting with # or " are comments

# Display width of a tab
set tabstop=8

# Number of kills remembered for yanking
kill_ring_max=30

# Extra bytes reserved whenever the edit gap grows
gap_slack=256

# Encodings tried in order when opening a file
encodings=utf-8,euc-jp,shift_jis

# Line ending for new files: unix, dos, or mac
fileformat=unix
"#
        .to_string()
    }
}
