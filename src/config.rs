//! Plugin parameters.
//!
//! protoc forwards everything after the colon in `--template_out=<params>:<dir>`
//! as one string of comma separated `key=value` pairs. [`Configuration::parse`]
//! turns it into a typed [`Configuration`] and reports anything it could not
//! use as [`ConfigWarning`]s. Parsing never fails.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Default directory searched for `*.tmpl` files.
pub const DEFAULT_TEMPLATE_DIR: &str = "./templates";

/// Default prefix for every generated file name.
pub const DEFAULT_DESTINATION_DIR: &str = ".";

/// Resolved generator options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    /// Directory containing the template pack
    pub template_dir: PathBuf,
    /// Prefix applied to every output file name
    pub destination_dir: String,
    /// Log discovered templates and emitted fragments
    pub debug: bool,
    /// Render once per file instead of once per service
    pub all: bool,
    /// Index every type in the request so templates can resolve cross-file references
    pub single_package_mode: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from(DEFAULT_TEMPLATE_DIR),
            destination_dir: DEFAULT_DESTINATION_DIR.to_string(),
            debug: false,
            all: false,
            single_package_mode: false,
        }
    }
}

/// A parameter that was ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// Token without exactly one `=`
    Malformed(String),
    /// Well formed pair with a key we do not know
    UnknownKey(String),
    /// Boolean option with a value other than true/t/false/f
    InvalidBool { key: String, value: String },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::Malformed(param) => write!(f, "invalid parameter: {param:?}"),
            ConfigWarning::UnknownKey(param) => write!(f, "unknown parameter: {param:?}"),
            ConfigWarning::InvalidBool { key, value } => {
                write!(f, "invalid value for {key}: {value:?}")
            }
        }
    }
}

impl Configuration {
    /// Parse a protoc parameter string, starting from the defaults.
    ///
    /// Later occurrences of a key override earlier ones. Rejected tokens are
    /// returned as warnings and leave the configuration untouched.
    pub fn parse(parameter: &str) -> (Self, Vec<ConfigWarning>) {
        let mut config = Self::default();
        let mut warnings = Vec::new();

        for param in parameter.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let mut parts = param.split('=');
            let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
                warnings.push(ConfigWarning::Malformed(param.to_string()));
                continue;
            };

            let flag = match key {
                "template_dir" => {
                    config.template_dir = PathBuf::from(value);
                    continue;
                }
                "destination_dir" => {
                    config.destination_dir = value.to_string();
                    continue;
                }
                "debug" => &mut config.debug,
                "all" => &mut config.all,
                "single-package-mode" => &mut config.single_package_mode,
                _ => {
                    warnings.push(ConfigWarning::UnknownKey(param.to_string()));
                    continue;
                }
            };

            match parse_bool(value) {
                Some(b) => *flag = b,
                None => warnings.push(ConfigWarning::InvalidBool {
                    key: key.to_string(),
                    value: value.to_string(),
                }),
            }
        }

        (config, warnings)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "t" => Some(true),
        "false" | "f" => Some(false),
        _ => None,
    }
}
