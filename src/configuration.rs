use base64_transfer::{Options, Variant};
use log::LevelFilter;
use std::{env, fmt, str::FromStr};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Mode {
    Encode,
    Decode,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "encode" | "-e" => Ok(Self::Encode),
            "decode" | "-d" => Ok(Self::Decode),
            _ => Err(format!("Unknown mode {}", value)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode => write!(f, "encode"),
            Self::Decode => write!(f, "decode"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Configuration {
    mode: Mode,
    options: Options,
    chunk_size: usize,
    log_level: LevelFilter,
}

fn var(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: Option<String>) -> Result<String, String> {
    match lookup(key) {
        Some(value) => Ok(value),
        None => default.ok_or(format!("Missing {}", key)),
    }
}

fn var_map<T, E: fmt::Display>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    mut f: impl FnMut(&str) -> Result<T, E>,
    default: Option<T>,
) -> Result<T, String> {
    match var(lookup, key, None) {
        Ok(value) => f(&value).map_err(|error| format!("Invalid {} {}: {}", key, value, error)),
        Err(err) => default.ok_or(err),
    }
}

fn flag(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err("expected a boolean".to_string()),
    }
}

impl Configuration {
    pub fn new() -> Result<Self, String> {
        Self::from_sources(env::args().nth(1), |key| env::var(key).ok())
    }

    pub fn from_sources(mode: Option<String>, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mode = mode.ok_or("Missing mode")?.parse::<Mode>()?;
        let defaults = Options::new();
        let variant = var_map(&lookup, "BASE64_VARIANT", Variant::from_str, Some(defaults.variant()))?;
        let line_wrap = var_map(&lookup, "BASE64_LINE_WRAP", flag, Some(defaults.line_wrap()))?;
        let compress = var_map(&lookup, "BASE64_COMPRESS", flag, Some(defaults.compress()))?;
        let gunzip = var_map(&lookup, "BASE64_GUNZIP", flag, Some(defaults.gunzip()))?;
        let lenient = var_map(&lookup, "BASE64_LENIENT", flag, Some(defaults.lenient()))?;
        let chunk_size = var_map(&lookup, "BASE64_CHUNK_SIZE", |size| size.parse::<usize>(), Some(8192))?;
        if chunk_size == 0 {
            return Err("Invalid BASE64_CHUNK_SIZE 0: must be positive".to_string());
        }
        let log_level = var_map(&lookup, "LOG_LEVEL", LevelFilter::from_str, Some(LevelFilter::Warn))?;
        let options = defaults
            .with_variant(variant)
            .with_line_wrap(line_wrap)
            .with_compress(compress)
            .with_gunzip(gunzip)
            .with_lenient(lenient);
        Ok(Self {
            mode,
            options,
            chunk_size,
            log_level,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn options(&self) -> Options {
        self.options
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }
}
