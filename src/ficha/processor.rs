//! File processing API for the ficha notation.
//!
//! This module provides the stage/format processing used by the CLI: pick a
//! stage (what data to extract) and a format (how to print it), as in
//! `token-simple`, `match-json`, or `standings-simple`.
//!
//! # Sample Sources
//!
//! The `ficha_sources` module provides access to the verified sample sheets
//! under `docs/specs/v1/samples/`. The samples are the canonical sources for
//! ficha content; tests read them from there instead of copying sheets
//! around.

use crate::ficha::formats;
use crate::ficha::league;
use crate::ficha::lexer::{lex_line, Token};
use crate::ficha::registry::Registry;
use crate::ficha::stream::{ingest, LineError};
use std::fmt;
use std::fs;
use std::path::Path;

/// What data to extract from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Match,
    Standings,
    Scorers,
}

/// How to print the extracted data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
}

/// A complete processing specification, parsed from strings like
/// `match-json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple" or "standings-json".
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let Some((stage, format)) = format_str.split_once('-') else {
            return Err(ProcessingError::InvalidFormat(format_str.to_string()));
        };
        let stage = match stage {
            "token" => ProcessingStage::Token,
            "match" => ProcessingStage::Match,
            "standings" => ProcessingStage::Standings,
            "scorers" => ProcessingStage::Scorers,
            _ => return Err(ProcessingError::InvalidStage(stage.to_string())),
        };
        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            _ => return Err(ProcessingError::InvalidFormatType(format.to_string())),
        };
        Ok(ProcessingSpec { stage, format })
    }

    /// All available processing specifications.
    pub fn available_specs() -> Vec<ProcessingSpec> {
        const STAGES: [ProcessingStage; 4] = [
            ProcessingStage::Token,
            ProcessingStage::Match,
            ProcessingStage::Standings,
            ProcessingStage::Scorers,
        ];
        const FORMATS: [OutputFormat; 2] = [OutputFormat::Simple, OutputFormat::Json];
        let mut specs = Vec::new();
        for stage in STAGES {
            for format in FORMATS {
                specs.push(ProcessingSpec { stage, format });
            }
        }
        specs
    }
}

impl fmt::Display for ProcessingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self.stage {
            ProcessingStage::Token => "token",
            ProcessingStage::Match => "match",
            ProcessingStage::Standings => "standings",
            ProcessingStage::Scorers => "scorers",
        };
        let format = match self.format {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
        };
        write!(f, "{}-{}", stage, format)
    }
}

/// Errors that can occur during processing.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingError {
    FileNotFound(String),
    InvalidFormat(String),
    InvalidStage(String),
    InvalidFormatType(String),
    Ingest(LineError),
    IoError(String),
}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingError::FileNotFound(path) => write!(f, "File not found: {}", path),
            ProcessingError::InvalidFormat(format) => write!(f, "Invalid format: {}", format),
            ProcessingError::InvalidStage(stage) => write!(f, "Invalid stage: {}", stage),
            ProcessingError::InvalidFormatType(format_type) => {
                write!(f, "Invalid format type: {}", format_type)
            }
            ProcessingError::Ingest(error) => write!(f, "Ingest failed: {}", error),
            ProcessingError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for ProcessingError {}

/// Process a source string according to the given specification.
pub fn process_source(
    source: &str,
    registry: &Registry,
    spec: &ProcessingSpec,
) -> Result<String, ProcessingError> {
    match spec.stage {
        ProcessingStage::Token => {
            let lines = tokenize_source(source)?;
            format_token_lines(&lines, spec.format)
        }
        ProcessingStage::Match => {
            let matches = ingest(source, registry)
                .into_result()
                .map_err(ProcessingError::Ingest)?;
            match spec.format {
                OutputFormat::Simple => Ok(formats::render_matches(&matches)),
                OutputFormat::Json => to_json(&matches),
            }
        }
        ProcessingStage::Standings => {
            let matches = ingest(source, registry)
                .into_result()
                .map_err(ProcessingError::Ingest)?;
            let table = league::standings(&matches, registry);
            match spec.format {
                OutputFormat::Simple => Ok(formats::render_standings(&table)),
                OutputFormat::Json => to_json(&table),
            }
        }
        ProcessingStage::Scorers => {
            let matches = ingest(source, registry)
                .into_result()
                .map_err(ProcessingError::Ingest)?;
            let table = league::scorers(&matches, registry);
            match spec.format {
                OutputFormat::Simple => Ok(formats::render_scorers(&table)),
                OutputFormat::Json => to_json(&table),
            }
        }
    }
}

/// Process a ficha file according to the given specification.
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    registry: &Registry,
    spec: &ProcessingSpec,
) -> Result<String, ProcessingError> {
    let content = fs::read_to_string(file_path.as_ref())
        .map_err(|e| ProcessingError::IoError(e.to_string()))?;
    process_source(&content, registry, spec)
}

/// All available format strings.
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .into_iter()
        .map(|spec| spec.to_string())
        .collect()
}

fn tokenize_source(source: &str) -> Result<Vec<Vec<Token>>, ProcessingError> {
    let mut lines = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let tokens = lex_line(line, idx + 1)
            .map_err(|e| ProcessingError::Ingest(LineError::Lex(e)))?;
        if !tokens.is_empty() {
            lines.push(tokens);
        }
    }
    Ok(lines)
}

fn format_token_lines(
    lines: &[Vec<Token>],
    format: OutputFormat,
) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple => {
            let mut result = String::new();
            for tokens in lines {
                for token in tokens {
                    result.push_str(&token.to_string());
                }
                result.push('\n');
            }
            Ok(result)
        }
        OutputFormat::Json => to_json(lines),
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, ProcessingError> {
    serde_json::to_string_pretty(value).map_err(|e| ProcessingError::IoError(e.to_string()))
}

/// Sample sources module for accessing the verified sample sheets.
pub mod ficha_sources {
    use super::*;

    /// The current specification version.
    pub const SPEC_VERSION: &str = "v1";

    /// Available sample sheets (canonical sources).
    pub const AVAILABLE_SAMPLES: &[&str] = &[
        "010-single-match.ficha",
        "020-two-matches.ficha",
        "030-comments-and-blanks.ficha",
        "040-events-heavy.ficha",
    ];

    /// The team file the samples are written against.
    pub const TEAM_FILE: &str = "teams.json";

    /// Main interface for accessing the sample sheets.
    pub struct FichaSources;

    impl FichaSources {
        fn samples_dir() -> String {
            format!("docs/specs/{}/samples", SPEC_VERSION)
        }

        fn sample_path(filename: &str) -> String {
            format!("{}/{}", Self::samples_dir(), filename)
        }

        fn validate_sample(filename: &str) -> Result<(), ProcessingError> {
            if !AVAILABLE_SAMPLES.contains(&filename) {
                return Err(ProcessingError::FileNotFound(format!(
                    "Sample '{}' is not available. Available samples: {:?}",
                    filename, AVAILABLE_SAMPLES
                )));
            }
            Ok(())
        }

        /// Get sample sheet content as a raw string.
        pub fn get_string(filename: &str) -> Result<String, ProcessingError> {
            Self::validate_sample(filename)?;
            let path = Self::sample_path(filename);
            fs::read_to_string(&path)
                .map_err(|e| ProcessingError::IoError(format!("Failed to read {}: {}", path, e)))
        }

        /// Load the registry the samples are written against.
        pub fn team_registry() -> Result<Registry, ProcessingError> {
            let path = Self::sample_path(TEAM_FILE);
            let text = fs::read_to_string(&path)
                .map_err(|e| ProcessingError::IoError(format!("Failed to read {}: {}", path, e)))?;
            Registry::from_json(&text).map_err(|e| ProcessingError::IoError(e.to_string()))
        }

        /// List all available sample sheets.
        pub fn list_samples() -> Vec<&'static str> {
            AVAILABLE_SAMPLES.to_vec()
        }
    }

}
