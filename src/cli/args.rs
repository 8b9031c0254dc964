//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::pipeline::{AnalysisOptions, LoadOptions, Method, SingleRulePolicy};

/// Roughcut - Rough-set analysis and reduction of decision tables
#[derive(Parser, Debug)]
#[command(name = "roughcut")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input file path (delimited text: identifier column, conditional
    /// attributes, decision column last)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Analysis method: "qualitative" (approximations, inconsistent objects)
    /// or "quantitative" (decision rules, weakest-rule objects).
    /// If not provided, will be selected interactively.
    #[arg(short, long)]
    pub method: Option<Method>,

    /// Output file path for the reduced table (CSV or Parquet, determined by extension).
    /// Defaults to input directory with '_reduced' suffix (e.g., data.csv → data_reduced.csv).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON report path. Defaults to input directory with '_analysis.json' suffix.
    #[arg(long)]
    pub report: Option<PathBuf>,

    #[command(flatten)]
    pub load: LoadArgs,

    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Skip interactive prompts
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,
}

/// Options controlling how the input file is read
#[derive(clap::Args, Debug, Clone)]
pub struct LoadArgs {
    /// Text encoding of the input (any WHATWG label, e.g. latin1, utf-8, windows-1250)
    #[arg(long, default_value = "latin1")]
    pub encoding: String,

    /// Field separator (a single ASCII character)
    #[arg(long, default_value = ";", value_parser = validate_separator)]
    pub separator: char,
}

impl LoadArgs {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            separator: self.separator as u8,
            encoding: self.encoding.clone(),
        }
    }
}

/// Options controlling the analysis itself
#[derive(clap::Args, Debug, Clone)]
pub struct AnalysisArgs {
    /// What the quantitative method does with rows whose condition has only
    /// one rule: "keep" (never remove) or "remove" (remove its rows).
    #[arg(long, default_value = "keep")]
    pub single_rule_policy: SingleRulePolicy,
}

impl AnalysisArgs {
    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            single_rule_policy: self.single_rule_policy,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve both analysis methods over HTTP (POST /process)
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8000")]
        addr: SocketAddr,

        /// Origin allowed by CORS
        #[arg(long, default_value = "http://localhost:3000")]
        allowed_origin: String,

        #[command(flatten)]
        load: LoadArgs,

        #[command(flatten)]
        analysis: AnalysisArgs,
    },
}

impl Cli {
    /// Get the input path, if provided.
    pub fn input(&self) -> Option<&PathBuf> {
        self.input.as_ref()
    }

    /// Get the output path, deriving from input if not explicitly provided.
    /// The derived path will be in the same directory as the input with a '_reduced' suffix.
    pub fn output_path(&self) -> Option<PathBuf> {
        let input = self.input.as_ref()?;
        Some(self.output.clone().unwrap_or_else(|| {
            let stem = input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("output");
            let extension = input
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("csv");
            parent_dir(input).join(format!("{}_reduced.{}", stem, extension))
        }))
    }

    /// Get the JSON report path, deriving from input if not explicitly provided.
    pub fn report_path(&self) -> Option<PathBuf> {
        let input = self.input.as_ref()?;
        if let Some(report) = &self.report {
            return Some(report.clone());
        }
        let stem = input.file_stem().and_then(|s| s.to_str())?;
        Some(parent_dir(input).join(format!("{}_analysis.json", stem)))
    }
}

fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}

/// Validator for the separator parameter
fn validate_separator(s: &str) -> Result<char, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c),
        _ => Err(format!(
            "separator must be a single ASCII character, got '{}'",
            s
        )),
    }
}
