use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "sumbench",
    version,
    about = "Local text-summarization benchmarking and evaluation tooling"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Summarize(SummarizeArgs),
    Evaluate(EvaluateArgs),
    Run(RunArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SummarizeArgs {
    #[arg(long, default_value = ".cache/sumbench")]
    pub cache_root: PathBuf,

    #[arg(long)]
    pub config_path: Option<PathBuf>,

    #[arg(long = "summarizer")]
    pub summarizers: Vec<String>,

    #[arg(long)]
    pub sentence_count: Option<usize>,

    #[arg(long, default_value_t = false)]
    pub force: bool,
}

#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    #[arg(long, default_value = ".cache/sumbench")]
    pub cache_root: PathBuf,

    #[arg(long)]
    pub config_path: Option<PathBuf>,

    #[arg(long = "metric")]
    pub metrics: Vec<String>,

    #[arg(long)]
    pub report_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[arg(long, default_value = ".cache/sumbench")]
    pub cache_root: PathBuf,

    #[arg(long)]
    pub config_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = ".cache/sumbench")]
    pub cache_root: PathBuf,

    #[arg(long)]
    pub config_path: Option<PathBuf>,
}
