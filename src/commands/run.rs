use anyhow::Result;
use tracing::info;

use crate::cli::{EvaluateArgs, RunArgs, SummarizeArgs};
use crate::model::BenchmarkConfig;

use super::{evaluate, summarize};

pub fn run(args: RunArgs) -> Result<()> {
    let config = BenchmarkConfig::load(&args.cache_root, args.config_path.as_deref())?;

    summarize::run(SummarizeArgs {
        cache_root: args.cache_root.clone(),
        config_path: args.config_path.clone(),
        summarizers: Vec::new(),
        sentence_count: None,
        force: false,
    })?;

    if config.evaluation_enabled {
        evaluate::run(EvaluateArgs {
            cache_root: args.cache_root.clone(),
            config_path: args.config_path.clone(),
            metrics: Vec::new(),
            report_path: None,
        })?;
    } else {
        info!("evaluation disabled by configuration; skipping scoring");
    }

    Ok(())
}
