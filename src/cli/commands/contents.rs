use anyhow::Result;
use clap::Args;

use super::{RunContext, SearchArgs, run_search};
use crate::search::SearchMode;

#[derive(Args, Debug)]
pub struct ContentsArgs {
    /// File path to search in the GitHub contents API
    #[arg(value_name = "FILE")]
    pub file: String,

    #[command(flatten)]
    pub search: SearchArgs,
}

pub async fn execute(args: ContentsArgs, ctx: &RunContext) -> Result<()> {
    run_search(SearchMode::Contents, &args.file, args.search, ctx).await
}
