use anyhow::Result;
use clap::Args;

use super::{RunContext, SearchArgs, run_search};
use crate::search::{PACKAGE_JSON, SearchMode};

#[derive(Args, Debug)]
pub struct PackageArgs {
    #[command(flatten)]
    pub search: SearchArgs,
}

pub async fn execute(args: PackageArgs, ctx: &RunContext) -> Result<()> {
    run_search(SearchMode::Contents, PACKAGE_JSON, args.search, ctx).await
}
