use anyhow::Result;
use clap::Args;

use super::{RunContext, SearchArgs, run_search};
use crate::search::{PACKAGE_JSON, SearchMode};

/// Search `engines` (or `volta`) in `package.json`; an empty search lists
/// every engine
#[derive(Args, Debug)]
pub struct EnginesArgs {
    #[command(flatten)]
    pub search: SearchArgs,
}

pub async fn execute(args: EnginesArgs, ctx: &RunContext) -> Result<()> {
    run_search(SearchMode::Engines, PACKAGE_JSON, args.search, ctx).await
}
