//! Piped repository list input

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Read every line from stdin when it is piped; a terminal yields nothing
pub async fn read_piped_lines() -> Result<Vec<String>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(Vec::new());
    }
    read_lines(tokio::io::stdin()).await
}

/// Collect all lines from `reader`, keeping blank ones for line numbering
pub(crate) async fn read_lines<R: AsyncRead + Unpin>(reader: R) -> Result<Vec<String>> {
    let mut lines = BufReader::new(reader).lines();
    let mut collected = Vec::new();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read repository list from stdin")?
    {
        collected.push(line);
    }
    Ok(collected)
}
