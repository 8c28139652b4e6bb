//! Result-file export: a completed card's result text offered as a
//! markdown file.

use promptboard_core::{BoardError, BoardResult};
use promptboard_domain::Card;
use std::path::{Path, PathBuf};
use tokio::fs;

pub fn result_file_name(card: &Card) -> String {
    format!("prompt_result_{}.md", card.id)
}

/// Write the card's result into `dir` under the canonical file name and
/// return the full path. Cards without a result cannot be exported.
pub async fn write_result_file(dir: &Path, card: &Card) -> BoardResult<PathBuf> {
    let result = card
        .result
        .as_deref()
        .ok_or_else(|| BoardError::Validation(format!("card {} has no result", card.id)))?;

    let path = dir.join(result_file_name(card));
    fs::write(&path, result).await?;
    tracing::info!("Exported result of card {} to {}", card.id, path.display());
    Ok(path)
}
