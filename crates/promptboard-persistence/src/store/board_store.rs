use async_trait::async_trait;
use promptboard_core::{BoardError, BoardResult};
use promptboard_domain::Board;
use std::path::{Path, PathBuf};

use crate::store::atomic;
use crate::traits::BoardStore;

/// JSON file store for the board snapshot. The file holds the bare
/// three-column array, pretty-printed; nothing else.
#[derive(Debug, Clone)]
pub struct JsonBoardStore {
    path: PathBuf,
}

impl JsonBoardStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Startup helper for the interactive surface: a missing file yields an
    /// empty board, and a structurally incompatible one is logged and
    /// replaced by an empty board rather than killing the session.
    pub async fn load_or_default(&self) -> Board {
        if !self.exists().await {
            return Board::new();
        }
        match self.load().await {
            Ok(board) => board,
            Err(e) => {
                tracing::warn!(
                    "Stored board at {} is unreadable ({}); starting from an empty board",
                    self.path.display(),
                    e
                );
                Board::new()
            }
        }
    }
}

#[async_trait]
impl BoardStore for JsonBoardStore {
    async fn save(&self, board: &Board) -> BoardResult<()> {
        let bytes = serde_json::to_vec_pretty(board)
            .map_err(|e| BoardError::Serialization(e.to_string()))?;
        atomic::write_atomic(&self.path, &bytes).await?;
        tracing::info!(
            "Saved board ({} cards) to {}",
            board.card_count(),
            self.path.display()
        );
        Ok(())
    }

    async fn load(&self) -> BoardResult<Board> {
        if !self.exists().await {
            return Err(BoardError::NotFound(format!(
                "board file {}",
                self.path.display()
            )));
        }
        let bytes = atomic::read_all(&self.path).await?;
        let board: Board = serde_json::from_slice(&bytes)
            .map_err(|e| BoardError::Serialization(e.to_string()))?;
        board.validate()?;
        tracing::info!(
            "Loaded board ({} cards) from {}",
            board.card_count(),
            self.path.display()
        );
        Ok(board)
    }

    async fn exists(&self) -> bool {
        self.path.exists()
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
