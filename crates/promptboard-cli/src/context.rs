use promptboard_core::BoardResult;
use promptboard_domain::Board;
use promptboard_persistence::{
    BoardStore, CredentialStore, FileCredentialStore, JsonBoardStore,
};
use std::path::Path;

/// Owns the loaded board and credential for one CLI invocation. A missing
/// board file starts empty; a malformed one is reported, not clobbered.
pub struct CliContext {
    pub board: Board,
    pub credential: Option<String>,
    board_store: JsonBoardStore,
    credential_store: FileCredentialStore,
}

impl CliContext {
    pub async fn load(board_path: &Path, credential_path: &Path) -> BoardResult<Self> {
        let board_store = JsonBoardStore::new(board_path);
        let board = if board_store.exists().await {
            board_store.load().await?
        } else {
            Board::new()
        };

        let credential_store = FileCredentialStore::new(credential_path);
        let credential = credential_store.load().await?;

        Ok(Self {
            board,
            credential,
            board_store,
            credential_store,
        })
    }

    pub async fn save_board(&self) -> BoardResult<()> {
        self.board_store.save(&self.board).await
    }

    pub async fn save_credential(&mut self, value: &str) -> BoardResult<()> {
        self.credential_store.save(value).await?;
        self.credential = Some(value.to_string());
        Ok(())
    }

    pub async fn clear_credential(&mut self) -> BoardResult<()> {
        self.credential_store.clear().await?;
        self.credential = None;
        Ok(())
    }

    pub fn credential_str(&self) -> &str {
        self.credential.as_deref().unwrap_or("")
    }

    pub fn credential_path(&self) -> &Path {
        self.credential_store.path()
    }
}
