use async_trait::async_trait;
use promptboard_core::BoardResult;
use promptboard_domain::Board;
use std::path::Path;

/// Storage for the board snapshot. The whole board is written on every
/// mutation; there are no partial writes and no versioned envelopes. The
/// stored shape is exactly the in-memory shape.
#[async_trait]
pub trait BoardStore: Send + Sync {
    async fn save(&self, board: &Board) -> BoardResult<()>;

    /// Load and structurally validate the stored snapshot. A missing file
    /// is `NotFound`; an incompatible one is a `Serialization` error.
    async fn load(&self) -> BoardResult<Board>;

    async fn exists(&self) -> bool;

    fn path(&self) -> &Path;
}

/// Storage for the API credential: a single raw string, persisted
/// independently of the board.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn save(&self, credential: &str) -> BoardResult<()>;

    /// `None` when no credential has been configured.
    async fn load(&self) -> BoardResult<Option<String>>;

    async fn clear(&self) -> BoardResult<()>;

    fn path(&self) -> &Path;
}
