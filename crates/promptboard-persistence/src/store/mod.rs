pub mod atomic;
pub mod board_store;
pub mod credential_store;

pub use board_store::JsonBoardStore;
pub use credential_store::FileCredentialStore;
