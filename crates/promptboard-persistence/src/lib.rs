pub mod export;
pub mod store;
pub mod traits;

pub use export::{result_file_name, write_result_file};
pub use store::{FileCredentialStore, JsonBoardStore};
pub use traits::{BoardStore, CredentialStore};
