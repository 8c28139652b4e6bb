pub mod config;
pub mod error;
pub mod input;
pub mod result;
pub mod selection;

pub use config::AppConfig;
pub use error::BoardError;
pub use input::InputState;
pub use result::BoardResult;
pub use selection::SelectionState;
