pub mod entities;
pub mod error;
pub mod interface;
pub mod migrations;
pub mod sql;

pub use entities::Record;
pub use error::{RepositoryError, Result};
pub use interface::RepositoryProvider;
pub use sql::Warehouse;
