pub mod base;
mod context;
pub mod error;
pub mod item_dao;

pub use base::DaoBase;
pub use context::DaoContext;
pub use error::{DaoLayerError, DaoResult};
pub use item_dao::ItemDao;
