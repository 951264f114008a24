pub mod context;
pub mod item_service;

pub use context::ServiceContext;
