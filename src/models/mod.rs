pub mod item;
pub mod patch;

pub use item::{CreateItem, Item, PatchItem, ReplaceItem};
pub use patch::PatchField;
