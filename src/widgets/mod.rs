//! Cross-cutting dashboard widgets.

pub mod cdek;
pub mod crop;
pub mod reorder;

pub use crop::{Arrow, CropArea, CropEditor};
pub use reorder::{apply_drag, move_item, positions, swap_items, DragResult};
