//! Drag-and-drop reordering of images, filter groups, variations and FAQ entries.

use uuid::Uuid;

use crate::error::{AdminError, Result};
use crate::schema::Position;

/// What a drag-and-drop list reports when an item is dropped.
/// `to` is `None` when it was dropped outside the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragResult {
    pub from: usize,
    pub to: Option<usize>,
}

fn check(index: usize, len: usize) -> Result<()> {
    if index < len { Ok(()) } else { Err(AdminError::Reorder { index, len }) }
}

/// Removes the element at `from` and inserts it at `to`.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<()> {
    check(from, items.len())?;
    check(to, items.len())?;
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    Ok(())
}

pub fn swap_items<T>(items: &mut [T], a: usize, b: usize) -> Result<()> {
    check(a, items.len())?;
    check(b, items.len())?;
    items.swap(a, b);
    Ok(())
}

/// Applies a drop. Returns whether the order changed.
pub fn apply_drag<T>(items: &mut Vec<T>, drag: DragResult) -> Result<bool> {
    match drag.to {
        Some(to) if to != drag.from => move_item(items, drag.from, to).map(|_| true),
        _ => check(drag.from, items.len()).map(|_| false),
    }
}

/// `{id, position}` pairs for the backend, numbered from zero in list order.
pub fn positions<T>(items: &[T], id: impl Fn(&T) -> Uuid) -> Vec<Position> {
    items
        .iter()
        .zip(0u32..)
        .map(|(item, position)| Position { id: id(item), position })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_forward_and_back() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        move_item(&mut items, 0, 2).unwrap();
        assert_eq!(items, ['b', 'c', 'a', 'd']);
        move_item(&mut items, 3, 0).unwrap();
        assert_eq!(items, ['d', 'b', 'c', 'a']);
    }

    #[test]
    fn test_out_of_range() {
        let mut items = vec![1, 2];
        assert!(matches!(move_item(&mut items, 0, 2), Err(AdminError::Reorder { index: 2, len: 2 })));
        assert!(swap_items(&mut items, 5, 0).is_err());
        assert_eq!(items, [1, 2]);
    }

    #[test]
    fn test_drop_outside_list_is_noop() {
        let mut items = vec![1, 2, 3];
        assert!(!apply_drag(&mut items, DragResult { from: 1, to: None }).unwrap());
        assert!(apply_drag(&mut items, DragResult { from: 2, to: Some(0) }).unwrap());
        assert_eq!(items, [3, 1, 2]);
    }

    #[test]
    fn test_positions_follow_list_order() {
        let ids = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let mut items = ids.to_vec();
        swap_items(&mut items, 0, 2).unwrap();
        let positions = positions(&items, |id| *id);
        assert_eq!(positions[0], Position { id: ids[2], position: 0 });
        assert_eq!(positions[2], Position { id: ids[0], position: 2 });
    }
}
