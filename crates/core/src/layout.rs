//! Desired-state partitioning for parking lot layouts.
//!
//! A structural update declares the full set of blocks and time frames a
//! parking lot should own. Items that carry an id are kept (and updated in
//! place); items without one are created. Everything persisted under the
//! parking lot whose id is not in the kept set is removed.

use crate::types::DbId;

/// Declared child collection split into kept ids and items to create.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<T> {
    /// Ids of declared items that already exist, in declaration order.
    pub kept_ids: Vec<DbId>,
    /// Declared items that already exist, paired with their id.
    pub kept: Vec<(DbId, T)>,
    /// Declared items with no id (or the nil id).
    pub new_items: Vec<T>,
}

/// Split declared items by whether they carry a usable id.
///
/// A nil UUID counts as "no id". Duplicate ids are collapsed to their first
/// occurrence.
pub fn partition<T>(items: Vec<T>, id_of: impl Fn(&T) -> Option<DbId>) -> Partition<T> {
    let mut kept_ids = Vec::new();
    let mut kept = Vec::new();
    let mut new_items = Vec::new();

    for item in items {
        match id_of(&item).filter(|id| !id.is_nil()) {
            Some(id) if kept_ids.contains(&id) => {}
            Some(id) => {
                kept_ids.push(id);
                kept.push((id, item));
            }
            None => new_items.push(item),
        }
    }

    Partition {
        kept_ids,
        kept,
        new_items,
    }
}
