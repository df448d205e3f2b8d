//! Parking slot naming.
//!
//! A block with capacity `N` owns slots named `"1"` through `"N"`. The names
//! are derived once, when the block is created.

/// Largest capacity a single block may declare.
pub const MAX_BLOCK_SLOTS: i32 = 1000;

/// Display names for a block of the given capacity.
///
/// Capacities below 1 yield no slots.
pub fn slot_names(capacity: i32) -> Vec<String> {
    (1..=capacity.max(0)).map(|n| n.to_string()).collect()
}
