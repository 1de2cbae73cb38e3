//! Questions asked of a parsed tree at the cursor.
//!
//! - `cursor_info` : What the cursor token names and which statement encloses it.
//! - `fields`      : Columns visible from that statement, through a `ColumnLookup`.

pub mod cursor_info;
pub mod fields;

pub use cursor_info::{
    CursorInfo, NameSlot, cursor_info, find_nearest_statement, find_nearest_statement_by,
};
pub use fields::{ColumnLookup, Field, fields_from_statement, find_field_extra_info};
