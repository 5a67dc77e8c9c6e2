// model = "claude-opus-4-5"
// created = "2026-10-19"
// modified = "2026-10-19"
// driver = "Isaac Clayton"

//! Skiplist - a probabilistic ordered container.
//!
//! Values are kept sorted and unique under a caller-supplied total order.
//! Search and insertion take expected O(log n) steps.
//!
//! # Quick Start
//!
//! ```
//! use skiplist::SkipList;
//! use skiplist::compare::NaturalOrder;
//!
//! let mut list = SkipList::new(NaturalOrder, 10);
//!
//! assert_eq!(list.insert(5), None);
//! assert_eq!(list.insert(3), None);
//! // Equal values are overwritten in place; the old one comes back.
//! assert_eq!(list.insert(5), Some(5));
//!
//! assert!(list.contains(&3));
//! assert!(!list.contains(&4));
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![3, 5]);
//!
//! // Levels and links, for debugging.
//! println!("{}", list);
//! ```
//!
//! Not supported: deletion, duplicate keys, and concurrent access.

pub mod compare;
pub mod level;
mod render;
mod skip_list;
pub use skip_list::*;
