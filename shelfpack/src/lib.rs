//! Shelfpack lays out UV chart islands on a texture sheet. The sheet is one
//! unit wide, and islands are packed upward from the bottom in shelves, each
//! of which holds a row of islands along its floor and another along its
//! ceiling.
//!
//! Shelfpack only decides where islands go. Finding islands in a mesh and
//! copying texels into the new layout are left to the caller.
//!
//! ## Example
//! ```
//! use shelfpack::{Island, PackingContext, ShelfPacker};
//!
//! // Islands are plain values owned by the caller. Sizes are in sheet units.
//! let mut islands = vec![
//!     Island::new((0.5, 0.3)),
//!     Island::new((0.2, 0.4)),
//!     Island::new((0.1, 0.1)),
//! ];
//!
//! // Describe how much room there is and how far apart islands must be.
//! let context = PackingContext::new(1.0).padding(0.01);
//!
//! // On success, every island has a position on the sheet. The second island
//! // was turned on its side to fit better.
//! let output = ShelfPacker::new()
//!     .pack(&mut islands, &context)
//!     .expect("islands should fit");
//!
//! assert!(output.used_height() <= 1.0);
//! ```

mod error;
mod geometry;
mod id;
mod orientation;
mod packer;
mod shelf;
mod types;

pub use error::*;
pub use geometry::*;
pub use id::*;
pub use orientation::{normalize, normalize_all};
pub use packer::*;
pub use types::*;
