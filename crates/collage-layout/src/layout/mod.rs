//! Layout algorithms for arranging images on a page
//!
//! Every layout takes the page's items and its printable margin, mutates
//! the items' transforms in place and returns the resulting arrangement
//! status, or `None` when there was nothing to arrange:
//! - Grid: rows × columns of equal cells
//! - Masonry: fixed-width columns (or fixed-height rows) packed greedily
//! - Random collage: overlap-free random packing grown to fill the page

mod collage;
mod grid;
mod masonry;
mod types;

pub use collage::*;
pub use grid::*;
pub use masonry::*;
pub use types::*;
