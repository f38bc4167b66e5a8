//! Layout and margin-constraint engine for arranging images on printable
//! pages.

pub mod arrangement;
pub mod constants;
pub mod constraint;
pub mod geometry;
pub mod layout;
pub mod object;
mod options;
pub mod page;
mod types;

pub use arrangement::*;
pub use constraint::*;
pub use layout::*;
pub use object::*;
pub use options::*;
pub use page::*;
pub use types::*;
