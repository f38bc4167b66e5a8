//! Margin constraints for user gestures
//!
//! This module keeps objects inside a page's printable margin while they
//! are moved, scaled, rotated or skewed:
//! - One-shot corrections (position clamp, scale-to-fit)
//! - Per-frame gesture constraints that slide an object up to the margin
//!   by binary-searching between the last valid and the proposed state
//! - The per-object gesture state those constraints remember between frames

mod gesture;
mod margin;
mod rotation;
mod scaling;
mod search;
mod skew;

pub use gesture::*;
pub use margin::*;
pub use rotation::*;
pub use scaling::*;
pub use search::*;
pub use skew::*;
