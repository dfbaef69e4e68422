//! Utility modules shared by the preview core.

pub mod hash;
pub mod html;
pub mod path;
