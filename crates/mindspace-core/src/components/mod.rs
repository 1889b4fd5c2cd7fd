//! Components - pure data attached to scene entities

mod math;
mod props;

pub use math::*;
pub use props::*;
