mod check;
mod pack;
mod preview;

pub use check::*;
pub use pack::*;
pub use preview::*;
