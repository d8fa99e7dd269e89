pub mod analysis;
pub mod trade;

pub use analysis::*;
pub use trade::*;
