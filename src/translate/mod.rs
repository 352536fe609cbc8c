pub mod interface;
pub mod translator;

pub use interface::*;
pub use translator::*;
