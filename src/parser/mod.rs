pub mod decoder;
pub mod helpers;
pub mod main;

pub use decoder::*;
pub use main::*;
