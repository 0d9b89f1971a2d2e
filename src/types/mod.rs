pub mod record;
pub mod track;
pub mod workout;

pub use record::*;
pub use track::*;
pub use workout::*;
