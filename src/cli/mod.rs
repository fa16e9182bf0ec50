pub mod combine;
pub mod info;
pub mod split;

pub use combine::*;
pub use info::*;
pub use split::*;
