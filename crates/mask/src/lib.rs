mod error;
mod mask;
mod sequence;


pub use error::*;
pub use mask::*;
pub use sequence::*;
