pub mod inference;
pub mod options;
pub mod spec;

pub use inference::*;
pub use options::*;
pub use spec::*;
