pub mod assembler;
pub mod outline;
mod spec;

pub use assembler::{FormAssembler, FormAssemblerBuilder};
pub use outline::{FormOutline, format_form};
pub use spec::*;
