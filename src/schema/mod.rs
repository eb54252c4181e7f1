pub mod field;
pub mod hints;
pub mod introspect;
pub mod record;

pub use field::*;
pub use hints::*;
pub use introspect::*;
pub use record::*;
