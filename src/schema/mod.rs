pub mod definition;
pub mod field_type;
pub mod stored;
pub mod tokens;

pub use definition::*;
pub use field_type::*;
pub use stored::*;
pub use tokens::*;
