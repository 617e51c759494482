pub mod value;
pub mod value_path;

pub use value::Value;
pub use value_path::{PathSegment, ValuePath, ValuePathParseError};
