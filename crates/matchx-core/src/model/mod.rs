pub mod pattern;
pub mod value;

pub use pattern::Pattern;
pub use value::{type_name_of, ValueExt};
