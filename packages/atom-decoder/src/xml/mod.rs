//! Element tree helpers over `roxmltree`.

mod utils;

pub use utils::*;
