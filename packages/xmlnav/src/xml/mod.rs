//! Parse backend adapter: roxmltree helpers and the element arena.

pub mod tree;
pub mod utils;

pub use tree::{AttributeRecord, ElementRecord, ElementTree, Siblings};
pub use utils::{direct_text, get_tag_name, qualified_attribute_name, qualified_tag_name};
