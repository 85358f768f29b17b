mod encode;
mod href;

pub use encode::{encode_component, encode_path_segment};
pub use href::{HrefParts, lookup_keys, page_path, split_href};
