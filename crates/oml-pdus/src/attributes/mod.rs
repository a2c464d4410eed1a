pub mod dictionary;
pub mod tlv;

pub use dictionary::{AttrEncoding, lookup};
pub use tlv::{AttrList, Attribute, decode_attrs, encode_attrs};
