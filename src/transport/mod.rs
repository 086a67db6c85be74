//! Transport layer: SOAP envelope, XML conversion, and response decoding.

mod encode;
mod envelope;
mod result;
pub mod xml;

pub use encode::{encode_phone_number, encode_profile, encode_record};
pub use envelope::build_envelope;
pub use result::{DecodeError, decode_base, decode_query_numbers, decode_query_profile};
