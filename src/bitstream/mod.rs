//! Streaming bit packing for the archive payload.

pub mod reader;
pub mod writer;

pub use reader::{BitStreamDecoder, DecodedPayload};
pub use writer::{last_byte_bits, BitStreamEncoder, PayloadEnd};
