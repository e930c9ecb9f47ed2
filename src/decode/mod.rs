//! Response decoder module
//!
//! # Overview
//!
//! Turns raw response bodies into JSON documents and reads values out of
//! them. Keys are dotted paths (`links.next`) walked through nested objects;
//! a missing segment or a non-object along the way reads as absent rather
//! than as an error. Callers that need a particular type use the typed
//! readers, which report a `Shape` error naming the key and the type found.

mod decoders;
mod path;

pub use decoders::{parse_document, EntryDecoder};
pub use path::{lookup, lookup_count, lookup_link, take_path};
