//! Transport records and the fragment join engine.
//!
//! A ledger stores each logical post as a bundle of fixed-size transport
//! fragments. This module collects the types that describe those fragments,
//! the ordering rule that makes reconstruction deterministic, the pure join
//! algorithm that recovers the delimited logical fields, and the write-side
//! encoder that produces fragment payloads in the first place.

pub mod chunker;
pub mod join;
pub mod record;

pub use chunker::encode_post;
pub use join::{
    FIELD_DELIMITER,
    FieldSet,
    NEXT_ADDRESS_MARKER,
    PREVIOUS_ADDRESS_MARKER,
    RESERVED_FIELDS,
    join_payloads,
};
pub use record::{Bundle, TransportFragment};
