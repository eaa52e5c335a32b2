//! The plaintext protocol: space-separated samples, semicolon-joined tags.

use log::debug;

use super::{ProtocolError, timestamp::epoch_to_datetime};
use crate::{
    block::{Block, BlockMetadata, Packet},
    bundle::{FieldSet, RESERVED_FIELDS},
};

/// Map the reserved header fields onto a block and keep the rest as raw
/// sample strings.
pub(super) fn parse_headers(address: &str, fields: &FieldSet) -> Result<Block, ProtocolError> {
    let fields = fields.as_slice();
    if fields.len() <= RESERVED_FIELDS {
        return Err(ProtocolError::invalid(
            address,
            format!("expected more than {RESERVED_FIELDS} fields, got {}", fields.len()),
        ));
    }
    debug!(
        "header of block at {address} is {}::{}::{}",
        fields[0], fields[1], fields[2]
    );
    Ok(Block::new(
        address,
        fields[1].clone(),
        fields[2].clone(),
        BlockMetadata {
            digest: fields[0].clone(),
        },
        fields[RESERVED_FIELDS..].to_vec(),
    ))
}

/// Decode every raw sample stored on `block` into a packet.
pub(super) fn parse_data(block: &Block) -> Result<Vec<Packet>, ProtocolError> {
    block
        .raw_samples()
        .iter()
        .map(|raw| parse_sample(raw, block.address()))
        .collect()
}

/// Decode one `tags timestamp data` sample string.
fn parse_sample(raw: &str, address: &str) -> Result<Packet, ProtocolError> {
    let mut parts = raw.split(' ');
    let (Some(tags_blob), Some(epoch), Some(data), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ProtocolError::invalid(
            address,
            format!("sample `{raw}` is not three space-separated parts"),
        ));
    };
    let mut tags = tags_blob.split(';').map(str::to_owned);
    let tag = tags.next().unwrap_or_default();
    let timestamp = epoch_to_datetime(epoch).ok_or_else(|| {
        ProtocolError::invalid(address, format!("unreadable epoch `{epoch}` in sample `{raw}`"))
    })?;
    Ok(Packet::new(raw, tag, tags.collect(), timestamp, data, address))
}
