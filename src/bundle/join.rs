//! Pure reassembly of delimited logical fields from fragment payloads.
//!
//! A post is written as one `::`-delimited string and then cut into
//! fixed-size fragments with no regard for field boundaries, so a field — or
//! the delimiter itself — may be torn at any offset. [`join_payloads`]
//! classifies each fragment against the tail of the running field list and
//! repairs the tear. It is a deterministic function of the payload sequence
//! and performs no I/O.

/// Two-character delimiter separating logical fields on the wire.
pub const FIELD_DELIMITER: &str = "::";

/// Literal marker preceding the next-block address in a header payload.
pub const NEXT_ADDRESS_MARKER: &str = "next_address:";

/// Literal marker preceding the previous-block address in a header payload.
pub const PREVIOUS_ADDRESS_MARKER: &str = "previous_address:";

/// Number of reserved leading fields: digest, next address, previous address.
pub const RESERVED_FIELDS: usize = 3;

/// The logical fields recovered from one bundle.
///
/// The first [`RESERVED_FIELDS`] entries are the digest and the two link
/// addresses; anything after them is a raw sample string. A set shorter than
/// the reserved prefix means the bundle was malformed, which the protocol
/// layer reports; the join itself never fails.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldSet(Vec<String>);

impl FieldSet {
    /// Wrap an already-reassembled field list.
    #[must_use]
    pub fn new(fields: Vec<String>) -> Self { Self(fields) }

    /// Fields in wire order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] { &self.0 }

    /// Number of fields, reserved prefix included.
    #[must_use]
    pub fn len(&self) -> usize { self.0.len() }

    /// Whether no fields were recovered at all.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Consume the set, returning the owned field list.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> { self.0 }
}

/// Reassemble the logical field set from payloads in bundle order.
///
/// The first payload is the header fragment: its address markers are
/// stripped and the remainder split on [`FIELD_DELIMITER`], yielding
/// `[digest, next, previous, samples...]`. A header that starts directly
/// with [`NEXT_ADDRESS_MARKER`] carries no digest segment and contributes an
/// empty digest field. Every later payload either starts a new field at a
/// clean boundary (`::` prefix), repairs a delimiter torn in half across the
/// fragment boundary (`:` prefix while the last field ends in `:`), or
/// continues the field left open by the previous fragment. The field list as
/// of the final fragment is authoritative.
///
/// An empty payload contributes no pieces but keeps its place in the
/// continuation bookkeeping; an empty payload sequence yields an empty set.
#[must_use]
pub fn join_payloads<I, S>(payloads: I) -> FieldSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut payloads = payloads.into_iter();
    let Some(header) = payloads.next() else {
        return FieldSet::default();
    };
    let mut fields = header_fields(header.as_ref());

    for payload in payloads {
        let payload = payload.as_ref();
        if payload.is_empty() {
            continue;
        }
        if let Some(rest) = payload.strip_prefix(FIELD_DELIMITER) {
            // Clean boundary: the previous fragment ended exactly on a
            // complete field.
            fields.extend(split_fields(rest));
        } else if let Some(rest) = payload.strip_prefix(':')
            && fields.last().is_some_and(|field| field.ends_with(':'))
        {
            // The delimiter itself was torn in half across the boundary.
            // Drop the stray colon to finalize the open field; the first
            // piece of this payload starts a brand-new field.
            if let Some(open) = fields.last_mut() {
                open.pop();
            }
            fields.extend(split_fields(rest));
        } else {
            // Mid-field continuation of the field left open at the end of
            // the previous fragment.
            let mut pieces = payload.split(FIELD_DELIMITER);
            if let Some(first) = pieces.next() {
                match fields.last_mut() {
                    Some(open) => open.push_str(first),
                    None => fields.push(first.to_owned()),
                }
            }
            fields.extend(pieces.map(str::to_owned));
        }
    }

    FieldSet(fields)
}

/// Split a header payload into its logical fields.
///
/// The address markers are positional, not parsed: stripping them leaves the
/// bare addresses in place between the delimiters. When the payload opens
/// with the next-address marker the writer omitted the digest segment, so an
/// empty digest field is restored at the front to keep the reserved prefix
/// positional.
fn header_fields(payload: &str) -> Vec<String> {
    let stripped = payload
        .replace(NEXT_ADDRESS_MARKER, "")
        .replace(PREVIOUS_ADDRESS_MARKER, "");
    let mut fields = split_fields(&stripped);
    if payload.starts_with(NEXT_ADDRESS_MARKER) {
        fields.insert(0, String::new());
    }
    fields
}

fn split_fields(text: &str) -> Vec<String> {
    text.split(FIELD_DELIMITER).map(str::to_owned).collect()
}
