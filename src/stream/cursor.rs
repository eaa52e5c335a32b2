//! Lazy cursors over a stream's blocks and packets.
//!
//! Cursors are pull-based: every `next().await` resolves at most one
//! address, fetching only when the index has never attempted it. The end of
//! a sequence is a value, never an error — an empty link or an undecodable
//! address simply stops production. After a transient failure the cursor
//! stays positioned on the same address, so the very next call (or a fresh
//! cursor) retries it.

use std::{collections::VecDeque, sync::Arc};

use futures::stream;

use super::Stream;
use crate::{block::{Block, Packet}, connector::LedgerConnector};

/// Cursor over blocks in link order.
#[derive(Debug)]
pub struct Blocks<'a, C> {
    stream: &'a Stream<C>,
    position: Option<String>,
    reverse: bool,
}

impl<'a, C: LedgerConnector> Blocks<'a, C> {
    pub(super) fn new(stream: &'a Stream<C>, reverse: bool) -> Self {
        let position = if reverse {
            stream.latest_address()
        } else {
            stream.root_address().to_owned()
        };
        Self {
            stream,
            position: Some(position),
            reverse,
        }
    }

    /// Resolve and yield the next block, or `None` when the sequence ends
    /// or pauses.
    pub async fn next(&mut self) -> Option<Arc<Block>> {
        let address = self.position.clone().filter(|address| !address.is_empty())?;
        let block = self.stream.resolve(&address, !self.reverse).await?;
        let following = if self.reverse {
            block.previous_link()
        } else {
            block.next_link()
        };
        self.position = Some(following.to_owned());
        Some(block)
    }

    /// Adapt the cursor into a [`futures::Stream`] of blocks.
    pub fn into_stream(self) -> impl futures::Stream<Item = Arc<Block>> + 'a {
        stream::unfold(self, |mut cursor| async move {
            cursor.next().await.map(|block| (block, cursor))
        })
    }
}

/// Cursor over packets across consecutive blocks.
#[derive(Debug)]
pub struct Packets<'a, C> {
    blocks: Blocks<'a, C>,
    pending: VecDeque<Packet>,
    reverse: bool,
}

impl<'a, C: LedgerConnector> Packets<'a, C> {
    pub(super) fn new(stream: &'a Stream<C>, reverse: bool) -> Self {
        Self {
            blocks: Blocks::new(stream, reverse),
            pending: VecDeque::new(),
            reverse,
        }
    }

    /// Yield the next packet, resolving further blocks as needed.
    ///
    /// Blocks without samples are skipped transparently.
    pub async fn next(&mut self) -> Option<Packet> {
        loop {
            if let Some(packet) = self.pending.pop_front() {
                return Some(packet);
            }
            let block = self.blocks.next().await?;
            self.pending = if self.reverse {
                block.samples().iter().rev().cloned().collect()
            } else {
                block.samples().iter().cloned().collect()
            };
        }
    }

    /// Adapt the cursor into a [`futures::Stream`] of packets.
    pub fn into_stream(self) -> impl futures::Stream<Item = Packet> + 'a {
        stream::unfold(self, |mut cursor| async move {
            cursor.next().await.map(|packet| (packet, cursor))
        })
    }
}
