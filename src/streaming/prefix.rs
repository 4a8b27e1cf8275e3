use std::io::{self, Read};

use crate::core::config::MIN_PEEK_SIZE;

/// A source with its first bytes captured for inspection.
///
/// The prefix is read once, up front. Reads serve the retained bytes first
/// and then continue from the live source, so a consumer cannot tell where
/// one ends and the other begins.
#[derive(Debug)]
pub struct PrefixBuffer<R> {
    buf: Vec<u8>,
    pos: usize,
    source: R,
    reached_end: bool,
}

impl<R: Read> PrefixBuffer<R> {
    /// Reads up to `capacity` bytes from `source`.
    ///
    /// Capacity is raised to [`MIN_PEEK_SIZE`] if smaller. Short reads and end
    /// of data are fine; interrupted reads are retried and any other error is
    /// returned.
    pub fn fill(mut source: R, capacity: usize) -> io::Result<Self> {
        let capacity = capacity.max(MIN_PEEK_SIZE);
        let mut buf = vec![0u8; capacity];
        let mut filled = 0;
        let mut reached_end = false;

        while filled < capacity {
            match source.read(&mut buf[filled..]) {
                Ok(0) => {
                    reached_end = true;
                    break;
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        buf.truncate(filled);
        log::trace!("captured {} byte prefix (end of data: {})", filled, reached_end);

        Ok(PrefixBuffer {
            buf,
            pos: 0,
            source,
            reached_end,
        })
    }
}

impl<R> PrefixBuffer<R> {
    /// The retained bytes not yet consumed.
    pub fn peek(&self) -> &[u8] {
        &self.buf[self.pos..]
    }

    /// Discards up to `n` retained bytes.
    pub fn skip(&mut self, n: usize) {
        self.pos += n.min(self.remaining());
        self.release_if_drained();
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_drained(&self) -> bool {
        self.remaining() == 0
    }

    /// True when the source signalled end of data while the prefix was being
    /// captured, i.e. the prefix is the whole input.
    pub fn reached_end(&self) -> bool {
        self.reached_end
    }

    fn release_if_drained(&mut self) {
        if self.pos == self.buf.len() && !self.buf.is_empty() {
            self.buf = Vec::new();
            self.pos = 0;
        }
    }
}

impl<R: Read> Read for PrefixBuffer<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if self.is_drained() {
            return self.source.read(out);
        }
        let retained = self.peek();
        let n = retained.len().min(out.len());
        out[..n].copy_from_slice(&retained[..n]);
        self.pos += n;
        self.release_if_drained();
        Ok(n)
    }
}
