use std::io::{self, Read};

use crate::transform::{Chain, Transform};

const READ_CHUNK: usize = 8 * 1024;

/// Applies a [`Chain`] lazily to everything read from `inner`.
///
/// Output produced beyond what the caller asked for is kept for the next
/// read. Errors from `inner` are returned as they are; the chain is flushed
/// once when `inner` reports end of data.
pub struct TransformReader<R> {
    inner: R,
    chain: Chain,
    scratch: Vec<u8>,
    output: Vec<u8>,
    out_pos: usize,
    finished: bool,
}

impl<R: Read> TransformReader<R> {
    pub fn new(inner: R, chain: Chain) -> Self {
        TransformReader {
            inner,
            chain,
            scratch: vec![0u8; READ_CHUNK],
            output: Vec::new(),
            out_pos: 0,
            finished: false,
        }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Transformed bytes produced but not yet handed out.
    pub fn buffered(&self) -> usize {
        self.output.len() - self.out_pos
    }

    fn refill(&mut self) -> io::Result<()> {
        self.output.clear();
        self.out_pos = 0;

        let n = self.inner.read(&mut self.scratch)?;
        if n == 0 {
            self.chain.transform(&[], &mut self.output, true);
            self.finished = true;
        } else {
            self.chain.transform(&self.scratch[..n], &mut self.output, false);
        }
        Ok(())
    }
}

impl<R: Read> Read for TransformReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            let pending = &self.output[self.out_pos..];
            if !pending.is_empty() {
                let n = pending.len().min(buf.len());
                buf[..n].copy_from_slice(&pending[..n]);
                self.out_pos += n;
                return Ok(n);
            }
            if self.finished {
                return Ok(0);
            }
            self.refill()?;
        }
    }
}
