//! Fire-and-forget dispatch of Huffman calls onto the tokio blocking pool.
//!
//! A submitted call always runs to completion. Dropping the returned
//! [`HuffmanTask`] detaches it; awaiting the task is the only way to observe
//! its result.
//!
//! Both functions must be called from within a tokio runtime.

use crate::decode::decode;
use crate::encode::encode;
use crate::metadata::HuffmanBlock;
use bytepress_core::error::{BytePressError, Result};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::task::JoinHandle;

/// Handle to a dispatched Huffman call.
#[derive(Debug)]
pub struct HuffmanTask<T> {
    handle: JoinHandle<Result<T>>,
}

impl<T> HuffmanTask<T> {
    /// Whether the call has finished.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<T> Future for HuffmanTask<T> {
    type Output = Result<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match Pin::new(&mut this.handle).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(e)) => Poll::Ready(Err(BytePressError::task_failed(e.to_string()))),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Run [`encode`] on the blocking pool.
pub fn compress_async(data: Vec<u8>) -> HuffmanTask<HuffmanBlock> {
    HuffmanTask {
        handle: tokio::task::spawn_blocking(move || encode(&data)),
    }
}

/// Run [`decode`] on the blocking pool.
pub fn decompress_async(block: HuffmanBlock) -> HuffmanTask<Vec<u8>> {
    HuffmanTask {
        handle: tokio::task::spawn_blocking(move || decode(&block.metadata, &block.payload)),
    }
}
