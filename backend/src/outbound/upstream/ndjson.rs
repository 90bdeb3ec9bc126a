//! Incremental newline-delimited JSON decoding for streamed response bodies.

use std::fmt::Display;
use std::pin::Pin;

use futures_util::stream::{self, BoxStream, Stream, StreamExt};
use serde::de::DeserializeOwned;

use crate::domain::ports::{Upstream, UpstreamError};

struct LineBuffer<S> {
    body: Pin<Box<S>>,
    buffer: Vec<u8>,
    body_done: bool,
    failed: bool,
}

impl<S> LineBuffer<S> {
    fn next_line(&mut self) -> Option<Vec<u8>> {
        let end = self.buffer.iter().position(|byte| *byte == b'\n')?;
        let mut line: Vec<u8> = self.buffer.drain(..=end).collect();
        line.pop();
        Some(line)
    }
}

/// Decode `body` as one `T` per line.
///
/// Blank lines are skipped and a final line without a newline is still
/// decoded. A transfer or decode failure is yielded once and ends the stream.
pub(super) fn decode_ndjson<T, S, B, E>(
    upstream: Upstream,
    body: S,
) -> BoxStream<'static, Result<T, UpstreamError>>
where
    T: DeserializeOwned + Send + 'static,
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    let state = LineBuffer {
        body: Box::pin(body),
        buffer: Vec::new(),
        body_done: false,
        failed: false,
    };

    stream::unfold(state, move |mut state| async move {
        if state.failed {
            return None;
        }
        loop {
            if let Some(line) = state.next_line() {
                if line.trim_ascii().is_empty() {
                    continue;
                }
                let item = serde_json::from_slice::<T>(&line)
                    .map_err(|error| UpstreamError::decode(upstream, error.to_string()));
                state.failed = item.is_err();
                return Some((item, state));
            }
            if state.body_done {
                return None;
            }
            match state.body.next().await {
                Some(Ok(chunk)) => state.buffer.extend_from_slice(chunk.as_ref()),
                Some(Err(error)) => {
                    state.failed = true;
                    let failure = UpstreamError::transport(upstream, error.to_string());
                    return Some((Err(failure), state));
                }
                None => {
                    state.body_done = true;
                    if !state.buffer.is_empty() {
                        state.buffer.push(b'\n');
                    }
                }
            }
        }
    })
    .boxed()
}
