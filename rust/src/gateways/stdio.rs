use std::io::ErrorKind;
use std::sync::Arc;

use futures::StreamExt;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio_util::bytes::BytesMut;
use tokio_util::codec::{Decoder, FramedRead, LinesCodec, LinesCodecError};

use crate::protocol::JsonRpcResponse;
use crate::server::McpServer;
use crate::support::signals::install_signal_handlers;

const OUTBOUND_BUFFER: usize = 64;
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

/// One inbound stdin line, or the reason it could not be taken as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundLine {
    Message(String),
    Rejected(String),
}

/// `LinesCodec` that turns per-line failures into frames so the stream keeps going.
#[derive(Debug)]
pub struct JsonRpcLineCodec {
    inner: LinesCodec,
    max_length: usize,
}

impl JsonRpcLineCodec {
    pub fn new(max_length: usize) -> Self {
        Self {
            inner: LinesCodec::new_with_max_length(max_length),
            max_length,
        }
    }

    fn classify(
        &self,
        decoded: Result<Option<String>, LinesCodecError>,
    ) -> Result<Option<InboundLine>, LinesCodecError> {
        match decoded {
            Ok(line) => Ok(line.map(InboundLine::Message)),
            Err(LinesCodecError::MaxLineLengthExceeded) => Ok(Some(InboundLine::Rejected(
                format!("line exceeds {} bytes", self.max_length),
            ))),
            Err(LinesCodecError::Io(err)) if err.kind() == ErrorKind::InvalidData => {
                Ok(Some(InboundLine::Rejected(format!("invalid UTF-8: {err}"))))
            }
            Err(err) => Err(err),
        }
    }
}

impl Decoder for JsonRpcLineCodec {
    type Item = InboundLine;
    type Error = LinesCodecError;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<InboundLine>, LinesCodecError> {
        let decoded = self.inner.decode(buf);
        self.classify(decoded)
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<InboundLine>, LinesCodecError> {
        let decoded = self.inner.decode_eof(buf);
        self.classify(decoded)
    }
}

pub async fn run(server: McpServer) -> Result<(), String> {
    tracing::info!("  - transport: stdio");
    install_signal_handlers();
    serve(server, tokio::io::stdin(), tokio::io::stdout()).await
}

/// Serves newline-delimited JSON-RPC until `input` reaches EOF.
///
/// Requests run concurrently; replies are written whole, one per line, in
/// completion order. Stdio carries no credential of its own.
pub async fn serve<R, W>(server: McpServer, input: R, output: W) -> Result<(), String>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let server = Arc::new(server);
    let (tx, rx) = mpsc::channel::<String>(OUTBOUND_BUFFER);
    let writer = tokio::spawn(write_lines(rx, output));

    let mut lines = FramedRead::new(input, JsonRpcLineCodec::new(MAX_LINE_BYTES));
    while let Some(line) = lines.next().await {
        let line = match line.map_err(|err| err.to_string())? {
            InboundLine::Message(line) => line,
            InboundLine::Rejected(reason) => {
                tracing::error!("Unreadable stdin line: {reason}");
                let reply = JsonRpcResponse::parse_error(&reason);
                match serde_json::to_string(&reply) {
                    Ok(frame) => {
                        if tx.send(frame).await.is_err() {
                            tracing::error!("stdout writer closed; dropping response");
                        }
                    }
                    Err(err) => tracing::error!("Failed to serialize response: {err}"),
                }
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let server = server.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let Some(response) = server.handle_message(&line, None).await else {
                return;
            };
            match serde_json::to_string(&response) {
                Ok(frame) => {
                    if tx.send(frame).await.is_err() {
                        tracing::error!("stdout writer closed; dropping response");
                    }
                }
                Err(err) => tracing::error!("Failed to serialize response: {err}"),
            }
        });
    }

    tracing::info!("stdin closed; waiting for in-flight requests");
    drop(tx);
    writer
        .await
        .map_err(|err| format!("stdout writer task failed: {err}"))?
}

async fn write_lines<W>(mut rx: mpsc::Receiver<String>, mut output: W) -> Result<(), String>
where
    W: AsyncWrite + Unpin,
{
    while let Some(frame) = rx.recv().await {
        output
            .write_all(frame.as_bytes())
            .await
            .map_err(|err| format!("Failed to write stdout: {err}"))?;
        output
            .write_all(b"\n")
            .await
            .map_err(|err| format!("Failed to write stdout: {err}"))?;
        output
            .flush()
            .await
            .map_err(|err| format!("Failed to flush stdout: {err}"))?;
    }
    Ok(())
}
