use bytes::BytesMut;
use glint_common::config::DetectionConfig;
use glint_common::frame::Frame;
use glint_common::wire;
use std::io::{Error, ErrorKind};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use crate::detect;
use crate::DetectorError;

/// How much of a frame payload we pull off the socket per read. Payloads
/// arrive in arbitrary pieces; each read consumes whatever is available,
/// bounded by what the payload still needs.
const READ_CHUNK: usize = 64 * 1024;

/// Single-connection dispatch loop: one header byte at a time, one request
/// processed to completion before the next is accepted.
///
/// The base frame is owned here and replaced wholesale on a BASE_FRAME
/// message. It is only ever swapped between requests, so scan workers hold
/// read-only `Arc` clones without any locking.
pub struct Session {
    stream: TcpStream,
    base: Option<Arc<Frame>>,
    config: DetectionConfig,
}

impl Session {
    pub fn new(stream: TcpStream, config: DetectionConfig) -> Self {
        Self {
            stream,
            base: None,
            config,
        }
    }

    /// Run until the peer sends EXIT (`Ok`) or the session fails (`Err`).
    /// Read and decode failures terminate without notifying the peer.
    pub async fn run(&mut self) -> Result<(), DetectorError> {
        loop {
            let header = self.stream.read_u8().await?;
            match header {
                wire::EXIT => {
                    info!("received exit code, terminating session");
                    return Ok(());
                }
                wire::PROCESS_FRAME => {
                    let frame = self.read_frame().await?;
                    debug!(
                        width = frame.width(),
                        height = frame.height(),
                        "scanning live frame"
                    );
                    let outcome = detect::detect(frame, self.base.clone(), &self.config).await?;
                    let point = outcome.point();
                    info!(
                        outcome = outcome.label(),
                        x = point.x,
                        y = point.y,
                        "reporting coordinate"
                    );
                    self.stream.write_all(&wire::encode_reply(point)).await?;
                }
                wire::BASE_FRAME => {
                    let frame = self.read_frame().await?;
                    info!(
                        width = frame.width(),
                        height = frame.height(),
                        "base frame replaced"
                    );
                    self.base = Some(Arc::new(frame));
                }
                other => {
                    // No resynchronization: the next byte is read as a fresh header.
                    warn!(code = format!("{other:#04x}"), "unrecognized header code");
                }
            }
        }
    }

    /// Read one `[u32 BE length][payload]` frame message and decode it.
    async fn read_frame(&mut self) -> Result<Frame, DetectorError> {
        let len = self.stream.read_u32().await?;
        if len == 0 || len > self.config.max_payload_bytes {
            return Err(DetectorError::PayloadSize {
                got: len,
                max: self.config.max_payload_bytes,
            });
        }
        let len = len as usize;

        let mut payload = BytesMut::with_capacity(len);
        let mut chunk = vec![0u8; READ_CHUNK.min(len)];
        while payload.len() < len {
            // Never read past the payload: the next header byte may already
            // be queued behind it.
            let want = (len - payload.len()).min(chunk.len());
            let n = self.stream.read(&mut chunk[..want]).await?;
            if n == 0 {
                return Err(DetectorError::Protocol(Error::new(
                    ErrorKind::UnexpectedEof,
                    "peer closed the connection mid-payload",
                )));
            }
            payload.extend_from_slice(&chunk[..n]);
        }
        debug!(bytes = len, "frame payload received");

        Ok(Frame::decode(&payload)?)
    }
}
