//! Output streamer
//!
//! Forwards a job's live output to local stdout while the polling loop
//! runs. The engine multiplexes stdout and stderr into length-prefixed
//! frames when the task has no TTY; the streamer demultiplexes them so
//! payload bytes land on stdout whole and in order, never split mid-frame.
//!
//! Attachment failure degrades to "no streaming" with a warning; it must
//! never fail the observation of the job itself.

use async_trait::async_trait;
use std::sync::Arc;
use swarmwatch_client::{ClientError, EngineClient, LogStream};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Attaches to a job's log stream
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Opens a follow-mode byte stream of the service's output
    ///
    /// The stream closes naturally once the engine has delivered all
    /// output for a terminal task.
    ///
    /// # Arguments
    /// * `service_id` - The engine service id
    async fn attach(&self, service_id: &str) -> Result<LogStream, ClientError>;
}

/// Engine-backed implementation of [`LogSource`]
pub struct EngineLogSource {
    client: Arc<EngineClient>,
}

impl EngineLogSource {
    /// Creates a log source over an engine client
    pub fn new(client: Arc<EngineClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LogSource for EngineLogSource {
    async fn attach(&self, service_id: &str) -> Result<LogStream, ClientError> {
        self.client.service_logs(service_id, true).await
    }
}

/// Concurrent log forwarding for one job
pub struct OutputStreamer;

impl OutputStreamer {
    /// Spawns the forwarding task
    ///
    /// The returned handle is joined with a short grace period after a
    /// terminal classification, and abandoned on timeout. The task itself
    /// never reports failure upward; attach and read errors are logged.
    pub fn spawn(source: Arc<dyn LogSource>, service_id: String) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut stream = match source.attach(&service_id).await {
                Ok(stream) => stream,
                Err(e) => {
                    warn!(
                        "could not attach to logs for service {}, continuing without log display: {}",
                        service_id, e
                    );
                    return;
                }
            };

            debug!("attached to log stream for service {}", service_id);

            let mut stdout = tokio::io::stdout();
            if let Err(e) = copy_frames(&mut stream, &mut stdout).await {
                warn!("log stream for service {} failed: {}", service_id, e);
            }
        })
    }
}

/// Copies a multiplexed log stream to a writer, frame by frame
///
/// Each frame is an 8-byte header (stream type, three zero bytes, payload
/// length as big-endian u32) followed by the payload. Both stdout and
/// stderr payloads are forwarded. If the first bytes do not look like a
/// frame header the stream is treated as raw (TTY mode) and copied
/// verbatim. A stream that ends mid-frame is logged and treated as closed.
pub(crate) async fn copy_frames<R, W>(reader: &mut R, writer: &mut W) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut header = [0u8; 8];

    let filled = read_up_to(reader, &mut header).await?;
    if filled == 0 {
        return Ok(());
    }

    if filled < header.len() || !is_frame_header(&header) {
        // Raw stream: forward what was consumed probing for a header,
        // then copy the rest through.
        writer.write_all(&header[..filled]).await?;
        tokio::io::copy(reader, writer).await?;
        writer.flush().await?;
        return Ok(());
    }

    loop {
        let len = u32::from_be_bytes([header[4], header[5], header[6], header[7]]) as usize;

        if len > 0 {
            let mut payload = vec![0u8; len];
            match reader.read_exact(&mut payload).await {
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    warn!("log stream ended mid-frame");
                    return writer.flush().await;
                }
                Err(e) => return Err(e),
            }

            writer.write_all(&payload).await?;
            writer.flush().await?;
        }

        match read_up_to(reader, &mut header).await? {
            0 => return Ok(()),
            n if n == header.len() => continue,
            _ => {
                warn!("log stream ended mid-header");
                return Ok(());
            }
        }
    }
}

/// Reads until the buffer is full or the stream ends, returning the count
async fn read_up_to<R>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize>
where
    R: AsyncRead + Unpin,
{
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

/// A frame header starts with a stream type (0..=2) and three zero bytes
fn is_frame_header(header: &[u8; 8]) -> bool {
    matches!(header[0], 0..=2) && header[1] == 0 && header[2] == 0 && header[3] == 0
}
