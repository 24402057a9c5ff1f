// src/logging/logger.rs

use std::io::Write;
use std::sync::Arc;

use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::task;
use tokio::time::{self, Duration};
use tracing_appender::rolling;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::MakeWriter;

/// Batched async writer for per-request delivery records.
///
/// Serve and track handlers push one JSON line per event into a bounded
/// channel; a background task flushes to an hourly rolling file when the
/// batch fills or on a timer tick, so the request path never waits on disk.
pub struct DeliveryLogger {
    sender: Sender<String>,
}

impl DeliveryLogger {
    pub fn new(
        log_dir: &str,
        file_prefix: &str,
        buffer_size: usize,
        batch_size: usize,
        flush_interval_ms: u64,
    ) -> Arc<Self> {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let file_name = format!("{}.json", file_prefix);
        let log_file = Arc::new(rolling::hourly(log_dir, &file_name));

        tokio::spawn(Self::background_writer(
            log_file,
            receiver,
            batch_size,
            flush_interval_ms,
        ));

        Arc::new(Self { sender })
    }

    /// Queues one record. A full channel drops the record rather than
    /// backpressuring the request path.
    pub fn log(&self, record: String) {
        if let Err(e) = self.sender.try_send(record) {
            tracing::warn!("delivery log record dropped: {}", e);
        }
    }

    async fn background_writer(
        log_file: Arc<RollingFileAppender>,
        mut receiver: Receiver<String>,
        batch_size: usize,
        flush_interval_ms: u64,
    ) {
        let mut buffer: Vec<String> = Vec::new();
        let mut interval = time::interval(Duration::from_millis(flush_interval_ms));

        loop {
            tokio::select! {
                entry = receiver.recv() => {
                    match entry {
                        Some(record) => {
                            buffer.push(record);
                            if buffer.len() >= batch_size {
                                Self::flush(log_file.clone(), &mut buffer).await;
                            }
                        }
                        // All senders gone: final flush, then stop.
                        None => {
                            if !buffer.is_empty() {
                                Self::flush(log_file.clone(), &mut buffer).await;
                            }
                            break;
                        }
                    }
                }
                _ = interval.tick() => {
                    if !buffer.is_empty() {
                        Self::flush(log_file.clone(), &mut buffer).await;
                    }
                }
            }
        }
    }

    async fn flush(file: Arc<RollingFileAppender>, buffer: &mut Vec<String>) {
        let content = buffer.join("\n") + "\n";
        buffer.clear();

        let res = task::spawn_blocking(move || {
            let mut writer = file.make_writer();
            writer.write_all(content.as_bytes())
        })
        .await;

        match res {
            Ok(Err(e)) => tracing::error!("failed to write delivery logs: {}", e),
            Err(e) => tracing::error!("delivery log writer task failed: {}", e),
            Ok(Ok(())) => {}
        }
    }

    /// Gives the background task a moment to drain what is already queued.
    pub async fn shutdown(&self) {
        time::sleep(Duration::from_secs(1)).await;
    }
}
