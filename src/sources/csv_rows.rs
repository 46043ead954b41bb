//! CSV row streaming.
//!
//! Parsing runs on a blocking task and hands rows to the async side through a bounded
//! channel, so a slow sink applies back-pressure to the reader.

use crate::core::RowRecord;
use crate::error::{Error, Result};
use std::io::Read;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Rows buffered between the CSV reader and the pipeline
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Header-first, single-pass stream of CSV rows
pub struct RowStream {
    receiver: mpsc::Receiver<Result<RowRecord>>,
    reader: Option<JoinHandle<()>>,
}

impl RowStream {
    /// Parse `reader` as CSV with a header line. Must be called inside a tokio runtime.
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Self::with_capacity(reader, DEFAULT_CHANNEL_CAPACITY)
    }

    pub fn with_capacity<R: Read + Send + 'static>(reader: R, capacity: usize) -> Self {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let handle = tokio::task::spawn_blocking(move || read_csv(reader, &sender));
        Self { receiver, reader: Some(handle) }
    }

    /// Stream over rows that are already in memory
    pub fn from_rows(rows: Vec<RowRecord>) -> Self {
        let (sender, receiver) = mpsc::channel(rows.len().max(1));
        for row in rows {
            // capacity covers every row
            let _ = sender.try_send(Ok(row));
        }
        Self { receiver, reader: None }
    }

    /// Next row, `Ok(None)` at the end of the stream
    pub async fn next_row(&mut self) -> Result<Option<RowRecord>> {
        match self.receiver.recv().await {
            Some(row) => row.map(Some),
            None => {
                if let Some(handle) = self.reader.take() {
                    handle
                        .await
                        .map_err(|e| Error::SourceFetch(format!("CSV reader failed: {}", e)))?;
                }
                Ok(None)
            }
        }
    }

    /// Stop reading; rows not yet consumed are dropped
    pub fn close(&mut self) {
        self.receiver.close();
    }
}

fn read_csv<R: Read>(reader: R, sender: &mpsc::Sender<Result<RowRecord>>) {
    let mut csv = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let header = match csv.headers() {
        Ok(headers) => Arc::new(
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| if i == 0 { h.trim_start_matches('\u{feff}') } else { h })
                .map(|h| h.trim().to_string())
                .collect::<Vec<_>>(),
        ),
        Err(e) => {
            let _ = sender.blocking_send(Err(e.into()));
            return;
        }
    };

    for record in csv.records() {
        let row = record
            .map(|r| RowRecord::new(Arc::clone(&header), r.iter().map(String::from).collect()))
            .map_err(Error::from);
        let failed = row.is_err();
        // a closed channel means the pipeline stopped consuming
        if sender.blocking_send(row).is_err() || failed {
            return;
        }
    }
}
