//! Pipeline driver.
//!
//! A run moves through `Idle → CatalogFetched → MetadataEmitted → Streaming → Done`,
//! or to `Failed` from any stage. Output order is fixed: metadata triples, then the
//! DSD once the sampled rows are known, then one observation per row in stream order.

use crate::config::Configuration;
use crate::core::RowRecord;
use crate::encoding::{encode_metadata, ObservationEncoder};
use crate::error::{Error, Result};
use crate::schema::infer_schema_from_sample;
use crate::sink::TripleSink;
use crate::sources::csv_rows::DEFAULT_CHANNEL_CAPACITY;
use crate::sources::{DataSource, RowStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    CatalogFetched,
    MetadataEmitted,
    Streaming,
    Done,
    Failed(String),
}

/// Counters of a finished run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub metadata_triples: u64,
    pub dsd_components: usize,
    pub dsd_triples: u64,
    pub observations: u64,
    pub observation_triples: u64,
    pub elapsed_seconds: f64,
}

impl RunSummary {
    pub fn total_triples(&self) -> u64 {
        self.metadata_triples + self.dsd_triples + self.observation_triples
    }

    pub fn rows_per_second(&self) -> f64 {
        if self.elapsed_seconds > 0.0 {
            self.observations as f64 / self.elapsed_seconds
        } else {
            0.0
        }
    }
}

pub struct Pipeline {
    config: Configuration,
    source: Box<dyn DataSource>,
    state: PipelineState,
    should_stop: Arc<AtomicBool>,
}

impl Pipeline {
    pub fn new(config: Configuration, source: impl DataSource + 'static) -> Self {
        Self {
            config,
            source: Box::new(source),
            state: PipelineState::Idle,
            should_stop: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Flag that stops the run before the next row when set
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.should_stop)
    }

    /// Execute the run. The sink is finished only when the row stream ended without error.
    pub async fn run(&mut self, sink: &mut dyn TripleSink) -> Result<RunSummary> {
        if self.state != PipelineState::Idle {
            return Err(Error::Config(format!("pipeline cannot start from {:?}", self.state)));
        }

        match self.execute(sink).await {
            Ok(summary) => {
                self.state = PipelineState::Done;
                log::info!(
                    "Done: {} observations, {} triples in {:.2}s",
                    summary.observations,
                    summary.total_triples(),
                    summary.elapsed_seconds
                );
                Ok(summary)
            }
            Err(err) => {
                self.state = PipelineState::Failed(err.to_string());
                sink.report_error(&err);
                Err(err)
            }
        }
    }

    async fn execute(&mut self, sink: &mut dyn TripleSink) -> Result<RunSummary> {
        let start = Instant::now();
        let mut summary = RunSummary::default();

        self.config.validate()?;
        log::info!("Converting dataset {}", self.config.dataset_id);
        log::debug!("{:?}", self.config);

        let descriptor = self.source.fetch_catalog(&self.config.dataset_id).await?;
        self.transition(PipelineState::CatalogFetched);

        log::info!("Adding dataset definition...");
        let metadata = encode_metadata(&descriptor, &self.config)?;
        summary.metadata_triples = metadata.len() as u64;
        sink.emit_all(metadata)?;
        self.transition(PipelineState::MetadataEmitted);

        let mut rows = self.source.open_rows(&descriptor).await?;
        self.transition(PipelineState::Streaming);

        let sample = self.read_sample(&mut rows).await?;

        log::info!("Generating data structure definition...");
        let schema = infer_schema_from_sample(&sample, &self.config)?;
        let dsd = schema.triples();
        summary.dsd_components = schema.components.len();
        summary.dsd_triples = dsd.len() as u64;
        sink.emit_all(dsd)?;

        log::info!("Adding observations...");
        let encoder = ObservationEncoder::new(&self.config, &schema)?;
        let mut index = 0u64;
        for row in sample {
            check_stop(&self.should_stop, &mut rows)?;
            index += 1;
            emit_observation(&encoder, &row, index, &mut summary, sink)?;
        }
        loop {
            check_stop(&self.should_stop, &mut rows)?;
            let Some(row) = rows.next_row().await? else {
                break;
            };
            index += 1;
            emit_observation(&encoder, &row, index, &mut summary, sink)?;
        }

        sink.finish()?;
        summary.elapsed_seconds = start.elapsed().as_secs_f64();
        Ok(summary)
    }

    /// Rows the DSD is inferred from. They are encoded afterwards like any other row.
    async fn read_sample(&self, rows: &mut RowStream) -> Result<Vec<RowRecord>> {
        let mut sample =
            Vec::with_capacity(self.config.inference_sample_rows.min(DEFAULT_CHANNEL_CAPACITY));
        while sample.len() < self.config.inference_sample_rows {
            check_stop(&self.should_stop, rows)?;
            match rows.next_row().await? {
                Some(row) => sample.push(row),
                None => break,
            }
        }
        if sample.is_empty() {
            log::warn!("Dataset {} has no rows", self.config.dataset_id);
        }
        Ok(sample)
    }

    fn transition(&mut self, next: PipelineState) {
        log::debug!("Pipeline {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

fn emit_observation(
    encoder: &ObservationEncoder<'_>,
    row: &RowRecord,
    index: u64,
    summary: &mut RunSummary,
    sink: &mut dyn TripleSink,
) -> Result<()> {
    let triples = encoder.encode(row, index)?;
    summary.observations += 1;
    summary.observation_triples += triples.len() as u64;
    if summary.observations % 10_000 == 0 {
        log::info!("{} observations added", summary.observations);
    }
    sink.emit_all(triples)
}

fn check_stop(should_stop: &AtomicBool, rows: &mut RowStream) -> Result<()> {
    if should_stop.load(Ordering::Relaxed) {
        rows.close();
        return Err(Error::Cancelled);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DatasetDescriptor;
    use crate::sink::MemorySink;
    use async_trait::async_trait;

    struct StaticSource {
        rows: Vec<RowRecord>,
    }

    #[async_trait]
    impl DataSource for StaticSource {
        async fn fetch_catalog(&self, dataset_id: &str) -> Result<DatasetDescriptor> {
            Ok(DatasetDescriptor {
                name: dataset_id.to_string(),
                title: "Test".to_string(),
                ..DatasetDescriptor::default()
            })
        }

        async fn open_rows(&self, _descriptor: &DatasetDescriptor) -> Result<RowStream> {
            Ok(RowStream::from_rows(self.rows.clone()))
        }
    }

    struct FailingSource;

    #[async_trait]
    impl DataSource for FailingSource {
        async fn fetch_catalog(&self, _dataset_id: &str) -> Result<DatasetDescriptor> {
            Err(Error::SourceFetch("catalog unavailable".to_string()))
        }

        async fn open_rows(&self, _descriptor: &DatasetDescriptor) -> Result<RowStream> {
            unreachable!("rows are never opened after a failed fetch")
        }
    }

    fn rows(n: usize) -> Vec<RowRecord> {
        (0..n)
            .map(|i| RowRecord::from_pairs([("tahun", "2020".to_string()), ("nilai", i.to_string())]))
            .collect()
    }

    #[tokio::test]
    async fn test_run_reaches_done() {
        let mut pipeline = Pipeline::new(Configuration::new("uji"), StaticSource { rows: rows(3) });
        let mut sink = MemorySink::new();
        let summary = pipeline.run(&mut sink).await.unwrap();

        assert_eq!(pipeline.state(), &PipelineState::Done);
        assert!(sink.finished);
        assert_eq!(summary.observations, 3);
        assert_eq!(summary.dsd_components, 2);
        assert_eq!(summary.total_triples(), sink.triples.len() as u64);
    }

    #[tokio::test]
    async fn test_missing_dataset_fails_before_fetch() {
        let mut pipeline = Pipeline::new(Configuration::new(""), FailingSource);
        let mut sink = MemorySink::new();
        let err = pipeline.run(&mut sink).await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(matches!(pipeline.state(), PipelineState::Failed(_)));
        assert!(sink.triples.is_empty());
        assert_eq!(sink.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_error_is_propagated() {
        let mut pipeline = Pipeline::new(Configuration::new("uji"), FailingSource);
        let mut sink = MemorySink::new();
        let err = pipeline.run(&mut sink).await.unwrap_err();
        assert!(matches!(err, Error::SourceFetch(_)));
        assert!(!sink.finished);
    }

    #[tokio::test]
    async fn test_stop_flag_cancels_without_finishing() {
        let mut pipeline = Pipeline::new(Configuration::new("uji"), StaticSource { rows: rows(3) });
        pipeline.stop_handle().store(true, Ordering::Relaxed);
        let mut sink = MemorySink::new();
        let err = pipeline.run(&mut sink).await.unwrap_err();
        assert!(matches!(err, Error::Cancelled));
        assert!(!sink.finished);
        // metadata emitted before streaming is kept
        assert!(!sink.triples.is_empty());
    }

    #[tokio::test]
    async fn test_pipeline_runs_once() {
        let mut pipeline = Pipeline::new(Configuration::new("uji"), StaticSource { rows: rows(1) });
        let mut sink = MemorySink::new();
        pipeline.run(&mut sink).await.unwrap();
        assert!(matches!(pipeline.run(&mut sink).await, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_huge_sample_size_reads_whole_stream() {
        let config = Configuration::new("uji").with_inference_sample_rows(usize::MAX);
        let mut pipeline = Pipeline::new(config, StaticSource { rows: rows(3) });
        let mut sink = MemorySink::new();
        let summary = pipeline.run(&mut sink).await.unwrap();
        assert_eq!(summary.observations, 3);
        assert!(sink.finished);
    }

    #[tokio::test]
    async fn test_empty_stream() {
        let mut pipeline = Pipeline::new(Configuration::new("uji"), StaticSource { rows: vec![] });
        let mut sink = MemorySink::new();
        let summary = pipeline.run(&mut sink).await.unwrap();
        assert_eq!(summary.observations, 0);
        assert_eq!(summary.dsd_components, 0);
        assert!(sink.finished);
    }
}
