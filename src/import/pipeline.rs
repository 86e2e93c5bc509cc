use std::path::PathBuf;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::error::{PortalError, Result};
use crate::import::source::read_students_csv;
use crate::store::{RecordStore, Student};

/// A fully parsed source handed to the consumer.
#[derive(Debug)]
struct SourceBatch {
    source: PathBuf,
    students: Vec<Student>,
}

/// A source whose batch was dropped because it could not be read.
#[derive(Debug, Clone, Serialize)]
pub struct SourceFailure {
    pub source: PathBuf,
    pub reason: String,
}

/// Outcome of an import in which every delivered record was registered.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    /// Records registered across all merged sources
    pub imported: usize,
    /// Sources merged, in arrival order
    pub merged_sources: Vec<PathBuf>,
    /// Sources dropped on a read error
    pub failed_sources: Vec<SourceFailure>,
}

/// Fan-out/fan-in bulk import into a [`RecordStore`].
///
/// Every source is read by its own task. Parsed batches are funneled through
/// one channel to a single consumer that registers records one at a time, so
/// the store only ever sees sequential `register` calls from the pipeline.
#[derive(Debug, Clone)]
pub struct ImportPipeline {
    store: RecordStore,
}

impl ImportPipeline {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Import all `sources` concurrently.
    ///
    /// Batch arrival order across sources is not deterministic; order within
    /// a source is preserved. The first registration failure aborts the
    /// import and is returned; records registered before it stay. Unreadable
    /// sources are dropped whole and listed in the report.
    ///
    /// Returns only after every reader task has finished.
    pub async fn import(&self, sources: &[PathBuf]) -> Result<ImportReport> {
        if sources.is_empty() {
            return Ok(ImportReport::default());
        }

        // One slot per source: a reader can always hand off its batch, even
        // after the consumer has stopped.
        let (batch_tx, mut batch_rx) = mpsc::channel::<SourceBatch>(sources.len());
        let mut readers = JoinSet::new();

        for source in sources {
            let batch_tx = batch_tx.clone();
            let source = source.clone();
            readers.spawn(async move {
                match read_students_csv(&source).await {
                    Ok(students) => {
                        tracing::debug!(
                            source = %source.display(),
                            records = students.len(),
                            "Source read"
                        );
                        // Fails only if the consumer aborted; the batch is discarded.
                        let _ = batch_tx.send(SourceBatch { source, students }).await;
                        None
                    }
                    Err(e) => {
                        tracing::warn!(
                            source = %source.display(),
                            error = %e,
                            "Dropping unreadable source"
                        );
                        Some(SourceFailure {
                            source,
                            reason: e.to_string(),
                        })
                    }
                }
            });
        }
        drop(batch_tx);

        let consumed = self.consume(&mut batch_rx).await;
        drop(batch_rx);

        let mut failed_sources = Vec::new();
        let mut join_error = None;
        while let Some(joined) = readers.join_next().await {
            match joined {
                Ok(Some(failure)) => failed_sources.push(failure),
                Ok(None) => {}
                Err(e) => {
                    tracing::error!(error = %e, "Import reader task failed");
                    if join_error.is_none() {
                        join_error = Some(e.to_string());
                    }
                }
            }
        }

        let (imported, merged_sources) = consumed?;
        if let Some(e) = join_error {
            return Err(PortalError::Internal(format!(
                "import reader task failed: {}",
                e
            )));
        }

        tracing::info!(
            imported,
            merged = merged_sources.len(),
            failed = failed_sources.len(),
            "Import finished"
        );

        Ok(ImportReport {
            imported,
            merged_sources,
            failed_sources,
        })
    }

    /// Drain batches until every sender is gone or a registration fails.
    async fn consume(
        &self,
        batch_rx: &mut mpsc::Receiver<SourceBatch>,
    ) -> Result<(usize, Vec<PathBuf>)> {
        let mut imported = 0;
        let mut merged = Vec::new();

        while let Some(batch) = batch_rx.recv().await {
            for student in &batch.students {
                if let Err(e) = self
                    .store
                    .register(&student.id, &student.name, &student.study_program)
                    .await
                {
                    tracing::warn!(
                        source = %batch.source.display(),
                        id = %student.id,
                        imported,
                        error = %e,
                        "Import aborted"
                    );
                    return Err(e);
                }
                imported += 1;
            }
            merged.push(batch.source);
        }

        Ok((imported, merged))
    }
}
