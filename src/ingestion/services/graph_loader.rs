use crate::ingestion::domain::{DocumentId, GraphSnapshot, Statement};
use crate::shared::error::{DocumentFailure, IngestError};

/// One document's converted statements, or the error that prevented conversion.
#[derive(Debug)]
pub struct DocumentBatch {
    pub document: DocumentId,
    pub statements: Result<Vec<Statement>, IngestError>,
}

impl DocumentBatch {
    pub fn converted(document: DocumentId, statements: Vec<Statement>) -> Self {
        Self {
            document,
            statements: Ok(statements),
        }
    }

    pub fn failed(document: DocumentId, error: IngestError) -> Self {
        Self {
            document,
            statements: Err(error),
        }
    }
}

/// What the loader does after a document fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadDecision {
    /// Skip the document and keep folding
    Continue,
    /// Stop; the last good snapshot is returned
    Abort,
}

/// Result of folding a sequence of batches.
#[derive(Debug)]
pub struct LoadOutcome {
    /// Last successfully merged snapshot
    pub snapshot: GraphSnapshot,
    pub failures: Vec<DocumentFailure>,
    /// Documents merged, in merge order
    pub merged: Vec<DocumentId>,
    pub aborted: bool,
}

impl LoadOutcome {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// TransactionalGraphLoader folding documents into a graph, one transaction each
///
/// The fold is strictly sequential: every merge reads the snapshot produced by
/// the previous successful merge. A failing document is wrapped with its
/// identifier and recorded, and the fold continues from the last good
/// snapshot unless the caller asks to abort.
pub struct TransactionalGraphLoader<M> {
    merge: M,
}

impl<M> TransactionalGraphLoader<M>
where
    M: Fn(&GraphSnapshot, &[Statement]) -> Result<GraphSnapshot, IngestError>,
{
    /// Creates a loader around a merge function, usually a graph store
    /// bound to the schema registry of the current run.
    pub fn new(merge: M) -> Self {
        Self { merge }
    }

    /// Folds every batch, skipping failed documents.
    pub fn load<I>(&self, initial: GraphSnapshot, batches: I) -> LoadOutcome
    where
        I: IntoIterator<Item = DocumentBatch>,
    {
        self.load_with(initial, batches, |_| LoadDecision::Continue)
    }

    /// Folds batches, asking `decide` what to do after each failure.
    pub fn load_with<I, D>(&self, initial: GraphSnapshot, batches: I, mut decide: D) -> LoadOutcome
    where
        I: IntoIterator<Item = DocumentBatch>,
        D: FnMut(&DocumentFailure) -> LoadDecision,
    {
        let mut outcome = LoadOutcome {
            snapshot: initial,
            failures: Vec::new(),
            merged: Vec::new(),
            aborted: false,
        };

        for batch in batches {
            let DocumentBatch {
                document,
                statements,
            } = batch;

            let merged = statements.and_then(|statements| (self.merge)(&outcome.snapshot, &statements));

            match merged {
                Ok(snapshot) => {
                    outcome.snapshot = snapshot;
                    outcome.merged.push(document);
                }
                Err(error) => {
                    let failure = DocumentFailure::new(document, error);
                    let decision = decide(&failure);
                    outcome.failures.push(failure);
                    if decision == LoadDecision::Abort {
                        outcome.aborted = true;
                        break;
                    }
                }
            }
        }

        outcome
    }
}
