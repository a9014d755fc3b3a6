//! Catalog item ingestion pipeline
//!
//! Turns a submitted form (fields + staged image files) into a persisted
//! record with remotely hosted image URLs:
//!
//! 1. [`staging`] — validate and queue assets, with local preview files
//! 2. [`uploader`] — drive sequential uploads through the media store
//! 3. [`controller`] — the submission state machine, deletion flows,
//!    transient status and the live mirror
//! 4. [`projection`] — pure display projections over the mirror

pub mod controller;
pub mod forms;
pub mod projection;
pub mod staging;
pub mod uploader;

pub use controller::{
    IngestError, IngestionController, Outcome, Phase, StagedAsset, StatusBanner, StatusKind,
};
pub use forms::{HeroDraft, ProductDraft, RecordForm, StoredRecord};
pub use staging::{PendingUpload, StageError, StagingArea, MAX_FILE_SIZE};
pub use uploader::commit_all;
