//! Catalog ingestion controller
//!
//! One controller per admin form (products, heroes). Owns the draft, the
//! staged assets, the submission state machine, the two-phase deletion
//! flow, the transient status banner and the live mirror of its collection.
//!
//! Submission phases: Editing → Validating → Uploading → Persisting →
//! Settled(success|failure). Settled clears back to Editing together with
//! the status banner. Every failure becomes a transient banner; nothing
//! here is fatal.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use crate::db::live::{CollectionFeed, Snapshot};
use crate::db::repository::RecordStore;
use crate::media::{MediaError, MediaStore};

use super::forms::{RecordForm, StoredRecord};
use super::projection::filter_by_query;
use super::staging::{StageError, StagingArea};
use super::uploader::commit_all;

/// Submission outcome once settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// Controller phase for the current submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Editing,
    Validating,
    Uploading,
    Persisting,
    Settled(Outcome),
}

/// Transient user-facing status kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Error,
    Info,
}

/// Transient user-facing status banner
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct StatusBanner {
    pub kind: StatusKind,
    pub message: String,
}

/// Ingestion errors as surfaced to the caller
///
/// Every variant is also turned into a status banner; none of them crash
/// anything.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error(transparent)]
    Upload(#[from] MediaError),

    #[error("Persistence failed: {0}")]
    Persistence(String),

    #[error("Deletion failed: {0}")]
    Deletion(String),

    #[error(transparent)]
    Stage(#[from] StageError),
}

/// What a confirm step would delete
#[derive(Debug, Clone, PartialEq, Eq)]
enum DeleteTarget {
    One(String),
    All,
}

/// Info about a freshly staged asset
#[derive(Debug, Clone, serde::Serialize)]
pub struct StagedAsset {
    pub index: usize,
    pub id: Uuid,
    pub file_name: String,
    pub preview_path: PathBuf,
}

struct FormState<F: RecordForm> {
    draft: F,
    staging: StagingArea,
    phase: Phase,
}

struct StatusSlot {
    banner: Option<StatusBanner>,
    generation: u64,
}

pub struct IngestionController<F: RecordForm> {
    store: Arc<dyn RecordStore<F::Record>>,
    media: Arc<dyn MediaStore>,
    form: Mutex<FormState<F>>,
    mirror: RwLock<Snapshot<F::Stored>>,
    pending_delete: Mutex<Option<DeleteTarget>>,
    status: Mutex<StatusSlot>,
    status_clear: Duration,
}

impl<F: RecordForm> IngestionController<F> {
    pub fn new(
        store: Arc<dyn RecordStore<F::Record>>,
        media: Arc<dyn MediaStore>,
        staging_dir: PathBuf,
        status_clear: Duration,
    ) -> std::io::Result<Self> {
        let staging = StagingArea::new(staging_dir, F::image_slots())?;
        Ok(Self {
            store,
            media,
            form: Mutex::new(FormState {
                draft: F::default(),
                staging,
                phase: Phase::Editing,
            }),
            mirror: RwLock::new(Snapshot {
                version: 0,
                records: Arc::new(Vec::new()),
            }),
            pending_delete: Mutex::new(None),
            status: Mutex::new(StatusSlot {
                banner: None,
                generation: 0,
            }),
            status_clear,
        })
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Replace the whole draft (the form posts all fields at once)
    pub fn update_draft(&self, draft: F) {
        self.form.lock().draft = draft;
    }

    pub fn phase(&self) -> Phase {
        self.form.lock().phase
    }

    pub fn staged_count(&self) -> usize {
        self.form.lock().staging.len()
    }

    /// Validate and stage one asset
    pub fn stage_asset(
        self: &Arc<Self>,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<StagedAsset, StageError> {
        let mut form = self.form.lock();
        match form.staging.stage(file_name, content_type, bytes) {
            Ok(pending) => {
                let id = pending.id;
                let file_name = pending.file_name.clone();
                let preview_path = pending.preview.path().to_path_buf();
                Ok(StagedAsset {
                    index: form.staging.len() - 1,
                    id,
                    file_name,
                    preview_path,
                })
            }
            Err(err) => {
                drop(form);
                self.set_status(StatusKind::Error, err.to_string());
                Err(err)
            }
        }
    }

    /// Remove one staged asset, releasing its preview
    pub fn remove_asset(&self, index: usize) -> Result<(), StageError> {
        self.form.lock().staging.remove_at(index)
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Run one submission through the state machine
    ///
    /// Returns the new record's id on success. Validation short-circuits
    /// before any network effect; staged assets survive a failed attempt
    /// (with their upload bookkeeping) so a retry resumes instead of
    /// restarting.
    pub async fn submit(self: &Arc<Self>) -> Result<String, IngestError> {
        // Validating — no lock across await points below
        let (draft, mut pending) = {
            let mut form = self.form.lock();
            form.phase = Phase::Validating;
            let issues = form.draft.validate(form.staging.len());
            if !issues.is_empty() {
                form.phase = Phase::Editing;
                drop(form);
                let err = IngestError::Validation(issues);
                self.set_status(StatusKind::Error, err.to_string());
                return Err(err);
            }
            form.phase = Phase::Uploading;
            (form.draft.clone(), form.staging.take_all())
        };

        // Uploading — sequential, aborts on first failure
        let urls = match commit_all(self.media.as_ref(), &mut pending).await {
            Ok(urls) => urls,
            Err(err) => {
                let mut form = self.form.lock();
                form.staging.restore(pending);
                form.phase = Phase::Settled(Outcome::Failure);
                drop(form);
                self.set_status(StatusKind::Error, format!("Image upload failed: {err}"));
                return Err(err.into());
            }
        };

        // Persisting
        self.form.lock().phase = Phase::Persisting;
        let record = draft.build(urls);
        match self.store.create(record).await {
            Ok(id) => {
                let mut form = self.form.lock();
                // Previews are released here, exactly once per asset
                for asset in pending {
                    asset.preview.release();
                }
                form.draft = F::default();
                form.phase = Phase::Settled(Outcome::Success);
                drop(form);
                self.set_status(
                    StatusKind::Success,
                    format!("{} added successfully!", capitalized(F::LABEL)),
                );
                Ok(id)
            }
            Err(err) => {
                // Uploads already on the remote host stay there (stranded)
                let mut form = self.form.lock();
                form.staging.restore(pending);
                form.phase = Phase::Settled(Outcome::Failure);
                drop(form);
                let err = IngestError::Persistence(err.to_string());
                self.set_status(
                    StatusKind::Error,
                    format!("Failed to save {}. Try again.", F::LABEL),
                );
                Err(err)
            }
        }
    }

    // =========================================================================
    // Deletion (two-phase)
    // =========================================================================

    /// First phase: mark one record for deletion
    pub fn request_delete(&self, id: impl Into<String>) {
        *self.pending_delete.lock() = Some(DeleteTarget::One(id.into()));
    }

    /// First phase, bulk: mark every record in the mirror for deletion
    ///
    /// With an empty mirror this is a no-op surfaced as an informational
    /// banner, and no confirm step is armed.
    pub fn request_delete_all(self: &Arc<Self>) -> bool {
        if self.mirror.read().records.is_empty() {
            self.set_status(
                StatusKind::Info,
                format!("No {} to delete.", F::LABEL_PLURAL),
            );
            return false;
        }
        *self.pending_delete.lock() = Some(DeleteTarget::All);
        true
    }

    /// Abandon the pending deletion
    pub fn cancel_delete(&self) {
        *self.pending_delete.lock() = None;
    }

    /// Second phase: execute the pending deletion
    ///
    /// Without a pending request this does nothing. Failures surface as a
    /// transient error banner and are never fatal.
    pub async fn confirm_delete(self: &Arc<Self>) -> Result<(), IngestError> {
        let target = self.pending_delete.lock().take();
        let Some(target) = target else {
            return Ok(());
        };

        let result = match &target {
            DeleteTarget::One(id) => self.store.delete(id).await,
            DeleteTarget::All => {
                let ids: Vec<String> = self
                    .mirror
                    .read()
                    .records
                    .iter()
                    .map(|r| r.id_string())
                    .collect();
                self.store.delete_batch(&ids).await
            }
        };

        match result {
            Ok(()) => {
                let message = match target {
                    DeleteTarget::One(_) => {
                        format!("{} deleted successfully!", capitalized(F::LABEL))
                    }
                    DeleteTarget::All => format!("All {} deleted", F::LABEL_PLURAL),
                };
                self.set_status(StatusKind::Success, message);
                Ok(())
            }
            Err(err) => {
                self.set_status(
                    StatusKind::Error,
                    format!("Failed to delete {}", F::LABEL),
                );
                Err(IngestError::Deletion(err.to_string()))
            }
        }
    }

    // =========================================================================
    // Live mirror and projections
    // =========================================================================

    /// Replace the local mirror wholesale (one snapshot push)
    ///
    /// After a lagged receiver jumps to the latest snapshot, older pushes
    /// still buffered in the channel arrive behind it; anything not newer
    /// than the current mirror is dropped. Returns whether it applied.
    pub fn apply_snapshot(&self, snapshot: Snapshot<F::Stored>) -> bool {
        let mut mirror = self.mirror.write();
        if snapshot.version < mirror.version {
            tracing::debug!(
                current = mirror.version,
                stale = snapshot.version,
                "Dropping stale collection snapshot"
            );
            return false;
        }
        *mirror = snapshot;
        true
    }

    pub fn mirror(&self) -> Arc<Vec<F::Stored>> {
        self.mirror.read().records.clone()
    }

    /// Case-insensitive substring filter over the mirror
    pub fn search(&self, query: &str) -> Vec<F::Stored> {
        filter_by_query(&self.mirror(), query)
    }

    /// Mirror the collection feed until the controller or the feed goes away
    ///
    /// The subscription detaches exactly once, when the task ends.
    pub fn attach(
        self: &Arc<Self>,
        feed: &Arc<CollectionFeed<F::Stored>>,
    ) -> tokio::task::JoinHandle<()> {
        let (initial, mut subscription) = feed.subscribe();
        self.apply_snapshot(initial);

        let weak = Arc::downgrade(self);
        tokio::spawn(async move {
            while let Some(snapshot) = subscription.recv().await {
                match weak.upgrade() {
                    Some(controller) => {
                        controller.apply_snapshot(snapshot);
                    }
                    None => break,
                }
            }
            // subscription drops here → unsubscribed
        })
    }

    // =========================================================================
    // Status banner
    // =========================================================================

    pub fn status(&self) -> Option<StatusBanner> {
        self.status.lock().banner.clone()
    }

    /// Show a banner and arm its self-clear timer
    ///
    /// The timer is generation-guarded: an expired timer never wipes a
    /// banner newer than the one it was armed for.
    fn set_status(self: &Arc<Self>, kind: StatusKind, message: String) {
        let generation = {
            let mut slot = self.status.lock();
            slot.generation += 1;
            slot.banner = Some(StatusBanner { kind, message });
            slot.generation
        };

        // Outside a runtime (plain unit tests) the banner simply stays up
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let weak = Arc::downgrade(self);
        let clear_after = self.status_clear;
        handle.spawn(async move {
            tokio::time::sleep(clear_after).await;
            let Some(controller) = weak.upgrade() else {
                return;
            };
            let mut slot = controller.status.lock();
            if slot.generation == generation {
                slot.banner = None;
                drop(slot);
                let mut form = controller.form.lock();
                if matches!(form.phase, Phase::Settled(_)) {
                    form.phase = Phase::Editing;
                }
            }
        });
    }
}

fn capitalized(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::live::ResourceVersions;
    use crate::db::models::{Product, ProductCreate};
    use crate::db::repository::{RepoError, RepoResult};
    use crate::ingest::forms::ProductDraft;
    use crate::media::MediaResult;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct FakeMedia {
        calls: AtomicUsize,
        fail_from: Option<usize>,
    }

    impl FakeMedia {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_from: None,
            }
        }

        fn failing_from(n: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_from: Some(n),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MediaStore for FakeMedia {
        async fn upload(
            &self,
            file_name: &str,
            _content_type: &str,
            _bytes: Vec<u8>,
        ) -> MediaResult<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some(from) = self.fail_from
                && call >= from
            {
                return Err(MediaError::UploadFailed("host unavailable".into()));
            }
            Ok(format!("https://cdn.example/{file_name}"))
        }
    }

    #[derive(Default)]
    struct FakeRepo {
        created: parking_lot::Mutex<Vec<ProductCreate>>,
        deleted: parking_lot::Mutex<Vec<String>>,
        batches: parking_lot::Mutex<Vec<Vec<String>>>,
        fail: AtomicBool,
    }

    #[async_trait]
    impl RecordStore<ProductCreate> for FakeRepo {
        async fn create(&self, record: ProductCreate) -> RepoResult<String> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(RepoError::Database("disk full".into()));
            }
            self.created.lock().push(record);
            Ok(format!("products:{}", self.created.lock().len()))
        }

        async fn delete(&self, id: &str) -> RepoResult<()> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(RepoError::Database("disk full".into()));
            }
            self.deleted.lock().push(id.to_string());
            Ok(())
        }

        async fn delete_batch(&self, ids: &[String]) -> RepoResult<()> {
            self.batches.lock().push(ids.to_vec());
            Ok(())
        }
    }

    struct Rig {
        _tmp: TempDir,
        controller: Arc<IngestionController<ProductDraft>>,
        repo: Arc<FakeRepo>,
        media: Arc<FakeMedia>,
    }

    fn rig_with(media: FakeMedia, clear: Duration) -> Rig {
        let tmp = TempDir::new().unwrap();
        let repo = Arc::new(FakeRepo::default());
        let media = Arc::new(media);
        let controller = Arc::new(
            IngestionController::new(
                repo.clone() as Arc<dyn RecordStore<ProductCreate>>,
                media.clone() as Arc<dyn MediaStore>,
                tmp.path().join("staging"),
                clear,
            )
            .unwrap(),
        );
        Rig {
            _tmp: tmp,
            controller,
            repo,
            media,
        }
    }

    fn rig() -> Rig {
        rig_with(FakeMedia::ok(), Duration::from_secs(5))
    }

    fn valid_draft() -> ProductDraft {
        ProductDraft {
            name: "Linen Shirt".into(),
            description: "Lightweight".into(),
            base_price: "49.90".into(),
            sale_price: "39.90".into(),
            quantity: "12".into(),
            category: "men".into(),
            sizes: vec!["M".into()],
        }
    }

    #[tokio::test]
    async fn validation_short_circuits_before_any_network() {
        let rig = rig();
        rig.controller.update_draft(ProductDraft::default());
        rig.controller
            .stage_asset("a.jpg", "image/jpeg", vec![0u8; 8])
            .unwrap();

        let err = rig.controller.submit().await.unwrap_err();
        assert!(matches!(err, IngestError::Validation(_)));
        assert_eq!(rig.media.calls(), 0);
        assert!(rig.repo.created.lock().is_empty());
        assert_eq!(rig.controller.phase(), Phase::Editing);
        // Staged asset survives the rejected submit
        assert_eq!(rig.controller.staged_count(), 1);
    }

    #[tokio::test]
    async fn successful_submit_persists_and_resets() {
        let rig = rig();
        rig.controller.update_draft(valid_draft());
        let staged = rig
            .controller
            .stage_asset("a.jpg", "image/jpeg", vec![0u8; 2 * 1024 * 1024])
            .unwrap();
        assert!(staged.preview_path.exists());

        let id = rig.controller.submit().await.unwrap();
        assert!(id.starts_with("products:"));

        let created = rig.repo.created.lock();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].images, ["https://cdn.example/a.jpg"]);

        // Form cleared, staged emptied, preview released
        assert_eq!(rig.controller.staged_count(), 0);
        assert!(!staged.preview_path.exists());
        assert_eq!(rig.controller.phase(), Phase::Settled(Outcome::Success));
        let banner = rig.controller.status().unwrap();
        assert_eq!(banner.kind, StatusKind::Success);
    }

    #[tokio::test]
    async fn upload_failure_settles_without_create() {
        let rig = rig_with(FakeMedia::failing_from(2), Duration::from_secs(5));
        rig.controller.update_draft(valid_draft());
        rig.controller
            .stage_asset("a.jpg", "image/jpeg", vec![1])
            .unwrap();
        rig.controller
            .stage_asset("b.jpg", "image/jpeg", vec![2])
            .unwrap();

        let err = rig.controller.submit().await.unwrap_err();
        assert!(matches!(err, IngestError::Upload(_)));
        assert!(rig.repo.created.lock().is_empty());
        assert_eq!(rig.controller.phase(), Phase::Settled(Outcome::Failure));
        // Both stay staged; the first keeps its uploaded URL for the retry
        assert_eq!(rig.controller.staged_count(), 2);
    }

    #[tokio::test]
    async fn retry_after_upload_failure_resumes() {
        let rig = rig_with(FakeMedia::failing_from(2), Duration::from_secs(5));
        rig.controller.update_draft(valid_draft());
        rig.controller
            .stage_asset("a.jpg", "image/jpeg", vec![1])
            .unwrap();
        rig.controller
            .stage_asset("b.jpg", "image/jpeg", vec![2])
            .unwrap();

        rig.controller.submit().await.unwrap_err();

        // The fake fails permanently from call 2 on; the retry only attempts
        // b.jpg (a.jpg is skipped), so call 3 fails again.
        rig.controller.submit().await.unwrap_err();
        assert_eq!(rig.media.calls(), 3);
    }

    #[tokio::test]
    async fn persistence_failure_keeps_staged_assets() {
        let rig = rig();
        rig.repo.fail.store(true, Ordering::SeqCst);
        rig.controller.update_draft(valid_draft());
        rig.controller
            .stage_asset("a.jpg", "image/jpeg", vec![1])
            .unwrap();

        let err = rig.controller.submit().await.unwrap_err();
        assert!(matches!(err, IngestError::Persistence(_)));
        assert_eq!(rig.controller.phase(), Phase::Settled(Outcome::Failure));
        assert_eq!(rig.controller.staged_count(), 1);
        let banner = rig.controller.status().unwrap();
        assert_eq!(banner.kind, StatusKind::Error);
    }

    #[tokio::test]
    async fn oversized_asset_never_enters_the_queue() {
        let rig = rig();
        let err = rig
            .controller
            .stage_asset("big.png", "image/png", vec![0u8; 6 * 1024 * 1024])
            .unwrap_err();
        assert!(matches!(err, StageError::TooLarge(_)));
        assert_eq!(rig.controller.staged_count(), 0);
        assert_eq!(rig.controller.status().unwrap().kind, StatusKind::Error);
    }

    #[tokio::test]
    async fn two_phase_delete_requires_confirm() {
        let rig = rig();
        rig.controller.request_delete("products:abc");
        assert!(rig.repo.deleted.lock().is_empty());

        rig.controller.confirm_delete().await.unwrap();
        assert_eq!(*rig.repo.deleted.lock(), ["products:abc"]);
        assert_eq!(rig.controller.status().unwrap().kind, StatusKind::Success);
    }

    #[tokio::test]
    async fn cancelled_delete_never_reaches_store() {
        let rig = rig();
        rig.controller.request_delete("products:abc");
        rig.controller.cancel_delete();
        rig.controller.confirm_delete().await.unwrap();
        assert!(rig.repo.deleted.lock().is_empty());
    }

    #[tokio::test]
    async fn delete_all_with_empty_mirror_is_informational() {
        let rig = rig();
        assert!(!rig.controller.request_delete_all());
        assert!(rig.repo.batches.lock().is_empty());
        let banner = rig.controller.status().unwrap();
        assert_eq!(banner.kind, StatusKind::Info);
        assert_eq!(banner.message, "No products to delete.");
    }

    #[tokio::test]
    async fn delete_all_batches_every_mirrored_id() {
        let rig = rig();
        let mut a = sample_product("A");
        a.id = Some(("products", "a1").into());
        let mut b = sample_product("B");
        b.id = Some(("products", "b2").into());
        rig.controller.apply_snapshot(Snapshot {
            version: 1,
            records: Arc::new(vec![a, b]),
        });

        assert!(rig.controller.request_delete_all());
        rig.controller.confirm_delete().await.unwrap();
        let batches = rig.repo.batches.lock();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0], ["products:a1", "products:b2"]);
    }

    #[tokio::test]
    async fn banner_self_clears_and_returns_to_editing() {
        let rig = rig_with(FakeMedia::ok(), Duration::from_millis(40));
        rig.controller.update_draft(valid_draft());
        rig.controller
            .stage_asset("a.jpg", "image/jpeg", vec![1])
            .unwrap();
        rig.controller.submit().await.unwrap();
        assert!(rig.controller.status().is_some());

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(rig.controller.status().is_none());
        assert_eq!(rig.controller.phase(), Phase::Editing);
    }

    #[tokio::test]
    async fn stale_timer_never_wipes_newer_banner() {
        let rig = rig_with(FakeMedia::ok(), Duration::from_millis(100));
        rig.controller.request_delete("products:x");
        rig.controller.confirm_delete().await.unwrap(); // banner A at t≈0

        tokio::time::sleep(Duration::from_millis(30)).await;
        rig.controller.request_delete("products:y");
        rig.controller.confirm_delete().await.unwrap(); // banner B at t≈30

        // t≈120: A's timer has fired, B's has not — B must survive
        tokio::time::sleep(Duration::from_millis(90)).await;
        assert!(rig.controller.status().is_some());

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(rig.controller.status().is_none());
    }

    #[tokio::test]
    async fn stale_snapshot_never_regresses_the_mirror() {
        let rig = rig();
        assert!(rig.controller.apply_snapshot(Snapshot {
            version: 7,
            records: Arc::new(vec![sample_product("A")]),
        }));

        // An older push delivered behind a lag jump must be dropped
        assert!(!rig.controller.apply_snapshot(Snapshot {
            version: 3,
            records: Arc::new(vec![sample_product("A"), sample_product("B")]),
        }));
        assert_eq!(rig.controller.mirror().len(), 1);

        // Equal or newer versions still apply
        assert!(rig.controller.apply_snapshot(Snapshot {
            version: 8,
            records: Arc::new(vec![]),
        }));
        assert!(rig.controller.mirror().is_empty());
    }

    #[tokio::test]
    async fn attach_mirrors_feed_pushes() {
        let rig = rig();
        let feed: Arc<CollectionFeed<Product>> = Arc::new(CollectionFeed::new(
            "products",
            Arc::new(ResourceVersions::new()),
        ));
        let _task = rig.controller.attach(&feed);
        assert_eq!(feed.subscriber_count(), 1);

        feed.publish(vec![sample_product("A")]);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(rig.controller.mirror().len(), 1);
        assert_eq!(rig.controller.search("a").len(), 1);
        assert!(rig.controller.search("zzz").is_empty());
    }

    fn sample_product(name: &str) -> Product {
        Product {
            id: None,
            name: name.into(),
            description: String::new(),
            base_price: 10.0,
            sale_price: 8.0,
            quantity: 1,
            category: shared::Category::Men,
            sizes: vec![shared::Size::M],
            images: vec![],
            created_at: 0,
        }
    }
}
