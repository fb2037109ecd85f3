//! The content sync engine.

use crate::config::GenerateConfig;
use crate::error::{SyncError, SyncResult};
use crate::messenger::Messenger;
use crate::report::{ExportReport, GenerateReport, ImportReport, SkipReason, Skipped};
use sitemix_core::{
    CodecError, ContentCodec, ContentEntity, ContentSyncId, CoreResult, EntityRepository,
    EntitySnapshot, SaveOutcome, SyncListSource,
};
use sitemix_storage::ConfigStorage;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Moves listed content between live entities and staged configuration.
///
/// The engine holds the live repository and the codec; the identifier list,
/// the staged storage and the messenger are passed to each operation.
pub struct ContentSyncEngine<R: EntityRepository, C: ContentCodec> {
    repository: Arc<R>,
    codec: C,
    config: GenerateConfig,
}

impl<R: EntityRepository, C: ContentCodec> ContentSyncEngine<R, C> {
    /// Creates an engine with the default generation settings.
    pub fn new(repository: Arc<R>, codec: C) -> Self {
        Self::with_config(repository, codec, GenerateConfig::default())
    }

    /// Creates an engine with explicit generation settings.
    pub fn with_config(repository: Arc<R>, codec: C, config: GenerateConfig) -> Self {
        Self {
            repository,
            codec,
            config,
        }
    }

    /// Returns the live repository.
    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Returns the generation settings.
    pub fn config(&self) -> &GenerateConfig {
        &self.config
    }

    /// Writes a snapshot of every listed live entity into `staged`.
    ///
    /// Identifiers that are unparsable, unsupported, or whose entity does
    /// not exist are skipped. Snapshots are written in list order and stay
    /// written if a later identifier fails.
    pub fn export_transform<L, S>(&self, source: &L, staged: &mut S) -> SyncResult<ExportReport>
    where
        L: SyncListSource + ?Sized,
        S: ConfigStorage + ?Sized,
    {
        let mut report = ExportReport::default();

        for raw in source.content_sync_ids() {
            let id = match ContentSyncId::parse(&raw) {
                Ok(id) => id,
                Err(e) => {
                    debug!(id = %raw, reason = %e, "skipping content sync id");
                    report.skipped.push(Skipped::new(raw, SkipReason::from(&e)));
                    continue;
                }
            };

            let entity = self
                .repository
                .load_by_uuid(id.entity_type(), id.uuid())
                .map_err(|e| SyncError::content(&raw, e))?;
            let Some(entity) = entity else {
                debug!(id = %raw, "no live entity to export");
                report.skipped.push(Skipped::new(raw, SkipReason::EntityMissing));
                continue;
            };

            let snapshot = self
                .codec
                .normalize(&entity)
                .map_err(|e| SyncError::content(&raw, e))?;
            staged.write(id.as_str(), snapshot.as_object())?;
            info!(id = %id, "exported content snapshot");
            report.written.push(id);
        }

        Ok(report)
    }

    /// Reports which listed identifiers have a usable snapshot in `staged`.
    ///
    /// Nothing is created here; see [`Self::generate_missing_content`].
    pub fn import_transform<L, S>(&self, source: &L, staged: &S) -> SyncResult<ImportReport>
    where
        L: SyncListSource + ?Sized,
        S: ConfigStorage + ?Sized,
    {
        let mut report = ImportReport::default();

        for raw in source.content_sync_ids() {
            let id = match ContentSyncId::parse(&raw) {
                Ok(id) => id,
                Err(e) => {
                    debug!(id = %raw, reason = %e, "skipping content sync id");
                    report.skipped.push(Skipped::new(raw, SkipReason::from(&e)));
                    continue;
                }
            };

            if read_snapshot(staged, &id)?.is_none() {
                debug!(id = %raw, "no staged snapshot");
                report.skipped.push(Skipped::new(raw, SkipReason::NoSnapshot));
                continue;
            }
            report.staged.push(id);
        }

        Ok(report)
    }

    /// Creates every listed entity that is missing from the live site,
    /// using the snapshots in `staged`.
    ///
    /// Existing entities are left untouched. An identifier whose snapshot
    /// references an entity that does not exist yet is re-queued at the
    /// tail; after [`GenerateConfig::max_attempts`] failed attempts it is
    /// abandoned with a warning. Any other failure aborts the run with
    /// [`SyncError::Content`]; entities created before it remain.
    pub fn generate_missing_content<L, S, M>(
        &self,
        source: &L,
        staged: &S,
        messenger: &M,
    ) -> SyncResult<GenerateReport>
    where
        L: SyncListSource + ?Sized,
        S: ConfigStorage + ?Sized,
        M: Messenger + ?Sized,
    {
        let mut report = GenerateReport::default();
        let mut queue: VecDeque<String> = source.content_sync_ids().into();
        let mut attempts: HashMap<String, u32> = HashMap::new();

        while let Some(raw) = queue.pop_front() {
            let id = match ContentSyncId::parse(&raw) {
                Ok(id) => id,
                Err(e) => {
                    debug!(id = %raw, reason = %e, "skipping content sync id");
                    report.skipped.push(Skipped::new(raw, SkipReason::from(&e)));
                    continue;
                }
            };

            let attempt = *attempts.entry(raw.clone()).or_insert(1);
            if attempt > self.config.max_attempts {
                warn!(id = %raw, attempts = attempt - 1, "giving up on content");
                messenger.warning(format!("Failed to generate content: {raw}"));
                report.abandoned.push(id);
                continue;
            }

            let existing = self
                .repository
                .load_by_uuid(id.entity_type(), id.uuid())
                .map_err(|e| SyncError::content(&raw, e))?;
            if existing.is_some() {
                report.already_present.push(id);
                continue;
            }

            let Some(snapshot) = read_snapshot(staged, &id)? else {
                report.missing_snapshot.push(id);
                continue;
            };

            report.attempts += 1;
            let saved = self
                .codec
                .denormalize(&snapshot, id.entity_type())
                .and_then(|entity| ensure_identity(&id, entity))
                .and_then(|entity| self.repository.save(entity));

            match saved {
                Ok(SaveOutcome::New) => {
                    info!(id = %raw, attempt, "generated content");
                    messenger.status(format!("Content {raw} was generated successfully"));
                    report.created.push(id);
                }
                Ok(SaveOutcome::Updated) => {
                    warn!(id = %raw, "live content appeared during generation and was replaced");
                    report.updated.push(id);
                }
                Err(e) if e.is_referenced_entity_missing() => {
                    debug!(id = %raw, attempt, reason = %e, "re-queueing content");
                    attempts.insert(raw.clone(), attempt + 1);
                    queue.push_back(raw);
                }
                Err(e) => return Err(SyncError::content(&raw, e)),
            }
        }

        Ok(report)
    }
}

/// Rejects a decoded entity that is not the one `id` names.
fn ensure_identity(id: &ContentSyncId, entity: ContentEntity) -> CoreResult<ContentEntity> {
    if entity.entity_type() == id.entity_type() && entity.uuid() == id.uuid() {
        return Ok(entity);
    }
    Err(CodecError::Malformed {
        entity_type: id.entity_type(),
        message: format!("snapshot describes {}", entity.sync_id()),
    }
    .into())
}

fn read_snapshot<S: ConfigStorage + ?Sized>(
    staged: &S,
    id: &ContentSyncId,
) -> SyncResult<Option<EntitySnapshot>> {
    Ok(staged
        .read(id.as_str())?
        .filter(|object| !object.is_empty())
        .map(EntitySnapshot::new))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messenger::{MessageLevel, MessageLog};
    use sitemix_core::{
        BlockContent, ContentEntity, EntityTypeKey, InMemoryRepository, JsonContentCodec,
    };
    use sitemix_storage::{ConfigObject, InMemoryStorage};
    use uuid::Uuid;

    type Engine = ContentSyncEngine<InMemoryRepository, JsonContentCodec<InMemoryRepository>>;

    fn engine(entities: Vec<ContentEntity>) -> Engine {
        let repo = Arc::new(InMemoryRepository::with_entities(entities));
        ContentSyncEngine::new(Arc::clone(&repo), JsonContentCodec::new(repo))
    }

    fn block(seed: u128) -> ContentEntity {
        BlockContent {
            id: None,
            uuid: Uuid::from_u128(seed),
            bundle: "basic".into(),
            info: format!("Block {seed}"),
            body: None,
            langcode: "en".into(),
        }
        .into()
    }

    fn block_id(seed: u128) -> String {
        format!("block_content.{}", Uuid::from_u128(seed))
    }

    #[test]
    fn export_writes_in_list_order() {
        let engine = engine(vec![block(1), block(2)]);
        let mut staged = InMemoryStorage::new();
        let ids = vec![block_id(2), block_id(1)];

        let report = engine.export_transform(&ids, &mut staged).unwrap();

        let written: Vec<&str> = report.written.iter().map(ContentSyncId::as_str).collect();
        assert_eq!(written, vec![block_id(2), block_id(1)]);
        assert_eq!(staged.len(), 2);
    }

    #[test]
    fn export_skips_silently() {
        let engine = engine(vec![block(1)]);
        let mut staged = InMemoryStorage::new();
        let ids = vec![
            "node.1".to_string(),
            "garbage".to_string(),
            block_id(9),
            block_id(1),
        ];

        let report = engine.export_transform(&ids, &mut staged).unwrap();

        assert_eq!(report.written.len(), 1);
        let reasons: Vec<SkipReason> = report.skipped.iter().map(|s| s.reason).collect();
        assert_eq!(
            reasons,
            vec![
                SkipReason::UnsupportedType,
                SkipReason::Unparsable,
                SkipReason::EntityMissing
            ]
        );
        assert_eq!(staged.list_all("").unwrap(), vec![block_id(1)]);
    }

    #[test]
    fn import_reports_staged_snapshots() {
        let engine = engine(vec![]);
        let mut staged = InMemoryStorage::new();
        let mut object = ConfigObject::new();
        object.insert("info".into(), "x".into());
        staged.write(&block_id(1), &object).unwrap();
        staged.write(&block_id(2), &ConfigObject::new()).unwrap();

        let ids = vec![block_id(1), block_id(2), block_id(3), "menu.x".into()];
        let report = engine.import_transform(&ids, &staged).unwrap();

        assert_eq!(report.staged.len(), 1);
        assert_eq!(report.staged[0].entity_type(), EntityTypeKey::BlockContent);
        assert_eq!(report.skipped.len(), 3);
        assert_eq!(staged.len(), 2);
    }

    #[test]
    fn generate_creates_missing_and_reports() {
        let source = engine(vec![block(1), block(2)]);
        let mut staged = InMemoryStorage::new();
        let ids = vec![block_id(1), block_id(2)];
        source.export_transform(&ids, &mut staged).unwrap();

        let target = engine(vec![block(2)]);
        let log = MessageLog::new();
        let report = target
            .generate_missing_content(&ids, &staged, &log)
            .unwrap();

        assert_eq!(report.created.len(), 1);
        assert_eq!(report.already_present.len(), 1);
        assert_eq!(report.attempts, 1);
        assert_eq!(
            log.texts(MessageLevel::Status),
            vec![format!("Content {} was generated successfully", block_id(1))]
        );
        assert!(target
            .repository()
            .contains(EntityTypeKey::BlockContent, Uuid::from_u128(1)));
    }

    #[test]
    fn generate_without_snapshot_does_nothing() {
        let target = engine(vec![]);
        let staged = InMemoryStorage::new();
        let log = MessageLog::new();
        let ids = vec![block_id(1)];

        let report = target.generate_missing_content(&ids, &staged, &log).unwrap();

        assert_eq!(report.missing_snapshot.len(), 1);
        assert_eq!(report.attempts, 0);
        assert!(log.messages().is_empty());
        assert!(target.repository().is_empty());
    }

    #[test]
    fn generate_malformed_snapshot_is_fatal() {
        let target = engine(vec![]);
        let mut staged = InMemoryStorage::new();
        let mut object = ConfigObject::new();
        object.insert("bogus".into(), true.into());
        staged.write(&block_id(1), &object).unwrap();

        let ids = vec![block_id(1)];
        let err = target
            .generate_missing_content(&ids, &staged, &MessageLog::new())
            .unwrap_err();
        assert_eq!(err.content_id(), Some(block_id(1).as_str()));
    }

    #[test]
    fn generate_never_replaces_entity_named_by_another_snapshot() {
        let target = engine(vec![block(2)]);
        let staged_copy: ContentEntity = BlockContent {
            id: None,
            uuid: Uuid::from_u128(2),
            bundle: "basic".into(),
            info: "Staged".into(),
            body: None,
            langcode: "en".into(),
        }
        .into();
        let snapshot = target.codec.normalize(&staged_copy).unwrap();
        let mut staged = InMemoryStorage::new();
        staged.write(&block_id(1), snapshot.as_object()).unwrap();

        let ids = vec![block_id(1)];
        let err = target
            .generate_missing_content(&ids, &staged, &MessageLog::new())
            .unwrap_err();

        assert_eq!(err.content_id(), Some(block_id(1).as_str()));
        let live = target
            .repository()
            .load_by_uuid(EntityTypeKey::BlockContent, Uuid::from_u128(2))
            .unwrap()
            .unwrap();
        assert_eq!(live.label(), "Block 2");
        assert!(!target
            .repository()
            .contains(EntityTypeKey::BlockContent, Uuid::from_u128(1)));
    }
}
