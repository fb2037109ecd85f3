//! Integration tests for content export, import and generation.

use sitemix_core::{
    ContentCodec, ContentEntity, ContentSyncId, EntityRepository, EntityTypeKey, InMemoryRepository,
    JsonContentCodec, MixSettings,
};
use sitemix_storage::{ConfigStorage, InMemoryStorage};
use sitemix_sync_engine::{
    ContentSyncEngine, GenerateConfig, MessageLevel, MessageLog, SyncError,
};
use proptest::prelude::*;
use sitemix_testkit::prelude::*;
use std::sync::Arc;

type Engine = ContentSyncEngine<InMemoryRepository, JsonContentCodec<InMemoryRepository>>;

fn engine_for(site: &TestSite) -> Engine {
    ContentSyncEngine::new(Arc::clone(&site.repository), site.codec())
}

fn live(site: &TestSite, entity: &ContentEntity) -> Option<ContentEntity> {
    site.repository
        .load_by_uuid(entity.entity_type(), entity.uuid())
        .unwrap()
}

/// Exports `entities` from a site that has them, returning the staged copy.
fn exported(entities: &[ContentEntity]) -> InMemoryStorage {
    let source = TestSite::with_entities(entities.to_vec());
    let mut staged = InMemoryStorage::new();
    engine_for(&source)
        .export_transform(&sync_ids(entities), &mut staged)
        .unwrap();
    staged
}

#[test]
fn unsupported_types_leave_storage_untouched() {
    let site = TestSite::with_entities([block(1, "Footer")]);
    let engine = engine_for(&site);
    let ids = vec![
        format!("node.{}", uuid(1)),
        format!("user.{}", uuid(2)),
        format!("taxonomy.vocabulary.{}", uuid(3)),
    ];

    let mut staged = InMemoryStorage::new();
    let export = engine.export_transform(&ids, &mut staged).unwrap();
    assert!(export.written.is_empty());
    assert_eq!(export.skipped.len(), 3);
    assert!(staged.is_empty());

    let import = engine.import_transform(&ids, &staged).unwrap();
    assert!(import.staged.is_empty());

    let log = MessageLog::new();
    let generated = engine.generate_missing_content(&ids, &staged, &log).unwrap();
    assert_eq!(generated.skipped.len(), 3);
    assert_eq!(generated.attempts, 0);
    assert_eq!(site.repository.len(), 1);
    assert!(log.messages().is_empty());
}

#[test]
fn taxonomy_term_ids_use_three_segment_prefix() {
    let parent = term(1, "Languages", None);
    let child = term(2, "Rust", Some(1));
    let staged = exported(&[parent, child]);

    let raw = format!("taxonomy.term.{}", uuid(2));
    let id = ContentSyncId::parse(&raw).unwrap();
    assert_eq!(id.entity_type(), EntityTypeKey::TaxonomyTerm);
    assert!(staged.exists(&raw).unwrap());
}

#[test]
fn export_writes_under_exact_identifier_and_is_idempotent() {
    let entity = block(1, "Footer");
    let site = TestSite::with_entities([entity.clone()]);
    let engine = engine_for(&site);
    let ids = vec![format!("block_content.{}", uuid(1))];

    let mut staged = InMemoryStorage::new();
    engine.export_transform(&ids, &mut staged).unwrap();
    let first = staged.snapshot();

    engine.export_transform(&ids, &mut staged).unwrap();
    assert_eq!(staged.snapshot(), first);
    assert_eq!(staged.list_all("").unwrap(), ids);

    let object = staged.read(&ids[0]).unwrap().unwrap();
    assert_eq!(object["info"], serde_json::json!("Footer"));
}

#[test]
fn generate_never_overwrites_existing_content() {
    let original = block(1, "Live title");
    let staged = exported(&[block(1, "Staged title"), block(2, "New")]);
    let target = TestSite::with_entities([original.clone()]);

    let log = MessageLog::new();
    let ids = vec![
        format!("block_content.{}", uuid(1)),
        format!("block_content.{}", uuid(2)),
    ];
    let report = engine_for(&target)
        .generate_missing_content(&ids, &staged, &log)
        .unwrap();

    assert_eq!(report.already_present.len(), 1);
    assert_eq!(report.created.len(), 1);
    assert!(report.updated.is_empty());
    assert_eq!(report.attempts, 1);
    assert_eq!(live(&target, &original).unwrap().label(), "Live title");
}

#[test]
fn reverse_dependency_chain_converges() {
    let chain = menu_chain(3);
    let staged = exported(&chain);
    let target = TestSite::new();

    // Submit as [C, B, A].
    let mut ids = sync_ids(&chain);
    ids.reverse();

    let log = MessageLog::new();
    let config = GenerateConfig::default();
    let engine = ContentSyncEngine::with_config(
        Arc::clone(&target.repository),
        target.codec(),
        config.clone(),
    );
    let report = engine.generate_missing_content(&ids, &staged, &log).unwrap();

    assert!(report.is_complete());
    assert_eq!(report.created.len(), 3);
    assert_eq!(report.created[0].uuid(), chain[0].uuid());
    assert_eq!(report.created[2].uuid(), chain[2].uuid());
    assert_eq!(report.attempts, 6);
    assert!(report.attempts <= config.attempt_budget(ids.len()));
    for entity in &chain {
        assert!(live(&target, entity).is_some());
    }
    assert_eq!(log.texts(MessageLevel::Status).len(), 3);
    assert!(log.texts(MessageLevel::Warning).is_empty());
}

#[test]
fn reverse_term_chain_converges() {
    let chain = term_chain(4);
    let staged = exported(&chain);
    let target = TestSite::new();
    let mut ids = sync_ids(&chain);
    ids.reverse();

    let report = engine_for(&target)
        .generate_missing_content(&ids, &staged, &MessageLog::new())
        .unwrap();

    assert_eq!(report.created.len(), 4);
    assert!(report.is_complete());
}

#[test]
fn unsatisfiable_reference_gives_up_after_five_attempts() {
    let orphan = orphan_link(7);
    let mut source = TestSite::new();
    let codec = source.codec();
    stage_snapshots(&codec, &mut source.staged, std::slice::from_ref(&orphan)).unwrap();

    let target = TestSite::new();
    let log = MessageLog::new();
    let ids = sync_ids(std::slice::from_ref(&orphan));
    let report = engine_for(&target)
        .generate_missing_content(&ids, &source.staged, &log)
        .unwrap();

    assert_eq!(report.attempts, 5);
    assert_eq!(report.abandoned.len(), 1);
    assert!(report.created.is_empty());
    assert_eq!(
        log.texts(MessageLevel::Warning),
        vec![format!("Failed to generate content: {}", ids[0])]
    );
    assert!(target.repository.is_empty());
}

#[test]
fn reference_cycle_exhausts_every_member() {
    let cycle = mutual_links(0x40, 0x41);
    let mut source = TestSite::new();
    let codec = source.codec();
    stage_snapshots(&codec, &mut source.staged, &cycle).unwrap();

    let target = TestSite::new();
    let log = MessageLog::new();
    let ids = sync_ids(&cycle);
    let report = engine_for(&target)
        .generate_missing_content(&ids, &source.staged, &log)
        .unwrap();

    assert_eq!(report.attempts, 10);
    assert_eq!(report.abandoned.len(), 2);
    assert_eq!(
        log.texts(MessageLevel::Warning),
        vec![
            format!("Failed to generate content: {}", ids[0]),
            format!("Failed to generate content: {}", ids[1]),
        ]
    );
    assert!(log.texts(MessageLevel::Status).is_empty());
    assert!(target.repository.is_empty());
}

#[test]
fn retry_budget_is_configurable() {
    let orphans = [orphan_link(7), orphan_link(8)];
    let mut source = TestSite::new();
    let codec = source.codec();
    stage_snapshots(&codec, &mut source.staged, &orphans).unwrap();

    let target = TestSite::new();
    let engine = ContentSyncEngine::with_config(
        Arc::clone(&target.repository),
        target.codec(),
        GenerateConfig::new(2),
    );
    let log = MessageLog::new();
    let report = engine
        .generate_missing_content(&sync_ids(&orphans), &source.staged, &log)
        .unwrap();

    assert_eq!(report.attempts, 4);
    assert_eq!(log.texts(MessageLevel::Warning).len(), 2);
}

#[test]
fn partial_progress_survives_a_fatal_error() {
    let good = block(1, "Good");
    let mut staged = exported(&[good.clone()]);
    let mut broken = sitemix_storage::ConfigObject::new();
    broken.insert("uuid".into(), serde_json::json!(uuid(2).to_string()));
    let broken_id = format!("block_content.{}", uuid(2));
    staged.write(&broken_id, &broken).unwrap();

    let target = TestSite::new();
    let ids = vec![good.sync_id().to_string(), broken_id.clone()];
    let err = engine_for(&target)
        .generate_missing_content(&ids, &staged, &MessageLog::new())
        .unwrap_err();

    assert!(matches!(err, SyncError::Content { ref id, .. } if *id == broken_id));
    assert!(live(&target, &good).is_some());
}

#[test]
fn round_trip_reconstructs_entity_found_by_uuid() {
    let entity = term(5, "Round trip", None);
    let source = TestSite::with_entities([entity.clone()]);
    let stored = live(&source, &entity).unwrap();

    let snapshot = source.codec().normalize(&stored).unwrap();

    let target = TestSite::new();
    let rebuilt = target
        .codec()
        .denormalize(&snapshot, entity.entity_type())
        .unwrap();
    target.repository.save(rebuilt).unwrap();

    let found = live(&target, &entity).unwrap();
    assert_eq!(found.uuid(), entity.uuid());
    assert_eq!(found.label(), "Round trip");
}

#[test]
fn settings_drive_a_full_cycle_through_file_storage() {
    let chain = menu_chain(2);
    let source = TestSite::with_entities(chain.clone());

    let mut config = InMemoryStorage::new();
    let mut settings = MixSettings {
        show_content_sync_id: true,
        content_sync_ids: sync_ids(&chain),
        ..MixSettings::default()
    };
    settings.save(&mut config).unwrap();
    let settings = MixSettings::load(&config).unwrap();

    let mut sync_dir = TestSyncDir::new();
    let export = engine_for(&source)
        .export_transform(&settings, &mut sync_dir.storage)
        .unwrap();
    assert_eq!(export.written.len(), 2);

    let target = TestSite::new();
    let engine = engine_for(&target);
    let import = engine.import_transform(&settings, &sync_dir.storage).unwrap();
    assert_eq!(import.staged.len(), 2);

    let report = engine
        .generate_missing_content(&settings, &sync_dir.storage, &MessageLog::new())
        .unwrap();
    assert_eq!(report.created.len(), 2);

    let again = engine
        .generate_missing_content(&settings, &sync_dir.storage, &MessageLog::new())
        .unwrap();
    assert!(again.created.is_empty());
    assert_eq!(again.already_present.len(), 2);
}

proptest! {
    #[test]
    fn unsupported_ids_never_touch_storage(
        ids in prop::collection::vec(unsupported_sync_id_strategy(), 0..8)
    ) {
        let site = TestSite::with_entities([block(1, "Footer")]);
        let mut staged = exported(&[block(2, "Staged")]);
        let staged_before = staged.snapshot();
        let live_before = site.repository.entities();
        let engine = engine_for(&site);

        let export = engine.export_transform(&ids, &mut staged);
        prop_assert!(export.is_ok());
        let import = engine.import_transform(&ids, &staged);
        prop_assert!(import.is_ok());
        let log = MessageLog::new();
        let generated = engine.generate_missing_content(&ids, &staged, &log);
        prop_assert!(generated.is_ok());

        prop_assert_eq!(staged.snapshot(), staged_before);
        prop_assert_eq!(site.repository.entities(), live_before);
        prop_assert!(log.messages().is_empty());
    }

    #[test]
    fn arbitrary_ids_never_error(
        ids in prop::collection::vec(any_sync_id_strategy(), 0..8)
    ) {
        let site = TestSite::with_entities([block(1, "Footer")]);
        let mut staged = InMemoryStorage::new();
        let engine = engine_for(&site);

        prop_assert!(engine.export_transform(&ids, &mut staged).is_ok());
        prop_assert!(engine.import_transform(&ids, &staged).is_ok());
        let generated = engine.generate_missing_content(&ids, &staged, &MessageLog::new());
        prop_assert!(generated.is_ok());
    }
}
