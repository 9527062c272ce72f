// ============================================================================
// FaqDesk - 编辑流程集成测试
// ============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use faqdesk::core::memory::{MemoryContentStore, StoreRequest};
use faqdesk::core::{
    ContentStore, EditorError, EditorEvent, EditorSession, ListOptions, ListView, LoadStatus,
    RecordingNotifier, SessionMode,
};
use faqdesk::models::{DraftField, Locale, RecordId, RecordSummary};

fn fixture() -> (Arc<MemoryContentStore>, Arc<dyn ContentStore>, Arc<RecordingNotifier>) {
    let memory = Arc::new(MemoryContentStore::new());
    let store: Arc<dyn ContentStore> = memory.clone();
    (memory, store, Arc::new(RecordingNotifier::new()))
}

#[tokio::test]
async fn create_then_translate_reuses_the_record_id() {
    let (memory, store, notifier) = fixture();
    let mut session = EditorSession::new(store, notifier.clone());

    session.update(Locale::En, DraftField::Question, "What is X?");
    session.update(Locale::En, DraftField::Answer, "X is Y.");
    let created = session.save().await.unwrap();
    assert!(created.created);
    assert_eq!(session.mode(), &SessionMode::Edit(created.id.clone()));

    session.select(Locale::Es);
    session.update(Locale::Es, DraftField::Question, "¿Qué es X?");
    session.update(Locale::Es, DraftField::Answer, "X es Y.");
    let updated = session.save().await.unwrap();
    assert!(!updated.created);
    assert_eq!(updated.id, created.id);

    let requests = memory.requests();
    assert_eq!(requests.len(), 2);
    assert!(matches!(&requests[0], StoreRequest::Create(p) if p.locale == Locale::En));
    assert!(matches!(
        &requests[1],
        StoreRequest::Update { id, payload, if_match: None }
            if *id == created.id && payload.locale == Locale::Es
    ));

    // 英文草稿保持不变且已保存
    let en = session.draft(Locale::En);
    assert_eq!(en.question, "What is X?");
    assert!(en.exists);
    assert!(!en.is_dirty());
    assert_eq!(memory.record_count(), 1);
    assert_eq!(
        memory.translation(&created.id, Locale::Es).unwrap().answer,
        "X es Y."
    );

    let saved: Vec<Locale> = session.saved_locales().iter().copied().collect();
    assert_eq!(saved, vec![Locale::En, Locale::Es]);
    assert!(matches!(
        notifier.events().as_slice(),
        [
            EditorEvent::Loading(true),
            EditorEvent::Loading(false),
            EditorEvent::Created { .. },
            EditorEvent::Loading(true),
            EditorEvent::Loading(false),
            EditorEvent::Saved { .. },
        ]
    ));
}

#[tokio::test]
async fn reopening_a_record_sends_versions_back() {
    let (memory, store, notifier) = fixture();
    let id = memory.seed(&[
        (Locale::En, "What is X?", "X is Y."),
        (Locale::De, "Was ist X?", "X ist Y."),
    ]);

    let (mut session, status) = EditorSession::open(store, notifier, Some(id.clone())).await;
    assert!(matches!(status, LoadStatus::Loaded(ref locales) if locales == &[Locale::En, Locale::De]));
    assert_eq!(session.active(), Locale::En);

    session.select(Locale::De);
    session.update(Locale::De, DraftField::Answer, "X ist genau Y.");
    session.save().await.unwrap();

    assert!(matches!(
        memory.requests().last(),
        Some(StoreRequest::Update { if_match: Some(version), .. }) if version == "1"
    ));
    assert_eq!(session.draft(Locale::De).version.as_deref(), Some("2"));
    assert!(session.close().is_empty());
}

#[tokio::test]
async fn saving_refreshes_the_list_and_delete_invalidates_the_id() {
    let (memory, store, notifier) = fixture();
    for i in 0..3 {
        memory.seed(&[(Locale::En, &format!("Question {i}"), "Answer")]);
    }

    let mut list = ListView::new(
        store.clone(),
        notifier.clone(),
        ListOptions {
            page_size: 2,
            ..Default::default()
        },
    );
    list.load().await.unwrap();
    assert_eq!(list.page_count(), 2);
    assert_eq!(list.page(2).len(), 1);

    let refreshed = Arc::new(AtomicUsize::new(0));
    let counter = refreshed.clone();
    let mut session = EditorSession::new(store.clone(), notifier.clone()).with_refresh(Box::new(
        move |_: &RecordId| {
            counter.fetch_add(1, Ordering::SeqCst);
        },
    ));
    session.update(Locale::En, DraftField::Question, "Fresh?");
    session.update(Locale::En, DraftField::Answer, "Yes.");
    let outcome = session.save().await.unwrap();
    assert_eq!(refreshed.load(Ordering::SeqCst), 1);

    list.load().await.unwrap();
    assert_eq!(list.len(), 4);
    assert!(list.find(&outcome.id).unwrap().has(Locale::En));

    let always = |_: &RecordSummary| true;
    list.delete(&outcome.id, &always).await.unwrap();
    assert!(list.find(&outcome.id).is_none());

    let (_, status) = EditorSession::open(store, notifier, Some(outcome.id)).await;
    assert!(matches!(status, LoadStatus::NotFound));
}

#[tokio::test]
async fn validation_failure_never_reaches_the_store() {
    let (memory, store, notifier) = fixture();
    let mut session = EditorSession::new(store, notifier.clone());
    session.update(Locale::It, DraftField::Question, "   ");
    session.select(Locale::It);

    let err = session.save().await.unwrap_err();
    assert!(matches!(
        err,
        EditorError::Validation { ref missing } if missing.len() == 2
    ));
    assert_eq!(memory.request_count(), 0);
    assert_eq!(notifier.errors().len(), 1);
}
