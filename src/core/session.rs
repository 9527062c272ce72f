// ============================================================================
// FaqDesk - 编辑会话
// ============================================================================
//
// 文件: src/core/session.rs
// 职责: 单条记录的多语言编辑会话（加载、切换、保存、删除）
// 边界:
//   - ✅ 加载已有翻译并初始化草稿
//   - ✅ 保存前校验与创建/更新请求
//   - ✅ 新记录 ID 的接管与模式切换
//   - ✅ 请求取消与忙碌标记
//   - ❌ 不应包含终端输出（通过 Notifier 报告）
//   - ❌ 不应包含 HTTP 细节
//
// ============================================================================

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::core::drafts::DraftCache;
use crate::core::error::{EditorError, EditorResult};
use crate::core::notify::{EditorEvent, SharedNotifier};
use crate::core::store::ContentStore;
use crate::models::locale::Locale;
use crate::models::record::{Draft, DraftField, RecordId};

/// 保存成功后的外部刷新回调（例如重新加载列表）
pub type RefreshCallback = Box<dyn Fn(&RecordId) + Send + Sync>;

/// 会话模式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMode {
    /// 记录尚未创建
    New,
    /// 编辑已有记录
    Edit(RecordId),
}

/// 加载结果
#[derive(Debug)]
pub enum LoadStatus {
    /// 未指定 ID，全部为空草稿
    Fresh,
    /// 已加载，包含已保存的语言
    Loaded(Vec<Locale>),
    /// 记录不存在，按新记录处理
    NotFound,
    /// 获取失败，草稿保持为空
    Failed(EditorError),
}

/// 保存结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub id: RecordId,
    pub locale: Locale,
    /// 本次保存是否创建了新记录
    pub created: bool,
}

/// 可在会话外部持有的句柄：查询忙碌状态、取消进行中的请求
#[derive(Debug, Clone)]
pub struct SessionHandle {
    cancel: CancellationToken,
    busy: Arc<AtomicBool>,
}

impl SessionHandle {
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// 取消进行中的请求并关闭会话
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// 忙碌标记守卫，离开作用域时复位
struct BusyGuard(Arc<AtomicBool>);

impl BusyGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// 可被会话取消的请求
async fn cancellable<T, F>(token: &CancellationToken, request: F) -> EditorResult<T>
where
    F: Future<Output = EditorResult<T>>,
{
    if token.is_cancelled() {
        return Err(EditorError::Cancelled);
    }
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(EditorError::Cancelled),
        result = request => result,
    }
}

/// 单条记录的编辑会话，独占其草稿缓存
pub struct EditorSession {
    store: Arc<dyn ContentStore>,
    notifier: SharedNotifier,
    drafts: DraftCache,
    mode: SessionMode,
    saved_locales: BTreeSet<Locale>,
    busy: Arc<AtomicBool>,
    cancel: CancellationToken,
    on_saved: Option<RefreshCallback>,
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("mode", &self.mode)
            .field("active", &self.drafts.active())
            .field("saved_locales", &self.saved_locales)
            .field("busy", &self.busy.load(Ordering::Relaxed))
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

impl EditorSession {
    /// 创建空会话（未加载）
    pub fn new(store: Arc<dyn ContentStore>, notifier: SharedNotifier) -> Self {
        Self {
            store,
            notifier,
            drafts: DraftCache::empty(),
            mode: SessionMode::New,
            saved_locales: BTreeSet::new(),
            busy: Arc::new(AtomicBool::new(false)),
            cancel: CancellationToken::new(),
            on_saved: None,
        }
    }

    /// 打开会话并加载记录
    pub async fn open(
        store: Arc<dyn ContentStore>,
        notifier: SharedNotifier,
        id: Option<RecordId>,
    ) -> (Self, LoadStatus) {
        let mut session = Self::new(store, notifier);
        let status = session.load(id).await;
        (session, status)
    }

    /// 设置保存成功后的刷新回调
    pub fn with_refresh(mut self, callback: RefreshCallback) -> Self {
        self.on_saved = Some(callback);
        self
    }

    /// 加载记录的全部翻译；失败时保持空草稿，不中断会话
    pub async fn load(&mut self, id: Option<RecordId>) -> LoadStatus {
        self.saved_locales.clear();

        let Some(id) = id else {
            self.drafts = DraftCache::empty();
            self.mode = SessionMode::New;
            return LoadStatus::Fresh;
        };

        self.notifier.notify(EditorEvent::Loading(true));
        let result = cancellable(&self.cancel, self.store.translations(&id)).await;
        self.notifier.notify(EditorEvent::Loading(false));

        match result {
            Ok(translations) => {
                self.drafts = DraftCache::seeded(translations);
                self.mode = SessionMode::Edit(id);
                LoadStatus::Loaded(self.drafts.existing_locales())
            }
            Err(EditorError::NotFound(_)) => {
                tracing::debug!(%id, "record not found, starting with empty drafts");
                self.notifier.notify(EditorEvent::Warning(format!(
                    "Record {} no longer exists, starting a new one",
                    id
                )));
                self.drafts = DraftCache::empty();
                self.mode = SessionMode::New;
                LoadStatus::NotFound
            }
            Err(err) => {
                tracing::warn!(%id, error = %err, "failed to load translations");
                self.notifier.notify(EditorEvent::Error(err.user_message()));
                self.drafts = DraftCache::empty();
                self.mode = SessionMode::Edit(id);
                LoadStatus::Failed(err)
            }
        }
    }

    pub fn mode(&self) -> &SessionMode {
        &self.mode
    }

    pub fn record_id(&self) -> Option<&RecordId> {
        match &self.mode {
            SessionMode::New => None,
            SessionMode::Edit(id) => Some(id),
        }
    }

    pub fn active(&self) -> Locale {
        self.drafts.active()
    }

    pub fn drafts(&self) -> &DraftCache {
        &self.drafts
    }

    pub fn draft(&self, locale: Locale) -> &Draft {
        self.drafts.draft(locale)
    }

    /// 本会话中保存成功过的语言
    pub fn saved_locales(&self) -> &BTreeSet<Locale> {
        &self.saved_locales
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            cancel: self.cancel.clone(),
            busy: Arc::clone(&self.busy),
        }
    }

    /// 切换当前编辑的语言
    pub fn select(&mut self, locale: Locale) {
        self.drafts.select(locale);
    }

    /// 修改指定语言草稿的字段
    pub fn update(&mut self, locale: Locale, field: DraftField, value: impl Into<String>) {
        self.drafts.update(locale, field, value);
    }

    /// 保存当前语言的草稿
    pub async fn save(&mut self) -> EditorResult<SaveOutcome> {
        let locale = self.drafts.active();
        let draft = self.drafts.active_draft();

        let missing = draft.missing_fields();
        if !missing.is_empty() {
            let err = EditorError::Validation { missing };
            self.notifier.notify(EditorEvent::Error(err.to_string()));
            return Err(err);
        }

        let payload = draft.to_payload();
        let if_match = draft.version.clone().filter(|_| draft.exists);

        let _guard = BusyGuard::acquire(&self.busy).ok_or(EditorError::Busy)?;

        self.notifier.notify(EditorEvent::Loading(true));
        let result = match &self.mode {
            SessionMode::New => cancellable(&self.cancel, self.store.create(&payload))
                .await
                .map(|created| (created.id, created.version, true)),
            SessionMode::Edit(id) => cancellable(
                &self.cancel,
                self.store.update(id, &payload, if_match.as_deref()),
            )
            .await
            .map(|updated| (id.clone(), updated.version, false)),
        };
        self.notifier.notify(EditorEvent::Loading(false));

        match result {
            Ok((id, version, created)) => {
                if created {
                    tracing::info!(%id, %locale, "record created");
                }
                self.mode = SessionMode::Edit(id.clone());
                self.drafts.mark_saved(locale, version);
                self.saved_locales.insert(locale);

                if let Some(callback) = &self.on_saved {
                    callback(&id);
                }
                self.notifier.notify(if created {
                    EditorEvent::Created {
                        id: id.clone(),
                        locale,
                    }
                } else {
                    EditorEvent::Saved {
                        id: id.clone(),
                        locale,
                    }
                });

                Ok(SaveOutcome {
                    id,
                    locale,
                    created,
                })
            }
            Err(err) => {
                tracing::warn!(%locale, error = %err, "save failed");
                self.notifier.notify(EditorEvent::Error(err.user_message()));
                Err(err)
            }
        }
    }

    /// 删除整条记录，成功后会话回到空的新建状态
    pub async fn delete(&mut self) -> EditorResult<RecordId> {
        let id = self.record_id().cloned().ok_or(EditorError::NotPersisted)?;
        let _guard = BusyGuard::acquire(&self.busy).ok_or(EditorError::Busy)?;

        self.notifier.notify(EditorEvent::Loading(true));
        let result = cancellable(&self.cancel, self.store.delete(&id)).await;
        self.notifier.notify(EditorEvent::Loading(false));

        match result {
            Ok(()) => {
                self.drafts = DraftCache::empty();
                self.mode = SessionMode::New;
                self.saved_locales.clear();
                self.notifier.notify(EditorEvent::Deleted(id.clone()));
                Ok(id)
            }
            Err(err) => {
                self.notifier.notify(EditorEvent::Error(err.user_message()));
                Err(err)
            }
        }
    }

    /// 关闭会话：取消进行中的请求并丢弃未保存的草稿
    pub fn close(self) -> Vec<Locale> {
        let discarded = self.drafts.dirty_locales();
        if !discarded.is_empty() {
            tracing::debug!(?discarded, "closing session with unsaved drafts");
        }
        self.cancel.cancel();
        discarded
    }
}

impl Drop for EditorSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::memory::{MemoryContentStore, StoreRequest};
    use crate::core::notify::RecordingNotifier;
    use crate::models::record::TranslationPayload;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    fn setup() -> (Arc<MemoryContentStore>, RecordingNotifier) {
        (Arc::new(MemoryContentStore::new()), RecordingNotifier::new())
    }

    fn fill(session: &mut EditorSession, locale: Locale, question: &str, answer: &str) {
        session.select(locale);
        session.update(locale, DraftField::Question, question);
        session.update(locale, DraftField::Answer, answer);
    }

    #[tokio::test]
    async fn empty_question_is_rejected_without_request() {
        let (store, notifier) = setup();
        let (mut session, status) =
            EditorSession::open(store.clone(), Arc::new(notifier.clone()), None).await;
        assert!(matches!(status, LoadStatus::Fresh));

        session.update(Locale::En, DraftField::Question, "   ");
        session.update(Locale::En, DraftField::Answer, "X is Y.");
        let err = session.save().await.unwrap_err();

        match err {
            EditorError::Validation { missing } => {
                assert_eq!(missing, vec![DraftField::Question]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(store.request_count(), 0);
        assert!(notifier.errors()[0].contains("Question"));
        assert!(!notifier.errors()[0].contains("Answer"));
    }

    #[tokio::test]
    async fn create_then_second_locale_reuses_id() {
        let (store, notifier) = setup();
        let (mut session, _) = EditorSession::open(store.clone(), Arc::new(notifier), None).await;

        fill(&mut session, Locale::En, "What is X?", "X is Y.");
        let first = session.save().await.unwrap();
        assert!(first.created);

        fill(&mut session, Locale::Es, "¿Qué es X?", "X es Y.");
        let second = session.save().await.unwrap();
        assert!(!second.created);
        assert_eq!(second.id, first.id);
        assert_eq!(store.record_count(), 1);

        let requests = store.requests();
        assert_eq!(
            requests[0],
            StoreRequest::Create(TranslationPayload {
                question: "What is X?".to_string(),
                answer: "X is Y.".to_string(),
                locale: Locale::En,
            })
        );
        assert!(matches!(
            &requests[1],
            StoreRequest::Update { id, payload, .. }
                if *id == first.id && payload.locale == Locale::Es
        ));
        assert_eq!(
            session.saved_locales().iter().copied().collect::<Vec<_>>(),
            vec![Locale::En, Locale::Es]
        );
        assert_eq!(session.draft(Locale::En).question, "What is X?");
        assert!(session.draft(Locale::En).exists);
    }

    #[tokio::test]
    async fn loading_existing_record_marks_persisted_locales() {
        let (store, notifier) = setup();
        let id = store.seed(&[
            (Locale::En, "What is X?", "X is Y."),
            (Locale::Es, "¿Qué es X?", "X es Y."),
        ]);
        let (session, status) =
            EditorSession::open(store.clone(), Arc::new(notifier), Some(id.clone())).await;

        match status {
            LoadStatus::Loaded(locales) => assert_eq!(locales, vec![Locale::En, Locale::Es]),
            other => panic!("unexpected status: {other:?}"),
        }
        assert_eq!(session.mode(), &SessionMode::Edit(id));
        assert_eq!(session.active(), Locale::En);
        for locale in Locale::ALL {
            let expected = matches!(locale, Locale::En | Locale::Es);
            assert_eq!(session.draft(locale).exists, expected, "{locale}");
        }
    }

    #[tokio::test]
    async fn missing_record_starts_fresh() {
        let (store, notifier) = setup();
        let (session, status) = EditorSession::open(
            store.clone(),
            Arc::new(notifier.clone()),
            Some(RecordId::from("404")),
        )
        .await;
        assert!(matches!(status, LoadStatus::NotFound));
        assert_eq!(session.mode(), &SessionMode::New);
        assert_eq!(notifier.warnings().len(), 1);
        assert!(notifier.errors().is_empty());
    }

    #[tokio::test]
    async fn failed_load_keeps_empty_drafts() {
        let (store, notifier) = setup();
        let id = store.seed(&[(Locale::En, "Q", "A")]);
        store.fail_next(500, "upstream timeout");
        let (session, status) =
            EditorSession::open(store.clone(), Arc::new(notifier.clone()), Some(id)).await;

        assert!(matches!(status, LoadStatus::Failed(EditorError::Server { .. })));
        assert!(session.drafts().iter().all(|draft| !draft.exists));
        assert_eq!(notifier.errors(), vec!["upstream timeout".to_string()]);
    }

    #[tokio::test]
    async fn server_error_keeps_draft_for_retry() {
        let (store, notifier) = setup();
        let (mut session, _) =
            EditorSession::open(store.clone(), Arc::new(notifier.clone()), None).await;
        fill(&mut session, Locale::En, "What is X?", "X is Y.");

        store.fail_next(500, "Database unavailable");
        let err = session.save().await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(notifier.errors(), vec!["Database unavailable".to_string()]);
        assert_eq!(session.mode(), &SessionMode::New);
        assert!(!session.draft(Locale::En).exists);
        assert_eq!(session.draft(Locale::En).question, "What is X?");

        let outcome = session.save().await.unwrap();
        assert!(outcome.created);
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn refresh_callback_runs_after_each_save() {
        let (store, notifier) = setup();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut session = EditorSession::new(store.clone(), Arc::new(notifier))
            .with_refresh(Box::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }));

        fill(&mut session, Locale::De, "Was ist X?", "X ist Y.");
        session.save().await.unwrap();
        fill(&mut session, Locale::It, "", "X è Y.");
        assert!(session.save().await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn stale_version_surfaces_conflict() {
        let (store, notifier) = setup();
        let id = store.seed(&[(Locale::En, "Q", "A")]);
        let (mut session, _) =
            EditorSession::open(store.clone(), Arc::new(notifier), Some(id.clone())).await;

        // 另一个编辑者先保存
        store
            .update(
                &id,
                &TranslationPayload {
                    question: "Q (other tab)".to_string(),
                    answer: "A".to_string(),
                    locale: Locale::En,
                },
                None,
            )
            .await
            .unwrap();

        session.update(Locale::En, DraftField::Question, "Q (mine)");
        let err = session.save().await.unwrap_err();
        assert!(matches!(err, EditorError::Conflict(_)));
        assert_eq!(session.draft(Locale::En).question, "Q (mine)");
        assert_eq!(store.translation(&id, Locale::En).unwrap().question, "Q (other tab)");
    }

    #[tokio::test]
    async fn cancel_aborts_in_flight_save() {
        let store = Arc::new(MemoryContentStore::new().with_latency(Duration::from_millis(200)));
        let notifier = RecordingNotifier::new();
        let mut session = EditorSession::new(store.clone(), Arc::new(notifier));
        fill(&mut session, Locale::En, "What is X?", "X is Y.");

        let handle = session.handle();
        let watcher = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            let busy = handle.is_busy();
            handle.cancel();
            busy
        };
        let (result, was_busy) = tokio::join!(session.save(), watcher);

        assert!(was_busy);
        assert!(matches!(result, Err(EditorError::Cancelled)));
        assert!(!session.is_busy());
        assert_eq!(session.draft(Locale::En).question, "What is X?");
        assert!(matches!(session.save().await, Err(EditorError::Cancelled)));
    }

    #[tokio::test]
    async fn delete_requires_persisted_record() {
        let (store, notifier) = setup();
        let (mut session, _) = EditorSession::open(store.clone(), Arc::new(notifier), None).await;
        assert!(matches!(
            session.delete().await,
            Err(EditorError::NotPersisted)
        ));

        fill(&mut session, Locale::En, "Q", "A");
        let id = session.save().await.unwrap().id;
        assert_eq!(session.delete().await.unwrap(), id);
        assert_eq!(session.mode(), &SessionMode::New);
        assert_eq!(store.record_count(), 0);
    }

    #[tokio::test]
    async fn saved_draft_shows_the_stored_text() {
        let (store, notifier) = setup();
        let (mut session, _) = EditorSession::open(store.clone(), Arc::new(notifier), None).await;
        fill(&mut session, Locale::De, "  Was ist X? ", "X ist Y.\n");
        let id = session.save().await.unwrap().id;

        let stored = store.translation(&id, Locale::De).unwrap();
        let draft = session.draft(Locale::De);
        assert_eq!(draft.question, stored.question);
        assert_eq!(draft.answer, "X ist Y.");
        assert!(!draft.is_dirty());
        assert!(session.close().is_empty());
    }

    #[tokio::test]
    async fn close_reports_unsaved_locales() {
        let (store, notifier) = setup();
        let (mut session, _) = EditorSession::open(store.clone(), Arc::new(notifier), None).await;
        fill(&mut session, Locale::En, "Q", "A");
        session.save().await.unwrap();
        session.update(Locale::Zh, DraftField::Question, "什么是 X？");

        let handle = session.handle();
        assert_eq!(session.close(), vec![Locale::Zh]);
        assert!(handle.is_cancelled());
        assert_eq!(store.request_count(), 1);
    }
}
