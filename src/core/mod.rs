// ============================================================================
// FaqDesk - Core 核心模块
// ============================================================================
//
// 文件: src/core/mod.rs
// 职责: 核心业务逻辑模块入口和导出
// 边界:
//   - ✅ 核心子模块导出
//   - ✅ 常用类型重新导出
//   - ❌ 不应包含具体业务实现
//   - ❌ 不应包含 CLI 相关逻辑
//   - ❌ 不应包含 UI 相关逻辑
//
// ============================================================================

pub mod drafts;
pub mod error;
pub mod listing;
pub mod memory;
pub mod notify;
pub mod scheduler;
pub mod session;
pub mod store;

// 重新导出常用类型
pub use drafts::DraftCache;
pub use error::{EditorError, EditorResult};
pub use listing::{Confirmer, ListOptions, ListRow, ListView};
pub use memory::MemoryContentStore;
pub use notify::{ConsoleNotifier, EditorEvent, Notifier, RecordingNotifier, SharedNotifier};
pub use session::{EditorSession, LoadStatus, SaveOutcome, SessionHandle, SessionMode};
pub use store::{ContentStore, HttpContentStore};
