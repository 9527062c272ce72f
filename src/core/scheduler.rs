// ============================================================================
// FaqDesk - 异步请求调度器
// ============================================================================
//
// 文件: src/core/scheduler.rs
// 职责: 有界并发的异步请求扇出
// 边界:
//   - ✅ 异步任务调度和执行
//   - ✅ 并发数量控制
//   - ✅ 任务超时与取消
//   - ✅ 执行结果聚合与进度回调
//   - ❌ 不包含具体业务逻辑
//   - ❌ 不包含 UI 显示逻辑
//
// ============================================================================

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::core::error::EditorResult;

/// 任务执行结果枚举
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult<T> {
    /// 任务执行成功
    Success(T),
    /// 任务执行失败
    Failed(String),
    /// 任务执行超时
    Timeout,
    /// 任务被取消
    Cancelled,
}

impl<T> TaskResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskResult::Success(_))
    }
}

/// 进度回调函数类型 (completed, total)
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// 调度器配置
#[derive(Clone)]
pub struct SchedulerConfig {
    /// 最大并发任务数
    pub max_concurrency: usize,
    /// 单个任务超时时长（None 表示不限制）
    pub timeout: Option<Duration>,
    /// 进度回调函数 (completed, total)
    pub progress_callback: Option<ProgressCallback>,
}

impl std::fmt::Debug for SchedulerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerConfig")
            .field("max_concurrency", &self.max_concurrency)
            .field("timeout", &self.timeout)
            .field("has_progress_callback", &self.progress_callback.is_some())
            .finish()
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_concurrency: num_cpus::get(),
            timeout: None,
            progress_callback: None,
        }
    }
}

/// 异步任务调度器
#[derive(Debug, Clone)]
pub struct AsyncTaskScheduler {
    config: SchedulerConfig,
    semaphore: Arc<Semaphore>,
    cancel: CancellationToken,
    completed: Arc<AtomicUsize>,
}

impl AsyncTaskScheduler {
    /// 创建新的调度器
    pub fn new(config: SchedulerConfig) -> Self {
        let semaphore = Arc::new(Semaphore::new(config.max_concurrency.max(1)));
        Self {
            config,
            semaphore,
            cancel: CancellationToken::new(),
            completed: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// 与外部取消令牌联动
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// 执行单个异步任务
    pub async fn execute_task<T, F>(&self, task_id: &str, total: usize, task: F) -> TaskResult<T>
    where
        F: Future<Output = EditorResult<T>>,
    {
        if self.cancel.is_cancelled() {
            return TaskResult::Cancelled;
        }

        // 获取信号量许可
        let _permit = tokio::select! {
            _ = self.cancel.cancelled() => return TaskResult::Cancelled,
            permit = self.semaphore.acquire() => match permit {
                Ok(permit) => permit,
                Err(_) => return TaskResult::Cancelled,
            },
        };

        let started = Instant::now();
        let run = async {
            match self.config.timeout {
                Some(limit) => match timeout(limit, task).await {
                    Ok(Ok(value)) => TaskResult::Success(value),
                    Ok(Err(err)) => TaskResult::Failed(err.to_string()),
                    Err(_) => TaskResult::Timeout,
                },
                None => match task.await {
                    Ok(value) => TaskResult::Success(value),
                    Err(err) => TaskResult::Failed(err.to_string()),
                },
            }
        };
        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => TaskResult::Cancelled,
            result = run => result,
        };

        let completed = self.completed.fetch_add(1, Ordering::AcqRel) + 1;
        if let Some(callback) = &self.config.progress_callback {
            callback(completed, total);
        }

        match &result {
            TaskResult::Success(_) => {
                tracing::debug!(task_id, elapsed = ?started.elapsed(), "task succeeded");
            }
            TaskResult::Failed(err) => {
                tracing::debug!(task_id, error = %err, "task failed");
            }
            TaskResult::Timeout => tracing::debug!(task_id, "task timed out"),
            TaskResult::Cancelled => tracing::debug!(task_id, "task cancelled"),
        }

        result
    }

    /// 并发执行多个任务，结果顺序与输入一致
    pub async fn execute_batch<T, F>(&self, tasks: Vec<(String, F)>) -> Vec<(String, TaskResult<T>)>
    where
        T: Send + 'static,
        F: Future<Output = EditorResult<T>> + Send + 'static,
    {
        if tasks.is_empty() {
            return Vec::new();
        }

        self.completed.store(0, Ordering::Release);
        let total = tasks.len();
        tracing::debug!(total, max = self.config.max_concurrency, "batch start");

        let mut handles: Vec<(String, JoinHandle<TaskResult<T>>)> = Vec::with_capacity(total);
        for (task_id, task) in tasks {
            let scheduler = self.clone();
            let id = task_id.clone();
            let handle = tokio::spawn(async move { scheduler.execute_task(&id, total, task).await });
            handles.push((task_id, handle));
        }

        let mut results = Vec::with_capacity(total);
        for (task_id, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(err) => TaskResult::Failed(err.to_string()),
            };
            results.push((task_id, result));
        }

        let succeeded = results.iter().filter(|(_, r)| r.is_success()).count();
        tracing::debug!(succeeded, total, "batch complete");
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::EditorError;
    use std::sync::atomic::AtomicUsize;

    #[tokio::test]
    async fn concurrency_is_bounded() {
        let scheduler = AsyncTaskScheduler::new(SchedulerConfig {
            max_concurrency: 2,
            ..Default::default()
        });
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let tasks = (0..6)
            .map(|i| {
                let running = Arc::clone(&running);
                let peak = Arc::clone(&peak);
                let task = async move {
                    let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    running.fetch_sub(1, Ordering::SeqCst);
                    Ok::<_, EditorError>(i)
                };
                (format!("task-{i}"), task)
            })
            .collect();

        let results = scheduler.execute_batch(tasks).await;
        assert_eq!(results.len(), 6);
        assert!(peak.load(Ordering::SeqCst) <= 2);
        assert_eq!(results[3], ("task-3".to_string(), TaskResult::Success(3)));
    }

    #[tokio::test]
    async fn failures_and_timeouts_are_isolated() {
        let scheduler = AsyncTaskScheduler::new(SchedulerConfig {
            max_concurrency: 4,
            timeout: Some(Duration::from_millis(20)),
            ..Default::default()
        });
        let tasks: Vec<(String, std::pin::Pin<Box<dyn Future<Output = EditorResult<u8>> + Send>>)> = vec![
            ("ok".to_string(), Box::pin(async { Ok(1) })),
            (
                "err".to_string(),
                Box::pin(async { Err(EditorError::Transport("reset".to_string())) }),
            ),
            (
                "slow".to_string(),
                Box::pin(async {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    Ok(3)
                }),
            ),
        ];

        let results = scheduler.execute_batch(tasks).await;
        assert!(results[0].1.is_success());
        assert!(matches!(results[1].1, TaskResult::Failed(_)));
        assert_eq!(results[2].1, TaskResult::Timeout);
    }

    #[tokio::test]
    async fn progress_callback_counts_every_task() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let scheduler = AsyncTaskScheduler::new(SchedulerConfig {
            max_concurrency: 3,
            timeout: None,
            progress_callback: Some(Arc::new(move |_, total| {
                assert_eq!(total, 5);
                counter.fetch_add(1, Ordering::SeqCst);
            })),
        });
        let tasks = (0..5)
            .map(|i| (i.to_string(), async move { Ok::<_, EditorError>(i) }))
            .collect();
        scheduler.execute_batch(tasks).await;
        assert_eq!(seen.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn cancelled_token_skips_pending_tasks() {
        let token = CancellationToken::new();
        let scheduler =
            AsyncTaskScheduler::new(SchedulerConfig::default()).with_cancellation(token.child_token());
        token.cancel();
        let result = scheduler
            .execute_task("late", 1, async { Ok::<_, EditorError>(()) })
            .await;
        assert_eq!(result, TaskResult::Cancelled);
    }
}
