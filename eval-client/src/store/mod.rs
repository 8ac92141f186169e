//! 客户端状态容器
//!
//! 显式创建并注入，不是全局单例。状态只能通过 [`Store::dispatch`] 修改；
//! [`Store::subscribe`] 返回的 [`Subscription`] 被 drop 时自动取消订阅。
//!
//! ```ignore
//! let store = Store::new();
//! let _sub = store.subscribe(|state| println!("loading: {}", state.evaluations.loading));
//! store.dispatch(EvaluationAction::Pending.into());
//! ```

pub mod action;
pub mod reducer;
pub mod state;
pub mod thunks;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex, RwLock};

pub use action::{
    Action, AuthAction, CommentAction, EmployeeAction, EvaluationAction, TemplateAction, UiAction,
};
pub use state::AppState;
pub use thunks::Thunks;

type Listener = Arc<dyn Fn(&AppState) + Send + Sync>;

struct StoreInner {
    /// 串行化 reduce 与通知；可重入，监听器内部可以再次 dispatch
    dispatching: ReentrantMutex<()>,
    state: RwLock<AppState>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_id: AtomicU64,
}

/// Shared state container (clone 共享同一份状态)
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("listeners", &self.inner.listeners.lock().len())
            .finish()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    /// 以给定状态启动（恢复会话等）
    pub fn with_state(state: AppState) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                dispatching: ReentrantMutex::new(()),
                state: RwLock::new(state),
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// 当前状态快照
    pub fn state(&self) -> AppState {
        self.inner.state.read().clone()
    }

    /// 读取状态的一部分，不克隆整个状态
    pub fn select<R>(&self, selector: impl FnOnce(&AppState) -> R) -> R {
        selector(&*self.inner.state.read())
    }

    /// 应用动作并通知订阅者
    ///
    /// 并发 dispatch 按顺序执行，订阅者收到的快照顺序与状态变更顺序一致。
    /// 状态写锁在通知前释放，回调里可以 select 或再次 dispatch
    pub fn dispatch(&self, action: Action) {
        let _serial = self.inner.dispatching.lock();

        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();

        let snapshot = {
            let mut state = self.inner.state.write();
            reducer::reduce(&mut state, action);
            (!listeners.is_empty()).then(|| state.clone())
        };

        if let Some(snapshot) = snapshot {
            for listener in listeners {
                listener(&snapshot);
            }
        }
    }

    /// 注册订阅者
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl Fn(&AppState) + Send + Sync + 'static) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.lock().push((id, Arc::new(listener)));
        Subscription {
            id,
            store: Arc::downgrade(&self.inner),
        }
    }

    /// 当前订阅者数量
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }
}

/// 订阅句柄，drop 时取消订阅
pub struct Subscription {
    id: u64,
    store: Weak<StoreInner>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner.listeners.lock().retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use state::{Notification, Severity};
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_subscribers_see_new_state() {
        let store = Store::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let counter = seen.clone();
        let sub = store.subscribe(move |state| {
            if state.ui.global_loading {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        store.dispatch(UiAction::SetGlobalLoading(true).into());
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert!(store.select(|s| s.ui.global_loading));

        drop(sub);
        assert_eq!(store.listener_count(), 0);
        store.dispatch(UiAction::SetGlobalLoading(true).into());
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_listener_may_dispatch() {
        let store = Store::new();
        let inner = store.clone();
        let _sub = store.subscribe(move |state| {
            if state.ui.snackbar.open {
                inner.dispatch(UiAction::HideSnackbar.into());
            }
        });

        store.dispatch(Action::success("Saved"));
        assert!(!store.state().ui.snackbar.open);
    }

    #[test]
    fn test_concurrent_dispatch_notifies_in_order() {
        let store = Store::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let log = seen.clone();
        let _sub = store.subscribe(move |state| log.lock().push(state.ui.notifications.len()));

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        store.dispatch(
                            UiAction::AddNotification(Notification::new("tick", Severity::Info))
                                .into(),
                        );
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let seen = seen.lock();
        assert_eq!(*seen, (1..=200).collect::<Vec<_>>());
    }

    #[test]
    fn test_subscription_outlives_store() {
        let store = Store::new();
        let sub = store.subscribe(|_| {});
        drop(store);
        drop(sub);
    }
}
