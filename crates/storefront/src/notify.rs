//! Transient notifications ("toasts").
//!
//! Each toast is removed by its own dismissal task after a fixed lifetime.
//! The task handle is kept with the toast so a toast can be dismissed early
//! or replaced, which aborts the pending timer.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Receives user-facing messages from storefront operations.
pub trait Notifier {
    /// Show `message` to the user.
    fn notify(&self, message: &str);
}

/// Notifier that only writes to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::info!(message, "Notification");
    }
}

/// What happens to visible toasts when a new one arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Keep earlier toasts; each expires on its own timer.
    #[default]
    Stack,
    /// Cancel and remove earlier toasts so only the newest is visible.
    Replace,
}

impl std::str::FromStr for OverlapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stack" => Ok(Self::Stack),
            "replace" => Ok(Self::Replace),
            _ => Err(format!("invalid overlap policy: {s} (expected stack or replace)")),
        }
    }
}

/// A visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
}

struct ActiveToast {
    toast: Toast,
    dismissal: Option<JoinHandle<()>>,
}

impl ActiveToast {
    fn cancel(self) {
        if let Some(handle) = self.dismissal {
            handle.abort();
        }
    }
}

#[derive(Default)]
struct ToastState {
    next_id: u64,
    active: Vec<ActiveToast>,
}

/// Notification area with timed auto-dismissal.
///
/// Cheap to clone; clones share the same toasts.
#[derive(Clone)]
pub struct ToastCenter {
    inner: Arc<Mutex<ToastState>>,
    lifetime: Duration,
    policy: OverlapPolicy,
}

impl std::fmt::Debug for ToastCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastCenter")
            .field("lifetime", &self.lifetime)
            .field("policy", &self.policy)
            .field("active", &self.active().len())
            .finish()
    }
}

impl ToastCenter {
    /// Create a notification area.
    #[must_use]
    pub fn new(lifetime: Duration, policy: OverlapPolicy) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ToastState::default())),
            lifetime,
            policy,
        }
    }

    /// Show a toast and schedule its removal. Returns the toast id.
    ///
    /// Outside a tokio runtime no timer can be scheduled; the toast stays
    /// until [`ToastCenter::dismiss`] is called.
    pub fn show(&self, message: &str) -> u64 {
        let id = {
            let mut state = self.lock();
            if self.policy == OverlapPolicy::Replace {
                for previous in state.active.drain(..) {
                    previous.cancel();
                }
            }
            let id = state.next_id;
            state.next_id += 1;
            state.active.push(ActiveToast {
                toast: Toast {
                    id,
                    message: message.to_string(),
                },
                dismissal: None,
            });
            id
        };

        if let Some(handle) = self.schedule_dismissal(id) {
            let mut state = self.lock();
            match state.active.iter_mut().find(|t| t.toast.id == id) {
                Some(active) => active.dismissal = Some(handle),
                // Already removed (replaced or dismissed) before the timer was stored.
                None => handle.abort(),
            }
        }

        tracing::debug!(id, message, "Toast shown");
        id
    }

    /// Remove a toast now and cancel its timer.
    ///
    /// Returns `false` if no toast with `id` is visible.
    pub fn dismiss(&self, id: u64) -> bool {
        let removed = take_toast(&self.inner, id);
        removed.map(ActiveToast::cancel).is_some()
    }

    /// Currently visible toasts, oldest first.
    #[must_use]
    pub fn active(&self) -> Vec<Toast> {
        self.lock()
            .active
            .iter()
            .map(|active| active.toast.clone())
            .collect()
    }

    fn schedule_dismissal(&self, id: u64) -> Option<JoinHandle<()>> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(id, "No async runtime; toast will not auto-dismiss");
            return None;
        };

        let inner = Arc::clone(&self.inner);
        let lifetime = self.lifetime;
        Some(runtime.spawn(async move {
            tokio::time::sleep(lifetime).await;
            if take_toast(&inner, id).is_some() {
                tracing::debug!(id, "Toast expired");
            }
        }))
    }

    fn lock(&self) -> MutexGuard<'_, ToastState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for ToastCenter {
    fn notify(&self, message: &str) {
        self.show(message);
    }
}

/// Remove toast `id` from the shared state without touching its timer.
fn take_toast(inner: &Mutex<ToastState>, id: u64) -> Option<ActiveToast> {
    let mut state = inner.lock().unwrap_or_else(PoisonError::into_inner);
    let index = state.active.iter().position(|t| t.toast.id == id)?;
    Some(state.active.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIFETIME: Duration = Duration::from_millis(3000);

    fn messages(center: &ToastCenter) -> Vec<String> {
        center.active().into_iter().map(|t| t.message).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_expires_after_lifetime() {
        let center = ToastCenter::new(LIFETIME, OverlapPolicy::Stack);
        center.show("Product added to cart!");

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert_eq!(messages(&center), ["Product added to cart!"]);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(center.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stack_keeps_overlapping_toasts() {
        let center = ToastCenter::new(LIFETIME, OverlapPolicy::Stack);
        center.show("first");
        tokio::time::sleep(Duration::from_millis(1000)).await;
        center.show("second");

        assert_eq!(messages(&center), ["first", "second"]);

        // First expires at 3000ms, second at 4000ms.
        tokio::time::sleep(Duration::from_millis(2001)).await;
        assert_eq!(messages(&center), ["second"]);

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(center.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_replace_keeps_only_newest() {
        let center = ToastCenter::new(LIFETIME, OverlapPolicy::Replace);
        center.show("first");
        tokio::time::sleep(Duration::from_millis(1000)).await;
        center.show("second");

        assert_eq!(messages(&center), ["second"]);

        // The replaced toast's timer must not remove anything at 3000ms.
        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(messages(&center), ["second"]);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(center.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_cancels_timer() {
        let center = ToastCenter::new(LIFETIME, OverlapPolicy::Stack);
        let id = center.show("bye");

        assert!(center.dismiss(id));
        assert!(center.active().is_empty());
        assert!(!center.dismiss(id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ids_are_unique() {
        let center = ToastCenter::new(LIFETIME, OverlapPolicy::Stack);
        let a = center.show("a");
        let b = center.show("b");
        assert_ne!(a, b);
    }

    #[test]
    fn test_without_runtime_toast_stays() {
        let center = ToastCenter::new(LIFETIME, OverlapPolicy::Stack);
        let id = center.show("no runtime");
        assert_eq!(messages(&center), ["no runtime"]);
        assert!(center.dismiss(id));
    }

    #[test]
    fn test_notifier_impl_shows_toast() {
        let center = ToastCenter::new(LIFETIME, OverlapPolicy::Stack);
        let notifier: &dyn Notifier = &center;
        notifier.notify("hello");
        assert_eq!(messages(&center), ["hello"]);
    }

    #[test]
    fn test_overlap_policy_parse() {
        assert_eq!("stack".parse::<OverlapPolicy>(), Ok(OverlapPolicy::Stack));
        assert_eq!("replace".parse::<OverlapPolicy>(), Ok(OverlapPolicy::Replace));
        assert!("queue".parse::<OverlapPolicy>().is_err());
    }
}
