#![forbid(unsafe_code)]

//! Panel notifications.
//!
//! # Design
//!
//! [`Notifier`] keeps its subscribers as weak references, handing the strong
//! reference back to the caller inside a [`Subscription`] guard. Dropping the
//! guard unsubscribes; dead entries are pruned on the next emit.
//!
//! Subscribing is only possible until the notifier is sealed, which happens
//! when the panels are finalized. Every event therefore reaches exactly the
//! listeners registered before the first activation.
//!
//! # Failure Modes
//!
//! - **Late subscription**: [`Notifier::subscribe`] after sealing fails with
//!   [`PanelError::ListenersSealed`].
//! - **Re-entrancy**: callbacks receive the event only, never the
//!   application, so they cannot trigger transitions while one is running.

use std::rc::{Rc, Weak};

use mdpanel_core::{PanelError, PanelId, PanelState};
use serde::{Deserialize, Serialize};

type CallbackRc = Rc<dyn Fn(&PanelEvent)>;
type CallbackWeak = Weak<dyn Fn(&PanelEvent)>;

/// Which visibility state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// A master's detail area.
    Detail,
    /// A panel's edit surface.
    Edit,
}

/// Something observers may react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PanelEvent {
    /// The panel became the display and focus target.
    Activated { panel: PanelId },
    /// The panel asked to be shown without a focus change.
    DisplayRequested { panel: PanelId },
    /// An editor's active flag changed.
    ActiveChanged { panel: PanelId, active: bool },
    /// A detail area or edit surface changed state.
    StateChanged {
        panel: PanelId,
        surface: Surface,
        state: PanelState,
    },
}

/// Fan-out of [`PanelEvent`]s to registered callbacks.
#[derive(Default)]
pub struct Notifier {
    subscribers: Vec<CallbackWeak>,
    sealed: bool,
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("subscriber_count", &self.subscribers.len())
            .field("sealed", &self.sealed)
            .finish()
    }
}

impl Notifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback. Fails once the notifier is sealed.
    pub fn subscribe(
        &mut self,
        callback: impl Fn(&PanelEvent) + 'static,
    ) -> Result<Subscription, PanelError> {
        if self.sealed {
            return Err(PanelError::ListenersSealed);
        }
        let strong: CallbackRc = Rc::new(callback);
        self.subscribers.push(Rc::downgrade(&strong));
        Ok(Subscription {
            _guard: Box::new(strong),
        })
    }

    /// Refuse further subscriptions.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Number of registered subscribers, including dead ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Deliver `event` to live subscribers in registration order.
    pub fn emit(&mut self, event: &PanelEvent) {
        self.subscribers.retain(|weak| weak.strong_count() > 0);
        let callbacks: Vec<CallbackRc> = self.subscribers.iter().filter_map(Weak::upgrade).collect();
        tracing::trace!(
            message = "notify.emit",
            ?event,
            subscribers = callbacks.len()
        );
        for callback in &callbacks {
            callback(event);
        }
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping it makes the callback unreachable.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
