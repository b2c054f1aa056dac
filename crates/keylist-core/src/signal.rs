//! Signal/slot system for keylist.
//!
//! This module provides a type-safe signal/slot mechanism used as the
//! change-notification transport of the keylist models. A model owns its
//! signals and emits into them; observers connect slots (callbacks) that are
//! invoked synchronously, in connection order, on the emitting thread.
//!
//! # Key Types
//!
//! - [`Signal<Args>`]: the sink a model pushes changes into
//! - [`ConnectionId`]: handle for one connected observer
//! - [`ConnectionGuard`]: disconnects its observer on drop
//!
//! # Re-entrancy
//!
//! Slots are collected before they are invoked, so a slot may connect or
//! disconnect other slots (or itself) on the same signal, and may call back
//! into the object that emitted. Connections made during an emission receive
//! the next emission, not the current one.
//!
//! # Example
//!
//! ```
//! use keylist_core::Signal;
//!
//! // (old_index, new_index) of a moved row
//! let row_moved = Signal::<(usize, usize)>::new();
//!
//! let observer = row_moved.connect(|(from, to)| {
//!     println!("row {from} is now row {to}");
//! });
//!
//! row_moved.emit((0, 2));
//! assert!(row_moved.disconnect(observer).is_ok());
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::error::SignalError;
use crate::logging::targets;

new_key_type! {
    /// Handle for one connected slot.
    ///
    /// Pass it to [`Signal::disconnect`]. Stale handles are rejected with
    /// [`SignalError::InvalidConnection`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;
type Connections<Args> = Mutex<SlotMap<ConnectionId, Slot<Args>>>;

/// A notification sink with any number of connected slots.
///
/// `emit` hands every slot a reference to the same payload. Models emit an
/// enum describing the change; plain tuples work for ad hoc signals.
pub struct Signal<Args> {
    /// All active connections. Shared with [`ConnectionGuard`]s through a weak handle.
    connections: Arc<Connections<Args>>,
    /// Set while notifications are switched off.
    blocked: AtomicBool,
}

static_assertions::assert_impl_all!(Signal<()>: Send, Sync);
static_assertions::assert_impl_all!(Signal<(usize, String)>: Send, Sync);

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connections.lock().len())
            .field("blocked", &self.blocked.load(Ordering::SeqCst))
            .finish()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Creates a signal nobody listens to yet.
    pub fn new() -> Self {
        Self {
            connections: Arc::new(Mutex::new(SlotMap::with_key())),
            blocked: AtomicBool::new(false),
        }
    }

    /// Adds a slot. It runs on every later emission until disconnected.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Adds a slot that lives as long as the returned guard.
    ///
    /// The guard only holds a weak handle to the connection table, so it may
    /// safely outlive the signal.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard {
            connections: Arc::downgrade(&self.connections),
            id: Some(id),
        }
    }

    /// Removes one slot.
    ///
    /// Returns [`SignalError::InvalidConnection`] if the ID is unknown or was
    /// already disconnected.
    pub fn disconnect(&self, id: ConnectionId) -> Result<(), SignalError> {
        self.connections
            .lock()
            .remove(id)
            .map(|_| ())
            .ok_or(SignalError::InvalidConnection)
    }

    /// Removes every slot.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Switches notifications off (`true`) or back on.
    ///
    /// Emissions made while blocked are dropped, not queued.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Returns `true` while notifications are switched off.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots in connection order.
    ///
    /// If the signal is blocked, this does nothing.
    #[tracing::instrument(skip_all, target = "keylist_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        // Release the lock before invoking so slots may touch the signal.
        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

/// Scoped connection returned by [`Signal::connect_scoped`].
///
/// ```
/// use keylist_core::Signal;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let resets = Signal::<()>::new();
/// let seen = Arc::new(AtomicUsize::new(0));
/// {
///     let seen = seen.clone();
///     let _view = resets.connect_scoped(move |_| {
///         seen.fetch_add(1, Ordering::SeqCst);
///     });
///     resets.emit(());
/// }
/// resets.emit(());
/// assert_eq!(seen.load(Ordering::SeqCst), 1);
/// ```
pub struct ConnectionGuard<Args> {
    connections: Weak<Connections<Args>>,
    id: Option<ConnectionId>,
}

impl<Args> ConnectionGuard<Args> {
    /// The ID of the guarded connection, if it is still held by this guard.
    pub fn id(&self) -> Option<ConnectionId> {
        self.id
    }

    /// Disconnect now instead of on drop.
    ///
    /// Returns [`SignalError::SignalDropped`] if the signal no longer exists and
    /// [`SignalError::InvalidConnection`] if the slot was already removed.
    pub fn disconnect(&mut self) -> Result<(), SignalError> {
        let id = self.id.take().ok_or(SignalError::InvalidConnection)?;
        let connections = self.connections.upgrade().ok_or(SignalError::SignalDropped)?;
        let removed = connections.lock().remove(id);
        removed.map(|_| ()).ok_or(SignalError::InvalidConnection)
    }

    /// Keep the connection alive forever, returning its ID.
    pub fn detach(mut self) -> Option<ConnectionId> {
        self.id.take()
    }
}

impl<Args> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        if self.id.is_some() {
            let _ = self.disconnect();
        }
    }
}

impl<Args> fmt::Debug for ConnectionGuard<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionGuard").field("id", &self.id).finish()
    }
}
