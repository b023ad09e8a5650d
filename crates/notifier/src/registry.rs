//! Observer registry — an ordered table of state-event callbacks.
//!
//! Observers are held as `&'static dyn StateObserver` references in a
//! fixed-capacity table and called back in registration order.  The table is
//! guarded by a blocking mutex so register/unregister are safe from any task
//! or interrupt context; fan-out copies the entry list out under the lock and
//! invokes the callbacks outside it, so a slow observer can never hold the
//! critical section open.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use thiserror_no_std::Error;

use crate::event::{StateEvent, StateObserver};

/// Maximum number of concurrently registered observers.
pub const MAX_OBSERVERS: usize = 8;

/// Opaque registration handle returned by [`ObserverRegistry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ObserverHandle(u32);

/// Errors returned by observer registration and removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// The table already holds [`MAX_OBSERVERS`] entries.
    #[error("observer table full")]
    Full,
    /// The observer is already registered; an observer receives each
    /// broadcast at most once.
    #[error("observer already registered")]
    AlreadyRegistered,
    /// The handle does not name a currently registered observer (never
    /// issued, or already removed).
    #[error("handle not registered")]
    NotRegistered,
}

type Entry = (ObserverHandle, &'static dyn StateObserver);

struct Table {
    entries: heapless::Vec<Entry, MAX_OBSERVERS>,
    next_id: u32,
}

/// Ordered, fixed-capacity set of state-event observers.
pub struct ObserverRegistry {
    table: Mutex<CriticalSectionRawMutex, RefCell<Table>>,
}

impl ObserverRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            table: Mutex::new(RefCell::new(Table {
                entries: heapless::Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Register `observer` to receive future broadcasts, after all currently
    /// registered observers.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AlreadyRegistered`] if `observer` is already
    /// in the table, or [`RegistryError::Full`] if the table holds
    /// [`MAX_OBSERVERS`] entries.
    pub fn register(
        &self,
        observer: &'static dyn StateObserver,
    ) -> Result<ObserverHandle, RegistryError> {
        self.table.lock(|table| {
            let mut table = table.borrow_mut();
            if table
                .entries
                .iter()
                .any(|(_, existing)| observer_eq(*existing, observer))
            {
                return Err(RegistryError::AlreadyRegistered);
            }
            let handle = ObserverHandle(table.next_id);
            table.next_id = table.next_id.wrapping_add(1);
            table
                .entries
                .push((handle, observer))
                .map_err(|_| RegistryError::Full)?;
            Ok(handle)
        })
    }

    /// Remove the observer identified by `handle`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotRegistered`] if `handle` was never issued
    /// or its observer has already been removed.
    pub fn unregister(&self, handle: ObserverHandle) -> Result<(), RegistryError> {
        self.table.lock(|table| {
            let mut table = table.borrow_mut();
            let position = table
                .entries
                .iter()
                .position(|(registered, _)| *registered == handle)
                .ok_or(RegistryError::NotRegistered)?;
            table.entries.remove(position);
            Ok(())
        })
    }

    /// Number of currently registered observers.
    pub fn len(&self) -> usize {
        self.table.lock(|table| table.borrow().entries.len())
    }

    /// Returns `true` when no observers are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver `event` to every registered observer, in registration order.
    ///
    /// The entry list is snapshotted under the lock; callbacks run outside
    /// the critical section on the caller's (worker) context.
    pub(crate) fn notify(&self, event: StateEvent) {
        let snapshot: heapless::Vec<&'static dyn StateObserver, MAX_OBSERVERS> = self
            .table
            .lock(|table| table.borrow().entries.iter().map(|(_, o)| *o).collect());
        for observer in snapshot {
            observer.on_state_event(event);
        }
    }
}

impl Default for ObserverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity comparison for trait objects: same underlying data pointer.
fn observer_eq(a: &'static dyn StateObserver, b: &'static dyn StateObserver) -> bool {
    core::ptr::eq(
        (a as *const dyn StateObserver).cast::<()>(),
        (b as *const dyn StateObserver).cast::<()>(),
    )
}
