// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::api::{ApiClient, ApiError};
use crate::models::Notification;

pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    Updated,
    /// Marking an already-read item is a no-op, not an error.
    AlreadyRead,
    Missing,
}

/// Local cache of the server's notification list. Unread count is always
/// derived from the items, never stored.
#[derive(Debug, Default)]
pub struct Inbox {
    items: Vec<Notification>,
}

impl Inbox {
    pub fn replace(&mut self, items: Vec<Notification>) {
        self.items = items;
    }

    pub fn reset(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn unread(&self) -> usize {
        self.items.iter().filter(|n| !n.is_read).count()
    }

    pub fn ids(&self) -> Vec<String> {
        self.items.iter().map(|n| n.id.clone()).collect()
    }

    pub fn get(&self, id: &str) -> Option<&Notification> {
        self.items.iter().find(|n| n.id == id)
    }

    pub fn flag_read(&mut self, id: &str) -> MarkOutcome {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(n) if n.is_read => MarkOutcome::AlreadyRead,
            Some(n) => {
                n.is_read = true;
                MarkOutcome::Updated
            }
            None => MarkOutcome::Missing,
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }
}

/// Server-backed notification state. Mutations call the server first and
/// touch the local list only on success; a failed fetch resets the list to
/// empty (the next refresh restores server truth).
pub struct NotificationCenter {
    api: ApiClient,
    authenticated: bool,
    inbox: Mutex<Inbox>,
}

impl NotificationCenter {
    pub fn new(api: ApiClient, authenticated: bool) -> Self {
        Self {
            api,
            authenticated,
            inbox: Mutex::new(Inbox::default()),
        }
    }

    fn inbox(&self) -> MutexGuard<'_, Inbox> {
        self.inbox.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adopt an already-fetched list as the local cache without refetching.
    pub fn adopt(&self, items: Vec<Notification>) {
        self.inbox().replace(items);
    }

    /// Fetch now. Returns the derived unread count. Signed-out callers get
    /// an empty list with no request issued.
    pub fn refresh(&self) -> Result<usize, ApiError> {
        if !self.authenticated {
            self.inbox().reset();
            return Ok(0);
        }
        match self.api.list_notifications() {
            Ok(items) => {
                let mut inbox = self.inbox();
                inbox.replace(items);
                Ok(inbox.unread())
            }
            Err(e) => {
                self.inbox().reset();
                Err(e)
            }
        }
    }

    /// Mark one item read. Already-read items short-circuit locally: no
    /// request, no error. Unknown ids are reported as [`MarkOutcome::Missing`]
    /// without a server call.
    pub fn mark_read(&self, id: &str) -> Result<MarkOutcome, ApiError> {
        match self.inbox().get(id) {
            Some(n) if n.is_read => return Ok(MarkOutcome::AlreadyRead),
            Some(_) => {}
            None => return Ok(MarkOutcome::Missing),
        }
        self.api.mark_notification_read(id)?;
        Ok(self.inbox().flag_read(id))
    }

    /// Delete one item server-side, then locally. Failure leaves the local
    /// list unchanged.
    pub fn remove(&self, id: &str) -> Result<(), ApiError> {
        self.api.delete_notification(id)?;
        self.inbox().remove(id);
        Ok(())
    }

    /// Delete every item sequentially. The local list empties only when all
    /// deletes succeeded; the first failure aborts with the list untouched,
    /// and the next refresh restores the server-trusted state.
    pub fn clear(&self) -> Result<usize, ApiError> {
        let ids = self.inbox().ids();
        for id in &ids {
            self.api.delete_notification(id)?;
        }
        self.inbox().reset();
        Ok(ids.len())
    }

    pub fn unread(&self) -> usize {
        self.inbox().unread()
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        self.inbox().items().to_vec()
    }
}

/// Timer-driven refresh task: one immediate fetch, then one per interval,
/// until [`Poller::stop`] is called. Overlap with a user-triggered refresh is
/// not deduplicated; the last reply wins.
pub struct Poller {
    stop: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

impl Poller {
    pub fn spawn(center: Arc<NotificationCenter>, every: Duration) -> Self {
        let (stop, ticks) = mpsc::channel();
        let handle = thread::spawn(move || {
            let mut last = usize::MAX;
            loop {
                match center.refresh() {
                    Ok(unread) => {
                        if unread != last {
                            println!(
                                "[{}] {} unread notification(s)",
                                chrono::Local::now().format("%H:%M:%S"),
                                unread
                            );
                            last = unread;
                        }
                    }
                    Err(e) => eprintln!("Could not refresh notifications: {}", e),
                }
                match ticks.recv_timeout(every) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    // Stop signal, or the handle was dropped.
                    _ => break,
                }
            }
        });
        Self { stop, handle }
    }

    pub fn stop(self) {
        let _ = self.stop.send(());
        let _ = self.handle.join();
    }
}
