//! User-triggerable operations with an invocability guard.
//!
//! A [`Command`] couples an action with an optional "may this run" predicate.
//! Presentation surfaces bind their affordances (buttons, menu entries, key
//! bindings) to commands and watch a [`RequeryNotifier`] to learn when a
//! guard may have flipped, instead of polling every guard.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

/// Errors returned when invoking a command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The guard refused the parameter.
    #[error("command '{0}' cannot run right now")]
    Blocked(&'static str),
}

/// Broadcasts "invocability may have changed" to any number of observers.
///
/// Clones share one channel, so a page can hand the same notifier to all of
/// its commands and raise it once after a state change.
#[derive(Clone)]
pub struct RequeryNotifier {
    sender: Arc<watch::Sender<u64>>,
}

impl RequeryNotifier {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(0);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Tells every subscriber to re-evaluate its guards.
    pub fn notify(&self) {
        self.sender.send_modify(|generation| *generation = generation.wrapping_add(1));
    }

    /// Returns a receiver that wakes up after each [`notify`](Self::notify).
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.sender.subscribe()
    }

    /// Number of notifications raised so far.
    pub fn generation(&self) -> u64 {
        *self.sender.borrow()
    }
}

impl Default for RequeryNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RequeryNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequeryNotifier")
            .field("generation", &self.generation())
            .finish()
    }
}

type Action<P> = Arc<dyn Fn(&P) + Send + Sync>;
type Guard<P> = Arc<dyn Fn(&P) -> bool + Send + Sync>;

/// An action plus an optional guard, parameterized by `P`.
///
/// Without a guard the command is always invocable.
pub struct Command<P: ?Sized = ()> {
    name: &'static str,
    action: Action<P>,
    guard: Option<Guard<P>>,
    requery: RequeryNotifier,
}

impl<P: ?Sized> Command<P> {
    /// Creates an unguarded command with its own notifier.
    pub fn new<F>(name: &'static str, action: F) -> Self
    where
        F: Fn(&P) + Send + Sync + 'static,
    {
        Self {
            name,
            action: Arc::new(action),
            guard: None,
            requery: RequeryNotifier::new(),
        }
    }

    /// Adds the predicate that decides whether the command may run.
    pub fn with_guard<G>(mut self, guard: G) -> Self
    where
        G: Fn(&P) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Arc::new(guard));
        self
    }

    /// Shares `requery` with other commands of the same owner.
    pub fn with_notifier(mut self, requery: RequeryNotifier) -> Self {
        self.requery = requery;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn can_invoke(&self, parameter: &P) -> bool {
        self.guard.as_ref().is_none_or(|guard| guard(parameter))
    }

    /// Runs the action if the guard allows it.
    pub fn invoke(&self, parameter: &P) -> Result<(), CommandError> {
        if !self.can_invoke(parameter) {
            tracing::debug!("[Command] '{}' blocked by its guard", self.name);
            return Err(CommandError::Blocked(self.name));
        }
        (self.action)(parameter);
        Ok(())
    }

    /// Announces that the guard's answer may have changed.
    pub fn raise_can_invoke_changed(&self) {
        self.requery.notify();
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.requery.subscribe()
    }
}

impl<P: ?Sized> Clone for Command<P> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            action: self.action.clone(),
            guard: self.guard.clone(),
            requery: self.requery.clone(),
        }
    }
}

impl<P: ?Sized> fmt::Debug for Command<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("guarded", &self.guard.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_unguarded_command_always_runs() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let command: Command = Command::new("refresh", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(command.can_invoke(&()));
        command.invoke(&()).unwrap();
        command.invoke(&()).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_guard_blocks_action() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let command = Command::new("edit", move |selected: &Option<i64>| {
            assert!(selected.is_some());
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .with_guard(|selected: &Option<i64>| selected.is_some());

        assert!(!command.can_invoke(&None));
        assert_eq!(command.invoke(&None), Err(CommandError::Blocked("edit")));
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        command.invoke(&Some(3)).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_requery_wakes_subscribers() {
        let notifier = RequeryNotifier::new();
        let first: Command = Command::new("a", |_| {}).with_notifier(notifier.clone());
        let second: Command = Command::new("b", |_| {}).with_notifier(notifier.clone());

        let mut rx = second.subscribe();
        first.raise_can_invoke_changed();

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 1);
        assert_eq!(notifier.generation(), 1);
    }
}
