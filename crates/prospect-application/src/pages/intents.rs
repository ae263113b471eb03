//! Per-page intent queue filled by command actions.

use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc;

pub(crate) struct IntentQueue<I> {
    sender: mpsc::UnboundedSender<I>,
    receiver: Mutex<mpsc::UnboundedReceiver<I>>,
}

impl<I: Send + 'static> IntentQueue<I> {
    pub(crate) fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            receiver: Mutex::new(receiver),
        }
    }

    /// A posting handle for command actions.
    pub(crate) fn poster(&self) -> IntentPoster<I> {
        IntentPoster {
            sender: self.sender.clone(),
        }
    }

    /// Takes everything posted so far, oldest first.
    pub(crate) fn drain(&self) -> Vec<I> {
        let mut receiver = self.receiver.lock().unwrap_or_else(PoisonError::into_inner);
        let mut intents = Vec::new();
        while let Ok(intent) = receiver.try_recv() {
            intents.push(intent);
        }
        intents
    }
}

pub(crate) struct IntentPoster<I> {
    sender: mpsc::UnboundedSender<I>,
}

impl<I> Clone for IntentPoster<I> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<I> IntentPoster<I> {
    pub(crate) fn post(&self, intent: I) {
        // The queue lives as long as its page; a failed send means the page is gone.
        let _ = self.sender.send(intent);
    }
}
