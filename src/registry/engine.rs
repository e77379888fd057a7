//! Registry engine
//!
//! This module contains the topic registry responsible for:
//! - minting unique subscription tokens
//! - keeping each topic's subscriptions in registration order
//! - deferring delivery through the injected [`Scheduler`]
//! - removing subscriptions by token or by whole topic
//!
//! Concurrency and usage notes:
//! - The registry is single-threaded. State sits behind `Rc<RefCell<..>>` and
//!   a `Registry` value is a handle: clones share the same topics and token
//!   counter, so every collaborator that receives a clone sees one registry.
//! - No borrow is held while a callback runs, so callbacks may subscribe,
//!   publish or unsubscribe on the same registry.
//! - Callback panics are not caught. What happens to them is up to the
//!   scheduler that runs the dispatch task.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::config::SchedulerSettings;
use crate::registry::topic::{Callback, Identifier, Subscription, Token, Topic, TopicInfo};
use crate::scheduler::{HostScheduler, Scheduler, TickQueue};
use crate::utils::error::{RegistryError, Result};

struct Inner<T> {
    topics: HashMap<String, Topic<T>>,
    next_token: u64,
}

impl<T> Inner<T> {
    fn new() -> Self {
        Self {
            topics: HashMap::new(),
            next_token: 0,
        }
    }

    fn unsubscribe(&mut self, identifier: &Identifier) -> bool {
        match identifier {
            Identifier::Token(token) => self.remove_token(*token),
            // Emptied topics are dropped, so a present entry always has subscribers.
            Identifier::Topic(name) => self.topics.remove(name).is_some(),
        }
    }

    fn remove_token(&mut self, token: Token) -> bool {
        let emptied = self.topics.iter_mut().find_map(|(name, topic)| {
            topic.unsubscribe(token).then(|| (name.clone(), topic.is_empty()))
        });

        match emptied {
            Some((name, true)) => {
                self.topics.remove(&name);
                true
            }
            Some((_, false)) => true,
            None => false,
        }
    }
}

/// Process-wide topic registry handle.
///
/// `T` is the event payload type handed to callbacks by reference. `S` is
/// the deferred-task primitive used by [`Registry::publish`].
pub struct Registry<T, S = TickQueue> {
    inner: Rc<RefCell<Inner<T>>>,
    scheduler: S,
}

impl<T: 'static, S: Scheduler> Registry<T, S> {
    /// Creates an empty registry that defers delivery through `scheduler`.
    pub fn new(scheduler: S) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner::new())),
            scheduler,
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Subscribes `callback` to `topic` and returns the subscription token.
    ///
    /// When `once` is true the subscription is removed right after its first
    /// invocation.
    pub fn subscribe<F>(&self, topic: &str, callback: F, once: bool) -> Result<Token>
    where
        F: Fn(&T, &TopicInfo) + 'static,
    {
        self.subscribe_with(topic, Some(Callback::new(callback)), once)
    }

    /// Subscribes a callback resolved at runtime.
    ///
    /// `None` stands for "no callable callback" and fails with
    /// [`RegistryError::InvalidArgument`] without registering anything or
    /// consuming a token.
    pub fn subscribe_with(
        &self,
        topic: &str,
        callback: Option<Callback<T>>,
        once: bool,
    ) -> Result<Token> {
        let Some(callback) = callback else {
            let err = RegistryError::InvalidArgument {
                topic: topic.to_string(),
            };
            warn!(topic, error = err.as_label(), "rejected subscription");
            return Err(err);
        };

        let mut inner = self.inner.borrow_mut();
        let token = Token(inner.next_token);
        inner.next_token += 1;

        inner
            .topics
            .entry(topic.to_string())
            .or_insert_with(|| Topic::new(topic))
            .subscribe(Subscription {
                token,
                callback,
                once,
            });

        debug!(topic, %token, once, "subscribed");
        Ok(token)
    }

    /// Subscribes `callback` for a single delivery.
    pub fn subscribe_once<F>(&self, topic: &str, callback: F) -> Result<Token>
    where
        F: Fn(&T, &TopicInfo) + 'static,
    {
        self.subscribe(topic, callback, true)
    }

    /// Publishes `data` on `topic`.
    ///
    /// Returns `false` when the topic has no subscribers, without scheduling
    /// anything. Otherwise delivery is deferred to the next scheduler tick and
    /// `true` is returned at once. Subscribers are read when the tick runs,
    /// not now, and are invoked last-subscribed-first.
    pub fn publish(&self, topic: &str, data: T) -> bool {
        if !self.inner.borrow().topics.contains_key(topic) {
            trace!(topic, "publish to unknown topic");
            return false;
        }

        let inner = Rc::clone(&self.inner);
        let name = topic.to_string();
        self.scheduler.defer(Box::new(move || dispatch(&inner, &name, &data)));

        debug!(topic, "publish deferred");
        true
    }

    /// Removes a single subscription by token, or every subscription under a
    /// topic name.
    ///
    /// Returns the identifier back when something was removed and `None`
    /// when nothing matched.
    pub fn unsubscribe(&self, identifier: impl Into<Identifier>) -> Option<Identifier> {
        let identifier = identifier.into();
        let removed = self.inner.borrow_mut().unsubscribe(&identifier);

        if removed {
            debug!(%identifier, "unsubscribed");
            Some(identifier)
        } else {
            trace!(%identifier, "nothing to unsubscribe");
            None
        }
    }

    /// Alias of [`Registry::subscribe`].
    pub fn on<F>(&self, topic: &str, callback: F, once: bool) -> Result<Token>
    where
        F: Fn(&T, &TopicInfo) + 'static,
    {
        self.subscribe(topic, callback, once)
    }

    /// Alias of [`Registry::subscribe_once`].
    pub fn once<F>(&self, topic: &str, callback: F) -> Result<Token>
    where
        F: Fn(&T, &TopicInfo) + 'static,
    {
        self.subscribe_once(topic, callback)
    }

    /// Alias of [`Registry::publish`].
    pub fn trigger(&self, topic: &str, data: T) -> bool {
        self.publish(topic, data)
    }

    /// Alias of [`Registry::unsubscribe`].
    pub fn off(&self, identifier: impl Into<Identifier>) -> Option<Identifier> {
        self.unsubscribe(identifier)
    }

    pub fn has_topic(&self, topic: &str) -> bool {
        self.inner.borrow().topics.contains_key(topic)
    }

    /// Names of all topics with at least one subscription, sorted.
    pub fn topics(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.borrow().topics.keys().cloned().collect();
        names.sort();
        names
    }

    /// Tokens subscribed to `topic`, in registration order.
    pub fn subscriber_tokens(&self, topic: &str) -> Vec<Token> {
        self.inner
            .borrow()
            .topics
            .get(topic)
            .map(Topic::tokens)
            .unwrap_or_default()
    }

    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.inner.borrow().topics.get(topic).map_or(0, Topic::len)
    }

    /// Total number of live subscriptions across all topics.
    pub fn len(&self) -> usize {
        self.inner.borrow().topics.values().map(Topic::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Registry<T, HostScheduler> {
    /// Builds a registry backed by the scheduler named in `settings`.
    pub fn from_settings(settings: &SchedulerSettings) -> Self {
        Self::new(HostScheduler::from(settings.kind))
    }
}

impl<T: 'static> Default for Registry<T, TickQueue> {
    fn default() -> Self {
        Self::new(TickQueue::new())
    }
}

impl<T, S: Clone> Clone for Registry<T, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            scheduler: self.scheduler.clone(),
        }
    }
}

impl<T, S: fmt::Debug> fmt::Debug for Registry<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Registry")
            .field("topics", &inner.topics.len())
            .field("next_token", &inner.next_token)
            .field("scheduler", &self.scheduler)
            .finish()
    }
}

/// Runs one deferred delivery for `topic`.
///
/// The subscription list is copied when the task runs and walked from the
/// end, so callbacks fire last-subscribed-first and may mutate the registry
/// freely. A `once` subscription is removed as soon as its callback returns.
fn dispatch<T>(inner: &Rc<RefCell<Inner<T>>>, topic: &str, data: &T) {
    let snapshot: Vec<Subscription<T>> = inner
        .borrow()
        .topics
        .get(topic)
        .map(|t| t.subscriptions.clone())
        .unwrap_or_default();

    trace!(topic, subscribers = snapshot.len(), "dispatching");

    for subscription in snapshot.iter().rev() {
        let info = TopicInfo {
            name: topic.to_string(),
            token: subscription.token,
        };
        subscription.callback.call(data, &info);

        if subscription.once {
            inner
                .borrow_mut()
                .unsubscribe(&Identifier::Token(subscription.token));
        }
    }
}
