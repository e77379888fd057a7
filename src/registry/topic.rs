//! Topic management
//!
//! A `Topic` holds the ordered list of subscriptions registered under one
//! topic name. Unlike a set of subscriber ids, the same callback may be
//! registered several times; every registration gets its own [`Token`].
//!
//! Concurrency note: topics are only touched through the registry, which
//! lives on a single logical thread.

use std::fmt;
use std::rc::Rc;

/// Unique handle for one subscription, never reused within a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(pub u64);

impl Token {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Second argument handed to every callback: which topic fired and which
/// subscription is being invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicInfo {
    pub name: String,
    pub token: Token,
}

/// Shared handle to a subscriber callback.
///
/// The registry keeps a reference to the closure; it does not manage
/// anything the closure captures.
pub struct Callback<T>(Rc<dyn Fn(&T, &TopicInfo)>);

impl<T> Callback<T> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&T, &TopicInfo) + 'static,
    {
        Self(Rc::new(f))
    }

    pub fn call(&self, data: &T, info: &TopicInfo) {
        (self.0)(data, info)
    }
}

impl<T> Clone for Callback<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// One registered interest in a topic.
#[derive(Debug)]
pub struct Subscription<T> {
    pub token: Token,
    pub callback: Callback<T>,
    /// Removed right after its first invocation.
    pub once: bool,
}

impl<T> Clone for Subscription<T> {
    fn clone(&self) -> Self {
        Self {
            token: self.token,
            callback: self.callback.clone(),
            once: self.once,
        }
    }
}

#[derive(Debug)]
pub struct Topic<T> {
    pub name: String,
    pub subscriptions: Vec<Subscription<T>>,
}

impl<T> Topic<T> {
    /// Create an empty topic with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            subscriptions: Vec::new(),
        }
    }

    /// Append a subscription, keeping registration order.
    pub fn subscribe(&mut self, subscription: Subscription<T>) {
        self.subscriptions.push(subscription);
    }

    /// Remove the subscription carrying `token`. Returns whether one was found.
    pub fn unsubscribe(&mut self, token: Token) -> bool {
        match self.subscriptions.iter().rposition(|s| s.token == token) {
            Some(index) => {
                self.subscriptions.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn tokens(&self) -> Vec<Token> {
        self.subscriptions.iter().map(|s| s.token).collect()
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

/// What `unsubscribe` is asked to remove: a single subscription by token, or
/// every subscription under a topic name.
///
/// The two forms never compare equal to each other, so a token value can not
/// be mistaken for a topic name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Token(Token),
    Topic(String),
}

impl From<Token> for Identifier {
    fn from(token: Token) -> Self {
        Identifier::Token(token)
    }
}

impl From<&str> for Identifier {
    fn from(topic: &str) -> Self {
        Identifier::Topic(topic.to_string())
    }
}

impl From<String> for Identifier {
    fn from(topic: String) -> Self {
        Identifier::Topic(topic)
    }
}

impl From<&String> for Identifier {
    fn from(topic: &String) -> Self {
        Identifier::Topic(topic.clone())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Token(token) => write!(f, "token {token}"),
            Identifier::Topic(name) => write!(f, "topic '{name}'"),
        }
    }
}
