//! # ticksub
//!
//! `ticksub` is a minimalist, in-process publish/subscribe registry.
//! Callers register callbacks on named topics, other callers publish events
//! with data, and every callback registered on that topic is invoked on the
//! next tick of a single-threaded scheduler.
//!
//! ## Core Modules
//!
//! - `registry`: the topic registry: tokens, subscriptions, publish and unsubscribe.
//! - `scheduler`: the deferred-task primitive the registry delivers through.
//! - `config`: loading host settings (log level, scheduler kind).
//! - `utils`: shared error type and logging bootstrap.
//!
//! ## Example
//!
//! ```rust
//! use ticksub::{Registry, TickQueue};
//!
//! let queue = TickQueue::new();
//! let registry: Registry<String> = Registry::new(queue.clone());
//!
//! registry
//!     .subscribe("chat", |msg, info| println!("{} -> {msg}", info.name), false)
//!     .unwrap();
//! assert!(registry.publish("chat", "hi".to_string()));
//!
//! // Nothing has run yet; delivery happens on the next tick.
//! assert_eq!(queue.tick(), 1);
//! ```

pub mod config;
pub mod registry;
pub mod scheduler;
pub mod utils;

pub use registry::{Callback, Identifier, Registry, Token, TopicInfo};
pub use scheduler::{HostScheduler, LocalScheduler, Scheduler, SchedulerKind, TickQueue};
pub use utils::error::RegistryError;
