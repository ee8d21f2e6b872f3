//! # Messaging
//!
//! Type-keyed publish/subscribe between decoupled parts of a game.

mod messenger;

pub use messenger::{Message, Messenger, SubscriberId};
