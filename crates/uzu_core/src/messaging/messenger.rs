//! # Messenger
//!
//! Subscribers register a handler for one concrete message type. Sending a
//! message calls every handler for exactly that type, in subscription
//! order. A message that nobody receives is reported if it requires a
//! receiver.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

use crate::error::{UzuError, UzuResult};

/// A message that can be sent through a [`Messenger`].
pub trait Message: Any {
    /// Whether sending this message with no subscriber is an error.
    fn requires_receiver(&self) -> bool {
        true
    }
}

/// Identifier returned by [`Messenger::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Handler = Box<dyn FnMut(&dyn Any)>;

/// Message hub owned by the composition root.
///
/// # Example
///
/// ```rust
/// use uzu_core::{Message, Messenger};
///
/// struct ScoreChanged(u32);
/// impl Message for ScoreChanged {}
///
/// let mut messenger = Messenger::new();
/// messenger.subscribe(|msg: &ScoreChanged| println!("score: {}", msg.0));
///
/// assert_eq!(messenger.send(&ScoreChanged(10)), Ok(1));
/// ```
#[derive(Default)]
pub struct Messenger {
    subscribers: HashMap<TypeId, Vec<(SubscriberId, Handler)>>,
    next_id: u64,
}

impl Messenger {
    /// Creates a messenger with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for messages of type `M`.
    pub fn subscribe<M: Message>(&mut self, mut handler: impl FnMut(&M) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;

        let handler: Handler = Box::new(move |message: &dyn Any| {
            if let Some(message) = message.downcast_ref::<M>() {
                handler(message);
            }
        });
        self.subscribers
            .entry(TypeId::of::<M>())
            .or_default()
            .push((id, handler));
        id
    }

    /// Removes a subscriber. Returns false if it was not subscribed.
    ///
    /// A message type left without handlers is forgotten.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let Some((&message_type, handlers)) = self
            .subscribers
            .iter_mut()
            .find(|(_, handlers)| handlers.iter().any(|(sub, _)| *sub == id))
        else {
            return false;
        };

        handlers.retain(|(sub, _)| *sub != id);
        if handlers.is_empty() {
            self.subscribers.remove(&message_type);
        }
        true
    }

    /// Returns how many message types have at least one subscriber.
    #[must_use]
    pub fn message_type_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Returns how many handlers are subscribed to `M`.
    #[must_use]
    pub fn subscriber_count<M: Message>(&self) -> usize {
        self.subscribers.get(&TypeId::of::<M>()).map_or(0, Vec::len)
    }

    /// Delivers `message` to every subscriber of its type.
    ///
    /// Returns the number of handlers that received it.
    ///
    /// # Errors
    ///
    /// [`UzuError::NoReceiver`] if nobody is subscribed and the message
    /// requires a receiver.
    pub fn send<M: Message>(&mut self, message: &M) -> UzuResult<usize> {
        let received = match self.subscribers.get_mut(&TypeId::of::<M>()) {
            Some(handlers) => {
                for (_, handler) in handlers.iter_mut() {
                    handler(message);
                }
                handlers.len()
            }
            None => 0,
        };

        if received == 0 && message.requires_receiver() {
            tracing::error!("Message of type [{}] requires receiver.", type_name::<M>());
            return Err(UzuError::NoReceiver(type_name::<M>()));
        }
        Ok(received)
    }
}

impl std::fmt::Debug for Messenger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Messenger")
            .field("message_types", &self.subscribers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
