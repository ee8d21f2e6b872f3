//! # Game State Machine
//!
//! One active state at a time. States are registered up front under a key
//! and switched by key:
//!
//! ```text
//!  change_state(next):  current.on_exit() ──> previous = current
//!                       current = next    ──> next.on_enter()
//!  tick(delta):         current.on_update(delta)
//! ```

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use super::updater::Updateable;
use crate::error::{UzuError, UzuResult};

/// A single game state (title screen, gameplay, pause menu, ...).
pub trait GameState {
    /// Called when the state becomes current.
    fn on_enter(&mut self) {}

    /// Called once per tick while the state is current.
    fn on_update(&mut self, _delta_seconds: f32) {}

    /// Called right before the state stops being current.
    fn on_exit(&mut self) {}
}

impl<T: GameState + ?Sized> GameState for Box<T> {
    fn on_enter(&mut self) {
        (**self).on_enter();
    }

    fn on_update(&mut self, delta_seconds: f32) {
        (**self).on_update(delta_seconds);
    }

    fn on_exit(&mut self) {
        (**self).on_exit();
    }
}

/// Keyed state machine driven by the host loop.
///
/// Use `GameStateMachine<K>` (boxed states) to mix state types, or a
/// concrete `S` to keep typed access through [`GameStateMachine::state`].
///
/// # Example
///
/// ```rust
/// use uzu_core::{GameState, GameStateMachine};
///
/// struct Title;
/// impl GameState for Title {}
///
/// #[derive(Default)]
/// struct Playing { time: f32 }
/// impl GameState for Playing {
///     fn on_update(&mut self, delta_seconds: f32) { self.time += delta_seconds; }
/// }
///
/// let mut states: GameStateMachine<&str> = GameStateMachine::new();
/// states.add_state("title", Box::new(Title))?;
/// states.add_state("playing", Box::new(Playing::default()))?;
///
/// states.change_state("title")?;
/// states.change_state("playing")?;
/// states.tick(0.016);
///
/// assert_eq!(states.current(), Some("playing"));
/// assert_eq!(states.previous(), Some("title"));
/// # Ok::<(), uzu_core::UzuError>(())
/// ```
pub struct GameStateMachine<K, S: GameState = Box<dyn GameState>> {
    states: HashMap<K, S>,
    current: Option<K>,
    previous: Option<K>,
}

impl<K, S> Default for GameStateMachine<K, S>
where
    K: Copy + Eq + Hash + Debug,
    S: GameState,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S> GameStateMachine<K, S>
where
    K: Copy + Eq + Hash + Debug,
    S: GameState,
{
    /// Creates a machine with no states and nothing current.
    #[must_use]
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
            current: None,
            previous: None,
        }
    }

    /// Registers `state` under `key`. It does not become current.
    ///
    /// # Errors
    ///
    /// [`UzuError::DuplicateState`] if `key` is taken; the registered state
    /// stays.
    pub fn add_state(&mut self, key: K, state: S) -> UzuResult<()> {
        if self.states.contains_key(&key) {
            tracing::error!("State [{:?}] already exists.", key);
            return Err(UzuError::DuplicateState(format!("{key:?}")));
        }
        self.states.insert(key, state);
        Ok(())
    }

    /// Returns the number of registered states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if no state is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns the key of the current state.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// Returns the key of the state that was current before the last change.
    #[inline]
    #[must_use]
    pub fn previous(&self) -> Option<K> {
        self.previous
    }

    /// Returns the state registered under `key`.
    #[must_use]
    pub fn state(&self, key: K) -> Option<&S> {
        self.states.get(&key)
    }

    /// Returns the state registered under `key` mutably.
    pub fn state_mut(&mut self, key: K) -> Option<&mut S> {
        self.states.get_mut(&key)
    }

    /// Switches to the state registered under `key` immediately.
    ///
    /// The current state's `on_exit` runs first, then the new state's
    /// `on_enter`. Returns `Ok(false)` without calling any hook if `key` is
    /// already current.
    ///
    /// # Errors
    ///
    /// [`UzuError::UnknownState`] if nothing is registered under `key`.
    /// The current state is left untouched.
    pub fn change_state(&mut self, key: K) -> UzuResult<bool> {
        if !self.states.contains_key(&key) {
            tracing::error!("Invalid state [{:?}].", key);
            return Err(UzuError::UnknownState(format!("{key:?}")));
        }
        if self.current == Some(key) {
            tracing::warn!("Already in state [{:?}].", key);
            return Ok(false);
        }

        if let Some(old) = self.current {
            tracing::debug!("Exiting: {:?}", old);
            if let Some(state) = self.states.get_mut(&old) {
                state.on_exit();
            }
        }

        self.previous = self.current;
        self.current = Some(key);

        tracing::debug!("Entering: {:?}", key);
        if let Some(state) = self.states.get_mut(&key) {
            state.on_enter();
        }
        Ok(true)
    }

    /// Updates the current state, if any.
    pub fn tick(&mut self, delta_seconds: f32) {
        if let Some(state) = self.current.and_then(|key| self.states.get_mut(&key)) {
            state.on_update(delta_seconds);
        }
    }
}

impl<K, S> Updateable for GameStateMachine<K, S>
where
    K: Copy + Eq + Hash + Debug,
    S: GameState,
{
    fn on_update(&mut self, delta_seconds: f32) {
        self.tick(delta_seconds);
    }
}

impl<K: Debug, S: GameState> std::fmt::Debug for GameStateMachine<K, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameStateMachine")
            .field("states", &self.states.len())
            .field("current", &self.current)
            .field("previous", &self.previous)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Logged {
        name: &'static str,
        log: Log,
    }

    impl GameState for Logged {
        fn on_enter(&mut self) {
            self.log.borrow_mut().push(format!("enter {}", self.name));
        }

        fn on_update(&mut self, _: f32) {
            self.log.borrow_mut().push(format!("update {}", self.name));
        }

        fn on_exit(&mut self) {
            self.log.borrow_mut().push(format!("exit {}", self.name));
        }
    }

    fn machine(log: &Log) -> GameStateMachine<&'static str, Logged> {
        let mut states = GameStateMachine::new();
        for name in ["title", "playing"] {
            let state = Logged {
                name,
                log: Rc::clone(log),
            };
            states.add_state(name, state).unwrap();
        }
        states
    }

    #[test]
    fn test_exit_runs_before_enter() {
        let log = Log::default();
        let mut states = machine(&log);

        assert_eq!(states.current(), None);
        assert!(states.change_state("title").unwrap());
        assert!(states.change_state("playing").unwrap());

        assert_eq!(*log.borrow(), ["enter title", "exit title", "enter playing"]);
        assert_eq!(states.current(), Some("playing"));
        assert_eq!(states.previous(), Some("title"));
    }

    #[test]
    fn test_same_state_is_ignored() {
        let log = Log::default();
        let mut states = machine(&log);
        states.change_state("title").unwrap();

        assert!(!states.change_state("title").unwrap());
        assert_eq!(*log.borrow(), ["enter title"]);
        assert_eq!(states.previous(), None);
    }

    #[test]
    fn test_unknown_state_keeps_current() {
        let log = Log::default();
        let mut states = machine(&log);
        states.change_state("title").unwrap();

        assert_eq!(
            states.change_state("credits"),
            Err(UzuError::UnknownState("\"credits\"".into()))
        );
        assert_eq!(states.current(), Some("title"));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_tick_updates_current_only() {
        let log = Log::default();
        let mut states = machine(&log);
        states.tick(0.1);
        assert!(log.borrow().is_empty());

        states.change_state("playing").unwrap();
        states.tick(0.1);
        assert_eq!(log.borrow().last().map(String::as_str), Some("update playing"));
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_duplicate_state_rejected() {
        let log = Log::default();
        let mut states = machine(&log);
        let extra = Logged {
            name: "other",
            log: Rc::clone(&log),
        };

        assert_eq!(
            states.add_state("title", extra),
            Err(UzuError::DuplicateState("\"title\"".into()))
        );
        assert_eq!(states.state("title").map(|s| s.name), Some("title"));
        assert_eq!(states.len(), 2);
    }
}
