//! State and reason identifiers.
//!
//! The history treats states and transition reasons as opaque identifiers:
//! all it ever reads from them is a `code`. Which states a machine may move
//! between is decided elsewhere; the history only records what happened.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a state a machine can be in.
///
/// # Example
///
/// ```rust
/// use statelog::core::State;
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum TicketState {
///     Open,
///     Closed,
/// }
///
/// impl State for TicketState {
///     fn code(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Closed)
///     }
/// }
///
/// assert_eq!(TicketState::Open.code(), "Open");
/// assert!(TicketState::Closed.is_final());
/// ```
pub trait State {
    /// The code recorded in the history when this state is entered.
    fn code(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

/// Identifier of why a transition occurred.
pub trait Reason {
    /// The code recorded in the history alongside the entered state.
    fn code(&self) -> &str;
}

impl<T: State + ?Sized> State for &T {
    fn code(&self) -> &str {
        (**self).code()
    }

    fn is_final(&self) -> bool {
        (**self).is_final()
    }
}

impl<T: Reason + ?Sized> Reason for &T {
    fn code(&self) -> &str {
        (**self).code()
    }
}

/// A state identified only by its code.
///
/// Useful when state definitions live in data (a database table, a config
/// file) rather than in a Rust enum.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateCode(String);

impl StateCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl State for StateCode {
    fn code(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StateCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for StateCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A transition reason identified only by its code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReasonCode(String);

impl ReasonCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Reason for ReasonCode {
    fn code(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ReasonCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for ReasonCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
