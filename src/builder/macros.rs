//! Macros for declaring state and reason identifiers.

/// Generate a `State` implementation for a simple enum.
///
/// Each variant's code is its name.
///
/// # Example
///
/// ```
/// use statelog::core::State;
/// use statelog::state_enum;
///
/// state_enum! {
///     pub enum TicketState {
///         Open,
///         InProgress,
///         Closed,
///     }
///     final: [Closed]
/// }
///
/// assert_eq!(TicketState::InProgress.code(), "InProgress");
/// assert!(TicketState::Closed.is_final());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn code(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }
        }
    };
}

/// Generate a `Reason` implementation for a simple enum.
///
/// # Example
///
/// ```
/// use statelog::core::Reason;
/// use statelog::reason_enum;
///
/// reason_enum! {
///     pub enum TicketReason {
///         Filed,
///         Assigned,
///         Resolved,
///     }
/// }
///
/// assert_eq!(TicketReason::Resolved.code(), "Resolved");
/// ```
#[macro_export]
macro_rules! reason_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Reason for $name {
            fn code(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Reason, State, TransitionHistory};

    state_enum! {
        enum TestState {
            Draft,
            Review,
            Published,
            Rejected,
        }
        final: [Published, Rejected]
    }

    reason_enum! {
        enum TestReason {
            Created,
            Submitted,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Draft.code(), "Draft");
        assert!(!TestState::Draft.is_final());
        assert!(!TestState::Review.is_final());
        assert!(TestState::Published.is_final());
        assert!(TestState::Rejected.is_final());
    }

    #[test]
    fn reason_enum_macro_generates_trait() {
        assert_eq!(TestReason::Created.code(), "Created");
        assert_eq!(TestReason::Submitted.code(), "Submitted");
    }

    #[test]
    fn state_enum_works_without_final() {
        state_enum! {
            enum MinimalState {
                One,
                Two,
            }
        }

        assert!(!MinimalState::One.is_final());
        assert_eq!(MinimalState::Two.code(), "Two");
    }

    #[test]
    fn generated_identifiers_feed_a_history() {
        let mut history = TransitionHistory::new();
        history
            .append(&TestState::Draft, &TestReason::Created, None)
            .unwrap();
        history
            .append(&TestState::Review, &TestReason::Submitted, None)
            .unwrap();

        assert_eq!(history.state_path(), vec!["Draft", "Review"]);
    }
}
