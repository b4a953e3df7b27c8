// Copyright (c) 2025 - Cowboy AI, Inc.
//! Debounce State Machine
//!
//! # States
//!
//! - Idle: nothing pending
//! - Pending: a raw value is waiting for its quiet period to elapse
//! - Settled: the quiet period elapsed; the value awaits forwarding
//! - Disposed: torn down (terminal)
//!
//! # Inputs
//!
//! - Keystroke: Idle → Pending, Pending → Pending (value replaced, deadline reset)
//! - Tick: Pending → Settled once `now >= deadline`
//! - Forwarded: Settled → Idle
//! - Teardown: Any → Disposed
//!
//! ```text
//!            Keystroke             Tick(now ≥ deadline)          Forwarded
//!   Idle ───────────────> Pending ─────────────────────> Settled ─────────> Idle
//!                         │    ▲
//!                         └────┘ Keystroke (superseded)
//! ```

use super::{StateMachine, TransitionError, TransitionResult};
use crate::frp::Time;

/// Debounce state (FSM state)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DebounceState {
    #[default]
    Idle,

    /// Waiting for silence until `deadline`
    Pending { value: String, deadline: Time },

    /// Quiet period elapsed for `value`
    Settled { value: String },

    /// Torn down; the timer is gone for good
    Disposed,
}

/// Debounce FSM input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceInput {
    /// A raw value arrived; it settles at `deadline` unless superseded
    Keystroke { value: String, deadline: Time },

    /// The clock advanced to `now`
    Tick { now: Time },

    /// The settled value was handed downstream (or suppressed)
    Forwarded,

    /// Screen exit
    Teardown,
}

/// Debounce FSM output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceOutput {
    Nothing,

    /// A pending value was replaced before its quiet period elapsed
    Superseded(String),

    /// A value survived its quiet period
    Settled(String),

    /// Teardown happened; carries the pending value that was dropped
    Cancelled(Option<String>),
}

impl DebounceState {
    /// When the pending value settles, if one is pending
    pub fn deadline(&self) -> Option<Time> {
        match self {
            DebounceState::Pending { deadline, .. } => Some(*deadline),
            _ => None,
        }
    }

    /// Short state name for logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            DebounceState::Idle => "Idle",
            DebounceState::Pending { .. } => "Pending",
            DebounceState::Settled { .. } => "Settled",
            DebounceState::Disposed => "Disposed",
        }
    }
}

impl StateMachine for DebounceState {
    type Input = DebounceInput;
    type Output = DebounceOutput;

    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)> {
        use DebounceInput::*;
        use DebounceState::*;

        match (self, input) {
            // Teardown wins from every state and is idempotent
            (Disposed, Teardown) => Ok((Disposed, DebounceOutput::Cancelled(None))),
            (Pending { value, .. }, Teardown) => {
                Ok((Disposed, DebounceOutput::Cancelled(Some(value.clone()))))
            }
            (Idle | Settled { .. }, Teardown) => Ok((Disposed, DebounceOutput::Cancelled(None))),
            (Disposed, _) => Err(TransitionError::InvalidTransition {
                from: "Disposed".to_string(),
                to: "any state".to_string(),
            }),

            // Keystrokes
            (Idle, Keystroke { value, deadline }) => Ok((
                Pending {
                    value: value.clone(),
                    deadline: *deadline,
                },
                DebounceOutput::Nothing,
            )),
            (Pending { value: old, .. }, Keystroke { value, deadline }) => Ok((
                Pending {
                    value: value.clone(),
                    deadline: *deadline,
                },
                DebounceOutput::Superseded(old.clone()),
            )),
            (Settled { .. }, Keystroke { .. }) => Err(TransitionError::PreconditionFailed(
                "settled value must be forwarded before new input".to_string(),
            )),

            // Clock
            (Idle, Tick { .. }) => Ok((Idle, DebounceOutput::Nothing)),
            (Pending { value, deadline }, Tick { now }) => {
                if *now >= *deadline {
                    Ok((
                        Settled {
                            value: value.clone(),
                        },
                        DebounceOutput::Settled(value.clone()),
                    ))
                } else {
                    Ok((self.clone(), DebounceOutput::Nothing))
                }
            }
            (Settled { .. }, Tick { .. }) => Err(TransitionError::PreconditionFailed(
                "settled value must be forwarded before the clock advances".to_string(),
            )),

            // Forwarding
            (Settled { .. }, Forwarded) => Ok((Idle, DebounceOutput::Nothing)),
            (Idle | Pending { .. }, Forwarded) => Err(TransitionError::InvalidTransition {
                from: self.name().to_string(),
                to: "Idle (via Forwarded)".to_string(),
            }),
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, DebounceState::Disposed)
    }
}
