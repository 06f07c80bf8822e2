//! Destructive Confirmation Gate — two typed confirmations before an
//! irreversible action is allowed to fire.
//!
//! The gate asks the user to retype the target's name exactly
//! (case-sensitive, untrimmed) and to type a fixed confirmation phrase
//! (case-insensitive). Only when both match may the destructive action run,
//! and then at most once at a time.
//!
//! ## Guarantees
//!
//! - **Validity before action**: the action is never invoked unless both
//!   confirmations match at the moment of submission.
//! - **At most one in flight**: while an action is running, further
//!   submissions are ignored and inputs are frozen.
//! - **Always settles**: every submission ends by clearing the submitting
//!   flag, whether the action succeeds, fails or panics, and even if the
//!   caller stops awaiting it.
//!
//! ## Lifecycle
//!
//! 1. **Open** — [`ConfirmationGate::open`] creates a gate with empty inputs
//! 2. **Typing** — `update_typed_name` / `update_typed_phrase` recompute validity
//! 3. **Submitting** — `submit` runs the action; inputs are ignored meanwhile
//! 4. **Settled** — success closes and resets the gate; failure reopens the
//!    inputs with the typed values kept for retry
//! 5. **Closed** — via success or `cancel`; a closed gate can be reopened

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod gate;
pub mod mocks;
pub mod state;
pub mod traits;

pub use config::GateConfig;
pub use error::{ActionError, PreconditionViolation, ValidationError};
pub use gate::{CancelOutcome, ConfirmationGate, GateHandle, GateView, SubmitOutcome};
pub use mocks::{RecordingNotifier, ScriptedAction};
pub use state::{normalize_phrase, validate, ConfirmationState, FieldErrors};
pub use traits::{DestructiveAction, NotificationSink};
