//! Agent-facing environment layer.
//!
//! - `codec`: bounded signature <-> action id mapping
//! - `legal`: per-agent legal action sets
//! - `turn`: cyclic turn scheduler
//! - `reward`: zero-sum reward and termination bookkeeping
//! - `observation`: board + action mask assembly
//! - `controller`: `reset` / `step` / `observe` state machine

pub mod codec;
pub mod controller;
pub mod legal;
pub mod observation;
pub mod reward;
pub mod turn;

pub use codec::{ActionBatch, ActionCodec, CodecSnapshot};
pub use controller::{EnvPhase, EnvironmentController, StepRecord, StepStatus};
pub use legal::LegalActionIndex;
pub use observation::{Observation, ObservationBuilder};
pub use reward::{RewardLedger, TerminationLedger};
pub use turn::{CyclePhase, TurnCycle};
