//! # taskscope-core
//!
//! Observable task wrapper for workflow orchestration. Wrap a function with
//! [`observed`] and every invocation logs its resolved parameters, the
//! configuration blocks it can reach (arguments first, then the task's
//! [`BlockScope`]), its output, and any failure before the failure propagates.
//!
//! The wrapper is transparent: the caller sees exactly the value or error the
//! wrapped function produced. Logging and block detection are pure side effects.

pub mod block;
pub mod observability;
pub mod task;

// Minimal user-facing API: ConfigBlock, BlockScope, observed/ObservedTask, TaskRegistry, values and errors.
pub use block::scope::BlockScope;
pub use block::{ConfigBlock, MISSING_SLUG, Secret};
pub use task::detect::{BlockSource, DetectedBlock, detect_blocks};
pub use task::observed::{CallOutcome, CallRecord, ObservedTask, observed};
pub use task::registry::TaskRegistry;
pub use task::{TaskError, TaskRun, TaskValue};
