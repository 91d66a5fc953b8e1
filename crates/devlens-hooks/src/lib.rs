//! # devlens-hooks
//!
//! Hook metrics recorder for DevLens. Instruments named lifecycle hooks of
//! the host application, recording tracking start/end, listener counts, and
//! per-firing execution timestamps.
//!
//! Recording runs inline on the thread that fires the hook, so every write
//! path here is O(1) with a short sharded-lock critical section and never
//! blocks on readers taking snapshots.

pub mod recorder;

pub use recorder::HookRecorder;
