//! Events that trigger lifecycle transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverEvent {
    /// Caller asked for initialization, or a reset is being recovered
    Initialize,
    /// Initialization burst is in the pipeline
    BurstQueued,
    /// Board reported that it restarted
    ResetNotified,
}
