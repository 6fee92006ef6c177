//! Job handle

/// Identity and run options for one monitored job
///
/// Produced by whatever submitted the service; the monitor only reads it.
/// The id is the engine's service identifier, opaque at this layer.
#[derive(Debug, Clone)]
pub struct JobHandle {
    /// Service id of the job to monitor
    pub id: String,
    /// Maximum number of poll ticks to wait for a terminal state
    pub time_budget: u64,
    /// Forward the job's output to local stdout while polling
    pub stream_output: bool,
    /// Delete the service after the outcome is decided (best effort)
    pub delete_on_exit: bool,
}
