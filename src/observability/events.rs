//! Observable events for furnistore
//!
//! Events are a closed set so log consumers can match on exact names.

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & lifecycle
    /// Process startup begins
    BootStart,
    /// Configuration loaded
    ConfigLoaded,
    /// Snapshot could not be read at startup
    BootFailed,
    /// Snapshot loaded and store constructed
    SnapshotLoaded,
    /// HTTP listener bound
    ServerListening,
    /// Configured CORS origin is not a valid header value
    CorsOriginIgnored,
    /// Shutdown signal received
    ShutdownStart,
    /// Server loop exited
    ShutdownComplete,

    // Store mutations
    /// Record appended
    FurnitureCreated,
    /// Record overwritten by a full replace
    FurnitureReplaced,
    /// Record updated by a merge-patch
    FurniturePatched,
    /// Record removed
    FurnitureDeleted,

    // Failures
    /// Request rejected with a client error
    RequestRejected,
    /// Snapshot could not be written; in-memory mutation reverted
    SnapshotWriteFailed,
    /// Snapshot could not be written; process halts
    SnapshotWriteFatal,
    /// Snapshot on disk could not be parsed at startup
    StartupCorruption,
}

impl Event {
    /// Returns the event name as written in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::BootFailed => "BOOT_FAILED",
            Event::SnapshotLoaded => "SNAPSHOT_LOADED",
            Event::ServerListening => "SERVER_LISTENING",
            Event::CorsOriginIgnored => "CORS_ORIGIN_IGNORED",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::FurnitureCreated => "FURNITURE_CREATED",
            Event::FurnitureReplaced => "FURNITURE_REPLACED",
            Event::FurniturePatched => "FURNITURE_PATCHED",
            Event::FurnitureDeleted => "FURNITURE_DELETED",
            Event::RequestRejected => "REQUEST_REJECTED",
            Event::SnapshotWriteFailed => "SNAPSHOT_WRITE_FAILED",
            Event::SnapshotWriteFatal => "SNAPSHOT_WRITE_FATAL",
            Event::StartupCorruption => "STARTUP_CORRUPTION",
        }
    }

    /// Whether this event terminates the process
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Event::BootFailed | Event::SnapshotWriteFatal | Event::StartupCorruption
        )
    }
}
