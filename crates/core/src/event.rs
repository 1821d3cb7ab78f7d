use crate::{error::FetchFailed, snapshot::Snapshot};

/// All messages (events) that can flow through the dashboard event bus.
///
/// Sources:
/// - Sampling timer        → `Tick`
/// - Snapshot fetch task   → `Fetched`
/// - Window                → `WindowResized`
/// - Config watcher task   → `ConfigReloaded`
/// - Controls              → `Start`, `Stop`, `SetInterval`, `SimulationToggled`
#[derive(Debug, Clone)]
pub enum Message {
    // ── Sampling ──────────────────────────────────────────────────────────────
    /// One sampling period elapsed; acquire a snapshot.
    Tick,
    /// A snapshot fetch finished (possibly out of order with other fetches).
    Fetched(Result<Snapshot, FetchFailed>),

    // ── Window ────────────────────────────────────────────────────────────────
    /// Main window resized to the given logical size.
    WindowResized { width: f32, height: f32 },

    // ── Config ────────────────────────────────────────────────────────────────
    /// Config file changed on disk.
    ConfigReloaded,

    // ── User actions ──────────────────────────────────────────────────────────
    /// Resume periodic sampling.
    Start,
    /// Pause periodic sampling; charts keep their last frame.
    Stop,
    /// Change the sampling period in seconds.  Restarts the loop.
    SetInterval(f64),
    /// Switch between the simulated and the configured real source.
    SimulationToggled(bool),
}
