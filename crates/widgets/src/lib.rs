pub mod card;
pub mod controls;
pub mod format;
pub mod network;
pub mod processes;
pub mod status;
pub mod system;
pub mod usage;

pub use card::card;
pub use controls::{Controls, RefreshRate};
pub use network::NetworkWidget;
pub use processes::ProcessTable;
pub use status::StatusLine;
pub use system::SystemWidget;
pub use usage::{UsageKind, UsageWidget};
