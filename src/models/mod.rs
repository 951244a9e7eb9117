pub mod briefing;
pub mod logs;
pub mod shift;
pub mod staff;
pub mod task;

pub use briefing::{BriefingItem, NewBriefing};
pub use logs::{
    MaintenanceTicket, NewMaintenanceTicket, NewRestockRequest, NewWastageLog, RestockRequest,
    TicketFeedEntry, WastageFeedEntry, WastageLog,
};
pub use shift::{NewShift, OpenShiftOutcome, Shift};
pub use staff::{Identity, Location};
pub use task::{LocationTask, NewLocationTask};

/// Current instant in the timestamp format every table uses.
///
/// RFC 3339, UTC, millisecond precision. A fixed width keeps text ordering
/// equal to chronological ordering.
#[must_use]
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
