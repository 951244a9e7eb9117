pub use super::briefing_items::Entity as BriefingItems;
pub use super::location_tasks::Entity as LocationTasks;
pub use super::locations::Entity as Locations;
pub use super::maintenance_tickets::Entity as MaintenanceTickets;
pub use super::profiles::Entity as Profiles;
pub use super::restock_requests::Entity as RestockRequests;
pub use super::shifts::Entity as Shifts;
pub use super::wastage_logs::Entity as WastageLogs;
