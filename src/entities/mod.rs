pub mod prelude;

pub mod briefing_items;
pub mod location_tasks;
pub mod locations;
pub mod maintenance_tickets;
pub mod profiles;
pub mod restock_requests;
pub mod shifts;
pub mod wastage_logs;
