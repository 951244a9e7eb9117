mod location;
mod staff;

pub use location::{cmd_location_add, cmd_location_list};
pub use staff::{cmd_staff_add, cmd_staff_list};
