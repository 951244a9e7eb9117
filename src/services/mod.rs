pub mod auth_service;
pub use auth_service::{AuthError, AuthService};

pub mod auth_service_impl;
pub use auth_service_impl::DefaultAuthService;

pub mod session;
pub use session::{SessionContext, SessionStore};

pub mod shift_service;
pub use shift_service::{ShiftError, ShiftService, StartShift};

pub mod shift_service_impl;
pub use shift_service_impl::DefaultShiftService;

pub mod briefing_service;
pub use briefing_service::{BriefingError, BriefingService};

pub mod briefing_service_impl;
pub use briefing_service_impl::DefaultBriefingService;

pub mod ops_service;
pub use ops_service::{
    AuditFeed, MaintenanceInput, OpsError, OpsService, RestockInput, WastageInput,
};

pub mod ops_service_impl;
pub use ops_service_impl::DefaultOpsService;

pub mod validation;
