//! Role router: which screen an identity may see given its shift state.
//!
//! Pure functions, re-evaluated on every request.

use serde::Serialize;

use crate::domain::{Role, ShiftState};
use crate::models::Identity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Login,
    OpeningWizard,
    BaristaDashboard,
    CorePortal,
    Communications,
}

impl Screen {
    pub const ALL: [Self; 5] = [
        Self::Login,
        Self::OpeningWizard,
        Self::BaristaDashboard,
        Self::CorePortal,
        Self::Communications,
    ];

    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::OpeningWizard => "/",
            Self::BaristaDashboard => "/dashboard",
            Self::CorePortal => "/core",
            Self::Communications => "/core/communications",
        }
    }

    /// Screen mounted at `path`. Query strings, fragments and a trailing
    /// slash are ignored.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default().trim();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Self::ALL.into_iter().find(|screen| screen.path() == path)
    }
}

/// Outcome of resolving a requested path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub screen: Screen,
    pub path: &'static str,
    /// `true` when the requested path was unknown or not permitted.
    pub redirected: bool,
}

/// Default screen for an identity in a given shift state.
#[must_use]
pub fn route(identity: Option<&Identity>, shift: &ShiftState) -> Screen {
    match identity.map(|i| i.role) {
        None => Screen::Login,
        Some(Role::Barista) if shift.is_open() => Screen::BaristaDashboard,
        Some(Role::Barista) => Screen::OpeningWizard,
        Some(Role::Manager | Role::Core) => Screen::CorePortal,
    }
}

/// Whether `screen` may be shown to the identity.
#[must_use]
pub fn is_permitted(identity: Option<&Identity>, shift: &ShiftState, screen: Screen) -> bool {
    match identity.map(|i| i.role) {
        Some(Role::Manager | Role::Core) => {
            matches!(screen, Screen::CorePortal | Screen::Communications)
        }
        _ => screen == route(identity, shift),
    }
}

/// Maps a requested path to the screen that will actually be shown.
#[must_use]
pub fn resolve(identity: Option<&Identity>, shift: &ShiftState, path: &str) -> Navigation {
    match Screen::from_path(path) {
        Some(screen) if is_permitted(identity, shift, screen) => Navigation {
            screen,
            path: screen.path(),
            redirected: false,
        },
        _ => {
            let screen = route(identity, shift);
            Navigation {
                screen,
                path: screen.path(),
                redirected: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IdentityId, LocationId, ShiftId};
    use crate::models::Shift;

    fn someone(role: Role) -> Identity {
        Identity {
            id: IdentityId::new(1),
            name: "Amani".into(),
            role,
        }
    }

    fn open() -> ShiftState {
        ShiftState::Open(Shift {
            id: ShiftId::new(9),
            location_id: LocationId::new(2),
            bic_id: IdentityId::new(1),
            start_time: "2026-03-01T06:00:00.000Z".into(),
            end_time: None,
            cash_float_verified: true,
            briefing_completed: true,
        })
    }

    #[test]
    fn default_screens_follow_the_routing_table() {
        let barista = someone(Role::Barista);
        assert_eq!(route(None, &ShiftState::NoShift), Screen::Login);
        assert_eq!(route(Some(&barista), &ShiftState::NoShift), Screen::OpeningWizard);
        assert_eq!(route(Some(&barista), &open()), Screen::BaristaDashboard);
        assert_eq!(route(Some(&someone(Role::Manager)), &open()), Screen::CorePortal);
        assert_eq!(
            route(Some(&someone(Role::Core)), &ShiftState::NoShift),
            Screen::CorePortal
        );
    }

    #[test]
    fn open_barista_lands_on_dashboard_every_time() {
        let barista = someone(Role::Barista);
        let shift = open();
        for _ in 0..3 {
            let nav = resolve(Some(&barista), &shift, "/dashboard");
            assert_eq!(nav.screen, Screen::BaristaDashboard);
            assert!(!nav.redirected);
        }
        let nav = resolve(Some(&barista), &shift, "/");
        assert_eq!(nav.screen, Screen::BaristaDashboard);
        assert!(nav.redirected);
    }

    #[test]
    fn barista_without_shift_cannot_reach_dashboard_or_core() {
        let barista = someone(Role::Barista);
        for path in ["/dashboard", "/core", "/core/communications"] {
            let nav = resolve(Some(&barista), &ShiftState::NoShift, path);
            assert_eq!(nav.screen, Screen::OpeningWizard);
            assert_eq!(nav.path, "/");
            assert!(nav.redirected);
        }
    }

    #[test]
    fn leads_reach_both_core_screens() {
        let lead = someone(Role::Core);
        let nav = resolve(Some(&lead), &ShiftState::NoShift, "/core/communications/");
        assert_eq!(nav.screen, Screen::Communications);
        assert!(!nav.redirected);

        let nav = resolve(Some(&lead), &ShiftState::NoShift, "/dashboard");
        assert_eq!(nav.screen, Screen::CorePortal);
        assert!(nav.redirected);
    }

    #[test]
    fn anonymous_and_unknown_paths_redirect() {
        let nav = resolve(None, &ShiftState::NoShift, "/core");
        assert_eq!(nav.screen, Screen::Login);
        assert!(nav.redirected);

        let nav = resolve(None, &ShiftState::NoShift, "/login?next=/core");
        assert_eq!(nav.screen, Screen::Login);
        assert!(!nav.redirected);

        let nav = resolve(Some(&someone(Role::Manager)), &ShiftState::NoShift, "/nowhere");
        assert_eq!(nav.screen, Screen::CorePortal);
        assert!(nav.redirected);
    }

    #[test]
    fn paths_round_trip() {
        for screen in Screen::ALL {
            assert_eq!(Screen::from_path(screen.path()), Some(screen));
        }
        assert_eq!(Screen::from_path(""), Some(Screen::OpeningWizard));
    }
}
