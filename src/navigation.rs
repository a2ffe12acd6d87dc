use std::sync::Mutex;

use serde::Serialize;

/// Screens the booking flow can send the user to.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "route", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Route {
    ActivityDetail { activity_id: String },
    BookingForm { form_id: String },
    Login,
    BookingConfirmation { booking_id: i64 },
    Trips,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::ActivityDetail { activity_id } => format!("/activities/{}", activity_id),
            Route::BookingForm { form_id } => format!("/booking-forms/{}", form_id),
            Route::Login => "/login".to_string(),
            Route::BookingConfirmation { booking_id } => format!("/bookings/{}", booking_id),
            Route::Trips => "/trips".to_string(),
        }
    }
}

/// A route as clients see it: the tagged route plus its path.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct RouteView {
    #[serde(flatten)]
    pub route: Route,
    pub path: String,
}

impl From<Route> for RouteView {
    fn from(route: Route) -> Self {
        let path = route.path();
        Self { route, path }
    }
}

/// Handle injected into whatever needs to move the user between screens.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Keeps every requested route, newest last.
#[derive(Default)]
pub struct RouteRecorder {
    history: Mutex<Vec<Route>>,
}

impl RouteRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Route> {
        self.history.lock().ok()?.last().cloned()
    }

    pub fn history(&self) -> Vec<Route> {
        self.history
            .lock()
            .map(|h| h.clone())
            .unwrap_or_default()
    }
}

impl Navigator for RouteRecorder {
    fn navigate(&self, route: Route) {
        if let Ok(mut history) = self.history.lock() {
            history.push(route);
        }
    }
}
