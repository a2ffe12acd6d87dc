use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use log::info;
use tokio::sync::Mutex as AsyncMutex;
use uuid::Uuid;

use crate::error::BookingError;
use crate::navigation::RouteRecorder;
use crate::services::{
    backend_client::ActivityBackend,
    form_schedule_service::{BookingFormCoordinator, FormSchedule},
};
use crate::store::auth_session::AuthSession;

/// One open booking form and the routes it has requested.
pub struct FormSession {
    pub form: Arc<AsyncMutex<FormSchedule>>,
    pub navigator: RouteRecorder,
}

struct Entry {
    session: Arc<FormSession>,
    last_used: Instant,
}

impl Entry {
    fn is_live(&self, idle_timeout: Duration) -> bool {
        self.last_used.elapsed() < idle_timeout
    }
}

/// Open forms keyed by id. A form unused for `idle_timeout` is dropped.
pub struct FormSessions {
    sessions: Mutex<HashMap<Uuid, Entry>>,
    idle_timeout: Duration,
}

impl FormSessions {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_timeout,
        }
    }

    pub fn insert(&self, form: Arc<AsyncMutex<FormSchedule>>) -> Result<Uuid, BookingError> {
        let id = Uuid::new_v4();
        let session = Arc::new(FormSession {
            form,
            navigator: RouteRecorder::new(),
        });

        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| BookingError::Storage(e.to_string()))?;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.is_live(self.idle_timeout));
        if sessions.len() < before {
            info!("Dropped {} idle booking forms", before - sessions.len());
        }
        sessions.insert(
            id,
            Entry {
                session,
                last_used: Instant::now(),
            },
        );
        Ok(id)
    }

    /// Looks up a live form and marks it as used.
    pub fn get(&self, id: &str) -> Result<Arc<FormSession>, BookingError> {
        let not_found = || BookingError::FormNotFound(id.to_string());
        let uuid = Uuid::parse_str(id).map_err(|_| not_found())?;
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| BookingError::Storage(e.to_string()))?;

        match sessions.get_mut(&uuid) {
            Some(entry) if entry.is_live(self.idle_timeout) => {
                entry.last_used = Instant::now();
                Ok(entry.session.clone())
            }
            Some(_) => {
                sessions.remove(&uuid);
                Err(not_found())
            }
            None => Err(not_found()),
        }
    }

    /// Number of forms that have not gone idle.
    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .map(|s| s.values().filter(|e| e.is_live(self.idle_timeout)).count())
            .unwrap_or(0)
    }

    pub fn remove(&self, id: &str) -> Option<Arc<FormSession>> {
        let uuid = Uuid::parse_str(id).ok()?;
        self.sessions
            .lock()
            .ok()?
            .remove(&uuid)
            .map(|entry| entry.session)
    }
}

/// Services shared by every request. Built once in `main` and handed to actix as app data.
pub struct AppState {
    pub backend: Arc<dyn ActivityBackend>,
    pub auth: AuthSession,
    pub coordinator: BookingFormCoordinator,
    pub forms: FormSessions,
}

impl AppState {
    pub fn new(
        backend: Arc<dyn ActivityBackend>,
        auth: AuthSession,
        form_idle_timeout: Duration,
    ) -> Self {
        let coordinator = BookingFormCoordinator::new(backend.clone(), auth.clone());
        Self {
            backend,
            auth,
            coordinator,
            forms: FormSessions::new(form_idle_timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::activity::fixtures;

    fn form() -> Arc<AsyncMutex<FormSchedule>> {
        let date = NaiveDate::from_ymd_opt(2026, 11, 2).unwrap();
        Arc::new(AsyncMutex::new(
            FormSchedule::new(fixtures::activity(), "p-1", date).unwrap(),
        ))
    }

    #[test]
    fn test_insert_get_remove() {
        let forms = FormSessions::new(Duration::from_secs(60));
        let id = forms.insert(form()).unwrap().to_string();

        assert_eq!(forms.len(), 1);
        assert!(forms.get(&id).is_ok());
        assert!(forms.remove(&id).is_some());
        assert!(matches!(forms.get(&id), Err(BookingError::FormNotFound(_))));
        assert!(forms.remove("not-a-uuid").is_none());
    }

    #[test]
    fn test_idle_forms_expire() {
        let forms = FormSessions::new(Duration::ZERO);
        let first = forms.insert(form()).unwrap().to_string();
        forms.insert(form()).unwrap();

        // the second insert swept the idle first form
        assert_eq!(forms.sessions.lock().unwrap().len(), 1);
        assert!(matches!(forms.get(&first), Err(BookingError::FormNotFound(_))));
        assert_eq!(forms.len(), 0);
    }
}
