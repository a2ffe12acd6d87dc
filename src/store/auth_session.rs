use std::sync::Arc;

use log::info;
use tokio::sync::watch;

use super::preferences::{PreferenceStore, USER_ID_KEY};
use crate::error::BookingError;

/// Login state backed by the `user-id` preference.
///
/// Built once at startup and cloned into whoever needs it. Subscribers get a `watch`
/// receiver that always holds the current user id.
#[derive(Clone)]
pub struct AuthSession {
    store: Arc<dyn PreferenceStore>,
    state: Arc<watch::Sender<Option<String>>>,
}

impl AuthSession {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        let current = store.get(USER_ID_KEY).filter(|id| !id.is_empty());
        let (state, _) = watch::channel(current);
        Self {
            store,
            state: Arc::new(state),
        }
    }

    pub fn user_id(&self) -> Option<String> {
        self.store.get(USER_ID_KEY).filter(|id| !id.is_empty())
    }

    pub fn is_signed_in(&self) -> bool {
        self.user_id().is_some()
    }

    pub fn sign_in(&self, user_id: &str) -> Result<(), BookingError> {
        self.store.set(USER_ID_KEY, user_id)?;
        info!("User {} signed in", user_id);
        self.state.send_replace(Some(user_id.to_string()));
        Ok(())
    }

    pub fn sign_out(&self) -> Result<(), BookingError> {
        self.store.remove(USER_ID_KEY)?;
        info!("User signed out");
        self.state.send_replace(None);
        Ok(())
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.state.subscribe()
    }
}
