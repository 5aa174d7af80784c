//! Drives [`ViewState`] through [`reduce`] and carries out the resulting effects.
//!
//! The session is the only owner of the state. Fetches run as spawned tasks whose
//! sole output is a completion [`Event`] sent back over a channel, so every state
//! change happens on the task that owns the session.

use std::{collections::HashMap, sync::Arc};

use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, warn};

use crate::{
    provider::WeatherProvider,
    state::{Effect, Event, RequestId, ViewState, reduce},
};

/// Shows a failure to the user. Returns once the user has seen it.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

pub struct Session {
    provider: Arc<dyn WeatherProvider>,
    state: ViewState,
    completions_tx: mpsc::UnboundedSender<Event>,
    completions_rx: mpsc::UnboundedReceiver<Event>,
    in_flight: HashMap<RequestId, JoinHandle<()>>,
}

impl Session {
    pub fn new(provider: Arc<dyn WeatherProvider>, state: ViewState) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self { provider, state, completions_tx, completions_rx, in_flight: HashMap::new() }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Applies one event and everything it causes synchronously.
    pub fn dispatch(&mut self, event: Event, notifier: &mut dyn Notifier) {
        let mut queue = vec![event];

        while let Some(event) = queue.pop() {
            if let Event::FetchSucceeded { request_id, .. } | Event::FetchFailed { request_id, .. } =
                &event
            {
                self.in_flight.remove(request_id);
            }

            let (next, effects) = reduce(std::mem::take(&mut self.state), event);
            self.state = next;

            for effect in effects {
                match effect {
                    Effect::Fetch { request_id, city } => self.spawn_fetch(request_id, city),
                    Effect::Cancel { request_id } => self.cancel(request_id),
                    Effect::Notify { message } => {
                        notifier.notify(&message);
                        queue.push(Event::NoticeAcknowledged);
                    }
                }
            }
        }
    }

    /// Waits for the next fetch to complete. Pending forever when nothing is in flight.
    pub async fn next_completion(&mut self) -> Event {
        match self.completions_rx.recv().await {
            Some(event) => event,
            // The session holds a sender, so the channel never closes.
            None => std::future::pending().await,
        }
    }

    /// Processes completions until no search is outstanding.
    pub async fn run_until_idle(&mut self, notifier: &mut dyn Notifier) {
        while self.state.is_fetching() {
            let event = self.next_completion().await;
            self.dispatch(event, notifier);
        }
    }

    fn spawn_fetch(&mut self, request_id: RequestId, city: String) {
        debug!(%request_id, %city, "starting weather fetch");

        let provider = Arc::clone(&self.provider);
        let tx = self.completions_tx.clone();

        let handle = tokio::spawn(async move {
            let event = match provider.fetch_weather(&city).await {
                Ok(reading) => Event::FetchSucceeded { request_id, reading },
                Err(err) => {
                    warn!(%request_id, %city, error = %err, "weather fetch failed");
                    Event::FetchFailed { request_id, reason: err.notice() }
                }
            };
            // Receiver gone means the session was dropped.
            let _ = tx.send(event);
        });

        self.in_flight.insert(request_id, handle);
    }

    fn cancel(&mut self, request_id: RequestId) {
        if let Some(handle) = self.in_flight.remove(&request_id) {
            debug!(%request_id, "cancelling superseded fetch");
            handle.abort();
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        for (_, handle) in self.in_flight.drain() {
            handle.abort();
        }
    }
}
