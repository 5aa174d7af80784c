//! View state and the pure reducer that drives it.
//!
//! The reducer never performs I/O. It returns [`Effect`]s describing what the
//! session should do next (start a fetch, cancel a superseded one, show a notice).
//!
//! Every search is tagged with a monotonically increasing [`RequestId`]. Only a
//! completion carrying the latest id is applied, so an older request that
//! resolves late can never overwrite a newer reading.

use crate::model::{WeatherQuery, WeatherReading};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestId(pub u64);

impl RequestId {
    fn next(self) -> Self {
        RequestId(self.0 + 1)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// Last applied reading (if any) is on screen.
    #[default]
    Idle,
    /// A search is in flight.
    Fetching { request_id: RequestId },
    /// The latest search failed and the user has been told.
    ErrorNotified { message: String },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub query: WeatherQuery,
    pub reading: Option<WeatherReading>,
    /// Condition category of `reading`, replaced in the same transition.
    pub icon_key: Option<String>,
    pub phase: Phase,
    /// Most recently issued request, if any.
    pub latest_request: Option<RequestId>,
    /// Request whose reading is on screen.
    pub shown_request: Option<RequestId>,
}

impl ViewState {
    pub fn new(default_city: impl Into<String>) -> Self {
        Self { query: WeatherQuery::new(default_city), ..Self::default() }
    }

    /// The "needs refetch" flag.
    pub fn is_fetching(&self) -> bool {
        matches!(self.phase, Phase::Fetching { .. })
    }

    fn in_flight(&self) -> Option<RequestId> {
        match self.phase {
            Phase::Fetching { request_id } => Some(request_id),
            _ => None,
        }
    }

    fn is_latest(&self, request_id: RequestId) -> bool {
        self.latest_request == Some(request_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// View shown for the first time; searches the current query once.
    Mounted,
    CityEdited(String),
    SearchRequested,
    FetchSucceeded { request_id: RequestId, reading: WeatherReading },
    FetchFailed { request_id: RequestId, reason: String },
    NoticeAcknowledged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch { request_id: RequestId, city: String },
    Cancel { request_id: RequestId },
    Notify { message: String },
}

pub fn reduce(mut state: ViewState, event: Event) -> (ViewState, Vec<Effect>) {
    let mut effects = Vec::new();

    match event {
        Event::CityEdited(text) => {
            state.query.city = text;
        }

        Event::Mounted | Event::SearchRequested => {
            let Some(city) = state.query.searchable_city().map(str::to_owned) else {
                return (state, effects);
            };

            if let Some(previous) = state.in_flight() {
                effects.push(Effect::Cancel { request_id: previous });
            }

            let request_id = state.latest_request.unwrap_or_default().next();
            state.latest_request = Some(request_id);
            state.phase = Phase::Fetching { request_id };
            effects.push(Effect::Fetch { request_id, city });
        }

        Event::FetchSucceeded { request_id, reading } => {
            if state.is_latest(request_id) {
                state.icon_key = reading.category().map(str::to_owned);
                state.reading = Some(reading);
                state.shown_request = Some(request_id);
                state.phase = Phase::Idle;
            }
        }

        Event::FetchFailed { request_id, reason } => {
            if state.is_latest(request_id) && state.in_flight() == Some(request_id) {
                state.phase = Phase::ErrorNotified { message: reason.clone() };
                effects.push(Effect::Notify { message: reason });
            }
        }

        Event::NoticeAcknowledged => {
            if matches!(state.phase, Phase::ErrorNotified { .. }) {
                state.phase = Phase::Idle;
            }
        }
    }

    (state, effects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, Measurements};

    fn reading(category: &str, temp: f64) -> WeatherReading {
        WeatherReading {
            main: Some(Measurements { temp: Some(temp), ..Default::default() }),
            weather: vec![Condition {
                main: Some(category.to_string()),
                description: Some(category.to_lowercase()),
            }],
            ..Default::default()
        }
    }

    fn fetch_id(effects: &[Effect]) -> RequestId {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::Fetch { request_id, .. } => Some(*request_id),
                _ => None,
            })
            .expect("a fetch effect")
    }

    #[test]
    fn mount_fetches_default_city() {
        let (state, effects) = reduce(ViewState::new("Moscow"), Event::Mounted);

        assert!(state.is_fetching());
        assert_eq!(
            effects,
            vec![Effect::Fetch { request_id: RequestId(1), city: "Moscow".into() }]
        );
    }

    #[test]
    fn editing_city_never_fetches() {
        let (state, effects) = reduce(ViewState::new("Moscow"), Event::CityEdited("Os".into()));
        assert!(effects.is_empty());

        let (state, effects) = reduce(state, Event::CityEdited("Oslo".into()));
        assert!(effects.is_empty());
        assert_eq!(state.query.city, "Oslo");
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.latest_request, None);
    }

    #[test]
    fn empty_city_search_is_noop() {
        let (before, _) = reduce(ViewState::new("Moscow"), Event::Mounted);
        let (before, _) = reduce(
            before,
            Event::FetchSucceeded { request_id: RequestId(1), reading: reading("Rain", 3.0) },
        );
        let (before, _) = reduce(before, Event::CityEdited(String::new()));

        let (after, effects) = reduce(before.clone(), Event::SearchRequested);

        assert!(effects.is_empty());
        assert_eq!(after, before);
    }

    #[test]
    fn search_trims_city() {
        let state = ViewState::new("  Paris ");
        let (_, effects) = reduce(state, Event::SearchRequested);

        assert_eq!(effects, vec![Effect::Fetch { request_id: RequestId(1), city: "Paris".into() }]);
    }

    #[test]
    fn success_replaces_reading_and_icon_together() {
        let (state, effects) = reduce(ViewState::new("Moscow"), Event::Mounted);
        let id = fetch_id(&effects);

        let (state, effects) =
            reduce(state, Event::FetchSucceeded { request_id: id, reading: reading("Snow", -4.0) });

        assert!(effects.is_empty());
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.icon_key.as_deref(), Some("Snow"));
        assert_eq!(state.reading.as_ref().and_then(|r| r.temperature()), Some(-4.0));
        assert_eq!(state.shown_request, Some(id));
    }

    #[test]
    fn reading_without_category_clears_icon() {
        let (state, effects) = reduce(ViewState::new("Moscow"), Event::Mounted);
        let (state, _) = reduce(
            state,
            Event::FetchSucceeded { request_id: fetch_id(&effects), reading: reading("Rain", 1.0) },
        );

        let (state, effects) = reduce(state, Event::SearchRequested);
        let (state, _) = reduce(
            state,
            Event::FetchSucceeded {
                request_id: fetch_id(&effects),
                reading: WeatherReading::default(),
            },
        );

        assert_eq!(state.icon_key, None);
        assert_eq!(state.reading, Some(WeatherReading::default()));
    }

    #[test]
    fn failure_keeps_previous_reading_and_notifies_once() {
        let (state, effects) = reduce(ViewState::new("Moscow"), Event::Mounted);
        let (state, _) = reduce(
            state,
            Event::FetchSucceeded { request_id: fetch_id(&effects), reading: reading("Clear", 20.0) },
        );
        let previous = state.reading.clone();
        let shown = state.shown_request;

        let (state, effects) = reduce(state, Event::CityEdited("Atlantis".into()));
        assert!(effects.is_empty());
        let (state, effects) = reduce(state, Event::SearchRequested);
        let id = fetch_id(&effects);

        let (state, effects) =
            reduce(state, Event::FetchFailed { request_id: id, reason: "HTTP 404".into() });

        assert_eq!(effects, vec![Effect::Notify { message: "HTTP 404".into() }]);
        assert_eq!(state.reading, previous);
        assert_eq!(state.shown_request, shown);
        assert_eq!(state.icon_key.as_deref(), Some("Clear"));
        assert_eq!(state.phase, Phase::ErrorNotified { message: "HTTP 404".into() });

        // A duplicate failure report for the same request is not announced twice.
        let (state, effects) =
            reduce(state, Event::FetchFailed { request_id: id, reason: "HTTP 404".into() });
        assert!(effects.is_empty());

        let (state, _) = reduce(state, Event::NoticeAcknowledged);
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.reading, previous);
    }

    #[test]
    fn new_search_cancels_in_flight_request() {
        let (state, first) = reduce(ViewState::new("Moscow"), Event::Mounted);
        let first_id = fetch_id(&first);

        let (state, effects) = reduce(state, Event::SearchRequested);

        assert_eq!(effects[0], Effect::Cancel { request_id: first_id });
        assert_eq!(fetch_id(&effects), RequestId(2));
        assert_eq!(state.latest_request, Some(RequestId(2)));
    }

    #[test]
    fn stale_success_is_ignored() {
        let (state, first) = reduce(ViewState::new("Moscow"), Event::Mounted);
        let (state, _) = reduce(state, Event::CityEdited("Oslo".into()));
        let (state, second) = reduce(state, Event::SearchRequested);

        let (state, _) = reduce(
            state,
            Event::FetchSucceeded { request_id: fetch_id(&second), reading: reading("Snow", -1.0) },
        );
        let (state, effects) = reduce(
            state,
            Event::FetchSucceeded { request_id: fetch_id(&first), reading: reading("Rain", 9.0) },
        );

        assert!(effects.is_empty());
        assert_eq!(state.icon_key.as_deref(), Some("Snow"));
        assert_eq!(state.shown_request, Some(fetch_id(&second)));
        assert_eq!(state.reading.and_then(|r| r.temperature()), Some(-1.0));
    }

    #[test]
    fn stale_failure_is_ignored() {
        let (state, first) = reduce(ViewState::new("Moscow"), Event::Mounted);
        let (state, second) = reduce(state, Event::SearchRequested);

        let (state, effects) = reduce(
            state,
            Event::FetchFailed { request_id: fetch_id(&first), reason: "boom".into() },
        );

        assert!(effects.is_empty());
        assert_eq!(state.phase, Phase::Fetching { request_id: fetch_id(&second) });
    }

    #[test]
    fn acknowledge_outside_error_is_noop() {
        let state = ViewState::new("Moscow");
        let (after, effects) = reduce(state.clone(), Event::NoticeAcknowledged);

        assert!(effects.is_empty());
        assert_eq!(after, state);
    }
}
