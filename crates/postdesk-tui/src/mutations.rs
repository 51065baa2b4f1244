//! Cross-slice state changes requested by feature reducers.
//!
//! Feature slices own only their screen state. Anything that touches shared
//! state (navigation, notifications, overlays, the session) is returned as a
//! mutation and applied by the top-level reducer.

use crate::common::Notice;
use crate::effects::UiEffect;
use crate::gate::Route;
use crate::overlays::Overlay;

#[derive(Debug)]
pub enum StateMutation {
    Notify(Notice),
    Navigate(Route),
    OpenOverlay(Overlay),
    /// A request came back 401: log out and tell the user.
    SessionExpired,
}

/// Effects and mutations produced by a feature reducer.
#[derive(Debug, Default)]
pub struct FeatureUpdate {
    pub effects: Vec<UiEffect>,
    pub mutations: Vec<StateMutation>,
}

impl FeatureUpdate {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn effect(effect: UiEffect) -> Self {
        Self {
            effects: vec![effect],
            mutations: Vec::new(),
        }
    }

    pub fn mutation(mutation: StateMutation) -> Self {
        Self {
            effects: Vec::new(),
            mutations: vec![mutation],
        }
    }

    pub fn notify(notice: Notice) -> Self {
        Self::mutation(StateMutation::Notify(notice))
    }

    pub fn navigate(route: Route) -> Self {
        Self::mutation(StateMutation::Navigate(route))
    }
}
