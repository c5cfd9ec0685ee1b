//! Navigation - Active Route and Back History
//!
//! Defines the views available in the application and the history stack
//! that "go back" walks.

use tracing::debug;

/// Maximum number of remembered history entries
const MAX_HISTORY: usize = 32;

/// Views the workspace can display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    /// Landing view
    #[default]
    Home,
    /// Settings view with the secrets list
    Settings,
}

impl Route {
    /// Get the translation key for the route title
    pub fn title_key(&self) -> &'static str {
        match self {
            Route::Home => "home.title",
            Route::Settings => "settings.title",
        }
    }
}

/// Host navigation capability handed to views.
///
/// Views only ever ask to go back; what happens when there is nowhere to go
/// is up to the implementation.
pub trait HistoryNavigator {
    /// Return to the previous view
    fn go_back(&mut self);
}

/// Current route plus the routes visited before it
#[derive(Debug, Default)]
pub struct NavigationState {
    route: Route,
    history: Vec<Route>,
}

impl NavigationState {
    /// Start at `route` with empty history
    pub fn new(route: Route) -> Self {
        Self {
            route,
            history: Vec::new(),
        }
    }

    /// Currently displayed route
    pub fn route(&self) -> Route {
        self.route
    }

    /// Whether there is a previous route to return to
    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Switch to `route`, remembering the current one.
    ///
    /// Returns false when `route` is already current.
    pub fn navigate(&mut self, route: Route) -> bool {
        if self.route == route {
            return false;
        }

        if self.history.len() == MAX_HISTORY {
            self.history.remove(0);
        }
        self.history.push(self.route);
        self.route = route;
        debug!(?route, depth = self.history.len(), "Navigated");
        true
    }

    /// Pop the most recent history entry and make it current.
    ///
    /// Returns false and keeps the current route when history is empty.
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                debug!(from = ?self.route, to = ?previous, "Navigated back");
                self.route = previous;
                true
            }
            None => {
                debug!(route = ?self.route, "No history to go back to");
                false
            }
        }
    }
}

impl HistoryNavigator for NavigationState {
    fn go_back(&mut self) {
        self.back();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigate_and_back() {
        let mut nav = NavigationState::default();
        assert_eq!(nav.route(), Route::Home);
        assert!(!nav.can_go_back());

        assert!(nav.navigate(Route::Settings));
        assert_eq!(nav.route(), Route::Settings);
        assert!(nav.can_go_back());

        nav.go_back();
        assert_eq!(nav.route(), Route::Home);
        assert!(!nav.can_go_back());
    }

    #[test]
    fn navigate_to_current_route_is_noop() {
        let mut nav = NavigationState::new(Route::Settings);
        assert!(!nav.navigate(Route::Settings));
        assert!(!nav.can_go_back());
    }

    #[test]
    fn back_with_empty_history_keeps_route() {
        let mut nav = NavigationState::new(Route::Settings);
        assert!(!nav.back());
        nav.go_back();
        assert_eq!(nav.route(), Route::Settings);
    }

    #[test]
    fn history_is_capped() {
        let mut nav = NavigationState::default();
        for _ in 0..(MAX_HISTORY * 2) {
            nav.navigate(Route::Settings);
            nav.navigate(Route::Home);
        }
        assert_eq!(nav.history.len(), MAX_HISTORY);

        let mut steps = 0;
        while nav.back() {
            steps += 1;
        }
        assert_eq!(steps, MAX_HISTORY);
    }
}
