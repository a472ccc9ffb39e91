/// Screen the client is showing. The URL fragment is its serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Landing,
    Options,
    DisplayRecipe,
}

/// Something that may move the client to another view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// "Start Cooking" on the landing screen
    Start,
    /// A fetch finished, successfully or not
    ShowRecipe,
    /// "Back to Options" on the recipe screen
    Back,
    /// The fragment changed from outside (history navigation, manual edit)
    Navigate(View),
}

impl View {
    pub fn fragment(self) -> &'static str {
        match self {
            View::Landing => "landing",
            View::Options => "options",
            View::DisplayRecipe => "displayRecipe",
        }
    }

    /// Parse a fragment, with or without its leading `#`
    pub fn from_fragment(fragment: &str) -> Option<View> {
        match fragment.strip_prefix('#').unwrap_or(fragment) {
            "landing" => Some(View::Landing),
            "options" => Some(View::Options),
            "displayRecipe" => Some(View::DisplayRecipe),
            _ => None,
        }
    }

    /// Transition function. `None` means the event is not valid here.
    pub fn transition(self, event: ViewEvent) -> Option<View> {
        match (self, event) {
            (_, ViewEvent::Navigate(target)) => Some(target),
            (View::Landing, ViewEvent::Start) => Some(View::Options),
            (View::Options, ViewEvent::ShowRecipe) => Some(View::DisplayRecipe),
            (View::DisplayRecipe, ViewEvent::Back) => Some(View::Options),
            _ => None,
        }
    }
}

/// Notified whenever the current view changes
pub trait ViewListener: Send {
    fn view_changed(&self, from: View, to: View);
}

/// Current view plus the listeners observing it
pub struct ViewMachine {
    current: View,
    listeners: Vec<Box<dyn ViewListener>>,
}

impl ViewMachine {
    pub fn new(initial: View) -> Self {
        Self {
            current: initial,
            listeners: Vec::new(),
        }
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn subscribe(&mut self, listener: Box<dyn ViewListener>) {
        self.listeners.push(listener);
    }

    /// Apply `event`, notifying listeners if the view actually changed
    pub fn apply(&mut self, event: ViewEvent) -> Option<View> {
        let next = self.current.transition(event)?;
        if next != self.current {
            let previous = self.current;
            self.current = next;
            for listener in &self.listeners {
                listener.view_changed(previous, next);
            }
        }
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Recorder(Arc<Mutex<Vec<(View, View)>>>);

    impl ViewListener for Recorder {
        fn view_changed(&self, from: View, to: View) {
            self.0.lock().unwrap().push((from, to));
        }
    }

    #[test]
    fn test_fragment_round_trip() {
        for view in [View::Landing, View::Options, View::DisplayRecipe] {
            assert_eq!(View::from_fragment(view.fragment()), Some(view));
            assert_eq!(
                View::from_fragment(&format!("#{}", view.fragment())),
                Some(view)
            );
        }
    }

    #[test]
    fn test_unknown_fragments() {
        assert_eq!(View::from_fragment(""), None);
        assert_eq!(View::from_fragment("#"), None);
        assert_eq!(View::from_fragment("#recipes"), None);
        assert_eq!(View::from_fragment("#Options"), None);
    }

    #[test]
    fn test_user_transitions() {
        assert_eq!(View::Landing.transition(ViewEvent::Start), Some(View::Options));
        assert_eq!(
            View::Options.transition(ViewEvent::ShowRecipe),
            Some(View::DisplayRecipe)
        );
        assert_eq!(
            View::DisplayRecipe.transition(ViewEvent::Back),
            Some(View::Options)
        );
    }

    #[test]
    fn test_invalid_transitions() {
        assert_eq!(View::Options.transition(ViewEvent::Start), None);
        assert_eq!(View::Landing.transition(ViewEvent::ShowRecipe), None);
        assert_eq!(View::Landing.transition(ViewEvent::Back), None);
        assert_eq!(View::Options.transition(ViewEvent::Back), None);
    }

    #[test]
    fn test_navigate_reaches_any_view() {
        assert_eq!(
            View::Landing.transition(ViewEvent::Navigate(View::DisplayRecipe)),
            Some(View::DisplayRecipe)
        );
    }

    #[test]
    fn test_listeners_see_changes_only() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut machine = ViewMachine::new(View::Landing);
        machine.subscribe(Box::new(Recorder(seen.clone())));

        machine.apply(ViewEvent::Start);
        machine.apply(ViewEvent::Navigate(View::Options));
        assert_eq!(machine.apply(ViewEvent::Back), None);
        machine.apply(ViewEvent::ShowRecipe);

        assert_eq!(machine.current(), View::DisplayRecipe);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (View::Landing, View::Options),
                (View::Options, View::DisplayRecipe)
            ]
        );
    }
}
