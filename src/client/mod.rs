//! Recipe client: the view state machine behind the single-page front end.
//!
//! The current [`View`] is owned by a [`ViewMachine`] and serialized into the
//! URL fragment through a [`Navigator`]. User actions go through the
//! transition function, write the fragment, and the fragment is read back to
//! update the machine, so history navigation and user actions take the same
//! path.

mod api;
mod navigation;
mod render;
mod view;

pub use api::{RecipeApi, RecipeRequest};
pub use navigation::{MemoryNavigator, Navigator};
pub use render::{
    instructions_text, render, sanitize_instructions, RecipeCard, Screen, DEFAULT_IMAGE,
    EMPTY_MESSAGE, LOADING_MESSAGE, NO_INGREDIENTS,
};
pub use view::{View, ViewEvent, ViewListener, ViewMachine};

use log::{debug, error, info};

use crate::error::ClientError;
use crate::model::Recipe;

/// Data shown on the recipe screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientState {
    pub recipe: Option<Recipe>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Handle for one in-flight fetch. Completing a stale ticket is a no-op.
#[derive(Debug)]
pub struct FetchTicket {
    generation: u64,
    pub request: RecipeRequest,
}

pub struct RecipeClient<N: Navigator> {
    navigator: N,
    machine: ViewMachine,
    state: ClientState,
    generation: u64,
    pending: Option<u64>,
}

impl<N: Navigator> RecipeClient<N> {
    /// Derive the starting view from the fragment. An empty fragment is
    /// rewritten to `#landing`; an unknown one shows the landing screen.
    pub fn new(mut navigator: N) -> Self {
        let hash = navigator.hash();
        let view = View::from_fragment(&hash).unwrap_or_default();
        if hash.is_empty() {
            navigator.replace_hash(View::Landing.fragment());
        }

        Self {
            navigator,
            machine: ViewMachine::new(view),
            state: ClientState::default(),
            generation: 0,
            pending: None,
        }
    }

    pub fn view(&self) -> View {
        self.machine.current()
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Mutable access for history navigation. Call
    /// [`RecipeClient::on_fragment_change`] afterwards.
    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    pub fn subscribe(&mut self, listener: Box<dyn ViewListener>) {
        self.machine.subscribe(listener);
    }

    pub fn screen(&self) -> Screen {
        render(self.view(), &self.state)
    }

    /// "Start Cooking": landing to options
    pub fn start(&mut self) -> bool {
        self.perform(ViewEvent::Start)
    }

    /// "Back to Options" from the recipe screen
    pub fn back(&mut self) -> bool {
        self.perform(ViewEvent::Back)
    }

    /// Synchronize the machine with the fragment after it changed.
    ///
    /// Leaving the view a fetch was started from abandons that fetch.
    pub fn on_fragment_change(&mut self) {
        let target = View::from_fragment(&self.navigator.hash()).unwrap_or_default();
        if target == self.view() {
            return;
        }

        if self.pending.take().is_some() {
            info!("Navigation to {:?} abandons the pending fetch", target);
            self.state.loading = false;
        }
        self.machine.apply(ViewEvent::Navigate(target));
    }

    /// Start a fetch for `request`.
    ///
    /// Returns `None` without touching state when a fetch is already
    /// running, the client is not on the options screen, or the search term
    /// is blank.
    pub fn begin_fetch(&mut self, request: RecipeRequest) -> Option<FetchTicket> {
        if self.state.loading || self.view() != View::Options {
            debug!("Ignoring {} request in {:?}", request.kind(), self.view());
            return None;
        }

        let request = match request {
            RecipeRequest::Search(term) => {
                let term = term.trim();
                if term.is_empty() {
                    return None;
                }
                RecipeRequest::Search(term.to_string())
            }
            RecipeRequest::Random => RecipeRequest::Random,
        };

        self.generation += 1;
        self.pending = Some(self.generation);
        self.state.loading = true;
        self.state.error = None;

        Some(FetchTicket {
            generation: self.generation,
            request,
        })
    }

    /// Apply the outcome of a fetch and move to the recipe screen.
    ///
    /// Returns false when the ticket was abandoned by navigation.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Recipe, ClientError>,
    ) -> bool {
        if self.pending != Some(ticket.generation) {
            debug!("Dropping stale {} response", ticket.request.kind());
            return false;
        }
        self.pending = None;

        match result {
            Ok(recipe) => {
                self.state.recipe = Some(recipe);
                self.state.error = None;
            }
            Err(e) => {
                error!("Error fetching recipe: {}", e);
                self.state.error = Some(e.message);
            }
        }
        self.state.loading = false;

        self.perform(ViewEvent::ShowRecipe);
        true
    }

    /// Run a whole fetch against `api`
    pub async fn choose(&mut self, api: &RecipeApi, request: RecipeRequest) -> bool {
        let Some(ticket) = self.begin_fetch(request) else {
            return false;
        };
        let result = api.fetch(&ticket.request).await;
        self.complete_fetch(ticket, result)
    }

    /// Validate `event` against the transition function, then go through the
    /// fragment like any other navigation
    fn perform(&mut self, event: ViewEvent) -> bool {
        let Some(next) = self.view().transition(event) else {
            return false;
        };
        self.navigator.set_hash(next.fragment());
        self.on_fragment_change();
        true
    }
}
