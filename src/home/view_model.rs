//! Single-writer actor around the home reducer.
//!
//! One tokio task owns [`HomeState`] and applies actions in arrival order.
//! Effects run as separate tasks and report back through the same queue, so a
//! search result and a favorites result can never interleave inside a
//! transition.

use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info_span, Instrument};

use crate::home::action::{Effect, HomeAction};
use crate::home::reducer::reduce;
use crate::home::state::HomeState;
use crate::route::{FavoriteCompletion, Route};
use crate::usecase::HomeUseCase;

/// Enqueues actions and counts outstanding work: queued actions plus running
/// effects. The count only reaches zero once everything has settled.
#[derive(Clone)]
struct Dispatcher {
    tx: mpsc::UnboundedSender<HomeAction>,
    pending: Arc<watch::Sender<usize>>,
}

impl Dispatcher {
    fn dispatch(&self, action: HomeAction) {
        self.begin();
        if let Err(err) = self.tx.send(action) {
            debug!(action = ?err.0, "home view model stopped; action dropped");
            self.end();
        }
    }

    fn begin(&self) {
        self.pending.send_modify(|n| *n += 1);
    }

    fn end(&self) {
        self.pending.send_modify(|n| *n = n.saturating_sub(1));
    }
}

/// Handle to the home screen. Cloning is cheap; all clones drive the same state.
#[derive(Clone)]
pub struct HomeViewModel {
    dispatcher: Dispatcher,
    state: watch::Receiver<HomeState>,
}

impl HomeViewModel {
    /// Start the actor on the current tokio runtime. Navigation intents are
    /// delivered on the returned receiver.
    pub fn spawn(
        use_case: Arc<HomeUseCase>,
        initial: HomeState,
    ) -> (Self, mpsc::UnboundedReceiver<Route>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (route_tx, route_rx) = mpsc::unbounded_channel();
        let (pending, _) = watch::channel(0usize);
        let (state_tx, state_rx) = watch::channel(initial.clone());

        let dispatcher = Dispatcher {
            tx,
            pending: Arc::new(pending),
        };
        let runner = Runner {
            state: initial,
            state_tx,
            route_tx,
            use_case,
            dispatcher: dispatcher.clone(),
        };
        tokio::spawn(runner.run(rx).instrument(info_span!("home")));

        (
            Self {
                dispatcher,
                state: state_rx,
            },
            route_rx,
        )
    }

    pub fn send(&self, action: HomeAction) {
        self.dispatcher.dispatch(action);
    }

    /// Latest published snapshot.
    pub fn state(&self) -> HomeState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<HomeState> {
        self.state.clone()
    }

    /// Resolves once no action is queued and no effect is running.
    pub async fn wait_idle(&self) {
        let mut pending = self.dispatcher.pending.subscribe();
        let _ = pending.wait_for(|n| *n == 0).await;
    }

    /// Completion handed to the detail screen; re-enters as
    /// [`HomeAction::MovieCompletion`].
    pub fn favorite_completion(&self) -> FavoriteCompletion {
        let dispatcher = self.dispatcher.clone();
        Box::new(move |movie| dispatcher.dispatch(HomeAction::MovieCompletion(movie)))
    }
}

struct Runner {
    state: HomeState,
    state_tx: watch::Sender<HomeState>,
    route_tx: mpsc::UnboundedSender<Route>,
    use_case: Arc<HomeUseCase>,
    dispatcher: Dispatcher,
}

impl Runner {
    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<HomeAction>) {
        loop {
            // The runner keeps a sender for effect results, so `recv` alone
            // never ends; stop once every handle's state receiver is gone.
            let action = tokio::select! {
                action = rx.recv() => action,
                _ = self.state_tx.closed() => None,
            };
            let Some(action) = action else { break };

            debug!(?action, "applying action");
            let effects = reduce(&mut self.state, action);
            self.state_tx.send_replace(self.state.clone());
            for effect in effects {
                self.execute(effect);
            }
            self.dispatcher.end();
        }
        debug!("home view model stopped");
    }

    fn execute(&self, effect: Effect) {
        match effect {
            Effect::Navigate(route) => {
                if self.route_tx.send(route).is_err() {
                    debug!("route receiver dropped");
                }
            }
            Effect::SearchMovies {
                generation,
                keyword,
                genre,
                limit,
            } => self.spawn_effect(move |use_case| async move {
                let result = use_case.search_movies(&keyword, &genre, limit).await;
                let saved = use_case.saved_movies().await;
                HomeAction::MoviesLoaded {
                    generation,
                    result,
                    saved,
                }
            }),
            Effect::LoadFavorites => self.spawn_effect(|use_case| async move {
                let result = use_case.get_favorites().await;
                let connected = match &result {
                    Ok(favorites) if favorites.is_empty() => use_case.is_connected().await,
                    _ => true,
                };
                HomeAction::FavoritesLoaded { result, connected }
            }),
            Effect::SaveFavorite(movie) => self.spawn_effect(|use_case| async move {
                let result = use_case.save_favorite(movie.clone()).await;
                HomeAction::FavoriteSaved { movie, result }
            }),
            Effect::DeleteFavorite(movie) => self.spawn_effect(|use_case| async move {
                let result = use_case.delete_favorite(movie.clone()).await;
                HomeAction::FavoriteRemoved { movie, result }
            }),
        }
    }

    fn spawn_effect<F, Fut>(&self, work: F)
    where
        F: FnOnce(Arc<HomeUseCase>) -> Fut,
        Fut: std::future::Future<Output = HomeAction> + Send + 'static,
    {
        let dispatcher = self.dispatcher.clone();
        let fut = work(self.use_case.clone());
        dispatcher.begin();
        tokio::spawn(
            async move {
                let action = fut.await;
                dispatcher.dispatch(action);
                dispatcher.end();
            }
            .in_current_span(),
        );
    }
}
