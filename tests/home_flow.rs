use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};

use movie_itunes::detail::{DetailButton, DetailSection, DetailViewModel};
use movie_itunes::error::{FavoriteError, NetworkError};
use movie_itunes::home::{
    Column, DataSource, HomeAction, HomeErrorKind, HomeState, HomeViewModel, ListItem,
    SectionKind, SectionTap, Tap,
};
use movie_itunes::model::{Movie, Poster};
use movie_itunes::repository::MovieRepository;
use movie_itunes::route::{Route, Toast};
use movie_itunes::usecase::{DetailUseCase, HomeUseCase};

/// In-memory repository keyed by search term.
#[derive(Default)]
struct FakeRepository {
    results: Mutex<HashMap<String, Result<Vec<Movie>, NetworkError>>>,
    favorites: Mutex<Vec<Movie>>,
    searches: Mutex<Vec<(String, String, u32)>>,
    offline: AtomicBool,
}

impl FakeRepository {
    async fn with_results(self, term: &str, result: Result<Vec<Movie>, NetworkError>) -> Self {
        self.results.lock().await.insert(term.to_string(), result);
        self
    }

    async fn searches(&self) -> Vec<(String, String, u32)> {
        self.searches.lock().await.clone()
    }
}

#[async_trait]
impl MovieRepository for FakeRepository {
    async fn search_movies(
        &self,
        keyword: &str,
        genre: &str,
        limit: u32,
    ) -> Result<Vec<Movie>, NetworkError> {
        self.searches
            .lock()
            .await
            .push((keyword.to_string(), genre.to_string(), limit));
        if self.offline.load(Ordering::SeqCst) {
            return Err(NetworkError::no_internet());
        }
        let term = if keyword.is_empty() { genre } else { keyword };
        self.results
            .lock()
            .await
            .get(term)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn save_favorite(&self, movie: &Movie) -> Result<Movie, FavoriteError> {
        let mut favorites = self.favorites.lock().await;
        if favorites.iter().any(|m| m.id == movie.id) {
            return Err(FavoriteError::AlreadyExists(movie.id.clone()));
        }
        favorites.push(movie.clone());
        Ok(movie.clone())
    }

    async fn get_favorites(&self) -> Result<Vec<Movie>, FavoriteError> {
        Ok(self.favorites.lock().await.iter().rev().cloned().collect())
    }

    async fn delete(&self, movie: &Movie) -> Result<Movie, FavoriteError> {
        let mut favorites = self.favorites.lock().await;
        let Some(index) = favorites.iter().position(|m| m.id == movie.id) else {
            return Err(FavoriteError::DoesNotExist(movie.id.clone()));
        };
        favorites.remove(index);
        Ok(movie.clone())
    }

    async fn check_favorite_status(&self, movie: &Movie) -> Result<bool, FavoriteError> {
        Ok(self.favorites.lock().await.iter().any(|m| m.id == movie.id))
    }

    async fn get_image_data(&self, url: &str) -> Option<Vec<u8>> {
        Some(url.as_bytes().to_vec())
    }

    async fn is_connected(&self) -> bool {
        !self.offline.load(Ordering::SeqCst)
    }
}

fn movie(id: &str) -> Movie {
    Movie {
        id: id.into(),
        title: format!("Movie {}", id),
        year: "2020".into(),
        poster: Poster::new(format!("tiny/{}", id), format!("large/{}", id)),
        ..Default::default()
    }
}

fn start(repo: Arc<FakeRepository>) -> (HomeViewModel, mpsc::UnboundedReceiver<Route>) {
    let use_case = Arc::new(HomeUseCase::new(repo));
    HomeViewModel::spawn(use_case, HomeState::new("Action", 25, Column::Two))
}

fn kinds(state: &HomeState) -> Vec<SectionKind> {
    state.data_sources.iter().map(DataSource::kind).collect()
}

fn drain(routes: &mut mpsc::UnboundedReceiver<Route>) -> Vec<Route> {
    let mut out = Vec::new();
    while let Ok(route) = routes.try_recv() {
        out.push(route);
    }
    out
}

#[tokio::test]
async fn did_load_shows_favorites_then_genre_list() {
    let repo = Arc::new(
        FakeRepository::default()
            .with_results("Action", Ok(vec![movie("1"), movie("2")]))
            .await,
    );
    repo.favorites.lock().await.push(movie("2").with_favorited(true));

    let (home, _routes) = start(repo.clone());
    home.send(HomeAction::DidLoad);
    home.wait_idle().await;

    let state = home.state();
    assert!(!state.is_loading);
    assert_eq!(kinds(&state), vec![SectionKind::Favorites, SectionKind::Lists]);
    assert_eq!(state.favorites().unwrap().len(), 1);

    let items = state.list_items().unwrap();
    assert_eq!(items.len(), 2);
    let flags: Vec<bool> = items
        .iter()
        .filter_map(ListItem::movie)
        .map(|m| m.favorited)
        .collect();
    assert_eq!(flags, vec![false, true]);

    assert_eq!(repo.searches().await, vec![(String::new(), "Action".to_string(), 25)]);
}

#[tokio::test]
async fn keyword_search_hides_favorites_and_clearing_restores_them() {
    let repo = Arc::new(
        FakeRepository::default()
            .with_results("Action", Ok(vec![movie("1")]))
            .await
            .with_results("batman", Ok(vec![movie("42")]))
            .await,
    );
    repo.favorites.lock().await.push(movie("7").with_favorited(true));

    let (home, _routes) = start(repo.clone());
    home.send(HomeAction::DidLoad);
    home.wait_idle().await;

    home.send(HomeAction::SearchDidChange("batman".into()));
    home.wait_idle().await;
    let state = home.state();
    assert_eq!(state.keyword, "batman");
    assert!(state.genre.is_empty());
    assert_eq!(kinds(&state), vec![SectionKind::Lists]);
    assert!(state.find_listed("42"));

    home.send(HomeAction::SearchDidChange(String::new()));
    home.wait_idle().await;
    let state = home.state();
    assert_eq!(state.genre, "Action");
    assert_eq!(kinds(&state), vec![SectionKind::Favorites, SectionKind::Lists]);
    assert!(state.find_listed("1"));
}

#[tokio::test]
async fn unknown_keyword_shows_not_found_only() {
    let repo = Arc::new(
        FakeRepository::default()
            .with_results("Action", Ok(vec![movie("1")]))
            .await,
    );
    repo.favorites.lock().await.push(movie("7"));

    let (home, _routes) = start(repo);
    home.send(HomeAction::DidLoad);
    home.send(HomeAction::SearchDidChange("qwertyuiop".into()));
    home.wait_idle().await;

    assert_eq!(
        home.state().data_sources,
        vec![DataSource::Error(HomeErrorKind::NotFound("qwertyuiop".into()))]
    );
}

#[tokio::test]
async fn offline_without_favorites_shows_no_internet() {
    let repo = Arc::new(FakeRepository::default());
    repo.offline.store(true, Ordering::SeqCst);

    let (home, _routes) = start(repo.clone());
    home.send(HomeAction::DidLoad);
    home.wait_idle().await;
    assert_eq!(
        home.state().data_sources,
        vec![DataSource::Error(HomeErrorKind::NoInternet)]
    );

    // Back online, the error button reloads.
    repo.offline.store(false, Ordering::SeqCst);
    repo.results
        .lock()
        .await
        .insert("Action".into(), Ok(vec![movie("1")]));
    home.send(HomeAction::DidLoad);
    home.wait_idle().await;
    assert_eq!(kinds(&home.state()), vec![SectionKind::Lists]);
}

#[tokio::test]
async fn offline_with_saved_favorites_shows_no_internet() {
    let repo = Arc::new(FakeRepository::default());
    repo.favorites.lock().await.push(movie("7").with_favorited(true));
    repo.offline.store(true, Ordering::SeqCst);

    let (home, _routes) = start(repo.clone());
    home.send(HomeAction::DidLoad);
    home.wait_idle().await;
    assert_eq!(
        home.state().data_sources,
        vec![DataSource::Error(HomeErrorKind::NoInternet)]
    );

    repo.offline.store(false, Ordering::SeqCst);
    repo.results
        .lock()
        .await
        .insert("Action".into(), Ok(vec![movie("1")]));
    home.send(HomeAction::DidLoad);
    home.wait_idle().await;
    assert_eq!(kinds(&home.state()), vec![SectionKind::Favorites, SectionKind::Lists]);
}

#[tokio::test]
async fn empty_genre_keeps_not_found_with_saved_favorites() {
    let repo = Arc::new(FakeRepository::default());
    repo.favorites.lock().await.push(movie("7").with_favorited(true));

    let (home, _routes) = start(repo);
    home.send(HomeAction::DidLoad);
    home.wait_idle().await;
    assert_eq!(
        home.state().data_sources,
        vec![DataSource::Error(HomeErrorKind::NotFound("Action".into()))]
    );
}

#[tokio::test]
async fn actor_stops_when_handles_are_dropped() {
    let repo = Arc::new(FakeRepository::default());
    let use_case = Arc::new(HomeUseCase::new(repo));
    let (home, routes) =
        HomeViewModel::spawn(use_case.clone(), HomeState::new("Action", 25, Column::Two));
    home.send(HomeAction::DidLoad);
    home.wait_idle().await;

    drop(home);
    drop(routes);
    tokio::time::timeout(Duration::from_secs(2), async {
        while Arc::strong_count(&use_case) > 1 {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("home actor kept running after every handle was dropped");
}

#[tokio::test]
async fn double_tap_toggles_favorite_with_toasts() {
    let repo = Arc::new(
        FakeRepository::default()
            .with_results("Action", Ok(vec![movie("1"), movie("2")]))
            .await,
    );
    let (home, mut routes) = start(repo.clone());
    home.send(HomeAction::DidLoad);
    home.wait_idle().await;
    assert_eq!(kinds(&home.state()), vec![SectionKind::Lists]);

    home.send(HomeAction::MovieTapped(SectionTap::list(Tap::Double, "1")));
    home.wait_idle().await;

    let state = home.state();
    assert_eq!(kinds(&state), vec![SectionKind::Favorites, SectionKind::Lists]);
    assert_eq!(state.favorites().unwrap()[0].id, "1");
    assert!(state.favorites().unwrap()[0].poster.image_tiny.is_some());
    assert!(state.find_movie_favorited("1"));
    let toasts = drain(&mut routes);
    assert!(matches!(&toasts[..], [Route::Toast(t)] if t.title == "Added to favorite"));

    home.send(HomeAction::MovieTapped(SectionTap::list(Tap::Double, "1")));
    home.wait_idle().await;

    let state = home.state();
    assert_eq!(kinds(&state), vec![SectionKind::Lists]);
    assert!(!state.find_movie_favorited("1"));
    let toasts = drain(&mut routes);
    assert_eq!(
        toasts,
        vec![Route::Toast(Toast::removed(&movie("1")))]
    );
    assert!(repo.favorites.lock().await.is_empty());
}

#[tokio::test]
async fn column_toggle_keeps_items() {
    let repo = Arc::new(
        FakeRepository::default()
            .with_results("Action", Ok(vec![movie("1"), movie("2"), movie("3")]))
            .await,
    );
    let (home, _routes) = start(repo.clone());
    home.send(HomeAction::DidLoad);
    home.wait_idle().await;
    let before = home.state().list_items().unwrap().to_vec();

    home.send(HomeAction::ColumnButtonDidTap);
    home.wait_idle().await;
    assert_eq!(home.state().column, Column::Three);

    home.send(HomeAction::ColumnButtonDidTap);
    home.wait_idle().await;
    let state = home.state();
    assert_eq!(state.column, Column::Two);
    assert_eq!(state.list_items().unwrap(), before.as_slice());
    assert_eq!(repo.searches().await.len(), 1);
}

#[tokio::test]
async fn detail_favorite_button_reenters_home() {
    let repo = Arc::new(
        FakeRepository::default()
            .with_results("Action", Ok(vec![movie("1")]))
            .await,
    );
    let (home, mut routes) = start(repo.clone());
    home.send(HomeAction::DidLoad);
    home.wait_idle().await;

    home.send(HomeAction::MovieTapped(SectionTap::list(Tap::Single, "1")));
    home.wait_idle().await;
    let Some(Route::Detail { movie: tapped }) = drain(&mut routes).pop() else {
        panic!("expected a detail route");
    };

    let mut detail = DetailViewModel::new(
        DetailUseCase::new(repo.clone()),
        tapped,
        Some(home.favorite_completion()),
    );
    let state = detail.load().await;
    assert!(matches!(&state.data_sources[..], [DetailSection::Header(m), DetailSection::Trailer(_)] if !m.favorited));
    assert_eq!(state.poster.large, "large/1");

    let sent = detail.button_did_tap(DetailButton::Favorite).await.unwrap();
    assert!(!sent.favorited);
    home.wait_idle().await;
    assert!(repo.check_favorite_status(&sent).await.unwrap());
    assert!(home.state().find_movie_favorited("1"));

    // Second press: storage now says favorited, so the completion removes it.
    let sent = detail.button_did_tap(DetailButton::Favorite).await.unwrap();
    assert!(sent.favorited);
    home.wait_idle().await;
    assert!(!repo.check_favorite_status(&sent).await.unwrap());

    let titles: Vec<String> = drain(&mut routes)
        .into_iter()
        .filter_map(|r| match r {
            Route::Toast(t) => Some(t.title),
            Route::Detail { .. } => None,
        })
        .collect();
    assert_eq!(titles, vec!["Added to favorite", "Removed from favorite"]);

    assert!(detail.button_did_tap(DetailButton::Buy).await.is_none());
}

trait ListLookup {
    fn find_listed(&self, id: &str) -> bool;
    fn find_movie_favorited(&self, id: &str) -> bool;
}

impl ListLookup for HomeState {
    fn find_listed(&self, id: &str) -> bool {
        self.list_items()
            .unwrap_or_default()
            .iter()
            .filter_map(ListItem::movie)
            .any(|m| m.id == id)
    }

    fn find_movie_favorited(&self, id: &str) -> bool {
        self.list_items()
            .unwrap_or_default()
            .iter()
            .filter_map(ListItem::movie)
            .any(|m| m.id == id && m.favorited)
    }
}
