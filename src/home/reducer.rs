//! State transitions of the home screen.
//!
//! [`reduce`] is the only function that mutates [`HomeState`]. It never awaits:
//! anything slow is returned as an [`Effect`] and its outcome comes back later
//! as another [`HomeAction`].

use tracing::{debug, warn};

use crate::home::action::{Effect, HomeAction, SectionTap, Tap};
use crate::home::state::{HomeErrorKind, HomeState, ListItem, SectionKind};
use crate::model::Movie;
use crate::route::{Route, Toast};

pub fn reduce(state: &mut HomeState, action: HomeAction) -> Vec<Effect> {
    match action {
        HomeAction::DidLoad => {
            let mut effects = reduce(state, HomeAction::GetFavorites);
            effects.extend(reduce(state, HomeAction::GetMovies));
            effects
        }
        HomeAction::SearchDidChange(text) => search_did_change(state, text),
        HomeAction::SearchDidCancel => search_did_change(state, String::new()),
        HomeAction::GetMovies => get_movies(state),
        HomeAction::GetFavorites => vec![Effect::LoadFavorites],
        HomeAction::MovieTapped(tap) => movie_tapped(state, tap),
        HomeAction::MovieCompletion(movie) => vec![toggle_favorite(movie)],
        HomeAction::ColumnButtonDidTap => {
            let column = state.column.toggled();
            state.set_list_column(column);
            Vec::new()
        }
        HomeAction::MoviesLoaded {
            generation,
            result,
            saved,
        } => {
            movies_loaded(state, generation, result, saved);
            Vec::new()
        }
        HomeAction::FavoritesLoaded { result, connected } => {
            match result {
                Ok(favorites) => favorites_loaded(state, favorites, connected),
                Err(err) => {
                    warn!(?err, "failed to load favorites");
                    state.remove_section(SectionKind::Favorites);
                }
            }
            Vec::new()
        }
        HomeAction::FavoriteSaved { movie, result } => match result {
            Ok(saved) => {
                state.set_list_favorited(&saved.id, true);
                vec![
                    Effect::Navigate(Route::Toast(Toast::added(&saved))),
                    Effect::LoadFavorites,
                ]
            }
            Err(err) => {
                warn!(id = %movie.id, ?err, "failed to save favorite");
                vec![Effect::Navigate(Route::Toast(Toast::failed(err.to_string())))]
            }
        },
        HomeAction::FavoriteRemoved { movie, result } => match result {
            Ok(removed) => {
                state.set_list_favorited(&removed.id, false);
                vec![
                    Effect::Navigate(Route::Toast(Toast::removed(&removed))),
                    Effect::LoadFavorites,
                ]
            }
            Err(err) => {
                warn!(id = %movie.id, ?err, "failed to remove favorite");
                vec![Effect::Navigate(Route::Toast(Toast::failed(err.to_string())))]
            }
        },
    }
}

/// A non-empty keyword clears the genre; an empty one restores the default
/// genre and brings the favorites back. The text is stored as typed.
fn search_did_change(state: &mut HomeState, text: String) -> Vec<Effect> {
    state.keyword = text;
    state.genre = if state.has_keyword() {
        String::new()
    } else {
        state.default_genre().to_string()
    };

    let mut effects = reduce(state, HomeAction::GetMovies);
    if !state.has_keyword() {
        effects.extend(reduce(state, HomeAction::GetFavorites));
    }
    effects
}

fn get_movies(state: &mut HomeState) -> Vec<Effect> {
    state.search_generation += 1;
    state.is_loading = true;
    state.remove_section(SectionKind::Error);
    let shimmer = state.shimmer_items();
    state.upsert_list(shimmer);

    vec![Effect::SearchMovies {
        generation: state.search_generation,
        keyword: state.keyword.clone(),
        genre: state.genre.clone(),
        limit: state.limit,
    }]
}

fn movies_loaded(
    state: &mut HomeState,
    generation: u64,
    result: Result<Vec<Movie>, crate::error::NetworkError>,
    saved: Vec<Movie>,
) {
    if generation != state.search_generation {
        debug!(
            generation,
            current = state.search_generation,
            "dropping superseded search result"
        );
        return;
    }
    state.is_loading = false;

    match result {
        Ok(movies) if movies.is_empty() => {
            let term = state.search_term().to_string();
            state.show_error(HomeErrorKind::NotFound(term));
        }
        Ok(movies) => {
            state.remove_section(SectionKind::Error);
            state.upsert_list(movies.into_iter().map(ListItem::Content).collect());
            if state.has_keyword() || saved.is_empty() {
                state.remove_section(SectionKind::Favorites);
            } else {
                state.upsert_favorites(saved);
            }
        }
        Err(err) if err.is_no_internet() => {
            state.show_error(HomeErrorKind::NoInternet);
        }
        Err(err) => {
            warn!(%err, "search failed");
            state.remove_section(SectionKind::Lists);
        }
    }
}

fn favorites_loaded(state: &mut HomeState, favorites: Vec<Movie>, connected: bool) {
    if favorites.is_empty() {
        state.remove_section(SectionKind::Favorites);
        if !connected {
            state.show_error(HomeErrorKind::NoInternet);
        }
        return;
    }
    if state.has_keyword() {
        state.remove_section(SectionKind::Favorites);
        return;
    }
    // An error screen set by the search wins regardless of arrival order;
    // the next GetMovies clears it.
    if state.error().is_some() {
        debug!("error screen shown; favorites not merged");
        return;
    }
    state.upsert_favorites(favorites);
}

fn movie_tapped(state: &mut HomeState, tap: SectionTap) -> Vec<Effect> {
    let Some(movie) = state.find_movie(tap.section, &tap.id).cloned() else {
        debug!(id = %tap.id, section = ?tap.section, "tapped movie is not shown");
        return Vec::new();
    };
    match (tap.tap, tap.section) {
        (Tap::Single, _) => vec![Effect::Navigate(Route::Detail { movie })],
        (Tap::Double, SectionKind::Lists) => vec![toggle_favorite(movie)],
        (Tap::Double, _) => Vec::new(),
    }
}

/// Act on the movie's current flag: favorited movies are removed, others saved.
fn toggle_favorite(movie: Movie) -> Effect {
    if movie.favorited {
        Effect::DeleteFavorite(movie)
    } else {
        Effect::SaveFavorite(movie)
    }
}
