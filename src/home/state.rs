//! Renderable state of the home screen.
//!
//! `HomeState` is owned by the reducer. Sections are always located by
//! [`SectionKind`], never by a remembered index, so every mutation is valid no
//! matter which sections another action added or removed before it.

use crate::model::Movie;

pub const FAVORITES_TITLE: &str = "Movie you liked";
pub const POPULAR_TITLE: &str = "Popular now";

/// Placeholder rows per grid column while a search is in flight.
const SHIMMER_ROWS: usize = 3;

/// Grid column count of the list section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Two,
    Three,
}

impl Column {
    pub fn from_count(count: u8) -> Self {
        if count >= 3 {
            Column::Three
        } else {
            Column::Two
        }
    }

    pub fn count(self) -> u8 {
        match self {
            Column::Two => 2,
            Column::Three => 3,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Column::Two => Column::Three,
            Column::Three => Column::Two,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListItem {
    Content(Movie),
    Shimmer(usize),
}

impl ListItem {
    pub fn movie(&self) -> Option<&Movie> {
        match self {
            ListItem::Content(movie) => Some(movie),
            ListItem::Shimmer(_) => None,
        }
    }
}

/// Full-screen error shown instead of the regular sections.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HomeErrorKind {
    NoInternet,
    /// Nothing matched the search term (keyword or genre).
    NotFound(String),
}

impl HomeErrorKind {
    pub fn image(&self) -> &'static str {
        match self {
            HomeErrorKind::NoInternet => "wifi.slash",
            HomeErrorKind::NotFound(_) => "magnifyingglass",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            HomeErrorKind::NoInternet => "No internet connection",
            HomeErrorKind::NotFound(_) => "Movie not found",
        }
    }

    pub fn description(&self) -> String {
        match self {
            HomeErrorKind::NoInternet => {
                "Please check your connection and try again.".to_string()
            }
            HomeErrorKind::NotFound(term) => {
                format!("We couldn't find any movie for \"{}\".", term)
            }
        }
    }

    /// The button reloads the screen; only offline errors offer it.
    pub fn button_title(&self) -> Option<&'static str> {
        match self {
            HomeErrorKind::NoInternet => Some("Try again"),
            HomeErrorKind::NotFound(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Favorites,
    Lists,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataSource {
    Favorites {
        title: String,
        items: Vec<Movie>,
    },
    Lists {
        title: String,
        column: Column,
        items: Vec<ListItem>,
    },
    Error(HomeErrorKind),
}

impl DataSource {
    pub fn kind(&self) -> SectionKind {
        match self {
            DataSource::Favorites { .. } => SectionKind::Favorites,
            DataSource::Lists { .. } => SectionKind::Lists,
            DataSource::Error(_) => SectionKind::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeState {
    pub data_sources: Vec<DataSource>,
    pub keyword: String,
    pub genre: String,
    pub limit: u32,
    pub column: Column,
    pub is_loading: bool,
    pub(crate) default_genre: String,
    pub(crate) search_generation: u64,
}

impl HomeState {
    pub fn new(default_genre: impl Into<String>, limit: u32, column: Column) -> Self {
        let default_genre = default_genre.into();
        Self {
            data_sources: Vec::new(),
            keyword: String::new(),
            genre: default_genre.clone(),
            limit,
            column,
            is_loading: false,
            default_genre,
            search_generation: 0,
        }
    }

    pub fn section(&self, kind: SectionKind) -> Option<&DataSource> {
        self.data_sources.iter().find(|s| s.kind() == kind)
    }

    pub fn favorites(&self) -> Option<&[Movie]> {
        match self.section(SectionKind::Favorites) {
            Some(DataSource::Favorites { items, .. }) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn list_items(&self) -> Option<&[ListItem]> {
        match self.section(SectionKind::Lists) {
            Some(DataSource::Lists { items, .. }) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&HomeErrorKind> {
        match self.section(SectionKind::Error) {
            Some(DataSource::Error(kind)) => Some(kind),
            _ => None,
        }
    }

    /// The term of the current search: the keyword, or the genre while browsing.
    pub fn search_term(&self) -> &str {
        if self.keyword.is_empty() {
            &self.genre
        } else {
            &self.keyword
        }
    }

    pub(crate) fn default_genre(&self) -> &str {
        &self.default_genre
    }

    pub(crate) fn has_keyword(&self) -> bool {
        !self.keyword.is_empty()
    }

    pub(crate) fn list_title(&self) -> String {
        if self.has_keyword() {
            format!("Results for \"{}\"", self.keyword)
        } else {
            POPULAR_TITLE.to_string()
        }
    }

    pub(crate) fn shimmer_items(&self) -> Vec<ListItem> {
        (0..usize::from(self.column.count()) * SHIMMER_ROWS)
            .map(ListItem::Shimmer)
            .collect()
    }

    pub(crate) fn remove_section(&mut self, kind: SectionKind) {
        self.data_sources.retain(|s| s.kind() != kind);
    }

    /// Insert or replace the favorites section; it always comes first.
    pub(crate) fn upsert_favorites(&mut self, items: Vec<Movie>) {
        self.remove_section(SectionKind::Favorites);
        self.data_sources.insert(
            0,
            DataSource::Favorites {
                title: FAVORITES_TITLE.to_string(),
                items,
            },
        );
    }

    /// Insert or replace the list section, right after favorites when present.
    pub(crate) fn upsert_list(&mut self, items: Vec<ListItem>) {
        let section = DataSource::Lists {
            title: self.list_title(),
            column: self.column,
            items,
        };
        if let Some(index) = self
            .data_sources
            .iter()
            .position(|s| s.kind() == SectionKind::Lists)
        {
            self.data_sources[index] = section;
            return;
        }
        let index = self
            .data_sources
            .iter()
            .position(|s| s.kind() == SectionKind::Favorites)
            .map_or(0, |i| i + 1);
        self.data_sources.insert(index, section);
    }

    pub(crate) fn show_error(&mut self, kind: HomeErrorKind) {
        self.data_sources = vec![DataSource::Error(kind)];
    }

    pub(crate) fn set_list_column(&mut self, new_column: Column) {
        self.column = new_column;
        for section in &mut self.data_sources {
            if let DataSource::Lists { column, .. } = section {
                *column = new_column;
            }
        }
    }

    /// Update the `favorited` flag of the list item with `id`, if shown.
    pub(crate) fn set_list_favorited(&mut self, id: &str, favorited: bool) {
        for section in &mut self.data_sources {
            if let DataSource::Lists { items, .. } = section {
                for item in items.iter_mut() {
                    if let ListItem::Content(movie) = item {
                        if movie.id == id {
                            movie.favorited = favorited;
                        }
                    }
                }
            }
        }
    }

    pub(crate) fn find_movie(&self, kind: SectionKind, id: &str) -> Option<&Movie> {
        match kind {
            SectionKind::Favorites => self.favorites()?.iter().find(|m| m.id == id),
            SectionKind::Lists => self
                .list_items()?
                .iter()
                .filter_map(ListItem::movie)
                .find(|m| m.id == id),
            SectionKind::Error => None,
        }
    }
}
