use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

use movie_itunes::config::{self, Config};
use movie_itunes::db;
use movie_itunes::detail::{DetailButton, DetailSection, DetailViewModel};
use movie_itunes::home::{
    Column, DataSource, HomeAction, HomeState, HomeViewModel, ListItem, SectionTap, Tap,
};
use movie_itunes::images::HttpImageLoader;
use movie_itunes::net::{Networking, TcpReachability};
use movie_itunes::repository::{ItunesMovieRepository, MovieRepository};
use movie_itunes::route::Route;
use movie_itunes::usecase::{DetailUseCase, HomeUseCase};

#[derive(Debug, Parser)]
#[command(author, version, about = "Browse and favorite movies from the iTunes store")]
struct Args {
    /// Path to YAML config file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Render the list with three columns instead of the configured count
    #[arg(long)]
    wide: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show favorites and the default genre
    Browse,
    /// Search movies by keyword
    Search { keyword: String },
    /// Search, then toggle the favorite state of one result
    Toggle { keyword: String, id: String },
    /// Search, then open the detail screen of one result
    Detail {
        keyword: String,
        id: String,
        /// Press the favorite button on the detail screen
        #[arg(long)]
        favorite: bool,
    },
    /// Print saved favorites
    Favorites,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let cfg = config::load(Some(&args.config))?;
    cfg.ensure_dirs()?;

    let pool = db::init_pool(&cfg.database_url()).await?;
    db::run_migrations(&pool).await?;

    let reachability = Arc::new(TcpReachability::new(
        cfg.itunes.reachability_probe.clone(),
        cfg.itunes.probe_timeout(),
    ));
    let network = Networking::new(reachability)?;
    let repository: Arc<dyn MovieRepository> = Arc::new(ItunesMovieRepository::new(
        network,
        pool,
        Arc::new(HttpImageLoader::default()),
        cfg.itunes.base_url.clone(),
    ));

    if let Command::Favorites = args.command {
        let favorites = repository.get_favorites().await?;
        if favorites.is_empty() {
            println!("No favorites yet.");
        }
        for movie in favorites {
            println!("{:>12}  {} ({})", movie.id, movie.title, movie.year);
        }
        return Ok(());
    }

    let use_case = Arc::new(HomeUseCase::new(repository.clone()));
    let (home, mut routes) = HomeViewModel::spawn(use_case, initial_state(&cfg, args.wide));

    home.send(HomeAction::DidLoad);
    match &args.command {
        Command::Search { keyword }
        | Command::Toggle { keyword, .. }
        | Command::Detail { keyword, .. } => {
            home.send(HomeAction::SearchDidChange(keyword.clone()));
        }
        Command::Browse | Command::Favorites => {}
    }
    home.wait_idle().await;

    match args.command {
        Command::Toggle { id, .. } => {
            ensure_listed(&home.state(), &id)?;
            home.send(HomeAction::MovieTapped(SectionTap::list(Tap::Double, id)));
            home.wait_idle().await;
        }
        Command::Detail { id, favorite, .. } => {
            ensure_listed(&home.state(), &id)?;
            home.send(HomeAction::MovieTapped(SectionTap::list(Tap::Single, id)));
            home.wait_idle().await;
            present(&mut routes, &home, &repository, favorite).await;
            home.wait_idle().await;
        }
        _ => {}
    }

    present(&mut routes, &home, &repository, false).await;
    render(&home.state());
    Ok(())
}

fn initial_state(cfg: &Config, wide: bool) -> HomeState {
    let column = if wide {
        Column::Three
    } else {
        Column::from_count(cfg.home.column)
    };
    HomeState::new(cfg.home.default_genre.clone(), cfg.home.limit, column)
}

fn ensure_listed(state: &HomeState, id: &str) -> Result<()> {
    let listed = state
        .list_items()
        .unwrap_or_default()
        .iter()
        .filter_map(ListItem::movie)
        .any(|m| m.id == id);
    if listed {
        Ok(())
    } else {
        Err(anyhow!("movie {} is not in the search results", id))
    }
}

/// Interpret queued navigation intents: toasts are printed, detail routes open
/// a detail view model wired back to the home screen.
async fn present(
    routes: &mut mpsc::UnboundedReceiver<Route>,
    home: &HomeViewModel,
    repository: &Arc<dyn MovieRepository>,
    press_favorite: bool,
) {
    while let Ok(route) = routes.try_recv() {
        match route {
            Route::Toast(toast) => println!("[{}] {}: {}", toast.image, toast.title, toast.description),
            Route::Detail { movie } => {
                info!(id = %movie.id, "opening detail");
                let mut detail = DetailViewModel::new(
                    DetailUseCase::new(repository.clone()),
                    movie,
                    Some(home.favorite_completion()),
                );
                let state = detail.load().await;
                for section in &state.data_sources {
                    match section {
                        DetailSection::Header(movie) => {
                            let mark = if movie.favorited { "♥" } else { "♡" };
                            println!("{} {} ({}) {}", mark, movie.title, movie.year, movie.genre);
                            println!("   price: {}", movie.price);
                            println!("   poster: {}", state.poster.large);
                            println!("   {}", movie.description);
                        }
                        DetailSection::Trailer(movie) => println!("   trailer: {}", movie.trailer),
                    }
                }
                if press_favorite {
                    detail.button_did_tap(DetailButton::Favorite).await;
                }
            }
        }
    }
}

fn render(state: &HomeState) {
    for section in &state.data_sources {
        match section {
            DataSource::Favorites { title, items } => {
                println!("== {} ({})", title, items.len());
                for movie in items {
                    println!("  ♥ {:>12}  {} ({})", movie.id, movie.title, movie.year);
                }
            }
            DataSource::Lists { title, column, items } => {
                println!("== {} [{} columns]", title, column.count());
                for row in items.chunks(usize::from(column.count())) {
                    let cells: Vec<String> = row
                        .iter()
                        .map(|item| match item {
                            ListItem::Content(movie) => {
                                let mark = if movie.favorited { "♥" } else { " " };
                                format!("{} {:>10} {:<28}", mark, movie.id, truncate(&movie.title, 28))
                            }
                            ListItem::Shimmer(_) => format!("{:<41}", "…"),
                        })
                        .collect();
                    println!("  {}", cells.join(" | "));
                }
            }
            DataSource::Error(kind) => {
                println!("!! {}", kind.title());
                println!("   {}", kind.description());
                if let Some(button) = kind.button_title() {
                    println!("   [{}]", button);
                }
            }
        }
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
