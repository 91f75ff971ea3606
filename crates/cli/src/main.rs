use anyhow::{Context, Result, anyhow};
use catalog::{CatalogIndex, DEFAULT_HISTORY_CAPACITY, Quality, Scene, SceneId, scene_fav_history_badges, scene_info_badges};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use filter::{ActressCount, ActressFilterSpec, ActressSortBy, FilterEngine, FilterSpec, SortOrder, filter_actresses};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use suggest::{RankingWeights, SuggestionRanker, popular_tags, trending};
use tracing::info;

/// Intyma - browse, filter and get suggestions from a scene catalog snapshot
#[derive(Parser)]
#[command(name = "intyma")]
#[command(about = "Scene catalog filtering and suggestions", long_about = None)]
struct Cli {
    /// Directory holding scenes.json, actrices.json and optionally history.json
    #[arg(short, long, default_value = "data")]
    catalog_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter scenes
    Scenes {
        /// JSON file with a full filter spec (flags are ignored when set)
        #[arg(long)]
        spec: Option<PathBuf>,

        #[command(flatten)]
        flags: SceneFilterArgs,

        /// Maximum number of scenes to print
        #[arg(long, default_value = "50")]
        limit: usize,
    },

    /// Filter and sort actresses
    Actresses {
        /// Substring of the name or a tag
        #[arg(long)]
        query: Option<String>,

        #[arg(long)]
        country: Option<String>,

        /// Required tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        #[arg(long)]
        min_scenes: Option<u32>,

        /// Only actresses credited on a favorite scene
        #[arg(long)]
        favorites: bool,

        #[arg(long, value_enum, default_value = "name")]
        sort_by: SortKey,

        /// Sort descending
        #[arg(long)]
        desc: bool,
    },

    /// "Surprise me": scenes close to your favorites you have not seen yet
    Suggest {
        /// Number of suggestions
        #[arg(long, default_value = "5")]
        count: usize,

        /// Seed for tie-breaking; same seed, same suggestions
        #[arg(long)]
        seed: Option<u64>,

        /// Draw a random seed (printed so the run can be repeated)
        #[arg(long, conflicts_with = "seed")]
        surprise: bool,

        /// JSON file with ranking weights
        #[arg(long)]
        weights: Option<PathBuf>,

        /// Show the score breakdown for each suggestion
        #[arg(long)]
        explain: bool,
    },

    /// Highest trending scores
    Trending {
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Reference date (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Most used tags
    Tags {
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Badges shown on a scene card
    Badges {
        /// Scene ID to inspect
        #[arg(long)]
        scene_id: SceneId,

        /// Reference date (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

#[derive(Args)]
struct SceneFilterArgs {
    /// Substring of the title or personal note
    #[arg(long)]
    query: Option<String>,

    /// Required tag (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,

    #[arg(long)]
    min_rating: Option<f32>,

    #[arg(long)]
    max_duration: Option<i64>,

    /// Accepted quality (repeatable): SD, HD, "Full HD", 4K
    #[arg(long = "quality")]
    qualities: Vec<Quality>,

    #[arg(long)]
    favorites: bool,

    /// Only scenes viewed at least once
    #[arg(long)]
    viewed: bool,

    /// Exact number of credited actresses
    #[arg(long, conflicts_with = "min_cast")]
    cast: Option<usize>,

    /// Minimum number of credited actresses
    #[arg(long)]
    min_cast: Option<usize>,

    /// Featured actress ID (repeatable, any of)
    #[arg(long = "actress")]
    actresses: Vec<u32>,

    #[arg(long)]
    after: Option<NaiveDate>,

    #[arg(long)]
    before: Option<NaiveDate>,
}

impl SceneFilterArgs {
    fn to_spec(&self) -> FilterSpec {
        let mut spec = FilterSpec::new().with_release_window(self.after, self.before);
        if let Some(query) = &self.query {
            spec = spec.with_text_query(query.as_str());
        }
        if !self.tags.is_empty() {
            spec = spec.with_tags(self.tags.iter().cloned());
        }
        if let Some(min_rating) = self.min_rating {
            spec = spec.with_min_rating(min_rating);
        }
        if let Some(max_duration) = self.max_duration {
            spec = spec.with_max_duration_minutes(max_duration);
        }
        if !self.qualities.is_empty() {
            spec = spec.with_quality(self.qualities.iter().copied());
        }
        if self.favorites {
            spec = spec.with_favorites_only(true);
        }
        if self.viewed {
            spec = spec.with_viewed_only(true);
        }
        if let Some(n) = self.cast {
            spec = spec.with_actress_count(ActressCount::Exactly(n));
        } else if let Some(n) = self.min_cast {
            spec = spec.with_actress_count(ActressCount::AtLeast(n));
        }
        if !self.actresses.is_empty() {
            spec = spec.with_actress_ids(self.actresses.iter().copied());
        }
        spec
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SortKey {
    Name,
    Scenes,
    Birth,
}

impl From<SortKey> for ActressSortBy {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Name => ActressSortBy::Name,
            SortKey::Scenes => ActressSortBy::SceneCount,
            SortKey::Birth => ActressSortBy::BirthDate,
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let start = Instant::now();
    let index = CatalogIndex::load_from_dir(&cli.catalog_dir)
        .with_context(|| format!("Failed to load catalog from {}", cli.catalog_dir.display()))?;
    let (scenes, actresses, views) = index.counts();
    info!(
        "Loaded {} scenes, {} actresses, {} views in {:?}",
        scenes,
        actresses,
        views,
        start.elapsed()
    );

    match cli.command {
        Commands::Scenes { spec, flags, limit } => handle_scenes(&index, spec.as_deref(), &flags, limit)?,
        Commands::Actresses {
            query,
            country,
            tags,
            min_scenes,
            favorites,
            sort_by,
            desc,
        } => {
            let spec = ActressFilterSpec {
                text_query: query,
                country,
                tags: (!tags.is_empty()).then(|| tags.into_iter().collect()),
                min_scene_count: min_scenes,
                favorites_only: favorites.then_some(true),
                sort_by: sort_by.into(),
                sort_order: if desc { SortOrder::Desc } else { SortOrder::Asc },
            };
            handle_actresses(&index, &spec)?
        }
        Commands::Suggest {
            count,
            seed,
            surprise,
            weights,
            explain,
        } => {
            let seed = if surprise { Some(rand::random::<u64>()) } else { seed };
            handle_suggest(&index, count, seed, weights.as_deref(), explain)?
        }
        Commands::Trending { limit, today } => handle_trending(&index, limit, today.unwrap_or_else(today_local))?,
        Commands::Tags { limit } => handle_tags(&index, limit),
        Commands::Badges { scene_id, today } => handle_badges(&index, scene_id, today.unwrap_or_else(today_local))?,
    }

    Ok(())
}

fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Read and decode a JSON config file
fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Handle the 'scenes' command
fn handle_scenes(index: &CatalogIndex, spec_file: Option<&Path>, flags: &SceneFilterArgs, limit: usize) -> Result<()> {
    let spec = match spec_file {
        Some(path) => read_json::<FilterSpec>(path)?,
        None => flags.to_spec(),
    };

    let results = FilterEngine::new()
        .filter(index.scenes(), &spec)
        .context("Invalid filter")?;

    println!("{}", format!("{} matching scenes", results.len()).bold().blue());
    for scene in results.iter().take(limit) {
        print_scene_line(scene);
    }
    if results.len() > limit {
        println!("  … {} more", results.len() - limit);
    }
    Ok(())
}

/// Handle the 'actresses' command
fn handle_actresses(index: &CatalogIndex, spec: &ActressFilterSpec) -> Result<()> {
    let results = filter_actresses(index.actresses(), index.scenes(), spec).context("Invalid filter")?;

    println!("{}", format!("{} actresses", results.len()).bold().blue());
    for actress in &results {
        let scenes = index.scenes_for_actress(actress.id).len();
        let country = actress.country.as_deref().unwrap_or("?");
        let birth = actress
            .birth_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!(
            "{}: {} ({}, born {}) - {} scenes",
            actress.id.to_string().green(),
            actress.name.bold(),
            country,
            birth,
            scenes
        );
    }
    Ok(())
}

/// Handle the 'suggest' command
fn handle_suggest(
    index: &CatalogIndex,
    count: usize,
    seed: Option<u64>,
    weights_file: Option<&Path>,
    explain: bool,
) -> Result<()> {
    let weights = match weights_file {
        Some(path) => read_json::<RankingWeights>(path)?,
        None => RankingWeights::default(),
    };
    let ranker = SuggestionRanker::new().with_weights(weights);
    let favorites = index.favorites();
    let history = index
        .recent_history(DEFAULT_HISTORY_CAPACITY)
        .context("Invalid history capacity")?;

    let picks = ranker
        .suggest_explained(index.scenes(), &favorites, history.entries(), count, seed)
        .context("Invalid suggestion request")?;

    print!("{}", "Suggestions:\n".bold().blue());
    if let Some(seed) = seed {
        println!("{}", format!("(seed {})", seed).dimmed());
    }
    if picks.is_empty() {
        println!("Nothing left to suggest: every scene is a favorite or was viewed recently.");
    }
    for (rank, (scene, scored)) in picks.iter().enumerate() {
        println!(
            "{}. {} [{}] - Score: {:.3}",
            (rank + 1).to_string().green(),
            scene.title.bold(),
            join_tags(scene),
            scored.score
        );
        if explain {
            println!("   Explanation: {}", scored.explanation());
        }
    }
    Ok(())
}

/// Handle the 'trending' command
fn handle_trending(index: &CatalogIndex, limit: usize, today: NaiveDate) -> Result<()> {
    let top = trending(index.scenes(), today, limit).context("Invalid trending request")?;

    println!("{}", format!("Trending as of {}:", today).bold().blue());
    for (rank, scene) in top.iter().enumerate() {
        println!(
            "{}. {} - {} views, rated {:.1}",
            (rank + 1).to_string().green(),
            scene.title.bold(),
            scene.view_count,
            scene.rating
        );
    }
    Ok(())
}

/// Handle the 'tags' command
fn handle_tags(index: &CatalogIndex, limit: usize) {
    println!("{}", "Popular tags:".bold().blue());
    for tag in popular_tags(index.scenes()).iter().take(limit) {
        println!("{}{} ({} scenes)", "• ".cyan(), tag.tag, tag.count);
    }
}

/// Handle the 'badges' command
fn handle_badges(index: &CatalogIndex, scene_id: SceneId, today: NaiveDate) -> Result<()> {
    let scene = index
        .get_scene(scene_id)
        .ok_or_else(|| anyhow!("Scene {} not found", scene_id))?;

    print_scene_line(scene);
    for badge in scene_fav_history_badges(scene) {
        println!("  {}{}", "• ".yellow(), badge.label);
    }
    for badge in scene_info_badges(scene, today) {
        println!("  {}{}", "• ".cyan(), badge.label);
    }
    Ok(())
}

fn print_scene_line(scene: &Scene) {
    let favorite = if scene.is_favorite { " ♥".red().to_string() } else { String::new() };
    println!(
        "{}: {}{} ({}, {} min, {}) rated {:.1} [{}]",
        scene.id.to_string().green(),
        scene.title,
        favorite,
        scene.release_date,
        scene.duration_minutes,
        scene.quality.label(),
        scene.rating,
        join_tags(scene)
    );
}

fn join_tags(scene: &Scene) -> String {
    scene.tags.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
