use clap::{Parser, Subcommand};
use insights_backend::config::Config;
use insights_backend::models::content_operations;
use insights_backend::models::content_store::ContentStore;
use insights_backend::setup::content_setup;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "content_cli", author, version, about = "Maintenance CLI for the insights content store.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the .env configuration file.
    #[arg(long, required = true, value_name = "FILE")]
    env_file: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Content {
        #[command(subcommand)]
        action: ContentAction,
    },
    Tags {
        #[command(subcommand)]
        action: TagsAction,
    },
}

#[derive(Subcommand, Debug)]
enum ContentAction {
    /// Create the content directory and an empty tag taxonomy.
    Init,
    /// Normalize every content file and report problems.
    Check,
    /// Scaffold a new article dated today.
    New {
        #[arg(long)]
        slug: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        category: Option<String>,
        /// Comma-separated tags.
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
enum TagsAction {
    Show,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env(&cli.env_file) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            return ExitCode::FAILURE;
        }
    };
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(&config.log_level));
    let store = ContentStore::from_config(&config);

    match &cli.command {
        Commands::Content { action } => match action {
            ContentAction::Init => init_content(&store),
            ContentAction::Check => check_content(&store),
            ContentAction::New { slug, title, category, tags } => {
                new_article(&store, slug, title, category.as_deref(), tags)
            }
        },
        Commands::Tags { action } => match action {
            TagsAction::Show => show_tags(&store),
        },
    }
}

fn init_content(store: &ContentStore) -> ExitCode {
    match content_setup::setup_content_store(store) {
        Ok(created) if created.is_empty() => {
            println!("ℹ️ Content store already set up at '{}'. Nothing to do.", store.root().display());
            ExitCode::SUCCESS
        }
        Ok(created) => {
            for path in created {
                println!("- Created '{}'", path.display());
            }
            println!("✅ Content store setup completed successfully.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Error setting up content store: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn check_content(store: &ContentStore) -> ExitCode {
    let reports = match content_setup::check_content(store) {
        Ok(reports) => reports,
        Err(e) => {
            eprintln!("❌ Error reading content directory '{}': {}", store.root().display(), e);
            return ExitCode::FAILURE;
        }
    };

    let mut failures = 0;
    for report in &reports {
        match &report.result {
            Ok(summary) => println!("✅ {}: {}", report.slug, summary),
            Err(e) => {
                failures += 1;
                println!("❌ {}: {}", report.slug, e);
            }
        }
    }
    println!("Checked {} file(s), {} failed.", reports.len(), failures);

    if failures == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn new_article(store: &ContentStore, slug: &str, title: &str, category: Option<&str>, tags: &[String]) -> ExitCode {
    let tags: Vec<String> = tags.iter().map(|t| t.trim().to_string()).filter(|t| !t.is_empty()).collect();
    let today = chrono::Local::now().date_naive();
    match content_setup::scaffold_article(store, slug, title, category, &tags, today) {
        Ok(path) => {
            println!("✅ Created '{}'.", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Error creating article: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn show_tags(store: &ContentStore) -> ExitCode {
    match content_operations::read_tag_taxonomy(store) {
        Ok(taxonomy) => {
            println!("theme: {}", taxonomy.theme.join(", "));
            println!("type:  {}", taxonomy.r#type.join(", "));
            println!("time:  {}", taxonomy.time.join(", "));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Error reading tags from '{}': {}", store.tags_file().display(), e);
            ExitCode::FAILURE
        }
    }
}
