//! Command handlers for the catalog client CLI
//!
//! Each handler builds a [`CatalogService`] from the effective configuration,
//! loads the catalog where needed, and prints human-readable or JSON output.

use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info};

use crate::app::{
    CatalogService, ContentIndex, ContentItem, ContentListItem, ContentTranslation,
    ContentWithTranslations, FetchMode, LoadOutcome,
};
use crate::config::AppConfig;
use crate::errors::{AppError, CatalogError, Result};

use super::args::{Commands, ConfigAction, GlobalArgs, ShowArgs};

/// Catalog views that only need a loaded index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListQuery {
    All,
    Search(String),
    Category(String),
    Featured,
    Popular,
    Recent,
}

impl ListQuery {
    /// Runs the query against the service's cached catalog
    pub fn run(&self, service: &CatalogService) -> Vec<ContentListItem> {
        match self {
            ListQuery::All => service.search(""),
            ListQuery::Search(query) => service.search(query),
            ListQuery::Category(name) => service.by_category(name),
            ListQuery::Featured => service.featured(),
            ListQuery::Popular => service.popular(),
            ListQuery::Recent => service.recent(),
        }
    }

    fn title(&self) -> String {
        match self {
            ListQuery::All => "All content".to_string(),
            ListQuery::Search(query) if query.is_empty() => "Search: (everything)".to_string(),
            ListQuery::Search(query) => format!("Search: \"{}\"", query),
            ListQuery::Category(name) => format!("Category: {}", name),
            ListQuery::Featured => "Featured".to_string(),
            ListQuery::Popular => "Popular".to_string(),
            ListQuery::Recent => "Recent".to_string(),
        }
    }
}

/// Loads configuration and applies command-line overrides
pub async fn load_config(global: &GlobalArgs) -> Result<AppConfig> {
    let mut config = AppConfig::load(global.config.clone()).await?;
    if let Some(base_url) = &global.base_url {
        config.catalog.base_url = base_url.clone();
        config.validate()?;
    }
    Ok(config)
}

/// Dispatches a parsed command
pub async fn handle_command(
    command: Commands,
    global: &GlobalArgs,
    config: AppConfig,
) -> Result<()> {
    match command {
        Commands::Index => handle_index(global, &config).await,
        Commands::List => handle_list(ListQuery::All, global, &config).await,
        Commands::Search { query } => handle_list(ListQuery::Search(query), global, &config).await,
        Commands::Category { name } => {
            handle_list(ListQuery::Category(name), global, &config).await
        }
        Commands::Featured => handle_list(ListQuery::Featured, global, &config).await,
        Commands::Popular => handle_list(ListQuery::Popular, global, &config).await,
        Commands::Recent => handle_list(ListQuery::Recent, global, &config).await,
        Commands::Show(args) => handle_show(args, global, &config).await,
        Commands::Translation { id, language } => {
            handle_translation(&id, &language, global, &config).await
        }
        Commands::Config(args) => handle_config(args.action, &config).await,
    }
}

/// Handle the index summary command
pub async fn handle_index(global: &GlobalArgs, config: &AppConfig) -> Result<()> {
    let service = CatalogService::new(&config.to_service_config())?;
    let index = load_catalog(&service, global.quiet).await?;

    if global.json {
        return print_json(index.as_ref());
    }

    println!("📚 Catalog v{}", index.version);
    println!("===============");
    println!("Last updated: {}", index.last_updated);
    println!(
        "Items:        {} listed ({} reported)",
        index.content_list.len(),
        index.total_content
    );
    println!("Languages:    {}", join_or_none(&index.languages));
    println!("Authors:      {}", index.authors.len());
    println!();
    println!("Categories:");
    for (name, count) in service.cache().categories() {
        println!("  {:<24} {}", name, count);
    }
    println!();
    println!(
        "Featured: {}  Popular: {}  Recent: {}",
        service.featured().len(),
        service.popular().len(),
        service.recent().len()
    );
    Ok(())
}

/// Handle every list-style query command
pub async fn handle_list(query: ListQuery, global: &GlobalArgs, config: &AppConfig) -> Result<()> {
    let service = CatalogService::new(&config.to_service_config())?;
    let items = match query {
        ListQuery::All => {
            let items = service.load_all_content().await;
            if service.current().is_none() {
                return Err(load_failure(&service));
            }
            items
        }
        _ => {
            load_catalog(&service, global.quiet).await?;
            query.run(&service)
        }
    };
    debug!("{:?} matched {} items", query, items.len());

    if global.json {
        return print_json(&items);
    }

    println!("{} ({} items)", query.title(), items.len());
    println!();
    print_items(&items);
    Ok(())
}

/// Handle the show command
pub async fn handle_show(args: ShowArgs, global: &GlobalArgs, config: &AppConfig) -> Result<()> {
    let mut service_config = config.to_service_config();
    if args.concurrent {
        service_config.translation_mode = FetchMode::Concurrent {
            limit: config.catalog.max_concurrent_translations,
        };
    }
    let service = CatalogService::new(&service_config)?;
    load_catalog(&service, global.quiet).await?;

    if !args.translations {
        let content = service.fetch_content(&args.id).await?;
        if global.json {
            return print_json(&content);
        }
        print_content(&content);
        return Ok(());
    }

    let spinner = spinner(global.quiet, format!("Fetching '{}' with translations...", args.id));
    let result = service.fetch_content_with_translations(&args.id).await;
    spinner.finish_and_clear();
    let bundle = result?;

    if global.json {
        return print_json(&bundle);
    }
    print_content(&bundle.content);
    print_translations(&bundle, global.verbose || global.very_verbose);
    Ok(())
}

/// Handle the translation command
pub async fn handle_translation(
    id: &str,
    language: &str,
    global: &GlobalArgs,
    config: &AppConfig,
) -> Result<()> {
    let service = CatalogService::new(&config.to_service_config())?;
    let translation = service.fetch_translation(id, language).await?;

    if global.json {
        return print_json(&translation);
    }
    print_translation(&translation);
    Ok(())
}

/// Handle configuration management
pub async fn handle_config(action: ConfigAction, config: &AppConfig) -> Result<()> {
    match action {
        ConfigAction::Show => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
        ConfigAction::Init { path } => {
            let path = match path {
                Some(path) => path,
                None => AppConfig::default_config_path()?,
            };
            if AppConfig::write_default(&path).await? {
                println!("📁 Created default configuration file:");
            } else {
                println!("Configuration file already exists:");
            }
            println!("   {}", path.display());
            Ok(())
        }
    }
}

async fn load_catalog(service: &CatalogService, quiet: bool) -> Result<Arc<ContentIndex>> {
    let spinner = spinner(quiet, "Loading content index...".to_string());
    let outcome = service.load().await;
    spinner.finish_and_clear();

    match outcome {
        LoadOutcome::Loaded(index) => {
            info!("Catalog ready with {} items", index.content_list.len());
            Ok(index)
        }
        LoadOutcome::Failed(error) => Err(AppError::Load(error)),
    }
}

fn load_failure(service: &CatalogService) -> AppError {
    match service.snapshot().last_error {
        Some(error) => AppError::Load(error),
        None => AppError::Load(Arc::new(CatalogError::NoCatalogLoaded)),
    }
}

fn spinner(quiet: bool, message: String) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style.tick_strings(&["◐", "◓", "◑", "◒"]));
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(120));
    spinner
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_items(items: &[ContentListItem]) {
    if items.is_empty() {
        println!("No matching content.");
        return;
    }
    for item in items {
        let marker = if item.is_featured { "★" } else { " " };
        println!(
            "{} {:<24} {:<36} {:<14} {:<20} {:>4.1}",
            marker, item.id, item.title, item.category, item.author, item.rating
        );
    }
}

fn print_content(content: &ContentItem) {
    println!("{}", content.title);
    println!("{}", "=".repeat(content.title.chars().count().max(3)));
    println!("Author:     {}", content.author);
    println!("Category:   {} ({})", content.category, content.difficulty);
    println!("Duration:   {} min, {} pages", content.duration, content.pages);
    println!("Language:   {}", content.language);
    println!("Version:    {} (updated {})", content.version, content.updated_at);
    if !content.tags.is_empty() {
        println!("Tags:       {}", content.tags.join(", "));
    }
    println!();
    println!("{}", content.description);

    let metadata = &content.metadata;
    println!();
    println!("Source:          {}", metadata.original_source);
    println!("Transliteration: {}", metadata.transliteration);
    println!("Meaning:         {}", metadata.meaning);
    println!("Benefits:        {}", join_or_none(&metadata.benefits));
    println!("When to use:     {}", join_or_none(&metadata.when_to_use));
    println!("Prerequisites:   {}", join_or_none(&metadata.prerequisites));
    println!();
    println!("{}", content.content);
}

fn print_translations(bundle: &ContentWithTranslations, verbose: bool) {
    println!();
    if bundle.translations.is_empty() {
        println!("🌐 No translations available");
    } else {
        println!("🌐 Translations ({})", bundle.translations.len());
        for (language, translation) in &bundle.translations {
            println!(
                "  {:<6} {} - {} ({})",
                language, translation.title, translation.translator, translation.translation_quality
            );
        }
    }

    if verbose {
        for failure in &bundle.failures {
            println!("  {:<6} unavailable: {}", failure.language, failure.reason);
        }
    }
}

fn print_translation(translation: &ContentTranslation) {
    println!("{} [{}]", translation.title, translation.language);
    println!(
        "Translated by {} ({}), updated {}",
        translation.translator, translation.translation_quality, translation.updated_at
    );
    println!();
    println!("{}", translation.content);
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "none".to_string()
    } else {
        values.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{ContentIndex, MemoryTransport, UrlLayout};

    fn service_with(index: &str) -> CatalogService {
        let transport = Arc::new(MemoryTransport::new());
        let urls = UrlLayout::new("https://catalog.test").unwrap();
        transport.insert(urls.index_url().unwrap(), index.to_string());
        CatalogService::with_transport(transport, urls, FetchMode::Sequential)
    }

    const INDEX: &str = r#"{
        "version": "1", "last_updated": "2024-01-01", "total_content": 2,
        "categories": {}, "featured": [], "recent": ["b"], "popular": ["b"],
        "languages": [], "authors": [],
        "content_list": [
            {"id": "a", "title": "Alpha", "category": "yoga", "author": "X", "pages": 1,
             "difficulty": "easy", "duration": 5, "is_featured": true, "download_count": 0,
             "rating": 4.0, "languages_available": [], "file_path": "a.json"},
            {"id": "b", "title": "Beta", "category": "meditation", "author": "Y", "pages": 1,
             "difficulty": "easy", "duration": 5, "is_featured": false, "download_count": 0,
             "rating": 3.0, "languages_available": [], "file_path": "b.json"}
        ]
    }"#;

    fn ids(items: Vec<ContentListItem>) -> Vec<String> {
        items.into_iter().map(|i| i.id).collect()
    }

    #[tokio::test]
    async fn test_list_queries_dispatch() {
        let service = service_with(INDEX);
        assert!(service.load().await.is_loaded());

        assert_eq!(ids(ListQuery::All.run(&service)), vec!["a", "b"]);
        assert_eq!(ids(ListQuery::Search("yoga".into()).run(&service)), vec!["a"]);
        assert_eq!(
            ids(ListQuery::Category("meditation".into()).run(&service)),
            vec!["b"]
        );
        assert_eq!(ids(ListQuery::Featured.run(&service)), vec!["a"]);
        assert_eq!(ids(ListQuery::Popular.run(&service)), vec!["b"]);
        assert_eq!(ids(ListQuery::Recent.run(&service)), vec!["b"]);
    }

    #[tokio::test]
    async fn test_load_failure_message() {
        let service = service_with("not json");
        let result = load_catalog(&service, true).await;

        let error = result.unwrap_err();
        assert_eq!(error.category(), "decode");
        assert!(!error.is_recoverable());
        let message = error.to_string();
        assert!(message.contains("Failed to load content index"));
        assert!(message.contains("Failed to decode data"));
    }

    #[test]
    fn test_query_titles() {
        assert_eq!(ListQuery::Search(String::new()).title(), "Search: (everything)");
        assert_eq!(ListQuery::Category("yoga".into()).title(), "Category: yoga");
    }

    #[test]
    fn test_index_serializes_for_json_output() {
        let index: ContentIndex = serde_json::from_str(INDEX).unwrap();
        assert!(print_json(&index).is_ok());
    }
}
