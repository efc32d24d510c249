use anyhow::Result;
use curator::{
    admin,
    completion::OpenAiCompletionService,
    config::Config,
    enrich::{EnrichmentPipeline, Vocabulary},
    loader::HttpContentLoader,
    store::{ArticleStore, PgArticleStore},
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;

    let urls: Vec<String> = std::env::args().skip(1).collect();
    if urls.is_empty() {
        anyhow::bail!("usage: curator <url>...");
    }

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(config.database_url())
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let store: Arc<dyn ArticleStore> = Arc::new(PgArticleStore::new(pool));
    let loader = Arc::new(HttpContentLoader::new());
    let completion = Arc::new(OpenAiCompletionService::new(
        config.openai_api_key().map(String::from),
        config.openai_base_url(),
        config.openai_model(),
    ));

    let pipeline = EnrichmentPipeline::new(
        store.clone(),
        loader,
        completion,
        Vocabulary::default(),
        config.target_language(),
    );

    let mut ids = Vec::with_capacity(urls.len());
    for url in &urls {
        let article = match store.article_by_url(url).await? {
            Some(article) => article,
            None => store.create_article(url, None).await?,
        };
        ids.push(article.id);
    }

    let outcome = admin::process_articles(&pipeline, store.as_ref(), &ids).await;

    println!("{}", outcome.summary_message());
    if let Some(errors) = outcome.error_message() {
        eprintln!("{errors}");
    }

    if outcome.success_count == 0 && !outcome.errors.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}
