use anyhow::{Context, Result};
use futures::future::join_all;
use gtranslate::{ClientOptions, Tongue, Translator};
use std::time::Instant;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gtranslate=info".parse()?),
        )
        .init();

    let options = ClientOptions::from_env();
    info!("Translating via {}", options.endpoint());

    let translator = Translator::new(options).context("Failed to build translator")?;

    let jobs = [
        ("Hello World", Tongue::ENGLISH, Tongue::CHINESE),
        ("اطلع على الكلمات كاملةً", Tongue::ARABIC, Tongue::CHINESE),
        ("床前明月光，疑是地上霜", Tongue::CHINESE, Tongue::ENGLISH),
        (
            "危楼高百尺，手可摘星辰\n不敢高声语，恐惊天上人",
            Tongue::CHINESE,
            Tongue::ARABIC,
        ),
    ];

    // One shared translator, all requests in flight at once
    let outcomes = join_all(jobs.iter().map(|(text, from, to)| {
        let translator = &translator;
        async move {
            let start = Instant::now();
            let result = translator.run(text, from, to).await;
            (*text, result, start.elapsed().as_millis())
        }
    }))
    .await;

    let mut failures = 0;
    for (text, outcome, elapsed_ms) in outcomes {
        match outcome {
            Ok(result) => info!(
                "Original: {} | Translated: {} | Tongue: {} | {} ms",
                text, result.response_text, result.response_tongue, elapsed_ms
            ),
            Err(e) => {
                failures += 1;
                error!("Original: {} | failed after {} ms: {}", text, elapsed_ms, e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} translations failed", failures, jobs.len());
    }

    info!("All translations completed");
    Ok(())
}
