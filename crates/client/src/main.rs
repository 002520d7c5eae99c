use anyhow::Context;
use tracing_subscriber::EnvFilter;

use vitalrec_client::api::ApiClient;
use vitalrec_client::view::{LoadOutcome, RecommendationView, ViewParams, ViewState};
use vitalrec_core::types::DbId;

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn optional_id(name: &str) -> anyhow::Result<Option<DbId>> {
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => Ok(Some(
            raw.trim()
                .parse()
                .with_context(|| format!("{name} must be an integer"))?,
        )),
        _ => Ok(None),
    }
}

fn params_from_env() -> anyhow::Result<ViewParams> {
    let defaults = ViewParams::default();
    Ok(ViewParams {
        question_id: optional_id("QUESTION_ID")?,
        age: match std::env::var("AGE") {
            Ok(raw) => raw.trim().parse().context("AGE must be a positive integer")?,
            Err(_) => defaults.age,
        },
        description: env_or("DESCRIPTION", &defaults.description),
        brand: env_or("BRAND", ""),
        market_status: env_or("MARKET_STATUS", "false").eq_ignore_ascii_case("true"),
        allergies: env_or("ALLERGIES", ""),
    })
}

fn render(state: &ViewState) {
    println!("{}", state.headline());
    if let Some(subtext) = state.subtext() {
        println!("{subtext}");
    }
    if let ViewState::Results(entries) = state {
        for (i, entry) in entries.iter().enumerate() {
            println!(
                "{:>2}. {} ({})",
                i + 1,
                entry.title().unwrap_or("<untitled>"),
                entry.maker().unwrap_or("unknown maker"),
            );
            if let Some(pdf) = entry.pdf_url() {
                println!("    {pdf}");
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("vitalrec_client=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let base_url = env_or("BACKEND_URL", "http://localhost:3001");
    let view = RecommendationView::new(ApiClient::new(base_url), optional_id("AUTH_USER_ID")?);
    let params = params_from_env()?;

    render(&ViewState::Loading);
    match view.load(params).await {
        LoadOutcome::Redirect(route) => {
            println!("Not signed in, go to {route}");
            return Ok(());
        }
        LoadOutcome::Rendered(state) => render(&state),
        LoadOutcome::Superseded => {}
    }

    let (route, save) = view.save_and_exit().await;
    if let Some(save) = save {
        save.await.context("save task panicked")?;
    }
    println!("Continue to {route}");

    Ok(())
}
