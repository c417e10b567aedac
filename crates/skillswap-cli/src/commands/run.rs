use std::collections::HashMap;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use skillswap_config::SwapConfig;
use skillswap_core::SwapError;
use skillswap_engine::{Pipeline, Progress, RecommendOptions, Recommender, UserRecommendation};
use skillswap_store::UserStore;

use super::{join_or_dash, open_store};

pub(super) async fn cmd_run(
    config: &SwapConfig,
    dry_run: bool,
    json: bool,
    quiet: bool,
) -> skillswap_core::Result<()> {
    let store = open_store(config)?;
    let pipeline = Pipeline::new(Recommender::new(RecommendOptions {
        max_matches: config.recommend.max_matches,
        max_suggestions: config.recommend.max_suggestions,
    }));

    if dry_run {
        let recommendations = pipeline.preview(&store).await?;
        return print_preview(&store, &recommendations, json);
    }

    let bar = if quiet || json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(0)
    };
    bar.set_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
            .map(|s| s.progress_chars("=> "))
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let report = pipeline
        .run_with_progress(&store, &store, |event| match event {
            Progress::Computed { total } => {
                bar.set_length(total as u64);
                bar.set_message("writing recommendations");
            }
            Progress::Persisted { user_id, .. } => {
                bar.set_message(user_id.to_string());
                bar.inc(1);
            }
            Progress::Failed { user_id, reason } => {
                bar.println(format!("⚠️  {user_id}: {reason}"));
                bar.inc(1);
            }
        })
        .await?;
    bar.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.users == 0 {
        println!("No users in {}", config.store.db_path.display());
        println!("  Import some with: skillswap seed <file.json>");
    } else {
        println!(
            "{} Updated {} of {} users",
            style("✅").green(),
            report.persisted,
            report.users
        );
        for failure in &report.failures {
            println!(
                "  {} {}: {}",
                style("✗").red(),
                failure.user_id,
                failure.reason
            );
        }
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(SwapError::Other(anyhow::anyhow!(
            "{} of {} recommendations could not be stored",
            report.failures.len(),
            report.users
        )))
    }
}

fn print_preview(
    store: &UserStore,
    recommendations: &[UserRecommendation],
    json: bool,
) -> skillswap_core::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(recommendations)?);
        return Ok(());
    }
    if recommendations.is_empty() {
        println!("No users to recommend for.");
        return Ok(());
    }

    let labels: HashMap<String, String> = store
        .list_users()?
        .into_iter()
        .map(|s| (s.user.id.clone(), s.user.label().to_string()))
        .collect();
    let label = |id: &str| labels.get(id).cloned().unwrap_or_else(|| id.to_string());

    println!("{}\n", style("Recommendations (dry run, not stored):").bold());
    for rec in recommendations {
        let matches: Vec<String> = rec
            .recommendation
            .recommended_matches
            .iter()
            .map(|id| label(id))
            .collect();
        println!("  {}", style(label(&rec.user_id)).cyan());
        println!("    Matches: {}", join_or_dash(&matches));
        println!(
            "    Suggested skills: {}",
            join_or_dash(&rec.recommendation.suggested_skills)
        );
    }
    Ok(())
}
