use std::path::Path;

use console::style;
use tracing::info;

use skillswap_config::SwapConfig;
use skillswap_core::SwapError;
use skillswap_store::seed;

use super::{join_or_dash, open_store};

pub(super) fn cmd_seed(
    config: &SwapConfig,
    file: Option<&Path>,
    demo: bool,
) -> skillswap_core::Result<()> {
    let store = open_store(config)?;

    let users = if demo {
        let removed = store.delete_users_with_prefix(seed::DEMO_ID_PREFIX)?;
        if removed > 0 {
            info!(removed, "deleted previous demo users");
        }
        seed::demo_users()
    } else {
        let path = file.ok_or_else(|| SwapError::Seed("no seed file given".into()))?;
        seed::load_users(path)?
    };

    let written = store.upsert_users(&users)?;
    println!(
        "{} Imported {} users into {}",
        style("✅").green(),
        written,
        config.store.db_path.display()
    );
    println!("  Compute recommendations with: skillswap run");
    Ok(())
}

pub(super) fn cmd_users(config: &SwapConfig, json: bool) -> skillswap_core::Result<()> {
    let store = open_store(config)?;
    let users = store.list_users()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(());
    }
    if users.is_empty() {
        println!("No users in {}", config.store.db_path.display());
        return Ok(());
    }

    println!("{}\n", style(format!("Users ({}):", users.len())).bold());
    for stored in &users {
        let user = &stored.user;
        match user.username {
            Some(ref name) => println!("  {} ({})", style(name).cyan(), user.id),
            None => println!("  {}", style(&user.id).cyan()),
        }
        println!("    Teaches: {}", join_or_dash(&user.skills_to_teach));
        println!("    Learns:  {}", join_or_dash(&user.skills_to_learn));
    }
    Ok(())
}

pub(super) fn cmd_show(config: &SwapConfig, id: &str, json: bool) -> skillswap_core::Result<()> {
    let store = open_store(config)?;
    let stored = store
        .get_user(id)?
        .ok_or_else(|| SwapError::UserNotFound(id.to_string()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stored)?);
        return Ok(());
    }

    let user = &stored.user;
    println!("{} ({})", style(user.label()).bold(), user.id);
    println!("  Teaches: {}", join_or_dash(&user.skills_to_teach));
    println!("  Learns:  {}", join_or_dash(&user.skills_to_learn));

    let Some(ref at) = stored.recommended_at else {
        println!("\n  No recommendations yet. Run: skillswap run");
        return Ok(());
    };

    let mut matches = Vec::with_capacity(stored.recommendation.recommended_matches.len());
    for match_id in &stored.recommendation.recommended_matches {
        let label = match store.get_user(match_id)? {
            Some(m) => format!("{} ({})", m.user.label(), match_id),
            None => match_id.clone(),
        };
        matches.push(label);
    }

    println!("\n  {} (computed {at})", style("Recommendations").bold());
    println!("    Matches: {}", join_or_dash(&matches));
    println!(
        "    Suggested skills: {}",
        join_or_dash(&stored.recommendation.suggested_skills)
    );
    Ok(())
}
