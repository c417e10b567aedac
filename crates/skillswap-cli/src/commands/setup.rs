use std::path::PathBuf;

use skillswap_config::ConfigLoader;

const STARTER_CONFIG: &str = r#"# 🤝 SkillSwap Configuration

[store]
db_path = "skillswap.db"   # or env: SKILLSWAP_DB_PATH

[recommend]
max_matches = 5            # or env: SKILLSWAP_MAX_MATCHES
max_suggestions = 5        # or env: SKILLSWAP_MAX_SUGGESTIONS

[logging]
level = "info"             # trace, debug, info, warn, error
format = "pretty"          # pretty, json, compact
"#;

pub(super) fn cmd_init(local: bool) -> skillswap_core::Result<()> {
    let config_path = if local {
        std::env::current_dir()?.join("skillswap.toml")
    } else {
        ConfigLoader::default_path()
    };
    write_starter_config(&config_path)
}

fn write_starter_config(config_path: &PathBuf) -> skillswap_core::Result<()> {
    if config_path.exists() {
        println!("⚠️  {} already exists", config_path.display());
        return Ok(());
    }
    if let Some(dir) = config_path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(config_path, STARTER_CONFIG)?;
    println!("✅ Created {}", config_path.display());
    Ok(())
}
