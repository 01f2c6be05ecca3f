//! Settings command implementations (config path, config show)

use anyhow::{Context, Result};
use ballast_core::config::{default_config_path, AGE_ENV};
use ballast_core::Settings;

pub fn cmd_config_path() -> Result<()> {
    match default_config_path() {
        Some(path) => {
            let state = if path.exists() { "exists" } else { "not created" };
            println!("{} ({})", path.display(), state);
        }
        None => println!("(no data directory on this platform; using embedded defaults)"),
    }
    Ok(())
}

pub fn cmd_config_show() -> Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;

    let origin = match default_config_path() {
        Some(path) if path.exists() => path.display().to_string(),
        _ => "embedded defaults".to_string(),
    };

    println!();
    println!("⚙️  Ballast Settings ({})", origin);
    println!("   ─────────────────────────────────────────────────────────────");
    match settings.age {
        Some(age) => println!("   Age:               {}", age),
        None => println!("   Age:               (not set)"),
    }
    if std::env::var(AGE_ENV).is_ok() {
        println!("                      (from {})", AGE_ENV);
    }
    println!("   Retirement age:    {}", settings.retirement_age);
    match &settings.default_snapshot {
        Some(path) => println!("   Default snapshot:  {}", path.display()),
        None => println!("   Default snapshot:  (not set)"),
    }
    println!();
    println!("   Embedded defaults:");
    for line in Settings::embedded_toml().lines() {
        println!("   │ {}", line);
    }
    println!();
    Ok(())
}
