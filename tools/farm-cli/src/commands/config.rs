//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use serde_json::json;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.section("cart");
    ctx.output.kv("storage_key", &ctx.config.cart.storage_key);
    ctx.output.kv(
        "max_quantity_per_item",
        &ctx.config.cart.max_quantity_per_item.to_string(),
    );

    ctx.output.section("storage");
    ctx.output
        .kv("data_dir", &ctx.config.storage.data_dir.display().to_string());

    ctx.output.section("api");
    ctx.output.kv("base_url", &ctx.config.api.base_url);

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let errors = ctx.config.validate();
    if errors.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    bail!("Configuration has {} error(s)", errors.len())
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<serde_json::Value> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["cart", "storage_key"] => Ok(json!(config.cart.storage_key)),
        ["cart", "max_quantity_per_item"] => Ok(json!(config.cart.max_quantity_per_item)),
        ["storage", "data_dir"] => Ok(json!(config.storage.data_dir)),
        ["api", "base_url"] => Ok(json!(config.api.base_url)),
        _ => bail!("Unknown config key: {}", key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_value() {
        let config = CliConfig::default();
        assert_eq!(
            get_config_value(&config, "cart.storage_key").unwrap(),
            json!("smartfarm_cart")
        );
        assert_eq!(
            get_config_value(&config, "cart.max_quantity_per_item").unwrap(),
            json!(9999)
        );
        assert_eq!(
            get_config_value(&config, "storage.data_dir").unwrap(),
            json!(".smartfarm")
        );
        assert!(get_config_value(&config, "cart.nope").is_err());
    }
}
