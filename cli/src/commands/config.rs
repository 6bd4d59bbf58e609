use std::path::Path;

use color_eyre::eyre::Result;

use crate::config::UserConfig;

pub fn run(config_file: &Path, path: bool, reset: bool) -> Result<()> {
    if path {
        println!("{}", config_file.display());
        return Ok(());
    }

    if reset {
        let config = UserConfig::default();
        config.save_to(config_file)?;
        println!("Config reset to defaults at: {}", config_file.display());
        return Ok(());
    }

    let config = UserConfig::load_from(config_file);
    println!("Config file: {}", config_file.display());
    if !config_file.exists() {
        println!("(not found, showing defaults)");
    }
    println!();
    println!("{}", toml::to_string_pretty(&config)?);

    Ok(())
}
