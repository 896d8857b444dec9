use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = r#"# Asyncify Configuration

[output]
# Spaces per indentation level in generated peers
indent = 4
# Leave @Asyncify* attributes in expanded source
keep_attributes = false

[naming]
# Identifiers used inside generated bodies
continuation = "continuation"
value = "object"
result = "result"

[arguments]
# How `_`-labelled parameters are forwarded: "positional" or "named"
wildcard = "positional"

[modifiers]
# Carry access level and `nonisolated` over to the async peer
preserve = true
"#;

pub fn init_config(force: bool) -> Result<()> {
    init_config_in(Path::new("."), force)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");
    Ok(())
}

pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    Ok(config_path)
}
