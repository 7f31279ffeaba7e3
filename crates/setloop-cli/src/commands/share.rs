use setloop_core::share;

use super::open_config_strict;

pub const DEFAULT_BASE: &str = "https://setloop.app/";

pub fn share(base: &str) -> Result<(), Box<dyn std::error::Error>> {
    let persisted = open_config_strict(None)?;
    let url = share::share_url(base, persisted.config())?;
    println!("{url}");
    Ok(())
}

pub fn import(link: &str) -> Result<(), Box<dyn std::error::Error>> {
    let shared = share::decode(link);
    if shared.is_empty() {
        return Err(format!("no workout settings found in: {link}").into());
    }

    let persisted = open_config_strict(Some(&shared))?;
    println!("{}", serde_json::to_string_pretty(persisted.config())?);
    Ok(())
}
