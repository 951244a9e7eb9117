//! Location commands

use crate::config::Config;
use crate::db::{OpsStore, Store};
use crate::services::validation;

pub async fn cmd_location_add(config: &Config, name: &str) -> anyhow::Result<()> {
    let name = validation::require_text("name", name).map_err(anyhow::Error::msg)?;

    let store = Store::new(&config.general.database_path).await?;
    let location = store.create_location(&name).await?;

    println!("Created location '{}' with ID {}", location.name, location.id);
    Ok(())
}

pub async fn cmd_location_list(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let locations = store.list_locations().await?;

    if locations.is_empty() {
        println!("No locations yet. Add one with: shiftflow location add --name \"Westlands\"");
        return Ok(());
    }

    for location in locations {
        println!("{:>4}  {}", location.id, location.name);
    }

    Ok(())
}
