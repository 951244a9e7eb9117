//! Staff profile commands

use crate::config::Config;
use crate::db::Store;
use crate::domain::Role;
use crate::services::validation;

pub async fn cmd_staff_add(config: &Config, name: &str, role: &str, pin: &str) -> anyhow::Result<()> {
    let name = validation::require_text("name", name).map_err(anyhow::Error::msg)?;
    let role: Role = role.parse()?;
    validation::validate_pin(pin).map_err(anyhow::Error::msg)?;

    let store = Store::new(&config.general.database_path).await?;
    let identity = store
        .create_identity(&name, role, pin, &config.security)
        .await?;

    println!(
        "Created {} '{}' with ID {}",
        identity.role, identity.name, identity.id
    );
    Ok(())
}

pub async fn cmd_staff_list(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let staff = store.list_all_identities().await?;

    if staff.is_empty() {
        println!("No staff profiles yet.");
        println!();
        println!("Add one with: shiftflow staff add --name \"Amina\" --role barista --pin 1234");
        return Ok(());
    }

    println!("Staff ({} total)", staff.len());
    println!("{:-<50}", "");
    for identity in staff {
        println!("{:>4}  {:<30} {}", identity.id, identity.name, identity.role);
    }

    Ok(())
}
