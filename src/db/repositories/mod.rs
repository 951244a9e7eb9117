pub mod briefing;
pub mod identity;
pub mod location;
pub mod logs;
pub mod shift;
pub mod task;

/// Parses a text column into one of the closed domain vocabularies.
fn parse_column<T>(value: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr<Err = crate::domain::UnknownVariant>,
{
    value
        .parse()
        .map_err(|e| anyhow::anyhow!("Corrupt row in store: {e}"))
}
