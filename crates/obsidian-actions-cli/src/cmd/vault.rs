use crate::output::print_value;
use crate::settings::Settings;
use anyhow::Context;

pub fn info(settings: &Settings) -> anyhow::Result<()> {
    let value = settings.vault()?.info().context("failed to fetch info")?;
    print_value(value.as_ref(), settings.json)
}

pub fn tags(settings: &Settings) -> anyhow::Result<()> {
    let value = settings.vault()?.tags_list().context("failed to list tags")?;
    print_value(value.as_ref(), settings.json)
}
