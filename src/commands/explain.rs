use anyhow::{Context, Result};
use infracheck::properties::catalog;

use crate::cli::Cli;
use crate::commands::Session;

pub fn cmd_explain(cli: &Cli, id: &str) -> Result<()> {
    let ui = Session::open(cli)?.ui;
    let property = catalog::find(id).with_context(|| {
        format!(
            "run `infracheck list` for the {} known properties",
            catalog::all().len()
        )
    })?;

    if ui.json {
        crate::ui::json::emit(serde_json::json!({
            "event": "property",
            "id": property.id,
            "category": property.category,
            "title": property.title,
            "description": property.description,
            "kind": property.check.kind(),
            "inspects": property.inspects,
        }))?;
        return Ok(());
    }

    print!(
        "{}",
        crate::ui::views::list::render_explain(property, ui.color)
    );
    Ok(())
}
