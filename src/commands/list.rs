use anyhow::Result;
use infracheck::properties::catalog;
use infracheck::Category;

use crate::cli::Cli;
use crate::commands::Session;

pub fn cmd_list(cli: &Cli, categories: Vec<Category>) -> Result<()> {
    let ui = Session::open(cli)?.ui;
    let properties: Vec<_> = catalog::all()
        .iter()
        .filter(|p| categories.is_empty() || categories.contains(&p.category))
        .collect();

    if ui.json {
        for property in &properties {
            crate::ui::json::emit(serde_json::json!({
                "event": "property",
                "id": property.id,
                "category": property.category,
                "title": property.title,
                "kind": property.check.kind(),
            }))?;
        }
        return Ok(());
    }

    print!(
        "{}",
        crate::ui::views::list::render_property_list(&properties, ui.color, ui.unicode)
    );
    Ok(())
}
