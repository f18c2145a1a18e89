use infracheck::Property;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Catalog listing, one line per property under category headings
pub fn render_property_list(
    properties: &[&Property],
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::List, "infracheck properties");
    header.add("Count", properties.len().to_string());
    let mut out = header.render(supports_color, supports_unicode);

    let width = properties.iter().map(|p| p.id.len()).max().unwrap_or(0);
    let mut current = None;
    for property in properties {
        if current != Some(property.category) {
            out.push('\n');
            out.push_str(
                &ColoredText::info(property.category.display_name())
                    .bold()
                    .render(supports_color),
            );
            out.push('\n');
            current = Some(property.category);
        }
        out.push_str(&format!(
            "  {:<width$}  {} {}\n",
            property.id,
            property.title,
            ColoredText::dim(format!("({})", property.check.kind())).render(supports_color),
        ));
    }
    out
}

/// Everything a property checks and where
pub fn render_explain(property: &Property, supports_color: bool) -> String {
    let mut out = String::new();
    out.push_str(&ColoredText::info(property.id).bold().render(supports_color));
    out.push('\n');
    out.push_str(&format!("{}\n\n", property.title));
    out.push_str(&format!("{}\n\n", property.description));
    out.push_str(&format!(
        "{} {}\n",
        ColoredText::dim("Category:").render(supports_color),
        property.category.display_name()
    ));
    let evaluation = if property.check.is_sampled() {
        ColoredText::warning(format!("sampled ({})", property.check.kind()))
    } else {
        ColoredText::success("evaluated once")
    };
    out.push_str(&format!(
        "{} {}\n",
        ColoredText::dim("Evaluation:").render(supports_color),
        evaluation.render(supports_color)
    ));
    out.push_str(&format!(
        "{}\n",
        ColoredText::dim("Inspects:").render(supports_color)
    ));
    for path in property.inspects {
        out.push_str(&format!("  {}\n", path));
    }
    out
}
