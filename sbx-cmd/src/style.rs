//! Print the renderer and legend the map uses for an attribute.

use sbx_core::legend::Legend;
use sbx_core::style::{resolve_rule, SymbolShape};
use sbx_core::Attribute;

pub fn print_renderer(attribute: Attribute, shape: SymbolShape) -> anyhow::Result<()> {
    let rule = resolve_rule(attribute, shape);
    println!("{}", serde_json::to_string_pretty(&rule.to_renderer_json())?);
    Ok(())
}

/// One line per band: `color  label`.
pub fn legend_lines(attribute: Attribute) -> Vec<String> {
    let legend = Legend::for_attribute(attribute);
    std::iter::once(legend.title())
        .chain(
            legend
                .entries
                .iter()
                .map(|e| format!("{}  {}", e.color, e.label)),
        )
        .collect()
}

pub fn print_legend(attribute: Attribute) -> anyhow::Result<()> {
    for line in legend_lines(attribute) {
        println!("{}", line);
    }
    Ok(())
}
