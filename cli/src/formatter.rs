use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Row, Table};
use metrum::{display_units, DimensionVector, UnitDefinition, UnitSystem, ValidationReport};

pub struct Formatter {}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {}
    }

    pub fn format_units(&self, units: &DimensionVector) -> String {
        format!("{}\n", display_units(units))
    }

    pub fn format_unit_system(&self, system: &UnitSystem) -> String {
        let mut output = String::new();

        if system.is_empty() {
            output.push_str("No units loaded. Every name resolves as a base unit.\n");
            return output;
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Unit").set_alignment(CellAlignment::Left),
            Cell::new("Kind").set_alignment(CellAlignment::Left),
            Cell::new("Definition").set_alignment(CellAlignment::Left),
        ]));

        for (name, definition) in system {
            table.add_row(Row::from(vec![
                Cell::new(name),
                Cell::new(definition.kind()),
                Cell::new(describe_definition(definition)),
            ]));
        }

        output.push_str(&format!("{}\n", table));
        output.push_str(&format!("\n{} unit(s)\n", system.len()));
        output
    }

    pub fn format_validation(&self, report: &ValidationReport) -> String {
        let mut output = String::new();

        if report.cyclic_units.is_empty() {
            output.push_str(&format!(
                "✓ No circular definitions ({} unit(s) checked)\n",
                report.order.len()
            ));
        } else {
            output.push_str("✗ Circular definitions:\n");
            for unit in &report.cyclic_units {
                output.push_str(&format!("  {}\n", unit));
            }
        }

        if !report.dangling_references.is_empty() {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(Row::from(vec![
                Cell::new("Unit").set_alignment(CellAlignment::Left),
                Cell::new("References undefined").set_alignment(CellAlignment::Left),
            ]));
            for (unit, reference) in &report.dangling_references {
                table.add_row(Row::from(vec![Cell::new(unit), Cell::new(reference)]));
            }
            output.push_str("\nUndefined references (resolved as base units):\n");
            output.push_str(&format!("{}\n", table));
        }

        output
    }
}

fn describe_definition(definition: &UnitDefinition) -> String {
    match definition {
        UnitDefinition::Definition => "base unit".to_string(),
        UnitDefinition::Alias(target) => target.clone(),
        UnitDefinition::Expression(terms) => terms
            .iter()
            .map(|(name, exponent)| {
                if *exponent == 1 {
                    name.clone()
                } else {
                    format!("{}^{}", name, exponent)
                }
            })
            .collect::<Vec<_>>()
            .join(" "),
    }
}
