//! Algorithm listing command.

use anyhow::Result;
use graphxt_adapters::plugins::PluginRegistry;
use graphxt_adapters::plugins::algorithms::StartKind;
use serde::Serialize;

use crate::OutputFormat;
use crate::output;

/// One registered algorithm.
#[derive(Serialize)]
struct AlgorithmOutput {
    name: &'static str,
    requires: StartKind,
    description: &'static str,
}

fn describe(requires: StartKind) -> &'static str {
    match requires {
        StartKind::None => "-",
        StartKind::Vertex => "--start",
        StartKind::Pair => "--start, --sink",
    }
}

/// Run the list command.
pub fn run(format: OutputFormat, quiet: bool) -> Result<()> {
    let registry: PluginRegistry<String, i64> = PluginRegistry::with_builtins();
    let algorithms: Vec<AlgorithmOutput> = registry
        .entries()
        .map(|entry| AlgorithmOutput {
            name: entry.name,
            requires: entry.requires,
            description: entry.description,
        })
        .collect();

    output::print_output(&algorithms, format.into(), quiet, |algorithms| {
        let rows = algorithms
            .iter()
            .map(|a| {
                vec![
                    a.name.to_string(),
                    describe(a.requires).to_string(),
                    a.description.to_string(),
                ]
            })
            .collect();
        output::print_rows(&["Algorithm", "Arguments", "Description"], rows, quiet);
    })
}
