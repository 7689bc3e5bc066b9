mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use settings::ResolvedConfig;
use workflow::{Interactions, SearchWorkflow};

fn main() -> Result<()> {
    let cli = parse_cli();
    facetkit::logging::initialize(cli.verbose);

    let resolved = settings::load(&cli)?;

    if cli.print_config {
        resolved.print_summary();
    }

    run_search(cli.output, resolved, &Interactions::from_cli(&cli))
}

/// Execute the search workflow and print output in the chosen format.
fn run_search(format: OutputFormat, settings: ResolvedConfig, interactions: &Interactions) -> Result<()> {
    let workflow = SearchWorkflow::from_config(settings)?;
    let outcome = workflow.run(interactions)?;

    match format {
        OutputFormat::Plain => print_plain(&outcome),
        OutputFormat::Json => print_json(&outcome)?,
    }

    Ok(())
}
