//! Implementation of the `strata templates` command.

use std::collections::BTreeMap;

use strata_adapters::select_store;

use crate::{
    cli::{GlobalArgs, ListFormat, TemplatesArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// List the template ids of the active store.
pub fn execute(
    args: TemplatesArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let store = select_store(super::templates_dir(global, config))?;
    let ids = store.list()?;

    match args.format {
        ListFormat::Table => {
            output.header(&format!("Templates ({}):", store.describe()))?;
            for (group, names) in group_by_directory(&ids) {
                output.print(&format!("  {group}/"))?;
                for name in names {
                    output.print(&format!("    {name}"))?;
                }
            }
        }

        // Plain stdout: machine-readable formats must survive pipes.
        ListFormat::List => {
            for id in &ids {
                println!("{id}");
            }
        }

        ListFormat::Json => {
            let json = serde_json::to_string_pretty(&ids).map_err(|e| CliError::InvalidInput {
                message: format!("cannot serialise template list: {e}"),
            })?;
            println!("{json}");
        }
    }

    Ok(())
}

/// `project/go.mod` → (`project`, [`go.mod`]), keys sorted.
fn group_by_directory(ids: &[String]) -> BTreeMap<&str, Vec<&str>> {
    let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for id in ids {
        let (group, name) = id.split_once('/').unwrap_or((".", id.as_str()));
        groups.entry(group).or_default().push(name);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_grouped_by_first_directory() {
        let ids = vec![
            "project/go.mod".to_string(),
            "entity/entity.go".to_string(),
            "project/main.go".to_string(),
            "loose".to_string(),
        ];
        let groups = group_by_directory(&ids);
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec![".", "entity", "project"]);
        assert_eq!(groups["project"], vec!["go.mod", "main.go"]);
    }
}
