//! Closure resolution command

use super::Session;
use anyhow::Result;
use asmpack_module::{ClosureResolver, ExportedModule, Module, ModuleCatalog};
use std::fmt::Write;

pub fn run(session: &Session, selector: &str, format: &str) -> Result<()> {
    let root = session.catalog.select(selector)?;
    print!("{}", render(&session.catalog, root, format)?);
    Ok(())
}

fn render(catalog: &ModuleCatalog, root: &Module, format: &str) -> Result<String> {
    let closure = ClosureResolver::new(catalog).resolve_closure(&root.references);

    match format {
        "text" => {
            let mut out = String::new();
            let _ = writeln!(out, "{} references {} module(s)", root.name, closure.len());
            for module in &closure {
                let _ = writeln!(out, "  {} ({}) {}", module.name, module.id, module.folder);
            }
            Ok(out)
        }
        "json" => {
            let modules: Vec<ExportedModule> =
                closure.into_iter().map(ExportedModule::from).collect();
            Ok(serde_json::to_string_pretty(&modules)? + "\n")
        }
        _ => anyhow::bail!("Unknown format: {}", format),
    }
}
