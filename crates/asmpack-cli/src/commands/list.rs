//! Catalog listing command

use super::Session;
use anyhow::Result;
use asmpack_module::ModuleCatalog;
use std::fmt::Write;

pub fn run(session: &Session, format: &str) -> Result<()> {
    print!("{}", render(&session.catalog, format)?);
    Ok(())
}

fn render(catalog: &ModuleCatalog, format: &str) -> Result<String> {
    match format {
        "text" => Ok(render_text(catalog)),
        "json" => Ok(serde_json::to_string_pretty(catalog.modules())? + "\n"),
        _ => anyhow::bail!("Unknown format: {}", format),
    }
}

fn render_text(catalog: &ModuleCatalog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} module(s)", catalog.len());
    for module in catalog.modules() {
        let ambiguous = if catalog.is_ambiguous(&module.name) {
            " [ambiguous name]"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "  {} ({}) {} refs={}{}",
            module.name,
            module.id,
            module.folder,
            module.references.len(),
            ambiguous
        );
    }
    out
}
