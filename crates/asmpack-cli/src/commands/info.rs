//! Module info command

use super::Session;
use anyhow::Result;
use asmpack_module::{ClosureResolver, Module, ModuleCatalog};
use std::fmt::Write;

pub fn run(session: &Session, selector: &str) -> Result<()> {
    let module = session.catalog.select(selector)?;
    print!("{}", render(&session.catalog, module));
    Ok(())
}

fn render(catalog: &ModuleCatalog, module: &Module) -> String {
    let d = &module.descriptor;
    let mut out = String::new();

    let _ = writeln!(out, "Module: {}", module.name);
    let _ = writeln!(out, "Id: {}", module.id);
    let _ = writeln!(out, "Descriptor: {}", module.asset_path);
    let _ = writeln!(out, "Folder: {}", module.folder);
    if !d.root_namespace.is_empty() {
        let _ = writeln!(out, "Root namespace: {}", d.root_namespace);
    }
    if !d.include_platforms.is_empty() {
        let _ = writeln!(out, "Include platforms: {}", d.include_platforms.join(", "));
    }
    if !d.exclude_platforms.is_empty() {
        let _ = writeln!(out, "Exclude platforms: {}", d.exclude_platforms.join(", "));
    }
    if !d.define_constraints.is_empty() {
        let _ = writeln!(out, "Define constraints: {}", d.define_constraints.join(", "));
    }
    let _ = writeln!(
        out,
        "Flags: allowUnsafeCode={} autoReferenced={} overrideReferences={} noEngineReferences={}",
        d.allow_unsafe_code, d.auto_referenced, d.override_references, d.no_engine_references
    );
    if d.override_references && !d.precompiled_references.is_empty() {
        let _ = writeln!(
            out,
            "Precompiled references: {}",
            d.precompiled_references.join(", ")
        );
    }
    for define in &d.version_defines {
        let _ = writeln!(
            out,
            "Version define: {} ({}) -> {}",
            define.name, define.expression, define.define
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "References:");
    if module.references.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    let assigned = ClosureResolver::new(catalog).assign(&module.references);
    let mut matched = 0;
    for (token, target) in assigned.iter().rev() {
        match target {
            Some(target) => {
                matched += 1;
                let _ = writeln!(out, "  {} -> {} ({})", token, target.name, target.id);
            }
            None => {
                let _ = writeln!(out, "  {} (unresolved)", token);
            }
        }
    }

    if matched < module.references.len() {
        let _ = writeln!(
            out,
            "{} of {} reference(s) matched a module",
            matched,
            module.references.len()
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::TempProject;

    #[test]
    fn test_render_references() {
        let project = TempProject::new();
        let session = project.session();
        let app = session.catalog.select("App").unwrap();
        let text = render(&session.catalog, app);

        assert!(text.starts_with("Module: App\nId: a2\n"));
        assert!(text.contains("Descriptor: Assets/App/App.asmdef\n"));
        // Name tokens share one pending set, so each takes the first pending
        // name in catalog order
        assert!(text.contains(
            "References:\n  UI (unresolved)\n  Core -> UI (u1)\n  Missing -> Core (c0)\n"
        ));
        assert!(text.contains("2 of 3 reference(s) matched a module\n"));
    }

    #[test]
    fn test_render_guid_reference() {
        let project = TempProject::new();
        let session = project.session();
        let ui = session.catalog.select("GUID:u1").unwrap();
        let text = render(&session.catalog, ui);

        assert!(text.contains("  GUID:c0 -> Core (c0)\n"));
        assert!(!text.contains("matched a module"));
    }

    #[test]
    fn test_render_descriptor_fields() {
        let project = TempProject::new();
        project.module(
            "Assets/Editor/Tools.asmdef",
            r#"{
                "name": "Tools",
                "rootNamespace": "Game.Tools",
                "includePlatforms": ["Editor"],
                "allowUnsafeCode": true
            }"#,
            "t3",
        );
        let session = project.session();
        let tools = session.catalog.select("Assets/Editor/Tools.asmdef").unwrap();
        let text = render(&session.catalog, tools);

        assert!(text.contains("Root namespace: Game.Tools\n"));
        assert!(text.contains("Include platforms: Editor\n"));
        assert!(text.contains("allowUnsafeCode=true autoReferenced=true"));
        assert!(text.contains("References:\n  (none)\n"));
    }
}
