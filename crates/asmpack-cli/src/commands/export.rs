//! Export command

use super::Session;
use anyhow::{Context, Result};
use asmpack_module::{build_export_set, ExportManifest, ExportSet, FsAssetLister};
use std::path::PathBuf;

pub struct ExportArgs {
    pub selector: String,
    pub output: Option<String>,
    pub format: String,
    pub dedup: bool,
    pub include_meta: bool,
    pub include_dependencies: bool,
}

pub fn run(session: &Session, args: ExportArgs) -> Result<()> {
    let set = build(session, &args)?;
    let include_dependencies =
        args.include_dependencies || session.config.export.include_dependencies;

    match args.format.as_str() {
        "paths" => {
            for path in &set.paths {
                println!("{}", path);
            }
        }
        "json" => {
            let json = ExportManifest::from_export(&set, include_dependencies).to_json()?;
            match &args.output {
                Some(output) => {
                    std::fs::write(output, json + "\n")
                        .with_context(|| format!("Failed to write {}", output))?;
                    println!("Export manifest: {} asset(s) -> {}", set.paths.len(), output);
                }
                None => println!("{}", json),
            }
        }
        "toml" => {
            let output = output_path(session, &args);
            let manifest = ExportManifest::from_export(&set, include_dependencies);
            manifest
                .save(&output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!(
                "Export manifest: {} + {} module(s), {} asset(s) -> {}",
                set.root.name,
                set.modules.len(),
                set.paths.len(),
                output.display()
            );
        }
        _ => anyhow::bail!("Unknown format: {}. Use: toml, json, paths", args.format),
    }

    Ok(())
}

/// Resolve the root and assemble its export set with the effective options
fn build(session: &Session, args: &ExportArgs) -> Result<ExportSet> {
    let root = session.catalog.select(&args.selector)?;
    let export_config = &session.config.export;

    let lister = FsAssetLister::new(&session.project, &session.config.catalog.assets_root)
        .with_meta(args.include_meta || export_config.include_meta);

    let mut set = build_export_set(root, &session.catalog, &lister)
        .with_context(|| format!("Failed to collect assets for {}", root.name))?;

    if args.dedup || export_config.dedup_paths {
        set.dedup_paths();
    }

    Ok(set)
}

/// An explicit `--output` is taken as given; the configured default is
/// relative to the project root
fn output_path(session: &Session, args: &ExportArgs) -> PathBuf {
    match &args.output {
        Some(output) => PathBuf::from(output),
        None => session.project.join(&session.config.export.output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::TempProject;

    fn args(selector: &str) -> ExportArgs {
        ExportArgs {
            selector: selector.to_string(),
            output: None,
            format: "toml".to_string(),
            dedup: false,
            include_meta: false,
            include_dependencies: false,
        }
    }

    #[test]
    fn test_build_export_set() {
        let project = TempProject::new();
        let session = project.session();

        let set = build(&session, &args("App")).unwrap();
        assert_eq!(
            set.paths,
            vec![
                "Assets/App/App.asmdef",
                "Assets/App/Main.cs",
                "Assets/Core/Core.asmdef",
                "Assets/Core/Log.cs",
                "Assets/UI/Button.cs",
                "Assets/UI/UI.asmdef",
            ]
        );
    }

    #[test]
    fn test_build_with_meta() {
        let project = TempProject::new();
        let session = project.session();

        let mut a = args("Core");
        a.include_meta = true;
        let set = build(&session, &a).unwrap();
        assert_eq!(
            set.paths,
            vec![
                "Assets/Core/Core.asmdef",
                "Assets/Core/Core.asmdef.meta",
                "Assets/Core/Log.cs",
            ]
        );
    }

    #[test]
    fn test_build_dedup() {
        let project = TempProject::new();
        project.module(
            "Assets/Core/Extra/Extra.asmdef",
            r#"{ "name": "Extra", "references": ["Core"] }"#,
            "e5",
        );
        let session = project.session();

        let set = build(&session, &args("Extra")).unwrap();
        let repeated = set
            .paths
            .iter()
            .filter(|p| p.as_str() == "Assets/Core/Extra/Extra.asmdef")
            .count();
        assert_eq!(repeated, 2);

        let mut a = args("Extra");
        a.dedup = true;
        let set = build(&session, &a).unwrap();
        let repeated = set
            .paths
            .iter()
            .filter(|p| p.as_str() == "Assets/Core/Extra/Extra.asmdef")
            .count();
        assert_eq!(repeated, 1);
    }

    #[test]
    fn test_unknown_selector() {
        let project = TempProject::new();
        let session = project.session();
        assert!(build(&session, &args("Nope")).is_err());
    }

    #[test]
    fn test_run_writes_manifest() {
        let project = TempProject::new();
        let session = project.session();

        run(&session, args("UI")).unwrap();

        let manifest = ExportManifest::load(&project.path().join("build/export.toml")).unwrap();
        assert_eq!(manifest.root.name, "UI");
        assert_eq!(manifest.modules.len(), 1);
        assert_eq!(manifest.modules[0].name, "Core");
        assert!(!manifest.include_dependencies);
        assert!(manifest.verify());
    }

    #[test]
    fn test_run_json_to_file() {
        let project = TempProject::new();
        let session = project.session();
        let output = project.path().join("export.json");

        let mut a = args("App");
        a.format = "json".to_string();
        a.output = Some(output.to_string_lossy().into_owned());
        a.include_dependencies = true;
        run(&session, a).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json["root"]["name"], "App");
        assert_eq!(json["include_dependencies"], true);
    }

    #[test]
    fn test_run_unknown_format() {
        let project = TempProject::new();
        let session = project.session();
        let mut a = args("App");
        a.format = "zip".to_string();
        assert!(run(&session, a).is_err());
    }
}
