//! End-to-end tests of the hand-off commands against the in-memory host

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use oneclick_commands::*;
use oneclick_core::export_set::{EXPORT_SET_NAME, FILE_NAME_ATTR, FILE_PATH_ATTR};
use oneclick_core::settings::{APP_PATH, EXPORT_SETTINGS, INSTRUCTION_PATH, PROJECT_PATH};
use oneclick_core::*;

const EXPORT_SETTINGS_FILE: &str = "FbxExporters/unityFbxExportSettings.mel";
const EXPORT_SETTINGS_SCRIPT: &str = "FBXExportSmoothingGroups -v true;";

struct Fixture {
    dir: TempDir,
    project: PathBuf,
    host: MemoryHost,
    store: MemoryOptionStore,
    plugin: OneClickPlugin,
}

impl Fixture {
    fn new(platform: Platform) -> Self {
        Self::with_config(platform, OneClickConfig::default())
    }

    fn with_config(platform: Platform, config: OneClickConfig) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("Game");
        let settings_file = project.join("Assets").join(EXPORT_SETTINGS_FILE);
        fs::create_dir_all(settings_file.parent().unwrap()).unwrap();
        fs::write(&settings_file, EXPORT_SETTINGS_SCRIPT).unwrap();

        let ext = platform.plugin_extension();
        let mut host = MemoryHost::new(platform)
            .with_objects(["persp", "top"])
            .with_loadable_plugins([format!("GamePipeline.{}", ext), format!("fbxmaya.{}", ext)])
            .with_workspace("/maya/projects/default");

        let mut store = MemoryOptionStore::new();
        store.set(PROJECT_PATH, OptionValue::from(project.to_string_lossy().into_owned())).unwrap();
        store.set(APP_PATH, "/Applications/Unity/Unity.app".into()).unwrap();
        store.set(EXPORT_SETTINGS, EXPORT_SETTINGS_FILE.into()).unwrap();
        store.set(INSTRUCTION_PATH, "_safe_to_delete/instruction.txt".into()).unwrap();

        let mut plugin = OneClickPlugin::new(config);
        plugin.initialize(&mut host).unwrap();

        Self {
            dir,
            project,
            host,
            store,
            plugin,
        }
    }

    fn run(&mut self, invocation: Invocation) -> Result<CommandResult, CommandError> {
        self.plugin.execute(&invocation, &mut self.host, &mut self.store)
    }

    fn project_setting(&mut self) -> String {
        Settings::new(&mut self.store).project_path()
    }

    /// Put `objects` in the export set with a recorded source file
    fn track(&mut self, objects: &[&str], source: Option<(&str, &str)>) {
        let set = ExportSet::default();
        set.ensure(&mut self.host).unwrap();
        let items: Vec<ObjectId> = objects.iter().map(|o| o.to_string()).collect();
        for item in &items {
            self.host.spawn(item.clone());
        }
        self.host.add_to_set(set.name(), &items).unwrap();
        if let Some((path, name)) = source {
            set.store_path(&mut self.host, path).unwrap();
            set.store_name(&mut self.host, name).unwrap();
        }
    }
}

// ---- import ----

#[test]
fn test_import_explicit_file_resolves_project() {
    let mut fx = Fixture::new(Platform::Linux);
    let models = fx.project.join("Assets").join("Models");
    fs::create_dir_all(&models).unwrap();
    let chair = models.join("chair.fbx");
    fs::write(&chair, b"fbx").unwrap();

    fx.store.set(PROJECT_PATH, "/somewhere/else".into()).unwrap();
    fx.host.queue_import(PendingImport::Success {
        file: ImportedFile::from_file(&chair),
        objects: vec!["chair".into(), "chair_leg".into()],
    });

    let result = fx.run(Invocation::new("unityImport").arg(chair.to_string_lossy())).unwrap();

    assert_eq!(result.message(), Some(format!("Imported {}", chair.display()).as_str()));
    assert_eq!(result.warnings().count(), 0);
    assert_eq!(fx.host.imported_files, vec![chair.clone()]);
    assert!(fx.host.workspace_changes.is_empty());
    assert_eq!(
        fx.host.set_members(EXPORT_SET_NAME),
        vec!["chair".to_string(), "chair_leg".to_string()]
    );
    assert_eq!(
        fx.host.attribute(EXPORT_SET_NAME, FILE_PATH_ATTR),
        Some(models.to_string_lossy().into_owned())
    );
    assert_eq!(fx.host.attribute(EXPORT_SET_NAME, FILE_NAME_ATTR), Some("chair.fbx".to_string()));
    let expected_project = fx.project.to_string_lossy().into_owned();
    assert_eq!(fx.project_setting(), expected_project);
}

#[test]
fn test_import_dialog_switches_and_restores_workspace() {
    let mut fx = Fixture::new(Platform::Linux);
    let project = fx.project.to_string_lossy().into_owned();
    fx.host.queue_import(PendingImport::Success {
        file: ImportedFile::new("/work/Other/Assets/Props", "lamp.fbx"),
        objects: vec!["lamp".into()],
    });

    let result = fx.run(Invocation::new("unityImport")).unwrap();

    assert_eq!(result.message(), Some("Imported /work/Other/Assets/Props/lamp.fbx"));
    assert_eq!(fx.host.workspace_changes, vec![project, "/maya/projects/default".to_string()]);
    assert_eq!(fx.host.workspace().as_deref(), Some("/maya/projects/default"));
    assert_eq!(fx.project_setting(), "/work/Other");
    assert_eq!(fx.host.set_members(EXPORT_SET_NAME), vec!["lamp".to_string()]);
}

#[test]
fn test_import_non_fbx_argument_uses_dialog() {
    let mut fx = Fixture::new(Platform::Linux);
    fx.host.queue_import(PendingImport::Cancelled);

    let result = fx.run(Invocation::new("unityImport").arg("/does/not/exist.fbx")).unwrap();

    assert!(fx.host.imported_files.is_empty());
    assert_eq!(result.message(), Some("Import cancelled"));
}

#[test]
fn test_import_cancelled_leaves_empty_provenance() {
    let mut fx = Fixture::new(Platform::Linux);
    fx.host.queue_import(PendingImport::Cancelled);

    fx.run(Invocation::new("unityImport")).unwrap();

    assert!(fx.host.set_exists(EXPORT_SET_NAME));
    assert!(fx.host.set_members(EXPORT_SET_NAME).is_empty());
    assert_eq!(fx.host.attribute(EXPORT_SET_NAME, FILE_PATH_ATTR), Some(String::new()));
    assert_eq!(fx.host.attribute(EXPORT_SET_NAME, FILE_NAME_ATTR), Some(String::new()));
}

#[test]
fn test_import_failure_restores_workspace() {
    let mut fx = Fixture::new(Platform::Linux);
    fx.host.queue_import(PendingImport::Failed("Unexpected end of file".into()));

    let result = fx.run(Invocation::new("unityImport"));

    assert!(matches!(result, Err(CommandError::Handoff(HandoffError::Host(_)))));
    assert_eq!(fx.host.workspace().as_deref(), Some("/maya/projects/default"));
}

#[test]
fn test_import_warns_when_project_has_no_assets() {
    let mut fx = Fixture::new(Platform::Linux);
    let not_a_project = fx.dir.path().join("Docs");
    fs::create_dir_all(&not_a_project).unwrap();
    let not_a_project = not_a_project.to_string_lossy().into_owned();
    fx.store.set(PROJECT_PATH, OptionValue::from(not_a_project.clone())).unwrap();
    fx.host.queue_import(PendingImport::Cancelled);

    let result = fx.run(Invocation::new("unityImport")).unwrap();

    let warnings: Vec<String> = result.warnings().map(|l| l.text().to_string()).collect();
    assert_eq!(warnings, vec![format!("{} is not a Unity project", not_a_project)]);
    assert_eq!(fx.host.workspace_changes[0], not_a_project);
}

#[test]
fn test_import_without_dependencies_still_runs() {
    let mut fx = Fixture::new(Platform::Linux);
    let mut host = MemoryHost::new(Platform::Linux).with_objects(["persp"]);
    host.queue_import(PendingImport::Success {
        file: ImportedFile::new("/work/Game/Assets", "crate.fbx"),
        objects: vec!["crate".into()],
    });

    let result = fx
        .plugin
        .execute(&Invocation::new("unityImport"), &mut host, &mut fx.store)
        .unwrap();

    assert_eq!(host.set_members(EXPORT_SET_NAME), vec!["crate".to_string()]);
    assert_eq!(result.output_lines().len(), 1);
    assert_eq!(result.output_lines()[0].level(), OutputLevel::Warning);
}

// ---- preview ----

#[test]
fn test_preview_requires_instruction_path() {
    let mut fx = Fixture::new(Platform::MacOs);
    let mut store = MemoryOptionStore::new();
    store.set(PROJECT_PATH, OptionValue::from(fx.project.to_string_lossy().into_owned())).unwrap();

    let err = fx
        .plugin
        .execute(&Invocation::new("unityPreview"), &mut fx.host, &mut store)
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Missing Unity instruction file path, please re-install integration."
    );
    assert!(fx.host.exports.is_empty());
    assert!(fx.host.system_calls.is_empty());
}

#[test]
fn test_preview_missing_export_settings() {
    let mut fx = Fixture::new(Platform::MacOs);
    fx.store.set(EXPORT_SETTINGS, "missing.mel".into()).unwrap();

    let err = fx.run(Invocation::new("unityPreview")).unwrap_err();

    let expected = fx.project.join("Assets").join("missing.mel");
    assert_eq!(
        err.to_string(),
        format!("Failed to find Unity Fbx Export Settings at: {}", expected.display())
    );
    assert!(fx.host.exports.is_empty());
}

#[test]
fn test_preview_exports_and_launches() {
    let mut fx = Fixture::new(Platform::MacOs);
    fx.track(&["chair"], None);
    fx.host.set_selection(&["persp".to_string()]).unwrap();

    let result = fx.run(Invocation::new("unityPreview")).unwrap();

    let temp_dir = fx.project.join("Assets").join("_safe_to_delete");
    let model = temp_dir.join("TurnTableModel.fbx");
    assert_eq!(result.message(), Some(format!("Previewing {}", model.display()).as_str()));
    assert_eq!(fx.host.exports, vec![(model, vec!["chair".to_string()])]);
    assert!(temp_dir.join("instruction.txt").is_file());
    assert_eq!(fx.host.scripts, vec![EXPORT_SETTINGS_SCRIPT.to_string()]);
    assert_eq!(
        fx.host.system_calls,
        vec![format!(
            "open -a \"/Applications/Unity/Unity.app\" --args -projectPath \"{}\" -executeMethod FbxExporters.Review.TurnTable.LastSavedModel",
            fx.project.display()
        )]
    );
    assert_eq!(fx.host.selection(), vec!["persp".to_string()]);
}

#[test]
fn test_preview_without_export_set_uses_selection() {
    let mut fx = Fixture::new(Platform::Linux);
    fx.host.set_selection(&["top".to_string()]).unwrap();

    fx.run(Invocation::new("unityPreview")).unwrap();

    assert_eq!(fx.host.exports.len(), 1);
    assert_eq!(fx.host.exports[0].1, vec!["top".to_string()]);
    assert!(fx.host.system_calls[0].starts_with("\"/Applications/Unity/Unity.app\" -projectPath"));
}

#[test]
fn test_preview_dependency_failure_is_fatal() {
    let mut fx = Fixture::new(Platform::MacOs);
    let mut host = MemoryHost::new(Platform::MacOs);

    let err = fx
        .plugin
        .execute(&Invocation::new("unityPreview"), &mut host, &mut fx.store)
        .unwrap_err();

    assert_eq!(err.to_string(), "Failed to load GamePipeline.bundle plugin");
    assert!(host.exports.is_empty());
}

// ---- export ----

#[test]
fn test_export_writes_back_to_source() {
    let mut fx = Fixture::new(Platform::Linux);
    fx.track(&["chair"], Some(("/work/Game/Assets/Models", "chair.fbx")));
    fx.host.set_selection(&["top".to_string()]).unwrap();

    let result = fx.run(Invocation::new("unityExport")).unwrap();

    assert_eq!(result.message(), Some("Exported to /work/Game/Assets/Models/chair.fbx"));
    assert_eq!(
        fx.host.exports,
        vec![(PathBuf::from("/work/Game/Assets/Models/chair.fbx"), vec!["chair".to_string()])]
    );
    assert!(fx.host.commands.is_empty());
    assert_eq!(fx.host.selection(), vec!["top".to_string()]);
}

#[test]
fn test_export_without_provenance_asks_user() {
    let mut fx = Fixture::new(Platform::Linux);
    fx.track(&["chair"], Some(("", "chair.fbx")));

    let result = fx.run(Invocation::new("unityExport")).unwrap();

    assert!(fx.host.exports.is_empty());
    assert_eq!(fx.host.commands, vec!["SendToUnitySelection".to_string()]);
    assert_eq!(result.output_lines()[0].level(), OutputLevel::Info);
    assert_eq!(result.warnings().count(), 0);
}

#[test]
fn test_export_on_platform_without_launcher() {
    let mut config = OneClickConfig::default();
    config.integration.platform = Some("freebsd".into());
    let mut fx = Fixture::with_config(Platform::Linux, config);
    fx.track(&["chair"], Some(("/work/Game/Assets/Models", "chair.fbx")));

    let result = fx.run(Invocation::new("unityExport")).unwrap();

    assert_eq!(result.message(), Some("Exported to /work/Game/Assets/Models/chair.fbx"));
    assert!(fx.host.is_plugin_loaded("GamePipeline.mll"));
    assert!(fx.host.is_plugin_loaded("fbxmaya.mll"));
}

#[test]
fn test_configure_on_platform_without_launcher() {
    let mut config = OneClickConfig::default();
    config.integration.platform = Some("freebsd".into());
    let mut fx = Fixture::with_config(Platform::Linux, config);

    fx.run(Invocation::new("unityConfigure")).unwrap();

    assert_eq!(fx.host.commands, vec!["SendToUnitySetProject".to_string()]);
}

#[test]
fn test_preview_on_platform_without_launcher() {
    let mut config = OneClickConfig::default();
    config.integration.platform = Some("freebsd".into());
    let mut fx = Fixture::with_config(Platform::Linux, config);
    fx.host.set_selection(&["top".to_string()]).unwrap();

    let err = fx.run(Invocation::new("unityPreview")).unwrap_err();

    assert_eq!(err.to_string(), "missing platform implementation for freebsd");
    assert!(fx.host.system_calls.is_empty());
    assert_eq!(fx.host.selection(), vec!["top".to_string()]);
}

#[test]
fn test_export_empty_selection_is_restored() {
    let mut fx = Fixture::new(Platform::Linux);
    fx.track(&["chair"], Some(("/p/Assets", "chair.fbx")));

    fx.run(Invocation::new("unityExport")).unwrap();

    assert!(fx.host.selection().is_empty());
}

#[test]
fn test_export_via_runtime_alias() {
    let mut fx = Fixture::new(Platform::Linux);

    fx.run(Invocation::new("UnityOneClickExport")).unwrap();

    assert_eq!(fx.host.commands, vec!["SendToUnitySelection".to_string()]);
}

// ---- configure ----

#[test]
fn test_configure_runs_project_picker() {
    let mut fx = Fixture::new(Platform::Windows);

    fx.run(Invocation::new("unityConfigure")).unwrap();

    assert_eq!(fx.host.commands, vec!["SendToUnitySetProject".to_string()]);
    assert!(fx.host.is_plugin_loaded("GamePipeline.mll"));
}

#[test]
fn test_unknown_command() {
    let mut fx = Fixture::new(Platform::Linux);
    let result = fx.run(Invocation::new("unityDance"));
    assert!(matches!(result, Err(CommandError::UnknownCommand(_))));
}
