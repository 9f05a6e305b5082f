//! Render invocation.
//!
//! Patches the project's generated scene file to the requested resolution,
//! hands the patched copy to the host for a synchronous recompute, then
//! launches the configured LuxRender executable through the platform shell.
//! Fully blocking throughout; the renderer's exit status is not surfaced.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;

use atelier_core::{HostServices, RenderProject};

use crate::LuxError;

/// Preference key for the GUI-capable renderer executable.
pub const EXTERNAL_PATH_PREF: &str = "LuxRenderPath";
/// Preference key for the headless console renderer executable.
pub const CONSOLE_PATH_PREF: &str = "LuxConsolePath";
/// Preference key for extra command-line arguments, shared by both modes.
pub const PARAMETERS_PREF: &str = "LuxParameters";

static XRES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""integer xresolution".*?\[.*?\]"#).unwrap());
static YRES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""integer yresolution".*?\[.*?\]"#).unwrap());

/// Parameters for one render invocation.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Prepended verbatim to the assembled shell command (e.g. `"nice "`).
    pub prefix: String,
    /// Launch the GUI-capable executable instead of the console one.
    pub external: bool,
    /// Requested image output path. Accepted for interface parity with the
    /// host's export pipeline; the renderer writes wherever the scene file
    /// directs it, so this adapter does not consume it.
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Rewrite the scene text's resolution declarations.
///
/// Returns `None` when no x-resolution declaration matches. The
/// y-resolution rewrite is gated on the same x-resolution match: a scene
/// carrying only a y-resolution declaration comes back unpatched. This
/// mirrors the long-standing shared-flag behavior callers rely on; keep
/// both substitutions behind the one gate.
fn patch_resolution(text: &str, width: u32, height: u32) -> Option<String> {
    if !XRES.is_match(text) {
        return None;
    }
    let xrepl = format!("\"integer xresolution\" [{}]", width);
    let mut patched = XRES.replace_all(text, xrepl.as_str()).into_owned();
    if YRES.is_match(&patched) {
        let yrepl = format!("\"integer yresolution\" [{}]", height);
        patched = YRES.replace_all(&patched, yrepl.as_str()).into_owned();
    }
    Some(patched)
}

/// Assemble the shell command: prefix, executable, extra arguments (with a
/// separating space only when non-empty), then the scene file path.
fn compose_command(prefix: &str, rpath: &str, args: &str, page_result: &str) -> String {
    let mut args = args.to_string();
    if !args.is_empty() {
        args.push(' ');
    }
    format!("{}{} {}{}", prefix, rpath, args, page_result)
}

/// Temp-file suffix matching the template's extension, dot included.
fn template_suffix(project: &RenderProject) -> String {
    match project.template.extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy()),
        None => String::new(),
    }
}

/// Render the project with the configured LuxRender executable.
///
/// Resolves the executable first: an unset path for the requested mode is
/// reported once through `host.log_error` and aborts before any file is
/// touched. Otherwise the scene file is read, resolution-patched into a
/// temporary file, the project repointed at it, and the host's recompute
/// triggered; the temp file is removed before the renderer launches, so the
/// host must consume it during the recompute. The shell command is logged
/// through `host.log_info` and awaited; its exit status is discarded.
pub fn render(
    project: &mut RenderProject,
    host: &impl HostServices,
    settings: &RenderSettings,
) -> Result<(), LuxError> {
    let path_key = if settings.external {
        EXTERNAL_PATH_PREF
    } else {
        CONSOLE_PATH_PREF
    };
    let rpath = host.string_pref(path_key);
    let args = host.string_pref(PARAMETERS_PREF);
    if rpath.is_empty() {
        host.log_error(
            "Unable to locate renderer executable. \
             Please set the correct path in Edit -> Preferences -> Render",
        );
        return Err(LuxError::MissingExecutable(path_key.to_string()));
    }

    let text = fs::read_to_string(&project.page_result)?;
    if let Some(patched) = patch_resolution(&text, settings.width, settings.height) {
        log::debug!(
            "patched scene resolution to {}x{}",
            settings.width,
            settings.height
        );
        let mut tmp = tempfile::Builder::new()
            .prefix(&project.name)
            .suffix(&template_suffix(project))
            .tempfile()?;
        tmp.write_all(patched.as_bytes())?;
        project.page_result = tmp.path().to_path_buf();
        // the recompute must consume the file contents synchronously
        host.recompute_active_document();
        // dropping removes the temp file; page_result keeps the stale path
        drop(tmp);
    }

    let cmd = compose_command(
        &settings.prefix,
        &rpath,
        &args,
        &project.page_result.to_string_lossy(),
    );
    host.log_info(&cmd);
    log::info!("launching renderer: {}", cmd);

    // awaited, exit status not surfaced to the caller
    #[cfg(windows)]
    let _status = Command::new("cmd").arg("/C").arg(&cmd).status()?;
    #[cfg(not(windows))]
    let _status = Command::new("sh").arg("-c").arg(&cmd).status()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct MockHost {
        prefs: HashMap<String, String>,
        infos: RefCell<Vec<String>>,
        errors: RefCell<Vec<String>>,
        recomputes: RefCell<usize>,
    }

    impl MockHost {
        fn new(prefs: &[(&str, &str)]) -> Self {
            Self {
                prefs: prefs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                infos: RefCell::new(Vec::new()),
                errors: RefCell::new(Vec::new()),
                recomputes: RefCell::new(0),
            }
        }
    }

    impl HostServices for MockHost {
        fn string_pref(&self, key: &str) -> String {
            self.prefs.get(key).cloned().unwrap_or_default()
        }

        fn log_info(&self, msg: &str) {
            self.infos.borrow_mut().push(msg.to_string());
        }

        fn log_error(&self, msg: &str) {
            self.errors.borrow_mut().push(msg.to_string());
        }

        fn recompute_active_document(&self) {
            *self.recomputes.borrow_mut() += 1;
        }
    }

    fn project_with_scene(dir: &std::path::Path, scene: &str) -> RenderProject {
        let template = dir.join("template.lxs");
        let page = dir.join("scene.lxs");
        fs::write(&template, "# template\n").unwrap();
        fs::write(&page, scene).unwrap();
        RenderProject::new("proj", template, page)
    }

    fn settings(external: bool) -> RenderSettings {
        RenderSettings {
            prefix: String::new(),
            external,
            output: PathBuf::from("/tmp/out.png"),
            width: 800,
            height: 600,
        }
    }

    #[test]
    fn test_patch_both_resolutions() {
        let scene = "Film \"fleximage\"\n\
                     \"integer xresolution\" [1024]\n\
                     \"integer yresolution\" [768]\n";
        let patched = patch_resolution(scene, 800, 600).expect("x-resolution present");
        assert!(patched.contains("\"integer xresolution\" [800]"));
        assert!(patched.contains("\"integer yresolution\" [600]"));
    }

    #[test]
    fn test_patch_skips_y_without_x() {
        // shared-flag behavior: y alone is never rewritten
        let scene = "Film \"fleximage\"\n\"integer yresolution\" [768]\n";
        assert!(patch_resolution(scene, 800, 600).is_none());
    }

    #[test]
    fn test_patch_x_only() {
        let scene = "\"integer xresolution\" [1024]\n";
        let patched = patch_resolution(scene, 800, 600).unwrap();
        assert_eq!(patched, "\"integer xresolution\" [800]\n");
    }

    #[test]
    fn test_compose_command() {
        let cmd = compose_command("", "/usr/bin/luxconsole", "-v", "/tmp/scene.lxs");
        assert_eq!(cmd, "/usr/bin/luxconsole -v /tmp/scene.lxs");
    }

    #[test]
    fn test_compose_command_empty_args() {
        let cmd = compose_command("nice ", "/usr/bin/luxconsole", "", "/tmp/scene.lxs");
        assert_eq!(cmd, "nice /usr/bin/luxconsole /tmp/scene.lxs");
    }

    #[test]
    fn test_missing_executable_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let scene = "\"integer xresolution\" [1024]\n";
        let mut project = project_with_scene(dir.path(), scene);
        let original_page = project.page_result.clone();
        let host = MockHost::new(&[]);

        let err = render(&mut project, &host, &settings(false)).unwrap_err();
        assert!(matches!(err, LuxError::MissingExecutable(_)));
        assert_eq!(host.errors.borrow().len(), 1);
        assert_eq!(*host.recomputes.borrow(), 0);
        assert!(host.infos.borrow().is_empty());
        // no patch-and-swap side effects
        assert_eq!(project.page_result, original_page);
        assert_eq!(fs::read_to_string(&original_page).unwrap(), scene);
    }

    #[test]
    fn test_render_patches_and_swaps() {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = tempfile::tempdir().unwrap();
        let scene = "\"integer xresolution\" [1024]\n\"integer yresolution\" [768]\n";
        let mut project = project_with_scene(dir.path(), scene);
        let original_page = project.page_result.clone();
        let host = MockHost::new(&[(CONSOLE_PATH_PREF, "true"), (PARAMETERS_PREF, "-v")]);

        render(&mut project, &host, &settings(false)).unwrap();

        assert_eq!(*host.recomputes.borrow(), 1);
        // project was repointed at the temp copy, which is already gone
        assert_ne!(project.page_result, original_page);
        assert!(!project.page_result.exists());
        // the original scene file is untouched
        assert_eq!(fs::read_to_string(&original_page).unwrap(), scene);
        // the composed command went through the info channel
        let infos = host.infos.borrow();
        assert_eq!(infos.len(), 1);
        assert_eq!(
            infos[0],
            format!("true -v {}", project.page_result.to_string_lossy())
        );
    }

    #[test]
    fn test_render_aliasing_leaves_y_only_scene_alone() {
        let dir = tempfile::tempdir().unwrap();
        let scene = "\"integer yresolution\" [768]\n";
        let mut project = project_with_scene(dir.path(), scene);
        let original_page = project.page_result.clone();
        let host = MockHost::new(&[(CONSOLE_PATH_PREF, "true")]);

        render(&mut project, &host, &settings(false)).unwrap();

        // no x-resolution declaration, so no patch, no swap, no recompute
        assert_eq!(*host.recomputes.borrow(), 0);
        assert_eq!(project.page_result, original_page);
        assert_eq!(fs::read_to_string(&original_page).unwrap(), scene);
    }

    #[test]
    fn test_external_mode_resolves_gui_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut project = project_with_scene(dir.path(), "# no resolution here\n");
        let host = MockHost::new(&[(EXTERNAL_PATH_PREF, "true")]);

        render(&mut project, &host, &settings(true)).unwrap();
        assert!(host.infos.borrow()[0].starts_with("true "));

        // console mode has no path configured and must abort
        let err = render(&mut project, &host, &settings(false)).unwrap_err();
        assert!(matches!(err, LuxError::MissingExecutable(_)));
    }
}
