//! External process launch
//!
//! Builds the OS-specific shell command that brings Unity to the front (or
//! starts it) with a project and a method to execute. Launching is
//! fire-and-forget; nothing waits on the child.

use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};
use std::str::FromStr;

use crate::error::{HandoffError, HandoffResult};

/// Method run by Unity to show the last saved model on the turntable
pub const TURNTABLE_METHOD: &str = "FbxExporters.Review.TurnTable.LastSavedModel";

/// Windows helper that raises an existing Unity window, relative to the project
pub const BRING_TO_FRONT_HELPER: &str = "Assets/FbxExporters/Integrations/BringToFront.exe";

/// Host plugin extension everywhere except macOS
pub const DEFAULT_PLUGIN_EXTENSION: &str = "mll";

/// Platforms with a launch implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
}

impl Platform {
    /// Platform of the running process
    pub fn current() -> HandoffResult<Self> {
        std::env::consts::OS.parse()
    }

    /// File extension of host plugin binaries
    pub fn plugin_extension(&self) -> &'static str {
        match self {
            Self::MacOs => "bundle",
            Self::Linux | Self::Windows => DEFAULT_PLUGIN_EXTENSION,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MacOs => write!(f, "macos"),
            Self::Linux => write!(f, "linux"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

impl FromStr for Platform {
    type Err = HandoffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "macos" | "mac" | "darwin" | "osx" => Ok(Self::MacOs),
            "linux" => Ok(Self::Linux),
            "windows" | "win32" | "win64" => Ok(Self::Windows),
            _ => Err(HandoffError::UnsupportedPlatform(s.to_string())),
        }
    }
}

/// Everything needed to start Unity on a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchDescriptor {
    pub app_path: String,
    pub project_path: String,
    pub method: String,
}

impl LaunchDescriptor {
    pub fn new(
        app_path: impl Into<String>,
        project_path: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self {
            app_path: app_path.into(),
            project_path: project_path.into(),
            method: method.into(),
        }
    }

    /// Shell command for `platform`
    pub fn command_line(&self, platform: Platform) -> String {
        let app = &self.app_path;
        let project = &self.project_path;
        let method = &self.method;

        match platform {
            // `open -a` raises an already running instance; the method is not
            // re-run in that case.
            Platform::MacOs => format!(
                "open -a \"{app}\" --args -projectPath \"{project}\" -executeMethod {method}"
            ),
            Platform::Linux => format!("\"{app}\" -projectPath \"{project}\" -executeMethod {method}"),
            Platform::Windows => {
                let helper = format!("{}/{}", project, BRING_TO_FRONT_HELPER);
                let title = Path::new(project)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                format!(
                    "start \"{helper}\" \"{title}\" \"{app}\" \"-projectPath {project} -executeMethod {method}\""
                )
            }
        }
    }
}

/// Build the launch command for a platform given by name
pub fn build_command(
    platform: &str,
    app_path: &str,
    project_path: &str,
    method: &str,
) -> HandoffResult<String> {
    let platform: Platform = platform.parse()?;
    Ok(LaunchDescriptor::new(app_path, project_path, method).command_line(platform))
}

/// Run a command line through the platform shell without waiting for it
pub fn spawn_detached(command_line: &str) -> HandoffResult<()> {
    let mut cmd = if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", command_line]);
        c
    } else {
        let mut c = Command::new("sh");
        c.args(["-c", command_line]);
        c
    };

    cmd.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
    let child = cmd.spawn()?;
    log::debug!("Launched pid {}: {}", child.id(), command_line);
    Ok(())
}
