//! # OneClick Core
//!
//! Host-independent half of the OneClick integration that hands 3D assets
//! back and forth between a DCC application and a Unity project.
//!
//! - Settings store over the host's option variables
//! - Unity project resolution from imported file paths
//! - Export set tracking across imports
//! - Platform-specific Unity launch commands
//!
//! ## Architecture
//!
//! ```text
//! Command ──► ImportTracker ──► SceneHost (sets, attributes)
//!    │              │
//!    │              ▼
//!    │        project resolver ──► Settings ──► OptionStore
//!    ▼
//! LaunchDescriptor ──► Host::system
//! ```

pub mod config;
pub mod error;
pub mod export_set;
pub mod host;
pub mod launch;
pub mod logging;
pub mod memory;
pub mod menu;
pub mod project;
pub mod settings;

pub use config::{IntegrationConfig, LogConfig, OneClickConfig};
pub use error::{HandoffError, HandoffResult, HostError, HostResult};
pub use export_set::{ExportSet, ImportOutcome, ImportTracker, SourceFile};
pub use host::{Host, ImportedFile, ObjectId, SceneHost};
pub use launch::{LaunchDescriptor, Platform};
pub use logging::init_logging;
pub use memory::{MemoryHost, PendingImport};
pub use menu::{Menu, MenuItem};
pub use settings::{FileOptionStore, MemoryOptionStore, OptionStore, OptionValue, Settings};
