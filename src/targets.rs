//! Per-platform tables of the locations the cleaner inspects.
//!
//! The tables are a pure function of [Platform] and [Environment], so they can be checked for
//! any platform regardless of the machine the tests run on.
//! Registry keys and processes are not filesystem locations, see
//! [crate::registry::registry_targets] and [crate::config::CleanerConfig::processes].

use crate::platform::Platform;
use anyhow::Context;
use itertools::Itertools;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Directories the path tables are built from
#[derive(Debug, Clone)]
pub struct Environment {
    pub home: PathBuf,
    /// Windows `%APPDATA%`
    pub roaming_app_data: Option<PathBuf>,
    /// Windows `%LOCALAPPDATA%`
    pub local_app_data: Option<PathBuf>,
    /// Prefix for system wide locations such as `/usr/share`
    pub system_root: PathBuf,
}

impl Environment {
    pub fn detect(platform: Platform) -> anyhow::Result<Self> {
        let home = dirs::home_dir().context("Unable to get home_dir()")?;
        let (roaming_app_data, local_app_data) = match platform {
            Platform::Windows => (dirs::config_dir(), dirs::data_local_dir()),
            _ => (None, None),
        };
        Ok(Self {
            home,
            roaming_app_data,
            local_app_data,
            system_root: PathBuf::from("/"),
        })
    }

    /// An environment rooted entirely under `root`, home included
    pub fn rooted_at<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self {
            home: root.join("home"),
            roaming_app_data: Some(root.join("home/AppData/Roaming")),
            local_app_data: Some(root.join("home/AppData/Local")),
            system_root: root.to_path_buf(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetLocation {
    Literal(PathBuf),
    /// A glob pattern, expanded against the filesystem at the time of use
    Pattern(String),
}

impl TargetLocation {
    /// Builds a pattern from a fixed directory and a wildcard file name.
    ///
    /// The directory is escaped so characters such as `[` in a home path are matched literally.
    pub fn pattern<P: AsRef<Path>>(dir: P, file_glob: &str) -> Self {
        let dir = glob::Pattern::escape(&dir.as_ref().to_string_lossy());
        let separator = std::path::MAIN_SEPARATOR;
        let dir = dir.trim_end_matches(separator);
        TargetLocation::Pattern(format!("{}{}{}", dir, separator, file_glob))
    }
}

impl Display for TargetLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetLocation::Literal(p) => write!(f, "{}", p.display()),
            TargetLocation::Pattern(p) => f.write_str(p),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// An editor `extensions` directory, scanned for product entries
    Extensions,
    /// An editor `settings.json`, edited in place
    Settings,
    /// Product data, removed entirely
    AppData,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemovalTarget {
    pub location: TargetLocation,
    pub description: &'static str,
    pub category: Category,
}

impl RemovalTarget {
    fn literal(path: PathBuf, description: &'static str, category: Category) -> Self {
        Self {
            location: TargetLocation::Literal(path),
            description,
            category,
        }
    }

    /// The paths this target currently refers to
    pub fn expand(&self) -> Vec<PathBuf> {
        match &self.location {
            TargetLocation::Literal(p) => vec![p.clone()],
            TargetLocation::Pattern(pattern) => match glob::glob(pattern) {
                Ok(paths) => paths
                    .filter_map(|entry| match entry {
                        Ok(p) => Some(p),
                        Err(e) => {
                            log::warn!("Skipping unreadable match for {}: {}", pattern, e);
                            None
                        }
                    })
                    .collect(),
                Err(e) => {
                    log::warn!("Invalid pattern {}: {}", pattern, e);
                    vec![]
                }
            },
        }
    }
}

/// Every filesystem location to inspect on `platform`, without duplicates
pub fn resolve_candidate_paths(platform: Platform, env: &Environment) -> Vec<RemovalTarget> {
    let extensions = editor_directories(platform, env)
        .into_iter()
        .map(|base| {
            RemovalTarget::literal(
                base.join("extensions"),
                "VS Code extensions",
                Category::Extensions,
            )
        });
    let settings = settings_files(platform, env)
        .into_iter()
        .map(|p| RemovalTarget::literal(p, "VS Code settings", Category::Settings));
    extensions
        .chain(settings)
        .chain(app_data(platform, env))
        .unique()
        .collect()
}

fn editor_directories(platform: Platform, env: &Environment) -> Vec<PathBuf> {
    let home = &env.home;
    let root = &env.system_root;
    match platform {
        Platform::Windows => {
            let mut paths = vec![
                home.join("AppData/Roaming/Code"),
                home.join("AppData/Local/Programs/Microsoft VS Code"),
                home.join(".vscode"),
            ];
            paths.extend(env.roaming_app_data.iter().map(|p| p.join("Code")));
            paths
        }
        Platform::MacOs => vec![
            home.join("Library/Application Support/Code"),
            home.join(".vscode"),
            root.join("Applications/Visual Studio Code.app"),
        ],
        Platform::Linux => vec![
            home.join(".config/Code"),
            home.join(".vscode"),
            root.join("usr/share/code"),
            root.join("opt/visual-studio-code"),
        ],
    }
}

fn settings_files(platform: Platform, env: &Environment) -> Vec<PathBuf> {
    let home = &env.home;
    let user_settings = match platform {
        Platform::Windows => home.join("AppData/Roaming/Code/User/settings.json"),
        Platform::MacOs => home.join("Library/Application Support/Code/User/settings.json"),
        Platform::Linux => home.join(".config/Code/User/settings.json"),
    };
    vec![user_settings, home.join(".vscode/settings.json")]
}

fn app_data(platform: Platform, env: &Environment) -> Vec<RemovalTarget> {
    const DESCRIPTION: &str = "Augment application data";
    let home = &env.home;
    let literal = |p: PathBuf| RemovalTarget::literal(p, DESCRIPTION, Category::AppData);
    match platform {
        Platform::Windows => {
            let mut targets = vec![
                literal(home.join("AppData/Roaming/Augment")),
                literal(home.join("AppData/Local/Augment")),
                literal(home.join(".augment")),
            ];
            targets.extend(
                env.roaming_app_data
                    .iter()
                    .chain(env.local_app_data.iter())
                    .map(|p| literal(p.join("Augment"))),
            );
            targets
        }
        Platform::MacOs => vec![
            literal(home.join("Library/Application Support/Augment")),
            literal(home.join("Library/Caches/Augment")),
            RemovalTarget {
                location: TargetLocation::pattern(home.join("Library/Preferences"), "com.augment.*"),
                description: DESCRIPTION,
                category: Category::AppData,
            },
            literal(home.join(".augment")),
        ],
        Platform::Linux => vec![
            literal(home.join(".config/augment")),
            literal(home.join(".local/share/augment")),
            literal(home.join(".cache/augment")),
            literal(home.join(".augment")),
        ],
    }
}
