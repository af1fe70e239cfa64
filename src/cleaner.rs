//! Drives the full cleanup: processes, extensions, settings, app data, then registry

use crate::common::{contains_marker, MARKER, PRODUCT_NAME};
use crate::config::CleanerConfig;
use crate::outcome::OutcomeLog;
use crate::platform::Platform;
use crate::process::{display_name, ProcessControl};
use crate::prompt::confirm;
use crate::registry::remove_registry_entries;
use crate::remove::safe_remove;
use crate::settings::edit_json_settings;
use crate::targets::{resolve_candidate_paths, Category, Environment, RemovalTarget};
use std::fs;
use std::io;
use std::io::BufRead;
use std::path::PathBuf;
use wildmatch::WildMatch;

pub struct Cleaner {
    platform: Platform,
    env: Environment,
    config: CleanerConfig,
    processes: Box<dyn ProcessControl>,
    targets: Vec<RemovalTarget>,
    log: OutcomeLog,
}

impl Cleaner {
    pub fn new(
        platform: Platform,
        env: Environment,
        config: CleanerConfig,
        processes: Box<dyn ProcessControl>,
    ) -> Self {
        let targets = resolve_candidate_paths(platform, &env);
        log::debug!("Candidate targets: {:#?}", targets);
        Self {
            platform,
            env,
            config,
            processes,
            targets,
            log: OutcomeLog::new(),
        }
    }

    pub fn log(&self) -> &OutcomeLog {
        &self.log
    }

    /// Asks for confirmation then runs every step.
    ///
    /// Returns false, having changed nothing, if the user declined.
    pub fn run_cleanup<R: BufRead>(&mut self, input: R) -> io::Result<bool> {
        println!("🧹 {} Complete Removal Tool", PRODUCT_NAME);
        println!("{}", "=".repeat(50));
        println!("Operating System: {}", self.platform);
        println!("Home Directory: {}", self.env.home.display());
        println!();

        if !confirm(input)? {
            println!("❌ Cleanup cancelled.");
            log::info!("Cleanup declined by user");
            return Ok(false);
        }

        println!("\n🚀 Starting cleanup process...");
        self.kill_processes();
        self.remove_extensions();
        self.clean_settings();
        self.remove_app_data();
        remove_registry_entries(self.platform, MARKER, &mut self.log);
        print_browser_note();

        println!("\n{}", "=".repeat(50));
        println!("🎉 Cleanup Summary");
        println!("{}", "=".repeat(50));
        self.log.print_summary();
        println!("\n✨ {} cleanup completed!", PRODUCT_NAME);
        println!("💡 Restart your computer to ensure all changes take effect.");
        Ok(true)
    }

    pub fn kill_processes(&mut self) {
        println!("\n⚡ Stopping Augment Processes...");
        for broad in self.config.broad_processes() {
            println!(
                "⚠️  '{}' does not identify {} and may stop unrelated programs",
                broad, PRODUCT_NAME
            );
            log::warn!(
                "Process name '{}' does not contain '{}', unrelated processes may be terminated",
                broad,
                MARKER
            );
        }
        for name in &self.config.processes {
            let shown = display_name(self.platform, name);
            match self.processes.terminate(name) {
                Ok(true) => self.log.record(format!("Killed process: {}", shown), true),
                Ok(false) => log::debug!("No running process matched {}", shown),
                Err(e) => self
                    .log
                    .record(format!("Failed to kill process {}: {}", shown, e), false),
            }
        }
    }

    pub fn remove_extensions(&mut self) {
        println!("\n🔍 Removing VS Code Extensions...");
        let patterns = self
            .config
            .extension_patterns
            .iter()
            .map(|p| WildMatch::new(p))
            .collect::<Vec<_>>();
        let dirs = self
            .targets
            .iter()
            .filter(|t| t.category == Category::Extensions)
            .flat_map(RemovalTarget::expand)
            .collect::<Vec<_>>();
        for dir in dirs {
            let entries = match fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => {
                    self.log.record(
                        format!("Failed to read extensions in {}: {}", dir.display(), e),
                        false,
                    );
                    continue;
                }
            };
            let listing = entries.map(|entry| entry.map(|e| e.path()));
            let (matches, unreadable) = select_extensions(listing, &patterns);
            for e in unreadable {
                self.log.record(
                    format!("Failed to read extension entry in {}: {}", dir.display(), e),
                    false,
                );
            }
            for path in matches {
                safe_remove(&path, "VS Code Augment extension", &mut self.log);
            }
        }
    }

    pub fn clean_settings(&mut self) {
        println!("\n🔧 Cleaning VS Code Settings...");
        for target in self.targets.iter().filter(|t| t.category == Category::Settings) {
            for path in target.expand() {
                edit_json_settings(&path, MARKER, &mut self.log);
            }
        }
    }

    pub fn remove_app_data(&mut self) {
        println!("\n📁 Removing Application Data...");
        for target in self.targets.iter().filter(|t| t.category == Category::AppData) {
            for path in target.expand() {
                safe_remove(&path, target.description, &mut self.log);
            }
        }
    }
}

/// Splits a directory listing into product entries and entries that could not be read
fn select_extensions<I>(listing: I, patterns: &[WildMatch]) -> (Vec<PathBuf>, Vec<io::Error>)
where
    I: Iterator<Item = io::Result<PathBuf>>,
{
    let mut matches = vec![];
    let mut unreadable = vec![];
    for entry in listing {
        match entry {
            Ok(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                if contains_marker(&name, MARKER) || patterns.iter().any(|p| p.matches(&name)) {
                    matches.push(path);
                }
            }
            Err(e) => unreadable.push(e),
        }
    }
    (matches, unreadable)
}

fn print_browser_note() {
    println!("\n🌐 Note: Browser Data Cleanup...");
    println!("Please manually clear browser data for Augment domains:");
    println!("- Clear cookies and site data for augmentcode.com");
    println!("- Clear localStorage and sessionStorage");
    println!("- Clear browser cache");
}
