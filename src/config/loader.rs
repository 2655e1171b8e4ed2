use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for ngsweep passes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target directories to scan (relative to the project root)
    pub targets: Vec<PathBuf>,

    /// Patterns to exclude from scanning
    pub exclude: Vec<String>,

    /// Root component file name, never processed by either pass
    pub root_component: String,

    /// Path segment marking the source root, used for commit messages
    pub source_root: String,

    /// Build configuration
    pub build: BuildConfig,

    /// Report configuration
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Command used as the correctness oracle after each deletion
    pub command: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Where the JSON audit log of the artifact pass is written
    pub path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            targets: vec![],
            exclude: vec![
                "**/node_modules/**".to_string(),
                "**/dist/**".to_string(),
                "**/.angular/**".to_string(),
                "**/coverage/**".to_string(),
            ],
            root_component: "app.component.ts".to_string(),
            source_root: "src".to_string(),
            build: BuildConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            command: "npm run build".to_string(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("cleanup-results.json"),
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => {
                // Try YAML first, then TOML
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents)
                        .into_diagnostic()
                        .wrap_err("Failed to parse config file")
                }
            }
        }
    }

    /// Try to load configuration from default locations
    pub fn from_default_locations(project_root: &Path) -> Result<Self> {
        let default_names = [
            ".ngsweep.yml",
            ".ngsweep.yaml",
            ".ngsweep.toml",
            "ngsweep.yml",
            "ngsweep.yaml",
            "ngsweep.toml",
        ];

        for name in &default_names {
            let path = project_root.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        // No config file found, use defaults
        Ok(Self::default())
    }

    /// Check if a pattern matches for exclusion
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.exclude.iter().any(|pattern| glob_match(pattern, &path_str))
    }
}

/// Simple glob matching for patterns like "*.spec.ts" or "**/dist/**"
fn glob_match(pattern: &str, text: &str) -> bool {
    if pattern.starts_with('*') && !pattern.contains('/') {
        // Pattern like "*.spec.ts" matches "login.spec.ts"
        let suffix = &pattern[1..];
        return text.ends_with(suffix);
    }

    if pattern.ends_with('*') && !pattern.contains('/') {
        let prefix = &pattern[..pattern.len() - 1];
        return text.starts_with(prefix);
    }

    if pattern.starts_with("**/") && pattern.ends_with("/**") {
        // Pattern like "**/dist/**" must match a complete directory name,
        // not a substring: "/dist/" matches, "/distribution/" does not.
        let dir_name = pattern
            .trim_start_matches("**/")
            .trim_end_matches("/**")
            .trim_matches('/');
        let dir_pattern = format!("/{}/", dir_name);
        return text.contains(&dir_pattern);
    }

    text == pattern
}
