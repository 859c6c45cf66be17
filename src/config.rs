//! Indentation style configuration
//!
//! An [`IndentConfig`] is handed to every indenter call; the engine never
//! keeps one around. Hosts usually build it from their own settings, or load
//! it from `~/.config/cindent/indent.yaml`.

use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

/// Where preprocessor lines go when `#` is typed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveIndent {
    /// Always column 0
    #[default]
    FlushLeft,
    /// A fixed visual column
    Columns(usize),
}

/// Style settings for one indenter invocation.
///
/// `pre_scope_indent` and `post_scope_indent` use `None` to mean "one
/// `indent_width`".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndentConfig {
    /// Columns per tab stop, must be > 0
    pub tab_width: usize,
    pub indent_width: usize,
    /// Extra columns for a `{` opening a scope on its own line
    pub pre_scope_indent: Option<i32>,
    /// Extra columns for the body of a scope
    pub post_scope_indent: Option<i32>,
    /// Extra columns for the line after `if (…)`, `while (…)`, …
    pub condition_indent: i32,
    pub directive_indent: DirectiveIndent,
    /// Columns between a `switch` scope and its `case` labels
    pub case_indent: i32,
    pub use_tabs: bool,
}

impl Default for IndentConfig {
    /// GNU layout: two-column steps, braces of a conditional indented half way
    fn default() -> Self {
        Self {
            tab_width: 8,
            indent_width: 2,
            pre_scope_indent: None,
            post_scope_indent: None,
            condition_indent: 2,
            directive_indent: DirectiveIndent::FlushLeft,
            case_indent: 0,
            use_tabs: false,
        }
    }
}

impl IndentConfig {
    /// Linux kernel layout: eight-column tabs, braces aligned with their statement
    pub fn kernel() -> Self {
        Self {
            tab_width: 8,
            indent_width: 8,
            pre_scope_indent: Some(0),
            post_scope_indent: None,
            condition_indent: 8,
            directive_indent: DirectiveIndent::FlushLeft,
            case_indent: 0,
            use_tabs: true,
        }
    }

    /// Same style with a different indent width
    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    pub fn effective_tab_width(&self) -> usize {
        self.tab_width.max(1)
    }

    pub fn pre_scope(&self) -> isize {
        self.pre_scope_indent
            .map_or(self.indent_width as isize, |n| n as isize)
    }

    pub fn post_scope(&self) -> isize {
        self.post_scope_indent
            .map_or(self.indent_width as isize, |n| n as isize)
    }

    pub fn condition(&self) -> isize {
        self.condition_indent as isize
    }

    pub fn case(&self) -> isize {
        self.case_indent as isize
    }

    /// Parse a YAML document, rejecting a zero tab width
    pub fn parse_yaml(yaml: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).context("invalid indent config")?;
        if config.tab_width == 0 {
            bail!("tab_width must be greater than zero");
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::parse_yaml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load config from the user config dir, or return defaults if not usable
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded indent config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    /// Save config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved indent config to {}", path.display());
        Ok(())
    }
}
