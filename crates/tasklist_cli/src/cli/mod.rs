use clap::{Parser, Subcommand};
use tasklist_core::config::{ConfigOverrides, Theme, canonical_key};
use tasklist_core::error::AppError;

#[derive(Parser, Debug)]
#[command(name = "tasklist", author, version, about, long_about = None)]
pub struct Cli {
    /// Run one command; without a command an interactive session starts
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replace the draft input
    ///
    /// Example: tasklist type "Buy milk"
    Type { text: String },
    /// Create a task from the draft, or from TEXT when given
    ///
    /// Example: tasklist create "Buy milk"
    Create { text: Option<String> },
    /// Delete a task by id
    ///
    /// Example: tasklist delete 1
    Delete { id: String },
    /// Filter by the draft, or by TEXT when given
    ///
    /// Example: tasklist search bill
    Search { text: Option<String> },
    /// Show the filtered task list
    List,
    /// Show render and recompute counters
    Stats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    Theme,
    TraceRenders,
    SeedInitialTasks,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let (key_raw, value_raw) = raw
        .trim()
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let key = canonical_key(key_raw);
    let target = match key.as_str() {
        "" => return Err("override key cannot be empty".to_string()),
        "theme" => ConfigOverrideTarget::Theme,
        "trace_renders" => ConfigOverrideTarget::TraceRenders,
        "seed_initial_tasks" | "seed" => ConfigOverrideTarget::SeedInitialTasks,
        other => return Err(format!("unknown config field '{other}'")),
    };

    Ok(ParsedConfigOverride {
        target,
        value: value_raw.trim().to_string(),
    })
}

fn parse_flag(field: &str, value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(format!("{field} expects true or false, got '{value}'")),
    }
}

/// Folds every `--config-override` argument into one set of overrides.
/// Later values for the same key win.
pub fn collect_config_overrides(raw: &[String]) -> Result<ConfigOverrides, AppError> {
    let mut overrides = ConfigOverrides::default();

    for entry in raw {
        let parsed = parse_config_override(entry).map_err(AppError::invalid_input)?;
        match parsed.target {
            ConfigOverrideTarget::Theme => {
                let theme = Theme::from_name(&parsed.value).ok_or_else(|| {
                    AppError::invalid_input(format!("unknown theme '{}'", parsed.value))
                })?;
                overrides.theme = Some(theme);
            }
            ConfigOverrideTarget::TraceRenders => {
                overrides.trace_renders = Some(
                    parse_flag("trace_renders", &parsed.value).map_err(AppError::invalid_input)?,
                );
            }
            ConfigOverrideTarget::SeedInitialTasks => {
                overrides.seed_initial_tasks = Some(
                    parse_flag("seed_initial_tasks", &parsed.value)
                        .map_err(AppError::invalid_input)?,
                );
            }
        }
    }

    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::{ConfigOverrideTarget, collect_config_overrides, parse_config_override};
    use tasklist_core::config::Theme;

    #[test]
    fn parse_config_override_canonicalizes_field_names() {
        let parsed = parse_config_override(" Trace-Renders = on ").unwrap();

        assert_eq!(parsed.target, ConfigOverrideTarget::TraceRenders);
        assert_eq!(parsed.value, "on");
    }

    #[test]
    fn parse_config_override_rejects_unknown_fields() {
        let err = parse_config_override("unknown.field=value").unwrap_err();
        assert!(err.contains("unknown config field"));
    }

    #[test]
    fn parse_config_override_rejects_missing_equals() {
        let err = parse_config_override("theme").unwrap_err();
        assert!(err.contains("KEY=VALUE"));
    }

    #[test]
    fn parse_config_override_rejects_empty_key() {
        let err = parse_config_override(" = noir").unwrap_err();
        assert!(err.contains("cannot be empty"));
    }

    #[test]
    fn collect_config_overrides_merges_entries() {
        let overrides = collect_config_overrides(&[
            "theme=noir".to_string(),
            "seed=false".to_string(),
            "trace_renders=yes".to_string(),
            "theme=solarized".to_string(),
        ])
        .unwrap();

        assert_eq!(overrides.theme, Some(Theme::Solarized));
        assert_eq!(overrides.seed_initial_tasks, Some(false));
        assert_eq!(overrides.trace_renders, Some(true));
    }

    #[test]
    fn collect_config_overrides_rejects_bad_flag() {
        let err = collect_config_overrides(&["trace_renders=maybe".to_string()]).unwrap_err();
        assert_eq!(err.code(), "invalid_input");
    }

    #[test]
    fn collect_config_overrides_rejects_unknown_theme() {
        let err = collect_config_overrides(&["theme=sepia".to_string()]).unwrap_err();
        assert_eq!(err.code(), "invalid_input");
        assert_eq!(err.message(), "unknown theme 'sepia'");
    }
}
