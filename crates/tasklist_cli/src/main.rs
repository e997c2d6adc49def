use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::io::{self, BufRead};
use tasklist_cli::cli::{Cli, collect_config_overrides};
use tasklist_cli::session::Session;
use tasklist_core::config::{Config, load_config_with_fallback, merge_overrides};
use tasklist_core::error::AppError;

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

/// Splits an interactive line into arguments. Double quotes group words;
/// `""` yields an empty argument.
fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            quoted = true;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if quoted || !current.is_empty() {
                args.push(std::mem::take(&mut current));
                quoted = false;
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if quoted || !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn load_settings(raw_overrides: &[String]) -> Result<Config, AppError> {
    let load = load_config_with_fallback();
    if let Some(err) = load.error {
        eprintln!("WARNING: using default config: {}", err);
    }
    let overrides = collect_config_overrides(raw_overrides)?;
    Ok(merge_overrides(&load.config, &overrides))
}

fn init_logging(trace_renders: bool) {
    let default_filter = if trace_renders { "info" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_filter);
    // A second init only happens in tests that share the process; ignore it.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

fn run_line(session: &mut Session, line: &str, json: bool) -> Result<(), AppError> {
    let args = split_command_line(line)?;
    if args.is_empty() {
        return Ok(());
    }

    let mut argv = Vec::with_capacity(args.len() + 1);
    argv.push("tasklist".to_string());
    argv.extend(args);

    let cli = match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            println!("{err}");
            return Ok(());
        }
        Err(err) => return Err(normalize_parse_error(err)),
    };

    if !cli.config_override.is_empty() {
        return Err(AppError::invalid_input(
            "config overrides are only accepted at startup",
        ));
    }

    let command = cli
        .command
        .ok_or_else(|| AppError::invalid_input("a command is required"))?;
    session.execute(command, json || cli.json)
}

fn run_interactive(session: &mut Session, json: bool) -> Result<(), AppError> {
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock.read_line(&mut input)?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        if let Err(err) = run_line(session, line, json) {
            eprintln!("ERROR: {}", err);
        }
    }

    Ok(())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    let config = match load_settings(&cli.config_override) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
    };

    init_logging(config.trace_renders);
    let mut session = Session::from_config(&config);

    let result = match cli.command {
        Some(command) => session.execute(command, cli.json),
        None => run_interactive(&mut session, cli.json),
    };

    if let Err(err) = result {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::split_command_line;

    #[test]
    fn split_groups_quoted_words() {
        let args = split_command_line(r#"create "Buy milk" --json"#).unwrap();
        assert_eq!(args, vec!["create", "Buy milk", "--json"]);
    }

    #[test]
    fn split_keeps_empty_quoted_argument() {
        let args = split_command_line(r#"type """#).unwrap();
        assert_eq!(args, vec!["type", ""]);
    }

    #[test]
    fn split_handles_escaped_quotes() {
        let args = split_command_line(r#"create "say \"hi\"""#).unwrap();
        assert_eq!(args, vec!["create", "say \"hi\""]);
    }

    #[test]
    fn split_rejects_unterminated_quote() {
        let err = split_command_line(r#"create "oops"#).unwrap_err();
        assert_eq!(err.code(), "invalid_input");
    }
}
