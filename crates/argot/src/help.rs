//! Help and exit collaborators.
//!
//! The parsing core never formats text or terminates the process itself; it
//! hands terminal outcomes to these seams. `ConsoleHelp` and `SystemExit`
//! are the stock implementations a binary wires in; tests substitute
//! recording doubles.

use crate::spec::{OptionSpec, ValueArity};

/// Renders help and missing-option reports on behalf of the parser driver.
pub trait HelpPresenter {
    fn help(&mut self, program: &str, options: &[&OptionSpec]);
    fn missing(&mut self, program: &str, options: &[&OptionSpec], missing: &[String]);
}

/// Carries out (or records) an exit request from the parser driver.
pub trait ProcessExit {
    fn exit(&mut self, code: i32);
}

fn option_left(spec: &OptionSpec) -> String {
    match spec.value_name_str() {
        Some(name) => format!("{} <{}>", spec.flag_str(), name.to_ascii_uppercase()),
        None => spec.flag_str().to_string(),
    }
}

fn option_help(spec: &OptionSpec) -> String {
    let mut out = spec.help_str().trim().to_string();
    if spec.is_required() {
        if out.is_empty() {
            out.push_str("required");
        } else {
            out.push_str(" (required)");
        }
    }
    if spec.arity_mode() == ValueArity::Optional && !spec.default_value_str().is_empty() {
        if out.is_empty() {
            out.push_str(&format!("[default: {}]", spec.default_value_str()));
        } else {
            out.push_str(&format!(" [default: {}]", spec.default_value_str()));
        }
    }
    out
}

/// Render the option table as a string with aligned columns.
pub fn render_help(program: &str, options: &[&OptionSpec]) -> String {
    let mut out = format!("Usage: {program} [OPTIONS] [ARGS]...\n");

    let mut rows: Vec<(String, String)> = options
        .iter()
        .map(|spec| (option_left(spec), option_help(spec)))
        .collect();
    rows.push(("--help".to_string(), "Show this help".to_string()));

    out.push_str("\nOptions:\n");
    let width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);
    for (left, help) in rows {
        if help.is_empty() {
            out.push_str(&format!("  {left}\n"));
        } else {
            out.push_str(&format!("  {left:width$}  {help}\n"));
        }
    }
    out
}

/// Render the missing-required-options report as a string.
pub fn render_missing(program: &str, missing: &[String]) -> String {
    let mut out = format!("{program}: missing option arguments:\n");
    for flag in missing {
        out.push_str(&format!("\t{flag}\n"));
    }
    out
}

/// Help output on stderr with a two-column aligned option table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleHelp;

impl HelpPresenter for ConsoleHelp {
    fn help(&mut self, program: &str, options: &[&OptionSpec]) {
        eprint!("{}", render_help(program, options));
    }

    fn missing(&mut self, program: &str, options: &[&OptionSpec], missing: &[String]) {
        eprint!("{}", render_missing(program, missing));
        eprint!("{}", render_help(program, options));
    }
}

/// Exits the current process with the requested status.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExit;

impl ProcessExit for SystemExit {
    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}
