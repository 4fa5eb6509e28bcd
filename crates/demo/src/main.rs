//! Showcase binary: wires the argot parser to the console help presenter
//! and real process exit, then reports what it parsed.

use anyhow::Result;
use argot::{ArgumentParser, ConsoleHelp, OptionSpec, Selection, SystemExit, ValueArity};
use tracing_subscriber::{EnvFilter, fmt};

fn build_parser() -> Result<ArgumentParser> {
    let mut parser = ArgumentParser::new();
    parser.add_option(
        OptionSpec::new("--input")
            .value_name("input")
            .arity(ValueArity::Required)
            .required(true)
            .help("Input file to read"),
    )?;
    parser.add_option(
        OptionSpec::new("--output")
            .value_name("output")
            .arity(ValueArity::Optional)
            .default_value("-")
            .help("Output destination"),
    )?;
    parser.add_option(
        OptionSpec::new("--tag")
            .value_name("tag")
            .arity(ValueArity::Required)
            .selection(Selection::TakeAll)
            .observer(|value| tracing::debug!(tag = value, "tag observed"))
            .help("Tag to apply; may repeat"),
    )?;
    parser.add_option(
        OptionSpec::new("--verbose")
            .arity(ValueArity::None)
            .help("Chatty output"),
    )?;
    Ok(parser)
}

fn main() -> Result<()> {
    init_tracing();

    let argv: Vec<String> = std::env::args().collect();
    let mut parser = build_parser()?;
    parser.run(&argv, &mut ConsoleHelp, &mut SystemExit)?;

    for (key, option) in parser.parsed_options() {
        println!("{key} (from {}): {:?}", option.flag(), option.values());
    }
    if !parser.positional_arguments().is_empty() {
        println!("positional: {:?}", parser.positional_arguments());
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
