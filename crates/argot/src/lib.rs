//! Declarative command-line option parsing.
//!
//! `argot` declares `--flag` options up front, each with a value arity
//! (none / optional / required), a multi-occurrence selection policy
//! (first / last / all), and an optional value observer. It then scans an
//! `argv`-style token list against those declarations. Parsed values are
//! retrieved by value name, no-value flags by their flag string, and
//! everything that is not a flag is collected as a positional argument in
//! input order.
//!
//! Help rendering and process exit are collaborator seams
//! ([`HelpPresenter`], [`ProcessExit`]); the core only signals outcomes
//! through [`Result`] values. Unknown flags are diagnostics, not errors:
//! they are reported through `tracing` and skipped.
//!
//! ```
//! use argot::{ArgumentParser, OptionSpec, ValueArity};
//!
//! let mut parser = ArgumentParser::new();
//! parser.add_option(
//!     OptionSpec::new("--input")
//!         .value_name("input")
//!         .arity(ValueArity::Required)
//!         .required(true),
//! )?;
//! parser.add_option(OptionSpec::new("verbose").arity(ValueArity::None))?;
//!
//! let argv = ["demo", "--input", "data.txt", "--verbose", "extra"];
//! parser.parse_arguments(&argv)?;
//!
//! assert!(parser.has_parsed_option("--verbose"));
//! assert_eq!(parser.parsed_options()["input"].value(0)?, "data.txt");
//! assert_eq!(parser.positional_arguments(), ["extra"]);
//! # Ok::<(), argot::Error>(())
//! ```

mod error;
mod help;
mod parser;
mod registry;
mod spec;
mod value;

pub use error::{Error, Result};
pub use help::{ConsoleHelp, HelpPresenter, ProcessExit, SystemExit, render_help, render_missing};
pub use parser::{ArgumentParser, ParseOutcome};
pub use registry::OptionRegistry;
pub use spec::{OptionSpec, Selection, ValueArity, ValueObserver};
pub use value::{FromArgStr, OptionValue};
