//! The argument scan loop and its query surface.

use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::warn;

use crate::error::{Error, Result};
use crate::help::{HelpPresenter, ProcessExit};
use crate::registry::{HELP_FLAG, OptionRegistry, normalize_flag};
use crate::spec::{OptionSpec, Selection, ValueArity};
use crate::value::OptionValue;

/// How a completed scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Every token was examined; results are available.
    Complete,
    /// `--help` was seen. Remaining tokens were not examined and the caller
    /// should present help and terminate successfully.
    HelpRequested,
}

/// Declares option flags and parses argument vectors against them.
///
/// Declarations are added up front with [`add_option`](Self::add_option);
/// [`parse_arguments`](Self::parse_arguments) then scans an `argv`-style
/// slice (index 0 is the program name) and fills the parsed-option map and
/// the positional-argument list. Results accumulate across parses until
/// [`clear`](Self::clear).
///
/// The parser has value semantics: it can be cloned and moved freely, but a
/// single instance is not meant for concurrent use.
#[derive(Debug, Clone, Default)]
pub struct ArgumentParser {
    registry: OptionRegistry,
    parsed: IndexMap<String, OptionValue>,
    positionals: Vec<String>,
}

impl ArgumentParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an option declaration. See [`OptionRegistry::add_option`].
    pub fn add_option(&mut self, spec: OptionSpec) -> Result<()> {
        self.registry.add_option(spec)
    }

    pub fn registry(&self) -> &OptionRegistry {
        &self.registry
    }

    /// Drop parsed options, positional arguments, and required-flag seen
    /// state. Declarations are kept.
    pub fn clear(&mut self) {
        self.registry.reset_seen();
        self.parsed.clear();
        self.positionals.clear();
    }

    /// Scan `argv` against the registered declarations.
    ///
    /// `argv[0]` is taken as the program's invocation name and never
    /// examined for flag syntax. Unknown flags are reported through the
    /// diagnostic channel and skipped; the scan never aborts on them.
    /// After a complete scan, required flags that never appeared produce
    /// [`Error::MissingRequiredOption`] with the flags in registration
    /// order.
    pub fn parse_arguments<S: AsRef<str>>(&mut self, argv: &[S]) -> Result<ParseOutcome> {
        let mut index = 1;
        while index < argv.len() {
            let token = argv[index].as_ref();
            index += 1;

            if !token.starts_with("--") {
                self.positionals.push(token.to_string());
                continue;
            }
            if token.eq_ignore_ascii_case(HELP_FLAG) {
                return Ok(ParseOutcome::HelpRequested);
            }
            let Some(spec) = self.registry.spec(token) else {
                warn!(flag = token, "unknown option flag");
                continue;
            };

            let arity = spec.arity_mode();
            let selection = spec.selection_policy();
            let flag = spec.flag_str().to_string();
            let key = spec.storage_key().to_string();
            let value_name = spec.value_name_str().unwrap_or("").to_string();
            let default_value = spec.default_value_str().to_string();
            let observer = spec.observer.clone();

            let next = argv.get(index).map(AsRef::as_ref);
            let value = match arity {
                ValueArity::None => None,
                ValueArity::Optional => match next {
                    Some(next) if !next.starts_with("--") => {
                        index += 1;
                        Some(next.to_string())
                    }
                    _ => Some(default_value.clone()),
                },
                ValueArity::Required => match next {
                    // The value token is consumed unconditionally, even if
                    // it looks like a flag.
                    Some(next) => {
                        index += 1;
                        Some(next.to_string())
                    }
                    None => {
                        // Soft-skip: the occurrence counts as seen but
                        // contributes no value and is not observed.
                        warn!(flag = token, "required value not present for option");
                        self.registry.mark_seen(&flag);
                        continue;
                    }
                },
            };

            match self.parsed.entry(key) {
                Entry::Vacant(slot) => {
                    let mut collected = OptionValue::new(flag.clone(), value_name);
                    if let Some(value) = &value {
                        collected.push(value.clone());
                    }
                    slot.insert(collected);
                }
                Entry::Occupied(mut slot) => {
                    if let Some(value) = &value {
                        match selection {
                            Selection::TakeFirst => {}
                            Selection::TakeLast => slot.get_mut().replace(value.clone()),
                            Selection::TakeAll => slot.get_mut().push(value.clone()),
                        }
                    }
                }
            }

            if let Some(observer) = &observer {
                observer(value.as_deref().unwrap_or(&default_value));
            }
            self.registry.mark_seen(&flag);
        }

        let missing = self.registry.missing_required();
        if !missing.is_empty() {
            return Err(Error::MissingRequiredOption(missing));
        }
        Ok(ParseOutcome::Complete)
    }

    /// Scan a nullable argument vector, the sized rendition of a C-style
    /// sentinel-terminated `argv`.
    ///
    /// A trailing `None` is accepted as the conventional terminator. Any
    /// `None` before the last present slot is a hole: the whole parse fails
    /// with [`Error::MalformedArgumentList`] and every derived result
    /// (parsed options, positionals, required-seen state) is discarded.
    /// Declarations survive.
    pub fn parse_raw_arguments<S: AsRef<str>>(&mut self, argv: &[Option<S>]) -> Result<ParseOutcome> {
        let body = match argv.split_last() {
            Some((None, body)) => body,
            _ => argv,
        };
        if body.iter().any(Option::is_none) {
            self.clear();
            return Err(Error::MalformedArgumentList);
        }
        let tokens: Vec<&str> = body.iter().flatten().map(AsRef::as_ref).collect();
        self.parse_arguments(&tokens)
    }

    /// Parse and delegate terminal outcomes to the collaborators.
    ///
    /// On [`ParseOutcome::HelpRequested`] the presenter renders help and the
    /// exit collaborator is invoked with status 0. On missing required
    /// options the presenter reports them and the exit collaborator is
    /// invoked with status 1; the error is still returned for exit
    /// collaborators that merely record the request. Callers that want
    /// missing-required as a recoverable condition use
    /// [`parse_arguments`](Self::parse_arguments) directly instead.
    pub fn run<S: AsRef<str>>(
        &mut self,
        argv: &[S],
        presenter: &mut dyn HelpPresenter,
        exit: &mut dyn ProcessExit,
    ) -> Result<ParseOutcome> {
        let program = argv.first().map(|s| s.as_ref()).unwrap_or("").to_string();
        match self.parse_arguments(argv) {
            Ok(ParseOutcome::HelpRequested) => {
                let specs: Vec<&OptionSpec> = self.registry.specs().collect();
                presenter.help(&program, &specs);
                exit.exit(0);
                Ok(ParseOutcome::HelpRequested)
            }
            Err(Error::MissingRequiredOption(missing)) => {
                let specs: Vec<&OptionSpec> = self.registry.specs().collect();
                presenter.missing(&program, &specs, &missing);
                exit.exit(1);
                Err(Error::MissingRequiredOption(missing))
            }
            other => other,
        }
    }

    /// Whether a parse stored a result for `key`.
    ///
    /// `key` may be a flag spelling (raw spellings are normalized, and the
    /// flag resolves through its declaration to the storage key) or a bare
    /// value name. A flag resolution that stored nothing falls back to the
    /// bare value-name lookup. Unrecognized keys answer `false`.
    pub fn has_parsed_option(&self, key: &str) -> bool {
        self.parsed_option(key).is_some()
    }

    /// The parsed option for `key` (same key rules as
    /// [`has_parsed_option`](Self::has_parsed_option)).
    pub fn parsed_option(&self, key: &str) -> Option<&OptionValue> {
        if let Ok(flag) = normalize_flag(key) {
            if let Some(spec) = self.registry.spec(&flag) {
                if let Some(value) = self.parsed.get(spec.storage_key()) {
                    return Some(value);
                }
            }
        }
        self.parsed.get(key)
    }

    /// Parsed options keyed by value name (or flag, for no-value flags).
    pub fn parsed_options(&self) -> &IndexMap<String, OptionValue> {
        &self.parsed
    }

    /// Non-option arguments in input order.
    pub fn positional_arguments(&self) -> &[String] {
        &self.positionals
    }
}
