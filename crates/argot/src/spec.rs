//! Option declarations.

use std::fmt;
use std::sync::Arc;

/// Whether a flag consumes a value token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueArity {
    /// The flag never takes a value.
    None,
    /// The next token is consumed when it is not itself a flag token;
    /// otherwise the spec's default value is used.
    #[default]
    Optional,
    /// The next token is always consumed, even if it looks like a flag.
    Required,
}

/// How repeated occurrences of the same flag are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Keep the value from the first occurrence.
    TakeFirst,
    /// Keep the value from the last occurrence.
    #[default]
    TakeLast,
    /// Keep every value, in scan order.
    TakeAll,
}

/// Callback invoked synchronously with each resolved value, in scan order.
pub type ValueObserver = Arc<dyn Fn(&str) + Send + Sync>;

/// One declared option flag.
///
/// Built with chained setters and handed to
/// [`ArgumentParser::add_option`](crate::ArgumentParser::add_option), which
/// normalizes the flag spelling and enforces the collision rules. Immutable
/// once registered.
///
/// ```
/// use argot::{OptionSpec, Selection, ValueArity};
///
/// let spec = OptionSpec::new("tag")
///     .value_name("tag")
///     .arity(ValueArity::Required)
///     .selection(Selection::TakeAll)
///     .help("Tag to apply; may repeat");
/// ```
#[derive(Clone)]
pub struct OptionSpec {
    pub(crate) flag: String,
    pub(crate) value_name: Option<String>,
    pub(crate) arity: ValueArity,
    pub(crate) selection: Selection,
    pub(crate) default_value: String,
    pub(crate) help: String,
    pub(crate) required: bool,
    pub(crate) observer: Option<ValueObserver>,
}

impl OptionSpec {
    /// Start a declaration from a raw flag spelling.
    ///
    /// The spelling is normalized to its canonical `--`-prefixed form at
    /// registration time; `"verbose"`, `"-verbose"`, and `"--verbose"` all
    /// declare `--verbose`.
    pub fn new(flag: impl Into<String>) -> Self {
        Self {
            flag: flag.into(),
            value_name: None,
            arity: ValueArity::default(),
            selection: Selection::default(),
            default_value: String::new(),
            help: String::new(),
            required: false,
            observer: None,
        }
    }

    /// Name under which parsed values are retrieved. Mandatory for
    /// [`ValueArity::Optional`] and [`ValueArity::Required`] flags, and
    /// must be unique across the registry.
    pub fn value_name(mut self, name: impl Into<String>) -> Self {
        self.value_name = Some(name.into());
        self
    }

    pub fn arity(mut self, arity: ValueArity) -> Self {
        self.arity = arity;
        self
    }

    pub fn selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Value used when an [`ValueArity::Optional`] flag appears without one.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Whether a parse must see this flag to complete.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Observer called with the resolved value of every occurrence.
    pub fn observer(mut self, observer: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// The canonical flag string (stable once registered).
    pub fn flag_str(&self) -> &str {
        &self.flag
    }

    pub fn value_name_str(&self) -> Option<&str> {
        self.value_name.as_deref()
    }

    pub fn arity_mode(&self) -> ValueArity {
        self.arity
    }

    pub fn selection_policy(&self) -> Selection {
        self.selection
    }

    pub fn default_value_str(&self) -> &str {
        &self.default_value
    }

    pub fn help_str(&self) -> &str {
        &self.help
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Key the parsed values are stored under: the value name when the flag
    /// takes one, the canonical flag string otherwise.
    pub(crate) fn storage_key(&self) -> &str {
        self.value_name.as_deref().unwrap_or(&self.flag)
    }
}

impl fmt::Debug for OptionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionSpec")
            .field("flag", &self.flag)
            .field("value_name", &self.value_name)
            .field("arity", &self.arity)
            .field("selection", &self.selection)
            .field("default_value", &self.default_value)
            .field("help", &self.help)
            .field("required", &self.required)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}
