//! The flag-declaration table: normalization and collision rules.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::spec::{OptionSpec, ValueArity};

/// Reserved flag that short-circuits parsing into help presentation.
pub(crate) const HELP_FLAG: &str = "--help";

/// Normalize a raw flag spelling to its canonical `--`-prefixed form.
///
/// Already-prefixed spellings pass through unchanged, so normalization is
/// idempotent. A spelling that is nothing but dashes has no name to match
/// and is rejected.
pub(crate) fn normalize_flag(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(Error::InvalidOption("option flag is empty".to_string()));
    }
    let flag = if raw.starts_with("--") {
        raw.to_string()
    } else if raw.starts_with('-') {
        format!("-{raw}")
    } else {
        format!("--{raw}")
    };
    if flag.len() <= 2 {
        return Err(Error::InvalidOption(format!(
            "option flag \"{raw}\" must have more than just the prefix"
        )));
    }
    Ok(flag)
}

/// Declared options, the value names they claim, and required-flag tracking.
///
/// Declarations accumulate through [`add_option`](Self::add_option) and are
/// never removed; only the derived seen-state is reset between parses.
#[derive(Debug, Clone, Default)]
pub struct OptionRegistry {
    specs: IndexMap<String, OptionSpec>,
    value_names: HashMap<String, String>,
    required_seen: IndexMap<String, bool>,
}

impl OptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declaration, normalizing its flag spelling and enforcing
    /// the uniqueness rules.
    ///
    /// The canonical flag, the claimed value names, and the keys of the
    /// parsed-option map all share one namespace discipline: a value name
    /// may not collide with another option's value name, nor with a
    /// no-value flag (which is keyed by its flag string), and vice versa.
    pub fn add_option(&mut self, mut spec: OptionSpec) -> Result<()> {
        let flag = normalize_flag(&spec.flag)?;
        if flag.eq_ignore_ascii_case(HELP_FLAG) {
            return Err(Error::InvalidOption(format!(
                "\"{flag}\" is reserved for help presentation"
            )));
        }

        match spec.arity {
            ValueArity::None => {
                if let Some(name) = &spec.value_name {
                    return Err(Error::InvalidOption(format!(
                        "option \"{flag}\" takes no value but declares the value name \"{name}\""
                    )));
                }
                if let Some(owner) = self.value_names.get(&flag) {
                    return Err(Error::InvalidOption(format!(
                        "option \"{flag}\" collides with the value name claimed by \"{owner}\""
                    )));
                }
            }
            ValueArity::Optional | ValueArity::Required => {
                let name = spec.value_name.as_deref().unwrap_or("");
                if name.is_empty() {
                    return Err(Error::InvalidOption(format!(
                        "option \"{flag}\" takes a value but has no value name"
                    )));
                }
                if let Some(owner) = self.value_names.get(name) {
                    return Err(Error::InvalidOption(format!(
                        "value name \"{name}\" is already claimed by \"{owner}\""
                    )));
                }
                if self
                    .specs
                    .get(name)
                    .is_some_and(|other| other.arity == ValueArity::None)
                {
                    return Err(Error::InvalidOption(format!(
                        "value name \"{name}\" collides with the no-value option \"{name}\""
                    )));
                }
            }
        }

        if self.specs.contains_key(&flag) {
            return Err(Error::InvalidOption(format!(
                "the handler for option \"{flag}\" is already defined"
            )));
        }

        spec.flag = flag.clone();
        if let Some(name) = &spec.value_name {
            self.value_names.insert(name.clone(), flag.clone());
        }
        if spec.required {
            self.required_seen.insert(flag.clone(), false);
        }
        self.specs.insert(flag, spec);
        Ok(())
    }

    /// Look up a declaration by its canonical flag string.
    pub fn spec(&self, flag: &str) -> Option<&OptionSpec> {
        self.specs.get(flag)
    }

    /// All declarations, in registration order.
    pub fn specs(&self) -> impl Iterator<Item = &OptionSpec> {
        self.specs.values()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub(crate) fn mark_seen(&mut self, flag: &str) {
        if let Some(seen) = self.required_seen.get_mut(flag) {
            *seen = true;
        }
    }

    pub(crate) fn reset_seen(&mut self) {
        for seen in self.required_seen.values_mut() {
            *seen = false;
        }
    }

    /// Required flags not seen by the current parse, in registration order.
    pub(crate) fn missing_required(&self) -> Vec<String> {
        self.required_seen
            .iter()
            .filter(|(_, seen)| !**seen)
            .map(|(flag, _)| flag.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::Selection;

    #[test]
    fn normalization_produces_canonical_double_dash() {
        assert_eq!(normalize_flag("name").unwrap(), "--name");
        assert_eq!(normalize_flag("-name").unwrap(), "--name");
        assert_eq!(normalize_flag("--name").unwrap(), "--name");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_flag("verbose").unwrap();
        assert_eq!(normalize_flag(&once).unwrap(), once);
    }

    #[test]
    fn prefix_only_flags_are_rejected() {
        assert!(matches!(normalize_flag(""), Err(Error::InvalidOption(_))));
        assert!(matches!(normalize_flag("-"), Err(Error::InvalidOption(_))));
        assert!(matches!(normalize_flag("--"), Err(Error::InvalidOption(_))));
    }

    #[test]
    fn single_character_flags_normalize() {
        assert_eq!(normalize_flag("-v").unwrap(), "--v");
        assert_eq!(normalize_flag("v").unwrap(), "--v");
    }

    #[test]
    fn help_is_reserved_case_insensitively() {
        for raw in ["--help", "--HELP", "help", "-Help"] {
            let mut registry = OptionRegistry::new();
            let err = registry
                .add_option(OptionSpec::new(raw).arity(ValueArity::None))
                .unwrap_err();
            assert!(matches!(err, Error::InvalidOption(_)), "raw = {raw}");
        }
    }

    #[test]
    fn duplicate_flag_is_rejected() {
        let mut registry = OptionRegistry::new();
        registry
            .add_option(OptionSpec::new("--verbose").arity(ValueArity::None))
            .unwrap();
        let err = registry
            .add_option(OptionSpec::new("verbose").arity(ValueArity::None))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOption(_)));
    }

    #[test]
    fn value_name_claimed_twice_is_rejected() {
        let mut registry = OptionRegistry::new();
        registry
            .add_option(OptionSpec::new("--input").value_name("path"))
            .unwrap();
        let err = registry
            .add_option(OptionSpec::new("--output").value_name("path"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOption(_)));
    }

    #[test]
    fn value_name_may_not_shadow_a_no_value_flag() {
        let mut registry = OptionRegistry::new();
        registry
            .add_option(OptionSpec::new("--verbose").arity(ValueArity::None))
            .unwrap();
        // A no-value flag is keyed by its flag string, so a value name equal
        // to that string would collide in the parsed-option map.
        let err = registry
            .add_option(OptionSpec::new("--level").value_name("--verbose"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOption(_)));
    }

    #[test]
    fn no_value_flag_may_not_shadow_a_value_name() {
        let mut registry = OptionRegistry::new();
        registry
            .add_option(OptionSpec::new("--input").value_name("--trace"))
            .unwrap();
        let err = registry
            .add_option(OptionSpec::new("--trace").arity(ValueArity::None))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOption(_)));
    }

    #[test]
    fn value_taking_flag_requires_a_value_name() {
        let mut registry = OptionRegistry::new();
        for arity in [ValueArity::Optional, ValueArity::Required] {
            let err = registry
                .add_option(OptionSpec::new("--input").arity(arity))
                .unwrap_err();
            assert!(matches!(err, Error::InvalidOption(_)));
        }
    }

    #[test]
    fn no_value_flag_rejects_a_value_name() {
        let mut registry = OptionRegistry::new();
        let err = registry
            .add_option(
                OptionSpec::new("--quiet")
                    .arity(ValueArity::None)
                    .value_name("quiet"),
            )
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOption(_)));
    }

    #[test]
    fn registration_preserves_order_and_fields() {
        let mut registry = OptionRegistry::new();
        registry
            .add_option(
                OptionSpec::new("b")
                    .value_name("bee")
                    .selection(Selection::TakeAll)
                    .required(true),
            )
            .unwrap();
        registry
            .add_option(OptionSpec::new("a").arity(ValueArity::None))
            .unwrap();

        let flags: Vec<&str> = registry.specs().map(|s| s.flag_str()).collect();
        assert_eq!(flags, ["--b", "--a"]);
        let spec = registry.spec("--b").unwrap();
        assert_eq!(spec.value_name_str(), Some("bee"));
        assert_eq!(spec.selection_policy(), Selection::TakeAll);
        assert!(spec.is_required());
        assert_eq!(registry.missing_required(), ["--b"]);
    }
}
