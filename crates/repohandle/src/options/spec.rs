//! Option specifications and the catalog.
//!
//! This module defines the schema for handle options: what kind of value
//! each holds, its compiled-in default, and what clearing it means. Both
//! access facades consult this catalog; neither keeps its own defaults.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::callback::CallbackKind;
use super::enums::{IpResolve, ProxyType, RepoType};
use super::value::OptValue;
use crate::error::{HandleError, Result};

/// The semantic type of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Two-state flag; accepts anything with a truth value.
    Bool,

    /// Integer, optionally bounded by `min`/`max`.
    Int,

    /// String or absent. An empty string is a present value.
    Str,

    /// Ordered strings; absent markers in the input are dropped.
    StringList,

    /// Ordered `(key, value)` string pairs, duplicates allowed.
    PairList,

    /// One member of a fixed set of names.
    Enum(&'static [&'static str]),

    /// Callback reference of the given kind.
    Callback(CallbackKind),

    /// Opaque data handed to a callback.
    Data,
}

impl OptionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKind::Bool => "bool",
            OptionKind::Int => "int",
            OptionKind::Str => "string",
            OptionKind::StringList => "string-list",
            OptionKind::PairList => "pair-list",
            OptionKind::Enum(_) => "enum",
            OptionKind::Callback(_) => "callback",
            OptionKind::Data => "data",
        }
    }

    /// Whether the canonical form has an absent state.
    pub fn can_be_absent(&self) -> bool {
        !matches!(
            self,
            OptionKind::Bool | OptionKind::Int | OptionKind::Enum(_)
        )
    }

    /// The emptiest value of this kind: absent where the kind allows it,
    /// otherwise `false`, `0` or the first set member.
    pub fn empty_value(&self) -> OptValue {
        match self {
            OptionKind::Bool => OptValue::Bool(false),
            OptionKind::Int => OptValue::Int(0),
            OptionKind::Enum(set) => OptValue::Enum(set.first().copied().unwrap_or_default()),
            OptionKind::Str => OptValue::Str(None),
            OptionKind::StringList => OptValue::List(None),
            OptionKind::PairList => OptValue::Pairs(None),
            OptionKind::Callback(_) => OptValue::Callback(None),
            OptionKind::Data => OptValue::Data(None),
        }
    }
}

/// Compiled-in default, in a form that can live in a `const` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Bool(bool),
    Int(i64),
    Enum(&'static str),
    /// Present but empty list.
    EmptyList,
    Absent,
}

/// Specification for a single option.
#[derive(Debug, Clone)]
pub struct OptionSpec {
    /// Stable identifier, shared by the attribute facade (e.g. "urls")
    pub name: &'static str,

    pub kind: OptionKind,

    pub default: DefaultValue,

    /// Whether clearing restores `default` rather than the absent state.
    ///
    /// Always true for kinds with no absent state.
    pub clear_restores_default: bool,

    /// Inclusive lower bound for `Int` options.
    pub min: Option<i64>,

    /// Inclusive upper bound for `Int` options.
    pub max: Option<i64>,

    pub about: &'static str,
}

impl OptionSpec {
    const fn new(name: &'static str, kind: OptionKind, default: DefaultValue) -> Self {
        Self {
            name,
            kind,
            default,
            clear_restores_default: true,
            min: None,
            max: None,
            about: "",
        }
    }

    const fn flag(name: &'static str, default: bool) -> Self {
        Self::new(name, OptionKind::Bool, DefaultValue::Bool(default))
    }

    const fn int(name: &'static str, default: i64) -> Self {
        Self::new(name, OptionKind::Int, DefaultValue::Int(default))
    }

    const fn string(name: &'static str) -> Self {
        Self::new(name, OptionKind::Str, DefaultValue::Absent).clears_to_absent()
    }

    const fn list(name: &'static str) -> Self {
        Self::new(name, OptionKind::StringList, DefaultValue::Absent).clears_to_absent()
    }

    const fn pairs(name: &'static str) -> Self {
        Self::new(name, OptionKind::PairList, DefaultValue::Absent).clears_to_absent()
    }

    const fn choice(
        name: &'static str,
        set: &'static [&'static str],
        default: &'static str,
    ) -> Self {
        Self::new(name, OptionKind::Enum(set), DefaultValue::Enum(default))
    }

    const fn callback(name: &'static str, kind: CallbackKind) -> Self {
        Self::new(name, OptionKind::Callback(kind), DefaultValue::Absent).clears_to_absent()
    }

    const fn data(name: &'static str) -> Self {
        Self::new(name, OptionKind::Data, DefaultValue::Absent).clears_to_absent()
    }

    const fn clears_to_absent(mut self) -> Self {
        self.clear_restores_default = false;
        self
    }

    /// Default to a present empty list, and clear back to it.
    const fn defaults_to_empty(mut self) -> Self {
        self.default = DefaultValue::EmptyList;
        self.clear_restores_default = true;
        self
    }

    const fn at_least(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    const fn at_most(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }

    const fn about(mut self, about: &'static str) -> Self {
        self.about = about;
        self
    }

    /// The default in canonical form.
    pub fn default_value(&self) -> OptValue {
        match self.default {
            DefaultValue::Bool(v) => OptValue::Bool(v),
            DefaultValue::Int(v) => OptValue::Int(v),
            DefaultValue::Enum(v) => OptValue::Enum(v),
            DefaultValue::EmptyList => OptValue::List(Some(Vec::new())),
            DefaultValue::Absent => self.kind.empty_value(),
        }
    }

    /// What the option holds after being cleared.
    ///
    /// Kinds with no absent state always clear to their default.
    pub fn clear_value(&self) -> OptValue {
        if self.clear_restores_default || !self.kind.can_be_absent() {
            return self.default_value();
        }
        self.kind.empty_value()
    }
}

/// Registry of all handle options.
///
/// This is the single source of truth for option metadata. Order here is
/// the order of [`all_names`] and of the store's slots.
pub const OPTIONS: &[OptionSpec] = &[
    OptionSpec::flag("update", false)
        .about("Update existing repo data in destdir instead of a fresh download"),
    OptionSpec::list("urls")
        .defaults_to_empty()
        .about("Base URLs of the repository"),
    OptionSpec::string("mirrorlist").about("Mirrorlist URL"),
    OptionSpec::string("metalinkurl").about("Metalink URL"),
    OptionSpec::flag("local", false).about("Do not copy local repositories, use them in place"),
    OptionSpec::flag("httpauth", false).about("Enable all supported HTTP auth methods"),
    OptionSpec::string("userpwd").about("\"user:password\" for HTTP auth"),
    OptionSpec::string("proxy").about("Proxy address"),
    OptionSpec::int("proxyport", 1080).at_least(0).at_most(65535),
    OptionSpec::choice("proxytype", ProxyType::NAMES, "http"),
    OptionSpec::flag("proxyauth", false).about("Enable all supported proxy auth methods"),
    OptionSpec::string("proxyuserpwd").about("\"user:password\" for proxy auth"),
    OptionSpec::callback("progresscb", CallbackKind::Progress),
    OptionSpec::data("progressdata").about("Data passed to progresscb and hmfcb"),
    OptionSpec::int("maxspeed", 0)
        .at_least(0)
        .about("Max download speed in bytes/s, 0 is unlimited"),
    OptionSpec::string("destdir").about("Where to save downloaded files"),
    OptionSpec::choice("repotype", RepoType::NAMES, "yum"),
    OptionSpec::int("connecttimeout", 30)
        .at_least(0)
        .about("Connection timeout in seconds"),
    OptionSpec::flag("ignoremissing", false)
        .about("Skip missing metadata files when updating a local repo"),
    OptionSpec::flag("interruptible", false).about("Install a SIGINT handler during downloads"),
    OptionSpec::string("useragent"),
    OptionSpec::flag("fetchmirrors", false).about("Only fetch the mirrorlist/metalink"),
    OptionSpec::int("maxmirrortries", 0)
        .at_least(0)
        .about("Mirrors to try per file, 0 is unlimited"),
    OptionSpec::int("maxparalleldownloads", 3).at_least(1),
    OptionSpec::int("maxdownloadspermirror", 3).at_least(1),
    OptionSpec::pairs("varsub").about("Substitutions for $variables in URLs"),
    OptionSpec::flag("fastestmirror", false).about("Sort mirrors by connection speed"),
    OptionSpec::string("fastestmirrorcache"),
    OptionSpec::int("fastestmirrormaxage", 2_592_000)
        .at_least(0)
        .about("Max age of fastestmirror cache entries in seconds"),
    OptionSpec::callback("fastestmirrorcb", CallbackKind::FastestMirror),
    OptionSpec::data("fastestmirrordata"),
    OptionSpec::int("lowspeedtime", 30).at_least(0),
    OptionSpec::int("lowspeedlimit", 1000).at_least(0),
    OptionSpec::flag("gpgcheck", false).about("Verify repomd.xml signature"),
    OptionSpec::flag("checksum", false).about("Verify metadata checksums"),
    OptionSpec::list("yumdlist").about("Metadata types to download, absent means all"),
    OptionSpec::list("yumblist").about("Metadata types never to download"),
    OptionSpec::callback("hmfcb", CallbackKind::MirrorFailure),
    OptionSpec::flag("sslverifypeer", true),
    OptionSpec::flag("sslverifyhost", true),
    OptionSpec::string("sslclientcert"),
    OptionSpec::string("sslclientkey"),
    OptionSpec::string("sslcacert"),
    OptionSpec::choice("ipresolve", IpResolve::NAMES, "whatever"),
    OptionSpec::int("allowedmirrorfailures", 4)
        .about("Failures after which a mirror without successes is skipped"),
    OptionSpec::int("adaptivemirrorsorting", 1).about("Reorder mirrors by their results"),
    OptionSpec::string("gnupghomedir").about("GnuPG home directory for gpgcheck"),
    OptionSpec::list("httpheader").about("Extra HTTP headers"),
    OptionSpec::flag("offline", false).about("Do not touch the network"),
];

static INDEX: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    OPTIONS
        .iter()
        .enumerate()
        .map(|(i, spec)| (spec.name, i))
        .collect()
});

/// Slot of `name` in [`OPTIONS`].
pub(crate) fn position(name: &str) -> Option<usize> {
    INDEX.get(name).copied()
}

/// Look up an option's catalog entry by name.
pub fn get_spec(name: &str) -> Option<&'static OptionSpec> {
    position(name).map(|i| &OPTIONS[i])
}

/// Like [`get_spec`], failing with `UnknownOption`.
pub fn describe(name: &str) -> Result<&'static OptionSpec> {
    get_spec(name).ok_or_else(|| HandleError::UnknownOption(name.to_string()))
}

/// All option names in catalog order.
pub fn all_names() -> impl Iterator<Item = &'static str> {
    OPTIONS.iter().map(|spec| spec.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = all_names().collect();
        assert_eq!(names.len(), OPTIONS.len());
    }

    #[test]
    fn unknown_option_returns_none() {
        assert!(get_spec("nonexistent").is_none());
        assert!(describe("nonexistent").unwrap_err().is_unknown_option());
    }

    #[test]
    fn kinds_without_absent_state_clear_to_default() {
        for spec in OPTIONS {
            if !spec.kind.can_be_absent() {
                assert!(spec.clear_restores_default, "{}", spec.name);
                assert_ne!(spec.default, DefaultValue::Absent, "{}", spec.name);
                assert_ne!(spec.default, DefaultValue::EmptyList, "{}", spec.name);
            }
        }
    }

    #[test]
    fn defaults_and_clears_match_kind() {
        use std::mem::discriminant;
        for spec in OPTIONS {
            let shape = discriminant(&spec.kind.empty_value());
            assert_eq!(discriminant(&spec.default_value()), shape, "{}", spec.name);
            assert_eq!(discriminant(&spec.clear_value()), shape, "{}", spec.name);
        }
    }

    #[test]
    fn empty_value_never_panics_for_kinds_without_absent_state() {
        assert_eq!(OptionKind::Bool.empty_value(), OptValue::Bool(false));
        assert_eq!(OptionKind::Int.empty_value(), OptValue::Int(0));
        assert_eq!(
            OptionKind::Enum(IpResolve::NAMES).empty_value(),
            OptValue::Enum(IpResolve::NAMES[0])
        );
        assert_eq!(OptionKind::Enum(&[]).empty_value(), OptValue::Enum(""));
        assert_eq!(OptionKind::Str.empty_value(), OptValue::Str(None));
    }

    #[test]
    fn enum_defaults_are_set_members() {
        for spec in OPTIONS {
            if let (OptionKind::Enum(set), DefaultValue::Enum(default)) = (spec.kind, spec.default)
            {
                assert!(set.contains(&default), "{}", spec.name);
            }
        }
    }

    #[test]
    fn int_defaults_are_in_range() {
        for spec in OPTIONS {
            if let DefaultValue::Int(v) = spec.default {
                assert!(spec.min.map_or(true, |min| v >= min), "{}", spec.name);
                assert!(spec.max.map_or(true, |max| v <= max), "{}", spec.name);
            }
        }
    }

    #[test]
    fn urls_spec_is_correct() {
        let spec = get_spec("urls").unwrap();
        assert_eq!(spec.kind, OptionKind::StringList);
        assert_eq!(spec.default_value(), OptValue::List(Some(vec![])));
        assert_eq!(spec.clear_value(), OptValue::List(Some(vec![])));
    }

    #[test]
    fn yumdlist_clears_to_absent() {
        let spec = get_spec("yumdlist").unwrap();
        assert_eq!(spec.kind, OptionKind::StringList);
        assert!(!spec.clear_restores_default);
        assert_eq!(spec.clear_value(), OptValue::List(None));
    }

    #[test]
    fn varsub_clears_to_absent() {
        let spec = get_spec("varsub").unwrap();
        assert_eq!(spec.kind, OptionKind::PairList);
        assert_eq!(spec.clear_value(), OptValue::Pairs(None));
    }

    #[test]
    fn ssl_verification_defaults_on() {
        assert_eq!(
            get_spec("sslverifypeer").unwrap().default_value(),
            OptValue::Bool(true)
        );
        assert_eq!(
            get_spec("sslverifyhost").unwrap().clear_value(),
            OptValue::Bool(true)
        );
    }

    #[test]
    fn mirror_tuning_defaults() {
        assert_eq!(get_spec("maxmirrortries").unwrap().default, DefaultValue::Int(0));
        assert_eq!(
            get_spec("allowedmirrorfailures").unwrap().default,
            DefaultValue::Int(4)
        );
        assert_eq!(
            get_spec("adaptivemirrorsorting").unwrap().default,
            DefaultValue::Int(1)
        );
    }

    #[test]
    fn ipresolve_spec_is_correct() {
        let spec = get_spec("ipresolve").unwrap();
        assert_eq!(spec.kind, OptionKind::Enum(IpResolve::NAMES));
        assert_eq!(spec.default_value(), OptValue::Enum("whatever"));
    }

    #[test]
    fn callback_and_data_are_separate_entries() {
        let cb = get_spec("progresscb").unwrap();
        let data = get_spec("progressdata").unwrap();
        assert_eq!(cb.kind, OptionKind::Callback(CallbackKind::Progress));
        assert_eq!(data.kind, OptionKind::Data);
        assert_eq!(cb.clear_value(), OptValue::Callback(None));
        assert_eq!(data.clear_value(), OptValue::Data(None));
    }

    #[test]
    fn strings_default_to_absent() {
        for name in ["destdir", "useragent", "mirrorlist", "gnupghomedir"] {
            let spec = get_spec(name).unwrap();
            assert_eq!(spec.default_value(), OptValue::Str(None), "{}", name);
            assert!(!spec.clear_restores_default, "{}", name);
        }
    }
}
