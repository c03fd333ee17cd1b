//! Option values: what callers pass in and what the store keeps.
//!
//! [`Input`] is the loosely-shaped value a caller hands to either facade.
//! [`OptValue`] is the canonical form stored per option, one variant per
//! semantic kind. Coercion from one to the other lives in `coerce.rs`.

use serde::ser::{Serialize, Serializer};

use super::callback::{same_data, Callback, UserData};
use super::enums::{IpResolve, ProxyType, RepoType};

/// Canonical representation of an option's current setting.
///
/// Kinds that can be absent carry an `Option`; `Bool`, `Int` and `Enum`
/// always hold a value (clearing them restores the catalog default).
#[derive(Debug, Clone)]
pub enum OptValue {
    Bool(bool),
    Int(i64),
    Str(Option<String>),
    List(Option<Vec<String>>),
    Pairs(Option<Vec<(String, String)>>),
    /// Member of the option's fixed set, by its canonical name.
    Enum(&'static str),
    Callback(Option<Callback>),
    Data(Option<UserData>),
}

impl OptValue {
    /// Loose truthiness, used by callers probing "is anything set".
    ///
    /// - Bool: the value itself
    /// - Int: non-zero
    /// - Str / List / Pairs: present and non-empty
    /// - Enum: always true
    /// - Callback / Data: present
    pub fn is_truthy(&self) -> bool {
        match self {
            OptValue::Bool(v) => *v,
            OptValue::Int(v) => *v != 0,
            OptValue::Str(v) => v.as_deref().is_some_and(|s| !s.is_empty()),
            OptValue::List(v) => v.as_ref().is_some_and(|l| !l.is_empty()),
            OptValue::Pairs(v) => v.as_ref().is_some_and(|l| !l.is_empty()),
            OptValue::Enum(_) => true,
            OptValue::Callback(v) => v.is_some(),
            OptValue::Data(v) => v.is_some(),
        }
    }

    /// True when an absent-capable value holds nothing.
    pub fn is_absent(&self) -> bool {
        matches!(
            self,
            OptValue::Str(None)
                | OptValue::List(None)
                | OptValue::Pairs(None)
                | OptValue::Callback(None)
                | OptValue::Data(None)
        )
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            OptValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The string, if this is a present `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptValue::Str(v) => v.as_deref(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            OptValue::List(Some(v)) => Some(v),
            _ => None,
        }
    }

    pub fn as_pairs(&self) -> Option<&[(String, String)]> {
        match self {
            OptValue::Pairs(Some(v)) => Some(v),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&'static str> {
        match self {
            OptValue::Enum(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_callback(&self) -> Option<&Callback> {
        match self {
            OptValue::Callback(v) => v.as_ref(),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&UserData> {
        match self {
            OptValue::Data(v) => v.as_ref(),
            _ => None,
        }
    }
}

impl PartialEq for OptValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (OptValue::Bool(a), OptValue::Bool(b)) => a == b,
            (OptValue::Int(a), OptValue::Int(b)) => a == b,
            (OptValue::Str(a), OptValue::Str(b)) => a == b,
            (OptValue::List(a), OptValue::List(b)) => a == b,
            (OptValue::Pairs(a), OptValue::Pairs(b)) => a == b,
            (OptValue::Enum(a), OptValue::Enum(b)) => a == b,
            (OptValue::Callback(a), OptValue::Callback(b)) => a == b,
            (OptValue::Data(a), OptValue::Data(b)) => match (a, b) {
                (Some(a), Some(b)) => same_data(a, b),
                (None, None) => true,
                _ => false,
            },
            _ => false,
        }
    }
}

// Callbacks and opaque data are never inspected; they serialize as "is set".
impl Serialize for OptValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OptValue::Bool(v) => serializer.serialize_bool(*v),
            OptValue::Int(v) => serializer.serialize_i64(*v),
            OptValue::Str(v) => v.serialize(serializer),
            OptValue::List(v) => v.serialize(serializer),
            OptValue::Pairs(v) => v.serialize(serializer),
            OptValue::Enum(v) => serializer.serialize_str(v),
            OptValue::Callback(v) => serializer.serialize_bool(v.is_some()),
            OptValue::Data(v) => serializer.serialize_bool(v.is_some()),
        }
    }
}

/// A caller-supplied value, before coercion.
///
/// `Absent` is the "no value" marker: as a whole input it clears the option,
/// inside a string list it is dropped.
#[derive(Debug, Clone, Default)]
pub enum Input {
    #[default]
    Absent,
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<Input>),
    /// Fixed-length group, e.g. a `(name, value)` substitution pair.
    Tuple(Vec<Input>),
    Callback(Callback),
    Data(UserData),
}

impl Input {
    pub fn is_absent(&self) -> bool {
        matches!(self, Input::Absent)
    }

    /// Short description of the input's shape for error messages.
    pub(crate) fn shape(&self) -> &'static str {
        match self {
            Input::Absent => "absent",
            Input::Bool(_) => "bool",
            Input::Int(_) => "integer",
            Input::Str(_) => "string",
            Input::List(_) => "list",
            Input::Tuple(_) => "tuple",
            Input::Callback(_) => "callback",
            Input::Data(_) => "opaque data",
        }
    }
}

impl From<bool> for Input {
    fn from(v: bool) -> Self {
        Input::Bool(v)
    }
}

impl From<i64> for Input {
    fn from(v: i64) -> Self {
        Input::Int(v)
    }
}

impl From<i32> for Input {
    fn from(v: i32) -> Self {
        Input::Int(i64::from(v))
    }
}

impl From<u32> for Input {
    fn from(v: u32) -> Self {
        Input::Int(i64::from(v))
    }
}

impl From<u16> for Input {
    fn from(v: u16) -> Self {
        Input::Int(i64::from(v))
    }
}

impl From<&str> for Input {
    fn from(v: &str) -> Self {
        Input::Str(v.to_string())
    }
}

impl From<String> for Input {
    fn from(v: String) -> Self {
        Input::Str(v)
    }
}

impl From<&String> for Input {
    fn from(v: &String) -> Self {
        Input::Str(v.clone())
    }
}

impl<T: Into<Input>> From<Option<T>> for Input {
    fn from(v: Option<T>) -> Self {
        v.map_or(Input::Absent, Into::into)
    }
}

impl<T: Into<Input>> From<Vec<T>> for Input {
    fn from(v: Vec<T>) -> Self {
        Input::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Input>, const N: usize> From<[T; N]> for Input {
    fn from(v: [T; N]) -> Self {
        Input::List(v.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<Input>, B: Into<Input>> From<(A, B)> for Input {
    fn from((a, b): (A, B)) -> Self {
        Input::Tuple(vec![a.into(), b.into()])
    }
}

impl From<Callback> for Input {
    fn from(v: Callback) -> Self {
        Input::Callback(v)
    }
}

impl From<UserData> for Input {
    fn from(v: UserData) -> Self {
        Input::Data(v)
    }
}

impl From<IpResolve> for Input {
    fn from(v: IpResolve) -> Self {
        Input::Str(v.as_str().to_string())
    }
}

impl From<RepoType> for Input {
    fn from(v: RepoType) -> Self {
        Input::Str(v.as_str().to_string())
    }
}

impl From<ProxyType> for Input {
    fn from(v: ProxyType) -> Self {
        Input::Str(v.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::callback::{user_data, CbStatus};

    #[test]
    fn is_truthy_for_scalars() {
        assert!(OptValue::Bool(true).is_truthy());
        assert!(!OptValue::Bool(false).is_truthy());
        assert!(OptValue::Int(4).is_truthy());
        assert!(!OptValue::Int(0).is_truthy());
        assert!(OptValue::Enum("whatever").is_truthy());
    }

    #[test]
    fn is_truthy_for_absent_capable_kinds() {
        assert!(!OptValue::Str(None).is_truthy());
        assert!(!OptValue::Str(Some(String::new())).is_truthy());
        assert!(OptValue::Str(Some("x".into())).is_truthy());
        assert!(!OptValue::List(Some(vec![])).is_truthy());
        assert!(!OptValue::Callback(None).is_truthy());
        assert!(OptValue::Data(Some(user_data(0u8))).is_truthy());
    }

    #[test]
    fn absent_is_distinct_from_empty() {
        assert!(OptValue::Str(None).is_absent());
        assert!(!OptValue::Str(Some(String::new())).is_absent());
        assert!(OptValue::List(None).is_absent());
        assert!(!OptValue::List(Some(vec![])).is_absent());
        assert_ne!(OptValue::Pairs(None), OptValue::Pairs(Some(vec![])));
    }

    #[test]
    fn accessors_extract_matching_kind() {
        assert_eq!(OptValue::Int(3).as_int(), Some(3));
        assert_eq!(OptValue::Int(3).as_bool(), None);
        assert_eq!(OptValue::Str(Some("a".into())).as_str(), Some("a"));
        assert_eq!(OptValue::Str(None).as_str(), None);
        assert_eq!(OptValue::Enum("v6").as_enum(), Some("v6"));
        let list = vec!["a".to_string()];
        assert_eq!(
            OptValue::List(Some(list.clone())).as_list(),
            Some(list.as_slice())
        );
    }

    #[test]
    fn data_compares_by_identity() {
        let data = user_data(vec![1, 2, 3]);
        assert_eq!(
            OptValue::Data(Some(data.clone())),
            OptValue::Data(Some(data))
        );
        assert_ne!(
            OptValue::Data(Some(user_data(1))),
            OptValue::Data(Some(user_data(1)))
        );
    }

    #[test]
    fn serializes_references_as_presence() {
        let cb = Callback::progress(|_, _, _| CbStatus::Ok);
        assert_eq!(
            serde_json::to_value(OptValue::Callback(Some(cb))).unwrap(),
            serde_json::json!(true)
        );
        assert_eq!(
            serde_json::to_value(OptValue::Pairs(Some(vec![("a".into(), "b".into())]))).unwrap(),
            serde_json::json!([["a", "b"]])
        );
        assert_eq!(
            serde_json::to_value(OptValue::Str(None)).unwrap(),
            serde_json::Value::Null
        );
    }

    #[test]
    fn input_conversions() {
        assert!(Input::from(None::<&str>).is_absent());
        assert!(matches!(Input::from(Some(1)), Input::Int(1)));
        match Input::from(vec![Some("a"), None]) {
            Input::List(items) => {
                assert!(matches!(&items[0], Input::Str(s) if s == "a"));
                assert!(items[1].is_absent());
            }
            other => panic!("Expected List, got {:?}", other),
        }
        match Input::from([("bar", "foo")]) {
            Input::List(items) => assert!(matches!(&items[0], Input::Tuple(t) if t.len() == 2)),
            other => panic!("Expected List, got {:?}", other),
        }
        assert!(matches!(Input::from(IpResolve::V6), Input::Str(s) if s == "v6"));
    }
}
