//! # Option System
//!
//! Every handle setting is an *option*: a named, typed slot described once in
//! the catalog ([`OPTIONS`]). The catalog drives everything else:
//!
//! - **Specifications**: kind, compiled-in default and clear policy per option
//! - **Coercion**: one function turning caller input into canonical values
//! - **Values**: a single sum type ([`OptValue`]) for what the store holds
//!
//! ## Option Kinds
//!
//! | Kind | Examples | Cleared to |
//! |------|----------|------------|
//! | `Bool` | `update`, `sslverifypeer` | default |
//! | `Int` | `maxmirrortries`, `allowedmirrorfailures` | default |
//! | `Str` | `destdir`, `useragent`, `mirrorlist` | absent |
//! | `StringList` | `urls` / `yumdlist` | `[]` / absent |
//! | `PairList` | `varsub` | absent |
//! | `Enum` | `ipresolve`, `proxytype` | default |
//! | `Callback` | `progresscb`, `hmfcb` | absent |
//! | `Data` | `progressdata` | absent |
//!
//! The clear policies are deliberately uneven: `urls` clears to an empty
//! list while `varsub` clears to absent, and an empty string is a present
//! value distinct from absent.
//!
//! ## Usage
//!
//! ```
//! use repohandle::options::{coerce, get_spec, Input, OptValue};
//!
//! let spec = get_spec("urls").unwrap();
//! let value = coerce(spec, Input::from("http://foo")).unwrap().into_value(spec);
//! assert_eq!(value, OptValue::List(Some(vec!["http://foo".to_string()])));
//! ```

mod callback;
mod coerce;
mod enums;
mod spec;
mod value;
pub mod varsub;

pub use callback::{
    user_data, Callback, CallbackKind, CbStatus, FastestMirrorFn, FastestMirrorStage,
    MirrorFailureFn, ProgressFn, UserData,
};
pub use coerce::{coerce, Coerced};
pub use enums::{IpResolve, ProxyType, RepoType};
pub use spec::{all_names, describe, get_spec, DefaultValue, OptionKind, OptionSpec, OPTIONS};
pub use value::{Input, OptValue};

pub(crate) use spec::position;
