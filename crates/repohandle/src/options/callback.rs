//! Callback and opaque-data references.
//!
//! A callback option and its data option are two separate catalog entries.
//! The handle owns both references; a transfer engine borrows them through
//! [`crate::view::OptionsView`] for the duration of one invocation.
//!
//! References compare by identity: reading back a stored callback yields the
//! same `Arc`, and two closures with identical bodies are still different.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Opaque caller data handed back verbatim to callbacks.
pub type UserData = Arc<dyn Any + Send + Sync>;

pub type ProgressFn = dyn Fn(Option<&UserData>, f64, f64) -> CbStatus + Send + Sync;

pub type MirrorFailureFn =
    dyn Fn(Option<&UserData>, &str, &str, Option<&str>) -> CbStatus + Send + Sync;

pub type FastestMirrorFn = dyn Fn(Option<&UserData>, FastestMirrorStage, Option<&str>) + Send + Sync;

/// Wrap any value as opaque user data.
pub fn user_data<T: Any + Send + Sync>(value: T) -> UserData {
    Arc::new(value)
}

/// What a callback asks the transfer engine to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CbStatus {
    #[default]
    Ok,
    /// Stop the current transfer without treating it as an error.
    Abort,
    Error,
}

/// Progress points reported while ranking mirrors by speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FastestMirrorStage {
    Init,
    CacheLoading,
    CacheLoadingStatus,
    Detection,
    Finishing,
    Status,
}

/// The three callback slots a handle carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackKind {
    Progress,
    MirrorFailure,
    FastestMirror,
}

impl CallbackKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CallbackKind::Progress => "progress",
            CallbackKind::MirrorFailure => "mirror-failure",
            CallbackKind::FastestMirror => "fastest-mirror",
        }
    }
}

#[derive(Clone)]
pub enum Callback {
    Progress(Arc<ProgressFn>),
    MirrorFailure(Arc<MirrorFailureFn>),
    FastestMirror(Arc<FastestMirrorFn>),
}

impl Callback {
    pub fn progress<F>(f: F) -> Self
    where
        F: Fn(Option<&UserData>, f64, f64) -> CbStatus + Send + Sync + 'static,
    {
        Callback::Progress(Arc::new(f))
    }

    pub fn mirror_failure<F>(f: F) -> Self
    where
        F: Fn(Option<&UserData>, &str, &str, Option<&str>) -> CbStatus + Send + Sync + 'static,
    {
        Callback::MirrorFailure(Arc::new(f))
    }

    pub fn fastest_mirror<F>(f: F) -> Self
    where
        F: Fn(Option<&UserData>, FastestMirrorStage, Option<&str>) + Send + Sync + 'static,
    {
        Callback::FastestMirror(Arc::new(f))
    }

    pub fn kind(&self) -> CallbackKind {
        match self {
            Callback::Progress(_) => CallbackKind::Progress,
            Callback::MirrorFailure(_) => CallbackKind::MirrorFailure,
            Callback::FastestMirror(_) => CallbackKind::FastestMirror,
        }
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Callback::Progress(a), Callback::Progress(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            (Callback::MirrorFailure(a), Callback::MirrorFailure(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            (Callback::FastestMirror(a), Callback::FastestMirror(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback::{}(<fn>)", self.kind().as_str())
    }
}

pub(crate) fn same_data(a: &UserData, b: &UserData) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
