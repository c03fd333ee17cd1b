//! # Handle
//!
//! [`Handle`] is a **thin facade** over the option store. It is the single
//! object a caller configures before handing it to a download, and it offers
//! two equivalent ways in:
//!
//! - **Code-keyed**: [`Handle::set_option`] / [`Handle::get_info`], addressed
//!   by [`OptionCode`] and [`InfoCode`]
//! - **Attribute**: [`Handle::set_attr`] / [`Handle::attr`], addressed by
//!   option name
//!
//! The attribute facade resolves the name to a code and calls the code-keyed
//! facade, so both observe and mutate the same slots. Any sequence of writes
//! through one facade leaves the same state as the same writes through the
//! other.
//!
//! ## What the Handle Does NOT Do
//!
//! - **Transfers**: downloading, mirror ranking and verification read the
//!   handle through [`OptionsView`]; they live elsewhere
//! - **Coercion rules**: those belong in [`crate::options::coerce`]
//!
//! ## Example
//!
//! ```
//! use repohandle::{Handle, InfoCode, OptValue, OptionCode};
//!
//! let mut handle = Handle::new();
//! handle.set_option(OptionCode::Urls, vec!["http://foo/$arch/"]).unwrap();
//! handle.set_attr("varsub", vec![("arch", "x86_64")]).unwrap();
//!
//! assert_eq!(
//!     handle.get_info(InfoCode::SubstitutedUrls).unwrap(),
//!     OptValue::List(Some(vec!["http://foo/x86_64/".to_string()])),
//! );
//! assert_eq!(handle.attr("urls").unwrap(), handle.get_info(InfoCode::Urls).unwrap());
//! ```

use crate::codes::{DerivedInfo, InfoCode, InfoSource, OptionCode};
use crate::error::Result;
use crate::options::{Input, OptValue};
use crate::store::OptionStore;
use crate::view::OptionsView;

#[derive(Debug, Clone, Default)]
pub struct Handle {
    store: OptionStore,
}

impl Handle {
    /// A handle with every option at its catalog default.
    pub fn new() -> Self {
        Self::default()
    }

    // --- code-keyed facade ---

    /// Coerce `value` for the option and store it.
    ///
    /// An absent value clears the option. On error the previous value is
    /// kept.
    pub fn set_option(&mut self, code: OptionCode, value: impl Into<Input>) -> Result<()> {
        self.store.set(code.name(), value.into())
    }

    pub fn clear_option(&mut self, code: OptionCode) -> Result<()> {
        self.set_option(code, Input::Absent)
    }

    /// Current value for an info code.
    ///
    /// Option-backed codes return a copy of the stored value; callback and
    /// data references come back as the same `Arc`. Derived codes are
    /// computed on each call.
    pub fn get_info(&self, code: InfoCode) -> Result<OptValue> {
        match code.source() {
            InfoSource::Option(name) => self.store.get(name).cloned(),
            InfoSource::Derived(DerivedInfo::SubstitutedUrls) => {
                Ok(OptValue::List(Some(self.view().substituted_urls())))
            }
            InfoSource::Derived(DerivedInfo::ProgressActive) => {
                Ok(OptValue::Bool(self.view().has_progress_cb()))
            }
        }
    }

    /// [`Handle::set_option`] for a numeric code.
    pub fn set_option_raw(&mut self, code: u32, value: impl Into<Input>) -> Result<()> {
        let code = OptionCode::try_from(code)?;
        self.set_option(code, value)
    }

    pub fn get_info_raw(&self, code: u32) -> Result<OptValue> {
        self.get_info(InfoCode::try_from(code)?)
    }

    // --- attribute facade ---

    /// Read an attribute. Derived values such as `substitutedurls` are readable.
    pub fn attr(&self, name: &str) -> Result<OptValue> {
        self.get_info(InfoCode::from_attr(name)?)
    }

    /// Write an attribute. Only catalog options are writable.
    pub fn set_attr(&mut self, name: &str, value: impl Into<Input>) -> Result<()> {
        let code = OptionCode::from_attr(name).inspect_err(|_| {
            tracing::debug!(attr = name, "Attribute is not a settable option");
        })?;
        self.set_option(code, value)
    }

    pub fn clear_attr(&mut self, name: &str) -> Result<()> {
        self.set_attr(name, Input::Absent)
    }

    /// Every readable attribute name: options in catalog order, then
    /// derived values.
    pub fn attr_names() -> impl Iterator<Item = &'static str> {
        InfoCode::ALL.iter().map(|code| code.name())
    }

    /// Whether `name` can be written through [`Handle::set_attr`].
    pub fn is_settable(name: &str) -> bool {
        OptionCode::from_attr(name).is_ok()
    }

    // --- collaborators ---

    /// Borrowed read-only view for transfer code.
    pub fn view(&self) -> OptionsView<'_> {
        OptionsView::new(&self.store)
    }

    pub fn store(&self) -> &OptionStore {
        &self.store
    }

    /// Reset every option to its catalog default.
    pub fn reset(&mut self) {
        tracing::debug!("Handle reset to defaults");
        self.store = OptionStore::new();
    }
}
