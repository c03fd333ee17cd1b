//! # Configuration
//!
//! Initial option values can come from a TOML file and `REPOHANDLE_*`
//! environment variables, loaded with [`confique`].
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `REPOHANDLE_USERAGENT`, `REPOHANDLE_PROXY`, etc.
//! 2. **Config file**: `handle.toml`, by default in the OS config directory
//!    (via the `directories` crate).
//! 3. **Catalog defaults**: anything left unset keeps its compiled-in default.
//!
//! Every field is optional and carries no default of its own. Values are
//! applied through the attribute facade, so they go through the same
//! coercion and validation as any other write. Callbacks and opaque data
//! cannot be configured.
//!
//! ## Example
//!
//! ```toml
//! urls = ["http://mirror.example.org/$releasever/os/"]
//! varsub = [["releasever", "39"]]
//! ipresolve = "v4"
//! maxparalleldownloads = 5
//! ```

use std::path::{Path, PathBuf};

use confique::Config;
use directories::ProjectDirs;

use crate::error::Result;
use crate::handle::Handle;
use crate::options::Input;

pub const CONFIG_FILE_NAME: &str = "handle.toml";

/// Initial values for a handle, keyed by option name.
#[derive(Config, Debug, Clone, Default, PartialEq)]
pub struct HandleConfig {
    /// Update existing local metadata instead of downloading everything.
    #[config(env = "REPOHANDLE_UPDATE")]
    pub update: Option<bool>,

    /// Base URLs of the repository.
    pub urls: Option<Vec<String>>,

    #[config(env = "REPOHANDLE_MIRRORLIST")]
    pub mirrorlist: Option<String>,

    #[config(env = "REPOHANDLE_METALINKURL")]
    pub metalinkurl: Option<String>,

    /// Use a local repository in place.
    #[config(env = "REPOHANDLE_LOCAL")]
    pub local: Option<bool>,

    #[config(env = "REPOHANDLE_HTTPAUTH")]
    pub httpauth: Option<bool>,

    #[config(env = "REPOHANDLE_USERPWD")]
    pub userpwd: Option<String>,

    #[config(env = "REPOHANDLE_PROXY")]
    pub proxy: Option<String>,

    #[config(env = "REPOHANDLE_PROXYPORT")]
    pub proxyport: Option<i64>,

    /// One of http, http1.0, socks4, socks5, socks4a, socks5hostname.
    #[config(env = "REPOHANDLE_PROXYTYPE")]
    pub proxytype: Option<String>,

    #[config(env = "REPOHANDLE_PROXYAUTH")]
    pub proxyauth: Option<bool>,

    #[config(env = "REPOHANDLE_PROXYUSERPWD")]
    pub proxyuserpwd: Option<String>,

    /// Bytes per second, 0 for unlimited.
    #[config(env = "REPOHANDLE_MAXSPEED")]
    pub maxspeed: Option<i64>,

    #[config(env = "REPOHANDLE_DESTDIR")]
    pub destdir: Option<String>,

    /// One of yum, suse, deb.
    #[config(env = "REPOHANDLE_REPOTYPE")]
    pub repotype: Option<String>,

    /// Seconds.
    #[config(env = "REPOHANDLE_CONNECTTIMEOUT")]
    pub connecttimeout: Option<i64>,

    #[config(env = "REPOHANDLE_IGNOREMISSING")]
    pub ignoremissing: Option<bool>,

    #[config(env = "REPOHANDLE_INTERRUPTIBLE")]
    pub interruptible: Option<bool>,

    #[config(env = "REPOHANDLE_USERAGENT")]
    pub useragent: Option<String>,

    #[config(env = "REPOHANDLE_FETCHMIRRORS")]
    pub fetchmirrors: Option<bool>,

    /// 0 means try every mirror.
    #[config(env = "REPOHANDLE_MAXMIRRORTRIES")]
    pub maxmirrortries: Option<i64>,

    #[config(env = "REPOHANDLE_MAXPARALLELDOWNLOADS")]
    pub maxparalleldownloads: Option<i64>,

    #[config(env = "REPOHANDLE_MAXDOWNLOADSPERMIRROR")]
    pub maxdownloadspermirror: Option<i64>,

    /// `[name, value]` pairs substituted for `$name` in URLs.
    pub varsub: Option<Vec<(String, String)>>,

    #[config(env = "REPOHANDLE_FASTESTMIRROR")]
    pub fastestmirror: Option<bool>,

    #[config(env = "REPOHANDLE_FASTESTMIRRORCACHE")]
    pub fastestmirrorcache: Option<String>,

    /// Seconds.
    #[config(env = "REPOHANDLE_FASTESTMIRRORMAXAGE")]
    pub fastestmirrormaxage: Option<i64>,

    #[config(env = "REPOHANDLE_LOWSPEEDTIME")]
    pub lowspeedtime: Option<i64>,

    #[config(env = "REPOHANDLE_LOWSPEEDLIMIT")]
    pub lowspeedlimit: Option<i64>,

    #[config(env = "REPOHANDLE_GPGCHECK")]
    pub gpgcheck: Option<bool>,

    #[config(env = "REPOHANDLE_CHECKSUM")]
    pub checksum: Option<bool>,

    /// Metadata types to download. Leave unset for all.
    pub yumdlist: Option<Vec<String>>,

    pub yumblist: Option<Vec<String>>,

    #[config(env = "REPOHANDLE_SSLVERIFYPEER")]
    pub sslverifypeer: Option<bool>,

    #[config(env = "REPOHANDLE_SSLVERIFYHOST")]
    pub sslverifyhost: Option<bool>,

    #[config(env = "REPOHANDLE_SSLCLIENTCERT")]
    pub sslclientcert: Option<String>,

    #[config(env = "REPOHANDLE_SSLCLIENTKEY")]
    pub sslclientkey: Option<String>,

    #[config(env = "REPOHANDLE_SSLCACERT")]
    pub sslcacert: Option<String>,

    /// One of whatever, v4, v6.
    #[config(env = "REPOHANDLE_IPRESOLVE")]
    pub ipresolve: Option<String>,

    #[config(env = "REPOHANDLE_ALLOWEDMIRRORFAILURES")]
    pub allowedmirrorfailures: Option<i64>,

    #[config(env = "REPOHANDLE_ADAPTIVEMIRRORSORTING")]
    pub adaptivemirrorsorting: Option<i64>,

    #[config(env = "REPOHANDLE_GNUPGHOMEDIR")]
    pub gnupghomedir: Option<String>,

    /// Extra `Name: value` request headers.
    pub httpheader: Option<Vec<String>>,

    #[config(env = "REPOHANDLE_OFFLINE")]
    pub offline: Option<bool>,
}

impl HandleConfig {
    /// Load from the environment and, if present, the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::builder().env().file(path.as_ref()).load()?;
        Ok(config)
    }

    /// Load from the environment and the default config file.
    pub fn load_default() -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = Self::default_path() {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }

    /// `handle.toml` in the OS-appropriate config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "repohandle", "repohandle")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Every configurable option with its configured input, absent when
    /// unset.
    fn entries(&self) -> Vec<(&'static str, Input)> {
        vec![
            ("update", Input::from(self.update)),
            ("urls", Input::from(self.urls.clone())),
            ("mirrorlist", Input::from(self.mirrorlist.as_ref())),
            ("metalinkurl", Input::from(self.metalinkurl.as_ref())),
            ("local", Input::from(self.local)),
            ("httpauth", Input::from(self.httpauth)),
            ("userpwd", Input::from(self.userpwd.as_ref())),
            ("proxy", Input::from(self.proxy.as_ref())),
            ("proxyport", Input::from(self.proxyport)),
            ("proxytype", Input::from(self.proxytype.as_ref())),
            ("proxyauth", Input::from(self.proxyauth)),
            ("proxyuserpwd", Input::from(self.proxyuserpwd.as_ref())),
            ("maxspeed", Input::from(self.maxspeed)),
            ("destdir", Input::from(self.destdir.as_ref())),
            ("repotype", Input::from(self.repotype.as_ref())),
            ("connecttimeout", Input::from(self.connecttimeout)),
            ("ignoremissing", Input::from(self.ignoremissing)),
            ("interruptible", Input::from(self.interruptible)),
            ("useragent", Input::from(self.useragent.as_ref())),
            ("fetchmirrors", Input::from(self.fetchmirrors)),
            ("maxmirrortries", Input::from(self.maxmirrortries)),
            ("maxparalleldownloads", Input::from(self.maxparalleldownloads)),
            ("maxdownloadspermirror", Input::from(self.maxdownloadspermirror)),
            ("varsub", Input::from(self.varsub.clone())),
            ("fastestmirror", Input::from(self.fastestmirror)),
            ("fastestmirrorcache", Input::from(self.fastestmirrorcache.as_ref())),
            ("fastestmirrormaxage", Input::from(self.fastestmirrormaxage)),
            ("lowspeedtime", Input::from(self.lowspeedtime)),
            ("lowspeedlimit", Input::from(self.lowspeedlimit)),
            ("gpgcheck", Input::from(self.gpgcheck)),
            ("checksum", Input::from(self.checksum)),
            ("yumdlist", Input::from(self.yumdlist.clone())),
            ("yumblist", Input::from(self.yumblist.clone())),
            ("sslverifypeer", Input::from(self.sslverifypeer)),
            ("sslverifyhost", Input::from(self.sslverifyhost)),
            ("sslclientcert", Input::from(self.sslclientcert.as_ref())),
            ("sslclientkey", Input::from(self.sslclientkey.as_ref())),
            ("sslcacert", Input::from(self.sslcacert.as_ref())),
            ("ipresolve", Input::from(self.ipresolve.as_ref())),
            ("allowedmirrorfailures", Input::from(self.allowedmirrorfailures)),
            ("adaptivemirrorsorting", Input::from(self.adaptivemirrorsorting)),
            ("gnupghomedir", Input::from(self.gnupghomedir.as_ref())),
            ("httpheader", Input::from(self.httpheader.clone())),
            ("offline", Input::from(self.offline)),
        ]
    }

    /// Write every configured value into `handle`.
    ///
    /// Stops at the first value the handle rejects; earlier values stay
    /// applied.
    pub fn apply(&self, handle: &mut Handle) -> Result<()> {
        let mut applied = 0usize;
        for (name, input) in self.entries() {
            if input.is_absent() {
                continue;
            }
            handle.set_attr(name, input)?;
            applied += 1;
        }
        tracing::info!(applied, "Applied handle configuration");
        Ok(())
    }
}

impl Handle {
    /// A new handle with `config` applied over the catalog defaults.
    pub fn from_config(config: &HandleConfig) -> Result<Self> {
        let mut handle = Handle::new();
        config.apply(&mut handle)?;
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{OptValue, OptionKind, OPTIONS};
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn covers_every_plain_option() {
        let configured: Vec<_> = HandleConfig::default()
            .entries()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        let plain: Vec<_> = OPTIONS
            .iter()
            .filter(|spec| !matches!(spec.kind, OptionKind::Callback(_) | OptionKind::Data))
            .map(|spec| spec.name)
            .collect();
        assert_eq!(configured, plain);
    }

    #[test]
    fn empty_config_keeps_defaults() {
        let handle = Handle::from_config(&HandleConfig::default()).unwrap();
        for (spec, value) in handle.store().iter() {
            assert_eq!(*value, spec.default_value(), "{}", spec.name);
        }
    }

    #[test]
    fn apply_goes_through_coercion() {
        let config = HandleConfig {
            ipresolve: Some("V6".to_string()),
            urls: Some(vec!["http://foo".to_string()]),
            varsub: Some(vec![("bar".to_string(), "baz".to_string())]),
            ..Default::default()
        };
        let handle = Handle::from_config(&config).unwrap();
        assert_eq!(handle.attr("ipresolve").unwrap(), OptValue::Enum("v6"));
        assert_eq!(
            handle.attr("varsub").unwrap(),
            OptValue::Pairs(Some(vec![("bar".into(), "baz".into())]))
        );
    }

    #[test]
    fn apply_rejects_invalid_values() {
        let config = HandleConfig {
            proxytype: Some("carrier-pigeon".to_string()),
            ..Default::default()
        };
        let err = Handle::from_config(&config).unwrap_err();
        assert!(err.is_invalid_value());
    }

    #[test]
    fn empty_lists_are_applied() {
        let config = HandleConfig {
            yumdlist: Some(vec![]),
            ..Default::default()
        };
        let handle = Handle::from_config(&config).unwrap();
        assert_eq!(handle.attr("yumdlist").unwrap(), OptValue::List(Some(vec![])));
    }

    #[test]
    fn loads_toml_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
urls = ["http://foo/$releasever/"]
varsub = [["releasever", "39"]]
maxparalleldownloads = 5
gpgcheck = true
"#,
        );
        let config = HandleConfig::load(&path).unwrap();
        assert_eq!(config.maxparalleldownloads, Some(5));
        assert_eq!(config.gpgcheck, Some(true));

        let handle = Handle::from_config(&config).unwrap();
        assert_eq!(
            handle.view().substituted_urls(),
            vec!["http://foo/39/".to_string()]
        );
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "maxspeed = \"fast\"\n");
        let err = HandleConfig::load(&path).unwrap_err();
        assert!(matches!(err, crate::error::HandleError::Config(_)));
    }

    #[test]
    fn default_path_ends_with_file_name() {
        if let Some(path) = HandleConfig::default_path() {
            assert!(path.ends_with(CONFIG_FILE_NAME));
        }
    }
}
