//! # Option and Info Codes
//!
//! The code-keyed facade addresses options through two enumerations:
//! [`OptionCode`] for writes and [`InfoCode`] for reads. Both are generated
//! from one table below, so every settable option has a readable info code
//! with the same numeric value, in catalog order.
//!
//! A few info codes have no option code. They are computed from stored
//! options at read time:
//!
//! | Info code | Attribute | Value |
//! |-----------|-----------|-------|
//! | `SubstitutedUrls` | `substitutedurls` | `urls` with `varsub` substitution applied |
//! | `ProgressActive` | `progressactive` | whether a progress callback is set |

use crate::error::{HandleError, Result};
use crate::options;

/// Where an info code's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoSource {
    /// The stored value of the named option.
    Option(&'static str),
    Derived(DerivedInfo),
}

/// Read-only values computed from other options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedInfo {
    SubstitutedUrls,
    ProgressActive,
}

macro_rules! paired_codes {
    (
        options { $( $variant:ident = $code:literal => $name:literal, )+ }
        derived { $( $dvariant:ident = $dcode:literal => $dname:literal, )+ }
    ) => {
        /// Write-side code for each option.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u32)]
        pub enum OptionCode {
            $( $variant = $code, )+
        }

        impl OptionCode {
            pub const ALL: &'static [OptionCode] = &[ $( OptionCode::$variant, )+ ];

            /// Catalog name, also the attribute name.
            pub fn name(self) -> &'static str {
                match self {
                    $( OptionCode::$variant => $name, )+
                }
            }

            /// The info code reading the same option.
            pub fn info_code(self) -> InfoCode {
                match self {
                    $( OptionCode::$variant => InfoCode::$variant, )+
                }
            }
        }

        /// Read-side code: one per option plus the derived values.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u32)]
        pub enum InfoCode {
            $( $variant = $code, )+
            $( $dvariant = $dcode, )+
        }

        impl InfoCode {
            pub const ALL: &'static [InfoCode] = &[
                $( InfoCode::$variant, )+
                $( InfoCode::$dvariant, )+
            ];

            pub fn name(self) -> &'static str {
                match self {
                    $( InfoCode::$variant => $name, )+
                    $( InfoCode::$dvariant => $dname, )+
                }
            }

            pub fn source(self) -> InfoSource {
                match self {
                    $( InfoCode::$variant => InfoSource::Option($name), )+
                    $( InfoCode::$dvariant => InfoSource::Derived(DerivedInfo::$dvariant), )+
                }
            }
        }
    };
}

paired_codes! {
    options {
        Update = 0 => "update",
        Urls = 1 => "urls",
        Mirrorlist = 2 => "mirrorlist",
        MetalinkUrl = 3 => "metalinkurl",
        Local = 4 => "local",
        HttpAuth = 5 => "httpauth",
        UserPwd = 6 => "userpwd",
        Proxy = 7 => "proxy",
        ProxyPort = 8 => "proxyport",
        ProxyType = 9 => "proxytype",
        ProxyAuth = 10 => "proxyauth",
        ProxyUserPwd = 11 => "proxyuserpwd",
        ProgressCb = 12 => "progresscb",
        ProgressData = 13 => "progressdata",
        MaxSpeed = 14 => "maxspeed",
        DestDir = 15 => "destdir",
        RepoType = 16 => "repotype",
        ConnectTimeout = 17 => "connecttimeout",
        IgnoreMissing = 18 => "ignoremissing",
        Interruptible = 19 => "interruptible",
        UserAgent = 20 => "useragent",
        FetchMirrors = 21 => "fetchmirrors",
        MaxMirrorTries = 22 => "maxmirrortries",
        MaxParallelDownloads = 23 => "maxparalleldownloads",
        MaxDownloadsPerMirror = 24 => "maxdownloadspermirror",
        VarSub = 25 => "varsub",
        FastestMirror = 26 => "fastestmirror",
        FastestMirrorCache = 27 => "fastestmirrorcache",
        FastestMirrorMaxAge = 28 => "fastestmirrormaxage",
        FastestMirrorCb = 29 => "fastestmirrorcb",
        FastestMirrorData = 30 => "fastestmirrordata",
        LowSpeedTime = 31 => "lowspeedtime",
        LowSpeedLimit = 32 => "lowspeedlimit",
        GpgCheck = 33 => "gpgcheck",
        Checksum = 34 => "checksum",
        YumDList = 35 => "yumdlist",
        YumBList = 36 => "yumblist",
        Hmfcb = 37 => "hmfcb",
        SslVerifyPeer = 38 => "sslverifypeer",
        SslVerifyHost = 39 => "sslverifyhost",
        SslClientCert = 40 => "sslclientcert",
        SslClientKey = 41 => "sslclientkey",
        SslCaCert = 42 => "sslcacert",
        IpResolve = 43 => "ipresolve",
        AllowedMirrorFailures = 44 => "allowedmirrorfailures",
        AdaptiveMirrorSorting = 45 => "adaptivemirrorsorting",
        GnupgHomeDir = 46 => "gnupghomedir",
        HttpHeader = 47 => "httpheader",
        Offline = 48 => "offline",
    }
    derived {
        SubstitutedUrls = 100 => "substitutedurls",
        ProgressActive = 101 => "progressactive",
    }
}

impl OptionCode {
    /// Option code for an attribute name.
    pub fn from_attr(name: &str) -> Result<Self> {
        options::position(name)
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| HandleError::UnknownOption(name.to_string()))
    }
}

impl InfoCode {
    /// Info code for an attribute name, derived values included.
    pub fn from_attr(name: &str) -> Result<Self> {
        if let Ok(code) = OptionCode::from_attr(name) {
            return Ok(code.info_code());
        }
        Self::ALL
            .iter()
            .copied()
            .find(|code| code.name() == name)
            .ok_or_else(|| HandleError::UnknownOption(name.to_string()))
    }

    /// True for read-only values that have no option code.
    pub fn is_derived(self) -> bool {
        matches!(self.source(), InfoSource::Derived(_))
    }
}

impl TryFrom<u32> for OptionCode {
    type Error = HandleError;

    fn try_from(code: u32) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| *c as u32 == code)
            .ok_or(HandleError::UnknownCode(code))
    }
}

impl TryFrom<u32> for InfoCode {
    type Error = HandleError;

    fn try_from(code: u32) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| *c as u32 == code)
            .ok_or(HandleError::UnknownCode(code))
    }
}
