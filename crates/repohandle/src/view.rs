//! # Collaborator View
//!
//! [`OptionsView`] is what the transfer engine, mirror selector and verifier
//! get: a borrowed, read-only window onto a handle's options with typed
//! getters, plus invocation of the stored callbacks.
//!
//! Callbacks are looked up at invocation time and receive their paired data
//! unchanged. The view borrows the handle, so the handle cannot be
//! reconfigured while a view is alive; the view is `Send`, which lets a
//! scoped worker thread report progress.
//!
//! ```
//! use repohandle::{Handle, OptionCode};
//! use repohandle::options::{Callback, CbStatus};
//!
//! let mut handle = Handle::new();
//! handle
//!     .set_option(OptionCode::ProgressCb, Callback::progress(|_, total, now| {
//!         assert!(now <= total);
//!         CbStatus::Ok
//!     }))
//!     .unwrap();
//!
//! let view = handle.view();
//! assert_eq!(view.notify_progress(100.0, 50.0), CbStatus::Ok);
//! ```

use crate::codes::OptionCode;
use crate::options::varsub::substitute;
use crate::options::{
    Callback, CbStatus, FastestMirrorStage, IpResolve, OptValue, ProxyType, RepoType, UserData,
};
use crate::store::OptionStore;

#[derive(Debug, Clone, Copy)]
pub struct OptionsView<'a> {
    store: &'a OptionStore,
}

impl<'a> OptionsView<'a> {
    pub(crate) fn new(store: &'a OptionStore) -> Self {
        Self { store }
    }

    pub fn value(&self, code: OptionCode) -> &'a OptValue {
        self.store.by_code(code)
    }

    fn flag(&self, code: OptionCode) -> bool {
        self.value(code).as_bool().unwrap_or_default()
    }

    fn int(&self, code: OptionCode) -> i64 {
        self.value(code).as_int().unwrap_or_default()
    }

    fn string(&self, code: OptionCode) -> Option<&'a str> {
        self.value(code).as_str()
    }

    fn list(&self, code: OptionCode) -> Option<&'a [String]> {
        self.value(code).as_list()
    }

    fn data(&self, code: OptionCode) -> Option<&'a UserData> {
        self.value(code).as_data()
    }

    // --- repository location ---

    pub fn urls(&self) -> &'a [String] {
        self.list(OptionCode::Urls).unwrap_or_default()
    }

    pub fn mirrorlist(&self) -> Option<&'a str> {
        self.string(OptionCode::Mirrorlist)
    }

    pub fn metalink_url(&self) -> Option<&'a str> {
        self.string(OptionCode::MetalinkUrl)
    }

    pub fn varsub(&self) -> &'a [(String, String)] {
        self.value(OptionCode::VarSub)
            .as_pairs()
            .unwrap_or_default()
    }

    /// Base URLs with `$variables` substituted from `varsub`.
    pub fn substituted_urls(&self) -> Vec<String> {
        let vars = self.varsub();
        self.urls()
            .iter()
            .map(|url| substitute(url, vars))
            .collect()
    }

    pub fn repo_type(&self) -> RepoType {
        self.value(OptionCode::RepoType)
            .as_enum()
            .and_then(RepoType::from_name)
            .unwrap_or_default()
    }

    pub fn dest_dir(&self) -> Option<&'a str> {
        self.string(OptionCode::DestDir)
    }

    pub fn local(&self) -> bool {
        self.flag(OptionCode::Local)
    }

    pub fn update(&self) -> bool {
        self.flag(OptionCode::Update)
    }

    pub fn offline(&self) -> bool {
        self.flag(OptionCode::Offline)
    }

    pub fn ignore_missing(&self) -> bool {
        self.flag(OptionCode::IgnoreMissing)
    }

    pub fn interruptible(&self) -> bool {
        self.flag(OptionCode::Interruptible)
    }

    pub fn fetch_mirrors(&self) -> bool {
        self.flag(OptionCode::FetchMirrors)
    }

    /// Metadata types to download; `None` means all of them.
    pub fn yum_dlist(&self) -> Option<&'a [String]> {
        self.list(OptionCode::YumDList)
    }

    pub fn yum_blist(&self) -> Option<&'a [String]> {
        self.list(OptionCode::YumBList)
    }

    // --- transfer ---

    pub fn user_agent(&self) -> Option<&'a str> {
        self.string(OptionCode::UserAgent)
    }

    pub fn http_headers(&self) -> Option<&'a [String]> {
        self.list(OptionCode::HttpHeader)
    }

    pub fn http_auth(&self) -> bool {
        self.flag(OptionCode::HttpAuth)
    }

    pub fn userpwd(&self) -> Option<&'a str> {
        self.string(OptionCode::UserPwd)
    }

    pub fn max_speed(&self) -> i64 {
        self.int(OptionCode::MaxSpeed)
    }

    pub fn connect_timeout(&self) -> i64 {
        self.int(OptionCode::ConnectTimeout)
    }

    pub fn low_speed_time(&self) -> i64 {
        self.int(OptionCode::LowSpeedTime)
    }

    pub fn low_speed_limit(&self) -> i64 {
        self.int(OptionCode::LowSpeedLimit)
    }

    pub fn max_parallel_downloads(&self) -> i64 {
        self.int(OptionCode::MaxParallelDownloads)
    }

    pub fn max_downloads_per_mirror(&self) -> i64 {
        self.int(OptionCode::MaxDownloadsPerMirror)
    }

    pub fn ip_resolve(&self) -> IpResolve {
        self.value(OptionCode::IpResolve)
            .as_enum()
            .and_then(IpResolve::from_name)
            .unwrap_or_default()
    }

    // --- proxy ---

    pub fn proxy(&self) -> Option<&'a str> {
        self.string(OptionCode::Proxy)
    }

    pub fn proxy_port(&self) -> i64 {
        self.int(OptionCode::ProxyPort)
    }

    pub fn proxy_type(&self) -> ProxyType {
        self.value(OptionCode::ProxyType)
            .as_enum()
            .and_then(ProxyType::from_name)
            .unwrap_or_default()
    }

    pub fn proxy_auth(&self) -> bool {
        self.flag(OptionCode::ProxyAuth)
    }

    pub fn proxy_userpwd(&self) -> Option<&'a str> {
        self.string(OptionCode::ProxyUserPwd)
    }

    // --- mirror selection ---

    /// 0 means no limit.
    pub fn max_mirror_tries(&self) -> i64 {
        self.int(OptionCode::MaxMirrorTries)
    }

    pub fn allowed_mirror_failures(&self) -> i64 {
        self.int(OptionCode::AllowedMirrorFailures)
    }

    pub fn adaptive_mirror_sorting(&self) -> bool {
        self.int(OptionCode::AdaptiveMirrorSorting) != 0
    }

    pub fn fastest_mirror(&self) -> bool {
        self.flag(OptionCode::FastestMirror)
    }

    pub fn fastest_mirror_cache(&self) -> Option<&'a str> {
        self.string(OptionCode::FastestMirrorCache)
    }

    pub fn fastest_mirror_max_age(&self) -> i64 {
        self.int(OptionCode::FastestMirrorMaxAge)
    }

    // --- verification ---

    pub fn ssl_verify_peer(&self) -> bool {
        self.flag(OptionCode::SslVerifyPeer)
    }

    pub fn ssl_verify_host(&self) -> bool {
        self.flag(OptionCode::SslVerifyHost)
    }

    pub fn ssl_client_cert(&self) -> Option<&'a str> {
        self.string(OptionCode::SslClientCert)
    }

    pub fn ssl_client_key(&self) -> Option<&'a str> {
        self.string(OptionCode::SslClientKey)
    }

    pub fn ssl_ca_cert(&self) -> Option<&'a str> {
        self.string(OptionCode::SslCaCert)
    }

    pub fn gpg_check(&self) -> bool {
        self.flag(OptionCode::GpgCheck)
    }

    pub fn checksum(&self) -> bool {
        self.flag(OptionCode::Checksum)
    }

    pub fn gnupg_home_dir(&self) -> Option<&'a str> {
        self.string(OptionCode::GnupgHomeDir)
    }

    // --- callbacks ---

    pub fn progress_data(&self) -> Option<&'a UserData> {
        self.data(OptionCode::ProgressData)
    }

    pub fn fastest_mirror_data(&self) -> Option<&'a UserData> {
        self.data(OptionCode::FastestMirrorData)
    }

    pub fn has_progress_cb(&self) -> bool {
        self.value(OptionCode::ProgressCb).as_callback().is_some()
    }

    /// Report transfer progress. A missing callback means "carry on".
    pub fn notify_progress(&self, total_to_download: f64, downloaded: f64) -> CbStatus {
        match self.value(OptionCode::ProgressCb).as_callback() {
            Some(Callback::Progress(cb)) => {
                tracing::trace!(total_to_download, downloaded, "Invoking progress callback");
                cb(self.progress_data(), total_to_download, downloaded)
            }
            _ => CbStatus::Ok,
        }
    }

    /// Report a failed download from one mirror. Shares `progressdata`.
    pub fn notify_mirror_failure(&self, message: &str, url: &str, metadata: Option<&str>) -> CbStatus {
        match self.value(OptionCode::Hmfcb).as_callback() {
            Some(Callback::MirrorFailure(cb)) => {
                tracing::trace!(url, message, "Invoking mirror failure callback");
                cb(self.progress_data(), message, url, metadata)
            }
            _ => CbStatus::Ok,
        }
    }

    pub fn notify_fastest_mirror(&self, stage: FastestMirrorStage, detail: Option<&str>) {
        if let Some(Callback::FastestMirror(cb)) = self.value(OptionCode::FastestMirrorCb).as_callback() {
            tracing::trace!(?stage, "Invoking fastest mirror callback");
            cb(self.fastest_mirror_data(), stage, detail);
        }
    }

    /// Every option's current value keyed by name. Callbacks and opaque
    /// data appear only as `true`/`false`.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{user_data, Input};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn store_with(pairs: &[(&str, Input)]) -> OptionStore {
        let mut store = OptionStore::new();
        for (name, input) in pairs {
            store.set(name, input.clone()).unwrap();
        }
        store
    }

    #[test]
    fn typed_getters_report_defaults() {
        let store = OptionStore::new();
        let view = OptionsView::new(&store);
        assert!(view.urls().is_empty());
        assert_eq!(view.mirrorlist(), None);
        assert!(view.ssl_verify_peer());
        assert!(view.ssl_verify_host());
        assert_eq!(view.ip_resolve(), IpResolve::Whatever);
        assert_eq!(view.repo_type(), RepoType::Yum);
        assert_eq!(view.proxy_type(), ProxyType::Http);
        assert_eq!(view.max_mirror_tries(), 0);
        assert_eq!(view.allowed_mirror_failures(), 4);
        assert!(view.adaptive_mirror_sorting());
        assert_eq!(view.yum_dlist(), None);
        assert_eq!(view.connect_timeout(), 30);
    }

    #[test]
    fn typed_getters_follow_store() {
        let store = store_with(&[
            ("ipresolve", Input::from(IpResolve::V4)),
            ("proxytype", Input::from("socks5")),
            ("adaptivemirrorsorting", Input::Int(0)),
            ("destdir", Input::from("")),
        ]);
        let view = OptionsView::new(&store);
        assert_eq!(view.ip_resolve(), IpResolve::V4);
        assert_eq!(view.proxy_type(), ProxyType::Socks5);
        assert!(!view.adaptive_mirror_sorting());
        assert_eq!(view.dest_dir(), Some(""));
    }

    #[test]
    fn substituted_urls_fill_variables() {
        let store = store_with(&[
            ("urls", Input::from(vec!["http://foo/$releasever/", "http://bar/"])),
            ("varsub", Input::from(vec![("releasever", "39")])),
        ]);
        let view = OptionsView::new(&store);
        assert_eq!(view.substituted_urls(), vec!["http://foo/39/", "http://bar/"]);
    }

    #[test]
    fn progress_callback_receives_stored_data() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let cb = Callback::progress(move |data, total, now| {
            let tag = data
                .and_then(|d| d.downcast_ref::<&str>())
                .copied()
                .unwrap_or("none");
            sink.lock().unwrap().push((tag, total, now));
            CbStatus::Ok
        });
        let store = store_with(&[
            ("progresscb", Input::from(cb)),
            ("progressdata", Input::from(user_data("tag"))),
        ]);

        let status = OptionsView::new(&store).notify_progress(10.0, 4.0);

        assert_eq!(status, CbStatus::Ok);
        assert_eq!(*seen.lock().unwrap(), vec![("tag", 10.0, 4.0)]);
    }

    #[test]
    fn missing_callbacks_are_no_ops() {
        let store = OptionStore::new();
        let view = OptionsView::new(&store);
        assert_eq!(view.notify_progress(1.0, 1.0), CbStatus::Ok);
        assert_eq!(view.notify_mirror_failure("404", "http://foo", None), CbStatus::Ok);
        view.notify_fastest_mirror(FastestMirrorStage::Init, None);
    }

    #[test]
    fn mirror_failure_callback_can_abort() {
        let cb = Callback::mirror_failure(|_, msg, _, _| {
            if msg.contains("404") {
                CbStatus::Abort
            } else {
                CbStatus::Ok
            }
        });
        let store = store_with(&[("hmfcb", Input::from(cb))]);
        let view = OptionsView::new(&store);
        assert_eq!(
            view.notify_mirror_failure("HTTP 404", "http://foo/repomd.xml", None),
            CbStatus::Abort
        );
    }

    #[test]
    fn fastest_mirror_callback_uses_its_own_data() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let cb = Callback::fastest_mirror(move |data, stage, _| {
            assert_eq!(stage, FastestMirrorStage::Detection);
            assert_eq!(data.and_then(|d| d.downcast_ref::<u8>()), Some(&7));
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let store = store_with(&[
            ("fastestmirrorcb", Input::from(cb)),
            ("fastestmirrordata", Input::from(user_data(7u8))),
            ("progressdata", Input::from(user_data(1u8))),
        ]);
        OptionsView::new(&store).notify_fastest_mirror(FastestMirrorStage::Detection, None);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn to_json_lists_every_option() {
        let store = OptionStore::new();
        let json = OptionsView::new(&store).to_json().unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), crate::options::OPTIONS.len());
        assert_eq!(map["sslverifypeer"], serde_json::json!(true));
    }
}
