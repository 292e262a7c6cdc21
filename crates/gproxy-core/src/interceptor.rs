//! Request interceptor: wraps the host's outbound dispatch so `request-url`
//! calls are resolved through a [`Resolver`] before they go out.
//!
//! The host owns a single [`DispatchSlot`]. Installing swaps the slot's
//! function for a wrapper around it; uninstalling puts the exact captured
//! function back.

use anyhow::Result;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::resolver::Resolver;

/// Channel whose requests carry a target URL in their options.
pub const REQUEST_URL_CHANNEL: &str = "request-url";

/// Option payload of a dispatched request.
pub type RequestOptions = Map<String, Value>;

/// Host dispatch function: `(channel, salt, options, rest...)`.
pub type Dispatch = Rc<dyn Fn(&str, &str, RequestOptions, &[Value]) -> Result<()>>;

/// The host's well-known mutable reference to its dispatch function.
pub struct DispatchSlot {
    current: RefCell<Dispatch>,
}

impl DispatchSlot {
    pub fn new(dispatch: Dispatch) -> Self {
        Self {
            current: RefCell::new(dispatch),
        }
    }

    /// The function currently in the slot.
    pub fn current(&self) -> Dispatch {
        Rc::clone(&self.current.borrow())
    }

    /// Puts `dispatch` in the slot and returns the previous function.
    pub fn replace(&self, dispatch: Dispatch) -> Dispatch {
        self.current.replace(dispatch)
    }

    /// Sends a request through whatever is currently in the slot.
    pub fn dispatch(
        &self,
        channel: &str,
        salt: &str,
        options: RequestOptions,
        rest: &[Value],
    ) -> Result<()> {
        // Clone out first so the wrapped call may touch the slot again.
        let dispatch = self.current();
        dispatch(channel, salt, options, rest)
    }
}

impl fmt::Debug for DispatchSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchSlot").finish_non_exhaustive()
    }
}

/// Wraps an original dispatch function with URL resolution.
pub struct Interceptor<R> {
    original: Dispatch,
    resolver: R,
}

impl<R: Resolver + 'static> Interceptor<R> {
    pub fn new(original: Dispatch, resolver: R) -> Self {
        Self { original, resolver }
    }

    /// Rewrites `options` in place if `channel` is [`REQUEST_URL_CHANNEL`]
    /// and the options carry a string `url`.
    pub fn rewrite_options(&self, channel: &str, options: &mut RequestOptions) {
        if channel != REQUEST_URL_CHANNEL {
            return;
        }
        let Some(url) = options.get("url").and_then(Value::as_str) else {
            return;
        };

        let resolved = self.resolver.resolve(url);
        if resolved.url != url {
            tracing::debug!("rewrote {} -> {}", url, resolved.url);
        }
        options.insert("url".to_string(), Value::String(resolved.url));
        if let Some(headers) = resolved.headers {
            let headers = headers
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect::<Map<_, _>>();
            options.insert("headers".to_string(), Value::Object(headers));
        }
    }

    /// Consumes the interceptor and returns the wrapped dispatch function.
    pub fn into_dispatch(self) -> Dispatch {
        Rc::new(
            move |channel: &str, salt: &str, mut options: RequestOptions, rest: &[Value]| {
                self.rewrite_options(channel, &mut options);
                (self.original)(channel, salt, options, rest)
            },
        )
    }

    /// Wraps whatever is in `slot` and stores the wrapper there.
    pub fn install(slot: &DispatchSlot, resolver: R, plugin_name: &str) -> InstalledInterceptor {
        let original = slot.current();
        let wrapped = Interceptor::new(Rc::clone(&original), resolver).into_dispatch();
        slot.replace(wrapped);
        tracing::info!("[{}] request dispatch has been taken over", plugin_name);
        InstalledInterceptor {
            original,
            plugin_name: plugin_name.to_string(),
        }
    }
}

/// Handle returned by [`Interceptor::install`]; restores the slot on
/// [`uninstall`](InstalledInterceptor::uninstall).
pub struct InstalledInterceptor {
    original: Dispatch,
    plugin_name: String,
}

impl InstalledInterceptor {
    /// The dispatch function captured at install time.
    pub fn original(&self) -> &Dispatch {
        &self.original
    }

    pub fn uninstall(self, slot: &DispatchSlot) {
        slot.replace(self.original);
        tracing::info!("[{}] request dispatch restored", self.plugin_name);
    }
}

impl fmt::Debug for InstalledInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstalledInterceptor")
            .field("plugin_name", &self.plugin_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror::Mirror;
    use crate::resolver::{ActiveMirror, MirrorResolver};
    use serde_json::json;

    type Calls = Rc<RefCell<Vec<(String, String, RequestOptions, Vec<Value>)>>>;

    fn recording_dispatch() -> (Dispatch, Calls) {
        let calls: Calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let dispatch: Dispatch = Rc::new(
            move |channel: &str, salt: &str, options: RequestOptions, rest: &[Value]| -> Result<()> {
                sink.borrow_mut()
                    .push((channel.to_string(), salt.to_string(), options, rest.to_vec()));
                Ok(())
            },
        );
        (dispatch, calls)
    }

    fn options(value: Value) -> RequestOptions {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn resolver(mirror: Mirror) -> MirrorResolver {
        MirrorResolver::new(ActiveMirror::new(mirror))
    }

    #[test]
    fn request_url_channel_is_rewritten_and_other_fields_kept() {
        let (original, calls) = recording_dispatch();
        let wrapped = Interceptor::new(original, resolver(Mirror::Fastgit)).into_dispatch();

        let opts = options(json!({
            "url": "https://github.com/foo/bar/releases/download/v1/a.zip",
            "method": "GET",
            "contentType": "application/json"
        }));
        wrapped("request-url", "salt-1", opts, &[json!(1), json!("x")]).unwrap();

        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        let (channel, salt, sent, rest) = &calls[0];
        assert_eq!(channel, "request-url");
        assert_eq!(salt, "salt-1");
        assert_eq!(
            sent["url"],
            json!("https://download.fastgit.org/foo/bar/releases/download/v1/a.zip")
        );
        assert_eq!(sent["method"], json!("GET"));
        assert_eq!(sent["contentType"], json!("application/json"));
        assert_eq!(
            sent["headers"],
            json!({
                "content-type": "application/x-www-form-urlencoded",
                "Access-Control-Allow-Origin": "*"
            })
        );
        assert_eq!(rest, &vec![json!(1), json!("x")]);
    }

    #[test]
    fn other_channels_pass_through_untouched() {
        let (original, calls) = recording_dispatch();
        let wrapped = Interceptor::new(original, resolver(Mirror::Fastgit)).into_dispatch();

        let opts = options(json!({ "url": "https://github.com/foo/bar" }));
        wrapped("open-url", "s", opts.clone(), &[]).unwrap();

        assert_eq!(calls.borrow()[0].2, opts);
    }

    #[test]
    fn missing_or_non_string_url_is_forwarded_unchanged() {
        let (original, calls) = recording_dispatch();
        let wrapped = Interceptor::new(original, resolver(Mirror::Fastgit)).into_dispatch();

        let no_url = options(json!({ "method": "GET" }));
        wrapped("request-url", "s", no_url.clone(), &[]).unwrap();
        let numeric = options(json!({ "url": 42 }));
        wrapped("request-url", "s", numeric.clone(), &[]).unwrap();

        let calls = calls.borrow();
        assert_eq!(calls[0].2, no_url);
        assert_eq!(calls[1].2, numeric);
    }

    #[test]
    fn non_http_url_keeps_existing_headers() {
        let (original, calls) = recording_dispatch();
        let wrapped = Interceptor::new(original, resolver(Mirror::Fastgit)).into_dispatch();

        let opts = options(json!({ "url": "app://local/file", "headers": { "X-A": "1" } }));
        wrapped("request-url", "s", opts.clone(), &[]).unwrap();
        assert_eq!(calls.borrow()[0].2, opts);
    }

    #[test]
    fn resolved_headers_replace_existing_headers() {
        let (original, calls) = recording_dispatch();
        let wrapped = Interceptor::new(original, resolver(Mirror::Fastgit)).into_dispatch();

        let opts = options(json!({ "url": "https://github.com/a/b", "headers": { "X-A": "1" } }));
        wrapped("request-url", "s", opts, &[]).unwrap();
        let calls = calls.borrow();
        assert!(calls[0].2["headers"].get("X-A").is_none());
        assert_eq!(calls[0].2["headers"]["Access-Control-Allow-Origin"], json!("*"));
    }

    #[test]
    fn install_then_uninstall_restores_exact_original() {
        let (original, calls) = recording_dispatch();
        let slot = DispatchSlot::new(Rc::clone(&original));
        let before = slot.current();

        let installed = Interceptor::install(&slot, resolver(Mirror::Ghproxy), "gproxy");
        assert!(!Rc::ptr_eq(&slot.current(), &before));
        assert!(Rc::ptr_eq(installed.original(), &before));

        slot.dispatch(
            "request-url",
            "s",
            options(json!({ "url": "https://github.com/foo/bar" })),
            &[],
        )
        .unwrap();

        installed.uninstall(&slot);
        assert!(Rc::ptr_eq(&slot.current(), &before));

        slot.dispatch(
            "request-url",
            "s",
            options(json!({ "url": "https://github.com/foo/bar" })),
            &[],
        )
        .unwrap();

        let calls = calls.borrow();
        assert_eq!(
            calls[0].2["url"],
            json!("https://mirror.ghproxy.com/https://github.com/foo/bar")
        );
        assert_eq!(calls[1].2["url"], json!("https://github.com/foo/bar"));
    }

    #[test]
    fn errors_from_original_dispatch_propagate() {
        let failing: Dispatch = Rc::new(|_: &str, _: &str, _: RequestOptions, _: &[Value]| -> Result<()> {
            anyhow::bail!("host refused request")
        });
        let wrapped = Interceptor::new(failing, resolver(Mirror::Fastgit)).into_dispatch();
        let err = wrapped("request-url", "s", RequestOptions::new(), &[]).unwrap_err();
        assert_eq!(err.to_string(), "host refused request");
    }
}
