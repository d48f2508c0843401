// FortiGate session layer
//
// Wraps `reqwest::Client` with the web portal's login handshake and the
// `results`-envelope contract of the cmdb/monitor endpoints. The handshake
// is cookie-based: `/logincheck` sets the session cookies (and the CSRF
// token cookie), an optional disclaimer acceptance follows, and a probe of
// an authenticated-only endpoint is the one reliable login signal -- the
// portal answers 200 to `/logincheck` even for bad credentials.

use reqwest::header::SET_COOKIE;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Cookie holding the anti-forgery token, wrapped in literal quote
/// characters by the portal.
const CSRF_COOKIE: &str = "ccsrftoken";

/// Header the API expects the unwrapped token in.
const CSRF_HEADER: &str = "X-CSRFTOKEN";

/// Marker in the `/logincheck` response body when a login banner must be
/// accepted before the session becomes usable.
const DISCLAIMER_MARKER: &str = "logindisclaimer";

/// Authenticated-only endpoint probed to validate the handshake.
const VALIDATION_PATH: &str = "api/v2/cmdb/system/vdom";

/// An authenticated session against one firewall's admin portal.
///
/// Obtained through [`FortiSession::establish`]; every request carries the
/// session cookies from the shared jar plus the `X-CSRFTOKEN` header when
/// the portal issued one.
pub struct FortiSession {
    http: reqwest::Client,
    base_url: Url,
    vdom: String,
    csrf_token: Option<String>,
}

impl FortiSession {
    /// Perform the full login handshake and return an authenticated session.
    ///
    /// 1. `POST /logincheck` with form-encoded `username`/`secretkey`
    /// 2. capture the `ccsrftoken` cookie (quote characters stripped)
    /// 3. accept the login disclaimer if the portal presents one
    /// 4. probe an authenticated endpoint; non-2xx there is the only
    ///    reliable rejection signal
    ///
    /// Every step runs exactly once -- no retries.
    pub async fn establish(
        base_url: Url,
        vdom: String,
        username: &str,
        password: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;

        let login_url = base_url.join("logincheck")?;
        debug!("POST {}", login_url);

        let resp = http
            .post(login_url)
            .form(&[("username", username), ("secretkey", password.expose_secret())])
            .send()
            .await
            .map_err(Error::Transport)?;

        let csrf_token = extract_csrf_token(&resp);
        if csrf_token.is_some() {
            debug!("received CSRF token");
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        let session = Self {
            http,
            base_url,
            vdom,
            csrf_token,
        };

        if body.contains(DISCLAIMER_MARKER) {
            session.accept_disclaimer().await?;
        }

        session.validate().await?;
        Ok(session)
    }

    /// The firewall base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The virtual domain every data request is scoped to.
    pub fn vdom(&self) -> &str {
        &self.vdom
    }

    /// Fetch a collection endpoint and unwrap its `results` array.
    ///
    /// `GET {base}/{path}?vdom={vdom}`. A non-2xx status is an API error;
    /// a 2xx body without a `results` array is [`Error::MissingResults`]
    /// (an empty array is a valid, empty collection).
    pub async fn fetch_results(&self, path: &str) -> Result<Vec<Value>, Error> {
        let url = self.endpoint_url(path)?;
        debug!("GET {}", url);

        let resp = self.request(url).send().await.map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Api {
                endpoint: path.to_owned(),
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        let payload: Value =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        match payload.get("results") {
            Some(Value::Array(results)) => Ok(results.clone()),
            Some(_) => Err(Error::Deserialization {
                message: "`results` is not an array".into(),
                body,
            }),
            None => Err(Error::MissingResults {
                endpoint: path.to_owned(),
            }),
        }
    }

    /// End the session. Best-effort: the caller decides whether a failure
    /// here matters (it normally doesn't -- the session dies with the run).
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.base_url.join("logout")?;
        debug!("GET {}", url);
        self.request(url).send().await.map_err(Error::Transport)?;
        debug!("logout complete");
        Ok(())
    }

    // ── Handshake steps ──────────────────────────────────────────────

    /// Accept the login banner the portal interposed before the session
    /// becomes usable.
    async fn accept_disclaimer(&self) -> Result<(), Error> {
        let url = self.base_url.join("logindisclaimer")?;
        debug!("accepting login disclaimer at {}", url);

        self.request_post(url)
            .form(&[("confirm", "1"), ("redir", "/ng")])
            .send()
            .await
            .map_err(Error::Transport)?;
        Ok(())
    }

    /// Probe an authenticated-only endpoint. The portal accepts any
    /// credentials at `/logincheck`, so this status check is the only
    /// trustworthy signal that the login actually succeeded.
    async fn validate(&self) -> Result<(), Error> {
        let url = self.base_url.join(VALIDATION_PATH)?;
        debug!("validating session via {}", url);

        let resp = self.request(url).send().await.map_err(Error::Transport)?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Authentication {
                message: format!("validation probe rejected (HTTP {status})"),
            })
        }
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Build a vdom-scoped URL for a data endpoint.
    fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        let mut url = self.base_url.join(path)?;
        url.query_pairs_mut().append_pair("vdom", &self.vdom);
        Ok(url)
    }

    /// A GET request builder carrying the CSRF header when one was issued.
    fn request(&self, url: Url) -> reqwest::RequestBuilder {
        self.with_csrf(self.http.get(url))
    }

    /// A POST request builder carrying the CSRF header when one was issued.
    fn request_post(&self, url: Url) -> reqwest::RequestBuilder {
        self.with_csrf(self.http.post(url))
    }

    fn with_csrf(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.csrf_token {
            Some(token) => builder.header(CSRF_HEADER, token.as_str()),
            None => builder,
        }
    }
}

/// Pull the CSRF token out of the `Set-Cookie` headers of the login
/// response. The portal wraps the value in literal quote characters;
/// those are stripped before the token goes into a header.
fn extract_csrf_token(resp: &reqwest::Response) -> Option<String> {
    resp.headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .find_map(|raw| {
            let (name, rest) = raw.split_once('=')?;
            if name.trim() != CSRF_COOKIE {
                return None;
            }
            let value = rest.split(';').next().unwrap_or(rest).trim();
            Some(unwrap_quoted(value).to_owned())
        })
}

/// Strip one pair of wrapping quote characters, if present.
fn unwrap_quoted(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
