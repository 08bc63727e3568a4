//! Client layer: orchestrates transport calls, owns the session, maps error codes.

mod error;
mod session;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

pub use error::Sms24x7Error;
use session::{SessionScope, SessionStore};

use crate::domain::{
    ApiHost, ApiMethod, ApiRequest, ApiResponse, ApiVersion, Email, MessageText, Password,
    PushMsg, PushMsgResponse, PushOptions, RawPhoneNumber, SessionCookie, ValidationError,
};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
        cookie: Option<&'a str>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
        cookie: Option<&'a str>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut request = self.client.post(url).form(&params);
            if let Some(cookie) = cookie {
                request = request.header(reqwest::header::COOKIE, cookie);
            }
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// URL scheme used to reach the API.
pub enum Scheme {
    #[default]
    Https,
    /// Plain HTTP; only for test servers or explicit downgrades.
    Http,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Https => "https",
            Self::Http => "http",
        }
    }
}

#[derive(Debug, Clone)]
/// Account credentials used by `login` and credential-authenticated sends.
pub struct Credentials {
    email: Email,
    password: Password,
}

impl Credentials {
    /// Validate that both parts are non-empty.
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            email: Email::new(email)?,
            password: Password::new(password)?,
        })
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    fn push_form_params(&self, request: &mut ApiRequest) {
        request.insert(Email::FIELD, self.email.as_str());
        request.insert(Password::FIELD, self.password.as_str());
    }
}

#[derive(Debug, Clone)]
/// Builder for [`Sms24x7Client`].
///
/// Use this when you need to point the client at another host, speak another API
/// version, drop TLS for a local test server, or tune the HTTP client.
pub struct Sms24x7ClientBuilder {
    credentials: Credentials,
    host: String,
    api_version: String,
    scheme: Scheme,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl Sms24x7ClientBuilder {
    /// Create a builder targeting `https://api.sms24x7.ru/` with API version `1.1`.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            host: ApiHost::DEFAULT.to_owned(),
            api_version: ApiVersion::DEFAULT.to_owned(),
            scheme: Scheme::Https,
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the API host (`host` or `host:port`).
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Override the `api` version sent with every request.
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Use HTTPS (`true`, the default) or plain HTTP (`false`).
    pub fn use_tls(mut self, use_tls: bool) -> Self {
        self.scheme = if use_tls { Scheme::Https } else { Scheme::Http };
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Validate the overrides and build a [`Sms24x7Client`].
    pub fn build(self) -> Result<Sms24x7Client, Sms24x7Error> {
        let host = ApiHost::new(self.host)?;
        let api_version = ApiVersion::new(self.api_version)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| Sms24x7Error::Transport(Box::new(err)))?;

        Ok(Sms24x7Client {
            credentials: self.credentials,
            host,
            api_version,
            scheme: self.scheme,
            http: Arc::new(ReqwestTransport { client }),
            session: SessionStore::default(),
        })
    }
}

#[derive(Clone)]
/// High-level sms24x7 client.
///
/// Every API call is one form-encoded POST to `https://api.sms24x7.ru/` with
/// `format=json`. Clones share the HTTP connection pool and the login session, so a
/// session obtained through one clone authenticates sends made through another.
pub struct Sms24x7Client {
    credentials: Credentials,
    host: ApiHost,
    api_version: ApiVersion,
    scheme: Scheme,
    http: Arc<dyn HttpTransport>,
    session: SessionStore,
}

impl Sms24x7Client {
    /// Create a client with the default host, API version and HTTPS.
    ///
    /// For more customization, use [`Sms24x7Client::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            host: ApiHost::default(),
            api_version: ApiVersion::default(),
            scheme: Scheme::Https,
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
            session: SessionStore::default(),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> Sms24x7ClientBuilder {
        Sms24x7ClientBuilder::new(credentials)
    }

    fn endpoint(&self, scheme: Scheme) -> String {
        format!("{}://{}/", scheme.as_str(), self.host.as_str())
    }

    /// Send one raw API request and decode the response envelope.
    ///
    /// `format` is always forced to `json`. When `cookie` is given it is sent as the
    /// `Cookie` header.
    ///
    /// Errors:
    /// - [`Sms24x7Error::Transport`], [`Sms24x7Error::HttpStatus`] and
    ///   [`Sms24x7Error::Parse`] when the call fails or the response lacks
    ///   `response.msg.err_code`,
    /// - [`Sms24x7Error::Api`] for any positive `err_code`.
    pub async fn communicate(
        &self,
        mut request: ApiRequest,
        cookie: Option<&SessionCookie>,
        scheme: Scheme,
    ) -> Result<ApiResponse, Sms24x7Error> {
        request.force_json_format();
        let url = self.endpoint(scheme);

        let response = self
            .http
            .post_form(&url, request.into_form(), cookie.map(SessionCookie::as_str))
            .await
            .map_err(Sms24x7Error::Transport)?;

        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(Sms24x7Error::HttpStatus {
                status: response.status,
                body,
            });
        }

        let envelope =
            crate::transport::decode_envelope(&response.body).map_err(Sms24x7Error::parse)?;

        if !envelope.error_code.is_success() {
            return Err(Sms24x7Error::from_error_code(
                envelope.error_code,
                envelope.text,
            ));
        }

        Ok(ApiResponse {
            error_code: envelope.error_code,
            data: envelope.data,
        })
    }

    /// Send a message authenticating with the stored credentials in the same request.
    ///
    /// `phone` is in international format (like `7xxxyyyzzzz`). `options` are merged
    /// into the request after the base fields.
    ///
    /// Errors:
    /// - [`Sms24x7Error::Api`] for server error codes (e.g. `Auth` for bad credentials),
    /// - [`Sms24x7Error::Parse`] when a successful response lacks `n_raw_sms` or `credits`.
    pub async fn send_message_with_credentials(
        &self,
        phone: RawPhoneNumber,
        text: MessageText,
        options: PushOptions,
    ) -> Result<PushMsgResponse, Sms24x7Error> {
        let mut base = ApiRequest::new(ApiMethod::PushMsg, &self.api_version);
        self.credentials.push_form_params(&mut base);
        let request =
            crate::transport::encode_push_msg_form(base, &PushMsg::new(phone, text, options));

        let response = self.communicate(request, None, self.scheme).await?;
        crate::transport::decode_push_msg_data(response.data).map_err(Sms24x7Error::parse)
    }

    /// Log in and store the returned session, replacing any active one.
    ///
    /// Returns the cookie (`sid=<session id>`) that authenticates
    /// [`Sms24x7Client::send_message_with_session`].
    pub async fn login(&self) -> Result<SessionCookie, Sms24x7Error> {
        let mut request = crate::transport::encode_login_form(&self.api_version);
        self.credentials.push_form_params(&mut request);

        let response = self.communicate(request, None, self.scheme).await?;
        let sid =
            crate::transport::decode_login_data(&response.data).map_err(Sms24x7Error::parse)?;

        let cookie = SessionCookie::from(&sid);
        if self.session.set(cookie.clone()).is_some() {
            tracing::debug!("sms24x7 session replaced");
        } else {
            tracing::debug!("sms24x7 session established");
        }
        Ok(cookie)
    }

    /// Log in, run `work` with the session active, then clear the session.
    ///
    /// The session is cleared however `work` ends: success, error, panic, or the
    /// returned future being dropped. If login fails, `work` is not run.
    ///
    /// ```rust,no_run
    /// # use sms24x7::{Credentials, MessageText, PushOptions, RawPhoneNumber, Sms24x7Client, Sms24x7Error};
    /// # async fn run(client: Sms24x7Client, phones: Vec<RawPhoneNumber>) -> Result<(), Sms24x7Error> {
    /// client
    ///     .login_scoped(|client| async move {
    ///         for phone in phones {
    ///             let text = MessageText::new("hello")?;
    ///             client
    ///                 .send_message_with_session(phone, text, PushOptions::default())
    ///                 .await?;
    ///         }
    ///         Ok::<_, Sms24x7Error>(())
    ///     })
    ///     .await
    /// # }
    /// ```
    pub async fn login_scoped<F, Fut, T, E>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(Sms24x7Client) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<Sms24x7Error>,
    {
        self.login().await?;
        let _scope = SessionScope::new(&self.session);
        work(self.clone()).await
    }

    /// Send a message using the session from a previous [`Sms24x7Client::login`].
    ///
    /// Errors:
    /// - [`Sms24x7Error::NoSession`] without any network call when no session is active,
    /// - otherwise as [`Sms24x7Client::send_message_with_credentials`]; a
    ///   `SessionExpired` kind means the session must be renewed with `login`.
    pub async fn send_message_with_session(
        &self,
        phone: RawPhoneNumber,
        text: MessageText,
        options: PushOptions,
    ) -> Result<PushMsgResponse, Sms24x7Error> {
        let cookie = self.session.get().ok_or(Sms24x7Error::NoSession)?;

        let base = ApiRequest::new(ApiMethod::PushMsg, &self.api_version);
        let request =
            crate::transport::encode_push_msg_form(base, &PushMsg::new(phone, text, options));

        let response = self.communicate(request, Some(&cookie), self.scheme).await?;
        crate::transport::decode_push_msg_data(response.data).map_err(Sms24x7Error::parse)
    }

    /// Cookie of the active session, if logged in.
    pub fn session_cookie(&self) -> Option<SessionCookie> {
        self.session.get()
    }

    /// Forget the active session. Nothing is sent to the server.
    pub fn clear_session(&self) {
        if self.session.clear().is_some() {
            tracing::debug!("sms24x7 session cleared");
        }
    }
}
