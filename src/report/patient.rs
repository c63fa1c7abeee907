//! Patient info resolution
//!
//! Fetches the signed-in user's profile and merges it with caller overrides
//! and identity fields the form itself collected. A failed lookup never
//! aborts a report; it is reported as [`ProfileLookup::Unavailable`].

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{display_value, Disease, FormInputs, GenderEncoding, PatientInfo, NOT_PROVIDED};
use crate::report::ReportError;

/// Outcome of a profile lookup
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileLookup {
    /// The endpoint answered; fields may still be empty
    Fetched(PatientInfo),
    /// Network, status or parse failure
    Unavailable { reason: String },
}

impl ProfileLookup {
    pub fn info(&self) -> PatientInfo {
        match self {
            ProfileLookup::Fetched(info) => info.clone(),
            ProfileLookup::Unavailable { .. } => PatientInfo::default(),
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            ProfileLookup::Fetched(_) => "fetched",
            ProfileLookup::Unavailable { .. } => "unavailable",
        }
    }
}

/// Somewhere a patient profile can be read from
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_profile(&self) -> ProfileLookup;
}

/// Source used when no backend is configured
pub struct NoProfile;

#[async_trait]
impl ProfileSource for NoProfile {
    async fn fetch_profile(&self) -> ProfileLookup {
        ProfileLookup::Unavailable {
            reason: "profile lookup disabled".to_string(),
        }
    }
}

/// Profile body as served by `/user/profile`
#[derive(Debug, Deserialize)]
struct ProfileBody {
    name: Option<String>,
    username: Option<String>,
    age: Option<Value>,
    gender: Option<String>,
}

impl From<ProfileBody> for PatientInfo {
    fn from(body: ProfileBody) -> Self {
        let name = body
            .name
            .filter(|n| !n.trim().is_empty())
            .or(body.username.filter(|u| !u.trim().is_empty()));

        PatientInfo {
            name,
            age: body
                .age
                .filter(|a| !a.is_null())
                .map(|a| display_value(&a))
                .filter(|a| !a.is_empty()),
            gender: body.gender.filter(|g| !g.trim().is_empty()),
        }
    }
}

/// Reads the profile from the backend over HTTP
pub struct HttpProfileSource {
    profile_url: String,
    session_cookie: Option<String>,
    client: reqwest::Client,
}

impl HttpProfileSource {
    /// `api_base` is the API root, e.g. `http://localhost:5000/api`
    pub fn new(
        api_base: &str,
        session_cookie: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ReportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            profile_url: format!("{}/user/profile", api_base.trim_end_matches('/')),
            session_cookie,
            client: builder.build()?,
        })
    }

    pub fn profile_url(&self) -> &str {
        &self.profile_url
    }
}

#[async_trait]
impl ProfileSource for HttpProfileSource {
    async fn fetch_profile(&self) -> ProfileLookup {
        let mut request = self.client.get(&self.profile_url);
        if let Some(cookie) = &self.session_cookie {
            request = request.header(reqwest::header::COOKIE, cookie);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url = %self.profile_url, error = %e, "Profile request failed");
                return ProfileLookup::Unavailable { reason: e.to_string() };
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %self.profile_url, status = status.as_u16(), "Profile endpoint returned an error status");
            return ProfileLookup::Unavailable {
                reason: format!("profile endpoint returned {}", status.as_u16()),
            };
        }

        match response.json::<ProfileBody>().await {
            Ok(body) => ProfileLookup::Fetched(body.into()),
            Err(e) => {
                tracing::warn!(url = %self.profile_url, error = %e, "Profile body could not be parsed");
                ProfileLookup::Unavailable { reason: e.to_string() }
            }
        }
    }
}

/// Identity block as printed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientIdentity {
    pub name: String,
    pub age: String,
    pub gender: String,
}

/// Resolve the printed identity.
///
/// Caller overrides beat the fetched profile. Age and gender the form itself
/// collected beat both, with gender decoded by the disease form's own encoding.
pub fn resolve_identity(
    disease: Disease,
    form: &FormInputs,
    fetched: &ProfileLookup,
    overrides: &PatientInfo,
) -> PatientIdentity {
    let merged = fetched.info().overlay(overrides);

    let name = merged.name.clone().unwrap_or_else(|| NOT_PROVIDED.to_string());

    let age = form
        .filled_text("age")
        .or_else(|| form.filled_text("Age"))
        .or_else(|| merged.age.clone())
        .unwrap_or_else(|| NOT_PROVIDED.to_string());

    let gender = GenderEncoding::for_disease(disease)
        .decode(form)
        .map(|g| g.display_name().to_string())
        .or_else(|| merged.gender.clone())
        .unwrap_or_else(|| NOT_PROVIDED.to_string());

    PatientIdentity { name, age, gender }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn unavailable() -> ProfileLookup {
        ProfileLookup::Unavailable { reason: "connection refused".into() }
    }

    /// Answer one request with a canned HTTP/1.1 response. Returns the API
    /// base to point a source at and a handle yielding the raw request head.
    async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            // The client may hang up as soon as it has the status line
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&head).to_string()
        });

        (format!("http://{}/api", addr), handle)
    }

    fn source(api_base: &str) -> HttpProfileSource {
        HttpProfileSource::new(api_base, Some("session=abc".into()), Some(Duration::from_secs(5)))
            .unwrap()
    }

    #[test]
    fn test_unavailable_profile_falls_back_to_placeholder() {
        let identity = resolve_identity(
            Disease::Kidney,
            &FormInputs::default(),
            &unavailable(),
            &PatientInfo::default(),
        );
        assert_eq!(identity.name, NOT_PROVIDED);
        assert_eq!(identity.age, NOT_PROVIDED);
        assert_eq!(identity.gender, NOT_PROVIDED);
    }

    #[test]
    fn test_form_age_beats_profile_and_overrides() {
        let fetched = ProfileLookup::Fetched(PatientInfo {
            name: Some("Profile".into()),
            age: Some("70".into()),
            gender: Some("Female".into()),
        });
        let overrides = PatientInfo { age: Some("65".into()), ..Default::default() };
        let form = FormInputs::from_value(json!({"Age": "45"}));

        let identity = resolve_identity(Disease::Liver, &form, &fetched, &overrides);
        assert_eq!(identity.name, "Profile");
        assert_eq!(identity.age, "45");
        assert_eq!(identity.gender, "Female");

        let identity = resolve_identity(Disease::Liver, &FormInputs::default(), &fetched, &overrides);
        assert_eq!(identity.age, "65");
    }

    #[test]
    fn test_gender_decoding_is_per_disease() {
        let none = ProfileLookup::Fetched(PatientInfo::default());
        let overrides = PatientInfo::default();

        let heart = resolve_identity(
            Disease::Heart,
            &FormInputs::from_value(json!({"gender": "1"})),
            &none,
            &overrides,
        );
        let liver = resolve_identity(
            Disease::Liver,
            &FormInputs::from_value(json!({"Gender": "1"})),
            &none,
            &overrides,
        );
        assert_eq!(heart.gender, "Female");
        assert_eq!(liver.gender, "Male");

        let heart = resolve_identity(
            Disease::Heart,
            &FormInputs::from_value(json!({"gender": "0"})),
            &none,
            &overrides,
        );
        let liver = resolve_identity(
            Disease::Liver,
            &FormInputs::from_value(json!({"Gender": "0"})),
            &none,
            &overrides,
        );
        assert_eq!(heart.gender, "Male");
        assert_eq!(liver.gender, "Female");
    }

    #[test]
    fn test_profile_body_prefers_name_over_username() {
        let body: ProfileBody =
            serde_json::from_value(json!({"name": "", "username": "jdoe", "age": 33})).unwrap();
        let info = PatientInfo::from(body);
        assert_eq!(info.name.as_deref(), Some("jdoe"));
        assert_eq!(info.age.as_deref(), Some("33"));
        assert_eq!(info.gender, None);
    }

    #[test]
    fn test_profile_url_is_joined() {
        let source = HttpProfileSource::new("http://localhost:5000/api/", None, None).unwrap();
        assert_eq!(source.profile_url(), "http://localhost:5000/api/user/profile");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_unavailable() {
        let source = HttpProfileSource::new(
            "http://127.0.0.1:1/api",
            Some("session=abc".into()),
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        let lookup = source.fetch_profile().await;
        assert!(matches!(lookup, ProfileLookup::Unavailable { .. }));
        assert_eq!(lookup.status(), "unavailable");
        assert!(lookup.info().is_empty());
    }

    #[tokio::test]
    async fn test_error_status_is_unavailable() {
        let (base, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;
        let lookup = source(&base).fetch_profile().await;
        server.await.unwrap();

        match lookup {
            ProfileLookup::Unavailable { reason } => assert!(reason.contains("500"), "{}", reason),
            other => panic!("expected unavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unparseable_body_is_unavailable() {
        let (base, server) = serve_once("200 OK", "not json").await;
        let lookup = source(&base).fetch_profile().await;
        server.await.unwrap();

        assert!(matches!(lookup, ProfileLookup::Unavailable { .. }));
        assert!(lookup.info().is_empty());
    }

    #[tokio::test]
    async fn test_profile_fetched_with_session_cookie() {
        let (base, server) = serve_once("200 OK", r#"{"username":"jdoe","age":40}"#).await;
        let lookup = source(&base).fetch_profile().await;
        let head = server.await.unwrap().to_ascii_lowercase();

        assert!(head.starts_with("get /api/user/profile "), "{}", head);
        assert!(head.contains("cookie: session=abc"), "{}", head);
        assert_eq!(lookup.status(), "fetched");
        assert_eq!(
            lookup,
            ProfileLookup::Fetched(PatientInfo {
                name: Some("jdoe".into()),
                age: Some("40".into()),
                gender: None,
            })
        );
    }

    #[tokio::test]
    async fn test_no_profile_source() {
        assert!(matches!(
            NoProfile.fetch_profile().await,
            ProfileLookup::Unavailable { .. }
        ));
    }
}
