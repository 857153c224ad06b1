//! Login envelope encoding and login response decoding.
//!
//! Responses are read with a streaming XML reader and matched on element
//! paths by local name, so namespace prefixes and whitespace do not matter.

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use sfreport_types::{Credentials, ReportError, Session};

const SESSION_ID_PATH: &[&str] = &["loginResponse", "result", "sessionId"];
const SERVER_URL_PATH: &[&str] = &["loginResponse", "result", "serverUrl"];
const FAULT_CODE_PATH: &[&str] = &["Fault", "faultcode"];
const FAULT_STRING_PATH: &[&str] = &["Fault", "faultstring"];

/// Build the login request body.
///
/// Username and password are entity-escaped; the security token is appended
/// to the password with no separator.
#[must_use]
pub fn login_envelope(creds: &Credentials) -> String {
    let secret = format!("{}{}", creds.password, creds.security_token);
    let username = escape(creds.username.as_str());
    let password = escape(secret.as_str());
    format!(
        r#"<?xml version="1.0" encoding="utf-8" ?>
<env:Envelope
        xmlns:xsd="http://www.w3.org/2001/XMLSchema"
        xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
        xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">
    <env:Body>
        <n1:login xmlns:n1="urn:partner.soap.sforce.com">
            <n1:username>{username}</n1:username>
            <n1:password>{password}</n1:password>
        </n1:login>
    </env:Body>
</env:Envelope>"#
    )
}

/// Fault code and message reported by a refused login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginFault {
    /// e.g. `INVALID_LOGIN`; empty if absent.
    pub code: String,
    /// Fault string, or the raw body when neither marker is present.
    pub message: String,
}

impl LoginFault {
    /// Extract the fault fields from a non-2xx login body.
    ///
    /// Bodies that are not well-formed XML are treated as carrying no markers.
    #[must_use]
    pub fn parse(body: &str) -> Self {
        let [code, message] = extract_paths(body, [FAULT_CODE_PATH, FAULT_STRING_PATH])
            .unwrap_or_default()
            .map(Option::unwrap_or_default);
        if code.is_empty() && message.is_empty() {
            return Self {
                code,
                message: body.to_string(),
            };
        }
        Self { code, message }
    }

    /// Convert into an `Auth` error recording the refusal `status`.
    #[must_use]
    pub fn into_error(self, status: u16) -> ReportError {
        ReportError::auth_status(status, self.code, self.message)
    }
}

impl From<LoginFault> for ReportError {
    fn from(f: LoginFault) -> Self {
        Self::auth(f.code, f.message)
    }
}

/// Build a [`Session`] from a successful login body.
///
/// # Errors
/// Returns `Auth` if the body is not XML, if the session id or server URL is
/// missing, or if the server URL has no host.
pub fn session_from_login_response(body: &str, api_version: &str) -> Result<Session, ReportError> {
    let [session_id, server_url] = extract_paths(body, [SESSION_ID_PATH, SERVER_URL_PATH])
        .map_err(|e| ReportError::auth("", format!("unreadable login response: {e}")))?;

    let session_id = session_id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ReportError::auth("", "sessionId not found in response"))?;
    let server_url = server_url
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ReportError::auth("", "serverUrl not found in response"))?;

    let server_host = server_host(&server_url)?;
    Ok(Session::new(session_id, server_host, api_version))
}

/// Host of `server_url`, with the port appended when one is given.
fn server_host(server_url: &str) -> Result<String, ReportError> {
    let parsed = url::Url::parse(server_url).map_err(|e| {
        ReportError::auth("", format!("could not parse serverUrl `{server_url}`: {e}"))
    })?;
    let host = parsed
        .host_str()
        .ok_or_else(|| ReportError::auth("", format!("serverUrl `{server_url}` has no host")))?;
    Ok(match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Collect the text of the first element whose ancestry ends with each path.
fn extract_paths<const N: usize>(
    body: &str,
    paths: [&[&str]; N],
) -> Result<[Option<String>; N], quick_xml::Error> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<String> = Vec::new();
    let mut found: [Option<String>; N] = std::array::from_fn(|_| None);
    let mut done = [false; N];

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                stack.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Event::End(_) => {
                for (i, path) in paths.iter().enumerate() {
                    if found[i].is_some() && ends_with(&stack, path) {
                        done[i] = true;
                    }
                }
                stack.pop();
            }
            Event::Text(t) => {
                let text = t.unescape()?;
                for (i, path) in paths.iter().enumerate() {
                    if !done[i] && ends_with(&stack, path) {
                        found[i].get_or_insert_with(String::new).push_str(&text);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        if done.iter().all(|d| *d) {
            break;
        }
    }
    Ok(found)
}

fn ends_with(stack: &[String], path: &[&str]) -> bool {
    stack.len() >= path.len()
        && stack[stack.len() - path.len()..]
            .iter()
            .zip(path)
            .all(|(a, b)| a == b)
}
