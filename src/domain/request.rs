use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Insertion-ordered header mapping.
///
/// Names are kept exactly as they were given, `User-Agent` and `user-agent` are two distinct
/// entries. Each entry carries every value seen for that name, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(String, Vec<String>)>", into = "Vec<(String, Vec<String>)>")]
pub struct Headers(Vec<(String, Vec<String>)>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` to the entry named `name`, creating the entry if needed.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value),
            None => self.0.push((name, vec![value])),
        }
    }

    /// Replaces every value of the entry named `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => *values = vec![value],
            None => self.0.push((name, vec![value])),
        }
    }

    /// Removes the entry named `name`, returning its values.
    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        let idx = self.0.iter().position(|(n, _)| n == name)?;
        Some(self.0.remove(idx).1)
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries keyed and ordered by name, insertion order dropped.
    pub fn sorted(&self) -> BTreeMap<&str, &[String]> {
        self.iter().collect()
    }
}

impl<N, V> FromIterator<(N, V)> for Headers
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.append(name, value);
        }
        headers
    }
}

/// Entries sharing a name are merged, empty value lists are dropped.
impl From<Vec<(String, Vec<String>)>> for Headers {
    fn from(entries: Vec<(String, Vec<String>)>) -> Self {
        let mut headers = Headers::new();
        for (name, values) in entries {
            for value in values {
                headers.append(name.as_str(), value);
            }
        }
        headers
    }
}

impl From<Headers> for Vec<(String, Vec<String>)> {
    fn from(headers: Headers) -> Self {
        headers.0
    }
}

/// The comparable fields of an HTTP request, independent of whichever library produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    pub path: String,
    pub scheme: String,
    pub protocol_version: String,
    pub method: String,
    #[serde(default)]
    pub headers: Headers,
}

impl Request {
    /// Builds a request from a method and an absolute url, defaulting to HTTP/1.1 and no headers.
    /// Fails when `url` has no host.
    pub fn new(method: &str, url: &str) -> crate::AnyResult<Self> {
        let uri = url.parse::<http::Uri>()?;
        let Some(authority) = uri.authority() else {
            eyre::bail!("\"{url}\" is not an absolute url");
        };
        let (host, port, username, password) = authority_parts(authority);

        Ok(Self {
            host,
            port,
            username,
            password,
            path: uri.path().to_owned(),
            scheme: uri.scheme_str().unwrap_or("http").to_owned(),
            protocol_version: "1.1".to_owned(),
            method: method.to_owned(),
            headers: Headers::new(),
        })
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn with_protocol_version(mut self, version: &str) -> Self {
        self.protocol_version = version.to_owned();
        self
    }

    /// Sets the credentials, `password` stays absent when `None`.
    pub fn with_auth(mut self, username: &str, password: Option<&str>) -> Self {
        self.username = Some(username.to_owned());
        self.password = password.map(str::to_owned);
        self
    }
}

/// Host, port, username and password of an authority.
pub(crate) fn authority_parts(
    authority: &http::uri::Authority,
) -> (String, Option<u16>, Option<String>, Option<String>) {
    let (username, password) = split_userinfo(authority.as_str());
    (
        authority.host().to_owned(),
        authority.port_u16(),
        username,
        password,
    )
}

/// Splits the `user[:password]@` prefix of an authority.
fn split_userinfo(authority: &str) -> (Option<String>, Option<String>) {
    let Some((userinfo, _)) = authority.rsplit_once('@') else {
        return (None, None);
    };

    match userinfo.split_once(':') {
        Some((user, password)) => (Some(user.to_owned()), Some(password.to_owned())),
        None => (Some(userinfo.to_owned()), None),
    }
}
