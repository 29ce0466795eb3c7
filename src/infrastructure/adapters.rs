use crate::domain::request::{authority_parts, Headers, Request};
use http::uri::Authority;
use http::Version;

impl<B> From<&http::Request<B>> for Request {
    fn from(value: &http::Request<B>) -> Self {
        let uri = value.uri();

        // origin-form uris carry the authority in the Host header
        let host_authority = value
            .headers()
            .get(http::header::HOST)
            .and_then(|host| host.to_str().ok())
            .and_then(|host| host.trim().parse::<Authority>().ok());
        let (host, port, username, password) = match uri.authority().or(host_authority.as_ref()) {
            Some(authority) => authority_parts(authority),
            None => (String::new(), None, None, None),
        };

        let headers = value
            .headers()
            .iter()
            .map(|(name, v)| (name.as_str(), String::from_utf8_lossy(v.as_bytes())))
            .collect::<Headers>();

        Self {
            host,
            port,
            username,
            password,
            path: uri.path().to_owned(),
            scheme: uri.scheme_str().unwrap_or("http").to_owned(),
            protocol_version: protocol_version(value.version()),
            method: value.method().as_str().to_owned(),
            headers,
        }
    }
}

impl<B> From<http::Request<B>> for Request {
    fn from(value: http::Request<B>) -> Self {
        Self::from(&value)
    }
}

fn protocol_version(version: Version) -> String {
    let version = match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_11 => "1.1",
        Version::HTTP_2 => "2.0",
        Version::HTTP_3 => "3.0",
        other => return format!("{other:?}").trim_start_matches("HTTP/").to_owned(),
    };

    version.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_uri() {
        let request = http::Request::builder()
            .method("DELETE")
            .uri("https://bob@api.example.com:8443/items/1?force=true")
            .version(Version::HTTP_10)
            .header("X-Trace", "abc")
            .body(())
            .unwrap();

        let request = Request::from(&request);
        assert_eq!(request.host, "api.example.com");
        assert_eq!(request.port, Some(8443));
        assert_eq!(request.username.as_deref(), Some("bob"));
        assert_eq!(request.password, None);
        assert_eq!(request.path, "/items/1");
        assert_eq!(request.scheme, "https");
        assert_eq!(request.protocol_version, "1.0");
        assert_eq!(request.method, "DELETE");
        assert_eq!(request.headers.get("x-trace"), Some(&["abc".to_owned()][..]));
    }

    #[test]
    fn origin_uri_uses_host_header() {
        let request = http::Request::builder()
            .uri("/")
            .header("Host", "www.example.com:81")
            .header("Accept", "text/html")
            .header("Accept", "*/*")
            .body("ignored")
            .unwrap();

        let request = Request::from(request);
        assert_eq!(request.host, "www.example.com");
        assert_eq!(request.port, Some(81));
        assert_eq!(request.scheme, "http");
        assert_eq!(request.protocol_version, "1.1");
        assert_eq!(request.method, "GET");
        assert_eq!(
            request.headers.get("accept"),
            Some(&["text/html".to_owned(), "*/*".to_owned()][..])
        );
    }

    #[test]
    fn versions() {
        assert_eq!(protocol_version(Version::HTTP_09), "0.9");
        assert_eq!(protocol_version(Version::HTTP_2), "2.0");
        assert_eq!(protocol_version(Version::HTTP_3), "3.0");
    }
}
