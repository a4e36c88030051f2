//! Single cURL command import
//!
//! Turns one shell command line into a canonical request. Nothing is placed
//! in a tree; callers attach the result wherever they like.

use arbor_domain::request::find_header;
use arbor_domain::{AuthConfig, BodyType, Header, HttpMethod, QueryParam, Request};
use url::Url;

use super::common::{bearer_token, classify_mime, form_data_lines, sniff_body_type};

/// What one command-line option does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CurlOption {
    Request,
    Get,
    Head,
    Header,
    Data,
    DataUrlencode,
    Json,
    Form,
    User,
    UserAgent,
    Referer,
    Cookie,
    Url,
    /// Takes a value that does not shape the request
    SkipValue,
    /// Boolean switch that does not shape the request
    Ignore,
}

impl CurlOption {
    const fn takes_value(self) -> bool {
        !matches!(self, Self::Get | Self::Head | Self::Ignore)
    }

    fn from_long(name: &str) -> Self {
        match name {
            "request" => Self::Request,
            "get" => Self::Get,
            "head" => Self::Head,
            "header" => Self::Header,
            "data" | "data-raw" | "data-binary" | "data-ascii" => Self::Data,
            "data-urlencode" => Self::DataUrlencode,
            "json" => Self::Json,
            "form" | "form-string" => Self::Form,
            "user" => Self::User,
            "user-agent" => Self::UserAgent,
            "referer" => Self::Referer,
            "cookie" => Self::Cookie,
            "url" => Self::Url,
            "output" | "max-time" | "connect-timeout" | "proxy" | "proxy-user" | "cert"
            | "key" | "cacert" | "capath" | "config" | "retry" | "retry-delay"
            | "limit-rate" | "resolve" | "cookie-jar" | "write-out" | "upload-file"
            | "interface" | "max-redirs" | "dump-header" | "range"
            | "trace" | "trace-ascii" | "stderr" | "connect-to" | "unix-socket" => {
                Self::SkipValue
            }
            _ => Self::Ignore,
        }
    }

    const fn from_short(flag: char) -> Self {
        match flag {
            'X' => Self::Request,
            'G' => Self::Get,
            'I' => Self::Head,
            'H' => Self::Header,
            'd' => Self::Data,
            'F' => Self::Form,
            'u' => Self::User,
            'A' => Self::UserAgent,
            'e' => Self::Referer,
            'b' => Self::Cookie,
            'o' | 'm' | 'x' | 'E' | 'T' | 'w' | 'K' | 'U' | 'D' | 'c' | 'r' | 'y' | 'Y'
            | 'z' | 'C' | 'P' | 'Q' | 't' => Self::SkipValue,
            _ => Self::Ignore,
        }
    }
}

/// Options collected from the command line, before they become a request.
#[derive(Debug, Default)]
struct CurlCommand {
    method: Option<String>,
    force_get: bool,
    head: bool,
    url: Option<String>,
    headers: Vec<Header>,
    data: Vec<String>,
    urlencoded: bool,
    json: bool,
    form: Vec<(String, String)>,
    user: Option<String>,
}

impl CurlCommand {
    fn parse(tokens: Vec<String>) -> Self {
        let mut command = Self::default();
        let mut tokens = tokens.into_iter().peekable();
        if tokens.peek().is_some_and(|first| first == "curl") {
            tokens.next();
        }

        while let Some(token) = tokens.next() {
            if let Some(long) = token.strip_prefix("--") {
                if long.is_empty() {
                    continue;
                }
                let (name, inline) = match long.split_once('=') {
                    Some((name, value)) => (name, Some(value.to_string())),
                    None => (long, None),
                };
                let option = CurlOption::from_long(name);
                let value = if option.takes_value() {
                    inline.or_else(|| tokens.next())
                } else {
                    None
                };
                command.apply(option, value);
            } else if token.len() > 1 && token.starts_with('-') {
                // A cluster like `-sSL`, or a short flag with its value
                // attached like `-XPOST`.
                let flags = &token[1..];
                for (offset, flag) in flags.char_indices() {
                    let option = CurlOption::from_short(flag);
                    if option.takes_value() {
                        let rest = &flags[offset + flag.len_utf8()..];
                        let value = if rest.is_empty() {
                            tokens.next()
                        } else {
                            Some(rest.to_string())
                        };
                        command.apply(option, value);
                        break;
                    }
                    command.apply(option, None);
                }
            } else if command.url.is_none() {
                command.url = Some(token);
            }
        }
        command
    }

    fn apply(&mut self, option: CurlOption, value: Option<String>) {
        match option {
            CurlOption::Get => self.force_get = true,
            CurlOption::Head => self.head = true,
            CurlOption::Ignore | CurlOption::SkipValue => {}
            _ => {
                let Some(value) = value else {
                    tracing::debug!(?option, "cURL option is missing its value");
                    return;
                };
                self.apply_value(option, value);
            }
        }
    }

    fn apply_value(&mut self, option: CurlOption, value: String) {
        match option {
            CurlOption::Request => self.method = Some(value),
            CurlOption::Header => {
                if let Some(header) = parse_header(&value) {
                    self.headers.push(header);
                }
            }
            CurlOption::Data => self.data.push(value),
            CurlOption::DataUrlencode => {
                self.urlencoded = true;
                self.data.push(encode_data(&value));
            }
            CurlOption::Json => {
                self.json = true;
                self.data.push(value);
            }
            CurlOption::Form => {
                let (name, content) = value.split_once('=').unwrap_or((value.as_str(), ""));
                self.form.push((name.to_string(), content.to_string()));
            }
            CurlOption::User => self.user = Some(value),
            CurlOption::UserAgent => self.headers.push(Header::new("User-Agent", value)),
            CurlOption::Referer => self.headers.push(Header::new("Referer", value)),
            CurlOption::Cookie => self.headers.push(Header::new("Cookie", value)),
            CurlOption::Url => self.url = Some(value),
            CurlOption::Get | CurlOption::Head | CurlOption::SkipValue | CurlOption::Ignore => {}
        }
    }

    fn has_body(&self) -> bool {
        !self.data.is_empty() || !self.form.is_empty()
    }

    fn method(&self) -> HttpMethod {
        if let Some(explicit) = &self.method {
            match explicit.parse() {
                Ok(method) => return method,
                Err(e) => tracing::debug!(error = %e, "Ignoring unsupported cURL method"),
            }
        }
        if self.head {
            HttpMethod::Head
        } else if self.force_get {
            HttpMethod::Get
        } else if self.has_body() {
            HttpMethod::Post
        } else {
            HttpMethod::Get
        }
    }

    fn into_request(mut self) -> Request {
        let method = self.method();
        let mut url = self.url.take().unwrap_or_default();

        if self.json {
            for name in ["Content-Type", "Accept"] {
                if find_header(&self.headers, name).is_none() {
                    self.headers.push(Header::new(name, "application/json"));
                }
            }
        }

        let mut body_type = BodyType::None;
        let mut body = String::new();
        if self.force_get {
            // `-G` sends the data as a query string instead of a body.
            if !self.data.is_empty() {
                let separator = if url.contains('?') { '&' } else { '?' };
                url = format!("{url}{separator}{}", self.data.join("&"));
            }
        } else if self.has_body() {
            (body_type, body) = self.body();
        }

        let parsed = parse_url(&url);
        let mut request = match &parsed {
            Some(parsed) => Request::new(format!("{method} {}", parsed.path())),
            None if url.is_empty() => Request::default(),
            None => Request::new(&url),
        };
        request.method = method;
        request.params = parsed
            .map(|parsed| {
                parsed
                    .query_pairs()
                    .map(|(name, value)| QueryParam::new(name, value))
                    .collect()
            })
            .unwrap_or_default();
        request.url = url;
        request.body_type = body_type;
        request.body = body;
        request.auth = match &self.user {
            Some(user) => {
                let (username, password) = user.split_once(':').unwrap_or((user.as_str(), ""));
                AuthConfig::basic(username, password)
            }
            None => bearer_token(&self.headers).map_or(AuthConfig::None, AuthConfig::bearer),
        };
        request.headers = self.headers;
        request
    }

    fn body(&self) -> (BodyType, String) {
        let text = if self.form.is_empty() {
            self.data.join("&")
        } else {
            form_data_lines(self.form.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        };
        let body_type = if let Some(header) = find_header(&self.headers, "Content-Type") {
            classify_mime(&header.value)
        } else if !self.form.is_empty() {
            BodyType::FormData
        } else if self.urlencoded {
            BodyType::FormUrlencoded
        } else {
            sniff_body_type(&text)
        };
        (body_type, text)
    }
}

/// Parses `"Name: value"`. `"Name;"` is curl's spelling of an empty header.
fn parse_header(raw: &str) -> Option<Header> {
    let (name, value) = match raw.split_once(':') {
        Some((name, value)) => (name.trim(), value.trim()),
        None => (raw.trim().trim_end_matches(';'), ""),
    };
    (!name.is_empty()).then(|| Header::new(name, value))
}

/// Applies `--data-urlencode` rules: `content`, `=content` and
/// `name=content` encode the content part; `@file` forms are kept as is.
fn encode_data(value: &str) -> String {
    if value.starts_with('@') {
        return value.to_string();
    }
    match value.split_once('=') {
        Some(("", content)) => urlencoding::encode(content).into_owned(),
        Some((name, content)) => format!("{name}={}", urlencoding::encode(content)),
        None => urlencoding::encode(value).into_owned(),
    }
}

/// curl accepts scheme-less URLs and assumes http.
fn parse_url(url: &str) -> Option<Url> {
    if url.is_empty() {
        return None;
    }
    Url::parse(url)
        .ok()
        .filter(|parsed| parsed.has_host())
        .or_else(|| Url::parse(&format!("http://{url}")).ok())
}

/// Converts one cURL command line into a request.
///
/// Returns `None` for blank input or input that cannot be tokenized, such
/// as unbalanced quotes.
#[must_use]
pub fn import_from_curl(command: &str) -> Option<Request> {
    let joined = command.replace("\\\r\n", " ").replace("\\\n", " ");
    if joined.trim().is_empty() {
        return None;
    }
    let Some(tokens) = shlex::split(&joined) else {
        tracing::debug!("cURL command could not be tokenized");
        return None;
    };
    let request = CurlCommand::parse(tokens).into_request();
    tracing::debug!(method = %request.method, url = %request.url, "Imported cURL command");
    Some(request)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn import(command: &str) -> Request {
        import_from_curl(command).unwrap()
    }

    #[test]
    fn test_blank_and_unbalanced_input() {
        assert!(import_from_curl("").is_none());
        assert!(import_from_curl("  \n ").is_none());
        assert!(import_from_curl("curl 'https://a.test").is_none());
    }

    #[test]
    fn test_simple_get() {
        let request = import("curl https://api.test/users?page=2&q=a%20b");
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "https://api.test/users?page=2&q=a%20b");
        assert_eq!(request.name, "GET /users");
        assert_eq!(
            request.params,
            vec![QueryParam::new("page", "2"), QueryParam::new("q", "a b")]
        );
        assert_eq!(request.body_type, BodyType::None);
        assert_eq!(request.auth, AuthConfig::None);
    }

    #[test]
    fn test_json_post_with_continuations() {
        let command = "curl -X POST 'https://api.test/items' \\\n  -H 'Content-Type: application/json' \\\n  -H 'Authorization: Bearer abc' \\\n  --data-raw '{\"name\": \"x\"}'";
        let request = import(command);
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.body_type, BodyType::Json);
        assert_eq!(request.body, "{\"name\": \"x\"}");
        assert_eq!(request.auth, AuthConfig::bearer("abc"));
        assert_eq!(request.headers.len(), 2);
    }

    #[test]
    fn test_data_implies_post_and_sniffs() {
        let request = import("curl https://a.test/x -d '{\"a\":1}'");
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.body_type, BodyType::Json);

        let request = import("curl https://a.test/x -d a=1 -d b=2");
        assert_eq!(request.body, "a=1&b=2");
        assert_eq!(request.body_type, BodyType::PlainText);
    }

    #[test]
    fn test_data_urlencode() {
        let request = import("curl https://a.test/x --data-urlencode 'q=hello world' --data-urlencode '=a&b'");
        assert_eq!(request.body_type, BodyType::FormUrlencoded);
        assert_eq!(request.body, "q=hello%20world&a%26b");
    }

    #[test]
    fn test_form_fields() {
        let request = import("curl -F name=Ada -F 'file=@photo.png' https://a.test/upload");
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.body_type, BodyType::FormData);
        assert_eq!(request.body, "name: Ada\nfile: @photo.png");
    }

    #[test]
    fn test_json_flag_adds_headers() {
        let request = import("curl --json '{\"a\":true}' https://a.test/x");
        assert_eq!(request.body_type, BodyType::Json);
        assert_eq!(
            request.headers,
            vec![
                Header::new("Content-Type", "application/json"),
                Header::new("Accept", "application/json")
            ]
        );
    }

    #[test]
    fn test_get_flag_moves_data_to_query() {
        let request = import("curl -G https://a.test/search -d q=rust -d page=1");
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "https://a.test/search?q=rust&page=1");
        assert_eq!(request.body_type, BodyType::None);
        assert_eq!(request.params.len(), 2);
    }

    #[test]
    fn test_attached_and_clustered_flags() {
        let request = import("curl -sSL -XPUT --url=https://a.test/r/1 -o out.json -d x");
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.url, "https://a.test/r/1");
        assert_eq!(request.body, "x");
    }

    #[test]
    fn test_head_flag() {
        let request = import("curl -I https://a.test/");
        assert_eq!(request.method, HttpMethod::Head);
    }

    #[test]
    fn test_user_and_convenience_headers() {
        let request = import(
            "curl -u alice:s3cret -A agent/1 -e https://ref.test -b 'a=1' -H 'Authorization: Bearer t' https://a.test",
        );
        assert_eq!(request.auth, AuthConfig::basic("alice", "s3cret"));
        let names: Vec<&str> = request.headers.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["User-Agent", "Referer", "Cookie", "Authorization"]);
    }

    #[test]
    fn test_scheme_less_url() {
        let request = import("curl example.test/ping?x=1");
        assert_eq!(request.url, "example.test/ping?x=1");
        assert_eq!(request.name, "GET /ping");
        assert_eq!(request.params, vec![QueryParam::new("x", "1")]);
    }

    #[test]
    fn test_leading_curl_is_optional() {
        let request = import("https://a.test/v1 -H 'X-Empty;'");
        assert_eq!(request.url, "https://a.test/v1");
        assert_eq!(request.headers, vec![Header::new("X-Empty", "")]);
    }
}
