use axum::body::Body;
use axum::http::Request;

/// Identity the request is made as; translated into the headers the
/// upstream gateway would set.
pub struct Caller<'a> {
    pub user: &'a str,
    pub groups: &'a [&'a str],
    pub superuser: bool,
}

impl<'a> Caller<'a> {
    pub fn superuser(user: &'a str) -> Self {
        Self {
            user,
            groups: &[],
            superuser: true,
        }
    }

    pub fn member(user: &'a str, groups: &'a [&'a str]) -> Self {
        Self {
            user,
            groups,
            superuser: false,
        }
    }
}

pub fn request(method: &str, uri: &str, caller: &Caller<'_>) -> Request<Body> {
    build(method, uri, caller, None)
}

pub fn json_request(
    method: &str,
    uri: &str,
    caller: &Caller<'_>,
    body: serde_json::Value,
) -> Request<Body> {
    build(method, uri, caller, Some(body))
}

pub fn anonymous_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn build(
    method: &str,
    uri: &str,
    caller: &Caller<'_>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-auth-user", caller.user);
    if !caller.groups.is_empty() {
        builder = builder.header("x-auth-groups", caller.groups.join(","));
    }
    if caller.superuser {
        builder = builder.header("x-auth-superuser", "true");
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}
