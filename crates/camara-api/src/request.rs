//! Parameter bundle → HTTP request assembly.
//!
//! A bundle is a [`Model`] that also implements [`Operation`]. Its fields
//! are partitioned by wire name: header fields become request headers, path
//! fields are substituted into the path template, query fields become query
//! pairs and every other present field goes into the JSON body.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::trace;

use crate::Error;
use crate::model::{CheckShape, Model};

/// Correlation header accepted by every CAMARA endpoint.
pub const X_CORRELATOR: &str = "x-correlator";

/// One API operation: route, field partition and response type.
pub trait Operation: Model {
    /// Decoded response. `()` for endpoints that answer without content.
    type Response: DeserializeOwned + CheckShape;

    const METHOD: Method;

    /// Path relative to the API base URL, with `{wireName}` placeholders.
    const PATH: &'static str;

    /// Wire names sent as HTTP headers.
    const HEADER_FIELDS: &'static [&'static str] = &[X_CORRELATOR];

    /// Wire names substituted into [`Self::PATH`].
    const PATH_FIELDS: &'static [&'static str] = &[];

    /// Wire names sent as query parameters.
    const QUERY_FIELDS: &'static [&'static str] = &[];
}

/// A fully assembled request, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Request {
    /// Value of a header, if assembled.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Partition a bundle into path, query, headers and body.
pub fn assemble<O: Operation>(params: &O) -> Result<Request, Error> {
    let mut fields = params.to_shape()?;
    O::check_fields(&fields)?;

    let mut headers = Vec::new();
    for &name in O::HEADER_FIELDS {
        if let Some(value) = take_present(&mut fields, name) {
            headers.push((name.to_owned(), scalar_to_string::<O>(name, value)?));
        }
    }

    let mut query = Vec::new();
    for &name in O::QUERY_FIELDS {
        if let Some(value) = take_present(&mut fields, name) {
            query.push((name.to_owned(), scalar_to_string::<O>(name, value)?));
        }
    }

    let mut path = O::PATH.to_owned();
    for &name in O::PATH_FIELDS {
        let value = take_present(&mut fields, name).ok_or_else(|| Error::MissingRequiredField {
            model: O::NAME,
            field: name.to_owned(),
        })?;
        let raw = scalar_to_string::<O>(name, value)?;
        path = path.replace(&format!("{{{name}}}"), &urlencoding::encode(&raw));
    }

    let body = if has_body(&O::METHOD) {
        Some(Value::Object(fields))
    } else if fields.is_empty() {
        None
    } else {
        return Err(Error::TypeMismatch {
            model: O::NAME,
            message: format!(
                "{} request cannot carry body fields: {}",
                O::METHOD,
                fields.keys().cloned().collect::<Vec<_>>().join(", ")
            ),
        });
    };

    trace!(
        operation = O::NAME,
        path = %path,
        headers = ?headers.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>(),
        "assembled request"
    );

    Ok(Request {
        method: O::METHOD,
        path,
        query,
        headers,
        body,
    })
}

fn has_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT || *method == Method::PATCH
}

fn take_present(fields: &mut Map<String, Value>, name: &str) -> Option<Value> {
    fields.remove(name).filter(|v| !v.is_null())
}

fn scalar_to_string<O: Operation>(name: &str, value: Value) -> Result<String, Error> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(Error::TypeMismatch {
            model: O::NAME,
            message: format!("`{name}` must be a scalar to be sent outside the body, got {other}"),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    model! {
        struct LookupParams / LookupParamsBuilder {
            required {
                item_id / with_item_id: String = "itemId",
            }
            optional {
                x_correlator / with_x_correlator: String = "x-correlator",
                page_size / with_page_size: i32 = "pageSize",
                note / with_note: String = "note",
            }
        }
    }

    impl Operation for LookupParams {
        type Response = ();
        const METHOD: Method = Method::POST;
        const PATH: &'static str = "things/v1/items/{itemId}/lookup";
        const PATH_FIELDS: &'static [&'static str] = &["itemId"];
        const QUERY_FIELDS: &'static [&'static str] = &["pageSize"];
    }

    model! {
        struct FetchParams / FetchParamsBuilder {
            required {
                item_id / with_item_id: String = "itemId",
            }
            optional {
                note / with_note: String = "note",
            }
        }
    }

    impl Operation for FetchParams {
        type Response = ();
        const METHOD: Method = Method::GET;
        const PATH: &'static str = "things/v1/items/{itemId}";
        const PATH_FIELDS: &'static [&'static str] = &["itemId"];
    }

    #[test]
    fn partitions_fields_by_location() {
        let params = LookupParams::new("abc")
            .with_x_correlator("corr-1")
            .with_page_size(20)
            .with_note("hello");

        let request = assemble(&params).unwrap();

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "things/v1/items/abc/lookup");
        assert_eq!(request.query, vec![("pageSize".to_owned(), "20".to_owned())]);
        assert_eq!(request.header("X-Correlator"), Some("corr-1"));
        assert_eq!(request.body, Some(json!({ "note": "hello" })));
    }

    #[test]
    fn absent_optionals_are_not_sent_anywhere() {
        let request = assemble(&LookupParams::new("abc")).unwrap();

        assert!(request.headers.is_empty());
        assert!(request.query.is_empty());
        assert_eq!(request.body, Some(json!({})));
    }

    #[test]
    fn path_values_are_percent_encoded() {
        let request = assemble(&FetchParams::new("a b/c")).unwrap();
        assert_eq!(request.path, "things/v1/items/a%20b%2Fc");
        assert_eq!(request.body, None);
    }

    #[test]
    fn get_requests_reject_leftover_body_fields() {
        let err = assemble(&FetchParams::new("abc").with_note("oops")).unwrap_err();
        assert!(
            matches!(err, Error::TypeMismatch { ref message, .. } if message.contains("note")),
            "got {err:?}"
        );
    }
}
