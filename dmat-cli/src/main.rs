//! dmat
//!
//! Line-delimited JSON front end for the matrix function library. Each line on
//! stdin is one request, each line on stdout is one response; logs go to
//! stderr.
//!
//! Methods:
//! - call: invoke a function, e.g. `{"id": 1, "method": "call", "function": "determinant", "args": [[[1, 2], [3, 4]]]}`
//! - list: list available functions, optionally filtered by `category`
//! - help: documentation for `function`, or an overview of all of them

use std::env;
use std::io::{self, BufRead, Write};

use dmat_core::Value;
use dmat_plugin::PluginRegistry;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const PARSE_ERROR: i32 = -32700;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;

#[derive(Debug, Deserialize)]
struct Request {
    #[serde(default)]
    id: Option<JsonValue>,
    method: String,
    #[serde(default)]
    function: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    args: Vec<JsonValue>,
}

#[derive(Debug, Serialize)]
struct Response {
    id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ProtocolError>,
}

#[derive(Debug, Serialize)]
struct ProtocolError {
    code: i32,
    message: String,
}

impl Response {
    fn ok(id: Option<JsonValue>, result: Value) -> Self {
        Self { id, result: Some(result), error: None }
    }

    fn err(id: Option<JsonValue>, code: i32, message: impl Into<String>) -> Self {
        Self {
            id,
            result: None,
            error: Some(ProtocolError { code, message: message.into() }),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let registry = dmat_matrix::load_matrix_library(PluginRegistry::new());
    let pretty = env::var_os("DMAT_PRETTY").is_some();
    info!(version = VERSION, functions = registry.len(), pretty, "dmat ready");

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = serve(&registry, stdin.lock(), stdout.lock(), pretty) {
        error!(error = %e, "I/O failure");
        std::process::exit(1);
    }

    info!("input closed, shutting down");
}

/// Answer every request line from `reader` until EOF
fn serve<R: BufRead, W: Write>(
    registry: &PluginRegistry,
    reader: R,
    mut writer: W,
    pretty: bool,
) -> io::Result<()> {
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        debug!(bytes = line.len(), "received request");
        let response = handle_line(registry, line);

        writeln!(writer, "{}", encode(&response, pretty))?;
        writer.flush()?;
    }
    Ok(())
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

/// Encode a response; a response that cannot be encoded is answered with an
/// internal error for the same id.
fn encode(response: &Response, pretty: bool) -> String {
    match to_json(response, pretty) {
        Ok(json) => json,
        Err(e) => encode_failure(response.id.clone(), &e, pretty),
    }
}

fn encode_failure(id: Option<JsonValue>, err: &serde_json::Error, pretty: bool) -> String {
    error!(error = %err, "failed to encode response");
    let fallback = Response::err(id, INTERNAL_ERROR, format!("Internal error: {}", err));
    to_json(&fallback, pretty).unwrap_or_else(|_| {
        format!(r#"{{"id":null,"error":{{"code":{},"message":"Internal error"}}}}"#, INTERNAL_ERROR)
    })
}

fn handle_line(registry: &PluginRegistry, line: &str) -> Response {
    match serde_json::from_str::<Request>(line) {
        Ok(request) => handle_request(registry, request),
        Err(e) => {
            warn!(error = %e, "malformed request");
            Response::err(None, PARSE_ERROR, format!("Parse error: {}", e))
        }
    }
}

fn handle_request(registry: &PluginRegistry, request: Request) -> Response {
    let Request { id, method, function, category, args } = request;

    match method.as_str() {
        "call" => {
            let Some(name) = function else {
                return Response::err(id, INVALID_PARAMS, "Missing parameter: function");
            };
            let args: Vec<Value> = args.into_iter().map(json_to_value).collect();
            let result = registry.call_function(&name, &args);
            if let Some(report) = result.as_error() {
                debug!(function = %name, code = %report.code, "call failed");
            }
            Response::ok(id, result)
        }
        "list" => Response::ok(id, registry.list_functions(category.as_deref())),
        "help" => Response::ok(id, registry.help(function.as_deref())),
        _ => Response::err(id, METHOD_NOT_FOUND, format!("Method not found: {}", method)),
    }
}

/// Convert a request argument into a `Value`.
///
/// Plain JSON maps structurally (arrays become lists, so a nested array is a
/// matrix). An object shaped `{"type", "value"}` is read as a tagged `Value`,
/// which lets a previous response's result be passed straight back in.
fn json_to_value(json: JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(b),
        JsonValue::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
        JsonValue::String(s) => Value::Text(s),
        JsonValue::Array(items) => Value::List(items.into_iter().map(json_to_value).collect()),
        JsonValue::Object(obj) => {
            if obj.len() == 2 && obj.contains_key("type") && obj.contains_key("value") {
                if let Ok(v) = serde_json::from_value::<Value>(JsonValue::Object(obj.clone())) {
                    return v;
                }
            }
            plain_object(obj)
        }
    }
}

fn plain_object(obj: serde_json::Map<String, JsonValue>) -> Value {
    Value::Object(obj.into_iter().map(|(k, v)| (k, json_to_value(v))).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmat_core::codes;
    use serde_json::json;

    fn registry() -> PluginRegistry {
        dmat_matrix::load_matrix_library(PluginRegistry::new())
    }

    fn request(body: JsonValue) -> Request {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_call_determinant() {
        let response = handle_request(&registry(), request(json!({
            "id": 1,
            "method": "call",
            "function": "determinant",
            "args": [[[1, 2], [3, 4]]]
        })));
        assert_eq!(response.id, Some(json!(1)));
        assert_eq!(response.result, Some(Value::Number(-2.0)));
        assert!(response.error.is_none());
    }

    #[test]
    fn test_matrix_error_is_a_result() {
        let response = handle_request(&registry(), request(json!({
            "id": "a",
            "method": "call",
            "function": "inverse",
            "args": [[[1, 2], [2, 4]]]
        })));
        let result = response.result.unwrap();
        assert_eq!(result.as_error().unwrap().code, codes::NON_INVERTIBLE);
        assert!(response.error.is_none());
    }

    #[test]
    fn test_protocol_errors() {
        let reg = registry();

        let missing = handle_request(&reg, request(json!({"id": 2, "method": "call"})));
        assert_eq!(missing.error.unwrap().code, INVALID_PARAMS);

        let unknown = handle_request(&reg, request(json!({"id": 3, "method": "eval"})));
        assert_eq!(unknown.error.unwrap().code, METHOD_NOT_FOUND);

        let malformed = handle_line(&reg, "{not json");
        assert_eq!(malformed.error.unwrap().code, PARSE_ERROR);
        assert!(malformed.id.is_none());
    }

    #[test]
    fn test_unknown_function() {
        let response = handle_request(&registry(), request(json!({
            "id": 4, "method": "call", "function": "determinent", "args": []
        })));
        let result = response.result.unwrap();
        assert_eq!(result.as_error().unwrap().code, codes::UNDEFINED_FUNC);
    }

    #[test]
    fn test_result_feeds_back_as_argument() {
        let reg = registry();
        let first = handle_request(&reg, request(json!({
            "id": 5, "method": "call", "function": "identity", "args": [3]
        })));
        let encoded = serde_json::to_value(first.result.unwrap()).unwrap();

        let second = handle_request(&reg, request(json!({
            "id": 6, "method": "call", "function": "determinant", "args": [encoded]
        })));
        assert_eq!(second.result, Some(Value::Number(1.0)));
    }

    #[test]
    fn test_json_to_value() {
        assert_eq!(json_to_value(json!(2.5)), Value::Number(2.5));
        assert_eq!(json_to_value(json!({"type": "Bool", "value": true})), Value::Bool(true));
        assert_eq!(
            json_to_value(json!([[1, 2]])),
            Value::List(vec![Value::List(vec![Value::Number(1.0), Value::Number(2.0)])])
        );
        let plain = json_to_value(json!({"type": "Whatever", "value": 1}));
        assert!(plain.as_object().is_some());
    }

    #[test]
    fn test_encode_failure_still_answers() {
        let err = serde_json::from_str::<JsonValue>("{").unwrap_err();
        let line = encode_failure(Some(json!(7)), &err, false);

        let reply: JsonValue = serde_json::from_str(&line).unwrap();
        assert_eq!(reply["id"], json!(7));
        assert_eq!(reply["error"]["code"], json!(INTERNAL_ERROR));
        assert!(reply.get("result").is_none());
    }

    #[test]
    fn test_encode() {
        let line = encode(&Response::ok(Some(json!(1)), Value::Bool(true)), false);
        assert_eq!(line, r#"{"id":1,"result":{"type":"Bool","value":true}}"#);
    }

    #[test]
    fn test_serve_skips_blank_lines() {
        let input = b"\n{\"id\":1,\"method\":\"call\",\"function\":\"rows\",\"args\":[[[1],[2]]]}\n\n{\"id\":2,\"method\":\"list\"}\n";
        let mut output = Vec::new();
        serve(&registry(), &input[..], &mut output, false).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: JsonValue = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["id"], json!(1));
        assert_eq!(first["result"], json!({"type": "Number", "value": 2.0}));
    }
}
