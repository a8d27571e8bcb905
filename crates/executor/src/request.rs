//! Inbound requests.
//!
//! A request names an operation, optionally a path and/or a session id, and
//! carries everything else as parameters. On the wire it is one flat JSON
//! object:
//!
//! ```json
//! {"operation": "add_footnote", "sessionId": "ses_...", "paragraphIndex": 0, "text": "See above"}
//! ```

use std::collections::HashMap;

use scribe_core::Value;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::params::ParameterBag;
use crate::{Error, Result};

const OPERATION: &str = "operation";
const PATH: &str = "path";
const SESSION_ID: &str = "sessionId";
const OUTPUT_PATH: &str = "outputPath";

/// One call to the dispatcher.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    /// Operation name, matched case-insensitively
    pub operation: String,
    /// Document path, used when no session id is given
    pub path: Option<String>,
    /// Session token, takes precedence over `path`
    pub session_id: Option<String>,
    /// Alternate write target for modified ephemeral documents
    pub output_path: Option<String>,
    /// Operation parameters
    pub params: ParameterBag,
}

impl Request {
    /// Request for `operation` with no source and no parameters.
    pub fn new(operation: impl Into<String>) -> Self {
        Request {
            operation: operation.into(),
            ..Default::default()
        }
    }

    /// Target a document on disk.
    pub fn path(mut self, path: impl AsRef<std::path::Path>) -> Self {
        self.path = Some(path.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Target an open session.
    pub fn session(mut self, session_id: impl AsRef<str>) -> Self {
        self.session_id = Some(session_id.as_ref().to_string());
        self
    }

    /// Write a modified ephemeral document here instead of back to `path`.
    pub fn output_path(mut self, path: impl AsRef<std::path::Path>) -> Self {
        self.output_path = Some(path.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add a parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params = self.params.with(name, value);
        self
    }

    /// Replace all parameters.
    pub fn params(mut self, params: ParameterBag) -> Self {
        self.params = params;
        self
    }

    /// Parse a flat JSON request object.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let mut fields: HashMap<String, Value> = match Value::from(value) {
            Value::Object(fields) => fields,
            other => {
                return Err(Error::InvalidInput {
                    reason: format!("request must be a JSON object, got {}", other.type_name()),
                })
            }
        };

        let operation = take_string(&mut fields, OPERATION)?
            .ok_or_else(|| Error::missing(OPERATION))?;
        let path = take_string(&mut fields, PATH)?;
        let session_id = take_string(&mut fields, SESSION_ID)?;
        let output_path = take_string(&mut fields, OUTPUT_PATH)?;

        Ok(Request {
            operation,
            path,
            session_id,
            output_path,
            params: ParameterBag::from_map(fields),
        })
    }

    /// Parse a request from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| Error::Serialization {
                reason: e.to_string(),
            })?;
        Self::from_json(value)
    }
}

fn take_string(fields: &mut HashMap<String, Value>, key: &str) -> Result<Option<String>> {
    match fields.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(Error::InvalidParameterType {
            name: key.to_string(),
            expected: "a string".to_string(),
            actual: other.type_name().to_string(),
        }),
    }
}

impl<'de> Deserialize<'de> for Request {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Request::from_json(value).map_err(D::Error::custom)
    }
}
