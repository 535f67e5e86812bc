//! Response body decoding, chosen by the declared `Content-Type`.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::ApiError;

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseData {
    Json(Value),
    Text(String),
    FormData(FormData),
    Bytes(Bytes),
    Blob(Blob),
}

impl ResponseData {
    /// Deserializes the body into `T`. Text bodies are parsed as JSON.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let value = match self {
            ResponseData::Json(value) => value,
            ResponseData::Text(text) => serde_json::from_str(&text)?,
            ResponseData::Bytes(bytes) | ResponseData::Blob(Blob { bytes, .. }) => {
                serde_json::from_slice(&bytes)?
            }
            ResponseData::FormData(form) => Value::Object(
                form.parts
                    .into_iter()
                    .map(|part| {
                        let text = String::from_utf8_lossy(&part.data).into_owned();
                        (part.name, Value::String(text))
                    })
                    .collect(),
            ),
        };
        Ok(serde_json::from_value(value)?)
    }
}

/// An opaque binary body tagged with its MIME type (images, PDFs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub mime_type: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pub parts: Vec<FormPart>,
}

impl FormData {
    /// The first part with the given name.
    pub fn get(&self, name: &str) -> Option<&FormPart> {
        self.parts.iter().find(|part| part.name == name)
    }

    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name)
            .map(|part| String::from_utf8_lossy(&part.data).into_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Decodes `body` according to `content_type`.
///
/// Checks run in a fixed order and match anywhere in the header value, so a
/// charset suffix or parameters never change the outcome.
pub async fn decode(content_type: Option<&str>, body: Bytes) -> Result<ResponseData, ApiError> {
    let Some(content_type) = content_type else {
        return Ok(ResponseData::Text(text(&body)));
    };

    if content_type.contains("application/json") {
        Ok(ResponseData::Json(serde_json::from_slice(&body)?))
    } else if content_type.contains("text/") {
        Ok(ResponseData::Text(text(&body)))
    } else if content_type.contains("multipart/form-data") {
        Ok(ResponseData::FormData(form_data(content_type, body).await?))
    } else if content_type.contains("application/octet-stream") {
        Ok(ResponseData::Bytes(body))
    } else if content_type.contains("image/") || content_type.contains("application/pdf") {
        Ok(ResponseData::Blob(Blob {
            mime_type: content_type.to_string(),
            bytes: body,
        }))
    } else {
        Ok(ResponseData::Text(text(&body)))
    }
}

fn text(body: &[u8]) -> String {
    String::from_utf8_lossy(body).into_owned()
}

async fn form_data(content_type: &str, body: Bytes) -> Result<FormData, ApiError> {
    let boundary = multer::parse_boundary(content_type)?;
    let stream = futures::stream::once(async move { Ok::<Bytes, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(|mime| mime.to_string());
        let data = field.bytes().await?;
        parts.push(FormPart {
            name,
            file_name,
            content_type,
            data,
        });
    }

    Ok(FormData { parts })
}
