//! QR code payload for the public project page.

use serde::{Deserialize, Serialize};

use super::wire::{non_blank, FromWire, Id};

const PNG_DATA_PREFIX: &str = "data:image/png;base64,";

/// A renderable QR image and the URL it encodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QrCode {
    /// Always a `data:` URL usable as an `img` source.
    pub data_url: String,
    pub url: Option<String>,
}

/// The backend answers with either a bare base64 string or an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawQrCode {
    Bare(String),
    Object {
        #[serde(alias = "qrCode", alias = "qrcode", alias = "image", alias = "base64")]
        data: Option<String>,
        #[serde(alias = "link", alias = "publicUrl", alias = "lien")]
        url: Option<String>,
    },
}

fn as_data_url(value: String) -> String {
    if value.starts_with("data:") {
        value
    } else {
        format!("{PNG_DATA_PREFIX}{value}")
    }
}

impl FromWire for QrCode {
    type Raw = RawQrCode;

    fn from_wire(raw: RawQrCode) -> Result<Self, String> {
        let (data, url) = match raw {
            RawQrCode::Bare(data) => (Some(data), None),
            RawQrCode::Object { data, url } => (data, url),
        };
        let data = non_blank(data).ok_or("qr code response without image")?;
        Ok(QrCode {
            data_url: as_data_url(data),
            url: non_blank(url),
        })
    }
}

/// Public page URL for a project, e.g. `https://app.example/public/projects/7`.
pub fn public_project_url(public_base_url: &str, project_id: Id) -> String {
    format!(
        "{}/public/projects/{project_id}",
        public_base_url.trim_end_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_base64_gets_prefix() {
        let raw: RawQrCode = serde_json::from_value(json!("iVBORw0KGgo=")).unwrap();
        let qr = QrCode::from_wire(raw).unwrap();
        assert_eq!(qr.data_url, "data:image/png;base64,iVBORw0KGgo=");
        assert_eq!(qr.url, None);
    }

    #[test]
    fn test_object_keeps_data_url() {
        let raw: RawQrCode = serde_json::from_value(json!({
            "qrCode": "data:image/png;base64,AAAA",
            "publicUrl": "http://host/public/projects/3"
        }))
        .unwrap();
        let qr = QrCode::from_wire(raw).unwrap();
        assert_eq!(qr.data_url, "data:image/png;base64,AAAA");
        assert_eq!(qr.url.as_deref(), Some("http://host/public/projects/3"));

        let raw: RawQrCode = serde_json::from_value(json!({ "url": "x" })).unwrap();
        assert!(QrCode::from_wire(raw).is_err());
    }

    #[test]
    fn test_public_project_url() {
        assert_eq!(
            public_project_url("https://pm.example.com/", 7),
            "https://pm.example.com/public/projects/7"
        );
    }
}
