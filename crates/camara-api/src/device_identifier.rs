//! Device Identifier API (`device-identifier/v0`).
//!
//! Looks up the physical handset currently using a subscription: its
//! IMEI, its type approval code and a pseudonymous device id.

use chrono::{DateTime, Utc};
use reqwest::Method;

use crate::request::Operation;
use crate::types::Device;
use crate::{CamaraClient, Error};

// ── Types ───────────────────────────────────────────────────────────

model! {
    /// IMEI-level identity of the handset.
    pub struct DeviceIdentifier / DeviceIdentifierBuilder {
        required {
            last_checked / with_last_checked: DateTime<Utc> = "lastChecked",
        }
        optional {
            imeisv / with_imeisv: String = "imeisv",
            imei / with_imei: String = "imei",
            /// Type Allocation Code, the first eight IMEI digits.
            tac / with_tac: String = "tac",
            model / with_model: String = "model",
            manufacturer / with_manufacturer: String = "manufacturer",
            /// Identifier the provider used, echoed with two-legged tokens.
            device / with_device: Device = "device",
        }
    }
}

model! {
    /// Make and model of the handset, without the IMEI.
    pub struct DeviceTypeInfo / DeviceTypeInfoBuilder {
        required {
            last_checked / with_last_checked: DateTime<Utc> = "lastChecked",
        }
        optional {
            tac / with_tac: String = "tac",
            model / with_model: String = "model",
            manufacturer / with_manufacturer: String = "manufacturer",
            device / with_device: Device = "device",
        }
    }
}

model! {
    /// Pseudonymous device id, stable per API consumer.
    pub struct DevicePpid / DevicePpidBuilder {
        required {
            last_checked / with_last_checked: DateTime<Utc> = "lastChecked",
            ppid / with_ppid: String = "ppid",
        }
        optional {
            device / with_device: Device = "device",
        }
    }
}

// ── Parameters ──────────────────────────────────────────────────────

model! {
    pub struct RetrieveIdentifierParams / RetrieveIdentifierParamsBuilder {
        required {}
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
            device / with_device: Device = "device",
        }
    }
}

impl Operation for RetrieveIdentifierParams {
    type Response = DeviceIdentifier;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "device-identifier/v0/retrieve-identifier";
}

model! {
    pub struct RetrieveTypeParams / RetrieveTypeParamsBuilder {
        required {}
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
            device / with_device: Device = "device",
        }
    }
}

impl Operation for RetrieveTypeParams {
    type Response = DeviceTypeInfo;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "device-identifier/v0/retrieve-type";
}

model! {
    pub struct RetrievePpidParams / RetrievePpidParamsBuilder {
        required {}
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
            device / with_device: Device = "device",
        }
    }
}

impl Operation for RetrievePpidParams {
    type Response = DevicePpid;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "device-identifier/v0/retrieve-ppid";
}

// ── Service ─────────────────────────────────────────────────────────

pub struct DeviceIdentifierService<'a> {
    client: &'a CamaraClient,
}

impl CamaraClient {
    pub fn device_identifier(&self) -> DeviceIdentifierService<'_> {
        DeviceIdentifierService { client: self }
    }
}

impl DeviceIdentifierService<'_> {
    /// `device` may be `None` when the access token already identifies it.
    pub async fn retrieve_identifier(
        &self,
        device: Option<Device>,
    ) -> Result<DeviceIdentifier, Error> {
        let params = RetrieveIdentifierParams {
            device,
            ..RetrieveIdentifierParams::new()
        };
        self.client.execute(&params).await
    }

    pub async fn retrieve_type(&self, device: Option<Device>) -> Result<DeviceTypeInfo, Error> {
        let params = RetrieveTypeParams {
            device,
            ..RetrieveTypeParams::new()
        };
        self.client.execute(&params).await
    }

    pub async fn retrieve_ppid(&self, device: Option<Device>) -> Result<DevicePpid, Error> {
        let params = RetrievePpidParams {
            device,
            ..RetrievePpidParams::new()
        };
        self.client.execute(&params).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::request::assemble;
    use crate::shape;

    #[test]
    fn identifier_response_decodes() {
        let identifier: DeviceIdentifier = shape::decode(json!({
            "lastChecked": "2024-02-20T10:41:38.657Z",
            "imeisv": "4901542032375181",
            "imei": "490154203237518",
            "tac": "49015420",
            "model": "3110",
            "manufacturer": "Nokia",
            "device": { "phoneNumber": "+123456789" }
        }))
        .unwrap();

        assert_eq!(identifier.tac.as_deref(), Some("49015420"));
        assert_eq!(
            identifier.device.unwrap().phone_number.as_deref(),
            Some("+123456789")
        );
    }

    #[test]
    fn ppid_requires_last_checked() {
        let err = shape::decode::<DevicePpid>(json!({ "ppid": "b2a4f0b3" })).unwrap_err();
        assert!(
            matches!(err, Error::MissingRequiredField { ref field, .. } if field == "lastChecked"),
            "got {err:?}"
        );
    }

    #[test]
    fn empty_request_sends_empty_object() {
        let request = assemble(&RetrieveTypeParams::new()).unwrap();
        assert_eq!(request.body, Some(json!({})));
    }
}
