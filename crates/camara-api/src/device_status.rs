//! Device Status APIs: reachability (`device-reachability-status/v1`)
//! and roaming (`device-roaming-status/v1`).

use chrono::{DateTime, Utc};
use reqwest::Method;

use crate::request::Operation;
use crate::types::Device;
use crate::{CamaraClient, Error};

api_enum! {
    pub enum ConnectivityType {
        Data = "DATA",
        Sms = "SMS",
    }
}

model! {
    pub struct ReachabilityStatus / ReachabilityStatusBuilder {
        required {
            last_status_time / with_last_status_time: DateTime<Utc> = "lastStatusTime",
            reachable / with_reachable: bool = "reachable",
        }
        optional {
            /// Channels the device is reachable on; absent when unreachable.
            connectivity / with_connectivity: Vec<ConnectivityType> = "connectivity",
        }
    }
}

model! {
    pub struct RoamingStatus / RoamingStatusBuilder {
        required {
            last_status_time / with_last_status_time: DateTime<Utc> = "lastStatusTime",
            roaming / with_roaming: bool = "roaming",
        }
        optional {
            /// Mobile country code of the visited network.
            country_code / with_country_code: i32 = "countryCode",
            country_name / with_country_name: Vec<String> = "countryName",
        }
    }
}

model! {
    pub struct ReachabilityParams / ReachabilityParamsBuilder {
        required {}
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
            device / with_device: Device = "device",
        }
    }
}

impl Operation for ReachabilityParams {
    type Response = ReachabilityStatus;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "device-reachability-status/v1/retrieve";
}

model! {
    pub struct RoamingParams / RoamingParamsBuilder {
        required {}
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
            device / with_device: Device = "device",
        }
    }
}

impl Operation for RoamingParams {
    type Response = RoamingStatus;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "device-roaming-status/v1/retrieve";
}

// ── Service ─────────────────────────────────────────────────────────

pub struct DeviceStatusService<'a> {
    client: &'a CamaraClient,
}

impl CamaraClient {
    pub fn device_status(&self) -> DeviceStatusService<'_> {
        DeviceStatusService { client: self }
    }
}

impl DeviceStatusService<'_> {
    pub async fn reachability(&self, device: Option<Device>) -> Result<ReachabilityStatus, Error> {
        let params = ReachabilityParams {
            device,
            ..ReachabilityParams::new()
        };
        self.client.execute(&params).await
    }

    pub async fn roaming(&self, device: Option<Device>) -> Result<RoamingStatus, Error> {
        let params = RoamingParams {
            device,
            ..RoamingParams::new()
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
    use crate::model::assert_enum_idempotent;
    use crate::shape;

    #[test]
    fn connectivity_literals_coerce() {
        assert_enum_idempotent::<ConnectivityType>();
    }

    #[test]
    fn connectivity_list_keeps_order() {
        let status: ReachabilityStatus = shape::decode(json!({
            "lastStatusTime": "2024-02-20T10:41:38.657Z",
            "reachable": true,
            "connectivity": ["SMS", "DATA"]
        }))
        .unwrap();

        assert_eq!(
            status.connectivity,
            Some(vec![ConnectivityType::Sms, ConnectivityType::Data])
        );
        assert_eq!(
            serde_json::to_value(&status).unwrap()["connectivity"],
            json!(["SMS", "DATA"])
        );
    }

    #[test]
    fn unknown_connectivity_literal_fails() {
        let err = shape::decode::<ReachabilityStatus>(json!({
            "lastStatusTime": "2024-02-20T10:41:38.657Z",
            "reachable": true,
            "connectivity": ["VOICE"]
        }))
        .unwrap_err();
        match err {
            Error::InvalidValue { value, allowed, .. } => {
                assert_eq!(value, "VOICE");
                assert_eq!(allowed, vec!["DATA", "SMS"]);
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn roaming_status_with_country() {
        let status: RoamingStatus = shape::decode(json!({
            "lastStatusTime": "2024-02-20T10:41:38.657Z",
            "roaming": true,
            "countryCode": 262,
            "countryName": ["Germany"]
        }))
        .unwrap();
        assert!(status.roaming);
        assert_eq!(status.country_code, Some(262));
    }
}
