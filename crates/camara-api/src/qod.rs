//! Quality on Demand API (`quality-on-demand/v1`).
//!
//! A session asks the network to apply a QoS profile to the traffic
//! between one device and one application server for a limited time.
//! Sessions can be created, read, extended and deleted; status changes
//! are pushed to the optional `sink` as CloudEvents.

use chrono::{DateTime, Utc};
use reqwest::Method;

use crate::request::Operation;
use crate::types::{ApplicationServer, Device, PortsSpec, SinkCredential};
use crate::{CamaraClient, Error};

// ── Types ───────────────────────────────────────────────────────────

api_enum! {
    pub enum QosStatus {
        Requested = "REQUESTED",
        Available = "AVAILABLE",
        Unavailable = "UNAVAILABLE",
    }
}

api_enum! {
    /// Why a session became `UNAVAILABLE`.
    pub enum StatusInfo {
        DurationExpired = "DURATION_EXPIRED",
        NetworkTerminated = "NETWORK_TERMINATED",
        DeleteRequested = "DELETE_REQUESTED",
    }
}

model! {
    pub struct SessionInfo / SessionInfoBuilder {
        required {
            session_id / with_session_id: String = "sessionId",
            application_server / with_application_server: ApplicationServer = "applicationServer",
            qos_profile / with_qos_profile: String = "qosProfile",
            /// Session duration in seconds.
            duration / with_duration: i32 = "duration",
            qos_status / with_qos_status: QosStatus = "qosStatus",
        }
        optional {
            device / with_device: Device = "device",
            device_ports / with_device_ports: PortsSpec = "devicePorts",
            application_server_ports / with_application_server_ports: PortsSpec = "applicationServerPorts",
            sink / with_sink: String = "sink",
            sink_credential / with_sink_credential: SinkCredential = "sinkCredential",
            started_at / with_started_at: DateTime<Utc> = "startedAt",
            expires_at / with_expires_at: DateTime<Utc> = "expiresAt",
            status_info / with_status_info: StatusInfo = "statusInfo",
        }
    }
}

impl SessionInfo {
    pub fn is_active(&self) -> bool {
        self.qos_status == QosStatus::Available
    }
}

// ── Parameters ──────────────────────────────────────────────────────

model! {
    pub struct CreateSessionParams / CreateSessionParamsBuilder {
        required {
            application_server / with_application_server: ApplicationServer = "applicationServer",
            qos_profile / with_qos_profile: String = "qosProfile",
            duration / with_duration: i32 = "duration",
        }
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
            device / with_device: Device = "device",
            device_ports / with_device_ports: PortsSpec = "devicePorts",
            application_server_ports / with_application_server_ports: PortsSpec = "applicationServerPorts",
            sink / with_sink: String = "sink",
            sink_credential / with_sink_credential: SinkCredential = "sinkCredential",
        }
    }
}

impl Operation for CreateSessionParams {
    type Response = SessionInfo;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "quality-on-demand/v1/sessions";
}

model! {
    pub struct RetrieveSessionParams / RetrieveSessionParamsBuilder {
        required {
            session_id / with_session_id: String = "sessionId",
        }
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
        }
    }
}

impl Operation for RetrieveSessionParams {
    type Response = SessionInfo;
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "quality-on-demand/v1/sessions/{sessionId}";
    const PATH_FIELDS: &'static [&'static str] = &["sessionId"];
}

model! {
    pub struct DeleteSessionParams / DeleteSessionParamsBuilder {
        required {
            session_id / with_session_id: String = "sessionId",
        }
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
        }
    }
}

impl Operation for DeleteSessionParams {
    type Response = ();
    const METHOD: Method = Method::DELETE;
    const PATH: &'static str = "quality-on-demand/v1/sessions/{sessionId}";
    const PATH_FIELDS: &'static [&'static str] = &["sessionId"];
}

model! {
    pub struct ExtendSessionParams / ExtendSessionParamsBuilder {
        required {
            session_id / with_session_id: String = "sessionId",
            /// Seconds added to the current duration.
            requested_additional_duration / with_requested_additional_duration: i32 = "requestedAdditionalDuration",
        }
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
        }
    }
}

impl Operation for ExtendSessionParams {
    type Response = SessionInfo;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "quality-on-demand/v1/sessions/{sessionId}/extend";
    const PATH_FIELDS: &'static [&'static str] = &["sessionId"];
}

model! {
    pub struct RetrieveSessionsParams / RetrieveSessionsParamsBuilder {
        required {}
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
            device / with_device: Device = "device",
        }
    }
}

impl Operation for RetrieveSessionsParams {
    type Response = Vec<SessionInfo>;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "quality-on-demand/v1/retrieve-sessions";
}

// ── Service ─────────────────────────────────────────────────────────

pub struct QodService<'a> {
    client: &'a CamaraClient,
}

impl CamaraClient {
    pub fn qod(&self) -> QodService<'_> {
        QodService { client: self }
    }
}

impl QodService<'_> {
    pub async fn create_session(&self, params: &CreateSessionParams) -> Result<SessionInfo, Error> {
        self.client.execute(params).await
    }

    pub async fn retrieve_session(&self, session_id: impl Into<String>) -> Result<SessionInfo, Error> {
        self.client
            .execute(&RetrieveSessionParams::new(session_id))
            .await
    }

    pub async fn delete_session(&self, session_id: impl Into<String>) -> Result<(), Error> {
        self.client.execute(&DeleteSessionParams::new(session_id)).await
    }

    pub async fn extend_session(
        &self,
        session_id: impl Into<String>,
        additional_seconds: i32,
    ) -> Result<SessionInfo, Error> {
        self.client
            .execute(&ExtendSessionParams::new(session_id, additional_seconds))
            .await
    }

    pub async fn retrieve_sessions(&self, device: Option<Device>) -> Result<Vec<SessionInfo>, Error> {
        let params = RetrieveSessionsParams {
            device,
            ..RetrieveSessionsParams::new()
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
    use crate::model::{Model, assert_enum_idempotent};
    use crate::request::assemble;
    use crate::shape;
    use crate::types::{DeviceIpv4Address, PortRange};

    fn sample_create() -> CreateSessionParams {
        CreateSessionParams::new(
            ApplicationServer::new().with_ipv4_address("198.51.100.0/24"),
            "QOS_E",
            3600,
        )
        .with_device(
            Device::new().with_ipv4_address(
                DeviceIpv4Address::new("84.125.93.10").with_public_port(59765),
            ),
        )
        .with_device_ports(PortsSpec::new().with_ranges(vec![PortRange::new(5010, 5020)]))
        .with_sink("https://application-server.com/notifications")
    }

    #[test]
    fn session_enum_literals_coerce() {
        assert_enum_idempotent::<QosStatus>();
        assert_enum_idempotent::<StatusInfo>();
    }

    #[test]
    fn create_session_body_uses_wire_names() {
        let request = assemble(&sample_create().with_x_correlator("c-1")).unwrap();

        assert_eq!(request.path, "quality-on-demand/v1/sessions");
        assert_eq!(request.header("x-correlator"), Some("c-1"));
        assert_eq!(
            request.body,
            Some(json!({
                "applicationServer": { "ipv4Address": "198.51.100.0/24" },
                "qosProfile": "QOS_E",
                "duration": 3600,
                "device": { "ipv4Address": { "publicAddress": "84.125.93.10", "publicPort": 59765 } },
                "devicePorts": { "ranges": [{ "from": 5010, "to": 5020 }] },
                "sink": "https://application-server.com/notifications"
            }))
        );
    }

    #[test]
    fn extend_substitutes_session_id_and_keeps_body() {
        let request = assemble(&ExtendSessionParams::new("3fa85f64-5717", 240)).unwrap();

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "quality-on-demand/v1/sessions/3fa85f64-5717/extend");
        assert_eq!(request.body, Some(json!({ "requestedAdditionalDuration": 240 })));
    }

    #[test]
    fn delete_has_no_body() {
        let request = assemble(&DeleteSessionParams::new("s-1")).unwrap();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.body, None);
    }

    #[test]
    fn session_info_decodes_status_and_times() {
        let session: SessionInfo = shape::decode(json!({
            "sessionId": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "applicationServer": { "ipv4Address": "198.51.100.0/24" },
            "qosProfile": "QOS_E",
            "duration": 3600,
            "qosStatus": "UNAVAILABLE",
            "statusInfo": "DURATION_EXPIRED",
            "startedAt": "2024-06-01T12:00:00Z",
            "expiresAt": "2024-06-01T13:00:00Z"
        }))
        .unwrap();

        assert!(!session.is_active());
        assert_eq!(session.status_info, Some(StatusInfo::DurationExpired));
        let lifetime = session.expires_at.unwrap() - session.started_at.unwrap();
        assert_eq!(lifetime.num_seconds(), 3600);
    }

    #[test]
    fn full_session_round_trips() {
        let raw = json!({
            "sessionId": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "applicationServer": { "ipv4Address": "198.51.100.0/24" },
            "qosProfile": "QOS_E",
            "duration": 3600,
            "qosStatus": "AVAILABLE",
            "device": {
                "phoneNumber": "+123456789",
                "ipv4Address": { "publicAddress": "84.125.93.10", "publicPort": 59765 }
            },
            "devicePorts": { "ranges": [{ "from": 5010, "to": 5020 }], "ports": [5060] },
            "sink": "https://application-server.example.com/notifications",
            "sinkCredential": { "credentialType": "PLAIN" },
            "startedAt": "2024-06-01T12:00:00Z",
            "expiresAt": "2024-06-01T13:00:00Z"
        });

        let session: SessionInfo = shape::decode(raw.clone()).unwrap();
        assert!(session.is_active());
        assert_eq!(serde_json::Value::Object(session.to_shape().unwrap()), raw);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = shape::decode::<SessionInfo>(json!({
            "sessionId": "s",
            "applicationServer": {},
            "qosProfile": "QOS_E",
            "duration": 60,
            "qosStatus": "PENDING"
        }))
        .unwrap_err();
        assert!(
            matches!(err, Error::InvalidValue { ref value, .. } if value == "PENDING"),
            "got {err:?}"
        );
    }

    #[test]
    fn session_list_preserves_order() {
        let sessions: Vec<SessionInfo> = shape::decode(json!([
            { "sessionId": "a", "applicationServer": {}, "qosProfile": "QOS_E", "duration": 60, "qosStatus": "REQUESTED" },
            { "sessionId": "b", "applicationServer": {}, "qosProfile": "QOS_L", "duration": 60, "qosStatus": "AVAILABLE" }
        ]))
        .unwrap();

        let ids: Vec<_> = sessions.iter().map(|s| s.session_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
