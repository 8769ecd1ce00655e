//! Connectivity Insights APIs (`v0.4`).
//!
//! Three related surfaces:
//!
//! - **application profiles** describe the network quality an application
//!   needs (latency, rates, loss, jitter);
//! - **network quality checks** ask once whether the network can meet a
//!   profile for a device;
//! - **subscriptions** ask the provider to push network-quality events to
//!   a sink over time.

use chrono::{DateTime, Utc};
use reqwest::Method;

use crate::request::Operation;
use crate::types::{ApplicationServer, Device, PortsSpec, QosDuration, Rate, SinkCredential};
use crate::{CamaraClient, Error};

// ── Application profiles ────────────────────────────────────────────

model! {
    /// Quality an application needs; every threshold is optional.
    pub struct NetworkQualityThresholds / NetworkQualityThresholdsBuilder {
        required {}
        optional {
            packet_delay_budget / with_packet_delay_budget: QosDuration = "packetDelayBudget",
            target_min_downstream_rate / with_target_min_downstream_rate: Rate = "targetMinDownstreamRate",
            target_min_upstream_rate / with_target_min_upstream_rate: Rate = "targetMinUpstreamRate",
            /// Exponent of the tolerated loss rate, 10^-n.
            packetloss_error_rate / with_packetloss_error_rate: i32 = "packetlossErrorRate",
            jitter / with_jitter: QosDuration = "jitter",
        }
    }
}

model! {
    pub struct ApplicationProfile / ApplicationProfileBuilder {
        required {
            network_quality_thresholds / with_network_quality_thresholds: NetworkQualityThresholds = "networkQualityThresholds",
        }
        optional {
            /// Assigned by the provider on creation.
            application_profile_id / with_application_profile_id: String = "applicationProfileId",
        }
    }
}

// ── Network quality check ───────────────────────────────────────────

api_enum! {
    /// Per-threshold verdict of a network quality check.
    pub enum QualityAssessment {
        Meets = "meets the application requirements",
        Unable = "unable to meet the application requirements",
    }
}

model! {
    pub struct NetworkQualityCheck / NetworkQualityCheckBuilder {
        required {}
        optional {
            packet_delay_budget / with_packet_delay_budget: QualityAssessment = "packetDelayBudget",
            target_min_downstream_rate / with_target_min_downstream_rate: QualityAssessment = "targetMinDownstreamRate",
            target_min_upstream_rate / with_target_min_upstream_rate: QualityAssessment = "targetMinUpstreamRate",
            packetloss_error_rate / with_packetloss_error_rate: QualityAssessment = "packetlossErrorRate",
            jitter / with_jitter: QualityAssessment = "jitter",
            /// Echo of the media session the check was scoped to.
            media_session_id / with_media_session_id: String = "mediaSessionId",
        }
    }
}

impl NetworkQualityCheck {
    /// `true` if no reported threshold is `Unable`.
    pub fn meets_requirements(&self) -> bool {
        [
            self.packet_delay_budget,
            self.target_min_downstream_rate,
            self.target_min_upstream_rate,
            self.packetloss_error_rate,
            self.jitter,
        ]
        .into_iter()
        .flatten()
        .all(|a| a == QualityAssessment::Meets)
    }
}

// ── Subscriptions ───────────────────────────────────────────────────

api_enum! {
    /// Delivery protocol for events. Only `HTTP` is widely deployed.
    pub enum Protocol {
        Http = "HTTP",
        Mqtt3 = "MQTT3",
        Mqtt5 = "MQTT5",
        Amqp = "AMQP",
        Nats = "NATS",
        Kafka = "KAFKA",
    }
}

api_enum! {
    pub enum SubscriptionStatus {
        ActivationRequested = "ACTIVATION_REQUESTED",
        Active = "ACTIVE",
        Expired = "EXPIRED",
        Inactive = "INACTIVE",
        Deleted = "DELETED",
    }
}

api_enum! {
    pub enum SubscriptionEventType {
        NetworkQuality = "org.camaraproject.connectivity-insights-subscriptions.v0.network-quality",
    }
}

model! {
    /// What to monitor: one device against one application profile.
    pub struct SubscriptionDetail / SubscriptionDetailBuilder {
        required {
            application_profile_id / with_application_profile_id: String = "applicationProfileId",
        }
        optional {
            device / with_device: Device = "device",
            application_server / with_application_server: ApplicationServer = "applicationServer",
            application_server_ports / with_application_server_ports: PortsSpec = "applicationServerPorts",
        }
    }
}

model! {
    pub struct SubscriptionConfig / SubscriptionConfigBuilder {
        required {
            subscription_detail / with_subscription_detail: SubscriptionDetail = "subscriptionDetail",
        }
        optional {
            subscription_expire_time / with_subscription_expire_time: DateTime<Utc> = "subscriptionExpireTime",
            subscription_max_events / with_subscription_max_events: i32 = "subscriptionMaxEvents",
            /// Send an event with the current state right after activation.
            initial_event / with_initial_event: bool = "initialEvent",
        }
    }
}

model! {
    /// An event subscription as created by the consumer and echoed back
    /// (with id and status) by the provider.
    pub struct Subscription / SubscriptionBuilder {
        required {
            config / with_config: SubscriptionConfig = "config",
            protocol / with_protocol: Protocol = "protocol",
            /// URL events are delivered to.
            sink / with_sink: String = "sink",
            types / with_types: Vec<SubscriptionEventType> = "types",
        }
        optional {
            sink_credential / with_sink_credential: SinkCredential = "sinkCredential",
            starts_at / with_starts_at: DateTime<Utc> = "startsAt",
            expires_at / with_expires_at: DateTime<Utc> = "expiresAt",
            status / with_status: SubscriptionStatus = "status",
            subscription_id / with_subscription_id: String = "subscriptionId",
        }
    }
}

// ── Parameters ──────────────────────────────────────────────────────

model! {
    pub struct CreateSubscriptionParams / CreateSubscriptionParamsBuilder {
        required {
            config / with_config: SubscriptionConfig = "config",
            protocol / with_protocol: Protocol = "protocol",
            sink / with_sink: String = "sink",
            types / with_types: Vec<SubscriptionEventType> = "types",
        }
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
            sink_credential / with_sink_credential: SinkCredential = "sinkCredential",
        }
    }
}

impl CreateSubscriptionParams {
    /// HTTP delivery of network-quality events, the common case.
    pub fn network_quality(config: SubscriptionConfig, sink: impl Into<String>) -> Self {
        Self::new(
            config,
            Protocol::Http,
            sink,
            vec![SubscriptionEventType::NetworkQuality],
        )
    }
}

impl Operation for CreateSubscriptionParams {
    type Response = Subscription;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "connectivity-insights-subscriptions/v0.4/subscriptions";
}

model! {
    pub struct ListSubscriptionsParams / ListSubscriptionsParamsBuilder {
        required {}
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
        }
    }
}

impl Operation for ListSubscriptionsParams {
    type Response = Vec<Subscription>;
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "connectivity-insights-subscriptions/v0.4/subscriptions";
}

model! {
    pub struct RetrieveSubscriptionParams / RetrieveSubscriptionParamsBuilder {
        required {
            subscription_id / with_subscription_id: String = "subscriptionId",
        }
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
        }
    }
}

impl Operation for RetrieveSubscriptionParams {
    type Response = Subscription;
    const METHOD: Method = Method::GET;
    const PATH: &'static str =
        "connectivity-insights-subscriptions/v0.4/subscriptions/{subscriptionId}";
    const PATH_FIELDS: &'static [&'static str] = &["subscriptionId"];
}

model! {
    pub struct DeleteSubscriptionParams / DeleteSubscriptionParamsBuilder {
        required {
            subscription_id / with_subscription_id: String = "subscriptionId",
        }
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
        }
    }
}

impl Operation for DeleteSubscriptionParams {
    type Response = ();
    const METHOD: Method = Method::DELETE;
    const PATH: &'static str =
        "connectivity-insights-subscriptions/v0.4/subscriptions/{subscriptionId}";
    const PATH_FIELDS: &'static [&'static str] = &["subscriptionId"];
}

model! {
    pub struct CheckNetworkQualityParams / CheckNetworkQualityParamsBuilder {
        required {
            application_profile_id / with_application_profile_id: String = "applicationProfileId",
        }
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
            device / with_device: Device = "device",
            application_server / with_application_server: ApplicationServer = "applicationServer",
            application_server_ports / with_application_server_ports: PortsSpec = "applicationServerPorts",
            /// Scope the check to one media session of the application.
            media_session_id / with_media_session_id: String = "mediaSessionId",
        }
    }
}

impl Operation for CheckNetworkQualityParams {
    type Response = NetworkQualityCheck;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "connectivity-insights/v0.4/check-network-quality";
}

model! {
    pub struct CreateApplicationProfileParams / CreateApplicationProfileParamsBuilder {
        required {
            network_quality_thresholds / with_network_quality_thresholds: NetworkQualityThresholds = "networkQualityThresholds",
        }
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
        }
    }
}

impl Operation for CreateApplicationProfileParams {
    type Response = ApplicationProfile;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "application-profiles/v0.4/application-profiles";
}

model! {
    pub struct RetrieveApplicationProfileParams / RetrieveApplicationProfileParamsBuilder {
        required {
            application_profile_id / with_application_profile_id: String = "applicationProfileId",
        }
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
        }
    }
}

impl Operation for RetrieveApplicationProfileParams {
    type Response = ApplicationProfile;
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "application-profiles/v0.4/application-profiles/{applicationProfileId}";
    const PATH_FIELDS: &'static [&'static str] = &["applicationProfileId"];
}

model! {
    pub struct DeleteApplicationProfileParams / DeleteApplicationProfileParamsBuilder {
        required {
            application_profile_id / with_application_profile_id: String = "applicationProfileId",
        }
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
        }
    }
}

impl Operation for DeleteApplicationProfileParams {
    type Response = ();
    const METHOD: Method = Method::DELETE;
    const PATH: &'static str = "application-profiles/v0.4/application-profiles/{applicationProfileId}";
    const PATH_FIELDS: &'static [&'static str] = &["applicationProfileId"];
}

// ── Service ─────────────────────────────────────────────────────────

pub struct ConnectivityInsightsService<'a> {
    client: &'a CamaraClient,
}

impl CamaraClient {
    pub fn connectivity_insights(&self) -> ConnectivityInsightsService<'_> {
        ConnectivityInsightsService { client: self }
    }
}

impl ConnectivityInsightsService<'_> {
    // ── Subscriptions ───────────────────────────────────────────────

    pub async fn create_subscription(
        &self,
        params: &CreateSubscriptionParams,
    ) -> Result<Subscription, Error> {
        self.client.execute(params).await
    }

    pub async fn list_subscriptions(&self) -> Result<Vec<Subscription>, Error> {
        self.client.execute(&ListSubscriptionsParams::new()).await
    }

    pub async fn retrieve_subscription(
        &self,
        subscription_id: impl Into<String>,
    ) -> Result<Subscription, Error> {
        self.client
            .execute(&RetrieveSubscriptionParams::new(subscription_id))
            .await
    }

    pub async fn delete_subscription(&self, subscription_id: impl Into<String>) -> Result<(), Error> {
        self.client
            .execute(&DeleteSubscriptionParams::new(subscription_id))
            .await
    }

    // ── Quality checks ──────────────────────────────────────────────

    pub async fn check_network_quality(
        &self,
        params: &CheckNetworkQualityParams,
    ) -> Result<NetworkQualityCheck, Error> {
        self.client.execute(params).await
    }

    // ── Application profiles ────────────────────────────────────────

    pub async fn create_application_profile(
        &self,
        thresholds: NetworkQualityThresholds,
    ) -> Result<ApplicationProfile, Error> {
        self.client
            .execute(&CreateApplicationProfileParams::new(thresholds))
            .await
    }

    pub async fn retrieve_application_profile(
        &self,
        application_profile_id: impl Into<String>,
    ) -> Result<ApplicationProfile, Error> {
        self.client
            .execute(&RetrieveApplicationProfileParams::new(application_profile_id))
            .await
    }

    pub async fn delete_application_profile(
        &self,
        application_profile_id: impl Into<String>,
    ) -> Result<(), Error> {
        self.client
            .execute(&DeleteApplicationProfileParams::new(application_profile_id))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;
    use crate::model::{Model, assert_enum_idempotent};
    use crate::request::assemble;
    use crate::shape;
    use crate::types::{RateUnit, TimeUnit};

    const EVENT_TYPE: &str = "org.camaraproject.connectivity-insights-subscriptions.v0.network-quality";

    fn sample_config() -> SubscriptionConfig {
        SubscriptionConfig::new(
            SubscriptionDetail::new("025d7a6b-5b8f-4d8b-a1b8-5e3bb0a2c1d9")
                .with_device(Device::from_phone_number("+123456789")),
        )
    }

    #[test]
    fn insight_enum_literals_coerce() {
        assert_enum_idempotent::<QualityAssessment>();
        assert_enum_idempotent::<Protocol>();
        assert_enum_idempotent::<SubscriptionStatus>();
        assert_enum_idempotent::<SubscriptionEventType>();
    }

    #[test]
    fn subscription_serializes_exactly_the_assigned_keys() {
        let subscription = Subscription::builder()
            .config(sample_config())
            .protocol("HTTP")
            .sink("https://example.com/sink")
            .starts_at("2024-01-01T00:00:00Z")
            .types([EVENT_TYPE])
            .build()
            .unwrap();

        let shape = subscription.to_shape().unwrap();
        let mut keys: Vec<_> = shape.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["config", "protocol", "sink", "startsAt", "types"]);

        assert_eq!(shape["protocol"], json!("HTTP"));
        assert_eq!(shape["startsAt"], json!("2024-01-01T00:00:00Z"));
        assert_eq!(shape["types"], json!([EVENT_TYPE]));
    }

    #[test]
    fn bogus_status_is_an_invalid_value() {
        let err = Subscription::builder()
            .config(sample_config())
            .protocol("HTTP")
            .sink("https://example.com/sink")
            .types([EVENT_TYPE])
            .status("BOGUS")
            .build()
            .unwrap_err();

        match err {
            Error::InvalidValue { kind, value, allowed } => {
                assert_eq!(kind, "SubscriptionStatus");
                assert_eq!(value, "BOGUS");
                assert!(allowed.iter().any(|a| a == "ACTIVATION_REQUESTED"));
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn bogus_status_in_response_is_an_invalid_value() {
        let mut raw = Value::Object(
            Subscription::new(sample_config(), Protocol::Http, "https://example.com/sink", vec![
                SubscriptionEventType::NetworkQuality,
            ])
            .to_shape()
            .unwrap(),
        );
        raw["status"] = json!("BOGUS");

        let err = shape::decode::<Subscription>(raw).unwrap_err();
        assert!(
            matches!(err, Error::InvalidValue { ref value, .. } if value == "BOGUS"),
            "got {err:?}"
        );
    }

    #[test]
    fn builder_without_sink_reports_it() {
        let err = Subscription::builder()
            .config(sample_config())
            .protocol(Protocol::Http)
            .types([EVENT_TYPE])
            .build()
            .unwrap_err();
        assert!(
            matches!(err, Error::MissingRequiredField { model: "Subscription", ref field } if field == "sink"),
            "got {err:?}"
        );
    }

    #[test]
    fn subscription_response_round_trips() {
        let raw = json!({
            "subscriptionId": "qs15-h556-rt89-1298",
            "protocol": "HTTP",
            "sink": "https://endpoint.example.com/sink",
            "types": [EVENT_TYPE],
            "config": {
                "subscriptionDetail": {
                    "applicationProfileId": "025d7a6b",
                    "device": { "phoneNumber": "+123456789" }
                },
                "subscriptionExpireTime": "2024-03-22T05:40:58.469Z",
                "subscriptionMaxEvents": 5,
                "initialEvent": true
            },
            "startsAt": "2024-03-21T05:40:58.469Z",
            "status": "ACTIVATION_REQUESTED",
            "unknownExtension": { "ignored": true }
        });

        let subscription: Subscription = shape::decode(raw).unwrap();
        assert_eq!(subscription.status, Some(SubscriptionStatus::ActivationRequested));
        assert_eq!(subscription.config.subscription_max_events, Some(5));
        assert_eq!(subscription.expires_at, None);

        let again: Subscription = shape::decode(serde_json::to_value(&subscription).unwrap()).unwrap();
        assert_eq!(again, subscription);
    }

    #[test]
    fn network_quality_check_sends_media_session_id() {
        let params = CheckNetworkQualityParams::new("025d7a6b")
            .with_device(Device::from_phone_number("+123456789"))
            .with_media_session_id("ms-42");
        let request = assemble(&params).unwrap();

        assert_eq!(request.path, "connectivity-insights/v0.4/check-network-quality");
        assert_eq!(
            request.body,
            Some(json!({
                "applicationProfileId": "025d7a6b",
                "device": { "phoneNumber": "+123456789" },
                "mediaSessionId": "ms-42"
            }))
        );
    }

    #[test]
    fn quality_verdicts_decode() {
        let check: NetworkQualityCheck = shape::decode(json!({
            "packetDelayBudget": "meets the application requirements",
            "targetMinDownstreamRate": "unable to meet the application requirements",
            "mediaSessionId": "ms-42"
        }))
        .unwrap();

        assert_eq!(check.packet_delay_budget, Some(QualityAssessment::Meets));
        assert_eq!(check.media_session_id.as_deref(), Some("ms-42"));
        assert!(!check.meets_requirements());
    }

    #[test]
    fn application_profile_from_shape() {
        let profile = ApplicationProfile::from_shape(json!({
            "networkQualityThresholds": {
                "packetDelayBudget": { "value": 120, "unit": "Milliseconds" },
                "targetMinDownstreamRate": { "value": 10, "unit": "Mbps" }
            }
        }))
        .unwrap();

        let thresholds = &profile.network_quality_thresholds;
        assert_eq!(thresholds.packet_delay_budget.as_ref().map(|d| d.unit), Some(TimeUnit::Milliseconds));
        assert_eq!(thresholds.target_min_downstream_rate.as_ref().map(|r| r.unit), Some(RateUnit::Mbps));
        assert_eq!(profile.application_profile_id, None);
    }

    #[test]
    fn subscription_id_is_percent_encoded_in_path() {
        let request = assemble(&DeleteSubscriptionParams::new("a/b")).unwrap();
        assert_eq!(
            request.path,
            "connectivity-insights-subscriptions/v0.4/subscriptions/a%2Fb"
        );
    }
}
