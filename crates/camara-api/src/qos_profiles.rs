//! QoS Profiles API (`qos-profiles/v1`).
//!
//! Read-only catalogue of the QoS profiles a provider offers, with their
//! rate, latency and duration bounds.

use reqwest::Method;

use crate::request::Operation;
use crate::types::{Device, QosDuration, Rate};
use crate::{CamaraClient, Error};

// ── Types ───────────────────────────────────────────────────────────

api_enum! {
    pub enum QosProfileStatus {
        Active = "ACTIVE",
        Inactive = "INACTIVE",
        Deprecated = "DEPRECATED",
    }
}

model! {
    /// Country (and optionally networks) where a profile can be used.
    pub struct CountryAvailability / CountryAvailabilityBuilder {
        required {
            /// ISO 3166-1 alpha-2 code.
            country_code / with_country_code: String = "countryCode",
        }
        optional {
            /// MCC-MNC codes; absent means every network in the country.
            networks / with_networks: Vec<String> = "networks",
        }
    }
}

model! {
    pub struct QosProfile / QosProfileBuilder {
        required {
            name / with_name: String = "name",
            status / with_status: QosProfileStatus = "status",
        }
        optional {
            description / with_description: String = "description",
            target_min_upstream_rate / with_target_min_upstream_rate: Rate = "targetMinUpstreamRate",
            max_upstream_rate / with_max_upstream_rate: Rate = "maxUpstreamRate",
            max_upstream_burst_rate / with_max_upstream_burst_rate: Rate = "maxUpstreamBurstRate",
            target_min_downstream_rate / with_target_min_downstream_rate: Rate = "targetMinDownstreamRate",
            max_downstream_rate / with_max_downstream_rate: Rate = "maxDownstreamRate",
            max_downstream_burst_rate / with_max_downstream_burst_rate: Rate = "maxDownstreamBurstRate",
            min_duration / with_min_duration: QosDuration = "minDuration",
            max_duration / with_max_duration: QosDuration = "maxDuration",
            /// 1 (highest) to 100 (lowest).
            priority / with_priority: i32 = "priority",
            packet_delay_budget / with_packet_delay_budget: QosDuration = "packetDelayBudget",
            jitter / with_jitter: QosDuration = "jitter",
            /// Exponent of the tolerated loss rate, 10^-n.
            packet_error_loss_rate / with_packet_error_loss_rate: i32 = "packetErrorLossRate",
            /// Absent: no restriction advertised. Empty: available nowhere.
            country_availability / with_country_availability: Vec<CountryAvailability> = "countryAvailability",
        }
    }
}

// ── Parameters ──────────────────────────────────────────────────────

model! {
    pub struct RetrieveQosProfileParams / RetrieveQosProfileParamsBuilder {
        required {
            name / with_name: String = "name",
        }
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
        }
    }
}

impl Operation for RetrieveQosProfileParams {
    type Response = QosProfile;
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "qos-profiles/v1/qos-profiles/{name}";
    const PATH_FIELDS: &'static [&'static str] = &["name"];
}

model! {
    /// Filter for the profile catalogue; every field narrows the result.
    pub struct ListQosProfilesParams / ListQosProfilesParamsBuilder {
        required {}
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
            device / with_device: Device = "device",
            name / with_name: String = "name",
            status / with_status: QosProfileStatus = "status",
        }
    }
}

impl Operation for ListQosProfilesParams {
    type Response = Vec<QosProfile>;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "qos-profiles/v1/retrieve-qos-profiles";
}

// ── Service ─────────────────────────────────────────────────────────

pub struct QosProfilesService<'a> {
    client: &'a CamaraClient,
}

impl CamaraClient {
    pub fn qos_profiles(&self) -> QosProfilesService<'_> {
        QosProfilesService { client: self }
    }
}

impl QosProfilesService<'_> {
    pub async fn retrieve(&self, name: impl Into<String>) -> Result<QosProfile, Error> {
        self.client
            .execute(&RetrieveQosProfileParams::new(name))
            .await
    }

    pub async fn list(&self, params: &ListQosProfilesParams) -> Result<Vec<QosProfile>, Error> {
        self.client.execute(params).await
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
    use crate::types::{RateUnit, TimeUnit};

    #[test]
    fn status_literals_coerce() {
        assert_enum_idempotent::<QosProfileStatus>();
    }

    #[test]
    fn omitted_country_availability_is_not_serialized() {
        let profile = QosProfile::new("QOS_L", QosProfileStatus::Active);
        let json = serde_json::to_value(&profile).unwrap();

        assert_eq!(json, json!({ "name": "QOS_L", "status": "ACTIVE" }));
        assert!(json.get("countryAvailability").is_none());
    }

    #[test]
    fn empty_country_availability_is_serialized_as_empty_list() {
        let profile = QosProfile::new("QOS_L", QosProfileStatus::Active)
            .with_country_availability(Vec::<CountryAvailability>::new());
        let json = serde_json::to_value(&profile).unwrap();

        assert_eq!(json["countryAvailability"], json!([]));
    }

    #[test]
    fn full_profile_round_trips() {
        let raw = json!({
            "name": "QOS_E",
            "description": "Low latency gaming",
            "status": "ACTIVE",
            "targetMinUpstreamRate": { "value": 10, "unit": "Mbps" },
            "maxDownstreamRate": { "value": 1, "unit": "Gbps" },
            "minDuration": { "value": 1, "unit": "Minutes" },
            "maxDuration": { "value": 24, "unit": "Hours" },
            "priority": 20,
            "packetDelayBudget": { "value": 12, "unit": "Milliseconds" },
            "packetErrorLossRate": 3,
            "countryAvailability": [
                { "countryCode": "DE", "networks": ["26201", "26202"] },
                { "countryCode": "ES" }
            ]
        });

        let profile: QosProfile = shape::decode(raw.clone()).unwrap();
        assert_eq!(
            profile.max_downstream_rate.as_ref().map(|r| r.unit),
            Some(RateUnit::Gbps)
        );
        assert_eq!(
            profile.packet_delay_budget.as_ref().map(|d| (d.value, d.unit)),
            Some((12, TimeUnit::Milliseconds))
        );
        assert_eq!(profile.country_availability.as_ref().map(Vec::len), Some(2));

        assert_eq!(serde_json::Value::Object(profile.to_shape().unwrap()), raw);
    }

    #[test]
    fn list_filter_by_status() {
        let params = ListQosProfilesParams::builder()
            .status("DEPRECATED")
            .build()
            .unwrap();
        let request = assemble(&params).unwrap();
        assert_eq!(request.body, Some(json!({ "status": "DEPRECATED" })));

        let err = ListQosProfilesParams::builder()
            .status("RETIRED")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidValue { kind: "QosProfileStatus", .. }), "got {err:?}");
    }

    #[test]
    fn profile_name_goes_into_path() {
        let request = assemble(&RetrieveQosProfileParams::new("QOS_E")).unwrap();
        assert_eq!(request.path, "qos-profiles/v1/qos-profiles/QOS_E");
        assert_eq!(request.body, None);
    }
}
