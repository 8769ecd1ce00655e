//! Simple Edge Discovery API (`simple-edge-discovery/v1`).
//!
//! Finds the edge cloud zone closest to a device. The device is identified
//! by headers rather than a body, since this is a GET.

use reqwest::Method;

use crate::request::{Operation, X_CORRELATOR};
use crate::types::Device;
use crate::{CamaraClient, Error};

api_enum! {
    pub enum EdgeDiscoveryFilter {
        Closest = "closest",
    }
}

api_enum! {
    pub enum EdgeCloudZoneStatus {
        Active = "active",
        Inactive = "inactive",
        Unknown = "unknown",
    }
}

model! {
    pub struct EdgeCloudZone / EdgeCloudZoneBuilder {
        required {
            edge_cloud_zone_id / with_edge_cloud_zone_id: String = "edgeCloudZoneId",
            edge_cloud_zone_name / with_edge_cloud_zone_name: String = "edgeCloudZoneName",
            edge_cloud_provider / with_edge_cloud_provider: String = "edgeCloudProvider",
        }
        optional {
            edge_cloud_region / with_edge_cloud_region: String = "edgeCloudRegion",
            edge_cloud_zone_status / with_edge_cloud_zone_status: EdgeCloudZoneStatus = "edgeCloudZoneStatus",
        }
    }
}

model! {
    pub struct EdgeCloudZonesParams / EdgeCloudZonesParamsBuilder {
        required {}
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
            filter / with_filter: EdgeDiscoveryFilter = "filter",
            phone_number / with_phone_number: String = "Phone-Number",
            /// `public-ip[:port]`.
            ipv4_address / with_ipv4_address: String = "IPv4-Address",
            ipv6_address / with_ipv6_address: String = "IPv6-Address",
            network_access_identifier / with_network_access_identifier: String = "Network-Access-Identifier",
        }
    }
}

impl EdgeCloudZonesParams {
    /// Closest zone for `device`, with its identifiers moved into headers.
    pub fn closest_to(device: &Device) -> Self {
        let mut params = Self::new().with_filter(EdgeDiscoveryFilter::Closest);
        params.phone_number.clone_from(&device.phone_number);
        params.network_access_identifier.clone_from(&device.network_access_identifier);
        params.ipv6_address.clone_from(&device.ipv6_address);
        params.ipv4_address = device.ipv4_address.as_ref().map(|ip| match ip.public_port {
            Some(port) => format!("{}:{port}", ip.public_address),
            None => ip.public_address.clone(),
        });
        params
    }
}

impl Operation for EdgeCloudZonesParams {
    type Response = Vec<EdgeCloudZone>;
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "simple-edge-discovery/v1/mec-platforms";
    const HEADER_FIELDS: &'static [&'static str] = &[
        X_CORRELATOR,
        "Phone-Number",
        "IPv4-Address",
        "IPv6-Address",
        "Network-Access-Identifier",
    ];
    const QUERY_FIELDS: &'static [&'static str] = &["filter"];
}

// ── Service ─────────────────────────────────────────────────────────

pub struct EdgeDiscoveryService<'a> {
    client: &'a CamaraClient,
}

impl CamaraClient {
    pub fn edge_discovery(&self) -> EdgeDiscoveryService<'_> {
        EdgeDiscoveryService { client: self }
    }
}

impl EdgeDiscoveryService<'_> {
    pub async fn edge_cloud_zones(
        &self,
        params: &EdgeCloudZonesParams,
    ) -> Result<Vec<EdgeCloudZone>, Error> {
        self.client.execute(params).await
    }
}
