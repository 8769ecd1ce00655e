//! Payload types shared by several CAMARA APIs.
//!
//! Field names are snake_case in Rust and camelCase on the wire; the wire
//! name of every field is listed in its `model!` declaration.

use chrono::{DateTime, Utc};

// ── Device ──────────────────────────────────────────────────────────

model! {
    /// Public IPv4 identity of a device, as seen by the network.
    ///
    /// The private address or the public port disambiguate devices that
    /// share one public address behind NAT.
    pub struct DeviceIpv4Address / DeviceIpv4AddressBuilder {
        required {
            public_address / with_public_address: String = "publicAddress",
        }
        optional {
            private_address / with_private_address: String = "privateAddress",
            public_port / with_public_port: i32 = "publicPort",
        }
    }
}

model! {
    /// End-user equipment able to connect to the mobile network.
    ///
    /// At least one identifier should be supplied. When a three-legged
    /// access token already identifies the device, the whole object may be
    /// omitted from requests.
    pub struct Device / DeviceBuilder {
        required {}
        optional {
            /// E.164 number with leading `+`.
            phone_number / with_phone_number: String = "phoneNumber",
            /// Public identifier of the form `user@domain`.
            network_access_identifier / with_network_access_identifier: String = "networkAccessIdentifier",
            ipv4_address / with_ipv4_address: DeviceIpv4Address = "ipv4Address",
            ipv6_address / with_ipv6_address: String = "ipv6Address",
        }
    }
}

impl Device {
    /// Identify a device by its phone number only.
    pub fn from_phone_number(phone_number: impl Into<String>) -> Self {
        Self::new().with_phone_number(phone_number)
    }

    /// Returns `true` if at least one identifier is present.
    pub fn is_identified(&self) -> bool {
        self.phone_number.is_some()
            || self.network_access_identifier.is_some()
            || self.ipv4_address.is_some()
            || self.ipv6_address.is_some()
    }
}

// ── Application server & ports ──────────────────────────────────────

model! {
    /// Application server the device talks to.
    pub struct ApplicationServer / ApplicationServerBuilder {
        required {}
        optional {
            /// IPv4 address or CIDR range.
            ipv4_address / with_ipv4_address: String = "ipv4Address",
            /// IPv6 address or prefix.
            ipv6_address / with_ipv6_address: String = "ipv6Address",
        }
    }
}

model! {
    pub struct PortRange / PortRangeBuilder {
        required {
            from / with_from: i32 = "from",
            to / with_to: i32 = "to",
        }
        optional {}
    }
}

model! {
    /// Ports as a mix of ranges and single ports.
    pub struct PortsSpec / PortsSpecBuilder {
        required {}
        optional {
            ranges / with_ranges: Vec<PortRange> = "ranges",
            ports / with_ports: Vec<i32> = "ports",
        }
    }
}

// ── Geography ───────────────────────────────────────────────────────

model! {
    /// WGS84 coordinate.
    pub struct Point / PointBuilder {
        required {
            latitude / with_latitude: f64 = "latitude",
            longitude / with_longitude: f64 = "longitude",
        }
        optional {}
    }
}

api_enum! {
    pub enum AreaType {
        Circle = "CIRCLE",
        Polygon = "POLYGON",
    }
}

model! {
    /// Geographical area, discriminated by `area_type`.
    ///
    /// Circles need `center` and `radius` (metres); polygons need
    /// `boundary`.
    pub struct Area / AreaBuilder {
        required {
            area_type / with_area_type: AreaType = "areaType",
        }
        optional {
            center / with_center: Point = "center",
            radius / with_radius: i32 = "radius",
            boundary / with_boundary: Vec<Point> = "boundary",
        }
        variants "areaType" {
            "CIRCLE" => ["center", "radius"],
            "POLYGON" => ["boundary"],
        }
    }
}

impl Area {
    pub fn circle(center: Point, radius: i32) -> Self {
        Self::new(AreaType::Circle)
            .with_center(center)
            .with_radius(radius)
    }

    pub fn polygon(boundary: Vec<Point>) -> Self {
        Self::new(AreaType::Polygon).with_boundary(boundary)
    }
}

// ── Notification sink credentials ───────────────────────────────────

api_enum! {
    pub enum SinkCredentialType {
        Plain = "PLAIN",
        AccessToken = "ACCESSTOKEN",
        RefreshToken = "REFRESHTOKEN",
    }
}

api_enum! {
    pub enum AccessTokenType {
        Bearer = "bearer",
    }
}

model! {
    /// Credential the provider presents when posting events to a sink.
    pub struct SinkCredential / SinkCredentialBuilder {
        required {
            credential_type / with_credential_type: SinkCredentialType = "credentialType",
        }
        optional {
            access_token / with_access_token: String = "accessToken",
            access_token_expires_utc / with_access_token_expires_utc: DateTime<Utc> = "accessTokenExpiresUtc",
            access_token_type / with_access_token_type: AccessTokenType = "accessTokenType",
        }
    }
}

// ── Rates and durations ─────────────────────────────────────────────

api_enum! {
    pub enum RateUnit {
        Bps = "bps",
        Kbps = "kbps",
        Mbps = "Mbps",
        Gbps = "Gbps",
        Tbps = "Tbps",
    }
}

model! {
    /// Bit rate, e.g. `{"value": 10, "unit": "Mbps"}`.
    pub struct Rate / RateBuilder {
        required {
            value / with_value: i64 = "value",
            unit / with_unit: RateUnit = "unit",
        }
        optional {}
    }
}

api_enum! {
    pub enum TimeUnit {
        Days = "Days",
        Hours = "Hours",
        Minutes = "Minutes",
        Seconds = "Seconds",
        Milliseconds = "Milliseconds",
        Microseconds = "Microseconds",
        Nanoseconds = "Nanoseconds",
    }
}

model! {
    /// Time span with an explicit unit, e.g. `{"value": 12, "unit": "Milliseconds"}`.
    pub struct QosDuration / QosDurationBuilder {
        required {
            value / with_value: i64 = "value",
            unit / with_unit: TimeUnit = "unit",
        }
        optional {}
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::model::{ApiEnum, Model, assert_enum_idempotent};
    use crate::shape;
    use crate::Error;

    #[test]
    fn shared_enums_round_trip_their_literals() {
        assert_enum_idempotent::<AreaType>();
        assert_enum_idempotent::<SinkCredentialType>();
        assert_enum_idempotent::<AccessTokenType>();
        assert_enum_idempotent::<RateUnit>();
        assert_enum_idempotent::<TimeUnit>();
    }

    #[test]
    fn enum_literals_are_case_sensitive() {
        assert!(RateUnit::coerce("Mbps").is_ok());
        let err = RateUnit::coerce("mbps").unwrap_err();
        match err {
            Error::InvalidValue { kind, value, allowed } => {
                assert_eq!(kind, "RateUnit");
                assert_eq!(value, "mbps");
                assert_eq!(allowed, vec!["bps", "kbps", "Mbps", "Gbps", "Tbps"]);
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn device_serializes_wire_names_only() {
        let device = Device::from_phone_number("+123456789").with_ipv4_address(
            DeviceIpv4Address::new("84.125.93.10").with_public_port(59765),
        );
        let shape = device.to_shape().unwrap();

        assert_eq!(
            serde_json::Value::Object(shape),
            json!({
                "phoneNumber": "+123456789",
                "ipv4Address": { "publicAddress": "84.125.93.10", "publicPort": 59765 }
            })
        );
    }

    #[test]
    fn with_setters_leave_the_original_untouched() {
        let original = Device::from_phone_number("+111");
        let updated = original.clone().with_phone_number("+222");

        assert_eq!(original.phone_number.as_deref(), Some("+111"));
        assert_eq!(updated.phone_number.as_deref(), Some("+222"));
        assert_eq!(original.ipv4_address, updated.ipv4_address);
    }

    #[test]
    fn builder_reports_missing_required_field() {
        let err = Point::builder().latitude(50.0).build().unwrap_err();
        assert!(
            matches!(err, Error::MissingRequiredField { model: "Point", ref field } if field == "longitude"),
            "got {err:?}"
        );
    }

    #[test]
    fn builder_accepts_shapes_for_nested_models() {
        let area = Area::builder()
            .area_type("CIRCLE")
            .center(json!({ "latitude": 50.735, "longitude": 7.101 }))
            .radius(50_000)
            .build()
            .unwrap();

        assert_eq!(area, Area::circle(Point::new(50.735, 7.101), 50_000));
    }

    #[test]
    fn builder_surfaces_nested_shape_errors() {
        let err = Area::builder()
            .area_type("CIRCLE")
            .center(json!({ "latitude": 50.735 }))
            .build()
            .unwrap_err();
        assert!(
            matches!(err, Error::MissingRequiredField { model: "Point", ref field } if field == "longitude"),
            "got {err:?}"
        );
    }

    #[test]
    fn circle_needs_center_and_radius() {
        let err = Area::from_shape(json!({ "areaType": "CIRCLE", "radius": 800 })).unwrap_err();
        assert!(
            matches!(err, Error::MissingRequiredField { model: "Area", ref field } if field == "center"),
            "got {err:?}"
        );

        let err = Area::builder()
            .area_type(AreaType::Circle)
            .center(Point::new(50.735, 7.101))
            .build()
            .unwrap_err();
        assert!(
            matches!(err, Error::MissingRequiredField { model: "Area", ref field } if field == "radius"),
            "got {err:?}"
        );
    }

    #[test]
    fn polygon_needs_boundary() {
        let err = Area::from_shape(json!({ "areaType": "POLYGON", "radius": 800 })).unwrap_err();
        assert!(
            matches!(err, Error::MissingRequiredField { model: "Area", ref field } if field == "boundary"),
            "got {err:?}"
        );

        let triangle = Area::from_shape(json!({
            "areaType": "POLYGON",
            "boundary": [
                { "latitude": 45.0, "longitude": 2.0 },
                { "latitude": 45.1, "longitude": 2.1 },
                { "latitude": 45.0, "longitude": 2.2 }
            ]
        }))
        .unwrap();
        assert_eq!(triangle.boundary.map(|b| b.len()), Some(3));
    }

    #[test]
    fn null_boundary_counts_as_missing() {
        let err = Area::from_shape(json!({ "areaType": "POLYGON", "boundary": null })).unwrap_err();
        assert!(matches!(err, Error::MissingRequiredField { .. }), "got {err:?}");
    }

    #[test]
    fn round_trip_keeps_absent_fields_absent() {
        let credential = SinkCredential::new(SinkCredentialType::AccessToken)
            .with_access_token("token")
            .with_access_token_type(AccessTokenType::Bearer);

        let json = serde_json::to_value(&credential).unwrap();
        assert!(json.get("accessTokenExpiresUtc").is_none());

        let back: SinkCredential = shape::decode(json).unwrap();
        assert_eq!(back, credential);
        assert_eq!(back.access_token_expires_utc, None);
    }

    #[test]
    fn descriptor_table_lists_required_fields_first() {
        let wires: Vec<_> = DeviceIpv4Address::FIELDS.iter().map(|f| (f.wire, f.required)).collect();
        assert_eq!(
            wires,
            vec![("publicAddress", true), ("privateAddress", false), ("publicPort", false)]
        );
    }
}
