//! Device Location APIs: verification (`location-verification/v2`) and
//! retrieval (`location-retrieval/v0`).

use chrono::{DateTime, Utc};
use reqwest::Method;

use crate::request::Operation;
use crate::types::{Area, Device};
use crate::{CamaraClient, Error};

// ── Types ───────────────────────────────────────────────────────────

api_enum! {
    pub enum VerificationResult {
        True = "TRUE",
        False = "FALSE",
        Unknown = "UNKNOWN",
        /// Only part of the device's location area lies inside the request area.
        Partial = "PARTIAL",
    }
}

model! {
    pub struct LocationVerification / LocationVerificationBuilder {
        required {
            verification_result / with_verification_result: VerificationResult = "verificationResult",
        }
        optional {
            last_location_time / with_last_location_time: DateTime<Utc> = "lastLocationTime",
            /// Percentage overlap, present only for `PARTIAL`.
            match_rate / with_match_rate: i32 = "matchRate",
            device / with_device: Device = "device",
        }
    }
}

model! {
    pub struct Location / LocationBuilder {
        required {
            last_location_time / with_last_location_time: DateTime<Utc> = "lastLocationTime",
            area / with_area: Area = "area",
        }
        optional {
            device / with_device: Device = "device",
        }
    }
}

// ── Parameters ──────────────────────────────────────────────────────

model! {
    pub struct VerifyLocationParams / VerifyLocationParamsBuilder {
        required {
            area / with_area: Area = "area",
        }
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
            device / with_device: Device = "device",
            /// Maximum age of the location fix, in seconds.
            max_age / with_max_age: i32 = "maxAge",
        }
    }
}

impl Operation for VerifyLocationParams {
    type Response = LocationVerification;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "location-verification/v2/verify";
}

model! {
    pub struct RetrieveLocationParams / RetrieveLocationParamsBuilder {
        required {}
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
            device / with_device: Device = "device",
            max_age / with_max_age: i32 = "maxAge",
            /// Largest acceptable area in square metres.
            max_surface / with_max_surface: i32 = "maxSurface",
        }
    }
}

impl Operation for RetrieveLocationParams {
    type Response = Location;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "location-retrieval/v0/retrieve";
}

// ── Service ─────────────────────────────────────────────────────────

pub struct LocationService<'a> {
    client: &'a CamaraClient,
}

impl CamaraClient {
    pub fn location(&self) -> LocationService<'_> {
        LocationService { client: self }
    }
}

impl LocationService<'_> {
    pub async fn verify(
        &self,
        params: &VerifyLocationParams,
    ) -> Result<LocationVerification, Error> {
        self.client.execute(params).await
    }

    pub async fn retrieve(&self, params: &RetrieveLocationParams) -> Result<Location, Error> {
        self.client.execute(params).await
    }
}
