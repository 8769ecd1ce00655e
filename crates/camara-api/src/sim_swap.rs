//! SIM Swap API (`sim-swap/v1`).
//!
//! Tells whether the SIM card bound to a phone number changed recently,
//! and when the last change happened.

use chrono::{DateTime, Utc};
use reqwest::Method;

use crate::request::Operation;
use crate::{CamaraClient, Error};

// ── Types ───────────────────────────────────────────────────────────

model! {
    pub struct SimSwapCheck / SimSwapCheckBuilder {
        required {
            /// `true` if the SIM was swapped within the requested period.
            swapped / with_swapped: bool = "swapped",
        }
        optional {}
    }
}

model! {
    pub struct SimSwapInfo / SimSwapInfoBuilder {
        required {}
        optional {
            /// Absent when no swap was recorded in the monitored period.
            latest_sim_change / with_latest_sim_change: DateTime<Utc> = "latestSimChange",
            /// Months the provider keeps swap history for, when limited.
            monitored_period / with_monitored_period: i32 = "monitoredPeriod",
        }
    }
}

// ── Parameters ──────────────────────────────────────────────────────

model! {
    pub struct CheckSimSwapParams / CheckSimSwapParamsBuilder {
        required {}
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
            /// Omitted with three-legged tokens that already identify the line.
            phone_number / with_phone_number: String = "phoneNumber",
            /// Look-back window in hours (1..=2400, default 240).
            max_age / with_max_age: i32 = "maxAge",
        }
    }
}

impl Operation for CheckSimSwapParams {
    type Response = SimSwapCheck;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "sim-swap/v1/check";
}

model! {
    pub struct RetrieveSimSwapDateParams / RetrieveSimSwapDateParamsBuilder {
        required {}
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
            phone_number / with_phone_number: String = "phoneNumber",
        }
    }
}

impl Operation for RetrieveSimSwapDateParams {
    type Response = SimSwapInfo;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "sim-swap/v1/retrieve-date";
}

// ── Service ─────────────────────────────────────────────────────────

pub struct SimSwapService<'a> {
    client: &'a CamaraClient,
}

impl CamaraClient {
    pub fn sim_swap(&self) -> SimSwapService<'_> {
        SimSwapService { client: self }
    }
}

impl SimSwapService<'_> {
    pub async fn check(
        &self,
        phone_number: impl Into<String>,
        max_age: Option<i32>,
    ) -> Result<SimSwapCheck, Error> {
        let mut params = CheckSimSwapParams::new().with_phone_number(phone_number);
        if let Some(hours) = max_age {
            params = params.with_max_age(hours);
        }
        self.client.execute(&params).await
    }

    pub async fn retrieve_date(&self, phone_number: impl Into<String>) -> Result<SimSwapInfo, Error> {
        let params = RetrieveSimSwapDateParams::new().with_phone_number(phone_number);
        self.client.execute(&params).await
    }

    /// Run a prepared bundle, e.g. one carrying an `x-correlator`.
    pub async fn check_with(&self, params: &CheckSimSwapParams) -> Result<SimSwapCheck, Error> {
        self.client.execute(params).await
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
    fn check_body_omits_absent_max_age() {
        let params = CheckSimSwapParams::new()
            .with_phone_number("+346661113334")
            .with_x_correlator("b4333c46-49c0-4f62-80d7-f0ef930f1c46");
        let request = assemble(&params).unwrap();

        assert_eq!(request.path, "sim-swap/v1/check");
        assert_eq!(request.body, Some(json!({ "phoneNumber": "+346661113334" })));
        assert_eq!(
            request.header("x-correlator"),
            Some("b4333c46-49c0-4f62-80d7-f0ef930f1c46")
        );
    }

    #[test]
    fn swap_date_may_be_absent() {
        let info: SimSwapInfo = shape::decode(json!({ "monitoredPeriod": 120 })).unwrap();
        assert_eq!(info.latest_sim_change, None);
        assert_eq!(info.monitored_period, Some(120));

        let info: SimSwapInfo =
            shape::decode(json!({ "latestSimChange": "2023-07-03T14:27:08.312+02:00" })).unwrap();
        assert_eq!(
            info.latest_sim_change.unwrap().to_rfc3339(),
            "2023-07-03T12:27:08.312+00:00"
        );
    }
}
