//! Number Verification API (`number-verification/v1`).
//!
//! Both operations need a three-legged access token obtained through the
//! device's mobile data connection; the network, not the caller,
//! identifies the line.

use reqwest::Method;

use crate::request::Operation;
use crate::{CamaraClient, Error};

model! {
    pub struct NumberVerification / NumberVerificationBuilder {
        required {
            device_phone_number_verified / with_device_phone_number_verified: bool = "devicePhoneNumberVerified",
        }
        optional {}
    }
}

model! {
    pub struct DevicePhoneNumber / DevicePhoneNumberBuilder {
        required {
            device_phone_number / with_device_phone_number: String = "devicePhoneNumber",
        }
        optional {}
    }
}

model! {
    /// Exactly one of `phone_number` or `hashed_phone_number` should be set.
    pub struct VerifyNumberParams / VerifyNumberParamsBuilder {
        required {}
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
            phone_number / with_phone_number: String = "phoneNumber",
            /// SHA-256 of the E.164 number, hex encoded.
            hashed_phone_number / with_hashed_phone_number: String = "hashedPhoneNumber",
        }
    }
}

impl Operation for VerifyNumberParams {
    type Response = NumberVerification;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "number-verification/v1/verify";
}

model! {
    pub struct DevicePhoneNumberParams / DevicePhoneNumberParamsBuilder {
        required {}
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
        }
    }
}

impl Operation for DevicePhoneNumberParams {
    type Response = DevicePhoneNumber;
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "number-verification/v1/device-phone-number";
}

// ── Service ─────────────────────────────────────────────────────────

pub struct NumberVerificationService<'a> {
    client: &'a CamaraClient,
}

impl CamaraClient {
    pub fn number_verification(&self) -> NumberVerificationService<'_> {
        NumberVerificationService { client: self }
    }
}

impl NumberVerificationService<'_> {
    pub async fn verify(&self, params: &VerifyNumberParams) -> Result<NumberVerification, Error> {
        if params.phone_number.is_some() == params.hashed_phone_number.is_some() {
            return Err(Error::TypeMismatch {
                model: "VerifyNumberParams",
                message: "set exactly one of `phoneNumber` or `hashedPhoneNumber`".into(),
            });
        }
        self.client.execute(params).await
    }

    pub async fn device_phone_number(&self) -> Result<DevicePhoneNumber, Error> {
        self.client.execute(&DevicePhoneNumberParams::new()).await
    }
}
