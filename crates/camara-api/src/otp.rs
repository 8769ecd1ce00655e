//! One-Time Password SMS API (`one-time-password-sms/v1`).
//!
//! Two steps: `send_code` texts a code to the phone and returns an
//! `authentication_id`; `validate_code` checks what the user typed against it.

use reqwest::Method;

use crate::request::Operation;
use crate::{CamaraClient, Error};

/// Placeholder the provider replaces with the generated code.
pub const CODE_PLACEHOLDER: &str = "{{code}}";

model! {
    pub struct SendCode / SendCodeBuilder {
        required {
            authentication_id / with_authentication_id: String = "authenticationId",
        }
        optional {}
    }
}

model! {
    pub struct SendCodeParams / SendCodeParamsBuilder {
        required {
            phone_number / with_phone_number: String = "phoneNumber",
            /// SMS text; must contain `{{code}}`.
            message / with_message: String = "message",
        }
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
        }
    }
}

impl Operation for SendCodeParams {
    type Response = SendCode;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "one-time-password-sms/v1/send-code";
}

model! {
    pub struct ValidateCodeParams / ValidateCodeParamsBuilder {
        required {
            authentication_id / with_authentication_id: String = "authenticationId",
            code / with_code: String = "code",
        }
        optional {
            x_correlator / with_x_correlator: String = "x-correlator",
        }
    }
}

impl Operation for ValidateCodeParams {
    type Response = ();
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "one-time-password-sms/v1/validate-code";
}

// ── Service ─────────────────────────────────────────────────────────

pub struct OtpService<'a> {
    client: &'a CamaraClient,
}

impl CamaraClient {
    pub fn otp(&self) -> OtpService<'_> {
        OtpService { client: self }
    }
}

impl OtpService<'_> {
    pub async fn send_code(
        &self,
        phone_number: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<SendCode, Error> {
        self.send_code_with(&SendCodeParams::new(phone_number, message)).await
    }

    /// Send with a pre-built parameter bundle, e.g. to set `x-correlator`.
    pub async fn send_code_with(&self, params: &SendCodeParams) -> Result<SendCode, Error> {
        if !params.message.contains(CODE_PLACEHOLDER) {
            return Err(Error::TypeMismatch {
                model: "SendCodeParams",
                message: format!("`message` must contain the {CODE_PLACEHOLDER} placeholder"),
            });
        }
        self.client.execute(params).await
    }

    /// Succeeds with `()` when the code is valid. A wrong or expired code
    /// comes back as [`Error::Api`] with a `ONE_TIME_PASSWORD_SMS.*` code.
    pub async fn validate_code(
        &self,
        authentication_id: impl Into<String>,
        code: impl Into<String>,
    ) -> Result<(), Error> {
        self.client
            .execute(&ValidateCodeParams::new(authentication_id, code))
            .await
    }
}
