//! Number verification command handlers.

use camara_api::number_verification::{DevicePhoneNumberParams, VerifyNumberParams};

use crate::cli::{NumberVerificationArgs, NumberVerificationCommand};
use crate::error::CliError;

use super::Context;

pub async fn handle(ctx: &Context, args: NumberVerificationArgs) -> Result<(), CliError> {
    match args.command {
        NumberVerificationCommand::Verify { phone, hashed } => {
            let params = VerifyNumberParams {
                x_correlator: ctx.correlator(),
                phone_number: phone,
                hashed_phone_number: hashed.map(|h| h.to_lowercase()),
            };
            let verification = ctx.client.number_verification().verify(&params).await?;
            ctx.emit(&verification)
        }

        NumberVerificationCommand::PhoneNumber => {
            let params = DevicePhoneNumberParams {
                x_correlator: ctx.correlator(),
            };
            ctx.emit(&ctx.client.execute(&params).await?)
        }
    }
}
