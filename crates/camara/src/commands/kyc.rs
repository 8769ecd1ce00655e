//! KYC command handlers.

use camara_api::kyc::{CheckTenureParams, KycFillInParams, KycMatchParams, VerifyAgeParams};

use crate::cli::{KycArgs, KycCommand};
use crate::error::CliError;

use super::{Context, util};

pub async fn handle(ctx: &Context, args: KycArgs) -> Result<(), CliError> {
    let kyc = ctx.client.kyc();

    match args.command {
        KycCommand::Match(file) => {
            let mut params: KycMatchParams = util::read_model(&file.file)?;
            ctx.correlate(&mut params.x_correlator);
            ctx.emit(&kyc.match_identity(&params).await?)
        }

        KycCommand::VerifyAge {
            age,
            phone,
            content_lock,
            parental_control,
        } => {
            let params = VerifyAgeParams {
                x_correlator: ctx.correlator(),
                phone_number: phone,
                include_content_lock: content_lock.then_some(true),
                include_parental_control: parental_control.then_some(true),
                ..VerifyAgeParams::new(age)
            };
            ctx.emit(&kyc.verify_age(&params).await?)
        }

        KycCommand::FillIn { phone } => {
            let params = KycFillInParams {
                x_correlator: ctx.correlator(),
                phone_number: phone,
            };
            ctx.emit(&ctx.client.execute(&params).await?)
        }

        KycCommand::Tenure { since, phone } => {
            let params = CheckTenureParams {
                x_correlator: ctx.correlator(),
                phone_number: phone,
                ..CheckTenureParams::builder()
                    .tenure_date(since.as_str())
                    .build()?
            };
            ctx.emit(&ctx.client.execute(&params).await?)
        }
    }
}
