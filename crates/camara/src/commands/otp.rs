//! One-time password command handlers.

use camara_api::otp::{SendCodeParams, ValidateCodeParams};

use crate::cli::{OtpArgs, OtpCommand};
use crate::error::CliError;

use super::Context;

pub async fn handle(ctx: &Context, args: OtpArgs) -> Result<(), CliError> {
    match args.command {
        OtpCommand::Send { phone, message } => {
            let params = SendCodeParams {
                x_correlator: ctx.correlator(),
                ..SendCodeParams::new(phone, message)
            };
            let sent = ctx.client.otp().send_code_with(&params).await?;
            ctx.emit(&sent)
        }

        OtpCommand::Validate { id, code } => {
            let params = ValidateCodeParams {
                x_correlator: ctx.correlator(),
                ..ValidateCodeParams::new(id, code)
            };
            ctx.client.execute(&params).await?;
            ctx.done("Code is valid");
            Ok(())
        }
    }
}
