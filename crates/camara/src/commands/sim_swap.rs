//! SIM swap command handlers.

use camara_api::sim_swap::{CheckSimSwapParams, RetrieveSimSwapDateParams};

use crate::cli::{SimSwapArgs, SimSwapCommand};
use crate::error::CliError;

use super::Context;

pub async fn handle(ctx: &Context, args: SimSwapArgs) -> Result<(), CliError> {
    match args.command {
        SimSwapCommand::Check { phone, max_age } => {
            let params = CheckSimSwapParams {
                x_correlator: ctx.correlator(),
                phone_number: phone,
                max_age,
            };
            let check = ctx.client.sim_swap().check_with(&params).await?;
            ctx.emit(&check)
        }

        SimSwapCommand::RetrieveDate { phone } => {
            let params = RetrieveSimSwapDateParams {
                x_correlator: ctx.correlator(),
                phone_number: phone,
            };
            let info = ctx.client.execute(&params).await?;
            ctx.emit(&info)
        }
    }
}
