//! Device status and device identifier command handlers.

use camara_api::device_identifier::{
    RetrieveIdentifierParams, RetrievePpidParams, RetrieveTypeParams,
};
use camara_api::device_status::{ReachabilityParams, RoamingParams};

use crate::cli::{
    DeviceIdentifierArgs, DeviceIdentifierCommand, DeviceStatusArgs, DeviceStatusCommand,
};
use crate::error::CliError;

use super::{Context, util};

pub async fn handle_status(ctx: &Context, args: DeviceStatusArgs) -> Result<(), CliError> {
    match args.command {
        DeviceStatusCommand::Reachability { device } => {
            let params = ReachabilityParams {
                x_correlator: ctx.correlator(),
                device: util::device(device),
            };
            let status = ctx.client.execute(&params).await?;
            ctx.emit(&status)
        }

        DeviceStatusCommand::Roaming { device } => {
            let params = RoamingParams {
                x_correlator: ctx.correlator(),
                device: util::device(device),
            };
            let status = ctx.client.execute(&params).await?;
            ctx.emit(&status)
        }
    }
}

pub async fn handle_identifier(ctx: &Context, args: DeviceIdentifierArgs) -> Result<(), CliError> {
    match args.command {
        DeviceIdentifierCommand::Identifier { device } => {
            let params = RetrieveIdentifierParams {
                x_correlator: ctx.correlator(),
                device: util::device(device),
            };
            ctx.emit(&ctx.client.execute(&params).await?)
        }

        DeviceIdentifierCommand::Type { device } => {
            let params = RetrieveTypeParams {
                x_correlator: ctx.correlator(),
                device: util::device(device),
            };
            ctx.emit(&ctx.client.execute(&params).await?)
        }

        DeviceIdentifierCommand::Ppid { device } => {
            let params = RetrievePpidParams {
                x_correlator: ctx.correlator(),
                device: util::device(device),
            };
            ctx.emit(&ctx.client.execute(&params).await?)
        }
    }
}
