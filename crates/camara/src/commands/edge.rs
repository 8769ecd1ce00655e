//! Edge discovery command handlers.

use camara_api::edge_discovery::EdgeCloudZonesParams;
use camara_api::types::Device;

use crate::cli::{EdgeArgs, EdgeCommand};
use crate::error::CliError;

use super::{Context, util};

pub async fn handle(ctx: &Context, args: EdgeArgs) -> Result<(), CliError> {
    match args.command {
        EdgeCommand::Zones { closest, device } => {
            let device = util::device(device).unwrap_or_else(Device::new);
            let mut params = EdgeCloudZonesParams::closest_to(&device);
            if !closest {
                params.filter = None;
            }
            params.x_correlator = ctx.correlator();

            let zones = ctx.client.edge_discovery().edge_cloud_zones(&params).await?;
            ctx.emit(&zones)
        }
    }
}
