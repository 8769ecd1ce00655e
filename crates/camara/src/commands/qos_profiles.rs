//! QoS profile command handlers.

use camara_api::qos_profiles::{ListQosProfilesParams, RetrieveQosProfileParams};

use crate::cli::{QosProfilesArgs, QosProfilesCommand};
use crate::error::CliError;

use super::{Context, util};

pub async fn handle(ctx: &Context, args: QosProfilesArgs) -> Result<(), CliError> {
    match args.command {
        QosProfilesCommand::Get { name } => {
            let params = RetrieveQosProfileParams {
                x_correlator: ctx.correlator(),
                ..RetrieveQosProfileParams::new(name)
            };
            let profile = ctx.client.execute(&params).await?;
            ctx.emit(&profile)
        }

        QosProfilesCommand::List {
            name,
            status,
            device,
        } => {
            let mut builder = ListQosProfilesParams::builder();
            if let Some(status) = status {
                builder = builder.status(status.to_uppercase());
            }
            let params = ListQosProfilesParams {
                x_correlator: ctx.correlator(),
                device: util::device(device),
                name,
                ..builder.build()?
            };

            let profiles = ctx.client.qos_profiles().list(&params).await?;
            tracing::debug!(count = profiles.len(), "retrieved QoS profiles");
            ctx.emit(&profiles)
        }
    }
}
