//! Connectivity insights, application profile and subscription handlers.

use camara_api::connectivity_insights::{
    CheckNetworkQualityParams, CreateApplicationProfileParams, CreateSubscriptionParams,
    DeleteApplicationProfileParams, DeleteSubscriptionParams, ListSubscriptionsParams,
    NetworkQualityThresholds, RetrieveApplicationProfileParams, RetrieveSubscriptionParams,
};
use camara_api::shape;
use camara_api::types::ApplicationServer;

use crate::cli::{
    AppProfileCommand, InsightsArgs, InsightsCommand, SubscriptionsArgs, SubscriptionsCommand,
};
use crate::error::CliError;

use super::{Context, util};

pub async fn handle(ctx: &Context, args: InsightsArgs) -> Result<(), CliError> {
    match args.command {
        InsightsCommand::Check {
            application_profile,
            device,
            server_ipv4,
            file,
        } => {
            let params = match (file, application_profile) {
                (Some(path), _) => {
                    let mut params: CheckNetworkQualityParams = util::read_model(&path)?;
                    ctx.correlate(&mut params.x_correlator);
                    params
                }
                (None, Some(profile_id)) => CheckNetworkQualityParams {
                    x_correlator: ctx.correlator(),
                    device: util::device(device),
                    application_server: server_ipv4
                        .map(|ip| ApplicationServer::new().with_ipv4_address(ip)),
                    ..CheckNetworkQualityParams::new(profile_id)
                },
                (None, None) => {
                    return Err(CliError::Validation {
                        field: "application-profile".into(),
                        reason: "required unless --file is given".into(),
                    });
                }
            };

            let check = ctx
                .client
                .connectivity_insights()
                .check_network_quality(&params)
                .await?;
            if !check.meets_requirements() {
                tracing::info!("network cannot meet every threshold of the profile");
            }
            ctx.emit(&check)
        }

        InsightsCommand::AppProfile(command) => handle_app_profile(ctx, command).await,
    }
}

async fn handle_app_profile(ctx: &Context, command: AppProfileCommand) -> Result<(), CliError> {
    match command {
        AppProfileCommand::Create(file) => {
            // Accept either the full request or bare thresholds.
            let value = util::read_json_file(&file.file)?;
            let mut params: CreateApplicationProfileParams =
                if value.get("networkQualityThresholds").is_some() {
                    shape::coerce(value)?
                } else {
                    let thresholds: NetworkQualityThresholds = shape::coerce(value)?;
                    CreateApplicationProfileParams::new(thresholds)
                };
            ctx.correlate(&mut params.x_correlator);

            let profile = ctx.client.execute(&params).await?;
            ctx.emit(&profile)
        }

        AppProfileCommand::Get { id } => {
            let params = RetrieveApplicationProfileParams {
                x_correlator: ctx.correlator(),
                ..RetrieveApplicationProfileParams::new(id)
            };
            let profile = ctx.client.execute(&params).await?;
            ctx.emit(&profile)
        }

        AppProfileCommand::Delete { id } => {
            let params = DeleteApplicationProfileParams {
                x_correlator: ctx.correlator(),
                ..DeleteApplicationProfileParams::new(id.as_str())
            };
            ctx.client.execute(&params).await?;
            ctx.done(&format!("Application profile {id} deleted"));
            Ok(())
        }
    }
}

pub async fn handle_subscriptions(ctx: &Context, args: SubscriptionsArgs) -> Result<(), CliError> {
    match args.command {
        SubscriptionsCommand::Create(file) => {
            let mut params: CreateSubscriptionParams = util::read_model(&file.file)?;
            ctx.correlate(&mut params.x_correlator);

            let subscription = ctx
                .client
                .connectivity_insights()
                .create_subscription(&params)
                .await?;
            ctx.emit(&subscription)
        }

        SubscriptionsCommand::List => {
            let params = ListSubscriptionsParams {
                x_correlator: ctx.correlator(),
            };
            let subscriptions = ctx.client.execute(&params).await?;
            ctx.emit(&subscriptions)
        }

        SubscriptionsCommand::Get { id } => {
            let params = RetrieveSubscriptionParams {
                x_correlator: ctx.correlator(),
                ..RetrieveSubscriptionParams::new(id)
            };
            let subscription = ctx.client.execute(&params).await?;
            ctx.emit(&subscription)
        }

        SubscriptionsCommand::Delete { id } => {
            let params = DeleteSubscriptionParams {
                x_correlator: ctx.correlator(),
                ..DeleteSubscriptionParams::new(id.as_str())
            };
            ctx.client.execute(&params).await?;
            ctx.done(&format!("Subscription {id} deleted"));
            Ok(())
        }
    }
}
