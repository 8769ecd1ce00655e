//! Quality-on-demand session command handlers.

use camara_api::qod::{
    CreateSessionParams, DeleteSessionParams, ExtendSessionParams, RetrieveSessionParams,
    RetrieveSessionsParams,
};
use camara_api::types::ApplicationServer;

use crate::cli::{QodArgs, QodCommand};
use crate::error::CliError;

use super::{Context, util};

pub async fn handle(ctx: &Context, args: QodArgs) -> Result<(), CliError> {
    match args.command {
        QodCommand::Create {
            qos_profile,
            server_ipv4,
            server_ipv6,
            duration,
            sink,
            device,
            file,
        } => {
            let params = if let Some(path) = file {
                let mut params: CreateSessionParams = util::read_model(&path)?;
                ctx.correlate(&mut params.x_correlator);
                params
            } else {
                let server = ApplicationServer {
                    ipv4_address: server_ipv4,
                    ipv6_address: server_ipv6,
                };
                let mut builder = CreateSessionParams::builder().application_server(server);
                if let Some(profile) = qos_profile {
                    builder = builder.qos_profile(profile);
                }
                if let Some(secs) = duration {
                    builder = builder.duration(secs);
                }
                CreateSessionParams {
                    x_correlator: ctx.correlator(),
                    device: util::device(device),
                    sink,
                    ..builder.build()?
                }
            };

            let session = ctx.client.qod().create_session(&params).await?;
            ctx.emit(&session)
        }

        QodCommand::Get { id } => {
            let params = RetrieveSessionParams {
                x_correlator: ctx.correlator(),
                ..RetrieveSessionParams::new(id)
            };
            let session = ctx.client.execute(&params).await?;
            ctx.emit(&session)
        }

        QodCommand::Delete { id } => {
            let params = DeleteSessionParams {
                x_correlator: ctx.correlator(),
                ..DeleteSessionParams::new(id.as_str())
            };
            ctx.client.execute(&params).await?;
            ctx.done(&format!("Session {id} deleted"));
            Ok(())
        }

        QodCommand::Extend { id, seconds } => {
            let params = ExtendSessionParams {
                x_correlator: ctx.correlator(),
                ..ExtendSessionParams::new(id, seconds)
            };
            let session = ctx.client.execute(&params).await?;
            ctx.emit(&session)
        }

        QodCommand::List { device } => {
            let params = RetrieveSessionsParams {
                x_correlator: ctx.correlator(),
                device: util::device(device),
            };
            let sessions = ctx.client.execute(&params).await?;
            ctx.emit(&sessions)
        }
    }
}
