//! Location verification and retrieval command handlers.

use camara_api::location::{RetrieveLocationParams, VerifyLocationParams};
use camara_api::types::{Area, Point};

use crate::cli::{LocationArgs, LocationCommand};
use crate::error::CliError;

use super::{Context, util};

pub async fn handle(ctx: &Context, args: LocationArgs) -> Result<(), CliError> {
    match args.command {
        LocationCommand::Verify {
            lat,
            lon,
            radius,
            max_age,
            device,
        } => {
            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
                return Err(CliError::Validation {
                    field: "lat/lon".into(),
                    reason: format!("({lat}, {lon}) is not a valid coordinate"),
                });
            }

            let params = VerifyLocationParams {
                x_correlator: ctx.correlator(),
                device: util::device(device),
                max_age,
                ..VerifyLocationParams::new(Area::circle(Point::new(lat, lon), radius))
            };
            let verification = ctx.client.location().verify(&params).await?;
            ctx.emit(&verification)
        }

        LocationCommand::Retrieve {
            max_age,
            max_surface,
            device,
        } => {
            let params = RetrieveLocationParams {
                x_correlator: ctx.correlator(),
                device: util::device(device),
                max_age,
                max_surface,
            };
            let location = ctx.client.location().retrieve(&params).await?;
            ctx.emit(&location)
        }
    }
}
