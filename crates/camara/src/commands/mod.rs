//! Command dispatch: bridges CLI args -> CAMARA services -> output formatting.

pub mod config_cmd;
pub mod device;
pub mod edge;
pub mod insights;
pub mod kyc;
pub mod location;
pub mod number_verification;
pub mod otp;
pub mod qod;
pub mod qos_profiles;
pub mod sim_swap;
pub mod util;

use serde::Serialize;

use camara_api::CamaraClient;

use crate::cli::{Command, OutputFormat};
use crate::error::CliError;
use crate::output;

/// Everything a handler needs besides its own arguments.
pub struct Context {
    pub client: CamaraClient,
    pub output: OutputFormat,
    pub quiet: bool,
    pub correlator: Option<String>,
}

impl Context {
    /// Render a response to stdout in the selected format.
    pub fn emit<T: Serialize + ?Sized>(&self, data: &T) -> Result<(), CliError> {
        output::emit(self.output, data, self.quiet)
    }

    /// Report success of an operation without a response body.
    pub fn done(&self, message: &str) {
        output::status(message, self.quiet);
    }

    /// `x-correlator` for the next request, from `--correlator`.
    pub fn correlator(&self) -> Option<String> {
        self.correlator.clone()
    }

    /// Apply `--correlator` to a bundle loaded from a file, keeping the
    /// file's own value when the flag is absent.
    pub fn correlate(&self, slot: &mut Option<String>) {
        if self.correlator.is_some() {
            slot.clone_from(&self.correlator);
        }
    }
}

/// Dispatch an API command to the appropriate handler.
pub async fn dispatch(cmd: Command, ctx: &Context) -> Result<(), CliError> {
    match cmd {
        Command::SimSwap(args) => sim_swap::handle(ctx, args).await,
        Command::Qod(args) => qod::handle(ctx, args).await,
        Command::QosProfiles(args) => qos_profiles::handle(ctx, args).await,
        Command::Insights(args) => insights::handle(ctx, args).await,
        Command::Subscriptions(args) => insights::handle_subscriptions(ctx, args).await,
        Command::Kyc(args) => kyc::handle(ctx, args).await,
        Command::Otp(args) => otp::handle(ctx, args).await,
        Command::NumberVerification(args) => number_verification::handle(ctx, args).await,
        Command::DeviceStatus(args) => device::handle_status(ctx, args).await,
        Command::DeviceIdentifier(args) => device::handle_identifier(ctx, args).await,
        Command::Location(args) => location::handle(ctx, args).await,
        Command::Edge(args) => edge::handle(ctx, args).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
