//! Clap derive structures for the `camara` CLI.
//!
//! One subcommand group per CAMARA API, plus `config` and `completions`.
//! Depends only on clap and clap_complete so `build.rs` can include it.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// camara -- call CAMARA network APIs from the command line
#[derive(Debug, Parser)]
#[command(
    name = "camara",
    version,
    about = "Call CAMARA telecom network APIs from the command line",
    long_about = "Client for the CAMARA network APIs: SIM swap, quality on demand,\n\
        QoS profiles, connectivity insights, KYC, one-time passwords, number\n\
        verification, device status, device identifier, location and edge discovery.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Provider profile to use
    #[arg(long, short = 'p', env = "CAMARA_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, short = 'u', env = "CAMARA_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Bearer access token (overrides profile credentials)
    #[arg(long, env = "CAMARA_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format [default: profile defaults, else json]
    #[arg(long, short = 'o', env = "CAMARA_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "CAMARA_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "CAMARA_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Retry transient failures up to N times (overrides profile)
    #[arg(long, global = true)]
    pub retries: Option<u32>,

    /// Correlation id sent as `x-correlator`
    #[arg(long, global = true)]
    pub correlator: Option<String>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// SIM swap checks
    #[command(alias = "sim")]
    SimSwap(SimSwapArgs),

    /// Quality-on-demand sessions
    Qod(QodArgs),

    /// QoS profile catalogue
    #[command(alias = "profiles")]
    QosProfiles(QosProfilesArgs),

    /// Connectivity insights: network quality and application profiles
    Insights(InsightsArgs),

    /// Connectivity insights subscriptions
    #[command(alias = "subs")]
    Subscriptions(SubscriptionsArgs),

    /// Know-your-customer checks
    Kyc(KycArgs),

    /// One-time password over SMS
    Otp(OtpArgs),

    /// Number verification
    #[command(alias = "nv")]
    NumberVerification(NumberVerificationArgs),

    /// Device reachability and roaming status
    DeviceStatus(DeviceStatusArgs),

    /// Device identifier (IMEI, type, PPID)
    DeviceIdentifier(DeviceIdentifierArgs),

    /// Location verification and retrieval
    #[command(alias = "loc")]
    Location(LocationArgs),

    /// Edge cloud zone discovery
    Edge(EdgeArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

/// Device identifiers; all optional, since a three-legged token may
/// already identify the device.
#[derive(Debug, Clone, Default, Args)]
pub struct DeviceArgs {
    /// Phone number in E.164 format
    #[arg(long)]
    pub phone: Option<String>,

    /// Network access identifier (user@domain)
    #[arg(long)]
    pub nai: Option<String>,

    /// Public IPv4 address
    #[arg(long)]
    pub ipv4: Option<String>,

    /// Public port paired with --ipv4
    #[arg(long, requires = "ipv4")]
    pub ipv4_port: Option<u16>,

    /// Private IPv4 address paired with --ipv4
    #[arg(long, requires = "ipv4")]
    pub ipv4_private: Option<String>,

    /// IPv6 address
    #[arg(long)]
    pub ipv6: Option<String>,
}

/// Read a request body from a JSON file.
#[derive(Debug, Args)]
pub struct FileArgs {
    /// JSON file with the request body (`-` for stdin)
    #[arg(long, short = 'f')]
    pub file: PathBuf,
}

// ── SIM swap ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SimSwapArgs {
    #[command(subcommand)]
    pub command: SimSwapCommand,
}

#[derive(Debug, Subcommand)]
pub enum SimSwapCommand {
    /// Check whether the SIM was swapped within a period
    Check {
        /// Phone number in E.164 format
        #[arg(long)]
        phone: Option<String>,

        /// Period to check, in hours
        #[arg(long)]
        max_age: Option<i32>,
    },

    /// Retrieve the date of the latest SIM swap
    RetrieveDate {
        /// Phone number in E.164 format
        #[arg(long)]
        phone: Option<String>,
    },
}

// ── Quality on demand ────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct QodArgs {
    #[command(subcommand)]
    pub command: QodCommand,
}

#[derive(Debug, Subcommand)]
pub enum QodCommand {
    /// Create a QoS session
    Create {
        /// QoS profile name
        #[arg(long, required_unless_present = "file")]
        qos_profile: Option<String>,

        /// Application server IPv4 address or range
        #[arg(long, conflicts_with = "file")]
        server_ipv4: Option<String>,

        /// Application server IPv6 address or range
        #[arg(long, conflicts_with = "file")]
        server_ipv6: Option<String>,

        /// Session duration in seconds
        #[arg(long, required_unless_present = "file")]
        duration: Option<i32>,

        /// Notification callback URL
        #[arg(long, conflicts_with = "file")]
        sink: Option<String>,

        #[command(flatten)]
        device: DeviceArgs,

        /// Full request body as JSON (other flags are ignored)
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,
    },

    /// Get a session by id
    #[command(alias = "show")]
    Get {
        /// Session id
        id: String,
    },

    /// Delete a session
    #[command(alias = "rm")]
    Delete {
        /// Session id
        id: String,
    },

    /// Extend a session
    Extend {
        /// Session id
        id: String,

        /// Additional duration in seconds
        #[arg(long)]
        seconds: i32,
    },

    /// List sessions for a device
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        device: DeviceArgs,
    },
}

// ── QoS profiles ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct QosProfilesArgs {
    #[command(subcommand)]
    pub command: QosProfilesCommand,
}

#[derive(Debug, Subcommand)]
pub enum QosProfilesCommand {
    /// Get a profile by name
    #[command(alias = "show")]
    Get {
        /// Profile name
        name: String,
    },

    /// List profiles, optionally filtered
    #[command(alias = "ls")]
    List {
        /// Only profiles with this name
        #[arg(long)]
        name: Option<String>,

        /// Only profiles in this status (ACTIVE, INACTIVE, DEPRECATED)
        #[arg(long)]
        status: Option<String>,

        #[command(flatten)]
        device: DeviceArgs,
    },
}

// ── Connectivity insights ────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InsightsArgs {
    #[command(subcommand)]
    pub command: InsightsCommand,
}

#[derive(Debug, Subcommand)]
pub enum InsightsCommand {
    /// Check whether the network can meet an application profile
    Check {
        /// Application profile id
        #[arg(long, required_unless_present = "file")]
        application_profile: Option<String>,

        #[command(flatten)]
        device: DeviceArgs,

        /// Application server IPv4 address
        #[arg(long)]
        server_ipv4: Option<String>,

        /// Full request body as JSON (other flags are ignored)
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,
    },

    /// Manage application profiles
    #[command(subcommand)]
    AppProfile(AppProfileCommand),
}

#[derive(Debug, Subcommand)]
pub enum AppProfileCommand {
    /// Create an application profile from network quality thresholds
    Create(FileArgs),

    /// Get an application profile
    #[command(alias = "show")]
    Get {
        /// Application profile id
        id: String,
    },

    /// Delete an application profile
    #[command(alias = "rm")]
    Delete {
        /// Application profile id
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct SubscriptionsArgs {
    #[command(subcommand)]
    pub command: SubscriptionsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SubscriptionsCommand {
    /// Create a subscription
    Create(FileArgs),

    /// List subscriptions
    #[command(alias = "ls")]
    List,

    /// Get a subscription
    #[command(alias = "show")]
    Get {
        /// Subscription id
        id: String,
    },

    /// Delete a subscription
    #[command(alias = "rm")]
    Delete {
        /// Subscription id
        id: String,
    },
}

// ── KYC ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct KycArgs {
    #[command(subcommand)]
    pub command: KycCommand,
}

#[derive(Debug, Subcommand)]
pub enum KycCommand {
    /// Match customer data against the operator's records
    Match(FileArgs),

    /// Verify that the subscriber has reached an age
    VerifyAge {
        /// Age threshold in years
        #[arg(long)]
        age: i32,

        /// Phone number in E.164 format
        #[arg(long)]
        phone: Option<String>,

        /// Include the content-lock status
        #[arg(long)]
        content_lock: bool,

        /// Include the parental-control status
        #[arg(long)]
        parental_control: bool,
    },

    /// Retrieve the subscriber's customer data
    FillIn {
        /// Phone number in E.164 format
        #[arg(long)]
        phone: Option<String>,
    },

    /// Check the subscriber has held the line since a date
    Tenure {
        /// Date in YYYY-MM-DD format
        #[arg(long)]
        since: String,

        /// Phone number in E.164 format
        #[arg(long)]
        phone: Option<String>,
    },
}

// ── OTP ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct OtpArgs {
    #[command(subcommand)]
    pub command: OtpCommand,
}

#[derive(Debug, Subcommand)]
pub enum OtpCommand {
    /// Send a one-time code by SMS
    Send {
        /// Phone number in E.164 format
        #[arg(long)]
        phone: String,

        /// Message template; must contain {{code}}
        #[arg(long, default_value = "{{code}} is your verification code")]
        message: String,
    },

    /// Validate a received code
    Validate {
        /// Authentication id returned by `otp send`
        #[arg(long)]
        id: String,

        /// Code received by the user
        #[arg(long)]
        code: String,
    },
}

// ── Number verification ──────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NumberVerificationArgs {
    #[command(subcommand)]
    pub command: NumberVerificationCommand,
}

#[derive(Debug, Subcommand)]
pub enum NumberVerificationCommand {
    /// Verify the number used by the device
    Verify {
        /// Phone number in E.164 format
        #[arg(long, conflicts_with = "hashed", required_unless_present = "hashed")]
        phone: Option<String>,

        /// SHA-256 hex of the phone number
        #[arg(long)]
        hashed: Option<String>,
    },

    /// Retrieve the phone number of the device
    PhoneNumber,
}

// ── Device status & identifier ───────────────────────────────────────

#[derive(Debug, Args)]
pub struct DeviceStatusArgs {
    #[command(subcommand)]
    pub command: DeviceStatusCommand,
}

#[derive(Debug, Subcommand)]
pub enum DeviceStatusCommand {
    /// Reachability over data and SMS
    Reachability {
        #[command(flatten)]
        device: DeviceArgs,
    },

    /// Roaming status and country
    Roaming {
        #[command(flatten)]
        device: DeviceArgs,
    },
}

#[derive(Debug, Args)]
pub struct DeviceIdentifierArgs {
    #[command(subcommand)]
    pub command: DeviceIdentifierCommand,
}

#[derive(Debug, Subcommand)]
pub enum DeviceIdentifierCommand {
    /// IMEI, IMEISV and device details
    Identifier {
        #[command(flatten)]
        device: DeviceArgs,
    },

    /// Device type (manufacturer and model)
    Type {
        #[command(flatten)]
        device: DeviceArgs,
    },

    /// Pseudonymous device id
    Ppid {
        #[command(flatten)]
        device: DeviceArgs,
    },
}

// ── Location ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LocationArgs {
    #[command(subcommand)]
    pub command: LocationCommand,
}

#[derive(Debug, Subcommand)]
pub enum LocationCommand {
    /// Verify the device is inside a circle
    Verify {
        /// Centre latitude
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Centre longitude
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Radius in metres
        #[arg(long)]
        radius: i32,

        /// Maximum age of the location, in seconds
        #[arg(long)]
        max_age: Option<i32>,

        #[command(flatten)]
        device: DeviceArgs,
    },

    /// Retrieve the device location
    Retrieve {
        /// Maximum age of the location, in seconds
        #[arg(long)]
        max_age: Option<i32>,

        /// Largest acceptable area in square metres
        #[arg(long)]
        max_surface: Option<i32>,

        #[command(flatten)]
        device: DeviceArgs,
    },
}

// ── Edge discovery ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EdgeArgs {
    #[command(subcommand)]
    pub command: EdgeCommand,
}

#[derive(Debug, Subcommand)]
pub enum EdgeCommand {
    /// List edge cloud zones
    #[command(alias = "ls")]
    Zones {
        /// Only the zone closest to the device
        #[arg(long)]
        closest: bool,

        #[command(flatten)]
        device: DeviceArgs,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or update a profile
    Init {
        /// Profile name
        #[arg(long, default_value = "default")]
        name: String,

        /// API base URL
        #[arg(long)]
        url: String,

        /// Authentication mode: bearer, api-key or none
        #[arg(long, default_value = "bearer")]
        auth_mode: String,

        /// Environment variable holding the token
        #[arg(long)]
        token_env: Option<String>,

        /// Header name for api-key authentication
        #[arg(long)]
        api_key_header: Option<String>,

        /// Make this the default profile
        #[arg(long)]
        default: bool,
    },

    /// Display the current configuration (secrets redacted)
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key, e.g. base_url, timeout, max_retries
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a token in the system keyring
    SetToken {
        /// Token value (read from stdin when omitted)
        #[arg(long)]
        value: Option<String>,
    },

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
