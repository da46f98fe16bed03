//! Command Line Interface (CLI) arguments.

use clap::Parser;

/// Soundscape command line interface
#[derive(Clone, Debug, Parser)]
pub struct CommandLineArgs {
    /// The IP address on which the server should listen
    #[arg(long, default_value = "0.0.0.0", env = "SOUNDSCAPE_HOST")]
    pub host: String,
    /// The port to which the server should bind
    #[arg(long, default_value_t = 8080, env = "SOUNDSCAPE_PORT")]
    pub port: u16,
    /// Flag indicating whether HTTPS should be used
    #[arg(long, default_value_t = false, env = "SOUNDSCAPE_HTTPS")]
    pub https: bool,
    /// Path to the certificate file to be used for HTTPS encryption
    #[arg(
        long,
        default_value = "~/.config/soundscape/certs/cert.pem",
        env = "SOUNDSCAPE_CERT_FILE"
    )]
    pub cert_file: String,
    /// Path to the key file to be used for HTTPS encryption
    #[arg(
        long,
        default_value = "~/.config/soundscape/certs/key.pem",
        env = "SOUNDSCAPE_KEY_FILE"
    )]
    pub key_file: String,
    /// Maximum time in seconds to wait for operations to complete upon receiving `ctrl+c` signal.
    #[arg(long, default_value_t = 60, env = "SOUNDSCAPE_SHUTDOWN_TIMEOUT")]
    pub graceful_shutdown_timeout: u64,
    /// Path to the delimited dataset file served by the API
    #[arg(long, default_value = "data/songs.csv", env = "SOUNDSCAPE_DATASET")]
    pub dataset: String,
    /// Iteration cap for the MDS stress optimizer
    #[arg(long, default_value_t = 300, env = "SOUNDSCAPE_MDS_MAX_ITER")]
    pub mds_max_iter: usize,
    /// Relative stress decrease below which the MDS optimizer stops
    #[arg(long, default_value_t = 1e-6, env = "SOUNDSCAPE_MDS_EPS")]
    pub mds_eps: f64,
    /// Whether MDS non-convergence aborts startup instead of serving the best-effort embedding
    #[arg(long, default_value_t = false, env = "SOUNDSCAPE_MDS_STRICT")]
    pub mds_strict: bool,
}

/// Returns parsed command line arguments.
pub fn parse() -> CommandLineArgs {
    CommandLineArgs::parse()
}
