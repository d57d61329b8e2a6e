use std::{net::SocketAddr, path::PathBuf};

#[derive(Debug, clap::Parser)]
pub struct Args {
    /// The address to bind the API to.
    #[clap(long, env, default_value = "0.0.0.0:5000")]
    pub addr: SocketAddr,

    /// The log filter.
    #[clap(
        long,
        env,
        default_value = "warn,grubdash=debug,observe=info,tower_http=info"
    )]
    pub log: String,

    /// At which log level logs should be printed to stderr instead of stdout.
    #[clap(long, env)]
    pub stderr_threshold: Option<tracing::Level>,

    /// Whether to use JSON format for the logs.
    #[clap(long, env, default_value = "false")]
    pub use_json_logs: bool,

    /// Path to a TOML file with dishes and orders to start with. Without it
    /// both collections start out empty.
    #[clap(long, env)]
    pub seed: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use {super::*, clap::Parser};

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["grubdash"]).unwrap();
        assert_eq!(args.addr, "0.0.0.0:5000".parse::<SocketAddr>().unwrap());
        assert_eq!(args.stderr_threshold, None);
        assert!(!args.use_json_logs);
        assert_eq!(args.seed, None);
    }

    #[test]
    fn flags() {
        let args = Args::try_parse_from([
            "grubdash",
            "--addr",
            "127.0.0.1:0",
            "--stderr-threshold",
            "warn",
            "--seed",
            "seed.toml",
        ])
        .unwrap();
        assert_eq!(args.addr.port(), 0);
        assert_eq!(args.stderr_threshold, Some(tracing::Level::WARN));
        assert_eq!(args.seed, Some(PathBuf::from("seed.toml")));
    }
}
