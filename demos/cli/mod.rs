use std::env;
use std::process;

use ofs_client::ClientConfig;
use tracing_subscriber::EnvFilter;

pub fn usage_and_exit(usage: &str) -> ! {
    eprintln!("{usage}");
    process::exit(1);
}

/// Log to stderr, `RUST_LOG` overriding the `ofs_client=info` default.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ofs_client=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub struct ArgParser {
    args: Vec<String>,
    usage: &'static str,
}

impl ArgParser {
    pub fn new(usage: &'static str) -> Self {
        let args: Vec<String> = env::args().skip(1).collect();

        if args.iter().any(|a| a == "--help" || a == "-h") {
            println!("{usage}");
            process::exit(0);
        }

        Self { args, usage }
    }

    pub fn take_value(&mut self, names: &[&str]) -> Option<String> {
        let idx = self.args.iter().position(|a| names.contains(&a.as_str()))?;
        let Some(value) = self.args.get(idx + 1).cloned() else {
            usage_and_exit(self.usage);
        };
        self.args.drain(idx..=idx + 1);
        Some(value)
    }

    pub fn remaining(self) -> Vec<String> {
        self.args
    }
}

/// Connection flags shared by every demo: `--api-base`, `--proxy`,
/// `--session-file`, layered over `OFS_*` environment variables.
pub fn config_from_parser(parser: &mut ArgParser) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(base) = parser.take_value(&["--api-base", "-a"]) {
        config = config.with_api_base(base);
    }
    if let Some(proxy) = parser.take_value(&["--proxy"]) {
        config = config.with_proxy(proxy);
    }
    if let Some(file) = parser.take_value(&["--session-file"]) {
        config = config.with_session_file(file);
    }
    config
}

#[allow(dead_code)] // The shell asks for credentials interactively.
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub config: ClientConfig,
    pub positionals: Vec<String>,
}

#[allow(dead_code)]
pub fn parse_credentials(usage: &'static str) -> Credentials {
    let mut parser = ArgParser::new(usage);
    let username = parser
        .take_value(&["--username", "-u"])
        .unwrap_or_else(|| usage_and_exit(usage));
    let password = parser
        .take_value(&["--password", "-p"])
        .unwrap_or_else(|| usage_and_exit(usage));
    let config = config_from_parser(&mut parser);

    Credentials {
        username,
        password,
        config,
        positionals: parser.remaining(),
    }
}
