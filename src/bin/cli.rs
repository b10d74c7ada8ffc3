//! binprot CLI Client
//!
//! Issues one binary protocol verb against a memcached-compatible server.

use clap::{Parser, Subcommand};
use binprot::network::{connect, TcpReadWriter};
use binprot::{Client, ClientConfig, ExpirationPolicy};
use tracing_subscriber::{fmt, EnvFilter};

/// binprot CLI
#[derive(Parser, Debug)]
#[command(name = "binprot-cli")]
#[command(about = "CLI for memcached binary protocol servers")]
#[command(version)]
struct Args {
    /// Server address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:11211")]
    server: String,

    /// Read timeout in milliseconds (0 = none)
    #[arg(long, default_value = "5000")]
    read_timeout_ms: u64,

    /// Write timeout in milliseconds (0 = none)
    #[arg(long, default_value = "5000")]
    write_timeout_ms: u64,

    /// Fixed expiration in seconds (default: random from 1s to 1h)
    #[arg(short, long)]
    ttl: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Get a value, checking the echoed opaque
    GetOpaque {
        /// The key to get
        key: String,

        /// Correlation token to send
        opaque: u32,
    },

    /// Get several values in one pipelined batch
    BatchGet {
        /// The keys to get
        keys: Vec<String>,
    },

    /// Get a value and reset its expiration
    Gat {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Add a key-value pair if the key is absent
    Add {
        /// The key to add
        key: String,

        /// The value to add
        value: String,
    },

    /// Replace the value of an existing key
    Replace {
        /// The key to replace
        key: String,

        /// The new value
        value: String,
    },

    /// Delete a key
    Del {
        /// The key to delete
        key: String,
    },

    /// Reset the expiration of a key
    Touch {
        /// The key to touch
        key: String,
    },

    /// Send an empty batch (bare no-op)
    Ping,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,binprot=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut builder = ClientConfig::builder()
        .server_addr(&args.server)
        .read_timeout_ms(args.read_timeout_ms)
        .write_timeout_ms(args.write_timeout_ms);
    if let Some(ttl) = args.ttl {
        builder = builder.expiration(ExpirationPolicy::Fixed(ttl));
    }
    let config = builder.build();

    let client = match Client::from_config(&config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    let mut rw = match connect(&config) {
        Ok(rw) => rw,
        Err(e) => {
            tracing::error!("Failed to connect to {}: {}", config.server_addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&client, &mut rw, args.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(client: &Client, rw: &mut TcpReadWriter, command: Commands) -> binprot::Result<()> {
    match command {
        Commands::Get { key } => print_value(&client.get(rw, key.as_bytes())?),
        Commands::GetOpaque { key, opaque } => {
            print_value(&client.get_with_opaque(rw, key.as_bytes(), opaque)?)
        }
        Commands::BatchGet { keys } => {
            let batch = client.batch_get(rw, keys.as_slice())?;
            for value in &batch.values {
                print_value(value);
            }
            if let Some(e) = batch.error {
                return Err(e.into());
            }
        }
        Commands::Gat { key } => print_value(&client.gat(rw, key.as_bytes())?),
        Commands::Set { key, value } => {
            client.set(rw, key.as_bytes(), value.as_bytes())?;
            println!("STORED");
        }
        Commands::Add { key, value } => {
            client.add(rw, key.as_bytes(), value.as_bytes())?;
            println!("STORED");
        }
        Commands::Replace { key, value } => {
            client.replace(rw, key.as_bytes(), value.as_bytes())?;
            println!("STORED");
        }
        Commands::Del { key } => {
            client.delete(rw, key.as_bytes())?;
            println!("DELETED");
        }
        Commands::Touch { key } => {
            client.touch(rw, key.as_bytes())?;
            println!("TOUCHED");
        }
        Commands::Ping => {
            client.batch_get::<_, _, &[u8]>(rw, &[])?;
            println!("PONG");
        }
    }
    Ok(())
}

fn print_value(value: &[u8]) {
    println!("{}", String::from_utf8_lossy(value));
}
