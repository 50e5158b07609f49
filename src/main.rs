use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use inspire_hand::{
    lookup, CellWidth, Controller, Register, SerialConfig, SerialTransport, DEFAULT_BAUD_RATE,
    DEFAULT_DEVICE_ID, DEFAULT_PORT, DEFAULT_TIMEOUT_MS, WORDS_RESPONSE_LEN,
};
use std::thread;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hand_controller")]
#[command(about = "Read and write registers of a dexterous hand over RS-485")]
#[command(version)]
struct Cli {
    /// Serial port the RS-485 adapter is attached to
    #[arg(long, env = "HAND_PORT", default_value = DEFAULT_PORT)]
    port: String,

    /// Baud rate
    #[arg(long, default_value_t = DEFAULT_BAUD_RATE)]
    baud: u32,

    /// Read timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Device id of the hand on the bus
    #[arg(long, default_value_t = DEFAULT_DEVICE_ID)]
    id: u8,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the demonstration sequence (default)
    Demo,

    /// Write up to six values to a register; -1 leaves an actuator unchanged
    Write {
        register: String,
        #[arg(allow_negative_numbers = true, required = true)]
        values: Vec<i32>,
    },

    /// Read the six cells of a register
    Read {
        register: String,
        /// Number of reply bytes to wait for; word-wide registers only,
        /// defaults to 20
        #[arg(long)]
        len: Option<usize>,
    },
}

fn check_byte_read(register: &str, len: Option<usize>) -> Result<()> {
    if let Some(len) = len {
        bail!("--len {} does not apply to byte-wide register {}", len, register);
    }
    Ok(())
}

fn demo(controller: &mut Controller<SerialTransport>, id: u8) -> Result<()> {
    let writes: [(Register, [i32; 6]); 4] = [
        (Register::SpeedSet, [1000; 6]),
        (Register::AngleSet, [0, 1000, 1000, 1000, 1000, 0]),
        (Register::ForceSet, [1000; 6]),
        (Register::AngleSet, [1000; 6]),
    ];
    for (register, values) in writes {
        controller.write(id, register, &values)?;
        thread::sleep(Duration::from_secs(1));
    }

    for register in [Register::AngleSet, Register::AngleActual, Register::ForceActual] {
        let values = controller.read(id, register, WORDS_RESPONSE_LEN)?;
        println!("{}: {:?}", register, values);
        thread::sleep(Duration::from_secs(1));
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("inspire_hand={0},hand_controller={0}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = SerialConfig::new(&cli.port, cli.baud)
        .with_timeout(Duration::from_millis(cli.timeout_ms));
    let mut controller = Controller::open(&config)
        .with_context(|| format!("Failed to open {}", config.port))?;

    match cli.command.unwrap_or(Commands::Demo) {
        Commands::Demo => demo(&mut controller, cli.id)?,
        Commands::Write { register, values } => {
            controller.write_register(cli.id, &register, &values)?;
        }
        Commands::Read { register, len } => match lookup(&register)?.width() {
            CellWidth::Word => {
                let len = len.unwrap_or(WORDS_RESPONSE_LEN);
                let values = controller.read_register(cli.id, &register, len)?;
                println!("{}: {:?}", register, values);
            }
            CellWidth::Byte => {
                check_byte_read(&register, len)?;
                let cells = controller.read_bytes(cli.id, &register)?;
                println!("{}: {:?}", register, cells);
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_match_serial_config() {
        let cli = Cli::try_parse_from(["hand_controller"]).expect("no arguments parse");
        let config = SerialConfig::default();
        if std::env::var_os("HAND_PORT").is_none() {
            assert_eq!(cli.port, config.port);
        }
        assert_eq!(cli.baud, config.baud_rate);
        assert_eq!(Duration::from_millis(cli.timeout_ms), config.timeout);
        assert_eq!(cli.id, DEFAULT_DEVICE_ID);
        assert!(cli.command.is_none());
    }

    #[test]
    fn len_is_rejected_for_byte_registers() {
        let cli = Cli::try_parse_from(["hand_controller", "read", "temp", "--len", "20"])
            .expect("read arguments parse");
        let Some(Commands::Read { register, len }) = cli.command else {
            panic!("expected read command");
        };
        assert_eq!(len, Some(20));
        assert!(check_byte_read(&register, len).is_err());
        assert!(check_byte_read(&register, None).is_ok());
    }
}
