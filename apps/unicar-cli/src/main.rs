use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// `unicar-cli` packs a single file into a minimal CAR v1 archive
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the file to pack
    input: PathBuf,

    /// Path of the CAR file to write
    /// If not provided, the input path with a `.car` suffix appended is used
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Multicodec for the content block
    /// Default: 0x55 (raw)
    #[arg(short, long, default_value_t = 0x55)]
    content_codec: u64,

    /// Multicodec used for the CID of the CAR file itself
    /// Default: 0x70 (dag-pb)
    #[arg(long, default_value_t = 0x70)]
    car_codec: u64,
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging();

    let output = args.output.unwrap_or_else(|| {
        let mut path = args.input.clone().into_os_string();
        path.push(".car");
        PathBuf::from(path)
    });

    info!("Packing {:?} into {:?}", args.input, output);
    match unicar::write_car(&args.input, &output, args.content_codec, args.car_codec) {
        Ok(result) => {
            println!("content CID: {}", result.content_cid);
            println!("car CID: {}", result.car_cid);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Packing failed: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn setup_logging() {
    use tracing_subscriber::FmtSubscriber;

    const DEFAULT_LOGGING: &str = "unicar_cli=info,unicar=info,warn";

    let rust_log = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| if s.is_empty() { None } else { Some(s) })
        .unwrap_or_else(|| DEFAULT_LOGGING.to_owned());

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_env_filter(rust_log).finish(),
    )
    .expect("tracing setup failed");
}
