use clap::{Parser, Subcommand, ValueEnum};
use configschema::{Result, render, schema, spec};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "configschema")]
#[command(about = "Compile block schemas into decode specifications", long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is unset (e.g. "debug").
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a schema file into a decode spec.
    Compile {
        #[arg(long)]
        schema: String,

        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,

        #[arg(short = 'o', long)]
        out: Option<String>,
    },
    /// Print the type a schema implies for decoded values.
    ImpliedType {
        #[arg(long)]
        schema: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Tree,
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("init logging: {}", e))?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.cmd {
        Commands::Compile {
            schema: schema_path,
            format,
            out,
        } => {
            let block = schema::load_schema_file(&schema_path)?;
            let decode_spec = spec::compile(Some(&block));

            let text = match format {
                Format::Json => serde_json::to_string_pretty(&decode_spec)? + "\n",
                Format::Tree => render::render_tree(&decode_spec),
            };

            match out {
                Some(path) => {
                    std::fs::write(&path, text)?;
                    tracing::info!(path = %path, "wrote decode spec");
                }
                None => print!("{}", text),
            }
        }
        Commands::ImpliedType {
            schema: schema_path,
        } => {
            let block = schema::load_schema_file(&schema_path)?;
            println!("{}", schema::implied_type(Some(&block)));
        }
    }

    Ok(())
}
