use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use certificado_core::{constants::DEFAULT_TEMPLATE_PATH, CertificateService, CompositorConfig};
use certificado_progress::{ProgressDriver, TICK_INTERVAL, TOTAL_DURATION};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "certificado")]
#[command(about = "Certificate generation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a certificate PNG to disk
    Render {
        /// Holder name
        #[arg(long)]
        nome: String,
        /// Tax id (CPF)
        #[arg(long)]
        cpf: String,
        /// Template image
        #[arg(long, default_value = DEFAULT_TEMPLATE_PATH)]
        template: PathBuf,
        /// Directory of extra fonts
        #[arg(long)]
        font_dir: Option<PathBuf>,
        /// Output file (defaults to the download file name)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Run the progress indicator in the terminal
    Progress {
        /// Total duration in milliseconds
        #[arg(long, default_value_t = TOTAL_DURATION.as_millis() as u64)]
        duration_ms: u64,
        /// Tick interval in milliseconds
        #[arg(long, default_value_t = TICK_INTERVAL.as_millis() as u64)]
        interval_ms: u64,
        /// Print the indicator SVG with every update
        #[arg(long)]
        svg: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            nome,
            cpf,
            template,
            font_dir,
            out,
        }) => {
            let cfg = Arc::new(CompositorConfig::new(template, font_dir)?);
            let service = CertificateService::new(cfg);
            let certificate = service.generate_blocking(Some(&nome), Some(&cpf))?;

            let out = out.unwrap_or_else(|| PathBuf::from(&certificate.filename));
            std::fs::write(&out, &certificate.png)?;
            println!(
                "Wrote {}x{} certificate to {}",
                certificate.width,
                certificate.height,
                out.display()
            );
        }
        Some(Commands::Progress {
            duration_ms,
            interval_ms,
            svg,
        }) => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            runtime.block_on(run_progress(
                Duration::from_millis(duration_ms),
                Duration::from_millis(interval_ms.max(1)),
                svg,
            ));
        }
        None => {
            println!("Use 'certificado --help' for commands");
        }
    }

    Ok(())
}

async fn run_progress(total: Duration, interval: Duration, svg: bool) {
    let driver = ProgressDriver::activate(total, interval);
    let mut views = driver.subscribe();

    let mut last_percent = None;
    loop {
        let view = *views.borrow_and_update();
        if view.is_complete() {
            println!("{}", view.headline());
            println!("{}", view.caption());
            if svg {
                print!("{}", view.render_svg());
            }
            break;
        }

        if view.percent() != last_percent {
            last_percent = view.percent();
            println!("{} {}%", view.headline(), view.percent().unwrap_or_default());
            if svg {
                print!("{}", view.render_svg());
            }
        }

        if views.changed().await.is_err() {
            break;
        }
    }

    driver.deactivate();
}
