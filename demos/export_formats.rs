use std::error::Error;

use qrforge::{Customization, DataType, Format, QRError, QRGenerator};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let mut qr = QRGenerator::new();
    qr.data("WIFI:T:WPA2;S:HomeNetwork;P:correct-horse;", DataType::Wifi)?
        .label("Guest Wi-Fi", "center", "#000000", 18, &[0, 10, 10, 10])?;

    for format in Format::ALL {
        match qr.generate(format.name(), &Customization::new()).map(|code| code.mime_type()) {
            Ok(mime) => {
                let path = qr.save(format!("./wifi_qr_{}", format.name()))?;
                println!("{:<7} -> {} ({mime})", format.name(), path.display());
            }
            // PDF output is behind the `pdf` feature
            Err(err @ QRError::MissingDependency(_)) => println!("{:<7} -> skipped: {err}", format.name()),
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}
