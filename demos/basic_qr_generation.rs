use std::error::Error;

use qrforge::{Customization, DataType, QRGenerator};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    // Simplest usage - only data, every style setting keeps its default
    let mut qr = QRGenerator::new();
    qr.data("Hello, World!", DataType::Text)?;
    qr.generate("png", &Customization::new())?;

    let path = qr.save("./simple_qr")?;
    println!("Simple QR code saved to: {}", path.display());
    Ok(())
}
