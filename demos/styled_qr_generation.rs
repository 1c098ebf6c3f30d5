use std::error::Error;

use qrforge::{Customization, DataType, ECLevel, QRGenerator};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let mut qr = QRGenerator::new();
    qr.data("https://www.rust-lang.org", DataType::Url)?
        .size(400)?
        .margin(20)?
        .color("#B7410E")?
        .background_color("#FFF8F0")?
        .label("rust-lang.org", "center", "#B7410E", 24, &[5, 10, 15, 10])?
        .error_correction(ECLevel::H);

    // Optional logo path as the first argument
    if let Some(logo) = std::env::args().nth(1) {
        qr.logo(logo, 80)?.logo_punchout(true);
    }

    // Rounded ring around a drawn star
    let custom = Customization::new().marker("M2").shape("S3");
    qr.generate("png", &custom)?;

    let path = qr.save("./styled_qr")?;
    println!("Styled QR code saved to: {}", path.display());
    Ok(())
}
