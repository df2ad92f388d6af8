use std::error::Error;
use std::time::Instant;

use qrlite::QRBuilder;

fn main() -> Result<(), Box<dyn Error>> {
    let data = "HELLO WORLD";

    let start = Instant::now();
    let qr = QRBuilder::new(data).build()?;
    let elapsed = start.elapsed();

    println!("{}", qr.to_str(1));
    println!("Generated in {elapsed:?}");

    qr.to_image(10).save("hello_world.png")?;
    println!("Saved hello_world.png");

    Ok(())
}
