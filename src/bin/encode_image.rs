use clap::Parser;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "encode-image")]
#[command(about = "Print a file's contents as base64")]
#[command(version)]
struct Cli {
    /// Image file to encode
    image: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    match tryon::codec::encode_file(&cli.image) {
        Ok(encoded) => println!("{}", encoded),
        Err(e) => {
            eprintln!("Error encoding '{}': {}", cli.image.display(), e);
            process::exit(1);
        }
    }
}
