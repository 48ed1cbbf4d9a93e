use clap::Parser;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "decode-image")]
#[command(about = "Decode a base64 text file into a binary image file")]
#[command(version)]
struct Cli {
    /// Text file holding the base64 string
    input: PathBuf,

    /// Where to write the decoded image
    output: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    match tryon::codec::decode_file(&cli.input, &cli.output) {
        Ok(_) => println!("Image successfully saved to '{}'", cli.output.display()),
        Err(e) => {
            eprintln!("Error decoding '{}': {}", cli.input.display(), e);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["decode-image", "--version"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_requires_input_and_output() {
        let err = Cli::try_parse_from(["decode-image", "result.txt"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let cli = Cli::try_parse_from(["decode-image", "result.txt", "result.png"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("result.txt"));
        assert_eq!(cli.output, PathBuf::from("result.png"));
    }
}
