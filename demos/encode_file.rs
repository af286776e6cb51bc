use huffcode::Archive;
use log::{info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::env;
use std::error::Error;
use std::fs;

fn main() -> Result<(), Box<dyn Error>> {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let fp = env::args()
        .nth(1)
        .ok_or("Please provide path to input file as first argument.")?;
    let input_bytes = fs::read(&fp)?;

    // encode scope - save to file
    {
        let archive = Archive::compress(&input_bytes)?;
        let data = rmp_serde::to_vec(&archive)?;
        info!("archive of {} is {} bytes on disk", fp, data.len());

        fs::write("encoded.mp", data)?;
    }

    // decode scope - read from file
    {
        let file_data = fs::read("encoded.mp")?;

        let archive: Archive = rmp_serde::from_slice(&file_data)?;
        let decoded = archive.decompress()?;

        fs::write("decoded.txt", decoded)?;
    }

    Ok(())
}
