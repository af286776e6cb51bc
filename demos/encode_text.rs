use huffcode::{bits, decode, huffman, CodeTable};
use log::{info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Stdout,
        ColorChoice::Auto,
    )?;

    let s = String::from("Hello my name is Sam!");
    let tree = huffman(s.as_bytes())?;
    let codes = CodeTable::from_tree(&tree);

    for sym in codes.symbols() {
        if let Some(code) = codes.get(sym) {
            info!("{:?} -> {}", sym as char, bits::to_ascii(code));
        }
    }

    let out = codes.encode(s.as_bytes());
    info!("{}", bits::to_ascii(&out));

    let dec = String::from_utf8(decode(&tree, &out)?)?;
    println!("{:?}", dec);

    Ok(())
}
