// Load a json file that specifies which fractal we are going to make
// and set's it's parameters

use std::io::{Error, Read, ErrorKind};
use std::fs::File;
use std::env;

use json::JsonValue;
use log::info;

mod animation;
mod colour;
mod fractal;
mod polynomial;

fn run(input : &JsonValue) -> std::io::Result<()> {
    let algorithm = input["algorithm"].as_str().unwrap_or("fractal");
    match algorithm {
        "fractal" => fractal::generate(input),
        "animation" => animation::generate(input),
        _ => Err(Error::new(ErrorKind::InvalidData, "Unknown algorithm"))
    }
}

fn main() -> std::io::Result<()> {
    env_logger::init();
    // Get file to use else default
    let in_filename = env::args().nth(1).unwrap_or("input.json".to_string());
    info!("Loading input file: {}", in_filename);
    let mut file = File::open(in_filename)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    let input = json::parse(&contents).map_err(
        |_| Error::new(ErrorKind::InvalidData, "Couldn't parse input")
    )?;
    run(&input)
}
