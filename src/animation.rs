// Animate a newton fractal by interpolating the rendered viewport
// between two rectangles of the complex plane
//
// Each frame is rasterized into a temporary directory, the frames are
// merged into a looping gif with imagemagick and the directory is
// removed again whether the merge worked or not.

use json::JsonValue;
use num::complex::Complex;
use log::info;

use std::fs::{create_dir_all, remove_dir_all};
use std::io::{Error, ErrorKind};
use std::process::Command;

use crate::fractal::{draw_fractal, OUTPUT_DIR};
use crate::polynomial::{complex_from_json, Polynomial, Representation};

const TEMP_DIR : &str = "temp";
// Per frame delay passed to the compositor, in hundredths of a second
const FRAME_DELAY : &str = "10";

// Blend factors for frame i of n, interpolating geometrically so the
// zoom looks uniform. 1 selects the start rectangle, 0 the end one.
fn frame_factors(
    start_a : Complex<f64>,
    start_b : Complex<f64>,
    end_a : Complex<f64>,
    end_b : Complex<f64>,
    frames : usize,
    i : usize
) -> (f64, f64) {
    let x1 = start_b.re - start_a.re;
    let x2 = end_b.re - end_a.re;
    let y1 = start_b.im - start_a.im;
    let y2 = end_b.im - end_a.im;
    if x1 - x2 == 0.0 {
        // No width change to pace the zoom by, ramp linearly instead
        let ramp = 1.0 - i as f64 / frames as f64;
        (ramp, ramp)
    } else {
        let xd = x1 * (x2 / x1).powf(1.0 / (frames - 1) as f64).powi(i as i32);
        let yd = y1 * (y2 / y1).powf(1.0 / (frames - 1) as f64).powi(i as i32);
        ((xd - x2) / (x1 - x2), (yd - y2) / (y1 - y2))
    }
}

pub fn animate_fractal(
    polynomial : &mut Polynomial,
    start_a : Complex<f64>,
    start_b : Complex<f64>,
    end_a : Complex<f64>,
    end_b : Complex<f64>,
    width : u32,
    height : u32,
    frames : usize,
    file_name : &str
) -> std::io::Result<()> {
    assert!(frames > 1, "Animation needs at least two frames");
    create_dir_all(format!("{}/{}", OUTPUT_DIR, TEMP_DIR))?;
    // The temporary frames go away even if a render or the merge fails
    let merged = rasterize_frames(
        polynomial,
        start_a, start_b,
        end_a, end_b,
        width, height,
        frames
    ).and_then(
        |_| compose(frames, file_name)
    );
    remove_dir_all(format!("{}/{}", OUTPUT_DIR, TEMP_DIR))?;
    merged
}

fn rasterize_frames(
    polynomial : &mut Polynomial,
    start_a : Complex<f64>,
    start_b : Complex<f64>,
    end_a : Complex<f64>,
    end_b : Complex<f64>,
    width : u32,
    height : u32,
    frames : usize
) -> std::io::Result<()> {
    for i in 0..frames {
        let (x, y) = frame_factors(start_a, start_b, end_a, end_b, frames, i);
        info!("Frame {} of {}", i + 1, frames);
        draw_fractal(
            polynomial,
            start_a * x + end_a * (1.0 - x),
            start_b * y + end_b * (1.0 - y),
            width,
            height,
            &format!("{}/{:03}", TEMP_DIR, i)
        )?;
    }
    Ok(())
}

// Hand the ordered frames to imagemagick to merge into a looping gif
fn compose(frames : usize, file_name : &str) -> std::io::Result<()> {
    let output = format!("{}/{}.gif", OUTPUT_DIR, file_name);
    info!("Merging {} frames into {}", frames, output);
    let mut command = Command::new("convert");
    command.args(["-delay", FRAME_DELAY, "-loop", "0"]);
    for i in 0..frames {
        command.arg(format!("{}/{}/{:03}.png", OUTPUT_DIR, TEMP_DIR, i));
    }
    let status = command.arg(&output).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(Error::new(ErrorKind::Other, "Couldn't merge animation frames"))
    }
}

pub fn generate(input : &JsonValue) -> std::io::Result<()> {
    let repr = Representation::from_json(&input["polynomial"])?;
    let mut polynomial = Polynomial::new(repr);
    let start_a = complex_from_json(&input["start_a"]).unwrap_or(Complex::new(-10.0, 10.0));
    let start_b = complex_from_json(&input["start_b"]).unwrap_or(Complex::new(10.0, -10.0));
    let end_a = complex_from_json(&input["end_a"]).unwrap_or(Complex::new(-1.0, 1.0));
    let end_b = complex_from_json(&input["end_b"]).unwrap_or(Complex::new(1.0, -1.0));
    if start_b.re == start_a.re || start_b.im == start_a.im {
        // A degenerate start rectangle makes the zoom pacing divide by zero
        return Err(Error::new(ErrorKind::InvalidData, "Start rectangle needs nonzero width and height"))
    }
    let width = input["width"].as_u32().unwrap_or(512);
    let height = input["height"].as_u32().unwrap_or(512);
    if width < 2 || height < 2 {
        return Err(Error::new(ErrorKind::InvalidData, "Image needs at least two pixels on each side"))
    }
    let frames = input["frames"].as_usize().unwrap_or(60);
    if frames < 2 {
        return Err(Error::new(ErrorKind::InvalidData, "Animation needs at least two frames"))
    }
    let name = input["name"].as_str().unwrap_or("fractal");
    info!("Animating {} frames", frames);
    animate_fractal(
        &mut polynomial,
        start_a, start_b,
        end_a, end_b,
        width, height,
        frames,
        name
    )
}
