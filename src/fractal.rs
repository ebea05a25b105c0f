// Rasterize a newton fractal over a rectangle of the complex plane
//
// Every pixel is a starting guess for the newton raphson search. The
// pixel takes the colour of the root the search lands on, darkened by
// how long it took to get there. Points that never land on a root are
// coloured black.

use json::JsonValue;
use num::complex::Complex;
use image::{Rgb, RgbImage};
use log::info;

use std::fs::create_dir_all;
use std::io::{Error, ErrorKind};

use crate::colour::colour;
use crate::polynomial::{complex_from_json, Polynomial, Representation, ERROR, MAX_ITER};

pub const OUTPUT_DIR : &str = "images";

pub fn render(
    polynomial : &mut Polynomial,
    corner_a : Complex<f64>,
    corner_b : Complex<f64>,
    width : u32,
    height : u32
) -> RgbImage {
    assert!(width > 1 && height > 1, "Image needs at least two pixels on each side");
    let xa = corner_a.re;
    let xb = corner_b.re;
    let ya = corner_a.im;
    let yb = corner_b.im;
    let degree = polynomial.degree();
    let mut image = RgbImage::new(width, height);
    for py in 0..height {
        let zy = py as f64 * (yb - ya) / (height - 1) as f64 + ya;
        for px in 0..width {
            let zx = px as f64 * (xb - xa) / (width - 1) as f64 + xa;
            let (root, iterations) = polynomial.newton(Complex::new(zx, zy), MAX_ITER);
            let mut nearest : Option<(usize, f64)> = None;
            for (index, known) in polynomial.roots().iter().enumerate() {
                let distance = (*known - root).norm();
                if nearest.map_or(true, |(_, best)| distance < best) {
                    nearest = Some((index, distance));
                }
            }
            let pixel = match nearest {
                Some((index, distance)) if distance < ERROR => colour(degree, index, iterations),
                _ => Rgb([0, 0, 0])
            };
            // Increasing imaginary part is "up" in the image
            image.put_pixel(px, height - 1 - py, pixel);
        }
    }
    image
}

pub fn draw_fractal(
    polynomial : &mut Polynomial,
    corner_a : Complex<f64>,
    corner_b : Complex<f64>,
    width : u32,
    height : u32,
    file_name : &str
) -> std::io::Result<()> {
    let image = render(polynomial, corner_a, corner_b, width, height);
    create_dir_all(OUTPUT_DIR)?;
    let path = format!("{}/{}.png", OUTPUT_DIR, file_name);
    info!("Writing {}", path);
    image.save(&path).map_err(
        |_| Error::new(ErrorKind::InvalidData, "Couldn't write image")
    )
}

pub fn generate(input : &JsonValue) -> std::io::Result<()> {
    let repr = Representation::from_json(&input["polynomial"])?;
    let mut polynomial = Polynomial::new(repr);
    let corner_a = complex_from_json(&input["corner_a"]).unwrap_or(Complex::new(-2.0, 2.0));
    let corner_b = complex_from_json(&input["corner_b"]).unwrap_or(Complex::new(2.0, -2.0));
    let width = input["width"].as_u32().unwrap_or(512);
    let height = input["height"].as_u32().unwrap_or(512);
    if width < 2 || height < 2 {
        return Err(Error::new(ErrorKind::InvalidData, "Image needs at least two pixels on each side"))
    }
    let name = input["name"].as_str().unwrap_or("fractal");
    info!("Rendering {}x{} newton fractal", width, height);
    draw_fractal(&mut polynomial, corner_a, corner_b, width, height, name)
}
