// src/utils.rs

//! Small numeric helpers shared by the simulator and the binaries.

use crate::settings::tuning::WARP_SPEED;
use rand::Rng;
use std::fmt::Display;

/// Uniform integer in `[min, max]`, both ends included.
///
/// An inverted range collapses to `min` instead of panicking.
pub fn rand_num<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Uniform integer in `[0, max)`. Returns 0 for an empty range.
pub fn get_random_int<R: Rng + ?Sized>(rng: &mut R, max: u64) -> u64 {
    if max == 0 {
        return 0;
    }
    rng.gen_range(0..max)
}

/// Linearly maps `number` from `[in_min, in_max]` onto `[out_min, out_max]`.
pub fn scale(number: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    ((number - in_min) * (out_max - out_min)) / (in_max - in_min) + out_min
}

/// Greatest common divisor of a list of numbers. Signs are ignored.
pub fn gcd(numbers: &[i64]) -> i64 {
    let Some((first, rest)) = numbers.split_first() else {
        return 0;
    };
    rest.iter().fold(first.abs(), |acc, n| {
        let (mut x, mut y) = (acc, n.abs());
        while x != 0 {
            let t = x;
            x = y % x;
            y = t;
        }
        y
    })
}

/// Formats a number with thousands separators and at most `decimals`
/// fraction digits (truncated, not rounded).
pub fn commify<T: Display>(number: T, decimals: usize) -> String {
    let text = number.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let fraction: String = fraction.chars().take(decimals).collect();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

/// Display text for the SPEED stat.
pub fn format_speed(speed: f64) -> String {
    if speed == WARP_SPEED {
        "Warp Speed!".to_string()
    } else {
        format!("{} mi/s", commify(speed, 0))
    }
}
