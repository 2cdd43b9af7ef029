//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;
pub mod mock_helpers;

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f32, b: f32, epsilon: f32) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}

/// Split text output into record lines
pub fn record_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::to_string)
        .collect()
}

/// Expected text record of simulated tick `n` at acceleration range code `r`
pub fn simulated_line(n: u32, r: u8) -> String {
    let scale = (r + 1) as f64;
    let n = n as f64;
    format!(
        "{:.2};{:.2};{:.2};0.00;0.00;0.00;{:.2}",
        (n / scale) as f32,
        (-n / scale) as f32,
        (4.0 * n / scale) as f32,
        (20.0 + (0.1 * n).sin()) as f32
    )
}
