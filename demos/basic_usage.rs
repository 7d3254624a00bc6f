// ============================================================================
// Basic Usage Example
// ============================================================================
//
// Run with: cargo run --example basic_usage --features logging
// Set RUST_LOG-style verbosity through the max level below; the canonical
// retry shows up at TRACE and overflow markers at DEBUG.

use dec128::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_target(false)
        .init();

    println!("=== dec128 Example ===\n");

    // Exact decimal arithmetic
    let price: Dec128 = "19.99".parse().expect("valid literal");
    let qty = Dec128::from_i64(3);
    let subtotal = price.mul(qty);
    println!("{} x {} = {}", price, qty, subtotal);

    // Tax at 8.25%, rounded to cents with banker's rounding
    let rate: Dec128 = "0.0825".parse().expect("valid literal");
    let policy = RoundingPolicy::currency();
    let tax = policy.apply(subtotal.mul(rate));
    println!("tax ({:?}, {} digits) = {}", policy.mode, policy.precision, tax);
    println!("total = {}\n", subtotal.add(tax));

    // Every rounding rule on the same tie
    let tie: Dec128 = "-1.235".parse().expect("valid literal");
    for mode in [
        RoundingMode::Floor,
        RoundingMode::Ceiling,
        RoundingMode::TowardZero,
        RoundingMode::AwayFromZero,
        RoundingMode::HalfTowardZero,
        RoundingMode::HalfAwayFromZero,
        RoundingMode::HalfEven,
    ] {
        println!("{:>16?}: {} -> {}", mode, tie, tie.round(2, mode));
    }
    println!();

    // Division, roots and powers
    println!("1 / 3     = {}", Dec128::ONE.div_i64(3));
    println!("sqrt(2)   = {}", Dec128::from_i64(2).sqrt());
    println!("2^-4      = {}", Dec128::from_i64(2).pow_int(-4));

    // The first attempt needs exponent 20; the canonical retry succeeds
    let a: Dec128 = "0.2000000000".parse().expect("valid literal");
    let b: Dec128 = "0.3000000000".parse().expect("valid literal");
    println!("{} x {} = {}\n", a, b, a.mul(b));

    // Errors are sticky values, not panics
    let broken = subtotal.div(Dec128::ZERO).add(Dec128::ONE).sqrt();
    println!("subtotal / 0 + 1, sqrt = {}", broken);
    match broken.into_result() {
        Ok(v) => println!("unexpected value {}", v),
        Err(e) => println!("error: {}", e),
    }

    let tiny = Dec128::new(1, 10, false);
    println!("1e-10 squared = {}", tiny.mul(tiny));
}
