//! Arithmetic section: eight fixed-shape, multi-stage numeric items.
//!
//! Items are generated in a fixed order (one per shape). Every answer is
//! computed in integers and rounded half up, so the stored `expected` string
//! is the exact decimal the prompt asks for on every platform.

use crate::model::{item_id, ArithItem, Item, ItemKind, Section, SectionCode};
use crate::rng::{RandomSource, SeededRng};

use super::section_rng;

const CODE: SectionCode = SectionCode::Arithmetic;

pub const ITEM_COUNT: usize = 8;

const MANTISSA_DIGITS: u32 = 7;

const PRIME_DENOMINATORS: [i64; 7] = [7, 11, 13, 17, 19, 23, 29];

pub fn generate_arithmetic_section(seed: &str) -> Section {
    let mut rng = section_rng(seed, CODE);
    let shapes: [fn(&mut SeededRng) -> (String, String, f64); ITEM_COUNT] = [
        decimal_chain,
        borrowing_chain,
        order_of_operations,
        fraction_to_decimal,
        sequential_percentages,
        compound_rational,
        power_and_roots,
        significant_figures,
    ];
    let items = shapes
        .iter()
        .enumerate()
        .map(|(n, shape)| {
            let (prompt, expected, tolerance) = shape(&mut rng);
            Item::Arith(ArithItem {
                id: item_id(CODE, ItemKind::Arith, n),
                prompt,
                expected,
                tolerance,
            })
        })
        .collect();
    Section::new(CODE, items)
}

/// Format a value held in units of `10^-places`.
fn fmt_scaled(value: i64, places: u32) -> String {
    if places == 0 {
        return value.to_string();
    }
    let scale = 10i64.pow(places);
    let sign = if value < 0 { "-" } else { "" };
    let abs = value.abs();
    format!(
        "{sign}{}.{:0width$}",
        abs / scale,
        abs % scale,
        width = places as usize
    )
}

/// `num / den` to `places` decimals, ties rounded away from zero.
fn fmt_ratio(num: i64, den: i64, places: u32) -> String {
    let scaled = i128::from(num) * 10i128.pow(places);
    let den = i128::from(den);
    let (scaled, den) = if den < 0 { (-scaled, -den) } else { (scaled, den) };
    let mut q = scaled.abs() / den;
    if scaled.abs() % den * 2 >= den {
        q += 1;
    }
    let q = i64::try_from(q).unwrap_or(i64::MAX);
    fmt_scaled(if scaled < 0 { -q } else { q }, places)
}

fn decimal_chain(rng: &mut SeededRng) -> (String, String, f64) {
    let terms: Vec<i64> = (0..4).map(|_| rng.range(100_000, 10_000_000)).collect();
    let total = terms[0] + terms[1] - terms[2] + terms[3];
    let prompt = format!(
        "Compute {} + {} - {} + {}. Give the answer to 4 decimal places.",
        fmt_scaled(terms[0], 4),
        fmt_scaled(terms[1], 4),
        fmt_scaled(terms[2], 4),
        fmt_scaled(terms[3], 4)
    );
    (prompt, fmt_scaled(total, 4), 1e-4)
}

/// Six-digit operands whose two lowest digits force a borrow in the first
/// subtraction. The result may be negative.
fn borrowing_chain(rng: &mut SeededRng) -> (String, String, f64) {
    let a_ones = rng.range(0, 8);
    let a_tens = rng.range(0, 8);
    let a_high = rng.range(1_000, 10_000);
    let b_ones = a_ones + 1 + rng.range(0, 9 - a_ones);
    let b_tens = a_tens + 1 + rng.range(0, 9 - a_tens);
    let b_high = rng.range(1_000, 10_000);
    let c = rng.range(100_000, 1_000_000);
    let a = a_high * 100 + a_tens * 10 + a_ones;
    let b = b_high * 100 + b_tens * 10 + b_ones;
    let prompt = format!("Compute {a} - {b} - {c}.");
    (prompt, (a - b - c).to_string(), 0.0)
}

fn order_of_operations(rng: &mut SeededRng) -> (String, String, f64) {
    let a = rng.range(2, 13);
    let b = rng.range(3, 40);
    let c = rng.range(3, 40);
    let d = rng.range(2, 10);
    let root = rng.range(2, 21);
    let square = root * root;
    let prompt = format!(
        "Evaluate ({a}^2 + {b} * {c}) / {d} - sqrt({square}). Give the answer to 4 decimal places."
    );
    (prompt, fmt_ratio(a * a + b * c - root * d, d, 4), 1e-4)
}

fn fraction_to_decimal(rng: &mut SeededRng) -> (String, String, f64) {
    let d = *rng.pick(&PRIME_DENOMINATORS).unwrap_or(&7);
    let n = rng.range(1, d);
    let prompt = format!("Convert {n}/{d} to a decimal rounded to 7 decimal places.");
    (prompt, fmt_ratio(n, d, 7), 1e-7)
}

fn sequential_percentages(rng: &mut SeededRng) -> (String, String, f64) {
    let base = rng.range(200, 5_000);
    let up = rng.range(5, 31);
    let down = rng.range(5, 31);
    let again = rng.range(1, 16);
    let prompt = format!(
        "A price of {base} rises by {up}%, then falls by {down}%, then rises by {again}%. \
         What is the final price to 2 decimal places?"
    );
    (prompt, percentage_chain(base, up, down, again), 0.005)
}

/// `base * (1 + up%) * (1 - down%) * (1 + again%)` to 2 places, half up.
fn percentage_chain(base: i64, up: i64, down: i64, again: i64) -> String {
    let millionths = base * (100 + up) * (100 - down) * (100 + again);
    fmt_ratio(millionths, 1_000_000, 2)
}

fn compound_rational(rng: &mut SeededRng) -> (String, String, f64) {
    let a = rng.range(1, 13);
    let b = rng.range(2, 13);
    let c = rng.range(1, 13);
    let d = rng.range(2, 13);
    let e = rng.range(1, 13);
    let f = rng.range(2, 13);
    let numerator = (a * d + c * b) * e;
    let denominator = b * d * f;
    let prompt =
        format!("Evaluate ({a}/{b} + {c}/{d}) * ({e}/{f}). Give the answer to 6 decimal places.");
    (prompt, fmt_ratio(numerator, denominator, 6), 1e-6)
}

fn power_and_roots(rng: &mut SeededRng) -> (String, String, f64) {
    let base = rng.range(2, 10);
    let exponent = rng.range(3, 6) as u32;
    let u = rng.range(2, 16);
    let v = rng.range(2, 16);
    let total = base.pow(exponent) + u + v;
    let prompt = format!(
        "Compute {base}^{exponent} + cbrt({}) + cbrt({}).",
        u * u * u,
        v * v * v
    );
    (prompt, total.to_string(), 0.0)
}

/// The value shown is `mantissa * 10^(exponent - 6)`: seven significant
/// digits with the point placed by `exponent`.
fn significant_figures(rng: &mut SeededRng) -> (String, String, f64) {
    let mantissa = rng.range(1_000_000, 10_000_000);
    let exponent = rng.range(-4, 4) as i32;
    let sig = rng.range(2, 5) as u32;
    let prompt = format!(
        "Round {} to {sig} significant figures.",
        fmt_scaled(mantissa, (6 - exponent) as u32)
    );
    (prompt, round_significant(mantissa, exponent, sig), 0.0)
}

/// Round the seven-digit `mantissa * 10^(exponent - 6)` to `sig` significant
/// figures, half up, and print it as a plain decimal.
fn round_significant(mantissa: i64, exponent: i32, sig: u32) -> String {
    let dropped = MANTISSA_DIGITS - sig;
    let unit = 10i64.pow(dropped);
    let mut kept = mantissa / unit;
    if mantissa % unit * 2 >= unit {
        kept += 1;
    }
    // 9.9995 -> 10.00 moves the leading digit up one place.
    let carry = i32::from(kept == 10i64.pow(sig));
    let places = (sig as i32 - 1 - exponent - carry).max(0);
    // value * 10^places == kept * 10^(dropped + exponent - 6 + places)
    let shift = dropped as i32 + exponent - 6 + places;
    let scaled = if shift >= 0 {
        kept * 10i64.pow(shift as u32)
    } else {
        kept / 10i64.pow(shift.unsigned_abs())
    };
    fmt_scaled(scaled, places as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_items_with_parseable_expected() {
        let section = generate_arithmetic_section("alpha");
        assert_eq!(section.items.len(), ITEM_COUNT);
        for item in &section.items {
            let Item::Arith(a) = item else {
                panic!("non-arith item");
            };
            assert!(a.expected.parse::<f64>().is_ok(), "{}", a.expected);
            assert!(a.tolerance >= 0.0);
        }
    }

    #[test]
    fn scaled_formatting() {
        assert_eq!(fmt_scaled(123_456, 4), "12.3456");
        assert_eq!(fmt_scaled(-5, 4), "-0.0005");
        assert_eq!(fmt_scaled(10_000, 4), "1.0000");
    }

    #[test]
    fn significant_rounding() {
        assert_eq!(round_significant(4_567_891, -3, 3), "0.00457");
        assert_eq!(round_significant(4_567_891, 3, 2), "4600");
        assert_eq!(round_significant(1_234_568, 1, 4), "12.35");
        assert_eq!(round_significant(3_634_500, 3, 4), "3635");
        assert_eq!(round_significant(9_999_600, -3, 4), "0.01000");
        assert_eq!(round_significant(9_960_000, 3, 2), "10000");
    }

    #[test]
    fn ratios_round_half_up() {
        assert_eq!(fmt_ratio(291_525, 1_000, 2), "291.53");
        assert_eq!(fmt_ratio(1, 8, 2), "0.13");
        assert_eq!(fmt_ratio(-1, 8, 2), "-0.13");
        assert_eq!(fmt_ratio(-1, 1_000, 2), "0.00");
        assert_eq!(fmt_ratio(1, 3, 6), "0.333333");
        assert_eq!(fmt_ratio(7, -2, 0), "-4");
        assert_eq!(percentage_chain(250, 30, 22, 15), "291.53");
    }

    /// Parse a plain decimal into units of `10^-places`.
    fn scaled(text: &str, places: u32) -> i64 {
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
        assert!(frac.len() <= places as usize, "{text} has more than {places} places");
        let padded = format!("{whole}{frac:0<width$}", width = places as usize);
        let value: i64 = padded.parse().unwrap();
        if negative {
            -value
        } else {
            value
        }
    }

    /// `|expected - exact| <= unit / 2`, with an exact tie resolved upward.
    fn assert_half_up(expected_units: i64, exact_units: i64, unit: i64, context: &str) {
        let diff = expected_units - exact_units;
        assert!(2 * diff.abs() <= unit, "{context}: off by {diff} of {unit}");
        if 2 * diff.abs() == unit {
            assert!(diff > 0, "{context}: tie rounded down");
        }
    }

    #[test]
    fn stored_answers_match_integer_reference() {
        for n in 0..3_000 {
            let section = generate_arithmetic_section(&format!("sweep-{n}"));
            let items: Vec<&ArithItem> = section
                .items
                .iter()
                .filter_map(|i| match i {
                    Item::Arith(a) => Some(a),
                    _ => None,
                })
                .collect();

            // Percentages: exact value is N / 10^6.
            let nums: Vec<i64> = items[4]
                .prompt
                .split(|c: char| !c.is_ascii_digit())
                .filter(|t| !t.is_empty())
                .take(4)
                .map(|t| t.parse().unwrap())
                .collect();
            let millionths = nums[0] * (100 + nums[1]) * (100 - nums[2]) * (100 + nums[3]);
            assert_half_up(
                scaled(&items[4].expected, 6),
                millionths,
                10_000,
                &items[4].prompt,
            );

            // Significant figures: compare in units of the shown precision.
            let shown = items[7]
                .prompt
                .trim_start_matches("Round ")
                .split(' ')
                .next()
                .unwrap();
            let shown_places = shown.split_once('.').map_or(0, |(_, f)| f.len()) as u32;
            let sig: u32 = items[7]
                .prompt
                .split(' ')
                .nth(3)
                .unwrap()
                .parse()
                .unwrap();
            let exact = scaled(shown, shown_places);
            let unit = 10i64.pow(7 - sig);
            let expected = scaled(&items[7].expected, shown_places);
            assert_eq!(expected % unit, 0, "{}", items[7].prompt);
            assert_half_up(expected, exact, unit, &items[7].prompt);
        }
    }

    #[test]
    fn borrowing_chain_forces_a_borrow() {
        let mut rng = SeededRng::new("borrow");
        for _ in 0..100 {
            let (prompt, _, tol) = borrowing_chain(&mut rng);
            assert_eq!(tol, 0.0);
            let nums: Vec<i64> = prompt
                .trim_start_matches("Compute ")
                .trim_end_matches('.')
                .split(" - ")
                .map(|s| s.parse().unwrap())
                .collect();
            assert!(nums[0] % 10 < nums[1] % 10);
            assert!((100_000..1_000_000).contains(&nums[0]));
            assert!((100_000..1_000_000).contains(&nums[1]));
        }
    }

    #[test]
    fn exact_items_have_zero_tolerance() {
        let section = generate_arithmetic_section("exact");
        let tolerances: Vec<f64> = section
            .items
            .iter()
            .map(|i| match i {
                Item::Arith(a) => a.tolerance,
                _ => f64::NAN,
            })
            .collect();
        assert_eq!(tolerances[1], 0.0);
        assert_eq!(tolerances[6], 0.0);
        assert_eq!(tolerances[7], 0.0);
    }
}
