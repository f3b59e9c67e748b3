//! Short counts for vote and view badges (1.2K, 3.4M).

const SUFFIXES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

pub fn format_compact_number(value: i64) -> String {
    if value.unsigned_abs() < 1000 {
        return value.to_string();
    }

    let abs = value.unsigned_abs() as f64;
    let sign = if value < 0 { "-" } else { "" };

    // Rounding can carry into the next unit (999_950 -> 1000K -> 1M).
    let mut chosen = SUFFIXES.len() - 1;
    for (i, (unit, _)) in SUFFIXES.iter().enumerate() {
        if abs >= *unit {
            chosen = i;
            break;
        }
    }
    let mut scaled = round_one_decimal(abs / SUFFIXES[chosen].0);
    if scaled >= 1000.0 && chosen > 0 {
        chosen -= 1;
        scaled = round_one_decimal(abs / SUFFIXES[chosen].0);
    }

    let number = if scaled.fract() == 0.0 {
        format!("{}", scaled as i64)
    } else {
        format!("{:.1}", scaled)
    };
    format!("{}{}{}", sign, number, SUFFIXES[chosen].1)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
