/// Greatest common divisor, Euclid's algorithm.
pub fn gcd(a: i64, b: i64) -> i64 {
    let mut a = a.abs();
    let mut b = b.abs();
    while b != 0 {
        let remainder = a % b;
        a = b;
        b = remainder;
    }
    a
}

/// Least common multiple; 0 when either argument is 0.
pub fn lcm(a: i64, b: i64) -> i64 {
    if a == 0 || b == 0 {
        return 0;
    }
    (a / gcd(a, b)) * b
}

/// True when `name` is the string form of an integer.
pub fn is_integer_name(name: &str) -> bool {
    name.parse::<i64>().is_ok()
}

/// Sorts names lexicographically, or numerically when every name is the
/// string form of an integer ("10" sorts after "9", not after "1").
pub fn sort_names(names: &mut [String]) {
    if names.iter().all(|name| is_integer_name(name)) {
        names.sort_by_key(|name| name.parse::<i64>().unwrap_or(0));
    } else {
        names.sort();
    }
}
