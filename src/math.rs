/// Kahan-Babuska-Neumaier summation for reduced numerical error when adding up edge costs.
///
/// <https://en.wikipedia.org/wiki/Kahan_summation_algorithm#Further_enhancements>
///
/// Infinite inputs (absent edges) make the sum infinite, same as a naive sum.
pub fn compensated_sum<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let mut sum = 0.;
    let mut compensation = 0.;
    for value in values {
        let t = sum + value;
        if t.is_infinite() {
            return t;
        }
        compensation += if f64::abs(sum) >= value.abs() {
            (sum - t) + value
        } else {
            (value - t) + sum
        };
        sum = t;
    }
    sum + compensation
}
