/// All candidate winning lines for an n×n board, in fixed order: the n rows
/// top to bottom, the n columns left to right, the main diagonal, then the
/// anti-diagonal. Always exactly `2n + 2` combinations of `n` cell indices.
pub fn winning_combinations(n: usize) -> Vec<Vec<usize>> {
    let mut combos = Vec::with_capacity(2 * n + 2);
    for row in 0..n {
        combos.push((0..n).map(|col| row * n + col).collect());
    }
    for col in 0..n {
        combos.push((0..n).map(|row| row * n + col).collect());
    }
    combos.push((0..n).map(|i| i * n + i).collect());
    combos.push((0..n).map(|i| i * n + (n - 1 - i)).collect());
    combos
}
