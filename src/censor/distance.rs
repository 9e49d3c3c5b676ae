// Levenshtein edit distance.
//
// Operates on Unicode scalar values, so an accented letter counts as one
// edit rather than two bytes' worth.

/// Compute the Levenshtein edit distance between two strings.
///
/// Returns the minimum number of single-character insertions, deletions and
/// substitutions needed to turn `a` into `b`. Fills the full
/// `(len(a)+1) x (len(b)+1)` table; inputs here are single words and short
/// sentences, not documents.
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());

    let mut d = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in d.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in d[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            d[i][j] = if a[i - 1] == b[j - 1] {
                d[i - 1][j - 1]
            } else {
                1 + d[i - 1][j].min(d[i][j - 1]).min(d[i - 1][j - 1])
            };
        }
    }

    d[m][n]
}
