use crate::Item;

/// Every `k`-subset of a single tree path, appended to `alpha`.
///
/// The support of a subset is the count of its deepest node, since every
/// transaction through that node also passes through the nodes above it.
pub fn generate_combinations_from_path(
    path: &[(Item, usize)],
    k: usize,
    alpha: &[Item],
    result: &mut Vec<(Vec<Item>, usize)>,
) {
    if k == 0 || k > path.len() {
        return;
    }

    let indices: Vec<usize> = (0..path.len()).collect();
    let mut callback = |combination: &[usize]| {
        let mut pattern = alpha.to_vec();
        pattern.extend(combination.iter().map(|&idx| path[idx].0));
        let support = combination
            .iter()
            .map(|&idx| path[idx].1)
            .min()
            .unwrap_or(0);
        result.push((pattern, support));
    };
    generate_combinations_recursive(&indices, k, 0, &mut Vec::new(), &mut callback);
}

/// All non-empty subsets of `path`, smallest first.
pub fn all_path_combinations(path: &[(Item, usize)], alpha: &[Item]) -> Vec<(Vec<Item>, usize)> {
    let mut result = Vec::new();
    for k in 1..=path.len() {
        generate_combinations_from_path(path, k, alpha, &mut result);
    }
    result
}

pub fn generate_combinations_recursive<F>(
    items: &[usize],
    k: usize,
    start: usize,
    current: &mut Vec<usize>,
    callback: &mut F,
) where
    F: FnMut(&[usize]),
{
    if current.len() == k {
        callback(current);
        return;
    }

    for i in start..items.len() {
        current.push(items[i]);
        generate_combinations_recursive(items, k, i + 1, current, callback);
        current.pop();
    }
}
