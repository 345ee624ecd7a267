/// Group items by a key, preserving the order in which keys first appear.
/// Within each group, items keep their input order. Keys only need
/// `PartialEq`, so group counts are expected to stay small (dates, project
/// names).
pub fn group_by<T, K, F>(items: impl IntoIterator<Item = T>, mut key_fn: F) -> Vec<(K, Vec<T>)>
where
    K: PartialEq,
    F: FnMut(&T) -> K,
{
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();

    for item in items {
        let key = key_fn(&item);
        match groups.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, members)) => members.push(item),
            None => groups.push((key, vec![item])),
        }
    }

    groups
}
