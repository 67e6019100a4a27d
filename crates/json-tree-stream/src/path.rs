//! Node path construction.
//!
//! Object membership appends `/key` (no separator under an empty base),
//! array membership appends `[index]`: `Books/book[1]/title`. Keys are not
//! escaped, so a key containing `/` or `[` yields an ambiguous path.

/// Path of the field `key` under `base`.
pub fn child_path(base: &str, key: &str) -> String {
    if base.is_empty() {
        return key.to_owned();
    }
    let mut out = String::with_capacity(base.len() + 1 + key.len());
    out.push_str(base);
    out.push('/');
    out.push_str(key);
    out
}

/// Path of the element `index` under `base`.
pub fn index_path(base: &str, index: usize) -> String {
    format!("{base}[{index}]")
}
