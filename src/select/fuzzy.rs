/// Fuzzy/subsequence match: true when every character of `query` appears in
/// `label` in order, ignoring ASCII case. Whitespace in the query is ignored.
pub fn fuzzy_match(label: &str, query: &str) -> bool {
    let mut label_chars = label.chars();

    for qc in query.chars().filter(|c| !c.is_whitespace()) {
        let qc_low = qc.to_ascii_lowercase();
        loop {
            match label_chars.next() {
                Some(lc) if lc.to_ascii_lowercase() == qc_low => break,
                Some(_) => continue,
                None => return false,
            }
        }
    }

    true
}
