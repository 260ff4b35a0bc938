use std::collections::HashMap;

use serde::Serialize;

/// A label and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedCount {
    pub name: String,
    pub count: usize,
}

/// Count labels, highest count first, ties in first-seen order.
pub(crate) fn ranked_counts<I, S>(labels: I) -> Vec<NamedCount>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<NamedCount> = Vec::new();
    for label in labels {
        let label = label.as_ref();
        if let Some(&i) = index.get(label) {
            counts[i].count += 1;
        } else {
            index.insert(label.to_string(), counts.len());
            counts.push(NamedCount {
                name: label.to_string(),
                count: 1,
            });
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_keep_first_seen_order() {
        let counts = ranked_counts(["b", "a", "a", "c", "b"]);
        let names: Vec<&str> = counts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(counts[0].count, 2);
    }
}
