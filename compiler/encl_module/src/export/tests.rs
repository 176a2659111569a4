use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn bindings(names: &[&str]) -> Vec<(Name, Value)> {
    names
        .iter()
        .zip(0_i64..)
        .map(|(name, i)| (Name::from(*name), Value::Int(i)))
        .collect()
}

fn exported(policy: &ExportPolicy, names: &[&str]) -> Vec<String> {
    policy
        .filter(&bindings(names))
        .names()
        .map(ToString::to_string)
        .collect()
}

fn policy(entries: &[&str]) -> ExportPolicy {
    ExportPolicy::parse(entries).unwrap_or_else(|err| panic!("{err}"))
}

#[test]
fn test_default_hides_private_names() {
    let default = ExportPolicy::default();
    assert!(default.is_default());
    assert_eq!(exported(&default, &["a", ".b", "c"]), vec!["a", "c"]);
}

#[test]
fn test_literal_names() {
    assert_eq!(exported(&policy(&["a"]), &["a", ".b", "c"]), vec!["a"]);
}

#[test]
fn test_absent_literal_is_ignored() {
    assert_eq!(exported(&policy(&["a", "ghost"]), &["a", "c"]), vec!["a"]);
}

#[test]
fn test_listed_private_name_is_exported() {
    assert_eq!(exported(&policy(&[".b"]), &["a", ".b"]), vec![".b"]);
}

#[test]
fn test_patterns() {
    let names = ["fun1", "helper", "fun2", "myfun"];
    assert_eq!(exported(&policy(&["^fun"]), &names), vec!["fun1", "fun2"]);
    assert_eq!(
        exported(&policy(&["^fun", "helper"]), &names),
        vec!["fun1", "helper", "fun2"]
    );
}

#[test]
fn test_union_preserves_declaration_order() {
    let mut combined = policy(&["c"]);
    combined.extend(policy(&["^a"]));
    assert_eq!(
        exported(&combined, &["a1", "b", "c", "a2"]),
        vec!["a1", "c", "a2"]
    );
    assert_eq!(combined.entries().len(), 2);
}

#[test]
fn test_invalid_pattern() {
    let Err(err) = ExportPolicy::parse(["^fun("]) else {
        panic!("unbalanced pattern should be rejected");
    };
    assert!(matches!(
        err,
        EvalError::InvalidExportPattern { ref pattern, .. } if pattern == "^fun("
    ));
}

#[test]
fn test_entry_kinds() {
    assert_eq!(
        ExportEntry::parse("area").ok(),
        Some(ExportEntry::Name(Name::from("area")))
    );
    assert!(matches!(
        ExportEntry::parse("^are"),
        Ok(ExportEntry::Pattern(_))
    ));
}

fn binding_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("\\.?[a-z]{1,6}", 0..12).prop_map(|set| set.into_iter().collect())
}

proptest! {
    #[test]
    fn default_policy_never_exposes_private(names in binding_names()) {
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let out = exported(&ExportPolicy::default(), &refs);
        prop_assert!(out.iter().all(|n| !n.starts_with('.')));
        let public: Vec<&str> = refs.iter().copied().filter(|n| !n.starts_with('.')).collect();
        prop_assert_eq!(out, public);
    }

    #[test]
    fn filter_preserves_order(names in binding_names(), picks in prop::collection::vec(any::<prop::sample::Index>(), 0..5)) {
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let listed: Vec<&str> = if refs.is_empty() {
            Vec::new()
        } else {
            picks.iter().map(|i| *i.get(&refs)).collect()
        };
        let out = exported(&policy(&listed), &refs);
        let expected: Vec<&str> = if listed.is_empty() {
            refs.iter().copied().filter(|n| !n.starts_with('.')).collect()
        } else {
            refs.iter().copied().filter(|n| listed.contains(n)).collect()
        };
        prop_assert_eq!(out, expected);
    }
}
