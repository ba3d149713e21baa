use projview_fs::NormalizedPath;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_normalization_is_idempotent(s in "[a-z./\\\\]{0,24}") {
        let once = NormalizedPath::new(&s);
        let twice = NormalizedPath::new(once.as_str());
        prop_assert_eq!(&once, &twice);
        prop_assert!(!once.as_str().contains('\\'));
        prop_assert!(!once.segments().any(|seg| seg == "." || seg == ".."));
    }

    #[test]
    fn test_join_then_strip_prefix(base in "/[a-z]{1,6}(/[a-z]{1,6}){0,3}", rel in "[a-z]{1,6}(/[a-z]{1,6}){0,3}") {
        let base = NormalizedPath::new(&base);
        let joined = base.join(&rel);
        prop_assert!(joined.starts_with(&base));
        prop_assert_eq!(joined.strip_prefix(&base), Some(NormalizedPath::new(&rel)));
    }
}
