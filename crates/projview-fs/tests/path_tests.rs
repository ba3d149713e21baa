use pretty_assertions::assert_eq;
use projview_fs::NormalizedPath;
use rstest::rstest;

#[rstest]
#[case::backslashes("work\\clients\\acme", "work/clients/acme")]
#[case::dot_segments("./work/./alpha", "work/alpha")]
#[case::double_slashes("work//alpha/", "work/alpha")]
#[case::parent_resolution("work/old/../alpha", "work/alpha")]
#[case::leading_parent_dropped("../outside", "outside")]
#[case::view_root_dot(".", "")]
#[case::view_root_empty("", "")]
fn test_normalization(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(NormalizedPath::new(input).as_str(), expected);
}

#[test]
fn test_join_onto_empty_path() {
    let root = NormalizedPath::empty();
    assert_eq!(root.join("alpha").as_str(), "alpha");
    assert_eq!(root.join("work").join("alpha").as_str(), "work/alpha");
}

#[test]
fn test_join_absolute_base() {
    let base = NormalizedPath::new("/srv/view");
    assert_eq!(base.join("work/alpha").as_str(), "/srv/view/work/alpha");
    assert_eq!(base.join("").as_str(), "/srv/view");
}

#[test]
fn test_starts_with_is_segment_wise() {
    let kept = NormalizedPath::new("work2/alpha");
    assert!(!kept.starts_with(&NormalizedPath::new("work")));
    assert!(kept.starts_with(&NormalizedPath::new("work2")));
    assert!(kept.starts_with(&NormalizedPath::new("work2/alpha")));
    assert!(kept.starts_with(&NormalizedPath::empty()));
    assert!(!NormalizedPath::new("work").starts_with(&kept));
}

#[test]
fn test_starts_with_respects_roots() {
    let absolute = NormalizedPath::new("/work/alpha");
    let relative = NormalizedPath::new("work");
    assert!(!absolute.starts_with(&relative));
}

#[test]
fn test_strip_prefix() {
    let full = NormalizedPath::new("/srv/view/work/alpha");
    let root = NormalizedPath::new("/srv/view");
    assert_eq!(full.strip_prefix(&root), Some(NormalizedPath::new("work/alpha")));
    assert_eq!(root.strip_prefix(&root), Some(NormalizedPath::empty()));
    assert_eq!(full.strip_prefix(&NormalizedPath::new("/srv/other")), None);
}

#[test]
fn test_file_name_and_extension() {
    let path = NormalizedPath::new("work/alpha.lnk");
    assert_eq!(path.file_name(), Some("alpha.lnk"));
    assert_eq!(path.extension(), Some("lnk"));
    assert_eq!(NormalizedPath::new("work/.hidden").extension(), None);
    assert_eq!(NormalizedPath::empty().file_name(), None);
}

#[test]
fn test_parent_chain() {
    let path = NormalizedPath::new("a/b/c");
    let parent = path.parent().unwrap();
    assert_eq!(parent.as_str(), "a/b");
    assert_eq!(parent.parent().unwrap().as_str(), "a");
    assert_eq!(parent.parent().unwrap().parent().unwrap(), NormalizedPath::empty());
}

#[test]
fn test_segments() {
    let path = NormalizedPath::new("/srv/view/work");
    let segments: Vec<&str> = path.segments().collect();
    assert_eq!(segments, vec!["srv", "view", "work"]);
    assert!(path.is_absolute());
    assert!(!NormalizedPath::new("work").is_absolute());
}
