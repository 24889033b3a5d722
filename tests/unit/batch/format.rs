use super::*;

#[test]
fn defaults_are_square_portrait_landscape() {
    let list = FormatList::defaults();
    let dims: Vec<_> = list.iter().map(|f| (f.width, f.height)).collect();
    assert_eq!(dims, vec![(1000, 1000), (1080, 1320), (1080, 607)]);
    assert_eq!(list.get("2").unwrap().label, "Portrait (Instagram/Ozon)");
}

#[test]
fn new_rejects_empty_duplicates_and_zero_dims() {
    assert!(FormatList::new(vec![]).is_err());
    assert!(
        FormatList::new(vec![
            FormatSpec::new("a", 10, 10, "x"),
            FormatSpec::new("a", 20, 20, "y"),
        ])
        .is_err()
    );
    assert!(FormatList::new(vec![FormatSpec::new("a", 0, 10, "x")]).is_err());
}

#[test]
fn add_generates_unique_ids() {
    let mut list = FormatList::new(vec![
        FormatSpec::new("2", 10, 10, "x"),
        FormatSpec::new("3", 10, 10, "y"),
    ])
    .unwrap();
    let a = list.add(50, 60, "a").unwrap().id.clone();
    let b = list.add_default().id.clone();
    assert_ne!(a, "2");
    assert_ne!(a, "3");
    assert_ne!(a, b);
    assert_eq!(list.len(), 4);
    let added = list.get(&b).unwrap();
    assert_eq!((added.width, added.height), (1080, 1920));
    assert_eq!(added.label, "New Format");

    assert!(list.add(0, 10, "bad").is_err());
    assert_eq!(list.len(), 4);
}

#[test]
fn update_edits_single_fields() {
    let mut list = FormatList::defaults();
    list.update("1", FormatField::Width(1200)).unwrap();
    list.update("1", FormatField::Label("Wide".to_string()))
        .unwrap();
    let f = list.get("1").unwrap();
    assert_eq!((f.width, f.height, f.label.as_str()), (1200, 1000, "Wide"));

    assert!(list.update("1", FormatField::Height(0)).is_err());
    assert!(list.update("missing", FormatField::Width(5)).is_err());
}

#[test]
fn last_format_cannot_be_removed() {
    let mut list = FormatList::defaults();
    list.remove("1").unwrap();
    list.remove("3").unwrap();
    assert!(list.remove("2").is_err());
    assert_eq!(list.len(), 1);
    assert!(list.remove("1").is_err());
}
