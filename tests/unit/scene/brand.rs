use super::*;

fn kit() -> BrandKit {
    BrandKit {
        name: "Acme".to_owned(),
        colors: vec![Color::new("Primary", "#112233"), Color::new("Accent", "#FFAA00")],
        logo: Some(NamedAsset {
            name: "logo.png".to_owned(),
            bytes: vec![9, 9],
        }),
        references: vec![
            NamedAsset {
                name: "a.png".to_owned(),
                bytes: vec![1],
            },
            NamedAsset {
                name: "b.png".to_owned(),
                bytes: vec![2],
            },
        ],
    }
}

#[test]
fn to_request_uses_first_reference() {
    let req = kit().to_request(CanvasFormat::Portrait);
    assert_eq!((req.width, req.height), (1080, 1350));
    assert_eq!(req.brand_colors.len(), 2);
    assert_eq!(req.logo_image_bytes, Some(vec![9, 9]));
    assert_eq!(req.reference_image_bytes, Some(vec![1]));
    assert!(req.copy.is_none());
}

#[test]
fn in_memory_store_is_keyed_by_caller() {
    let store = InMemoryBrandKitStore::default();
    assert_eq!(store.get("alice").unwrap(), None);
    store.save("alice", kit()).unwrap();
    assert_eq!(store.get("alice").unwrap(), Some(kit()));
    assert_eq!(store.get("bob").unwrap(), None);

    let mut updated = kit();
    updated.name = "Acme 2".to_owned();
    store.save("alice", updated.clone()).unwrap();
    assert_eq!(store.get("alice").unwrap(), Some(updated));
}
