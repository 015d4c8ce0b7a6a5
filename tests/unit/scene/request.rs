use super::*;

#[test]
fn normalize_rel_path_rules() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("/etc/passwd").is_err());
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("a/../../x.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn validate_rejects_unsupported_dimensions() {
    let mut req = CreativeRequest::new(CanvasFormat::Square);
    req.validate().unwrap();
    req.height = 1920;
    assert!(matches!(
        req.validate(),
        Err(BrandframeError::Configuration(_))
    ));
}

#[test]
fn validate_checks_brand_colors() {
    let mut req = CreativeRequest::new(CanvasFormat::Portrait);
    req.brand_colors = vec![Color::new("ok", "#112233"), Color::new("bad", "#12")];
    let msg = req.validate().unwrap_err().to_string();
    assert!(msg.contains("$.brandColors[1].hex"), "{msg}");
}

#[test]
fn request_def_parses_with_defaults() {
    let def = CreativeRequestDef::from_reader(
        r##"{
            "format": "1080x1350",
            "brandColors": [{"name": "Navy", "hex": "#112233"}],
            "copy": {"headline": "Hello", "body": "World", "cta": "Go"},
            "settings": {"seed": 42}
        }"##
        .as_bytes(),
    )
    .unwrap();
    assert_eq!(def.format, CanvasFormat::Portrait);
    assert_eq!(def.settings.seed, 42);
    assert_eq!(def.copy.as_ref().unwrap().cta, "Go");
    assert!(def.logo.is_none());

    let req = def.load(".").unwrap();
    assert_eq!((req.width, req.height), (1080, 1350));
    assert!(req.logo_image_bytes.is_none());
}

#[test]
fn request_def_parse_error_is_serde_error() {
    let err = CreativeRequestDef::from_reader("{not json".as_bytes()).unwrap_err();
    assert!(matches!(err, BrandframeError::Serde(_)));
}

#[test]
fn load_reads_assets_relative_to_root() {
    let dir = std::env::temp_dir().join(format!("brandframe-req-{}", std::process::id()));
    std::fs::create_dir_all(dir.join("assets")).unwrap();
    std::fs::write(dir.join("assets/logo.bin"), [1u8, 2, 3]).unwrap();

    let def = CreativeRequestDef {
        format: CanvasFormat::Square,
        brand_colors: Vec::new(),
        logo: Some("assets/logo.bin".to_owned()),
        reference_image: Some("assets/missing.png".to_owned()),
        copy: None,
        settings: CreativeSettings::default(),
    };
    assert!(def.load(&dir).is_err());

    let def = CreativeRequestDef {
        reference_image: None,
        ..def
    };
    let req = def.load(&dir).unwrap();
    assert_eq!(req.logo_image_bytes.as_deref(), Some(&[1u8, 2, 3][..]));

    let _ = std::fs::remove_dir_all(&dir);
}
