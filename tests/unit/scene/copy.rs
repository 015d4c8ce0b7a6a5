use super::*;

struct Template;

impl CopyGenerator for Template {
    fn generate(
        &self,
        brief: &str,
        tone: Tone,
        length: CopyLength,
    ) -> BrandframeResult<Vec<CopyVariant>> {
        let cta = match tone {
            Tone::Professional => "Learn more",
            Tone::Friendly => "Come say hi",
            Tone::Bold => "Grab it now",
        };
        let n = match length {
            CopyLength::Short => 1,
            CopyLength::Medium => 2,
            CopyLength::Long => 3,
        };
        Ok((0..n)
            .map(|i| CopyVariant::new(format!("{brief} #{i}"), brief, cta))
            .collect())
    }
}

#[test]
fn generator_is_object_safe() {
    let g: Box<dyn CopyGenerator> = Box::new(Template);
    let out = g.generate("Spring sale", Tone::Bold, CopyLength::Long).unwrap();
    assert_eq!(out.len(), 3);
    assert_eq!(out[2].headline, "Spring sale #2");
    assert_eq!(out[0].cta, "Grab it now");
}

#[test]
fn json_shape() {
    let v = CopyVariant::new("Hi", "There", "Go");
    assert_eq!(
        serde_json::to_string(&v).unwrap(),
        r#"{"headline":"Hi","body":"There","cta":"Go"}"#
    );
    let back: CopyVariant =
        serde_json::from_str(r##"{"headline":"a","body":"b","cta":"c","hashtags":"#x"}"##).unwrap();
    assert_eq!(back.hashtags.as_deref(), Some("#x"));
    assert_eq!(serde_json::to_string(&Tone::Friendly).unwrap(), r#""friendly""#);
    assert_eq!(CopyLength::default(), CopyLength::Medium);
}
