use knowbase_core::{
    align_topics, compile_text, parse_text, Lang, LangLines, LangText, Topic, TopicSet,
};

const EN_DOC: &str = "Shipping:
- Ships worldwide
- 3-5 day delivery

Returns:
- Within 30 days
- Note: receipt required

Contact:
- support@example.com";

const VI_DOC: &str = "Vận chuyển:
- Giao hàng toàn cầu

Chính sách đổi trả:
- Trong vòng 30 ngày";

fn titles(set: &TopicSet, lang: Lang) -> Vec<String> {
    set.iter().map(|topic| topic.title.get(lang).to_string()).collect()
}

#[test]
fn parse_then_compile_reproduces_titles_and_points() {
    let set = align_topics(parse_text(EN_DOC), parse_text(VI_DOC));

    let en = compile_text(&set, Lang::En);
    assert_eq!(en, EN_DOC);

    let reparsed = parse_text(&en);
    let original = parse_text(EN_DOC);
    assert_eq!(reparsed, original);
}

#[test]
fn compiled_vi_contains_fallback_titles_for_missing_topics() {
    let set = align_topics(parse_text(EN_DOC), parse_text(VI_DOC));
    assert_eq!(
        titles(&set, Lang::Vi),
        vec!["Vận chuyển", "Chính sách đổi trả", "Contact"]
    );

    let vi = compile_text(&set, Lang::Vi);
    assert_eq!(
        vi,
        "Vận chuyển:\n- Giao hàng toàn cầu\n\nChính sách đổi trả:\n- Trong vòng 30 ngày\n\nContact:"
    );
}

#[test]
fn align_length_is_max_of_inputs_with_placeholders_in_shorter_language() {
    let en = parse_text("A:\n- a");
    let vi = parse_text("Một:\n- 1\nHai:\n- 2\nBa:\n- 3");
    let set = align_topics(en, vi);

    assert_eq!(set.len(), 3);
    assert_eq!(titles(&set, Lang::En), vec!["A", "Topic 2", "Topic 3"]);
    for topic in set.iter().skip(1) {
        assert!(topic.content.en.is_empty());
        assert_eq!(topic.content.vi.len(), 1);
    }
}

#[test]
fn empty_point_is_lost_across_save_and_reload() {
    let set = TopicSet::from_topics(vec![Topic::new(
        LangText::new("Hours", "Giờ"),
        LangLines::new(
            vec!["9am".to_string(), String::new(), "5pm".to_string()],
            Vec::new(),
        ),
    )]);

    let reparsed = parse_text(&compile_text(&set, Lang::En));
    assert_eq!(reparsed.len(), 1);
    assert_eq!(reparsed[0].points, vec!["9am", "5pm"]);
}

#[test]
fn colon_sentence_inside_points_splits_topic() {
    // A bare point that looks like a title opens a new topic on reload.
    let set = TopicSet::from_topics(vec![Topic::new(
        LangText::new("Returns", "Đổi trả"),
        LangLines::new(vec!["Keep the receipt:".to_string()], Vec::new()),
    )]);
    let compiled = compile_text(&set, Lang::En);
    assert_eq!(compiled, "Returns:\n- Keep the receipt:");

    let edited = compiled.replace("- Keep", "Keep");
    let reparsed = parse_text(&edited);
    assert_eq!(reparsed.len(), 2);
    assert_eq!(reparsed[1].title, "Keep the receipt");
}
