#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

// =============================================================
// Helpers
// =============================================================

fn make_element(kind: ElementKind, x: f64, y: f64, w: f64, h: f64) -> Element {
    Element {
        id: Uuid::new_v4(),
        kind,
        subtype: None,
        content: String::new(),
        x,
        y,
        width: w,
        height: h,
        style: ElementStyle::default(),
    }
}

fn color(value: &str) -> ElementStyle {
    ElementStyle { color: Some(value.into()), ..Default::default() }
}

fn font_size(value: &str) -> ElementStyle {
    ElementStyle { font_size: Some(value.into()), ..Default::default() }
}

// =============================================================
// ElementKind
// =============================================================

#[test]
fn kind_names_round_trip() {
    for kind in ElementKind::ALL {
        assert_eq!(ElementKind::from_name(kind.name()), Some(kind));
    }
}

#[test]
fn kind_unknown_name_is_none() {
    assert_eq!(ElementKind::from_name("html"), None);
    assert_eq!(ElementKind::from_name("Text"), None);
}

#[test]
fn element_serializes_kind_as_type() {
    let el = make_element(ElementKind::Shape, 1.0, 2.0, 30.0, 40.0);
    let value = serde_json::to_value(&el).unwrap();
    assert_eq!(value["type"], "shape");
    assert!(value.get("subtype").is_none());
}

#[test]
fn element_deserializes_with_camel_case_style() {
    let id = Uuid::new_v4();
    let el: Element = serde_json::from_value(json!({
        "id": id,
        "type": "text",
        "content": "hi",
        "x": 10.0, "y": 20.0, "width": 200.0, "height": 40.0,
        "style": { "fontSize": "16px", "textAlign": "center", "letterSpacing": "1px" }
    }))
    .unwrap();
    assert_eq!(el.id, id);
    assert_eq!(el.style.font_size.as_deref(), Some("16px"));
    assert_eq!(el.style.text_align, Some(TextAlign::Center));
    assert_eq!(el.style.extra.get("letterSpacing").map(String::as_str), Some("1px"));
}

// =============================================================
// Style merge
// =============================================================

#[test]
fn merge_overrides_present_keys_and_keeps_others() {
    let base = ElementStyle {
        color: Some("black".into()),
        font_size: Some("12px".into()),
        ..Default::default()
    };
    let merged = base.merged(&color("red"));
    assert_eq!(merged.color.as_deref(), Some("red"));
    assert_eq!(merged.font_size.as_deref(), Some("12px"));
}

#[test]
fn merge_is_commutative_on_disjoint_keys() {
    let base = ElementStyle { font_family: Some("Inter".into()), ..Default::default() };
    let a = base.merged(&color("red")).merged(&font_size("20px"));
    let b = base.merged(&font_size("20px")).merged(&color("red"));
    assert_eq!(a, b);
}

#[test]
fn merge_is_associative() {
    let base = ElementStyle::default();
    let p = color("red");
    let q = font_size("20px");
    let r = ElementStyle { color: Some("blue".into()), ..Default::default() };
    let left = base.merged(&p).merged(&q).merged(&r);
    let right = base.merged(&p.merged(&q).merged(&r));
    assert_eq!(left, right);
    assert_eq!(left.color.as_deref(), Some("blue"));
}

#[test]
fn merge_combines_extra_keys() {
    let mut base = ElementStyle::default();
    base.extra.insert("letterSpacing".into(), "1px".into());
    let mut patch = ElementStyle::default();
    patch.extra.insert("boxShadow".into(), "none".into());
    let merged = base.merged(&patch);
    assert_eq!(merged.extra.len(), 2);
}

#[test]
fn merge_does_not_mutate_inputs() {
    let base = color("black");
    let patch = color("red");
    let _merged = base.merged(&patch);
    assert_eq!(base.color.as_deref(), Some("black"));
}

// =============================================================
// Toggles
// =============================================================

#[test]
fn toggle_bold_flips() {
    let plain = ElementStyle::default();
    assert_eq!(plain.toggle_bold().font_weight.as_deref(), Some("bold"));
    let bold = ElementStyle { font_weight: Some("bold".into()), ..Default::default() };
    assert_eq!(bold.toggle_bold().font_weight.as_deref(), Some("normal"));
}

#[test]
fn toggle_italic_flips() {
    let italic = ElementStyle { font_style: Some("italic".into()), ..Default::default() };
    assert_eq!(italic.toggle_italic().font_style.as_deref(), Some("normal"));
    assert_eq!(ElementStyle::default().toggle_italic().font_style.as_deref(), Some("italic"));
}

#[test]
fn toggle_decoration_switches_between_kinds() {
    let underlined = ElementStyle { text_decoration: Some("underline".into()), ..Default::default() };
    assert_eq!(underlined.toggle_decoration("underline").text_decoration.as_deref(), Some("none"));
    assert_eq!(
        underlined.toggle_decoration("line-through").text_decoration.as_deref(),
        Some("line-through")
    );
}

#[test]
fn toggle_patch_touches_one_key_only() {
    let patch = ElementStyle::default().toggle_bold();
    assert_eq!(patch, ElementStyle { font_weight: Some("bold".into()), ..Default::default() });
}

// =============================================================
// Element::patched
// =============================================================

#[test]
fn patched_replaces_top_level_fields() {
    let el = make_element(ElementKind::Text, 10.0, 20.0, 200.0, 40.0);
    let next = el.patched(&PartialElement::position(50.0, 60.0));
    assert_eq!((next.x, next.y), (50.0, 60.0));
    assert_eq!((next.width, next.height), (200.0, 40.0));
    assert_eq!(next.id, el.id);
    assert_eq!(el.x, 10.0);
}

#[test]
fn patched_merges_style() {
    let mut el = make_element(ElementKind::Text, 0.0, 0.0, 200.0, 40.0);
    el.style = font_size("16px");
    let next = el.patched(&PartialElement::style(color("red")));
    assert_eq!(next.style.font_size.as_deref(), Some("16px"));
    assert_eq!(next.style.color.as_deref(), Some("red"));
}

#[test]
fn patched_content_only() {
    let el = make_element(ElementKind::Text, 0.0, 0.0, 200.0, 40.0);
    let next = el.patched(&PartialElement::content("hello"));
    assert_eq!(next.content, "hello");
    assert_eq!(next.style, el.style);
}

#[test]
fn partial_geometry_sets_all_four() {
    let p = PartialElement::geometry(Rect::new(1.0, 2.0, 3.0, 4.0));
    assert_eq!((p.x, p.y, p.width, p.height), (Some(1.0), Some(2.0), Some(3.0), Some(4.0)));
    assert!(p.content.is_none());
}

#[test]
fn partial_serializes_sparse() {
    let value = serde_json::to_value(PartialElement::position(5.0, 6.0)).unwrap();
    assert_eq!(value, json!({ "x": 5.0, "y": 6.0 }));
}

// =============================================================
// ElementStore
// =============================================================

#[test]
fn store_push_appends_in_order() {
    let mut store = ElementStore::new();
    let a = make_element(ElementKind::Shape, 0.0, 0.0, 10.0, 10.0);
    let b = make_element(ElementKind::Shape, 0.0, 0.0, 10.0, 10.0);
    store.push(a.clone());
    store.push(b.clone());
    let ids: Vec<_> = store.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);
    assert_eq!(store.len(), 2);
}

#[test]
fn store_push_same_id_replaces_in_place() {
    let mut store = ElementStore::new();
    let a = make_element(ElementKind::Shape, 0.0, 0.0, 10.0, 10.0);
    let b = make_element(ElementKind::Shape, 0.0, 0.0, 10.0, 10.0);
    store.push(a.clone());
    store.push(b.clone());
    let mut moved = a.clone();
    moved.x = 99.0;
    store.push(moved);
    assert_eq!(store.len(), 2);
    assert_eq!(store.iter().next().map(|e| e.x), Some(99.0));
}

#[test]
fn store_apply_patch_returns_new_value() {
    let mut store = ElementStore::new();
    let a = make_element(ElementKind::Shape, 0.0, 0.0, 10.0, 10.0);
    store.push(a.clone());
    let updated = store.apply_patch(&a.id, &PartialElement::position(3.0, 4.0)).unwrap();
    assert_eq!((updated.x, updated.y), (3.0, 4.0));
    assert_eq!(store.get(&a.id).unwrap().x, 3.0);
}

#[test]
fn store_apply_patch_unknown_id_is_none() {
    let mut store = ElementStore::new();
    assert!(store.apply_patch(&Uuid::new_v4(), &PartialElement::position(3.0, 4.0)).is_none());
    assert!(store.is_empty());
}

#[test]
fn clamped_holds_geometry_floor_and_keeps_absent_fields() {
    let patch = PartialElement { x: Some(-5.0), height: Some(1.0), content: Some("c".into()), ..Default::default() };
    let clamped = patch.clamped(20.0);
    assert_eq!(clamped.x, Some(0.0));
    assert_eq!(clamped.y, None);
    assert_eq!(clamped.width, None);
    assert_eq!(clamped.height, Some(20.0));
    assert_eq!(clamped.content.as_deref(), Some("c"));
    let inside = PartialElement::geometry(Rect::new(1.0, 2.0, 30.0, 40.0));
    assert_eq!(inside.clamped(20.0), inside);
}
