//! End-to-end: mount a runner over a fake style host and check the CSS it
//! would write into the page.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use hue_field::{BlobElement, BlobHost, BlobLayout, Offset, Viewport};
use hue_web::style;
use hue_web::{FieldRunner, HueFieldOptions};
use pretty_assertions::assert_eq;

type Styles = Rc<RefCell<BTreeMap<&'static str, String>>>;

/// Stand-in for a DOM element's inline style.
#[derive(Clone, Default)]
struct FakeElement {
    class: &'static str,
    styles: Styles,
    writes: Rc<RefCell<u32>>,
}

impl BlobElement for FakeElement {
    fn set_offset(&mut self, offset: Offset) {
        *self.writes.borrow_mut() += 1;
        for (name, value) in style::offset_declarations(offset) {
            self.styles.borrow_mut().insert(name, value);
        }
    }
}

#[derive(Default)]
struct FakeContainer {
    children: Vec<FakeElement>,
}

impl BlobHost for FakeContainer {
    type Element = FakeElement;

    fn spawn_blob(&mut self, layout: &BlobLayout) -> Option<FakeElement> {
        let el = FakeElement {
            class: style::DYNAMIC_BLOB_CLASS,
            ..FakeElement::default()
        };
        for (name, value) in style::layout_declarations(layout) {
            el.styles.borrow_mut().insert(name, value);
        }
        self.children.push(el.clone());
        Some(el)
    }
}

fn mount(container: &mut FakeContainer, fixed: Vec<FakeElement>) -> FieldRunner<FakeElement> {
    let options = HueFieldOptions::from_json(r#"{ "seed": 1234 }"#).expect("options parse");
    FieldRunner::mount(
        container,
        fixed,
        Viewport::new(1366.0, 768.0),
        3200.0,
        options,
        0,
    )
    .expect("valid options mount")
}

#[test]
fn generated_blobs_get_layout_styles() {
    let mut container = FakeContainer::default();
    let runner = mount(&mut container, Vec::new());

    assert_eq!(runner.seed(), 1234);
    assert_eq!(container.children.len(), 16);
    for child in &container.children {
        assert_eq!(child.class, "hue-blob dynamic");
        let styles = child.styles.borrow();
        for key in ["width", "height", "left", "top", "background"] {
            assert!(styles.contains_key(key), "missing {key}");
        }
        assert_eq!(styles["width"], styles["height"]);
        assert!(styles["left"].ends_with('%'));
        assert!(styles["background"].starts_with("radial-gradient(circle, rgba(255, "));
    }
}

#[test]
fn every_blob_gets_drift_properties_each_frame() {
    let fixed = vec![FakeElement::default(), FakeElement::default()];
    let mut container = FakeContainer::default();
    let mut runner = mount(&mut container, fixed.clone());

    for frame in 1..=3u32 {
        let step = runner.step(f64::from(frame) * 16.0);
        assert!(step.stepped);
        assert_eq!(step.blobs, 18);
        for el in fixed.iter().chain(&container.children) {
            assert_eq!(*el.writes.borrow(), frame);
            let styles = el.styles.borrow();
            assert!(styles[style::DRIFT_X_PROPERTY].ends_with("px"));
            assert!(styles[style::DRIFT_Y_PROPERTY].ends_with("px"));
        }
    }
}

#[test]
fn resize_keeps_offsets_within_new_bounds_plus_wave() {
    let mut container = FakeContainer::default();
    let mut runner = mount(&mut container, Vec::new());
    for frame in 0..200 {
        runner.step(f64::from(frame) * 16.0);
    }
    runner.resize(320.0, 480.0);
    runner.step(3216.0);

    let bounds = runner.field().bounds();
    let max_amp = runner.field().params().amplitude.max;
    for blob in runner.field().blobs() {
        assert!(bounds.contains(blob.drift_x, blob.drift_y));
        let styles = blob.element.styles.borrow();
        let x: f64 = styles[style::DRIFT_X_PROPERTY]
            .trim_end_matches("px")
            .parse()
            .expect("numeric px value");
        assert!(x.abs() <= bounds.x + max_amp);
    }
}
