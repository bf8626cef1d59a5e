// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end scenarios through the public API.

mod common;

use common::{ListModel, Row, View, config, view};
use kurbo::{Point, Rect, Size};
use understory_categorized_view::{CategoryModel, CursorMove, Flow, ViewConfig};

/// Categories 1, 2, 3 with 2, 3 and 1 rows, stacked single file.
fn abc(header: f64, category_spacing: u8) -> View {
    let model = ListModel::from_groups(&[
        vec![Row::new(0, 50.0, 10.0); 2],
        vec![Row::new(0, 50.0, 12.0); 3],
        vec![Row::new(0, 50.0, 8.0)],
    ]);
    view(model, header, config(2, true, false, 0, category_spacing))
}

#[test]
fn block_positions_follow_headers_and_bodies() {
    let mut view = abc(18.0, 3);
    assert_eq!(view.block(&2), Some(2..5));
    assert_eq!(view.category_count(), 3);

    let a = view.category_position(&1).unwrap();
    let b = view.category_position(&2).unwrap();
    let body_a = view.category_height(&1).unwrap();
    assert_eq!(body_a, 20.0);
    assert_eq!(a.y, 18.0 + 3.0);
    assert_eq!(b.y, 18.0 + 3.0 + body_a + 18.0 + 3.0);
    assert_eq!(view.category_height(&2), Some(36.0));
}

#[test]
fn removing_a_middle_category() {
    let mut view = abc(18.0, 3);
    let c_before = view.visual_rect(5).unwrap();
    view.remove_rows(2, 4, |model| {
        model.rows.drain(2..=4);
    });
    assert_eq!(view.block(&2), None);
    assert_eq!(view.block(&3), Some(2..3));
    let c_after = view.visual_rect(2).unwrap();
    assert_eq!(c_before.y0 - c_after.y0, 36.0 + 18.0 + 3.0);
}

#[test]
fn scrolling_shifts_every_query() {
    let mut view = abc(10.0, 0);
    let rect = view.visual_rect(3).unwrap();
    view.set_scroll_offset(15.0);
    let scrolled = view.visual_rect(3).unwrap();
    assert_eq!(scrolled, rect - kurbo::Vec2::new(0.0, 15.0));
    assert_eq!(view.index_at(scrolled.center()), Some(3));
    let header = Point::new(1.0, scrolled.y0 + 1.0);
    assert_eq!(view.category_at(header), Some(2));
}

#[test]
fn relayout_on_resize_keeps_membership() {
    let model = ListModel::from_groups(&[
        vec![Row::new(0, 60.0, 10.0); 5],
        vec![Row::new(0, 60.0, 10.0); 2],
    ]);
    let mut view = view(model, 10.0, ViewConfig::default());
    // Three 60 wide items per row in a 200 wide viewport.
    assert_eq!(view.category_height(&1), Some(20.0));

    view.set_viewport(Size::new(130.0, 150.0));
    assert_eq!(view.block(&1), Some(0..5));
    assert_eq!(view.category_height(&1), Some(30.0));
    assert_eq!(view.visual_rect(2), Some(Rect::new(0.0, 20.0, 60.0, 30.0)));

    // Height-only changes keep cached geometry valid.
    view.set_viewport(Size::new(130.0, 40.0));
    assert_eq!(view.visual_rect(2), Some(Rect::new(0.0, 20.0, 60.0, 30.0)));
}

#[test]
fn switching_flow_changes_geometry() {
    let model = ListModel::from_groups(&[vec![Row::new(0, 30.0, 10.0); 4]]);
    let mut view = view(model, 0.0, ViewConfig::default());
    assert_eq!(view.visual_rect(3).map(|rect| rect.y0), Some(0.0));

    view.set_flow(Flow::TopToBottom);
    let stacked = Rect::new(0.0, 30.0, 200.0, 40.0);
    assert_eq!(view.visual_rect(3), Some(stacked));
    assert_eq!(view.move_cursor(Some(3), CursorMove::Left), None);
}

#[test]
fn uniform_sizes_follow_row_zero() {
    let model = ListModel::from_groups(&[vec![
        Row::new(0, 40.0, 20.0),
        Row::new(0, 10.0, 90.0),
        Row::new(0, 70.0, 5.0),
    ]]);
    let mut view = view(model, 0.0, config(1, false, false, 0, 0));
    let third = Rect::new(80.0, 0.0, 120.0, 20.0);
    assert_eq!(view.visual_rect(2), Some(third));

    view.model_mut().rows[0].size = Size::new(100.0, 10.0);
    view.data_changed(0, 0);
    // Two 100 wide columns now.
    let second = Rect::new(100.0, 0.0, 200.0, 10.0);
    assert_eq!(view.visual_rect(1), Some(second));
    let wrapped = Rect::new(0.0, 10.0, 100.0, 20.0);
    assert_eq!(view.visual_rect(2), Some(wrapped));

    view.remove_rows(0, 0, |model| {
        model.rows.remove(0);
    });
    assert_eq!(view.visual_rect(0), Some(Rect::new(0.0, 0.0, 10.0, 90.0)));
}

#[test]
fn model_reset_rebuilds_the_index() {
    let mut view = abc(10.0, 0);
    view.model_mut().rows.reverse();
    view.layout_changed();
    assert_eq!(view.block(&3), Some(0..1));
    assert_eq!(view.block(&1), Some(4..6));
    assert_eq!(view.categories().collect::<Vec<_>>(), vec![3, 2, 1]);

    view.reset();
    assert_eq!(view.category_count(), 0);
    assert_eq!(view.visual_rect(0), None);
    assert_eq!(view.model().row_count(), 6);
}
