// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `quaff_viewer` crate: the load, render and present loop.

use std::fs;
use std::path::Path;

use kurbo::Point;
use quaff_format::synth::{Quad, SynthNode, encode};
use quaff_format::{CorruptFormat, ImageBuffer};
use quaff_view::QuadPoint;
use quaff_viewer::{Control, Viewer, ViewerConfig, ViewerError};

/// An image of height 4 whose first `black` quadrants are solid.
fn quadrants(black: usize) -> Vec<u8> {
    let children = core::array::from_fn(|i| if i < black { Quad::Black } else { Quad::White });
    encode(4, &SynthNode::new(children))
}

fn config() -> ViewerConfig {
    let mut config = ViewerConfig::default();
    config.view.center = [8, 8];
    config
}

fn catalog_dir(dir: &Path) {
    fs::write(dir.join("a.wri"), quadrants(1)).unwrap();
    fs::write(dir.join("b.WRHI"), quadrants(2)).unwrap();
    fs::write(dir.join("readme.txt"), b"not an image").unwrap();
}

#[test]
fn browsing_a_directory_cycles_images() {
    let dir = tempfile::tempdir().unwrap();
    catalog_dir(dir.path());

    let mut viewer = Viewer::open(dir.path(), config()).unwrap();
    assert_eq!(viewer.catalog().map(|c| c.len()), Some(2));
    assert!(viewer.source().unwrap().ends_with("a.wri"));
    viewer.render();
    assert_eq!(viewer.frame().count_ink(), 64);

    assert!(viewer.apply(Control::Next).unwrap());
    assert!(viewer.source().unwrap().ends_with("b.WRHI"));
    viewer.render();
    assert_eq!(viewer.frame().count_ink(), 128);

    assert!(viewer.apply(Control::Next).unwrap());
    assert!(viewer.source().unwrap().ends_with("a.wri"), "wraps around");
}

#[test]
fn loading_resets_the_view() {
    let dir = tempfile::tempdir().unwrap();
    catalog_dir(dir.path());

    let mut viewer = Viewer::open(dir.path(), config()).unwrap();
    assert!(viewer.apply(Control::Pan { dx: 5, dy: 5 }).unwrap());
    assert!(viewer.apply(Control::ZoomOut).unwrap());
    assert_eq!(viewer.view().center(), QuadPoint::new(13, 13));

    viewer.apply(Control::Next).unwrap();
    assert_eq!(viewer.view().center(), QuadPoint::new(8, 8));
    assert_eq!(viewer.view().zoom(), 1);
}

#[test]
fn view_can_be_kept_across_loads() {
    let dir = tempfile::tempdir().unwrap();
    catalog_dir(dir.path());
    let mut config = config();
    config.view.reset_on_load = false;

    let mut viewer = Viewer::open(dir.path(), config).unwrap();
    viewer.apply(Control::ZoomOut).unwrap();
    viewer.apply(Control::Next).unwrap();
    assert_eq!(viewer.view().zoom(), 2);
}

#[test]
fn zooming_out_shrinks_the_frame() {
    let mut viewer = Viewer::new(ImageBuffer::new(quadrants(1)), config());
    viewer.render();
    assert_eq!(viewer.frame().count_ink(), 64);

    assert!(viewer.apply(Control::ZoomOut).unwrap());
    viewer.render();
    assert_eq!(viewer.frame().count_ink(), 16);

    assert!(viewer.apply(Control::ZoomIn).unwrap());
    assert!(!viewer.apply(Control::ZoomIn).unwrap(), "already at zoom 1");
}

#[test]
fn next_needs_a_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("single.wri");
    fs::write(&path, quadrants(1)).unwrap();

    let mut viewer = Viewer::open(&path, config()).unwrap();
    assert!(viewer.catalog().is_none());
    let err = viewer.apply(Control::Next).unwrap_err();
    assert!(matches!(err, ViewerError::NoCatalog));
    assert!(viewer.source().unwrap().ends_with("single.wri"));
}

#[test]
fn failed_loads_keep_the_catalog_in_step() {
    let dir = tempfile::tempdir().unwrap();
    let first = quadrants(1);
    fs::write(dir.path().join("a.wri"), &first).unwrap();
    fs::write(dir.path().join("b.wri"), vec![0_u8; 4096]).unwrap();
    let mut config = config();
    config.image.capacity = first.len();

    let mut viewer = Viewer::open(dir.path(), config).unwrap();
    let err = viewer.apply(Control::Next).unwrap_err();
    assert!(matches!(err, ViewerError::Load(_)));
    assert!(viewer.source().unwrap().ends_with("a.wri"));
    let catalog = viewer.catalog().unwrap();
    assert_eq!(catalog.current(), viewer.source().unwrap());
    assert_eq!(catalog.position(), 0);

    // Retrying hits the same file rather than skipping past it.
    assert!(viewer.apply(Control::Next).is_err());
    assert_eq!(viewer.catalog().unwrap().position(), 0);
}

#[test]
fn dragging_pans_with_the_pointer() {
    let mut viewer = Viewer::new(ImageBuffer::new(quadrants(1)), config());
    assert!(!viewer.drag_to(Point::new(50.0, 50.0)).unwrap(), "no drag yet");

    viewer.begin_drag(Point::new(100.0, 100.0));
    assert!(viewer.drag_to(Point::new(102.5, 100.0)).unwrap());
    assert_eq!(viewer.view().center(), QuadPoint::new(6, 8));

    // The half pixel left over is carried into the next move.
    assert!(viewer.drag_to(Point::new(103.0, 100.0)).unwrap());
    assert_eq!(viewer.view().center(), QuadPoint::new(5, 8));

    viewer.end_drag();
    assert!(!viewer.drag_to(Point::new(0.0, 0.0)).unwrap());
    assert_eq!(viewer.view().center(), QuadPoint::new(5, 8));
}

#[test]
fn oversized_images_fail_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.wri");
    fs::write(&path, quadrants(1)).unwrap();
    let mut config = config();
    config.image.capacity = 8;

    let err = Viewer::open(&path, config).unwrap_err();
    assert!(matches!(err, ViewerError::Load(_)));
}

#[test]
fn empty_directories_fail_to_open() {
    let dir = tempfile::tempdir().unwrap();
    let err = Viewer::open(dir.path(), config()).unwrap_err();
    assert!(matches!(err, ViewerError::Catalog(_)));
}

#[test]
fn corrupt_images_render_what_they_can() {
    // Root of height 4: quadrant 0 a leaf at block 3, which is missing.
    let mut bytes = vec![0_u8; 16];
    bytes.extend_from_slice(&[4, 0xC2, 0x22, 0, 0, 0, 3, 0]);
    let mut viewer = Viewer::new(ImageBuffer::new(bytes), config());

    let report = viewer.render();
    assert_eq!(report.draw_commands, 0);
    assert_eq!(report.abandoned.len(), 1);
    assert!(matches!(
        report.abandoned[0],
        CorruptFormat::AddressOutOfBounds { blocks: 3, .. }
    ));
    assert_eq!(viewer.frame().count_ink(), 0);
}
