// Copyright 2025 the Quaff Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `quaff`: render QUAD Fractal Format images from the command line.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use kurbo::Point;

use quaff_render::RenderReport;
use quaff_view::QuadPoint;
use quaff_viewer::{Control, Viewer, ViewerConfig, parse_point};

#[derive(Parser)]
#[command(name = "quaff", version, about = "Render QUAD Fractal Format images")]
struct Args {
    /// Configuration file (default: $QUAFF_CONFIG, then built-in defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial zoom, a power of two between 1 and 64
    #[arg(long)]
    zoom: Option<u32>,

    /// Initial center in image pixels
    #[arg(long, value_name = "X,Y", value_parser = parse_point, allow_hyphen_values = true)]
    center: Option<QuadPoint>,

    /// Control to apply after the first pass: zoom-in, zoom-out, pan:DX,DY or next
    #[arg(long = "control", value_name = "CONTROL", allow_hyphen_values = true)]
    controls: Vec<Control>,

    /// Pointer drag to apply after the controls, from one screen position to another
    #[arg(long, value_name = "X0,Y0:X1,Y1", value_parser = parse_drag, allow_hyphen_values = true)]
    drag: Vec<(Point, Point)>,

    /// Write the final frame to this file as a binary PBM
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Image file, or directory of images (default: image.directory from the config)
    path: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();

    let mut config =
        ViewerConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(zoom) = args.zoom {
        config.view.zoom = zoom;
    }
    if let Some(center) = args.center {
        config.view.center = [center.x, center.y];
    }
    config.validate()?;

    let path = args
        .path
        .or_else(|| config.image.directory.clone())
        .context("no image given and no image.directory configured")?;
    let mut viewer = Viewer::open(&path, config)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let report = viewer.render();
    print_report(&viewer, &report);
    for control in args.controls {
        if viewer.apply(control)? {
            let report = viewer.render();
            print_report(&viewer, &report);
        }
    }

    for (from, to) in args.drag {
        viewer.begin_drag(from);
        if viewer.drag_to(to)? {
            let report = viewer.render();
            print_report(&viewer, &report);
        }
        viewer.end_drag();
    }

    if let Some(out) = args.out {
        std::fs::write(&out, viewer.frame().to_pbm())
            .with_context(|| format!("failed to write {}", out.display()))?;
        log::info!("wrote frame to {}", out.display());
    }
    Ok(())
}

fn parse_drag(s: &str) -> Result<(Point, Point), String> {
    let (from, to) = s
        .split_once(':')
        .ok_or_else(|| format!("expected X0,Y0:X1,Y1 but got `{s}`"))?;
    let point = |p: &str| {
        parse_point(p).map(|q| Point::new(f64::from(q.x), f64::from(q.y)))
    };
    Ok((point(from)?, point(to)?))
}

fn print_report(viewer: &Viewer, report: &RenderReport) {
    let view = viewer.view();
    let source = viewer
        .source()
        .map_or_else(|| "<memory>".to_owned(), |p| p.display().to_string());
    println!(
        "{source}: zoom {} center ({}, {}): {} decoded, {} culled, {} draws, {} abandoned",
        view.zoom(),
        view.center().x,
        view.center().y,
        report.nodes_decoded,
        report.nodes_culled,
        report.draw_commands,
        report.abandoned.len(),
    );
}
