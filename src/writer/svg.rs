use std::fmt::Write as _;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::GenericImageView;
use tracing::debug;

use super::{Format, QRCode, RenderOptions, Writer};
use crate::common::color::Color;
use crate::common::error::{QRError, QRResult};
use crate::common::matrix::Matrix;
use crate::common::metadata::LabelAlignment;
use crate::style::{LabelManager, LogoManager};

/// Vector writer: one `<rect>` per dark block on a background `<rect>`.
#[derive(Debug, Default, Copy, Clone)]
pub struct SvgWriter;

impl Writer for SvgWriter {
    fn format(&self) -> Format {
        Format::Svg
    }

    fn write(&self, matrix: &Matrix, opts: &RenderOptions) -> QRResult<QRCode> {
        let logo = opts.logo.map(EmbeddedLogo::read).transpose()?;
        let label_height = match opts.label {
            Some(l) => l.block_height(&l.font().load()?),
            None => 0,
        };

        let doc = document(matrix, opts, logo.as_ref(), label_height)
            .map_err(|e| QRError::Image(e.to_string()))?;
        debug!("Wrote {} byte svg document", doc.len());
        Ok(QRCode::new(doc.into_bytes(), Format::Svg.mime_type(), matrix.clone()))
    }
}

// Document
//------------------------------------------------------------------------------

struct EmbeddedLogo<'a> {
    manager: &'a LogoManager,
    mime: &'static str,
    data: String,
    height: u32,
}

impl<'a> EmbeddedLogo<'a> {
    fn read(manager: &'a LogoManager) -> QRResult<Self> {
        let bytes = manager.read_bytes()?;
        let mime = manager.mime_type(&bytes)?;
        let width = manager.width();
        let height = if mime == Format::Svg.mime_type() {
            width
        } else {
            let (w, h) = image::load_from_memory(&bytes)?.dimensions();
            ((width as u64 * h as u64) / w.max(1) as u64).max(1) as u32
        };
        Ok(Self { manager, mime, data: STANDARD.encode(&bytes), height })
    }
}

fn document(
    matrix: &Matrix,
    opts: &RenderOptions,
    logo: Option<&EmbeddedLogo>,
    label_height: u32,
) -> Result<String, std::fmt::Error> {
    let w = matrix.outer_size();
    let h = w + label_height;
    let mut svg = String::new();

    writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    )?;
    writeln!(svg, r#"  <rect x="0" y="0" width="{w}" height="{h}" {}/>"#, fill(opts.background))?;

    writeln!(svg, r#"  <g shape-rendering="crispEdges" {}>"#, fill(opts.foreground))?;
    let offset = matrix.margin_left();
    let n = matrix.block_count();
    for r in 0..n {
        let (y, y_end) = (matrix.block_offset(r), matrix.block_offset(r + 1));
        for c in (0..n).filter(|&c| matrix.is_dark(r, c)) {
            let (x, x_end) = (matrix.block_offset(c), matrix.block_offset(c + 1));
            writeln!(
                svg,
                r#"    <rect x="{}" y="{}" width="{}" height="{}"/>"#,
                offset + x,
                offset + y,
                x_end - x,
                y_end - y
            )?;
        }
    }
    writeln!(svg, "  </g>")?;

    if let Some(logo) = logo {
        let width = logo.manager.width();
        let half = w as f64 / 2.0;
        let x = (half - width as f64 / 2.0) as i64;
        let y = (half - logo.height as f64 / 2.0) as i64;
        if logo.manager.punchout_background() {
            writeln!(
                svg,
                r#"  <rect x="{x}" y="{y}" width="{width}" height="{}" {}/>"#,
                logo.height,
                fill(opts.background)
            )?;
        }
        writeln!(
            svg,
            r#"  <image x="{x}" y="{y}" width="{width}" height="{}" href="data:{};base64,{}"/>"#,
            logo.height, logo.mime, logo.data
        )?;
    }

    if let Some(label) = opts.label {
        write_label(&mut svg, label, w, h)?;
    }

    writeln!(svg, "</svg>")?;
    Ok(svg)
}

fn write_label(svg: &mut String, label: &LabelManager, w: u32, h: u32) -> std::fmt::Result {
    let margin = label.margin();
    let (x, anchor) = match label.alignment() {
        LabelAlignment::Left => (margin.left as i64, "start"),
        LabelAlignment::Center => (w as i64 / 2, "middle"),
        LabelAlignment::Right => (w as i64 - margin.right as i64, "end"),
    };
    let y = h as i64 - margin.bottom as i64;
    writeln!(
        svg,
        r#"  <text x="{x}" y="{y}" font-family="DejaVu Sans, sans-serif" font-size="{}" text-anchor="{anchor}" {}>{}</text>"#,
        label.font_size(),
        fill(label.color()),
        escape(label.text())
    )
}

fn fill(color: Color) -> String {
    if color.alpha() == 0 {
        format!(r#"fill="{}""#, color.to_hex())
    } else {
        format!(r#"fill="{}" fill-opacity="{:.3}""#, color.to_hex(), color.opacity() as f64 / 255.0)
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
