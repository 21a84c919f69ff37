use std::path::Path;

use anyhow::Context;
use plotters::prelude::*;

use crate::ecg::trace::Trace;
use crate::simulation::buffer::SampleBuffer;

const MONITOR_GREEN: RGBColor = RGBColor(0x22, 0xc5, 0x5e);
const MONITOR_BACKGROUND: RGBColor = RGBColor(0x0f, 0x17, 0x2a);

/// Desenha o buffer de amostras como tira de monitor em SVG
pub fn render_strip(buffer: &SampleBuffer, path: &Path, size: (u32, u32)) -> anyhow::Result<()> {
    let samples = buffer.to_vec();
    let (lo, hi) = samples
        .iter()
        .fold((-20.0_f64, 70.0_f64), |(lo, hi), v| (lo.min(*v), hi.max(*v)));

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&MONITOR_BACKGROUND)
        .context("Falha ao preparar o fundo do gráfico")?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_2d(0..samples.len().max(1), (lo - 5.0)..(hi + 5.0))
        .context("Falha ao montar os eixos do gráfico")?;

    chart
        .draw_series(LineSeries::new(
            samples.iter().enumerate().map(|(i, v)| (i, *v)),
            &MONITOR_GREEN,
        ))
        .context("Falha ao desenhar a série de amostras")?;

    root.present()
        .with_context(|| format!("Falha ao gravar {}", path.display()))?;
    log::info!("Gráfico salvo em {}", path.display());
    Ok(())
}

/// Documento SVG com um traçado estático
pub fn trace_svg(trace: &Trace, width: f64, height: f64) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {w} {h}\" width=\"{w}\" height=\"{h}\">\n  <path d=\"{d}\" fill=\"none\" stroke=\"#{r:02x}{g:02x}{b:02x}\" stroke-width=\"2\"/>\n</svg>\n",
        w = width,
        h = height,
        d = trace.path_data(),
        r = MONITOR_GREEN.0,
        g = MONITOR_GREEN.1,
        b = MONITOR_GREEN.2,
    )
}

/// Grava um traçado estático como arquivo SVG
pub fn write_trace_svg(trace: &Trace, width: f64, height: f64, path: &Path) -> anyhow::Result<()> {
    std::fs::write(path, trace_svg(trace, width, height))
        .with_context(|| format!("Falha ao gravar {}", path.display()))
}
