//! Primitivas vetoriais das ondas do ECG.
//!
//! Cada primitiva recebe o cursor horizontal atual e devolve um [`BeatSegment`]
//! com os comandos de desenho e o novo cursor. Os movimentos verticais são
//! relativos e cada primitiva termina na mesma altura em que começou, então a
//! linha de base não acumula deriva entre batimentos.

use std::fmt;

/// Comando de desenho no formato de path SVG
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// `M x,y` (absoluto)
    MoveTo { x: f64, y: f64 },
    /// `L x,y` (absoluto)
    LineTo { x: f64, y: f64 },
    /// `h dx`
    Horizontal { dx: f64 },
    /// `l dx,dy`
    Line { dx: f64, dy: f64 },
    /// `c c1x,c1y c2x,c2y dx,dy`
    Cubic {
        c1: (f64, f64),
        c2: (f64, f64),
        dx: f64,
        dy: f64,
    },
    /// `q cx,cy dx,dy`
    Quadratic { c: (f64, f64), dx: f64, dy: f64 },
}

impl PathCommand {
    /// Deslocamento vertical relativo do comando (`None` para comandos absolutos)
    pub fn relative_dy(&self) -> Option<f64> {
        match *self {
            PathCommand::MoveTo { .. } | PathCommand::LineTo { .. } => None,
            PathCommand::Horizontal { .. } => Some(0.0),
            PathCommand::Line { dy, .. }
            | PathCommand::Cubic { dy, .. }
            | PathCommand::Quadratic { dy, .. } => Some(dy),
        }
    }
}

/// Formata números sem zeros supérfluos (`10`, `7.5`, `-2.33`)
fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{:.2}", rounded);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PathCommand::MoveTo { x, y } => write!(f, "M {},{}", num(x), num(y)),
            PathCommand::LineTo { x, y } => write!(f, "L {},{}", num(x), num(y)),
            PathCommand::Horizontal { dx } => write!(f, "h {}", num(dx)),
            PathCommand::Line { dx, dy } => write!(f, "l {},{}", num(dx), num(dy)),
            PathCommand::Cubic { c1, c2, dx, dy } => write!(
                f,
                "c {},{} {},{} {},{}",
                num(c1.0),
                num(c1.1),
                num(c2.0),
                num(c2.1),
                num(dx),
                num(dy)
            ),
            PathCommand::Quadratic { c, dx, dy } => {
                write!(f, "q {},{} {},{}", num(c.0), num(c.1), num(dx), num(dy))
            }
        }
    }
}

/// Fragmento de path produzido por uma primitiva ou por um batimento inteiro
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BeatSegment {
    pub commands: Vec<PathCommand>,
    pub start_x: f64,
    pub end_x: f64,
}

impl BeatSegment {
    /// Segmento vazio começando no cursor `x`
    pub fn at(x: f64) -> Self {
        Self {
            commands: Vec::new(),
            start_x: x,
            end_x: x,
        }
    }

    /// Adiciona um comando que avança o cursor em `dx`
    pub fn push(mut self, command: PathCommand, dx: f64) -> Self {
        self.commands.push(command);
        self.end_x += dx;
        self
    }

    /// Encadeia a próxima primitiva a partir do cursor atual
    pub fn then(mut self, primitive: impl FnOnce(f64) -> BeatSegment) -> Self {
        let next = primitive(self.end_x);
        self.commands.extend(next.commands);
        self.end_x = next.end_x;
        self
    }

    /// Avanço horizontal total
    pub fn advance(&self) -> f64 {
        self.end_x - self.start_x
    }

    /// Soma dos deslocamentos verticais relativos
    pub fn vertical_drift(&self) -> f64 {
        self.commands.iter().filter_map(PathCommand::relative_dy).sum()
    }
}

/// Proporções do complexo QRS
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QrsShape {
    /// Largura total
    pub width: f64,
    /// Profundidade da onda Q
    pub q_depth: f64,
    /// Altura da onda R acima da linha de base
    pub r_height: f64,
    /// Profundidade da onda S
    pub s_depth: f64,
}

impl Default for QrsShape {
    fn default() -> Self {
        Self {
            width: 20.0,
            q_depth: 5.0,
            r_height: 65.0,
            s_depth: 10.0,
        }
    }
}

/// Volta à linha de base com um `L` absoluto, eliminando qualquer deriva anterior
pub fn baseline_anchor(x: f64, width: f64, baseline_y: f64) -> BeatSegment {
    BeatSegment::at(x).push(
        PathCommand::LineTo {
            x: x + width,
            y: baseline_y,
        },
        width,
    )
}

/// Trecho isoelétrico
pub fn isoelectric(x: f64, width: f64) -> BeatSegment {
    BeatSegment::at(x).push(PathCommand::Horizontal { dx: width }, width)
}

/// Onda P: bump suave e simétrico
pub fn p_wave(x: f64, width: f64, height: f64) -> BeatSegment {
    let peak = -height * 2.0;
    BeatSegment::at(x).push(
        PathCommand::Cubic {
            c1: (width / 2.0, peak),
            c2: (width / 2.0, peak),
            dx: width,
            dy: 0.0,
        },
        width,
    )
}

/// Segmento PR plano
pub fn pr_segment(x: f64, width: f64) -> BeatSegment {
    isoelectric(x, width)
}

/// Complexo QRS: Q ~10%, R ~45%, S ~30%, retorno no restante
pub fn qrs_complex(x: f64, shape: QrsShape) -> BeatSegment {
    let w = shape.width;
    let q_w = w * 0.10;
    let r_half = w * 0.225;
    let s_w = w * 0.30;
    let rest = w - q_w - 2.0 * r_half - s_w;

    BeatSegment::at(x)
        .push(
            PathCommand::Line {
                dx: q_w,
                dy: shape.q_depth,
            },
            q_w,
        )
        .push(
            PathCommand::Line {
                dx: r_half,
                dy: -(shape.q_depth + shape.r_height),
            },
            r_half,
        )
        .push(
            PathCommand::Line {
                dx: r_half,
                dy: shape.r_height + shape.s_depth,
            },
            r_half,
        )
        .push(
            PathCommand::Line {
                dx: s_w,
                dy: -shape.s_depth,
            },
            s_w,
        )
        .then(|x| isoelectric(x, rest))
}

/// Segmento ST, plano ou deslocado por `deviation` (positivo = supra)
pub fn st_segment(x: f64, width: f64, deviation: f64) -> BeatSegment {
    if deviation == 0.0 {
        return isoelectric(x, width);
    }
    let ramp = width * 0.25;
    BeatSegment::at(x)
        .push(
            PathCommand::Line {
                dx: ramp,
                dy: -deviation,
            },
            ramp,
        )
        .push(
            PathCommand::Horizontal {
                dx: width - 2.0 * ramp,
            },
            width - 2.0 * ramp,
        )
        .push(
            PathCommand::Line {
                dx: ramp,
                dy: deviation,
            },
            ramp,
        )
}

/// Onda T assimétrica: subida mais lenta e alta que a descida.
/// Altura negativa desenha uma T invertida.
pub fn t_wave(x: f64, width: f64, height: f64) -> BeatSegment {
    BeatSegment::at(x).push(
        PathCommand::Cubic {
            c1: (width / 3.0, -height * 1.5),
            c2: (width / 2.0, -height),
            dx: width,
            dy: 0.0,
        },
        width,
    )
}

/// Dentes de serra das ondas F do flutter
pub fn sawtooth(x: f64, teeth: usize, tooth_width: f64, height: f64) -> BeatSegment {
    (0..teeth).fold(BeatSegment::at(x), |seg, _| {
        seg.push(
            PathCommand::Line {
                dx: tooth_width / 2.0,
                dy: -height,
            },
            tooth_width / 2.0,
        )
        .push(
            PathCommand::Line {
                dx: tooth_width / 2.0,
                dy: height,
            },
            tooth_width / 2.0,
        )
    })
}

/// Complexo largo em forma de sino, sem separação P/QRS/T
pub fn bell_complex(x: f64, width: f64, height: f64) -> BeatSegment {
    let half = width / 2.0;
    BeatSegment::at(x)
        .push(
            PathCommand::Quadratic {
                c: (half / 2.0, -height),
                dx: half,
                dy: 0.0,
            },
            half,
        )
        .push(
            PathCommand::Quadratic {
                c: (half / 2.0, height),
                dx: half,
                dy: 0.0,
            },
            half,
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_return_to_their_starting_height() {
        let segments = [
            p_wave(0.0, 15.0, 8.0),
            qrs_complex(0.0, QrsShape::default()),
            st_segment(0.0, 15.0, 4.0),
            t_wave(0.0, 25.0, 15.0),
            sawtooth(0.0, 3, 20.0, 15.0),
            bell_complex(0.0, 60.0, 90.0),
        ];
        for seg in &segments {
            assert!(seg.vertical_drift().abs() < 1e-9, "{:?}", seg);
        }
    }

    #[test]
    fn qrs_spans_its_configured_width() {
        let shape = QrsShape {
            width: 40.0,
            ..QrsShape::default()
        };
        let seg = qrs_complex(12.0, shape);
        assert!((seg.advance() - 40.0).abs() < 1e-9);
        assert!((seg.end_x - 52.0).abs() < 1e-9);
    }

    #[test]
    fn qrs_proportions() {
        let seg = qrs_complex(0.0, QrsShape::default());
        let widths: Vec<f64> = seg
            .commands
            .iter()
            .map(|c| match *c {
                PathCommand::Line { dx, .. } | PathCommand::Horizontal { dx } => dx,
                _ => 0.0,
            })
            .collect();
        assert!((widths[0] - 2.0).abs() < 1e-9); // Q
        assert!((widths[1] + widths[2] - 9.0).abs() < 1e-9); // R
        assert!((widths[3] - 6.0).abs() < 1e-9); // S
    }

    #[test]
    fn chaining_advances_the_cursor() {
        let seg = BeatSegment::at(5.0)
            .then(|x| isoelectric(x, 10.0))
            .then(|x| p_wave(x, 15.0, 8.0))
            .then(|x| pr_segment(x, 10.0));
        assert_eq!(seg.start_x, 5.0);
        assert_eq!(seg.end_x, 40.0);
        assert_eq!(seg.commands.len(), 3);
    }

    #[test]
    fn flat_st_is_a_single_horizontal_run() {
        let seg = st_segment(0.0, 15.0, 0.0);
        assert_eq!(seg.commands, vec![PathCommand::Horizontal { dx: 15.0 }]);
    }

    #[test]
    fn commands_render_as_svg_path_syntax() {
        assert_eq!(PathCommand::MoveTo { x: 0.0, y: 100.0 }.to_string(), "M 0,100");
        assert_eq!(PathCommand::Horizontal { dx: 43.125 }.to_string(), "h 43.13");
        assert_eq!(
            p_wave(0.0, 15.0, 8.0).commands[0].to_string(),
            "c 7.5,-16 7.5,-16 15,0"
        );
        assert_eq!(
            PathCommand::Quadratic {
                c: (15.0, -90.0),
                dx: 30.0,
                dy: 0.0
            }
            .to_string(),
            "q 15,-90 30,0"
        );
    }
}
